use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rental_search::search::{
    open_link, LinkOpener, LocalClock, LocationSuggestions, PrintOpener, StaticSuggestions,
    SystemOpener,
};
use rental_search::{
    spawn_session, AppConfig, Field, LinkBuilder, Outcome, RequestState, Validator,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rental-search", version, about = "Build car rental search links")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a rental request and print its search link
    Search {
        /// Pickup location, e.g. "Los Angeles, CA"
        #[arg(long)]
        pickup: String,
        /// Drop-off location; defaults to the pickup location
        #[arg(long)]
        drop_off: Option<String>,
        /// Pickup date (YYYY-MM-DD)
        #[arg(long)]
        pickup_date: String,
        /// Drop-off date (YYYY-MM-DD)
        #[arg(long)]
        drop_off_date: String,
        /// Open the link in the system browser
        #[arg(long)]
        open: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List location suggestions for a partial query
    Suggest {
        query: String,
        /// Look up the drop-off field instead of pickup
        #[arg(long)]
        drop_off: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the link
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::Search {
            pickup,
            drop_off,
            pickup_date,
            drop_off_date,
            open,
            json,
        } => {
            info!("🚗 Rental search via {}", config.site.domain);

            let state = RequestState::new(
                Validator::new(LocalClock),
                LinkBuilder::new(config.site.clone()),
            );
            let (form, _session) = spawn_session(state);

            form.update(Field::PickupLocation, pickup).await?;
            if let Some(drop_off) = drop_off {
                form.update(Field::DropOffLocation, drop_off).await?;
            }
            form.update(Field::PickupDate, pickup_date).await?;
            form.update(Field::DropOffDate, drop_off_date).await?;

            let outcome = form.submit().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }

            match outcome {
                Outcome::ReadyToNavigate(url) => {
                    if json && !open {
                        return Ok(());
                    }

                    let opener: Box<dyn LinkOpener> = if open {
                        Box::new(SystemOpener)
                    } else {
                        Box::new(PrintOpener)
                    };
                    open_link(opener.as_ref(), &url)
                }
                Outcome::Rejected(message) => bail!(message),
                Outcome::Editing(_) => {
                    bail!("Pickup location, pickup date and drop-off date are required.")
                }
            }
        }
        Command::Suggest { query, drop_off } => {
            let locations = LocationSuggestions::new(StaticSuggestions::default());
            let (lookup, feed) = if drop_off {
                (locations.on_drop_off_changed(&query), locations.drop_off())
            } else {
                (locations.on_pickup_changed(&query), locations.pickup())
            };
            if let Some(lookup) = lookup {
                lookup.await?;
            }

            let suggestions = feed.current();
            info!("Found {} suggestions for {:?}", suggestions.len(), query);
            for suggestion in suggestions {
                println!("{}", suggestion);
            }
            Ok(())
        }
    }
}
