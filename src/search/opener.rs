use crate::error::LINK_FAILURE_MESSAGE;
use crate::search::traits::LinkOpener;
use anyhow::{bail, Context, Result};
use std::process::Command;
use tracing::{error, info};

/// Hand `url` to `opener`, reporting any failure as [`LINK_FAILURE_MESSAGE`].
///
/// The underlying cause is logged, not returned.
pub fn open_link(opener: &dyn LinkOpener, url: &str) -> Result<()> {
    if let Err(e) = opener.open(url) {
        error!("{:#}", e);
        bail!(LINK_FAILURE_MESSAGE);
    }
    Ok(())
}

/// Writes the URL to stdout for the caller to open
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&self, url: &str) -> Result<()> {
        println!("{}", url);
        Ok(())
    }
}

/// Opens the URL with the platform's default browser launcher
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            // The empty title keeps `start` from treating the URL as a window title
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        info!("🌐 Opening {}", url);

        let status = Self::command(url)
            .status()
            .context("Failed to launch system browser")?;

        if !status.success() {
            bail!("Browser launcher exited with {}", status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::sync::Mutex;

    const URL: &str =
        "https://www.kayak.com/in?a=awesomecars&url=/cars/Los Angeles, CA/SFO/2025-03-01/2025-03-05";

    struct BrokenOpener;

    impl LinkOpener for BrokenOpener {
        fn open(&self, _url: &str) -> Result<()> {
            bail!("no browser available")
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn url_is_passed_as_one_argument() {
        let cmd = SystemOpener::command(URL);
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(args.last(), Some(&OsStr::new(URL)));

        if cfg!(target_os = "macos") {
            assert_eq!(cmd.get_program(), "open");
            assert_eq!(args.len(), 1);
        } else if cfg!(target_os = "windows") {
            assert_eq!(cmd.get_program(), "cmd");
            assert_eq!(args, vec!["/C", "start", "", URL]);
        } else {
            assert_eq!(cmd.get_program(), "xdg-open");
            assert_eq!(args.len(), 1);
        }
    }

    #[test]
    fn opener_failure_becomes_generic_message() {
        let err = open_link(&BrokenOpener, URL).unwrap_err();
        assert_eq!(err.to_string(), LINK_FAILURE_MESSAGE);
    }

    #[test]
    fn successful_open_receives_exact_url() {
        let opener = RecordingOpener::default();
        open_link(&opener, URL).unwrap();
        assert_eq!(*opener.opened.lock().unwrap(), vec![URL.to_string()]);
    }
}
