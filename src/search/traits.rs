use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// Source of "today" for date checks, so validation can be tested at fixed dates
pub trait Clock: Send + Sync {
    /// Current local date, i.e. now truncated to midnight
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Location autocomplete capability used by the surrounding application.
/// The validator and link builder never depend on it.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Places matching a partially typed query
    async fn suggest(&self, query: &str) -> Result<Vec<String>>;

    /// Name of the suggestion source
    fn source_name(&self) -> &'static str;
}

/// Hands a finished URL to something that can open it
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}
