pub mod link;
pub mod opener;
pub mod suggestions;
pub mod traits;
pub mod types;
pub mod validator;

pub use link::LinkBuilder;
pub use opener::{open_link, PrintOpener, SystemOpener};
pub use suggestions::{LocationSuggestions, StaticSuggestions, SuggestionFeed, MIN_QUERY_LEN};
pub use traits::{Clock, FixedClock, LinkOpener, LocalClock, SuggestionProvider};
pub use types::SearchSite;
pub use validator::Validator;
