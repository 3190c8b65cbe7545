use crate::models::{ValidatedRentalRequest, DATE_FORMAT};
use crate::search::types::SearchSite;
use tracing::debug;

/// Renders validated requests into search-site deep links
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    site: SearchSite,
}

impl LinkBuilder {
    pub fn new(site: SearchSite) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SearchSite {
        &self.site
    }

    /// Build the canonical search URL.
    ///
    /// Path segments are inserted literally, without percent-encoding, so
    /// `Los Angeles, CA` appears with its space and comma intact.
    pub fn build(&self, request: &ValidatedRentalRequest) -> String {
        let url = format!(
            "https://{}/in?a={}&url=/cars/{}/{}/{}/{}",
            self.site.domain,
            self.site.affiliate_id,
            request.pickup_location(),
            request.drop_off_location(),
            request.pickup_date().format(DATE_FORMAT),
            request.drop_off_date().format(DATE_FORMAT),
        );

        debug!("Built search link: {}", url);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn validated(pickup: &str, drop_off: &str) -> ValidatedRentalRequest {
        ValidatedRentalRequest::new(
            pickup.to_string(),
            drop_off.to_string(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        )
    }

    #[test]
    fn segments_are_not_encoded() {
        let url = LinkBuilder::default().build(&validated("Los Angeles, CA", "SFO"));
        assert_eq!(
            url,
            "https://www.kayak.com/in?a=awesomecars&url=/cars/Los Angeles, CA/SFO/2025-03-01/2025-03-05"
        );
    }

    #[test]
    fn build_is_repeatable() {
        let builder = LinkBuilder::default();
        let request = validated("Denver", "Boulder");
        assert_eq!(builder.build(&request), builder.build(&request.clone()));
    }

    #[test]
    fn uses_configured_site() {
        let builder = LinkBuilder::new(SearchSite {
            domain: "www.kayak.co.uk".to_string(),
            affiliate_id: "partner42".to_string(),
        });
        let url = builder.build(&validated("LHR", "LHR"));
        assert_eq!(
            url,
            "https://www.kayak.co.uk/in?a=partner42&url=/cars/LHR/LHR/2025-03-01/2025-03-05"
        );
    }
}
