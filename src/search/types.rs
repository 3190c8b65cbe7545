use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Target search site for generated deep links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSite {
    /// Host of the rental search site
    pub domain: String,
    /// Partner tracking token passed as the `a` query parameter
    pub affiliate_id: String,
}

impl Default for SearchSite {
    fn default() -> Self {
        Self {
            domain: "www.kayak.com".to_string(),
            affiliate_id: "awesomecars".to_string(),
        }
    }
}

impl SearchSite {
    /// Reject settings that would produce a link without a host or partner token
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            bail!("search site domain must not be blank");
        }
        if self.affiliate_id.trim().is_empty() {
            bail!("affiliate id must not be blank");
        }
        if self.domain.contains('/') {
            bail!("search site domain must be a bare host, got {}", self.domain);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_kayak() {
        let site = SearchSite::default();
        assert_eq!(site.domain, "www.kayak.com");
        assert_eq!(site.affiliate_id, "awesomecars");
        assert!(site.validate().is_ok());
    }

    #[test]
    fn blank_or_schemed_domain_is_rejected() {
        let mut site = SearchSite::default();
        site.domain = " ".to_string();
        assert!(site.validate().is_err());

        site.domain = "https://www.kayak.com".to_string();
        assert!(site.validate().is_err());

        let mut site = SearchSite::default();
        site.affiliate_id.clear();
        assert!(site.validate().is_err());
    }
}
