//! Marketplace link synthesis
//!
//! Deterministic string construction only; no network calls. Every part and
//! accessory in a returned build gets a search URL carrying the configured
//! tracking tag.

/// Marketplace search endpoint
pub const MARKETPLACE_SEARCH_BASE: &str = "https://www.amazon.in/s";

/// Build a marketplace search URL for an item name with a tracking tag
pub fn marketplace_search_url(name: &str, tag: &str) -> String {
    format!(
        "{}?k={}&tag={}",
        MARKETPLACE_SEARCH_BASE,
        urlencoding::encode(name),
        urlencoding::encode(tag)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_exact() {
        let url = marketplace_search_url("AMD Ryzen 5 7600", "eknowledgetre-21");
        assert_eq!(
            url,
            "https://www.amazon.in/s?k=AMD%20Ryzen%205%207600&tag=eknowledgetre-21"
        );
    }

    #[test]
    fn test_search_url_encodes_special_characters() {
        let url = marketplace_search_url("Corsair RM750e 750W 80+ Gold", "tag-1");
        assert!(url.contains("k=Corsair%20RM750e%20750W%2080%2B%20Gold"));
        assert!(url.ends_with("&tag=tag-1"));
    }
}
