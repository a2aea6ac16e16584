//! Reference-link cleanup and the record key shared by every reducer.
//!
//! The three scraped datasets refer to each other through article links
//! (`/wiki/Amsterdam_Airport_Schiphol`) or through display names
//! (`Amsterdam Airport Schiphol`). Both forms must land on the same key, so
//! every reducer builds its keys through [`LinkNormalizer::record_key`].

use std::borrow::Cow;

use crate::config::NormalizeConfig;
use crate::constants::WIKI_PREFIX;

#[derive(Debug, Clone)]
pub struct LinkNormalizer {
    prefix: String,
    decode_percent_escapes: bool,
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self {
            prefix: WIKI_PREFIX.to_string(),
            decode_percent_escapes: true,
        }
    }
}

impl LinkNormalizer {
    pub fn new(config: &NormalizeConfig) -> Self {
        Self {
            prefix: config.wiki_prefix.clone(),
            decode_percent_escapes: config.decode_percent_escapes,
        }
    }

    /// Drops everything up to and including the last wiki prefix.
    ///
    /// Covers relative links (`/wiki/Lima`), absolute article URLs
    /// (`https://en.wikipedia.org/wiki/Lima`) and doubled prefixes alike.
    pub fn strip<'a>(&self, link: &'a str) -> &'a str {
        strip_through_prefix(link, &self.prefix)
    }

    /// Cross-reference key for a link or a display name.
    ///
    /// Strips the wiki prefix, decodes `%XX` escapes and replaces whitespace
    /// with underscores. Returns `None` when nothing is left.
    pub fn record_key(&self, value: &str) -> Option<String> {
        let stripped = self.strip(value);
        let decoded = if self.decode_percent_escapes {
            urlencoding::decode(stripped).unwrap_or(Cow::Borrowed(stripped))
        } else {
            Cow::Borrowed(stripped)
        };

        let key = decoded
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");

        // Decoding may reveal a prefix that was escaped in the source
        let key = self.strip(&key).to_string();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn contains_prefix(&self, value: &str) -> bool {
        value.contains(self.prefix.as_str())
    }
}

/// Strips the default `/wiki/` prefix.
pub fn strip_wiki_prefix(link: &str) -> &str {
    strip_through_prefix(link, WIKI_PREFIX)
}

fn strip_through_prefix<'a>(link: &'a str, prefix: &str) -> &'a str {
    let link = link.trim();
    if prefix.is_empty() {
        return link;
    }
    match link.rfind(prefix) {
        Some(at) => link[at + prefix.len()..].trim_start(),
        None => link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wiki_prefix() {
        assert_eq!(strip_wiki_prefix("/wiki/Rio_de_Janeiro"), "Rio_de_Janeiro");
    }

    #[test]
    fn leaves_bare_identifiers_alone() {
        assert_eq!(strip_wiki_prefix("Rio_de_Janeiro"), "Rio_de_Janeiro");
        assert_eq!(strip_wiki_prefix("https://example.org/x"), "https://example.org/x");
    }

    #[test]
    fn stripping_is_idempotent() {
        for link in ["/wiki/KLM", "/wiki//wiki/KLM", "KLM", "", "/wiki/"] {
            let once = strip_wiki_prefix(link);
            assert_eq!(strip_wiki_prefix(once), once, "not idempotent for {link:?}");
        }
    }

    #[test]
    fn strips_absolute_article_urls() {
        assert_eq!(strip_wiki_prefix("https://en.wikipedia.org/wiki/Lima"), "Lima");
        let once = strip_wiki_prefix("https://en.wikipedia.org/wiki//wiki/Lima");
        assert_eq!(once, "Lima");
        assert_eq!(strip_wiki_prefix(once), once);
    }

    #[test]
    fn record_key_of_absolute_url_matches_name() {
        let links = LinkNormalizer::default();
        let key = links
            .record_key("https://en.wikipedia.org/wiki/Jorge_Ch%C3%A1vez_International_Airport")
            .unwrap();
        assert_eq!(key, "Jorge_Chávez_International_Airport");
        assert!(!links.contains_prefix(&key));
        assert_eq!(
            links.record_key("Jorge Chávez International Airport").as_deref(),
            Some(key.as_str())
        );
    }

    #[test]
    fn escaped_prefix_is_stripped_after_decoding() {
        let links = LinkNormalizer::default();
        assert_eq!(links.record_key("%2Fwiki%2FLima").as_deref(), Some("Lima"));
    }

    #[test]
    fn record_key_matches_name_and_link() {
        let links = LinkNormalizer::default();
        assert_eq!(
            links.record_key("Amsterdam Airport Schiphol"),
            links.record_key("/wiki/Amsterdam_Airport_Schiphol")
        );
    }

    #[test]
    fn record_key_decodes_escapes() {
        let links = LinkNormalizer::default();
        assert_eq!(
            links.record_key("/wiki/Gale%C3%A3o_International_Airport").as_deref(),
            Some("Galeão_International_Airport")
        );
    }

    #[test]
    fn record_key_keeps_escapes_when_disabled() {
        let config = NormalizeConfig {
            decode_percent_escapes: false,
            ..NormalizeConfig::default()
        };
        let links = LinkNormalizer::new(&config);
        assert_eq!(
            links.record_key("/wiki/Gale%C3%A3o").as_deref(),
            Some("Gale%C3%A3o")
        );
    }

    #[test]
    fn record_key_of_blank_is_none() {
        let links = LinkNormalizer::default();
        assert_eq!(links.record_key("   "), None);
        assert_eq!(links.record_key("/wiki/"), None);
    }

    #[test]
    fn custom_prefix_is_honored() {
        let config = NormalizeConfig {
            wiki_prefix: "/w/".to_string(),
            ..NormalizeConfig::default()
        };
        let links = LinkNormalizer::new(&config);
        assert_eq!(links.strip("/w/Lima"), "Lima");
        assert_eq!(links.strip("/wiki/Lima"), "/wiki/Lima");
    }
}
