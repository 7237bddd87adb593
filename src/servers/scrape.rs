//! Hostname extraction from the provider's listing page

use crate::{AppError, Result};
use scraper::{Html, Selector};

/// Parse a CSS selector such as `span.mr-2`
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| AppError::scrape(format!("Invalid selector '{}': {:?}", selector, e)))
}

/// Text content of every element matching `selector`, in document order.
///
/// Text is taken verbatim (all descendant text nodes concatenated, no
/// trimming). A page whose layout changed simply yields fewer or no entries.
pub fn extract_hostnames(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <div class="list">
            <span class="mr-2">al9.nordvpn.com</span><a href="/al9.tcp.ovpn">TCP</a>
            <span class="mr-2 text-bold">ar22.nordvpn.com</span>
            <span class="ml-2">not-a-server</span>
            <p class="mr-2">paragraph-ignored</p>
            <span class="mr-2">au<b>514</b>.nordvpn.com</span>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_extracts_matching_spans_in_order() {
        let selector = parse_selector("span.mr-2").unwrap();
        let hosts = extract_hostnames(LISTING, &selector);
        assert_eq!(
            hosts,
            vec!["al9.nordvpn.com", "ar22.nordvpn.com", "au514.nordvpn.com"]
        );
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let selector = parse_selector("span.mr-2").unwrap();
        let hosts = extract_hostnames(r#"<span class="mr-2"> padded </span>"#, &selector);
        assert_eq!(hosts, vec![" padded "]);
    }

    #[test]
    fn test_changed_layout_yields_empty_list() {
        let selector = parse_selector("span.mr-2").unwrap();
        let hosts = extract_hostnames("<html><body><ul><li>x</li></ul></body></html>", &selector);
        assert!(hosts.is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        assert!(matches!(parse_selector("span..mr"), Err(AppError::Scrape(_))));
    }
}
