//! Endpoint links on the documentation index page.

use crate::docs::page::selector;
use crate::error::AppResult;
use scraper::Html;
use tracing::info;

/// Selector of the links to each endpoint's documentation page.
pub const ENDPOINT_LINK_SELECTOR: &str = "p.mgb-5.pdl-10 a";

/// Link targets of every endpoint listed on the index page, in page order.
pub fn endpoint_links(index_html: &str) -> AppResult<Vec<String>> {
    let document = Html::parse_document(index_html);
    let links: Vec<String> = document
        .select(&selector(ENDPOINT_LINK_SELECTOR)?)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect();
    info!(count = links.len(), "found endpoint documentation links");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_links_in_page_order() {
        let html = r#"<div>
<p class="mgb-5 pdl-10"><a href="https://uexcorp.space/api/documentation/id/categories/">categories</a></p>
<p class="mgb-5"><a href="/ignored">not an endpoint</a></p>
<p class="pdl-10 mgb-5"><a href="https://uexcorp.space/api/documentation/id/cities/">cities</a></p>
<p class="mgb-5 pdl-10"><a>no target</a></p>
</div>"#;
        assert_eq!(
            endpoint_links(html).unwrap(),
            vec![
                "https://uexcorp.space/api/documentation/id/categories/",
                "https://uexcorp.space/api/documentation/id/cities/",
            ]
        );
    }

    #[test]
    fn test_empty_index() {
        assert!(endpoint_links("<html></html>").unwrap().is_empty());
    }
}
