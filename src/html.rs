//! Tree helpers over `scraper`'s ordered node model. KEGG's listing pages carry
//! no classes or ids, so everything here works from tag names and sibling order.

use scraper::ElementRef;

/// Every element below `root` (including `root` itself) with the given tag, in
/// document order.
pub fn elements_named<'a>(
    root: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |element| element.value().name() == tag)
}

/// Text of every descendant text node, each trimmed, empty ones dropped,
/// joined without a separator.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// First later sibling element with the given tag. Nodes in between are skipped.
pub fn next_sibling_element<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
}

/// Trimmed content of the node right before `element`, when that node is text.
pub fn preceding_text(element: ElementRef<'_>) -> Option<String> {
    element
        .prev_sibling()
        .and_then(|node| node.value().as_text().map(|text| text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn stripped_text_joins_trimmed_fragments() {
        let html = Html::parse_fragment("<b>\n  Energy <i> metabolism </i>\n</b>");
        let b = elements_named(html.root_element(), "b").next().unwrap();
        assert_eq!(stripped_text(b), "Energymetabolism");
    }

    #[test]
    fn preceding_text_requires_text_node() {
        let html = Html::parse_fragment("<ul> 00010 <a href=\"/x\">A</a><br><a href=\"/y\">B</a></ul>");
        let links = elements_named(html.root_element(), "a").collect::<Vec<_>>();
        assert_eq!(preceding_text(links[0]).as_deref(), Some("00010"));
        assert_eq!(preceding_text(links[1]), None);
    }

    #[test]
    fn next_sibling_element_skips_other_nodes() {
        let html = Html::parse_fragment("<div><b>H</b> text <br><ul><li>x</li></ul></div>");
        let b = elements_named(html.root_element(), "b").next().unwrap();
        let ul = next_sibling_element(b, "ul").unwrap();
        assert_eq!(ul.value().name(), "ul");
        assert!(next_sibling_element(ul, "ul").is_none());
    }
}
