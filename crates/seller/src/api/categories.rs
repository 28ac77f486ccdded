//! Category option-markup parsing.
//!
//! The category endpoint returns the selection list as a pre-rendered
//! nested `<option>` markup string; nesting depth is encoded as a leading
//! `&nbsp;` indent run (two per level). [`parse_category_options`] flattens
//! it into rows the form can consume. Depth is display grouping only and
//! plays no part in attribute filtering.

use tradewind_core::CategoryId;

/// One flattened category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub label: String,
    /// Indentation level, `0` for top-level categories.
    pub depth: u8,
}

const INDENT_MARKER: &str = "&nbsp;";
const MARKERS_PER_LEVEL: usize = 2;

/// Flatten nested option markup into `{ id, label, depth }` rows.
///
/// Entries with a missing/empty `value` attribute or an empty label are
/// dropped. Server order is preserved.
#[must_use]
pub fn parse_category_options(markup: &str) -> Vec<CategoryOption> {
    let mut options = Vec::new();
    let mut rest = markup;

    while let Some(start) = rest.find("<option") {
        let Some(tag) = rest.get(start..) else { break };
        let Some(tag_end) = tag.find('>') else { break };
        let Some(body_and_rest) = tag.get(tag_end + 1..) else { break };
        let Some(body_end) = body_and_rest.find("</option>") else { break };

        let attrs = tag.get(..tag_end).unwrap_or_default();
        let body = body_and_rest.get(..body_end).unwrap_or_default();
        rest = body_and_rest.get(body_end..).unwrap_or_default();

        if let Some(option) = parse_option(attrs, body) {
            options.push(option);
        }
    }

    options
}

fn parse_option(attrs: &str, body: &str) -> Option<CategoryOption> {
    let value = attribute_value(attrs)?;
    if value.trim().is_empty() {
        return None;
    }

    let mut markers = 0;
    let mut label = body;
    while let Some(stripped) = label.trim_start().strip_prefix(INDENT_MARKER) {
        markers += 1;
        label = stripped;
    }

    let label = decode_entities(label.trim());
    if label.is_empty() {
        return None;
    }

    let depth = u8::try_from(markers / MARKERS_PER_LEVEL).unwrap_or(u8::MAX);
    Some(CategoryOption {
        id: CategoryId::new(value.trim()),
        label,
        depth,
    })
}

fn attribute_value(attrs: &str) -> Option<&str> {
    let after = attrs.split("value=\"").nth(1)?;
    after.split('"').next()
}

fn decode_entities(label: &str) -> String {
    label
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#039;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_options() {
        let markup = r#"<option value="1">Furniture</option><option value="2">Decor</option>"#;
        let options = parse_category_options(markup);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, CategoryId::new("1"));
        assert_eq!(options[0].label, "Furniture");
        assert_eq!(options[0].depth, 0);
    }

    #[test]
    fn test_nested_indentation_becomes_depth() {
        let markup = concat!(
            r#"<option value="1">Furniture</option>"#,
            r#"<option value="4">&nbsp;&nbsp;Tables</option>"#,
            r#"<option value="9">&nbsp;&nbsp;&nbsp;&nbsp;Dining Tables</option>"#,
        );
        let options = parse_category_options(markup);
        assert_eq!(options.len(), 3);
        assert_eq!(options[1].label, "Tables");
        assert_eq!(options[1].depth, 1);
        assert_eq!(options[2].label, "Dining Tables");
        assert_eq!(options[2].depth, 2);
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let markup = concat!(
            r#"<option value="">Pick one</option>"#,
            r#"<option>No value</option>"#,
            r#"<option value="5"></option>"#,
            r#"<option value="6">Rugs</option>"#,
        );
        let options = parse_category_options(markup);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, CategoryId::new("6"));
    }

    #[test]
    fn test_entities_in_labels_are_decoded() {
        let markup = r#"<option value="3">Kids &amp; Baby</option>"#;
        let options = parse_category_options(markup);
        assert_eq!(options[0].label, "Kids & Baby");
    }

    #[test]
    fn test_empty_markup() {
        assert!(parse_category_options("").is_empty());
    }

    #[test]
    fn test_server_order_is_preserved() {
        let markup = concat!(
            r#"<option value="9">Zulu</option>"#,
            r#"<option value="2">Alpha</option>"#,
        );
        let ids: Vec<_> = parse_category_options(markup)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![CategoryId::new("9"), CategoryId::new("2")]);
    }
}
