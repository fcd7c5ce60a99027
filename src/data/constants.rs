//! Constants shared by the grid model and the renderer

use phf::phf_map;

/// Attribute key carrying a declared column span
pub const COLSPAN_ATTR: &str = "colspan";
/// Attribute key carrying a declared row span
pub const ROWSPAN_ATTR: &str = "rowspan";

/// Tag of a data cell
pub const TAG_DATA: &str = "TD";
/// Tag of a header cell
pub const TAG_HEADER: &str = "TH";

/// Characters escaped in rendered text and attribute values
pub static HTML_ESCAPES: phf::Map<char, &'static str> = phf_map! {
    '&' => "&amp;",
    '<' => "&lt;",
    '>' => "&gt;",
    '"' => "&quot;",
    '\'' => "&#39;",
};

/// Escape text for HTML output
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match HTML_ESCAPES.get(&c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html(r#""x""#), "&quot;x&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
