//! Inline content owned by cells

/// A single inline node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Inline {
    Text(String),
    LineBreak,
}

/// Ordered inline content of a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Content(Vec<Inline>);

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content holding a single text node (empty text gives empty content)
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Content::new()
        } else {
            Content(vec![Inline::Text(text)])
        }
    }

    pub fn nodes(&self) -> &[Inline] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, node: Inline) {
        self.0.push(node);
    }

    pub fn push_line_break(&mut self) {
        self.0.push(Inline::LineBreak);
    }

    /// Move every node of `other` to the end of this content
    pub fn append(&mut self, other: &mut Content) {
        self.0.append(&mut other.0);
    }

    /// Flatten to plain text, line breaks become `\n`
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            match node {
                Inline::Text(text) => out.push_str(text),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }
}

impl From<Vec<Inline>> for Content {
    fn from(nodes: Vec<Inline>) -> Self {
        Content(nodes)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_constructor() {
        assert!(Content::text("").is_empty());
        assert_eq!(Content::text("ab").nodes(), &[Inline::Text("ab".into())]);
    }

    #[test]
    fn test_append_moves_nodes() {
        let mut a = Content::text("ab");
        let mut b = Content::text("cd");
        a.push_line_break();
        a.append(&mut b);
        assert!(b.is_empty());
        assert_eq!(a.plain_text(), "ab\ncd");
    }
}
