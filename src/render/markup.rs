//! Minimal HTML writer: escaped attributes and text, one element per line.

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Start tag with attributes. `None` values render as boolean attributes.
#[derive(Clone, Debug)]
pub struct Tag {
    name: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
}

impl Tag {
    pub fn new(name: &'static str) -> Self {
        Tag {
            name,
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        self.attrs.push((key, Some(value.as_ref().to_string())));
        self
    }

    pub fn attr_opt(self, key: &'static str, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    /// Boolean attribute, present only when `on`.
    pub fn flag(mut self, key: &'static str, on: bool) -> Self {
        if on {
            self.attrs.push((key, None));
        }
        self
    }

    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            if let Some(v) = value {
                out.push_str("=\"");
                out.push_str(&escape(v));
                out.push('"');
            }
        }
        out.push('>');
    }
}

#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Markup::default()
    }

    pub fn open(&mut self, tag: &Tag) {
        tag.write_open(&mut self.buf);
        self.buf.push('\n');
    }

    /// Element without content or end tag (`input`, `br`).
    pub fn void(&mut self, tag: &Tag) {
        self.open(tag);
    }

    pub fn close(&mut self, name: &str) {
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    /// Element with escaped text content on a single line.
    pub fn element(&mut self, tag: &Tag, text: &str) {
        tag.write_open(&mut self.buf);
        self.buf.push_str(&escape(text));
        self.buf.push_str("</");
        self.buf.push_str(tag.name);
        self.buf.push_str(">\n");
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;");
    }

    #[test]
    fn test_tag_attributes() {
        let mut m = Markup::new();
        m.void(
            &Tag::new("input")
                .attr("name", "a\"b")
                .flag("required", true)
                .flag("multiple", false)
                .attr_opt("value", None::<&str>),
        );
        assert_eq!(m.as_str(), "<input name=\"a&quot;b\" required>\n");
    }

    #[test]
    fn test_element_escapes_text() {
        let mut m = Markup::new();
        m.element(&Tag::new("option").attr("value", "x"), "<x>");
        assert_eq!(m.into_string(), "<option value=\"x\">&lt;x&gt;</option>\n");
    }
}
