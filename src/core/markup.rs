/// Presentational markup assembly.
use serde::Serialize;
use std::fmt;

/// Escape caller-supplied text so it cannot open tags or break out of an
/// attribute value.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A finished markup document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GeneratedDocument(String);

impl GeneratedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GeneratedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Append-only builder for inline-styled markup.
///
/// Text passed in is written verbatim: catalog fragments are trusted, and
/// anything that came from the caller must go through `escape_markup` first.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    buf: String,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    pub fn br(&mut self) -> &mut Self {
        self.raw("<br>")
    }

    /// Paragraph break.
    pub fn gap(&mut self) -> &mut Self {
        self.raw("<br><br>")
    }

    pub fn open(&mut self, tag: &str, style: &str) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(" style=\"");
        self.buf.push_str(style);
        self.buf.push_str("\">");
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    pub fn styled(&mut self, tag: &str, style: &str, text: &str) -> &mut Self {
        self.open(tag, style).raw(text).close(tag)
    }

    pub fn strong(&mut self, text: &str) -> &mut Self {
        self.raw("<strong>").raw(text).raw("</strong>")
    }

    /// Bracketed section heading: `【 text 】` in bold.
    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.raw("<strong>【 ").raw(text).raw(" 】</strong>")
    }

    pub fn finish(self) -> GeneratedDocument {
        GeneratedDocument(self.buf)
    }
}
