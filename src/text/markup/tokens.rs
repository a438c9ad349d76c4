//! Token definitions for render-output markup
//!
//! The renderer speaks an XML dialect (SVG in practice). We never need a real XML
//! tree: tags, their quoted attributes, and the raw text between them are enough.
//! The tokens are defined using the logos derive macro; whitespace between
//! tokens is skipped, and text content is recovered later from token spans, so
//! nothing here has to round-trip the source.
use logos::{Lexer, Logos};

/// All tokens the markup scanner distinguishes.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum MarkupToken {
    /// `<name`, the start of an opening tag. Carries the element name.
    #[regex(r"<[A-Za-z_][A-Za-z0-9_:.-]*", |lex| lex.slice()[1..].to_string())]
    OpenTag(String),

    /// `</name>`, a whole closing tag. Carries the element name.
    #[regex(r"</[A-Za-z_][A-Za-z0-9_:.-]*[ \t\r\n]*>", close_tag_name)]
    CloseTag(String),

    /// `name="value"` or `name='value'`, carrying the unquoted pair.
    #[regex(r#"[A-Za-z_:][A-Za-z0-9_:.-]*[ \t\r\n]*=[ \t\r\n]*"[^"]*""#, attribute)]
    #[regex(r#"[A-Za-z_:][A-Za-z0-9_:.-]*[ \t\r\n]*=[ \t\r\n]*'[^']*'"#, attribute)]
    Attribute((String, String)),

    #[token(">")]
    TagEnd,

    #[token("/>")]
    SelfClose,

    /// Character data, comments, declarations: anything without markup meaning.
    #[regex(r#"[^<>"'=/ \t\r\n\f]+"#)]
    Text,

    /// A lone markup character that did not start anything we recognize.
    #[regex(r#"[<"'=/]"#)]
    Stray,
}

fn close_tag_name(lex: &mut Lexer<MarkupToken>) -> String {
    lex.slice()[2..].trim_end_matches('>').trim_end().to_string()
}

fn attribute(lex: &mut Lexer<MarkupToken>) -> (String, String) {
    let slice = lex.slice();
    let (name, rest) = slice.split_once('=').unwrap_or((slice, ""));
    let quoted = rest.trim();
    // Strip the surrounding quotes; the regex guarantees both are there.
    let value = quoted.get(1..quoted.len().saturating_sub(1)).unwrap_or("");
    (name.trim().to_string(), value.to_string())
}

impl MarkupToken {
    /// Check if this token can end an opening tag
    pub fn ends_tag(&self) -> bool {
        matches!(self, MarkupToken::TagEnd | MarkupToken::SelfClose)
    }
}
