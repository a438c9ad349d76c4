//! Test helpers
//!
//! Factories for fragment streams and rendered lines, plus a compact textual dump
//! of a [`LineGroup`] that reads well in assertions and snapshots.
//!
//! Fragment styles are identified by their font family, so a fragment written as
//! `("Wo", "B")` is the text `Wo` in style `B`.
//!
//! Dump format, one entry per line:
//!
//!     line "Hello "@0:A "Wo"@6:B     a visual line, fragments as text@location:style
//!     line (empty)                   a visual line without fragments
//!     break @6                       a paragraph break at block offset 6

use crate::text::fragment::Fragment;
use crate::text::mapping::{LineGroup, LineGroupElement};
use crate::text::markup::{Line, RawElement};
use crate::text::style::RunStyle;

/// Default line height given to factory-built fragments.
pub const DEFAULT_LINE_HEIGHT: f64 = 10.0;

/// Build a contiguous fragment stream from `(text, style)` pairs.
pub fn fragments(parts: &[(&str, &str)]) -> Vec<Fragment> {
    let mut location = 0;
    parts
        .iter()
        .map(|(text, style)| {
            let fragment = Fragment::new(
                *text,
                location,
                RunStyle::with_font_family(*style),
                DEFAULT_LINE_HEIGHT,
            );
            location = fragment.end();
            fragment
        })
        .collect()
}

/// Build a contiguous fragment stream with per-fragment default line heights.
pub fn fragments_with_heights(parts: &[(&str, &str, f64)]) -> Vec<Fragment> {
    let mut location = 0;
    parts
        .iter()
        .map(|(text, style, height)| {
            let fragment =
                Fragment::new(*text, location, RunStyle::with_font_family(*style), *height);
            location = fragment.end();
            fragment
        })
        .collect()
}

/// Build rendered lines from run texts. Line `i` sits at `y = 10 * (i + 1)`,
/// runs advance `x` by one unit per char.
pub fn lines(rows: &[&[&str]]) -> Vec<Line> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let y = 10.0 * (index as f64 + 1.0);
            let mut x = 0.0;
            let elements = row
                .iter()
                .map(|text| {
                    let element = RawElement::new(*text, x, y);
                    x += element.len() as f64;
                    element
                })
                .collect();
            Line::new(elements)
        })
        .collect()
}

/// Render rows as `<tspan>` markup, the way a vector renderer would.
pub fn svg(rows: &[&[&str]]) -> String {
    let mut out = String::from("<svg><text>");
    for line in lines(rows) {
        for element in line.elements {
            out.push_str(&format!(
                "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
                element.x, element.y, element.text
            ));
        }
    }
    out.push_str("</text></svg>");
    out
}

fn style_name(fragment: &Fragment) -> &str {
    fragment.style.font_family.as_deref().unwrap_or("-")
}

/// Dump a line group in the compact format described in the module docs.
pub fn dump_line_group(group: &LineGroup) -> String {
    group
        .elements()
        .iter()
        .map(|element| match element {
            LineGroupElement::Fragments(fragments) if fragments.is_empty() => {
                "line (empty)".to_string()
            }
            LineGroupElement::Fragments(fragments) => {
                let parts: Vec<String> = fragments
                    .iter()
                    .map(|f| format!("{:?}@{}:{}", f.text, f.location, style_name(f)))
                    .collect();
                format!("line {}", parts.join(" "))
            }
            LineGroupElement::ParagraphBreak(mark) => format!("break @{}", mark.location),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
