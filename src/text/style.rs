//! Style descriptors
//!
//! [`RunStyle`] belongs to a single fragment and is carried through to the placed
//! runs untouched; reconstruction only ever clones it. [`BlockStyle`] holds the
//! block-wide knobs that drive line stacking and alignment.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Style of one authored run.
///
/// Only a few well-known keys are typed; everything else the host sends is kept
/// in `extra` and serialized back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RunStyle {
    pub fn with_font_family(font_family: impl Into<String>) -> Self {
        RunStyle {
            font_family: Some(font_family.into()),
            ..RunStyle::default()
        }
    }
}

/// Horizontal alignment of each line within the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    /// Justified and natural text are laid out like start-aligned text.
    #[default]
    #[serde(alias = "left", alias = "justified", alias = "natural")]
    Start,
    Center,
    #[serde(alias = "right")]
    End,
}

/// Vertical alignment of the whole line stack within the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    #[serde(alias = "middle")]
    Center,
    Bottom,
}

/// Block-wide layout settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    /// Explicit line height. Unset or non-positive means "use the fragments'
    /// default line heights".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub alignment: HorizontalAlignment,
    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
    #[serde(default)]
    pub paragraph_spacing: f64,
}

impl BlockStyle {
    /// The line height override, if one is actually in effect.
    pub fn explicit_line_height(&self) -> Option<f64> {
        self.line_height.filter(|height| *height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_line_height_is_no_override() {
        let style = BlockStyle {
            line_height: Some(0.0),
            ..BlockStyle::default()
        };
        assert_eq!(style.explicit_line_height(), None);

        let style = BlockStyle {
            line_height: Some(18.0),
            ..BlockStyle::default()
        };
        assert_eq!(style.explicit_line_height(), Some(18.0));
    }

    #[test]
    fn test_alignment_aliases() {
        let style: BlockStyle = serde_json::from_str(
            r#"{"alignment": "right", "verticalAlignment": "middle", "paragraphSpacing": 4}"#,
        )
        .unwrap();
        assert_eq!(style.alignment, HorizontalAlignment::End);
        assert_eq!(style.vertical_alignment, VerticalAlignment::Center);
        assert_eq!(style.paragraph_spacing, 4.0);
        assert_eq!(style.line_height, None);
    }

    #[test]
    fn test_justified_and_natural_are_start() {
        for value in ["\"justified\"", "\"natural\"", "\"left\"", "\"start\""] {
            let alignment: HorizontalAlignment = serde_json::from_str(value).unwrap();
            assert_eq!(alignment, HorizontalAlignment::Start, "{value}");
        }
    }

    #[test]
    fn test_run_style_keeps_unknown_keys() {
        let json = r##"{"fontFamily": "Inter", "color": "#FF0000FF", "kerning": 0.5}"##;
        let style: RunStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.font_family.as_deref(), Some("Inter"));
        assert_eq!(style.extra.get("kerning"), Some(&serde_json::json!(0.5)));

        let back = serde_json::to_value(&style).unwrap();
        assert_eq!(back["kerning"], serde_json::json!(0.5));
        assert_eq!(back["fontFamily"], serde_json::json!("Inter"));
    }
}
