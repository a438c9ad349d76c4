//! Property-based tests for fragment mapping and layout
//!
//! Blocks are generated as paragraphs of visual lines. The authored text joins the
//! paragraphs with `\n` and the fragment stream cuts it at arbitrary char
//! positions. The renderer reports one row per non-empty visual line, split into
//! runs wherever a fragment boundary falls inside the line.

use meaxure_text::text::testing::{fragments, lines, DEFAULT_LINE_HEIGHT};
use meaxure_text::text::{
    AdvanceMeasure, BlockStyle, Fragment, FragmentLineMapper, Frame, LineGroup, LineLayoutBuilder,
    RunStyle, TextBlock,
};
use proptest::prelude::*;

/// A generated block: its text, the renderer's rows, and the fragment cuts.
#[derive(Debug, Clone)]
struct Scenario {
    text: String,
    rows: Vec<Vec<String>>,
    pieces: Vec<String>,
}

impl Scenario {
    fn fragments(&self) -> Vec<Fragment> {
        let parts: Vec<(&str, &str)> = self
            .pieces
            .iter()
            .enumerate()
            .map(|(index, piece)| (piece.as_str(), if index % 2 == 0 { "A" } else { "B" }))
            .collect();
        fragments(&parts)
    }

    fn map(&self) -> LineGroup {
        let rows: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect();
        let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        FragmentLineMapper::default()
            .map(self.fragments(), &lines(&rows))
            .unwrap()
    }
}

/// Sorted, deduplicated cut points over `0..=len`, both ends included.
fn cut_points(len: usize, cuts: &[usize]) -> Vec<usize> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (len + 1)).collect();
    points.push(0);
    points.push(len);
    points.sort_unstable();
    points.dedup();
    points
}

fn slice(chars: &[char], from: usize, to: usize) -> String {
    chars[from..to].iter().collect()
}

/// Paragraphs of visual lines; an empty paragraph is a blank line.
fn paragraphs_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-zé ]{1,8}", 0..4), 1..5)
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (paragraphs_strategy(), prop::collection::vec(0usize..200, 0..8)).prop_map(
        |(paragraphs, cuts)| {
            let text = paragraphs
                .iter()
                .map(|lines| lines.concat())
                .collect::<Vec<_>>()
                .join("\n");
            let chars: Vec<char> = text.chars().collect();
            let points = cut_points(chars.len(), &cuts);
            let pieces = points
                .windows(2)
                .map(|w| slice(&chars, w[0], w[1]))
                .collect();

            // A renderer never lets one run cross a style boundary, so every
            // visual line is reported as one run per fragment piece it covers.
            let mut rows = Vec::new();
            let mut offset = 0;
            for (index, paragraph) in paragraphs.iter().enumerate() {
                if index > 0 {
                    offset += 1;
                }
                for line in paragraph {
                    let end = offset + line.chars().count();
                    let mut bounds = vec![offset];
                    bounds.extend(points.iter().copied().filter(|p| *p > offset && *p < end));
                    bounds.push(end);
                    rows.push(
                        bounds
                            .windows(2)
                            .map(|w| slice(&chars, w[0], w[1]))
                            .collect(),
                    );
                    offset = end;
                }
            }
            Scenario { text, rows, pieces }
        },
    )
}

proptest! {
    #[test]
    fn test_mapping_conserves_text(scenario in scenario_strategy()) {
        let group = scenario.map();
        prop_assert_eq!(group.total_length(), scenario.text.chars().count());
        prop_assert_eq!(group.text('\n'), scenario.text.clone());
    }

    #[test]
    fn test_mapping_is_deterministic(scenario in scenario_strategy()) {
        prop_assert_eq!(scenario.map(), scenario.map());
    }

    #[test]
    fn test_every_row_is_one_visual_line(scenario in scenario_strategy()) {
        let group = scenario.map();
        let placed: Vec<String> = group
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.iter().map(|f| f.text.as_str()).collect())
            .collect();
        let reported: Vec<String> = scenario.rows.iter().map(|row| row.concat()).collect();
        prop_assert_eq!(placed, reported);
    }

    #[test]
    fn test_split_preserves_chars(text in "[a-zé\n]{1,20}", at in 1usize..21, location in 0usize..100) {
        let fragment = Fragment::new(text.clone(), location, RunStyle::default(), 10.0);
        let length = fragment.length;
        prop_assume!(at <= length);

        let (left, right) = fragment.split_at(at).unwrap();
        prop_assert_eq!(left.length, at);
        prop_assert_eq!(left.location, location);
        match right {
            Some(right) => {
                prop_assert_eq!(left.length + right.length, length);
                prop_assert_eq!(right.location, location + at);
                prop_assert_eq!(format!("{}{}", left.text, right.text), text);
            }
            None => {
                prop_assert_eq!(at, length);
                prop_assert_eq!(left.text, text);
            }
        }
    }

    #[test]
    fn test_stack_extent_adds_up(scenario in scenario_strategy(), spacing in 0.0f64..20.0) {
        let group = scenario.map();
        let block = TextBlock::new(
            Frame::new(0.0, 0.0, 200.0, 400.0),
            BlockStyle { paragraph_spacing: spacing, ..BlockStyle::default() },
            scenario.fragments(),
        );
        let expected = group.line_count() as f64 * DEFAULT_LINE_HEIGHT
            + group.break_count() as f64 * spacing;
        let stack = LineLayoutBuilder::new(&block, &AdvanceMeasure::new(1.0)).build(group);
        prop_assert!((stack.extent() - expected).abs() < 1e-9);
    }
}
