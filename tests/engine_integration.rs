//! End-to-end tests: render call, parsing, mapping, layout and placement

use meaxure_text::text::keep_alive::KeepAliveHost;
use meaxure_text::text::render::RenderError;
use meaxure_text::text::testing::{fragments, svg};
use meaxure_text::text::{
    AdvanceMeasure, BlockStyle, Engine, Frame, HorizontalAlignment, ReconstructError, StaticMarkup,
    TextBlock, VerticalAlignment,
};

/// Renders every block with a fixed layout of rows, keyed by block text.
fn renderer(block: &TextBlock) -> Result<String, RenderError> {
    match block.text().as_str() {
        "Hello World" => Ok(svg(&[&["Hello ", "Wo"], &["rld"]])),
        "Title\nBody text" => Ok(svg(&[&["Title"], &["Body "], &["text"]])),
        "Broken" => Ok(svg(&[&["Broken!"], &["?"]])),
        other => Err(format!("no rendering for {other:?}").into()),
    }
}

fn block(frame: Frame, parts: &[(&str, &str)]) -> TextBlock {
    TextBlock::new(frame, BlockStyle::default(), fragments(parts))
}

#[test]
fn test_wrapped_block_is_placed() {
    let engine = Engine::new(renderer, AdvanceMeasure::new(5.0));
    let block = TextBlock::new(
        Frame::new(10.0, 20.0, 60.0, 30.0),
        BlockStyle {
            alignment: HorizontalAlignment::Center,
            vertical_alignment: VerticalAlignment::Center,
            ..BlockStyle::default()
        },
        fragments(&[("Hello ", "Regular"), ("World", "Bold")]),
    );
    let placed = engine.reconstruct(&block).unwrap();

    let summary: Vec<(&str, Option<&str>, Frame)> = placed
        .runs
        .iter()
        .map(|run| (run.text.as_str(), run.style.font_family.as_deref(), run.frame))
        .collect();
    // Two lines of height 10 centered in 30 start 5 below the top.
    // "Hello Wo" is 40 wide in 60, "rld" is 15 wide.
    assert_eq!(
        summary,
        vec![
            ("Hello ", Some("Regular"), Frame::new(20.0, 25.0, 30.0, 10.0)),
            ("Wo", Some("Bold"), Frame::new(50.0, 25.0, 10.0, 10.0)),
            ("rld", Some("Bold"), Frame::new(32.5, 35.0, 15.0, 10.0)),
        ]
    );
    assert!(placed.warnings.is_empty());
}

#[test]
fn test_paragraph_spacing_is_applied() {
    let engine = Engine::new(renderer, AdvanceMeasure::new(1.0));
    let mut block = block(
        Frame::new(0.0, 0.0, 100.0, 100.0),
        &[("Title\n", "Heading"), ("Body text", "Body")],
    );
    block.style.paragraph_spacing = 6.0;
    let placed = engine.reconstruct(&block).unwrap();

    let ys: Vec<(&str, f64)> = placed
        .runs
        .iter()
        .map(|run| (run.text.as_str(), run.frame.y))
        .collect();
    assert_eq!(ys, vec![("Title", 0.0), ("Body ", 16.0), ("text", 26.0)]);
}

#[test]
fn test_batch_isolates_failures() {
    let mut engine = Engine::new(renderer, AdvanceMeasure::new(1.0));
    let frame = Frame::new(0.0, 0.0, 100.0, 40.0);
    let blocks = vec![
        block(frame, &[("Hello World", "A")]),
        block(frame, &[("Broken", "A")]),
        block(frame, &[("Unknown", "A")]),
        block(Frame::new(0.0, 0.0, 100.0, 10.0), &[("One line", "A")]),
    ];
    let results = engine.reconstruct_all(&blocks);
    assert_eq!(results.len(), 4);

    assert_eq!(results[0].as_ref().unwrap().text(), "Hello World");

    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.block_index, 1);
    assert!(matches!(err.source, ReconstructError::Consistency { .. }));
    assert!(err.to_string().starts_with("block 1: line 0:"));

    // A failed render degrades to a single line with a warning.
    let degraded = results[2].as_ref().unwrap();
    assert_eq!(degraded.text(), "Unknown");
    assert_eq!(
        degraded.warnings,
        vec![ReconstructError::Structural { characters: 7 }]
    );

    // Fits on one line: never rendered.
    assert_eq!(results[3].as_ref().unwrap().runs.len(), 1);
}

#[derive(Debug, Default)]
struct RecordingHost {
    calls: Vec<bool>,
}

impl KeepAliveHost for RecordingHost {
    fn set_keep_alive(&mut self, keep_alive: bool) {
        self.calls.push(keep_alive);
    }
}

#[test]
fn test_batch_holds_keep_alive() {
    let mut engine = Engine::new(StaticMarkup::new(""), AdvanceMeasure::new(1.0))
        .with_keep_alive_host(RecordingHost::default());
    engine.reconstruct_all(&[]);
    engine.reconstruct_all(&[block(Frame::default(), &[("x", "A")])]);

    assert_eq!(engine.keep_alive().host().calls, vec![true, false, true, false]);
    assert!(!engine.keep_alive().is_engaged());
}

#[test]
fn test_block_json_length_is_derived_from_text() {
    let json = r#"{
        "frame": {"x": 0, "y": 0, "width": 100, "height": 40},
        "fragments": [{"text": "😀a", "location": 0, "length": 3, "defaultLineHeight": 10}]
    }"#;
    let block: TextBlock = serde_json::from_str(json).unwrap();
    assert_eq!(block.total_length(), 2);

    // The renderer reports one more char than the block holds.
    let engine = Engine::new(
        StaticMarkup::new(svg(&[&["😀a"], &["z"]])),
        AdvanceMeasure::new(1.0),
    );
    assert_eq!(
        engine.reconstruct(&block).unwrap_err(),
        ReconstructError::FragmentsExhausted { line: 1, location: 2 }
    );
}
