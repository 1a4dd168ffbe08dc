//! Integration tests for page sequencing.

use copybook_paint::{Canvas, Mode, PageBreaker, PageContent, PageSequencer, RecordingCanvas, split_characters};

fn chars(s: &str) -> Vec<String> {
    split_characters(s)
}

fn rows(page: &PageContent) -> Vec<&str> {
    match page {
        PageContent::TextRows(rows) => rows.iter().map(String::as_str).collect(),
        PageContent::Strokes(ch) => panic!("unexpected stroke page for {ch}"),
    }
}

#[test]
fn test_split_drops_whitespace() {
    assert_eq!(chars(" 永 和\n九年\t"), vec!["永", "和", "九", "年"]);
    assert!(chars(" \n\t").is_empty());
}

#[test]
fn test_split_keeps_combining_marks() {
    assert_eq!(chars("e\u{0301}a"), vec!["e\u{0301}", "a"]);
    assert_eq!(chars("か\u{3099}き"), vec!["か\u{3099}", "き"]);
    assert_eq!(chars("\u{2764}\u{FE0F}x"), vec!["\u{2764}\u{FE0F}", "x"]);
}

#[test]
fn test_split_keeps_conjoining_jamo_together() {
    // ᄒ + ᅡ + ᆫ spell 한 without the precomposed syllable.
    assert_eq!(chars("\u{1112}\u{1161}\u{11AB}한"), vec!["\u{1112}\u{1161}\u{11AB}", "한"]);
}

#[test]
fn test_split_keeps_ideographic_tone_marks() {
    assert_eq!(chars("永\u{302A}和\u{302B}"), vec!["永\u{302A}", "和\u{302B}"]);
}

#[test]
fn test_split_keeps_emoji_modifiers() {
    assert_eq!(chars("\u{1F44D}\u{1F3FD}永"), vec!["\u{1F44D}\u{1F3FD}", "永"]);
}

#[test]
fn test_line_mode_gives_one_row_per_cluster() {
    let plan = PageSequencer::new(Mode::LinePerCharacter, &chars("\u{1112}\u{1161}\u{11AB}永\u{302A}"), 4);
    assert_eq!(
        rows(&plan.pages()[0]),
        vec!["\u{1112}\u{1161}\u{11AB}", "永\u{302A}", "\u{1112}\u{1161}\u{11AB}", "永\u{302A}"]
    );
}

#[test]
fn test_fewer_characters_than_rows_cycle() {
    let plan = PageSequencer::new(Mode::LinePerCharacter, &chars("AB"), 5);
    assert_eq!(plan.len(), 1);
    assert_eq!(rows(&plan.pages()[0]), vec!["A", "B", "A", "B", "A"]);
}

#[test]
fn test_more_characters_than_rows_paginate() {
    let plan = PageSequencer::new(Mode::LinePerCharacter, &chars("ABCDE"), 2);
    assert_eq!(plan.len(), 3);
    assert_eq!(rows(&plan.pages()[0]), vec!["A", "B"]);
    assert_eq!(rows(&plan.pages()[1]), vec!["C", "D"]);
    // The last page wraps to the start of the sequence.
    assert_eq!(rows(&plan.pages()[2]), vec!["E", "A"]);
}

#[test]
fn test_page_per_character() {
    let plan = PageSequencer::new(Mode::PagePerCharacter, &chars("永和"), 3);
    assert_eq!(plan.len(), 2);
    assert_eq!(rows(&plan.pages()[0]), vec!["永"; 3]);
    assert_eq!(rows(&plan.pages()[1]), vec!["和"; 3]);
}

#[test]
fn test_stroke_pages() {
    let plan = PageSequencer::new(Mode::Stroke, &chars("永和"), 10);
    assert_eq!(
        plan.pages(),
        &[PageContent::Strokes("永".to_string()), PageContent::Strokes("和".to_string())]
    );
}

#[test]
fn test_nothing_to_plan() {
    assert!(PageSequencer::new(Mode::LinePerCharacter, &[], 4).is_empty());
    assert!(PageSequencer::new(Mode::Stroke, &chars("A"), 0).is_empty());
}

#[test]
fn test_breaker_never_breaks_before_first_page() {
    let mut canvas = RecordingCanvas::new(10.0, 10.0);
    let mut breaker = PageBreaker::new();

    breaker.begin_page(&mut canvas);
    assert_eq!(canvas.pages().len(), 1);

    breaker.begin_page(&mut canvas);
    breaker.begin_page(&mut canvas);
    assert_eq!(canvas.pages().len(), 3);
    assert_eq!(breaker.pages(), 3);

    canvas.new_page();
    assert_eq!(canvas.pages().len(), 4);
}
