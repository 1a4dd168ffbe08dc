//! Page sequencing.
//!
//! Decides how many pages a sheet has and what goes on each:
//!
//! | Mode | Pages | Content |
//! |---|---|---|
//! | line per character | `ceil(len / rows)` | one character per row |
//! | page per character | `len` | every row shows the page's character |
//! | stroke | `len` (minus skipped) | the page's character, from its strokes |
//!
//! In line-per-character mode rows are filled from the sequence in order and
//! wrap around to its start, so a short sequence repeats down the page.

use unicode_segmentation::UnicodeSegmentation;

use crate::canvas::Canvas;
use crate::config::Mode;

/// What one page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Text mode: the guide character of each row, top to bottom.
    TextRows(Vec<String>),
    /// Stroke mode: one character across every cell.
    Strokes(String),
}

/// The page plan for a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSequencer {
    pages: Vec<PageContent>,
}

impl PageSequencer {
    /// Plan the pages for `characters` laid out in `rows` rows.
    #[must_use]
    pub fn new(mode: Mode, characters: &[String], rows: usize) -> Self {
        let pages = if characters.is_empty() || rows == 0 {
            Vec::new()
        } else {
            match mode {
                Mode::LinePerCharacter => {
                    let page_count = characters.len().div_ceil(rows);
                    (0..page_count)
                        .map(|page| {
                            PageContent::TextRows(
                                (0..rows)
                                    .map(|row| characters[(page * rows + row) % characters.len()].clone())
                                    .collect(),
                            )
                        })
                        .collect()
                }
                Mode::PagePerCharacter => characters
                    .iter()
                    .map(|ch| PageContent::TextRows(vec![ch.clone(); rows]))
                    .collect(),
                Mode::Stroke => characters.iter().cloned().map(PageContent::Strokes).collect(),
            }
        };
        Self { pages }
    }

    /// The planned pages in order.
    #[must_use]
    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }

    /// Number of planned pages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing is planned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Issues page breaks between pages, never before the first.
#[derive(Debug, Default)]
pub struct PageBreaker {
    started: usize,
}

impl PageBreaker {
    /// Create a breaker for a fresh canvas.
    #[must_use]
    pub const fn new() -> Self {
        Self { started: 0 }
    }

    /// Start the next page, breaking from the previous one if there is one.
    pub fn begin_page<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        if self.started > 0 {
            canvas.new_page();
        }
        self.started += 1;
    }

    /// Number of pages started so far.
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.started
    }
}

/// Split user input into logical characters.
///
/// A logical character is an extended grapheme cluster, so combining marks,
/// variation selectors, conjoining jamo, emoji modifiers and zero-width-joiner
/// sequences stay with their base character. Clusters made only of
/// whitespace or control characters are dropped.
#[must_use]
pub fn split_characters(input: &str) -> Vec<String> {
    input
        .graphemes(true)
        .filter(|cluster| !cluster.chars().all(|ch| ch.is_whitespace() || ch.is_control()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variation_sequence_stays_together() {
        assert_eq!(split_characters("葛\u{E0100}永"), vec!["葛\u{E0100}", "永"]);
    }

    #[test]
    fn test_zwj_sequence_stays_together() {
        assert_eq!(
            split_characters("\u{1F469}\u{200D}\u{1F4BB} c"),
            vec!["\u{1F469}\u{200D}\u{1F4BB}", "c"]
        );
    }

    #[test]
    fn test_leading_mark_starts_its_own_character() {
        assert_eq!(split_characters("\u{0301}x"), vec!["\u{0301}", "x"]);
    }

    #[test]
    fn test_crlf_is_dropped() {
        assert_eq!(split_characters("永\r\n和"), vec!["永", "和"]);
    }
}
