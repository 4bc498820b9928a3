//! Whitespace-run segmentation of raw text node content.
//!
//! Word bounds come from unicode-segmentation, then adjacent non-whitespace
//! bounds are coalesced so punctuation stays attached to its word. Whitespace
//! runs are preserved verbatim: they are re-emitted as plain text nodes during
//! wrapping so layout and selection behavior survive the round trip.

use unicode_segmentation::UnicodeSegmentation;

/// One run of a text node's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRun {
    /// A non-whitespace run, wrapped in a marker span.
    Word(String),
    /// A whitespace run, left as a plain text node.
    Gap(String),
}

impl TextRun {
    pub fn is_word(&self) -> bool {
        matches!(self, TextRun::Word(_))
    }

    pub fn text(&self) -> &str {
        match self {
            TextRun::Word(s) | TextRun::Gap(s) => s,
        }
    }
}

fn is_gap(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Split text into alternating word/gap runs. Concatenating the runs in
/// order reproduces the input exactly.
pub fn segment_runs(text: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();

    for bound in text.split_word_bounds() {
        let gap = is_gap(bound);
        match runs.last_mut() {
            Some(TextRun::Word(prev)) if !gap => prev.push_str(bound),
            Some(TextRun::Gap(prev)) if gap => prev.push_str(bound),
            _ => {
                runs.push(if gap {
                    TextRun::Gap(bound.to_string())
                } else {
                    TextRun::Word(bound.to_string())
                });
            }
        }
    }

    runs
}

/// Whether the text contains anything worth wrapping. Whitespace-only or
/// empty nodes are skipped entirely.
pub fn has_word(text: &str) -> bool {
    !text.is_empty() && !is_gap(text)
}
