//! Incremental reveal of a reply's text.
//!
//! [`StreamingPresenter`] is a pure step generator: it decides what text to
//! show at each step, and the host decides when (typically every
//! [`REVEAL_INTERVAL`]). It never alters the text; the final step always
//! carries the exact original.

use std::time::Duration;

/// Text shorter than this many characters is shown in one step.
pub const SHORT_CONTENT_THRESHOLD: usize = 100;

/// A step is emitted every `STRIDE` tokens.
pub const STRIDE: usize = 3;

/// Suggested delay between steps.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(80);

/// What to display at one point of the reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationStep {
    pub text_so_far: String,
    pub is_final: bool,
}

/// Step generator over one reply text.
#[derive(Debug, Clone)]
pub struct StreamingPresenter {
    text: String,
    tokens: Vec<String>,
    cursor: usize,
    shown: String,
    done: bool,
}

impl StreamingPresenter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = if is_short(&text) {
            Vec::new()
        } else {
            text.split_whitespace().map(str::to_string).collect()
        };

        Self {
            text,
            tokens,
            cursor: 0,
            shown: String::new(),
            done: false,
        }
    }

    /// Whether this text is revealed atomically.
    pub fn is_atomic(&self) -> bool {
        is_short(&self.text)
    }

    /// Text displayed so far (empty before the first step).
    pub fn displayed(&self) -> &str {
        &self.shown
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }
}

fn is_short(text: &str) -> bool {
    text.chars().count() < SHORT_CONTENT_THRESHOLD
}

impl Iterator for StreamingPresenter {
    type Item = PresentationStep;

    fn next(&mut self) -> Option<PresentationStep> {
        if self.done {
            return None;
        }

        let last = self.tokens.len().saturating_sub(1);
        while self.cursor < self.tokens.len() {
            let index = self.cursor;
            self.cursor += 1;

            if !self.shown.is_empty() {
                self.shown.push(' ');
            }
            self.shown.push_str(&self.tokens[index]);

            if index % STRIDE == 0 || index == last {
                return Some(PresentationStep {
                    text_so_far: self.shown.clone(),
                    is_final: false,
                });
            }
        }

        self.done = true;
        self.shown = self.text.clone();
        Some(PresentationStep {
            text_so_far: self.text.clone(),
            is_final: true,
        })
    }
}

/// All steps for `text`, in order.
pub fn present(text: &str) -> Vec<PresentationStep> {
    StreamingPresenter::new(text).collect()
}

/// Slices of `text`, one per step, for hosts that can only append.
///
/// Each slice ends where its step's last token ends in `text`, so the
/// original whitespace is kept and the slices concatenate to exactly `text`.
pub fn reveal_chunks(text: &str) -> Vec<&str> {
    let mut printed = 0;
    present(text)
        .into_iter()
        .map(|step| {
            let end = if step.is_final {
                text.len()
            } else {
                token_end(text, step.text_so_far.split_whitespace().count())
            };
            let chunk = &text[printed..end];
            printed = end;
            chunk
        })
        .collect()
}

/// Byte offset just past the `count`-th whitespace-separated token.
fn token_end(text: &str, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let mut seen = 0;
    let mut in_token = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if in_token && seen == count {
                return idx;
            }
            in_token = false;
        } else if !in_token {
            in_token = true;
            seen += 1;
        }
    }
    text.len()
}
