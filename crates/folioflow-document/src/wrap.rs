// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Greedy line wrapping against measured glyph widths.

use std::iter::Peekable;
use std::str::SplitWhitespace;

use folioflow_core::error::Result;
use folioflow_core::types::FontFace;

use crate::metrics::TextMetrics;

/// A wrapped line: words joined by single spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Measured width in points.
    pub width: f32,
}

/// Wraps text into lines no wider than `max_width`, measured in one face and
/// size.
///
/// A word wider than `max_width` on its own is emitted as a single
/// over-wide line rather than split.
pub struct LineWrapper<'m, M: TextMetrics + ?Sized> {
    metrics: &'m M,
    font: FontFace,
    size: f32,
    max_width: f32,
}

impl<'m, M: TextMetrics + ?Sized> LineWrapper<'m, M> {
    pub fn new(metrics: &'m M, font: FontFace, size: f32, max_width: f32) -> Self {
        Self {
            metrics,
            font,
            size,
            max_width,
        }
    }

    /// Lazily wrap `text`. Calling this again restarts from the first word.
    pub fn lines<'t>(&self, text: &'t str) -> Lines<'t, 'm, M> {
        Lines {
            words: text.split_whitespace().peekable(),
            metrics: self.metrics,
            font: self.font,
            size: self.size,
            max_width: self.max_width,
            failed: false,
        }
    }

    /// Wrap `text` eagerly, stopping at the first measurement failure.
    pub fn wrap(&self, text: &str) -> Result<Vec<Line>> {
        self.lines(text).collect()
    }
}

/// Iterator over wrapped lines. Yields at most one error, then ends.
pub struct Lines<'t, 'm, M: TextMetrics + ?Sized> {
    words: Peekable<SplitWhitespace<'t>>,
    metrics: &'m M,
    font: FontFace,
    size: f32,
    max_width: f32,
    failed: bool,
}

impl<M: TextMetrics + ?Sized> Iterator for Lines<'_, '_, M> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut current = String::new();
        let mut width = 0.0;

        while let Some(&word) = self.words.peek() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            let candidate_width = match self.metrics.text_width(&candidate, self.font, self.size) {
                Ok(w) => w,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            };
            if candidate_width > self.max_width && !current.is_empty() {
                break;
            }
            current = candidate;
            width = candidate_width;
            self.words.next();
        }

        if current.is_empty() {
            None
        } else {
            Some(Ok(Line {
                text: current,
                width,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BuiltinMetrics;
    use folioflow_core::error::FolioflowError;

    /// One point per character, regardless of face or size.
    struct Mono;

    impl TextMetrics for Mono {
        fn text_width(&self, text: &str, _font: FontFace, _size: f32) -> Result<f32> {
            Ok(text.chars().count() as f32)
        }
    }

    struct Broken;

    impl TextMetrics for Broken {
        fn text_width(&self, _text: &str, _font: FontFace, _size: f32) -> Result<f32> {
            Err(FolioflowError::Measurement("font table missing".into()))
        }
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn five_words_then_four() {
        let wrapper = LineWrapper::new(&Mono, FontFace::Regular, 12.0, 25.0);
        let lines = wrapper
            .wrap("The quick brown fox jumps over the lazy dog")
            .unwrap();
        assert_eq!(
            texts(&lines),
            vec!["The quick brown fox jumps", "over the lazy dog"]
        );
    }

    #[test]
    fn long_word_stands_alone() {
        let wrapper = LineWrapper::new(&Mono, FontFace::Regular, 12.0, 10.0);
        let lines = wrapper.wrap("a supercalifragilistic b").unwrap();
        assert_eq!(texts(&lines), vec!["a", "supercalifragilistic", "b"]);
        assert!(lines[1].width > 10.0);
    }

    #[test]
    fn lines_fit_unless_single_word() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                    eiusmod tempor incididunt ut labore et dolore magna aliqua. \
                    Pneumonoultramicroscopicsilicovolcanoconiosis appears here.";
        let metrics = BuiltinMetrics;
        for max_width in [40.0, 120.0, 300.0, 495.0] {
            let wrapper = LineWrapper::new(&metrics, FontFace::Bold, 12.0, max_width);
            for line in wrapper.wrap(text).unwrap() {
                let measured = metrics.text_width(&line.text, FontFace::Bold, 12.0).unwrap();
                assert_eq!(measured, line.width);
                assert!(
                    measured <= max_width || !line.text.contains(' '),
                    "{:?} is {measured} wide at max {max_width}",
                    line.text
                );
            }
        }
    }

    #[test]
    fn joined_lines_reconstruct_normalised_text() {
        let text = "  first line\nsecond\t\tline   with   gaps ";
        let wrapper = LineWrapper::new(&Mono, FontFace::Regular, 12.0, 12.0);
        let joined = texts(&wrapper.wrap(text).unwrap()).join(" ");
        let normalised = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(joined, normalised);
    }

    #[test]
    fn wrapping_is_deterministic_and_restartable() {
        let wrapper = LineWrapper::new(&BuiltinMetrics, FontFace::Italic, 16.0, 200.0);
        let text = "Pack my box with five dozen liquor jugs, then do it again tomorrow";
        let first = wrapper.wrap(text).unwrap();
        let second = wrapper.wrap(text).unwrap();
        assert_eq!(first, second);

        let mut lazy = wrapper.lines(text);
        assert_eq!(lazy.next().unwrap().unwrap(), first[0]);
        assert_eq!(wrapper.lines(text).count(), first.len());
    }

    #[test]
    fn blank_text_has_no_lines() {
        let wrapper = LineWrapper::new(&Mono, FontFace::Regular, 12.0, 20.0);
        assert!(wrapper.wrap("").unwrap().is_empty());
        assert!(wrapper.wrap(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn measurement_failure_propagates_once() {
        let wrapper = LineWrapper::new(&Broken, FontFace::Regular, 12.0, 20.0);
        let mut lines = wrapper.lines("one two");
        assert!(matches!(lines.next(), Some(Err(FolioflowError::Measurement(_)))));
        assert!(lines.next().is_none());
        assert!(wrapper.wrap("one two").is_err());
    }
}
