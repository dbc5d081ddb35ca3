//! Splits one side's raw text into a sequence of cached, normalized lines.

use std::borrow::Cow;

use crate::line_cache::LineCache;
use crate::options::{DiffOptions, RegexReplace};

const NO_NEWLINE_MARKER: &str = "\n\\ No newline at end of file";

/// One side (left or right) of a diff: its lines, cached normalization, and
/// a read cursor shared by the differ algorithms.
pub struct SideData<'a> {
    lines: Vec<LineCache<'a>>,
    idx: usize,
    /// True when the original input was empty (used for `0,0` chunk ranges).
    pub empty: bool,
}

impl<'a> SideData<'a> {
    pub fn new(text: &'a str, options: &DiffOptions, regex_replace: Option<&'a RegexReplace>) -> SideData<'a> {
        let empty = text.is_empty();
        let (body, got_newline) = match text.strip_suffix('\n') {
            Some(stripped) => (stripped, true),
            None => (text, false),
        };

        if !got_newline && body.is_empty() {
            return SideData {
                lines: Vec::new(),
                idx: 0,
                empty,
            };
        }

        let raw_lines: Vec<&str> = body.split('\n').collect();
        let mut raw_lines: Vec<Cow<'a, str>> = raw_lines.into_iter().map(Cow::Borrowed).collect();

        if !got_newline {
            if let Some(last) = raw_lines.pop() {
                raw_lines.push(Cow::Owned(format!("{last}{NO_NEWLINE_MARKER}")));
            }
        }

        let lines = raw_lines
            .into_iter()
            .map(|raw| LineCache::new(raw, options, regex_replace))
            .collect();

        SideData { lines, idx: 0, empty }
    }

    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True once the cursor, advanced by `offset`, has consumed all lines.
    pub fn done(&self, offset: usize) -> bool {
        self.idx + offset >= self.lines.len()
    }

    pub fn peek(&self, offset: usize) -> Option<&LineCache<'a>> {
        self.lines.get(self.idx + offset)
    }

    pub fn current(&self) -> Option<&LineCache<'a>> {
        self.peek(0)
    }

    /// Returns the line at the cursor and advances it by one.
    pub fn next(&mut self) -> Option<&LineCache<'a>> {
        if self.idx >= self.lines.len() {
            return None;
        }
        let line = &self.lines[self.idx];
        self.idx += 1;
        Some(line)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_input_has_no_lines() {
        let options = DiffOptions::default();
        let side = SideData::new("", &options, None);
        assert_eq!(side.len(), 0);
        assert!(side.empty);
    }

    #[test]
    fn single_blank_line_yields_one_empty_line() {
        let options = DiffOptions::default();
        let side = SideData::new("\n", &options, None);
        assert_eq!(side.len(), 1);
        assert_eq!(side.peek(0).unwrap().raw.as_ref(), "");
        assert!(!side.empty);
    }

    #[test]
    fn trailing_newline_yields_plain_lines() {
        let options = DiffOptions::default();
        let side = SideData::new("a\nb\n", &options, None);
        assert_eq!(side.len(), 2);
        assert_eq!(side.peek(0).unwrap().raw.as_ref(), "a");
        assert_eq!(side.peek(1).unwrap().raw.as_ref(), "b");
    }

    #[test]
    fn missing_trailing_newline_embeds_marker_on_last_line() {
        let options = DiffOptions::default();
        let side = SideData::new("a\nb", &options, None);
        assert_eq!(side.len(), 2);
        assert_eq!(side.peek(0).unwrap().raw.as_ref(), "a");
        assert_eq!(side.peek(1).unwrap().raw.as_ref(), "b\n\\ No newline at end of file");
    }

    #[test]
    fn cursor_advances_and_reports_done() {
        let options = DiffOptions::default();
        let mut side = SideData::new("a\nb\n", &options, None);
        assert!(!side.done(0));
        assert_eq!(side.next().unwrap().raw.as_ref(), "a");
        assert!(!side.done(0));
        assert_eq!(side.next().unwrap().raw.as_ref(), "b");
        assert!(side.done(0));
        assert!(side.next().is_none());
    }
}
