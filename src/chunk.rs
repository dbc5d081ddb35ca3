//! Buckets a stream of equal/left-only/right-only edit events into hunks and
//! renders each hunk's header and body.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt::Write as _;

use crate::context::ContextBuffer;
use crate::options::DiffOptions;

/// One finalized output line: its diff sign (`' '`, `'-'`, `'+'`) and text.
struct Entry<'a> {
    sign: char,
    text: Cow<'a, str>,
}

pub struct ChunkAssembler<'a> {
    options: &'a DiffOptions,
    context: ContextBuffer<'a>,

    lhs_idx: usize,
    rhs_idx: usize,
    lhs_size: usize,
    rhs_size: usize,
    lhs_empty: bool,
    rhs_empty: bool,

    pending_lhs: VecDeque<Cow<'a, str>>,
    pending_rhs: VecDeque<Cow<'a, str>>,
    data: VecDeque<Entry<'a>>,

    only_blank_lines: bool,
    only_matching_lines: bool,

    output: String,
    diff_found: bool,
}

impl<'a> ChunkAssembler<'a> {
    pub fn new(options: &'a DiffOptions, lhs_empty: bool, rhs_empty: bool) -> ChunkAssembler<'a> {
        ChunkAssembler {
            options,
            context: ContextBuffer::new(options.context_size),
            lhs_idx: 0,
            rhs_idx: 0,
            lhs_size: 0,
            rhs_size: 0,
            lhs_empty,
            rhs_empty,
            pending_lhs: VecDeque::new(),
            pending_rhs: VecDeque::new(),
            data: VecDeque::new(),
            only_blank_lines: true,
            only_matching_lines: true,
            output: String::new(),
            diff_found: false,
        }
    }

    /// Finalizes any pending single-sided lines immediately, without
    /// waiting for the next `push_both`. Used by the direct differ, which
    /// has no interleaving to wait for.
    pub fn flush_pending(&mut self) {
        self.move_diffs();
    }

    fn move_diffs(&mut self) {
        while let Some(text) = self.pending_lhs.pop_front() {
            self.data.push_back(Entry { sign: '-', text });
        }
        while let Some(text) = self.pending_rhs.pop_front() {
            self.data.push_back(Entry { sign: '+', text });
        }
    }

    /// Drains context lines into the hunk body as equal lines. `last`
    /// selects the trailing-context count (capped at `context_size`)
    /// instead of the full buffered amount.
    fn move_context(&mut self, last: bool) {
        let mut count = if last { self.context.half_size() } else { self.context.size() };
        while count > 0 {
            count -= 1;
            if let Some(text) = self.context.pop_front() {
                self.data.push_back(Entry { sign: ' ', text });
                self.lhs_size += 1;
                self.rhs_size += 1;
            }
        }
    }

    pub fn push_both(&mut self, lhs_idx: usize, rhs_idx: usize, text: Cow<'a, str>) {
        self.move_diffs();
        if !self.data.is_empty() && self.context.full(false) {
            self.output_chunk();
        }
        if self.lhs_size == 0 && self.rhs_size == 0 {
            if self.context.is_empty() {
                self.lhs_idx = lhs_idx;
                self.rhs_idx = rhs_idx;
            } else if self.context.half_full() {
                self.lhs_idx += 1;
                self.rhs_idx += 1;
            }
        }
        let half = self.lhs_size == 0 && self.rhs_size == 0;
        self.context.push(text, half);
    }

    fn check_context(&mut self, lhs_idx: usize, rhs_idx: usize) {
        if self.context.is_empty() && self.lhs_size == 0 && self.rhs_size == 0 {
            self.lhs_idx = lhs_idx;
            self.rhs_idx = rhs_idx;
        }
        self.move_context(false);
    }

    pub fn push_lhs(&mut self, lhs_idx: usize, rhs_idx: usize, text: Cow<'a, str>) {
        if self.options.skip_left_deletions {
            return;
        }
        self.only_blank_lines &= text.is_empty();
        self.only_matching_lines &= self
            .options
            .ignore_matching_lines
            .as_ref()
            .is_some_and(|re| re.is_match(&text));
        self.check_context(lhs_idx, rhs_idx);
        self.pending_lhs.push_back(text);
        self.lhs_size += 1;
    }

    pub fn push_rhs(&mut self, lhs_idx: usize, rhs_idx: usize, text: Cow<'a, str>) {
        self.only_blank_lines &= text.is_empty();
        self.only_matching_lines &= self
            .options
            .ignore_matching_lines
            .as_ref()
            .is_some_and(|re| re.is_match(&text));
        self.check_context(lhs_idx, rhs_idx);
        self.pending_rhs.push_back(text);
        self.rhs_size += 1;
    }

    fn chunk_pos(empty: bool, idx: usize, size: usize) -> String {
        if empty {
            "0,0".to_string()
        } else if size == 1 {
            (idx + 1).to_string()
        } else {
            format!("{},{}", idx + 1, size)
        }
    }

    fn clear(&mut self) {
        self.pending_lhs.clear();
        self.pending_rhs.clear();
        self.data.clear();
        self.lhs_idx += self.lhs_size;
        self.rhs_idx += self.rhs_size;
        self.lhs_size = 0;
        self.rhs_size = 0;
        self.only_blank_lines = true;
        self.only_matching_lines = true;
    }

    pub fn output_chunk(&mut self) {
        if self.lhs_size == 0 && self.rhs_size == 0 {
            self.clear();
            return;
        }
        self.move_context(true);
        self.move_diffs();

        if self.only_blank_lines && self.options.ignore_blank_lines {
            self.only_matching_lines = true;
            self.clear();
            return;
        }
        if self.only_matching_lines && self.options.ignore_matching_chunks && self.options.ignore_matching_lines.is_some() {
            self.only_blank_lines = true;
            self.clear();
            return;
        }

        self.diff_found = true;
        if self.options.show_chunk_headers {
            let lhs_range = Self::chunk_pos(self.lhs_empty, self.lhs_idx, self.lhs_size);
            let rhs_range = Self::chunk_pos(self.rhs_empty, self.rhs_idx, self.rhs_size);
            let _ = writeln!(self.output, "@@ -{lhs_range} +{rhs_range} @@");
        }
        while let Some(entry) = self.data.pop_front() {
            let _ = writeln!(self.output, "{}{}", entry.sign, entry.text);
        }
        self.clear();
    }

    /// Flushes any remaining hunk and returns the accumulated output, or an
    /// empty string if no hunk ever survived suppression.
    pub fn move_output(mut self) -> String {
        self.output_chunk();
        if self.diff_found {
            self.output
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn opts() -> DiffOptions {
        DiffOptions::default()
    }

    #[test]
    fn pure_insertion_produces_single_hunk() {
        let options = opts();
        let mut chunk = ChunkAssembler::new(&options, false, false);
        chunk.push_both(0, 0, Cow::Borrowed("a"));
        chunk.push_rhs(1, 1, Cow::Borrowed("r"));
        chunk.push_both(1, 2, Cow::Borrowed("b"));
        let output = chunk.move_output();
        assert_eq!(output, "@@ -1,2 +1,3 @@\n a\n+r\n b\n");
    }

    #[test]
    fn pure_deletion_produces_single_hunk() {
        let options = opts();
        let mut chunk = ChunkAssembler::new(&options, false, false);
        chunk.push_both(0, 0, Cow::Borrowed("a"));
        chunk.push_lhs(1, 1, Cow::Borrowed("l"));
        chunk.push_both(2, 1, Cow::Borrowed("b"));
        let output = chunk.move_output();
        assert_eq!(output, "@@ -1,3 +1,2 @@\n a\n-l\n b\n");
    }

    #[test]
    fn no_edits_yields_empty_output() {
        let options = opts();
        let mut chunk = ChunkAssembler::new(&options, false, false);
        chunk.push_both(0, 0, Cow::Borrowed("a"));
        chunk.push_both(1, 1, Cow::Borrowed("b"));
        let output = chunk.move_output();
        assert_eq!(output, "");
    }

    #[test]
    fn zero_context_splits_into_multiple_hunks() {
        let mut options = opts();
        options.context_size = 0;
        let mut chunk = ChunkAssembler::new(&options, false, false);
        chunk.push_lhs(0, 0, Cow::Borrowed("L1"));
        chunk.push_rhs(1, 0, Cow::Borrowed("R1"));
        chunk.push_both(1, 1, Cow::Borrowed("mid"));
        chunk.push_lhs(2, 2, Cow::Borrowed("L2"));
        let output = chunk.move_output();
        assert_eq!(output, "@@ -1 +1 @@\n-L1\n+R1\n@@ -3 +3,0 @@\n-L2\n");
    }

    #[test]
    fn ignore_blank_lines_suppresses_whitespace_only_hunk() {
        let mut options = opts();
        options.ignore_blank_lines = true;
        let mut chunk = ChunkAssembler::new(&options, false, false);
        chunk.push_lhs(0, 0, Cow::Borrowed(""));
        chunk.push_rhs(1, 0, Cow::Borrowed(""));
        let output = chunk.move_output();
        assert_eq!(output, "");
    }

    #[test]
    fn empty_side_range_renders_zero_zero() {
        let options = opts();
        let mut chunk = ChunkAssembler::new(&options, true, false);
        chunk.push_rhs(0, 0, Cow::Borrowed("only"));
        let output = chunk.move_output();
        assert_eq!(output, "@@ -0,0 +1 @@\n+only\n");
    }
}
