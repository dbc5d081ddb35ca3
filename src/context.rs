//! Bounded buffer of recent equal lines, used as leading/trailing hunk context.

use std::borrow::Cow;
use std::collections::VecDeque;

/// Holds at most `2 * max` lines: up to `max` already-flushed trailing
/// context plus up to `max` pending leading context for the next hunk.
pub struct ContextBuffer<'a> {
    data: VecDeque<Cow<'a, str>>,
    max: usize,
}

impl<'a> ContextBuffer<'a> {
    pub fn new(context_size: usize) -> ContextBuffer<'a> {
        ContextBuffer {
            data: VecDeque::new(),
            max: context_size,
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn half_full(&self) -> bool {
        self.full(true)
    }

    pub fn full(&self, half: bool) -> bool {
        self.data.len() >= if half { self.max } else { 2 * self.max }
    }

    /// Number of lines to use as *trailing* context when a hunk is finalized:
    /// capped at `max` even if more are buffered.
    pub fn half_size(&self) -> usize {
        if self.half_full() {
            self.max
        } else {
            self.data.len()
        }
    }

    /// Appends `line`, evicting from the front first if already full.
    /// Returns whether the buffer is now full under `half`'s threshold.
    /// A no-op that reports "full" immediately when `max == 0`.
    pub fn push(&mut self, line: Cow<'a, str>, half: bool) -> bool {
        if self.max == 0 {
            return true;
        }
        while self.full(half) {
            self.data.pop_front();
        }
        self.data.push_back(line);
        self.full(half)
    }

    pub fn pop_front(&mut self) -> Option<Cow<'a, str>> {
        self.data.pop_front()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_max_is_always_empty_and_full() {
        let mut ctx: ContextBuffer = ContextBuffer::new(0);
        assert!(ctx.is_empty());
        assert!(ctx.push(Cow::Borrowed("a"), false));
        assert!(ctx.is_empty());
    }

    #[test]
    fn half_full_at_max_lines() {
        let mut ctx: ContextBuffer = ContextBuffer::new(2);
        assert!(!ctx.half_full());
        ctx.push(Cow::Borrowed("a"), true);
        assert!(!ctx.half_full());
        ctx.push(Cow::Borrowed("b"), true);
        assert!(ctx.half_full());
    }

    #[test]
    fn full_evicts_oldest_first() {
        let mut ctx: ContextBuffer = ContextBuffer::new(2);
        ctx.push(Cow::Borrowed("a"), false);
        ctx.push(Cow::Borrowed("b"), false);
        ctx.push(Cow::Borrowed("c"), false);
        ctx.push(Cow::Borrowed("d"), false);
        assert!(ctx.full(false));
        ctx.push(Cow::Borrowed("e"), false);
        assert_eq!(ctx.size(), 4);
        assert_eq!(ctx.pop_front().unwrap().as_ref(), "b");
    }

    #[test]
    fn half_size_caps_at_max() {
        let mut ctx: ContextBuffer = ContextBuffer::new(2);
        ctx.push(Cow::Borrowed("a"), false);
        ctx.push(Cow::Borrowed("b"), false);
        ctx.push(Cow::Borrowed("c"), false);
        assert_eq!(ctx.half_size(), 2);
    }
}
