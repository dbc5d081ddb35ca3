//! The two diff drivers: [`unified::compute`] and [`direct::compute`].

pub mod direct;
pub mod unified;

use crate::chunk::ChunkAssembler;
use crate::line_cache::compare_eq;
use crate::options::DiffOptions;
use crate::side_data::SideData;

/// Shared cursor/assembler bundle the two algorithms drive differently.
struct Driver<'a, 'b> {
    lhs: &'b mut SideData<'a>,
    rhs: &'b mut SideData<'a>,
    chunk: ChunkAssembler<'a>,
    options: &'a DiffOptions,
}

impl<'a, 'b> Driver<'a, 'b> {
    fn new(lhs: &'b mut SideData<'a>, rhs: &'b mut SideData<'a>, options: &'a DiffOptions) -> Driver<'a, 'b> {
        let chunk = ChunkAssembler::new(options, lhs.empty, rhs.empty);
        Driver { lhs, rhs, chunk, options }
    }

    fn more(&self) -> bool {
        !self.lhs.done(0) || !self.rhs.done(0)
    }

    fn compare_eq(&self, lhs_off: usize, rhs_off: usize) -> bool {
        match (self.lhs.peek(lhs_off), self.rhs.peek(rhs_off)) {
            (Some(l), Some(r)) => compare_eq(l, r, self.options),
            _ => false,
        }
    }

    fn push_equal_step(&mut self) {
        let lhs_idx = self.lhs.idx();
        let rhs_idx = self.rhs.idx();
        let text = self.lhs.current().expect("push_equal requires a current lhs line").raw.clone();
        self.chunk.push_both(lhs_idx, rhs_idx, text);
        self.lhs.next();
        self.rhs.next();
    }

    fn push_lhs_step(&mut self) {
        let lhs_idx = self.lhs.idx();
        let rhs_idx = self.rhs.idx();
        if let Some(line) = self.lhs.next() {
            self.chunk.push_lhs(lhs_idx, rhs_idx, line.raw.clone());
        }
    }

    fn push_rhs_step(&mut self) {
        let lhs_idx = self.lhs.idx();
        let rhs_idx = self.rhs.idx();
        if let Some(line) = self.rhs.next() {
            self.chunk.push_rhs(lhs_idx, rhs_idx, line.raw.clone());
        }
    }

    /// Drains any lines left on either side once the main loop is done.
    fn finalize(mut self) -> String {
        while !self.lhs.done(0) {
            self.push_lhs_step();
        }
        while !self.rhs.done(0) {
            self.push_rhs_step();
        }
        self.chunk.move_output()
    }
}
