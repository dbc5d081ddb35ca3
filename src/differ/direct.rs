//! Positional (zip) diff: compares the two sides line-by-line at the same
//! cursor offset, with no resync search. Used for side-by-side output where
//! `context_size` is forced to 0 by the entry point.

use crate::options::DiffOptions;
use crate::side_data::SideData;

use super::Driver;

pub fn compute(lhs: &mut SideData<'_>, rhs: &mut SideData<'_>, options: &DiffOptions) -> String {
    let mut driver = Driver::new(lhs, rhs, options);
    while driver.more() {
        if driver.compare_eq(0, 0) {
            driver.push_equal_step();
        } else {
            push_diff_step(&mut driver);
        }
    }
    driver.finalize()
}

/// Pushes one line from each side (where present) as a single-sided edit,
/// then advances both cursors in lockstep.
fn push_diff_step(driver: &mut Driver<'_, '_>) {
    if !driver.lhs.done(0) {
        driver.push_lhs_step();
    }
    if !driver.rhs.done(0) {
        driver.push_rhs_step();
    }
    driver.chunk.flush_pending();
}
