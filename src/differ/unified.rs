//! Shortest-edit-first resync search driving unified diff output.
//!
//! This is a heuristic, not a minimum-edit-distance (LCS) search: at each
//! divergence it looks for the nearer of "skip some lhs lines then resync"
//! and "skip some rhs lines then resync", and falls back to emitting one
//! line from each side if neither search finds a resync within the
//! configured loop budget.

use crate::options::DiffOptions;
use crate::side_data::SideData;

use super::Driver;

pub fn compute(lhs: &mut SideData<'_>, rhs: &mut SideData<'_>, options: &DiffOptions) -> String {
    let mut driver = Driver::new(lhs, rhs, options);
    unified_loop(&mut driver);
    driver.finalize()
}

fn unified_loop(driver: &mut Driver<'_, '_>) {
    while driver.more() {
        loop_both(driver);
        let mut loop_count = 0usize;
        while driver.more() {
            if past_max_diff_chunk_length(driver, &mut loop_count) {
                break;
            }
            // A resync was found and the run leading up to it was pushed:
            // stop here so the outer loop can fast-forward through it via
            // loop_both. Otherwise find_next already pushed one fallback
            // line from each side; keep trying.
            if find_next(driver) {
                break;
            }
        }
    }
}

fn loop_both(driver: &mut Driver<'_, '_>) {
    while driver.more() && driver.compare_eq(0, 0) {
        driver.push_equal_step();
    }
}

fn past_max_diff_chunk_length(driver: &mut Driver<'_, '_>, loop_count: &mut usize) -> bool {
    *loop_count += 1;
    if *loop_count > driver.options.max_diff_chunk_length {
        let lhs_idx = driver.lhs.idx();
        let rhs_idx = driver.rhs.idx();
        driver
            .chunk
            .push_lhs(lhs_idx, rhs_idx, std::borrow::Cow::Borrowed("Maximum loop count reached"));
        true
    } else {
        false
    }
}

/// Scans with `lhs` offset starting at 1 and `rhs` at 0, biasing toward
/// resolving left-only (deletion) runs first. After the first outer step,
/// `lhs` resets to 0 rather than 1 on each subsequent attempt.
fn find_next_right(driver: &Driver<'_, '_>) -> (usize, usize, bool) {
    let mut lhs = 1usize;
    let mut rhs = 0usize;
    let mut equal = false;
    while !driver.rhs.done(rhs) {
        while !driver.lhs.done(lhs) {
            if driver.compare_eq(lhs, rhs) {
                equal = true;
                break;
            }
            lhs += 1;
        }
        if equal {
            break;
        }
        rhs += 1;
        // Intentionally 0, not 1, on every outer step after the first.
        lhs = 0;
    }
    (lhs, rhs, equal)
}

/// Symmetric counterpart of [`find_next_right`] with the roles of lhs/rhs
/// swapped.
fn find_next_left(driver: &Driver<'_, '_>) -> (usize, usize, bool) {
    let mut lhs = 0usize;
    let mut rhs = 1usize;
    let mut equal = false;
    while !driver.lhs.done(lhs) {
        while !driver.rhs.done(rhs) {
            if driver.compare_eq(lhs, rhs) {
                equal = true;
                break;
            }
            rhs += 1;
        }
        if equal {
            break;
        }
        lhs += 1;
        rhs = 0;
    }
    (lhs, rhs, equal)
}

fn abs_diff(lhs: usize, rhs: usize) -> usize {
    lhs.abs_diff(rhs)
}

/// Finds the next resync point and drains the edits leading up to it.
/// Returns false if no resync was found (loop should stop after draining
/// at most one line from each side).
fn find_next(driver: &mut Driver<'_, '_>) -> bool {
    let (lhs_1, rhs_1, ok_1) = find_next_right(driver);
    let (lhs_2, rhs_2, ok_2) = find_next_left(driver);

    if ok_1 && (!ok_2 || abs_diff(lhs_1, rhs_1) < abs_diff(lhs_2, rhs_2)) {
        for _ in 0..lhs_1 {
            driver.push_lhs_step();
        }
        for _ in 0..rhs_1 {
            driver.push_rhs_step();
        }
        true
    } else if ok_2 {
        for _ in 0..lhs_2 {
            driver.push_lhs_step();
        }
        for _ in 0..rhs_2 {
            driver.push_rhs_step();
        }
        true
    } else {
        if !driver.lhs.done(0) {
            driver.push_lhs_step();
        }
        if !driver.rhs.done(0) {
            driver.push_rhs_step();
        }
        false
    }
}
