//! Top-level entry point: chooses an algorithm and drives it over two
//! artefacts.

use crate::artefact::Artefact;
use crate::differ::{direct, unified};
use crate::error::DiffResult;
use crate::format;
use crate::options::{Algorithm, DiffOptions};
use crate::side_data::SideData;

/// Computes the diff between `lhs` and `rhs` under `options`. Returns an
/// empty string both when the two artefacts' raw data are byte-identical
/// and when every hunk the differ would otherwise emit gets suppressed by
/// an ignore policy.
pub fn file_diff(lhs: &Artefact, rhs: &Artefact, options: &DiffOptions) -> DiffResult<String> {
    if lhs.data == rhs.data {
        return Ok(String::new());
    }

    let mut lhs_side = SideData::new(&lhs.data, options, options.regex_replace_lhs.as_ref());
    let mut rhs_side = SideData::new(&rhs.data, options, options.regex_replace_rhs.as_ref());

    let body = match options.algorithm {
        Algorithm::Unified => unified::compute(&mut lhs_side, &mut rhs_side, options),
        Algorithm::Direct => direct::compute(&mut lhs_side, &mut rhs_side, options),
    };

    if body.is_empty() {
        return Ok(String::new());
    }

    let headers = format::file_headers(lhs, rhs, options);
    Ok(format!("{headers}{body}"))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn artefact(name: &str, data: &str) -> Artefact {
        Artefact {
            data: data.to_string(),
            name: name.to_string(),
            mtime: Utc.timestamp_opt(0, 0).unwrap(),
            tz: FixedOffset::east_opt(0).unwrap(),
        }
    }

    #[test]
    fn identical_data_yields_empty_diff() {
        let options = DiffOptions::default();
        let lhs = artefact("lhs", "same\n");
        let rhs = artefact("rhs", "same\n");
        assert_eq!(file_diff(&lhs, &rhs, &options).unwrap(), "");
    }

    #[test]
    fn empty_inputs_yield_empty_diff() {
        let options = DiffOptions::default();
        let lhs = artefact("lhs", "");
        let rhs = artefact("rhs", "");
        assert_eq!(file_diff(&lhs, &rhs, &options).unwrap(), "");
    }

    #[test]
    fn pure_deletion_e1() {
        let options = DiffOptions::default();
        let lhs = artefact("lhs", "a\nl\nb\n");
        let rhs = artefact("rhs", "a\nb\n");
        let expected = "--- lhs 1970-01-01 00:00:00.000 +0000\n\
                         +++ rhs 1970-01-01 00:00:00.000 +0000\n\
                         @@ -1,3 +1,2 @@\n a\n-l\n b\n";
        assert_eq!(file_diff(&lhs, &rhs, &options).unwrap(), expected);
    }

    #[test]
    fn pure_insertion_e2() {
        let options = DiffOptions::default();
        let lhs = artefact("lhs", "a\nb\n");
        let rhs = artefact("rhs", "a\nr\nb\n");
        let expected = "--- lhs 1970-01-01 00:00:00.000 +0000\n\
                         +++ rhs 1970-01-01 00:00:00.000 +0000\n\
                         @@ -1,2 +1,3 @@\n a\n+r\n b\n";
        assert_eq!(file_diff(&lhs, &rhs, &options).unwrap(), expected);
    }

    #[test]
    fn trailing_newline_asymmetry_e3() {
        let options = DiffOptions::default();
        let lhs = artefact("lhs", "l\n");
        let rhs = artefact("rhs", "r");
        let expected = "--- lhs 1970-01-01 00:00:00.000 +0000\n\
                         +++ rhs 1970-01-01 00:00:00.000 +0000\n\
                         @@ -1 +1 @@\n-l\n+r\n\\ No newline at end of file\n";
        assert_eq!(file_diff(&lhs, &rhs, &options).unwrap(), expected);
    }

    #[test]
    fn context_zero_splits_hunks_e4() {
        let mut options = DiffOptions::default();
        options.context_size = 0;
        let lhs = artefact("lhs", "1\n2\n3\n4\n5\n6\n7\n8\n9\na\nc\n0\n");
        let rhs = artefact("rhs", "1\n2\n3\n4\na\nb\n7\n8\n9\n0\n");
        let output = file_diff(&lhs, &rhs, &options).unwrap();
        assert!(output.contains("@@ -5,2 +5,2 @@\n-5\n-6\n+a\n+b\n"));
        assert!(output.contains("@@ -10,2 +10,0 @@\n-a\n-c\n"));
    }

    #[test]
    fn regex_replace_equalizes_e5() {
        use crate::options::RegexReplace;
        let mut options = DiffOptions::default();
        options.regex_replace_lhs = Some(RegexReplace::new("ERROR.*", "").unwrap());
        options.regex_replace_rhs = Some(RegexReplace::new("ERROR.*", "").unwrap());
        let lhs = artefact("lhs", "bar ERROR 1\n");
        let rhs = artefact("rhs", "bar ERROR 2\n");
        assert_eq!(file_diff(&lhs, &rhs, &options).unwrap(), "");
    }

    #[test]
    fn skip_left_deletions_e6() {
        let mut options = DiffOptions::default();
        options.skip_left_deletions = true;
        let lhs = artefact("lhs", "a\nextra\nb\n");
        let rhs = artefact("rhs", "a\nb\nc\n");
        let output = file_diff(&lhs, &rhs, &options).unwrap();
        assert!(!output.lines().any(|l| l.starts_with('-')));
        assert!(output.contains("+c"));
    }

    #[test]
    fn direct_algorithm_forces_no_headers_by_default_config() {
        let mut options = DiffOptions::default();
        options.algorithm = Algorithm::Direct;
        options.context_size = 0;
        options.show_chunk_headers = false;
        let lhs = artefact("lhs", "a\nb\n");
        let rhs = artefact("rhs", "a\nx\n");
        let output = file_diff(&lhs, &rhs, &options).unwrap();
        assert!(!output.contains("@@"));
        assert!(output.contains("-b"));
        assert!(output.contains("+x"));
    }
}
