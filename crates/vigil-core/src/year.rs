//! Best-effort publication year extraction from free-text dates.
//!
//! Literature APIs report dates as `"2021 Mar 4"`, `"2019-2021"`,
//! `"Winter 2018"`, `"2020 Jan-Feb"` and worse. The extractor looks for the
//! first four-digit run starting with `19` or `20` and never guesses further.

use std::sync::LazyLock;

use regex::Regex;

// ASCII digits only: `\d` would also match non-Latin numerals.
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:19|20)[0-9]{2}").expect("year pattern is a valid regex"));

/// Extract the first `19xx`/`20xx` run from `text`, scanning left to right.
///
/// Returns `None` when no such run exists. Matching is not anchored to word
/// boundaries, so `"ID12019"` yields `2019`.
///
/// ```
/// use vigil_core::extract_year;
///
/// assert_eq!(extract_year("Published 2019-2021 update"), Some(2019));
/// assert_eq!(extract_year("n.d."), None);
/// ```
#[must_use]
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

/// Whether an already-numeric year falls in the range the extractor can produce.
#[must_use]
pub fn is_plausible_year(year: i64) -> bool {
    (1900..=2099).contains(&year)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2021 Mar 4", Some(2021))]
    #[case("Published 2019-2021 update", Some(2019))]
    #[case("1999 Winter", Some(1999))]
    #[case("Spring 2008", Some(2008))]
    #[case("ID12019", Some(2019))]
    #[case("1850 reprint", None)]
    #[case("2120", None)]
    #[case("", None)]
    #[case("n.d.", None)]
    #[case("٢٠٢٠", None)]
    fn extracts_first_plausible_year(#[case] text: &str, #[case] expected: Option<i32>) {
        assert_eq!(extract_year(text), expected);
    }

    #[test]
    fn first_match_wins_over_latest() {
        assert_eq!(extract_year("2023; revised 2019"), Some(2023));
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "Epub 2020 Dec 1; 2021 Jan";
        assert_eq!(extract_year(text), extract_year(text));
    }

    #[test]
    fn plausible_year_bounds() {
        assert!(is_plausible_year(1900));
        assert!(is_plausible_year(2099));
        assert!(!is_plausible_year(1899));
        assert!(!is_plausible_year(2100));
    }
}
