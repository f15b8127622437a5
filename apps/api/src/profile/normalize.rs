//! Text normalization for extracted document text.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static HSPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]{2,}").unwrap());

/// Collapses line-ending and whitespace noise into canonical plain text.
///
/// Rules, in order: carriage returns become `\n`, runs of 3+ newlines collapse to 2,
/// runs of 2+ horizontal whitespace collapse to one space, then the result is trimmed.
/// Absent input yields an empty string.
pub fn normalize_text(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    let text = HSPACE_RUN_RE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(normalize_text(None), "");
        assert_eq!(normalize_text(Some("")), "");
        assert_eq!(normalize_text(Some(" \n\t ")), "");
    }

    #[test]
    fn test_line_endings_become_newlines() {
        assert_eq!(normalize_text(Some("a\r\nb\rc")), "a\nb\nc");
    }

    #[test]
    fn test_blank_runs_collapse_to_one_blank_line() {
        assert_eq!(normalize_text(Some("a\n\n\n\n\nb")), "a\n\nb");
        assert_eq!(normalize_text(Some("a\n\nb")), "a\n\nb");
    }

    #[test]
    fn test_horizontal_whitespace_collapses() {
        assert_eq!(
            normalize_text(Some("  Jane \t Doe\t\tEngineer  ")),
            "Jane Doe Engineer"
        );
    }

    #[test]
    fn test_normalizing_twice_is_identity() {
        let samples = [
            "Jane Doe\r\n\r\n\r\nSenior   Engineer\n\n\n\nSkills\tRust,  Go",
            "  \u{a0}\u{a0}Name\n \n \n \nX  ",
            "plain",
        ];
        for sample in samples {
            let once = normalize_text(Some(sample));
            assert_eq!(normalize_text(Some(&once)), once, "input: {sample:?}");
        }
    }
}
