//! Single-field pattern matching.

use regex::RegexBuilder;
use tracing::warn;

/// How the extracted value is selected from a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupPolicy {
    /// The entire matched span becomes the value, regardless of any
    /// capturing groups in the expression. Used for bulk extraction over
    /// arbitrary user rules.
    #[default]
    WholeMatch,
    /// The first non-empty capturing group, scanning group indices in
    /// ascending order. Tolerates expressions built from alternatives
    /// where only one group fires per match. An expression with no
    /// capturing groups selects nothing under this policy, even when the
    /// expression as a whole matches.
    FirstGroup,
}

/// Options for a single field search.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    pub policy: GroupPolicy,
    pub case_insensitive: bool,
}

impl MatchOptions {
    pub fn new(policy: GroupPolicy) -> Self {
        Self {
            policy,
            case_insensitive: false,
        }
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }
}

/// Search `text` for the first occurrence of `expression` and select a
/// value according to `options`.
///
/// Absence of a match is an ordinary outcome, not an error. An
/// expression that fails to compile is logged and treated as a miss for
/// this field only, so one bad rule can never abort a document or a
/// batch.
pub fn find_field(expression: &str, text: &str, options: MatchOptions) -> Option<String> {
    let regex = match RegexBuilder::new(expression)
        .case_insensitive(options.case_insensitive)
        .build()
    {
        Ok(regex) => regex,
        Err(err) => {
            warn!("skipping invalid expression {expression:?}: {err}");
            return None;
        }
    };

    let caps = regex.captures(text)?;
    match options.policy {
        GroupPolicy::WholeMatch => Some(caps[0].to_string()),
        GroupPolicy::FirstGroup => (1..caps.len()).find_map(|index| {
            caps.get(index)
                .map(|group| group.as_str())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whole() -> MatchOptions {
        MatchOptions::new(GroupPolicy::WholeMatch)
    }

    fn first_group() -> MatchOptions {
        MatchOptions::new(GroupPolicy::FirstGroup)
    }

    #[test]
    fn test_whole_match_returns_full_span() {
        let value = find_field(r"Toplam: \d+", "Ara Toplam: 100 TL", whole());
        assert_eq!(value.as_deref(), Some("Toplam: 100"));
    }

    #[test]
    fn test_whole_match_ignores_groups() {
        let value = find_field(r"No[:\s]+(\w+)", "No: ABC123", whole());
        assert_eq!(value.as_deref(), Some("No: ABC123"));
    }

    #[test]
    fn test_first_group_skips_unmatched_alternatives() {
        // Only the second alternative (group 2) fires.
        let value = find_field(
            r"(\d{2}\.\d{2}\.\d{4})|(\d{4}-\d{2}-\d{2})",
            "issued 2023-01-01",
            first_group(),
        );
        assert_eq!(value.as_deref(), Some("2023-01-01"));
    }

    #[test]
    fn test_first_group_skips_empty_groups() {
        // Group 1 participates but matches the empty string.
        let value = find_field(r"(x?)(\d+)", "42", first_group());
        assert_eq!(value.as_deref(), Some("42"));
    }

    #[test]
    fn test_first_group_without_capturing_groups_selects_nothing() {
        let value = find_field(r"\d+", "42", first_group());
        assert_eq!(value, None);
    }

    #[test]
    fn test_no_match_is_none() {
        assert_eq!(find_field(r"\d{10}", "no digits here", whole()), None);
        assert_eq!(find_field(r"(\d{10})", "no digits here", first_group()), None);
    }

    #[test]
    fn test_invalid_expression_degrades_to_none() {
        assert_eq!(find_field(r"([unclosed", "anything", whole()), None);
        assert_eq!(find_field(r"(?P<broken", "anything", first_group()), None);
    }

    #[test]
    fn test_case_sensitivity_is_an_option() {
        let text = "TOPLAM: 99";
        assert_eq!(find_field(r"Toplam", text, whole()), None);
        assert_eq!(
            find_field(r"Toplam", text, whole().case_insensitive(true)).as_deref(),
            Some("TOPLAM")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let value = find_field(r"(\d+)", "first 11 then 22", first_group());
        assert_eq!(value.as_deref(), Some("11"));
    }
}
