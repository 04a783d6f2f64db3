//! Placeholder token scanning.
//!
//! A placeholder is `#` followed by a category name: an ASCII letter or
//! underscore, then letters, digits or underscores (`#amount`, `#amount1`,
//! `#receiver_name`). Scanning is read-only; callers use it for
//! diagnostics and for checking model answers, never to rewrite text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex_lite::Regex;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[A-Za-z_][A-Za-z0-9_]*").expect("placeholder pattern is a valid regex")
});

/// All placeholder occurrences in `text`, in order, duplicates included.
pub fn find_all(text: &str) -> Vec<&str> {
    PLACEHOLDER.find_iter(text).map(|m| m.as_str()).collect()
}

/// The distinct placeholders appearing anywhere in `texts`.
pub fn distinct<'a, I>(texts: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .flat_map(|t| PLACEHOLDER.find_iter(t))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Placeholders in `answer` that are absent from `known`, deduplicated and
/// in first-occurrence order.
pub fn introduced(answer: &str, known: &BTreeSet<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    find_all(answer)
        .into_iter()
        .filter(|p| !known.contains(*p))
        .filter(|p| seen.insert(*p))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_tokens_in_order() {
        let found = find_all("Paid #amount to #receiver on #date");
        assert_eq!(found, vec!["#amount", "#receiver", "#date"]);
    }

    #[test]
    fn keeps_numeric_suffixes_and_duplicates() {
        let found = find_all("(#amount1 + #amount2), #amount1.");
        assert_eq!(found, vec!["#amount1", "#amount2", "#amount1"]);
    }

    #[test]
    fn ignores_hash_without_name() {
        assert!(find_all("item # 4, issue #42, C# rocks").is_empty());
    }

    #[test]
    fn distinct_across_messages() {
        let set = distinct(["Sent #amount1 for rent", "Sent #amount2 to #receiver"]);
        let expected: Vec<&str> = vec!["#amount1", "#amount2", "#receiver"];
        assert_eq!(set.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn introduced_reports_unknown_tokens_once() {
        let known = distinct(["Paid #amount to #receiver"]);
        let extra = introduced("#amount went to #payee, then #payee again", &known);
        assert_eq!(extra, vec!["#payee".to_string()]);
    }

    #[test]
    fn introduced_is_empty_when_answer_reuses_inputs() {
        let known = distinct(["Sent #amount1", "Sent #amount2"]);
        assert!(introduced("The total is (#amount1 + #amount2).", &known).is_empty());
    }
}
