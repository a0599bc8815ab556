//! # Autocomplete Engine
//!
//! Suggests the next token for the line being edited. Only the last line of
//! the text is completed; earlier lines only matter for the fields they
//! consume. Nothing is remembered between calls, so the engine can run on
//! every keystroke.

use std::collections::HashSet;

use tracing::trace;

use crate::catalog;
use crate::compiler::rows;
use crate::filter::{Blacklist, Filter};
use crate::schema::Schema;

/// Suggestions for the last line of `text`, in catalog order.
///
/// - empty line: every available field
/// - a lone token that is not an available field: every available field
/// - an available field with fewer than three tokens: its constraints
/// - a started value: nothing, values are free text
///
/// Candidates are kept when they contain the fragment after the last space
/// (case-sensitive).
pub fn suggest(
    text: &str,
    schema: &Schema,
    filters_so_far: &[Filter],
    blacklist: &Blacklist,
) -> Vec<String> {
    let (earlier, current) = match text.rfind('\n') {
        Some(pos) => (&text[..pos], &text[pos + 1..]),
        None => ("", text),
    };
    let current = current.strip_suffix('\r').unwrap_or(current);

    let mut consumed: HashSet<&str> = filters_so_far.iter().map(|f| f.field.as_str()).collect();
    consumed.extend(
        rows(earlier)
            .filter_map(|row| row.text.split(' ').next())
            .filter(|field| schema.contains(field)),
    );
    let available = catalog::available_excluding(schema, &consumed, blacklist);

    let tokens: Vec<&str> = current.split(' ').collect();
    let candidates: Vec<&str> = match tokens.as_slice() {
        [field] | [field, _] if available.get(field).is_some() => available
            .get(field)
            .unwrap_or_default()
            .iter()
            .map(|kind| kind.as_str())
            .collect(),
        [_] => available.fields().collect(),
        _ => Vec::new(),
    };

    let fragment = tokens.last().copied().unwrap_or_default();
    let suggestions: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| fragment.is_empty() || candidate.contains(fragment))
        .map(str::to_string)
        .collect();

    trace!(
        line = current,
        suggestions = suggestions.len(),
        "autocomplete"
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CompareTo, ConstraintKind};
    use crate::schema::FieldType;

    fn schema() -> Schema {
        Schema::new()
            .with_field("name", FieldType::string())
            .with_field("nickname", FieldType::string())
            .with_field("age", FieldType::number())
            .with_field("verified", FieldType::boolean())
    }

    fn run(text: &str) -> Vec<String> {
        suggest(text, &schema(), &[], &Blacklist::empty())
    }

    #[test]
    fn test_empty_text_suggests_fields() {
        assert_eq!(run(""), vec!["name", "nickname", "age", "verified"]);
    }

    #[test]
    fn test_partial_field_filters_by_substring() {
        assert_eq!(run("nam"), vec!["name", "nickname"]);
        assert_eq!(run("ag"), vec!["age"]);
        assert!(run("zzz").is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(run("Name").is_empty());
    }

    #[test]
    fn test_known_field_then_space_suggests_constraints() {
        assert_eq!(run("verified "), vec!["exists", "doesNotExist", "equalTo"]);
    }

    #[test]
    fn test_constraint_fragment() {
        assert_eq!(
            run("age greater"),
            vec!["greaterThan", "greaterThanOrEqualTo"]
        );
        assert_eq!(run("age than"), Vec::<String>::new());
        assert_eq!(
            run("age Equal"),
            vec!["notEqualTo", "lessThanOrEqualTo", "greaterThanOrEqualTo"]
        );
    }

    #[test]
    fn test_value_position_is_free_text() {
        assert!(run("age greaterThan ").is_empty());
        assert!(run("age greaterThan 3").is_empty());
    }

    #[test]
    fn test_only_last_line_is_completed() {
        assert_eq!(run("name equalTo Alice\n"), vec!["nickname", "age", "verified"]);
        assert_eq!(
            run("name equalTo Alice\nverified "),
            vec!["exists", "doesNotExist", "equalTo"]
        );
    }

    #[test]
    fn test_field_consumed_by_earlier_line() {
        // "name" is used above, so it completes as a field prefix instead
        assert_eq!(run("name equalTo Alice\nname"), vec!["nickname"]);
        assert!(run("name equalTo Alice\nname ").is_empty());
    }

    #[test]
    fn test_prior_filters_consume_fields() {
        let prior = [Filter::new("age", ConstraintKind::LessThan, CompareTo::Number(3.0))];
        let suggestions = suggest("", &schema(), &prior, &Blacklist::empty());
        assert_eq!(suggestions, vec!["name", "nickname", "verified"]);
    }

    #[test]
    fn test_blacklist_hides_constraints() {
        let blacklist = Blacklist::empty().with(ConstraintKind::Exists);
        let suggestions = suggest("verified ", &schema(), &[], &blacklist);
        assert_eq!(suggestions, vec!["doesNotExist", "equalTo"]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let first = run("age ");
        for _ in 0..10 {
            assert_eq!(run("age "), first);
        }
    }
}
