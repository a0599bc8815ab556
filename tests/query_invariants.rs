//! Query Compiler Invariant Tests
//!
//! Properties that hold across the compiler, serializer, catalog and
//! autocomplete:
//! - Rendering a compiled list and compiling it again gives the same list
//! - Rendering is idempotent after one round trip
//! - A compiled list never names a field twice
//! - The catalog only shrinks as filters are added
//! - Any invalid row fails the whole compile

use filterq::autocomplete::suggest;
use filterq::catalog::{available_filters, default_filter};
use filterq::compiler::{compile, render, ErrorKind};
use filterq::filter::{Blacklist, CompareTo, ConstraintKind, Filter, FilterList};
use filterq::schema::{FieldType, Schema};
use std::collections::HashSet;

// =============================================================================
// Helper Functions
// =============================================================================

fn schema() -> Schema {
    Schema::new()
        .with_field("name", FieldType::string())
        .with_field("age", FieldType::number())
        .with_field("active", FieldType::boolean())
        .with_field("createdAt", FieldType::date())
        .with_field("owner", FieldType::pointer("User"))
}

fn compile_ok(text: &str) -> FilterList {
    compile(text, &schema(), &[], &Blacklist::builtin()).unwrap()
}

// =============================================================================
// Round Trip Tests
// =============================================================================

/// Compile, render, compile again: same filters.
#[test]
fn test_render_then_compile_is_identity() {
    let queries = [
        "name equalTo Alice Smith",
        "age greaterThanOrEqualTo 30.5",
        "createdAt before 2024-01-15",
        "owner notEqualTo xyz123",
        "active equalTo false",
        "name startsWith Al\nage lessThan 18\ncreatedAt after 2023-06-01T12:30:00Z",
    ];

    for query in queries {
        let first = compile_ok(query);
        let second = compile_ok(&render(first.as_slice()));
        assert_eq!(first, second, "round trip changed {:?}", query);
    }
}

/// One round trip normalizes the text; a second changes nothing.
#[test]
fn test_render_is_idempotent() {
    let text = "createdAt before Jan 15 2024\nage equalTo 030";
    let once = render(compile_ok(text).as_slice());
    let twice = render(compile_ok(&once).as_slice());

    assert_eq!(once, "createdAt before 2024-01-15T00:00:00.000Z\nage equalTo 30");
    assert_eq!(once, twice);
}

/// Dates keep millisecond precision, the precision they render with.
#[test]
fn test_sub_millisecond_date_round_trip() {
    let first = compile_ok("createdAt before 2024-01-05T12:00:00.123456Z");
    let text = render(first.as_slice());
    assert_eq!(text, "createdAt before 2024-01-05T12:00:00.123Z");
    assert_eq!(compile_ok(&text), first);
}

/// A value with a line break would render as two rows.
#[test]
fn test_line_break_in_value_rejected() {
    let filters = vec![Filter::new(
        "name",
        ConstraintKind::EqualTo,
        CompareTo::String("a\nb".to_string()),
    )];
    assert!(compile(&render(&filters), &schema(), &[], &Blacklist::builtin()).is_err());

    let diagnostics = compile("name equalTo a\rb", &schema(), &[], &Blacklist::builtin())
        .unwrap_err();
    assert_eq!(diagnostics.as_slice()[0].code(), "FILTERQ_INVALID_COMPARE_TO");
}

#[test]
fn test_empty_text_and_empty_list() {
    assert!(compile_ok("").is_empty());
    assert!(compile_ok("\n\n").is_empty());
    assert_eq!(render(&[]), "");
}

#[test]
fn test_pointer_compiles_to_target_class_reference() {
    let filters = compile_ok("owner equalTo xyz123");
    assert_eq!(
        filters.get(0).map(|f| &f.compare_to),
        Some(&CompareTo::pointer("User", "xyz123"))
    );
}

// =============================================================================
// Field Exclusivity Tests
// =============================================================================

#[test]
fn test_compiled_fields_are_unique() {
    let filters = compile_ok("name exists x\nage exists 1\nowner exists y");
    let fields: Vec<&str> = filters.fields().collect();
    let unique: HashSet<&str> = fields.iter().copied().collect();
    assert_eq!(fields.len(), unique.len());
}

#[test]
fn test_repeated_field_rejected() {
    let diagnostics = compile(
        "age greaterThan 18\nage lessThan 65",
        &schema(),
        &[],
        &Blacklist::builtin(),
    )
    .unwrap_err();

    assert_eq!(diagnostics.len(), 1);
    let error = &diagnostics.as_slice()[0];
    assert_eq!(error.row, 1);
    assert_eq!(error.line, 2);
    assert!(matches!(
        error.kind,
        ErrorKind::DuplicateField { first_row: 0, .. }
    ));
}

#[test]
fn test_field_taken_by_earlier_filters() {
    let prior = vec![Filter::new("name", ConstraintKind::Exists, CompareTo::Bool(true))];
    let diagnostics = compile(
        "name equalTo Bob",
        &schema(),
        &prior,
        &Blacklist::builtin(),
    )
    .unwrap_err();

    match &diagnostics.as_slice()[0].kind {
        ErrorKind::UnsupportedConstraint { available, .. } => assert!(available.is_empty()),
        other => panic!("unexpected diagnostic: {:?}", other),
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

/// Adding filters never makes a new field or constraint available.
#[test]
fn test_catalog_is_monotone() {
    let blacklist = Blacklist::builtin();
    let filters = compile_ok("name equalTo Alice\nage lessThan 40\nowner exists u1");

    let mut previous = available_filters(&schema(), &[], &blacklist);
    for len in 1..=filters.len() {
        let current = available_filters(&schema(), &filters.as_slice()[..len], &blacklist);
        for (field, kinds) in current.iter() {
            let before = previous.get(field).unwrap();
            assert!(kinds.iter().all(|k| before.contains(k)));
        }
        assert!(current.len() < previous.len());
        previous = current;
    }
}

#[test]
fn test_default_filter_moves_past_used_fields() {
    let blacklist = Blacklist::builtin();
    assert_eq!(
        default_filter(&schema(), &[], &blacklist),
        Some(("name".to_string(), ConstraintKind::Exists))
    );

    let used = compile_ok("name exists x\nage exists 1");
    assert_eq!(
        default_filter(&schema(), used.as_slice(), &blacklist),
        Some(("active".to_string(), ConstraintKind::Exists))
    );
}

#[test]
fn test_blacklisted_constraint_never_offered() {
    let blacklist = Blacklist::builtin().with(ConstraintKind::StartsWith);
    let catalog = available_filters(&schema(), &[], &blacklist);
    assert!(!catalog.allows("name", ConstraintKind::StartsWith));

    let diagnostics = compile("name startsWith Al", &schema(), &[], &blacklist).unwrap_err();
    assert_eq!(diagnostics.as_slice()[0].code(), "FILTERQ_UNSUPPORTED_CONSTRAINT");
}

// =============================================================================
// Whole-Compile Failure Tests
// =============================================================================

#[test]
fn test_one_bad_row_fails_everything() {
    let result = compile(
        "name equalTo Alice\nage greaterThan abc\nowner equalTo u1",
        &schema(),
        &[],
        &Blacklist::builtin(),
    );
    let diagnostics = result.unwrap_err();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.as_slice()[0].row, 1);
}

#[test]
fn test_every_bad_row_reported() {
    let diagnostics = compile(
        "email equalTo x\nname\nage greaterThan abc\nname lessThan b",
        &schema(),
        &[],
        &Blacklist::builtin(),
    )
    .unwrap_err();

    let codes: Vec<&str> = diagnostics.iter().map(|e| e.code()).collect();
    assert_eq!(
        codes,
        vec![
            "FILTERQ_UNKNOWN_FIELD",
            "FILTERQ_MALFORMED_ROW",
            "FILTERQ_INVALID_COMPARE_TO",
            "FILTERQ_UNSUPPORTED_CONSTRAINT",
        ]
    );
}

// =============================================================================
// Autocomplete Tests
// =============================================================================

#[test]
fn test_suggestions_skip_fields_already_in_query() {
    let suggestions = suggest(
        "name equalTo Alice\n",
        &schema(),
        &[],
        &Blacklist::builtin(),
    );
    assert_eq!(suggestions, vec!["age", "active", "createdAt", "owner"]);
}

#[test]
fn test_suggestions_for_constraint_position() {
    let suggestions = suggest("createdAt ", &schema(), &[], &Blacklist::builtin());
    assert_eq!(suggestions, vec!["exists", "doesNotExist", "before", "after"]);
}

#[test]
fn test_no_suggestions_for_values() {
    assert!(suggest("name equalTo Al", &schema(), &[], &Blacklist::builtin()).is_empty());
}
