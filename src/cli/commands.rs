//! CLI command implementations
//!
//! Every command loads the config, installs logging, takes a fresh schema
//! snapshot and runs one pure operation of the library. The operations are
//! split from stdin/stdout handling so they can be tested directly.

use serde_json::{json, Value};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::autocomplete;
use crate::catalog;
use crate::compiler;
use crate::filter::{Blacklist, FilterList};
use crate::schema::Schema;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_diagnostics, write_response, write_text};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a single command
pub fn run_command(command: Command) -> CliResult<()> {
    let config = Config::load(command.config_path())?;
    init_logging(&config.log_level);

    let schema = config.load_schema()?;
    let blacklist = config.blacklist()?;
    info!(
        schema = %config.schema_path.display(),
        fields = schema.len(),
        "configuration loaded"
    );

    match command {
        Command::Compile { .. } => {
            let text = read_input()?;
            match compile(&text, &schema, &blacklist) {
                Ok(data) => write_response(data),
                Err(err) => {
                    if let Some(diagnostics) = err.diagnostics() {
                        write_diagnostics(err.code_str(), diagnostics)?;
                    }
                    Err(err)
                }
            }
        }
        Command::Render { .. } => {
            let input = read_input()?;
            write_text(&render(&input, &schema, &blacklist)?)
        }
        Command::Suggest { .. } => {
            let text = read_input()?;
            write_response(suggest(&text, &schema, &blacklist))
        }
        Command::Catalog { .. } => write_response(catalog(&schema, &blacklist)?),
        Command::DefaultFilter { .. } => write_response(default_filter(&schema, &blacklist)),
    }
}

/// Installs a stderr subscriber; RUST_LOG wins over the configured level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Compile query text into the JSON filter list
pub fn compile(text: &str, schema: &Schema, blacklist: &Blacklist) -> CliResult<Value> {
    let filters = compiler::compile(text, schema, &[], blacklist).map_err(|diagnostics| {
        warn!(rows = diagnostics.len(), "query rejected");
        CliError::compile_failed(diagnostics)
    })?;

    Ok(serde_json::to_value(&filters)?)
}

/// Render a JSON filter list as query text.
///
/// The rendered text is compiled again and must give back the same filters,
/// so a list that names unknown fields, repeats a field, uses a blacklisted
/// or incompatible constraint, or holds a value its field cannot decode is
/// rejected.
pub fn render(input: &str, schema: &Schema, blacklist: &Blacklist) -> CliResult<String> {
    let filters: FilterList = serde_json::from_str(input)
        .map_err(|e| CliError::invalid_input(format!("Invalid filter list: {}", e)))?;

    let text = compiler::render(filters.as_slice());
    match compiler::compile(&text, schema, &[], blacklist) {
        Ok(compiled) if compiled == filters => Ok(text),
        Ok(_) => Err(CliError::invalid_input(
            "Filter list changes when its query text is compiled again",
        )),
        Err(diagnostics) => {
            let rows: Vec<String> = diagnostics.iter().map(|e| e.to_string()).collect();
            Err(CliError::invalid_input(format!(
                "Filter list does not render to a valid query: {}",
                rows.join("; ")
            )))
        }
    }
}

/// Suggestions for the last line of `text`
pub fn suggest(text: &str, schema: &Schema, blacklist: &Blacklist) -> Value {
    json!(autocomplete::suggest(text, schema, &[], blacklist))
}

/// Every available field with its constraints
pub fn catalog(schema: &Schema, blacklist: &Blacklist) -> CliResult<Value> {
    Ok(serde_json::to_value(catalog::available_filters(
        schema,
        &[],
        blacklist,
    ))?)
}

/// The row a new filter starts with, or null when nothing can be filtered
pub fn default_filter(schema: &Schema, blacklist: &Blacklist) -> Value {
    match catalog::default_filter(schema, &[], blacklist) {
        Some((field, constraint)) => json!({
            "field": field,
            "constraint": constraint,
        }),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use crate::schema::FieldType;

    fn schema() -> Schema {
        Schema::new()
            .with_field("name", FieldType::string())
            .with_field("age", FieldType::number())
            .with_field("owner", FieldType::pointer("_User"))
    }

    #[test]
    fn test_compile_success() {
        let data = compile(
            "name equalTo Alice\nowner equalTo u1",
            &schema(),
            &Blacklist::builtin(),
        )
        .unwrap();
        assert_eq!(
            data,
            json!([
                {"field": "name", "constraint": "equalTo", "compareTo": "Alice"},
                {"field": "owner", "constraint": "equalTo", "compareTo": {
                    "__type": "Pointer", "className": "_User", "objectId": "u1"
                }}
            ])
        );
    }

    #[test]
    fn test_compile_failure_carries_diagnostics() {
        let err = compile("age greaterThan abc\nname", &schema(), &Blacklist::builtin())
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::CompileFailed);
        let codes: Vec<&str> = err.diagnostics().unwrap().iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec!["FILTERQ_INVALID_COMPARE_TO", "FILTERQ_MALFORMED_ROW"]
        );
    }

    fn render_json(input: &str) -> CliResult<String> {
        render(input, &schema(), &Blacklist::builtin())
    }

    #[test]
    fn test_render_from_json() {
        let text =
            render_json(r#"[{"field": "age", "constraint": "lessThan", "compareTo": 18}]"#)
                .unwrap();
        assert_eq!(text, "age lessThan 18");
    }

    #[test]
    fn test_render_rejects_unknown_field() {
        let err = render_json(r#"[{"field": "email", "constraint": "equalTo", "compareTo": "x"}]"#)
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidInput);
        assert!(err.message().contains("FILTERQ_UNKNOWN_FIELD"));
    }

    #[test]
    fn test_render_rejects_incompatible_constraint() {
        let err =
            render_json(r#"[{"field": "name", "constraint": "lessThan", "compareTo": "x"}]"#)
                .unwrap_err();
        assert!(err.message().contains("FILTERQ_UNSUPPORTED_CONSTRAINT"));
    }

    #[test]
    fn test_render_rejects_value_the_field_cannot_decode() {
        let err = render_json(r#"[{"field": "age", "constraint": "equalTo", "compareTo": "abc"}]"#)
            .unwrap_err();
        assert!(err.message().contains("FILTERQ_INVALID_COMPARE_TO"));
    }

    #[test]
    fn test_render_rejects_line_break_in_value() {
        let err =
            render_json(r#"[{"field": "name", "constraint": "equalTo", "compareTo": "a\nb"}]"#)
                .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidInput);
    }

    #[test]
    fn test_render_rejects_repeated_field() {
        let err = render_json(
            r#"[
                {"field": "age", "constraint": "lessThan", "compareTo": 65},
                {"field": "age", "constraint": "greaterThan", "compareTo": 18}
            ]"#,
        )
        .unwrap_err();
        assert!(err.message().contains("FILTERQ_DUPLICATE_FIELD"));
    }

    #[test]
    fn test_render_rejects_value_of_another_type() {
        // 18 renders as "18", which compiles back to a string for `name`
        let err = render_json(r#"[{"field": "name", "constraint": "equalTo", "compareTo": 18}]"#)
            .unwrap_err();
        assert!(err.message().contains("compiled again"));
    }

    #[test]
    fn test_render_rejects_bad_json() {
        assert!(render_json("not json").is_err());
    }

    #[test]
    fn test_suggest() {
        assert_eq!(
            suggest("ow", &schema(), &Blacklist::builtin()),
            json!(["owner"])
        );
    }

    #[test]
    fn test_catalog() {
        let data = catalog(&schema(), &Blacklist::builtin()).unwrap();
        assert_eq!(
            data["owner"],
            json!(["exists", "doesNotExist", "equalTo", "notEqualTo"])
        );
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(
            default_filter(&schema(), &Blacklist::builtin()),
            json!({"field": "name", "constraint": "exists"})
        );
        assert_eq!(
            default_filter(&Schema::new(), &Blacklist::builtin()),
            Value::Null
        );
    }
}
