use pretty_assertions::assert_eq;
use serde_json::json;

use semql::sql::{bind, BindError, SqlVariable, VariableType};

#[test]
fn unbound_variable_without_default_fails() {
    let err = bind("SELECT * FROM t WHERE region = ${region}", &[]).unwrap_err();
    assert_eq!(err, BindError::UnboundVariable("region".to_string()));
}

#[test]
fn declared_variable_without_value_or_default_fails() {
    let vars = vec![SqlVariable::new("region", VariableType::Text)];
    let err = bind("SELECT * FROM t WHERE region = ${region}", &vars).unwrap_err();
    assert_eq!(err, BindError::UnboundVariable("region".to_string()));
}

#[test]
fn supplied_text_value_binds_quoted() {
    let vars = vec![SqlVariable::new("region", VariableType::Text).with_value(json!("US"))];
    let bound = bind("SELECT * FROM t WHERE region = ${region}", &vars).unwrap();
    assert_eq!(bound, "SELECT * FROM t WHERE region = 'US'");
}

#[test]
fn default_is_used_when_no_value_is_supplied() {
    let vars = vec![SqlVariable::new("region", VariableType::Text).with_default(json!("EMEA"))];
    let bound = bind("SELECT * FROM t WHERE region = ${region}", &vars).unwrap();
    assert_eq!(bound, "SELECT * FROM t WHERE region = 'EMEA'");
}

#[test]
fn supplied_value_wins_over_default() {
    let vars = vec![SqlVariable::new("region", VariableType::Text)
        .with_default(json!("EMEA"))
        .with_value(json!("APAC"))];
    let bound = bind("${region}", &vars).unwrap();
    assert_eq!(bound, "'APAC'");
}

#[test]
fn number_binds_unquoted_and_rejects_non_numeric() {
    let vars = vec![SqlVariable::new("days", VariableType::Number).with_value(json!(30))];
    assert_eq!(bind("INTERVAL ${days}", &vars).unwrap(), "INTERVAL 30");

    let vars = vec![SqlVariable::new("days", VariableType::Number).with_value(json!("thirty"))];
    let err = bind("INTERVAL ${days}", &vars).unwrap_err();
    assert!(matches!(err, BindError::TypeMismatch { .. }));
}

#[test]
fn numeric_string_is_coerced() {
    let vars = vec![SqlVariable::new("days", VariableType::Number).with_value(json!("30"))];
    assert_eq!(bind("INTERVAL ${days}", &vars).unwrap(), "INTERVAL 30");
}

#[test]
fn date_shape_is_validated() {
    let vars = vec![SqlVariable::new("day", VariableType::Date).with_value(json!("2024-01-31"))];
    assert_eq!(bind("WHERE d = ${day}", &vars).unwrap(), "WHERE d = '2024-01-31'");

    let vars = vec![SqlVariable::new("day", VariableType::Date).with_value(json!("Jan 31"))];
    let err = bind("WHERE d = ${day}", &vars).unwrap_err();
    assert!(matches!(err, BindError::TypeMismatch { .. }));
}

#[test]
fn set_renders_as_parenthesized_list() {
    let vars = vec![SqlVariable::new("regions", VariableType::Set).with_value(json!(["US", "CA"]))];
    let bound = bind("WHERE region IN ${regions}", &vars).unwrap();
    assert_eq!(bound, "WHERE region IN ('US', 'CA')");
}

#[test]
fn empty_set_is_a_type_mismatch() {
    let vars = vec![SqlVariable::new("regions", VariableType::Set).with_value(json!([]))];
    let err = bind("WHERE region IN ${regions}", &vars).unwrap_err();
    assert!(matches!(err, BindError::TypeMismatch { .. }));
}

#[test]
fn template_without_placeholders_passes_through() {
    let sql = "SELECT 1";
    assert_eq!(bind(sql, &[]).unwrap(), sql);
}

#[test]
fn string_values_are_escaped_not_concatenated() {
    let vars = vec![SqlVariable::new("name", VariableType::Text)
        .with_value(json!("x'; DELETE FROM t; --"))];
    let bound = bind("WHERE name = ${name}", &vars).unwrap();
    assert_eq!(bound, "WHERE name = 'x''; DELETE FROM t; --'");
}

#[test]
fn repeated_placeholder_binds_every_occurrence() {
    let vars = vec![SqlVariable::new("r", VariableType::Text).with_value(json!("US"))];
    let bound = bind("${r} = ${r}", &vars).unwrap();
    assert_eq!(bound, "'US' = 'US'");
}
