//! Statement-shape validation and row-bound wrapping.

use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

use super::error::CompileError;
use crate::catalog::CatalogIndex;
use crate::error::QueryError;
use crate::model::JoinType;

/// Hard ceiling on rows any compiled statement can return. The wrapper is
/// the sole authority on the row bound; an embedded LIMIT cannot raise it.
pub const MAX_RESULT_ROWS: usize = 1000;

/// Compile raw or pre-bound SQL into its executable form.
///
/// Rules, in order: reject blank input, strip at most one trailing
/// terminator, reject a remaining top-level statement separator, then wrap
/// as `SELECT * FROM ( ... ) a LIMIT 1000`.
///
/// The wrap is idempotent on the row bound (re-wrapping still caps at 1000)
/// but not on the text, so callers compile exactly once per logical request.
pub fn compile(sql: &str) -> Result<String, CompileError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(CompileError::BlankStatement);
    }

    let stripped = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    if stripped.is_empty() {
        return Err(CompileError::BlankStatement);
    }

    if contains_statement_separator(stripped) {
        return Err(CompileError::MultiStatementRejected);
    }

    Ok(format!(" SELECT * FROM ( {stripped} ) a LIMIT {MAX_RESULT_ROWS} "))
}

/// Detect a top-level `;` after the trailing terminator was stripped.
///
/// Tokenizes so separators inside string literals or comments do not count.
/// If the input does not tokenize at all, falls back to a quote-aware scan
/// rather than letting malformed input through unchecked.
fn contains_statement_separator(sql: &str) -> bool {
    let dialect = GenericDialect {};
    match Tokenizer::new(&dialect, sql).tokenize() {
        Ok(tokens) => tokens.iter().any(|t| matches!(t, Token::SemiColon)),
        Err(_) => naive_separator_scan(sql),
    }
}

fn naive_separator_scan(sql: &str) -> bool {
    let mut in_single = false;
    let mut in_double = false;
    for c in sql.chars() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            ';' if !in_single && !in_double => return true,
            _ => {}
        }
    }
    false
}

/// A semantic query resolved by search: the model plus the dimension columns
/// and metric expressions to project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedQuery {
    pub model_id: u64,
    /// Dimension column names to project and group by.
    pub dimensions: Vec<String>,
    /// `(output name, aggregation expression)` pairs.
    pub metrics: Vec<(String, String)>,
}

/// Render a resolved semantic query as a SELECT over the model's
/// datasources. The output still goes through [`compile`] before execution.
pub fn render_resolved(index: &CatalogIndex, query: &ResolvedQuery) -> Result<String, QueryError> {
    let model = index.get_model(query.model_id)?;

    let mut select: Vec<String> = query.dimensions.clone();
    for (name, expr) in &query.metrics {
        select.push(format!("{expr} AS {name}"));
    }
    if select.is_empty() {
        select.push("*".to_string());
    }

    let mut sql = format!(
        "SELECT {} FROM {}",
        select.join(", "),
        model.primary_datasource.table_ref
    );
    for joined in &model.joined_datasources {
        let keyword = match joined.join_type {
            JoinType::Inner => "JOIN",
            JoinType::Left => "LEFT JOIN",
        };
        sql.push_str(&format!(
            " {} {} ON {}.{} = {}.{}",
            keyword,
            joined.datasource.table_ref,
            model.primary_datasource.table_ref,
            joined.left_key,
            joined.datasource.table_ref,
            joined.right_key,
        ));
    }
    if !query.metrics.is_empty() && !query.dimensions.is_empty() {
        sql.push_str(&format!(" GROUP BY {}", query.dimensions.join(", ")));
    }

    Ok(sql)
}
