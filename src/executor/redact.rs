//! Sensitivity-based post-filtering of result sets.
//!
//! Search already drops entities the caller cannot see, but raw SQL can
//! reference any column of the model's datasources. This filter masks the
//! values of columns whose owning dimension or metric sits above the
//! caller's clearance.

use crate::catalog::CatalogIndex;
use crate::executor::result::{RowSet, Value};
use crate::model::UserContext;

/// Replacement for masked cell values.
pub const MASK: &str = "******";

/// Mask columns of `rows` the user is not cleared for. Returns how many
/// columns were masked.
pub fn redact(index: &CatalogIndex, model_id: u64, user: &UserContext, rows: &mut RowSet) -> usize {
    let mut masked_columns = Vec::new();
    for (i, column) in rows.columns.iter().enumerate() {
        if let Some(level) = index.column_sensitivity(model_id, &column.name) {
            if !user.can_view(level) {
                masked_columns.push(i);
            }
        }
    }

    for row in &mut rows.rows {
        for &i in &masked_columns {
            if let Some(cell) = row.get_mut(i) {
                *cell = Value::text(MASK);
            }
        }
    }

    if !masked_columns.is_empty() {
        tracing::debug!(
            model_id,
            user = %user.name,
            columns = masked_columns.len(),
            "masked sensitive columns in result set"
        );
    }
    masked_columns.len()
}
