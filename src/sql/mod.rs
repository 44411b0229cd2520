//! SQL binding and compilation.
//!
//! Two explicit stages replace ad-hoc string concatenation: the binder
//! resolves `${name}` placeholders into type-checked, escaped literals; the
//! compiler validates statement shape and wraps the result with the row
//! bound. Callers compile exactly once per logical request.

mod compiler;
mod error;
mod variable;

pub use compiler::{compile, render_resolved, ResolvedQuery, MAX_RESULT_ROWS};
pub use error::{BindError, CompileError};
pub use variable::{bind, SqlVariable, VariableType};
