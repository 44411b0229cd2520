//! Metadata entity types for the semantic layer.
//!
//! These are plain data structs describing the business metadata the
//! pipeline resolves against: models, datasources, dimensions, and metrics.
//! They are produced by the external administrative collaborator and arrive
//! as part of a [`crate::catalog::MetadataSnapshot`]; the pipeline never
//! mutates them.

mod dimension;
mod metric;
#[allow(clippy::module_inception)]
mod model;
mod types;
mod user;

pub use dimension::{DimValueMap, Dimension};
pub use metric::Metric;
pub use model::{Datasource, JoinType, JoinedDatasource, Model};
pub use types::{EntityRef, SensitivityLevel};
pub use user::UserContext;
