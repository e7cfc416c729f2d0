//! Dynamic field selection ("data shaping").
//!
//! Most callers should use [`project`] which:
//!
//! - parses a comma-separated field list (or selects every public field when it is blank)
//! - resolves it once against the record type's [`Shape`] implementation
//! - shapes every record into a [`crate::types::ShapedRecord`], preserving order
//!
//! Lower-level pieces are also available under:
//! - [`descriptor`]: the [`Shape`] trait and [`FieldDescriptor`]
//! - [`fields`]: field specification parsing
//! - [`observability`]: observer hooks for success/failure/alerts

pub mod descriptor;
pub mod fields;
pub mod observability;
pub mod project;

pub use descriptor::{FieldDescriptor, Shape};
pub use fields::FieldSpec;
pub use observability::{
    CompositeObserver, ShapeContext, ShapeObserver, ShapeSeverity, ShapeStats, TracingObserver,
};
pub use project::{
    project, project_optional, project_with_options, DuplicateFields, Projector, ShapeOptions,
};
