//! `rust-data-shaping` is a small library for dynamic field selection ("data shaping"): given a
//! collection of typed records and a caller-supplied, comma-separated list of field names, it
//! returns loosely-typed [`types::ShapedRecord`]s holding only the requested fields.
//!
//! The primary entrypoint is [`shaping::project`]. Record types opt in by implementing
//! [`shaping::Shape`], normally through `#[derive(Shape)]`.
//!
//! ## What a projection does
//!
//! - A blank field list (`None`, `""`, whitespace) selects every public field, in declaration
//!   order.
//! - Otherwise the list is split on `,`, each name is trimmed and matched case-insensitively
//!   against the record's fields. Output keys use the declared casing and follow the request
//!   order.
//! - The field list is resolved once per call. An unknown name fails the whole call with
//!   [`ShapeError::UnknownField`] before any record is shaped.
//! - Output has the same length and order as the input.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_data_shaping::{project, Shape};
//!
//! #[derive(Shape)]
//! #[shape(rename_all = "PascalCase")]
//! pub struct Author {
//!     pub id: u32,
//!     pub first_name: String,
//!     pub last_name: String,
//!     pub main_category: Option<String>,
//! }
//!
//! # fn main() -> Result<(), rust_data_shaping::ShapeError> {
//! let authors = vec![
//!     Author { id: 1, first_name: "Berry".into(), last_name: "Griffin".into(), main_category: None },
//!     Author { id: 2, first_name: "Nancy".into(), last_name: "Rye".into(), main_category: Some("Rum".into()) },
//! ];
//!
//! // `?fields=id, firstName` from a query string
//! let shaped = project(&authors, Some("id, firstName"))?;
//! let body = rust_data_shaping::output::to_json_string(&shaped)?;
//! assert_eq!(body, r#"[{"Id":1,"FirstName":"Berry"},{"Id":2,"FirstName":"Nancy"}]"#);
//!
//! // Unknown fields are rejected with the field and type named.
//! let err = project(&authors, Some("age")).unwrap_err();
//! assert!(err.is_client_error());
//! assert_eq!(err.to_string(), "field 'age' was not found on type 'Author'");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`shaping`]: the [`trait@Shape`] trait, field resolution and projection entrypoints
//! - [`types`]: [`types::Value`] and [`types::ShapedRecord`]
//! - [`output`]: JSON/NDJSON/CSV encoding of shaped records
//! - [`execution`]: parallel, chunked projection for large collections
//! - [`error`]: error types used across the crate

extern crate self as rust_data_shaping;

pub mod error;
pub mod execution;
pub mod output;
pub mod shaping;
pub mod types;

pub use error::{ShapeError, ShapeResult};
pub use rust_data_shaping_macros::Shape;
pub use shaping::{
    project, project_optional, project_with_options, DuplicateFields, FieldDescriptor, Projector,
    Shape, ShapeOptions,
};
pub use types::{ShapedRecord, ToValue, Value};
