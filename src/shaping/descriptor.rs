//! Field descriptors and the [`Shape`] introspection trait.

use std::fmt;

use crate::types::Value;

/// A resolved `(name, accessor)` pair for one readable field of `T`.
///
/// Descriptors are resolved once per projection and then applied to every record.
pub struct FieldDescriptor<T> {
    name: &'static str,
    accessor: fn(&T) -> Value,
}

impl<T> FieldDescriptor<T> {
    /// Create a descriptor from the field's exposed name and an accessor.
    pub const fn new(name: &'static str, accessor: fn(&T) -> Value) -> Self {
        Self { name, accessor }
    }

    /// Exposed field name, in the casing declared on the type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read this field's current value off `record`.
    pub fn read(&self, record: &T) -> Value {
        (self.accessor)(record)
    }

    /// Case-insensitive comparison of the exposed name against `candidate`.
    pub fn matches(&self, candidate: &str) -> bool {
        eq_ignore_case(self.name, candidate)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Type introspection for shapeable records.
///
/// Usually implemented with `#[derive(Shape)]`, which lists the public fields in declaration
/// order. Hand-written implementations must keep exposed names unique.
///
/// ```rust
/// use rust_data_shaping::{FieldDescriptor, Shape, ToValue, Value};
///
/// struct Course {
///     id: u32,
///     title: String,
/// }
///
/// impl Shape for Course {
///     fn field_descriptors() -> Vec<FieldDescriptor<Self>> {
///         vec![
///             FieldDescriptor::new("Id", |c: &Self| c.id.to_value()),
///             FieldDescriptor::new("Title", |c: &Self| c.title.to_value()),
///         ]
///     }
/// }
///
/// let course = Course { id: 7, title: "Rust".to_string() };
/// assert_eq!(Course::field_names(), vec!["Id", "Title"]);
/// assert_eq!(course.field_value("title"), Some(Value::Utf8("Rust".to_string())));
/// ```
pub trait Shape: Sized {
    /// All public fields, in declaration order.
    fn field_descriptors() -> Vec<FieldDescriptor<Self>>;

    /// Type name used in error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Look up a field by name, ignoring case.
    fn find_descriptor(name: &str) -> Option<FieldDescriptor<Self>> {
        Self::field_descriptors()
            .into_iter()
            .find(|descriptor| descriptor.matches(name))
    }

    /// Exposed field names in declaration order.
    fn field_names() -> Vec<&'static str> {
        Self::field_descriptors()
            .iter()
            .map(FieldDescriptor::name)
            .collect()
    }

    /// Current value of the field named `name` (case-insensitive), if it exists.
    fn field_value(&self, name: &str) -> Option<Value> {
        Self::find_descriptor(name).map(|descriptor| descriptor.read(self))
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
