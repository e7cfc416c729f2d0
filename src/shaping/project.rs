//! Field projection entry points.
//!
//! Most callers should use [`project`]. [`project_with_options`] adds duplicate-field policy,
//! observer hooks and alerting, and accepts an absent source. [`Projector`] exposes the resolved
//! field list directly for reuse or lazy shaping.
//!
//! In every entry point the field list is resolved exactly once, before the first record is
//! touched, so resolution errors abort the call without producing partial output.

use std::fmt;
use std::sync::Arc;

use crate::error::{ShapeError, ShapeResult};
use crate::types::ShapedRecord;

use super::descriptor::{FieldDescriptor, Shape};
use super::fields::FieldSpec;
use super::observability::{ShapeContext, ShapeObserver, ShapeSeverity, ShapeStats};

/// What to do when the same field is requested more than once (e.g. `"id,Id"`).
///
/// Duplicates are detected on the resolved field name, so differently-cased requests for the
/// same field count as duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateFields {
    /// Emit the field once per request, in request order (default).
    #[default]
    Keep,
    /// Emit the field once, at the position of its first request.
    Collapse,
    /// Fail with [`ShapeError::DuplicateField`].
    Reject,
}

/// Options controlling a shaping call.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ShapeOptions {
    /// Policy for repeated field names.
    pub duplicates: DuplicateFields,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ShapeObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ShapeSeverity,
}

impl fmt::Debug for ShapeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeOptions")
            .field("duplicates", &self.duplicates)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            duplicates: DuplicateFields::default(),
            observer: None,
            alert_at_or_above: ShapeSeverity::Critical,
        }
    }
}

/// A resolved field list for record type `T`.
pub struct Projector<T> {
    descriptors: Vec<FieldDescriptor<T>>,
}

impl<T: Shape> Projector<T> {
    /// Resolve `fields` against `T` with the default duplicate policy.
    pub fn new(fields: Option<&str>) -> ShapeResult<Self> {
        Self::with_duplicates(fields, DuplicateFields::default())
    }

    /// Resolve `fields` against `T`.
    ///
    /// Fails with [`ShapeError::UnknownField`] for the first name that matches no field of `T`
    /// (case-insensitive), or with [`ShapeError::DuplicateField`] under
    /// [`DuplicateFields::Reject`].
    pub fn with_duplicates(fields: Option<&str>, duplicates: DuplicateFields) -> ShapeResult<Self> {
        let available = T::field_descriptors();

        let names = match FieldSpec::parse(fields) {
            FieldSpec::All => return Ok(Self { descriptors: available }),
            FieldSpec::Named(names) => names,
        };

        let mut descriptors: Vec<FieldDescriptor<T>> = Vec::with_capacity(names.len());
        for name in names {
            let Some(descriptor) = available.iter().find(|d| d.matches(&name)).copied() else {
                return Err(ShapeError::UnknownField {
                    field: name,
                    type_name: T::type_name().to_owned(),
                });
            };

            let seen = descriptors.iter().any(|d| d.name() == descriptor.name());
            match (seen, duplicates) {
                (true, DuplicateFields::Collapse) => continue,
                (true, DuplicateFields::Reject) => {
                    return Err(ShapeError::DuplicateField {
                        field: name,
                        type_name: T::type_name().to_owned(),
                    });
                }
                _ => descriptors.push(descriptor),
            }
        }

        Ok(Self { descriptors })
    }
}

impl<T> Projector<T> {
    /// Resolved field names, in output order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(FieldDescriptor::name)
    }

    /// Number of resolved fields per shaped record.
    pub fn field_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Shape a single record.
    pub fn shape(&self, record: &T) -> ShapedRecord {
        let mut shaped = ShapedRecord::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            shaped.insert(descriptor.name(), descriptor.read(record));
        }
        shaped
    }

    /// Lazily shape every record of `source`, preserving order.
    pub fn shape_iter<'a, I>(&'a self, source: I) -> impl Iterator<Item = ShapedRecord> + 'a
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
        T: 'a,
    {
        source.into_iter().map(move |record| self.shape(record))
    }

    /// Shape every record of `source` into a new vector.
    pub fn project<'a, I>(&self, source: I) -> Vec<ShapedRecord>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        source.into_iter().map(|record| self.shape(record)).collect()
    }
}

impl<T> fmt::Debug for Projector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projector")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Shape `source` down to the fields named in `fields`.
///
/// `fields` is a comma-separated list matched case-insensitively against `T`'s fields; `None`,
/// `""` or whitespace selects every public field in declaration order. Keys in the output use
/// the declared casing.
///
/// ```rust
/// use rust_data_shaping::{project, Shape, Value};
///
/// #[derive(Shape)]
/// #[shape(rename_all = "PascalCase")]
/// pub struct Course {
///     pub id: i64,
///     pub title: String,
/// }
///
/// let courses = vec![
///     Course { id: 1, title: "A".to_string() },
///     Course { id: 2, title: "B".to_string() },
/// ];
///
/// let shaped = project(&courses, Some("title")).unwrap();
/// assert_eq!(shaped.len(), 2);
/// assert_eq!(shaped[0].keys().collect::<Vec<_>>(), vec!["Title"]);
/// assert_eq!(shaped[1].get("Title"), Some(&Value::Utf8("B".to_string())));
/// ```
pub fn project<'a, T, I>(source: I, fields: Option<&str>) -> ShapeResult<Vec<ShapedRecord>>
where
    T: Shape + 'a,
    I: IntoIterator<Item = &'a T>,
{
    project_with_options(Some(source), fields, &ShapeOptions::default())
}

/// Like [`project`], for callers whose source may be absent.
///
/// Returns [`ShapeError::MissingSource`] when `source` is `None`.
pub fn project_optional<'a, T, I>(
    source: Option<I>,
    fields: Option<&str>,
) -> ShapeResult<Vec<ShapedRecord>>
where
    T: Shape + 'a,
    I: IntoIterator<Item = &'a T>,
{
    project_with_options(source, fields, &ShapeOptions::default())
}

/// Shaping entry point with options.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with record and field counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// The source is checked before the field list is resolved, and the field list is resolved
/// before any record is shaped.
pub fn project_with_options<'a, T, I>(
    source: Option<I>,
    fields: Option<&str>,
    options: &ShapeOptions,
) -> ShapeResult<Vec<ShapedRecord>>
where
    T: Shape + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let result = source
        .ok_or(ShapeError::MissingSource)
        .and_then(|source| {
            let projector = Projector::<T>::with_duplicates(fields, options.duplicates)?;
            tracing::debug!(
                type_name = T::type_name(),
                fields = projector.field_count(),
                "resolved field descriptors"
            );
            Ok((projector.project(source), projector.field_count()))
        });

    match result {
        Ok((records, field_count)) => {
            if let Some(observer) = &options.observer {
                observer.on_success(
                    &context::<T>(fields),
                    ShapeStats {
                        records: records.len(),
                        fields: field_count,
                    },
                );
            }
            Ok(records)
        }
        Err(e) => {
            tracing::debug!(type_name = T::type_name(), error = %e, "shaping aborted");
            if let Some(observer) = &options.observer {
                let ctx = context::<T>(fields);
                let severity = ShapeSeverity::of(&e);
                observer.on_failure(&ctx, severity, &e);
                if severity >= options.alert_at_or_above {
                    observer.on_alert(&ctx, severity, &e);
                }
            }
            Err(e)
        }
    }
}

fn context<T: Shape>(fields: Option<&str>) -> ShapeContext {
    ShapeContext {
        type_name: T::type_name(),
        fields: fields.map(str::to_owned),
    }
}
