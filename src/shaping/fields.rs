//! Parsing of caller-supplied field specifications.
//!
//! A specification is either absent/blank ("all public fields") or a comma-separated list of
//! names such as `"id, title ,description"`. Tokens are trimmed; empty tokens are kept so that
//! `"id,,title"` is reported as an unknown field rather than silently ignored.

/// A parsed field specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// Select every public field in declaration order.
    All,
    /// Select the listed fields in the given order (duplicates kept).
    Named(Vec<String>),
}

impl FieldSpec {
    /// Parse an optional specification string.
    ///
    /// `None`, `""` and whitespace-only input all mean [`FieldSpec::All`].
    pub fn parse(fields: Option<&str>) -> Self {
        match fields {
            Some(raw) if !raw.trim().is_empty() => {
                Self::Named(raw.split(',').map(|token| token.trim().to_owned()).collect())
            }
            _ => Self::All,
        }
    }

    /// Returns `true` for [`FieldSpec::All`].
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<Option<&str>> for FieldSpec {
    fn from(fields: Option<&str>) -> Self {
        Self::parse(fields)
    }
}

impl From<&str> for FieldSpec {
    fn from(fields: &str) -> Self {
        Self::parse(Some(fields))
    }
}
