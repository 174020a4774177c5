//! Input validation for core operations.
//!
//! The upstream request layer is expected to hand the core already-coerced
//! field values; this module performs the business-level checks (required
//! fields, length limits, email shape) and returns a typed error value
//! instead of a framework validation object. Core create/update functions
//! call the relevant input struct's `validate()` before touching the store.

use std::collections::BTreeMap;
use std::fmt;

/// Field-keyed validation messages, ordered by field name for stable output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty error collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// True when no messages have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for a single field, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Converts the collection into a `Result`, for use at the end of a
    /// `validate()` implementation.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Records an error when `value` is empty or whitespace-only.
pub fn require(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
    }
}

/// Records an error when `value` exceeds `limit` characters.
pub fn max_len(errors: &mut ValidationErrors, field: &str, value: &str, limit: usize) {
    if value.chars().count() > limit {
        errors.add(field, format!("must be at most {limit} characters"));
    }
}

/// Records an error when `value` does not look like an email address.
/// Deliberately shallow: one `@` with non-empty local part and a dotted domain.
pub fn email_format(errors: &mut ValidationErrors, field: &str, value: &str) {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        errors.add(field, "must be a valid email address");
    }
}
