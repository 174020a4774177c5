//! Slug derivation and uniqueness resolution.
//!
//! Slugs are derived from a human title/name and must stay unique within
//! their entity's table. Uniqueness is resolved by probing the table through
//! an async closure so each entity module supplies its own query (and can
//! exclude the row being updated); on collision a `-1`, `-2`, … suffix is
//! appended until a free slug is found.
//!
//! The read-then-insert sequence is not serialized against concurrent
//! identical submissions; the unique column constraint is the backstop.

use crate::errors::Result;

/// Derives a URL-safe slug from a display string: lowercase, alphanumerics
/// kept, runs of whitespace/underscore/hyphen collapsed to a single hyphen,
/// all other characters stripped, edge hyphens trimmed.
///
/// Input that strips to nothing yields an empty base slug; suffixing then
/// produces `-1`, `-2`, … (kept as-is, matching the observed behavior).
pub fn slugify(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut pending_separator = false;

    for c in source.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // remaining punctuation is stripped without acting as a separator
    }

    slug
}

/// Resolves `base` to a slug not currently taken, trying `base`, `base-1`,
/// `base-2`, … in order. `taken` probes the entity table and must already
/// exclude the row being updated, if any.
///
/// # Errors
/// Propagates any database error from the probe.
pub async fn unique_slug<F, Fut>(base: &str, taken: F) -> Result<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    if !taken(base.to_string()).await? {
        return Ok(base.to_string());
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken(candidate.clone()).await? {
            return Ok(candidate);
        }
        suffix += 1;
    }
}
