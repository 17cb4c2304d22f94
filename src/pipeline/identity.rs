//! Project identity derivation.
//!
//! The slug and package id are embedded into filesystem paths and child
//! process arguments, so derivation validates as well as transforms: input
//! that would smuggle path traversal or shell metacharacters through is
//! rejected up front instead of sanitized after the fact.

use super::error::{Error, Result};

/// Deterministic identifiers derived from the requested app name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    /// App name with every whitespace run collapsed to a single underscore.
    ///
    /// Names the project directory and both APK artifacts.
    pub slug: String,

    /// Android package namespace: `com.webtoapk.` + lowercased slug.
    pub package_id: String,
}

/// Package id prefix applied to every generated project.
const PACKAGE_PREFIX: &str = "com.webtoapk.";

impl ProjectIdentity {
    /// Derives the identity from a raw app name.
    ///
    /// Whitespace runs (including leading and trailing ones) each become a
    /// single `_`. Every remaining character must be alphanumeric, `_`, `-`
    /// or `.`; the slug must not contain `..` and must not start with `-`
    /// or `.`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIdentifier`] naming the violated rule.
    pub fn derive(app_name: &str) -> Result<Self> {
        let slug = collapse_whitespace(app_name);

        if slug.is_empty() {
            return Err(invalid(app_name, "name is empty"));
        }
        if let Some(c) = slug
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(invalid(
                app_name,
                match c {
                    '/' | '\\' => "name contains a path separator",
                    '\0' => "name contains a null byte",
                    _ => "name contains a shell metacharacter",
                },
            ));
        }
        if slug.contains("..") {
            return Err(invalid(app_name, "name contains a path traversal sequence"));
        }
        if slug.starts_with('-') {
            return Err(invalid(app_name, "name starts with a dash"));
        }
        if slug.starts_with('.') {
            return Err(invalid(app_name, "name starts with a dot"));
        }

        let package_id = format!("{}{}", PACKAGE_PREFIX, slug.to_lowercase());
        Ok(Self { slug, package_id })
    }

    /// File name of the unsigned APK produced by the packaging tool.
    pub fn unsigned_apk_name(&self) -> String {
        format!("{}.apk", self.slug)
    }

    /// File name of the signed APK produced by the signing tool.
    pub fn signed_apk_name(&self) -> String {
        format!("{}-signed.apk", self.slug)
    }
}

fn invalid(value: &str, reason: &'static str) -> Error {
    Error::InvalidIdentifier {
        value: value.to_string(),
        reason,
    }
}

/// Replaces every whitespace run with a single underscore.
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
