//! Config field path used to point diagnostics at a `site.toml` key.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path of a config field, e.g. `site.url`.
///
/// Each section exposes its paths through a `FIELDS` constant:
///
/// ```ignore
/// diag.error(SiteSection::FIELDS.url, "required");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display_contains_path() {
        let field = FieldPath::new("site.url");
        assert_eq!(field.as_str(), "site.url");
        assert!(field.to_string().contains("site.url"));
    }
}
