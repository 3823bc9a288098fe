//! Request path parsing for details pages.

use docsite_domain::constants::LATEST_VERSION;
use docsite_domain::paths::url_is_versioned;

/// A details page request: `<path>[@<version>][/<suffix>]`.
///
/// With a suffix after the version, the part before `@` is the module path and the suffix a
/// path inside it. Otherwise the module is left for the data source to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetailsPath {
    pub(crate) path: String,
    pub(crate) module_path: Option<String>,
    pub(crate) version: String,
    pub(crate) versioned: bool,
}

/// Why a request path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MalformedPath {
    Empty,
    EmptyVersion,
    InvalidSegment,
    UnexpectedSuffix,
}

impl MalformedPath {
    pub(crate) const fn message(self) -> &'static str {
        match self {
            Self::Empty => "empty path",
            Self::EmptyVersion => "empty version after '@'",
            Self::InvalidSegment => "path contains an invalid element",
            Self::UnexpectedSuffix => "module paths take no suffix after the version",
        }
    }
}

impl DetailsPath {
    /// Parses a package or directory path.
    pub(crate) fn parse(raw: &str) -> Result<Self, MalformedPath> {
        let raw = raw.trim_matches('/');
        let versioned = url_is_versioned(raw);
        let Some((module_path, rest)) = raw.split_once('@') else {
            validate(raw)?;
            return Ok(Self {
                path: raw.to_owned(),
                module_path: None,
                version: LATEST_VERSION.to_owned(),
                versioned,
            });
        };

        validate(module_path)?;
        let (version, suffix) = rest.split_once('/').unwrap_or((rest, ""));
        if version.is_empty() {
            return Err(MalformedPath::EmptyVersion);
        }
        if version.contains(['@', ' ']) {
            return Err(MalformedPath::InvalidSegment);
        }
        let (path, module_path) = if suffix.is_empty() {
            (module_path.to_owned(), None)
        } else {
            validate(suffix)?;
            (format!("{module_path}/{suffix}"), Some(module_path.to_owned()))
        };

        Ok(Self { path, module_path, version: version.to_owned(), versioned })
    }

    /// Parses a module path (`/mod/<module>[@<version>]`).
    pub(crate) fn parse_module(raw: &str) -> Result<Self, MalformedPath> {
        let parsed = Self::parse(raw)?;
        if parsed.module_path.is_some() {
            return Err(MalformedPath::UnexpectedSuffix);
        }
        Ok(parsed)
    }
}

fn validate(path: &str) -> Result<(), MalformedPath> {
    if path.is_empty() {
        return Err(MalformedPath::Empty);
    }
    let invalid = path.split('/').any(|element| {
        element.is_empty()
            || element == "."
            || element == ".."
            || element.chars().any(|c| c == '@' || c.is_whitespace() || c.is_control())
    });
    if invalid { Err(MalformedPath::InvalidSegment) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_paths_default_to_latest() {
        let parsed = DetailsPath::parse("/github.com/a/b/c").unwrap();
        assert_eq!(parsed.path, "github.com/a/b/c");
        assert_eq!(parsed.module_path, None);
        assert_eq!(parsed.version, "latest");
        assert!(!parsed.versioned);
    }

    #[test]
    fn version_pins_module_and_suffix_selects_package() {
        let parsed = DetailsPath::parse("github.com/a/b@v1.2.3/c/d").unwrap();
        assert_eq!(parsed.path, "github.com/a/b/c/d");
        assert_eq!(parsed.module_path.as_deref(), Some("github.com/a/b"));
        assert_eq!(parsed.version, "v1.2.3");
        assert!(parsed.versioned);

        let parsed = DetailsPath::parse("github.com/a/b@v1.2.3").unwrap();
        assert_eq!(parsed.path, "github.com/a/b");
        assert_eq!(parsed.module_path, None);

        let parsed = DetailsPath::parse_module("github.com/a/b@v1.2.3").unwrap();
        assert_eq!(parsed.path, "github.com/a/b");
    }

    #[test]
    fn malformed_paths_are_rejected() {
        assert_eq!(DetailsPath::parse(""), Err(MalformedPath::Empty));
        assert_eq!(DetailsPath::parse("github.com/a@"), Err(MalformedPath::EmptyVersion));
        assert_eq!(DetailsPath::parse("github.com/../etc"), Err(MalformedPath::InvalidSegment));
        assert_eq!(DetailsPath::parse("a//b"), Err(MalformedPath::InvalidSegment));
        assert_eq!(DetailsPath::parse("@v1.0.0"), Err(MalformedPath::Empty));
        assert_eq!(DetailsPath::parse("a@v1/b@c"), Err(MalformedPath::InvalidSegment));
        assert_eq!(DetailsPath::parse("a@v1/b/c@v2/d"), Err(MalformedPath::InvalidSegment));
        assert_eq!(
            DetailsPath::parse_module("github.com/a/b@v1.0.0/c"),
            Err(MalformedPath::UnexpectedSuffix)
        );
    }
}
