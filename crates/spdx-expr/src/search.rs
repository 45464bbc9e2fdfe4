//! Search query construction for components that need a manual license review.
//!
//! A [`ContentId`] names a component by namespace and name. The builder turns
//! those into a handful of distinctive search terms: the full namespace and
//! name plus their word segments, minus short words and terms so common in
//! package names that they would only add noise. The terms are joined into a
//! bug-tracker search URL.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Default search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://dev.eclipse.org/ipzilla/buglist.cgi";

/// Terms skipped regardless of length, compared case-insensitively.
pub const COMMON_TERMS: [&str; 8] = [
    "apache", "eclipse", "source", "platform", "plugin", "parent", "client", "server",
];

/// Terms shorter than this many bytes are skipped.
pub const MINIMUM_TERM_LENGTH: usize = 5;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap_or_else(|_| unreachable!()));

/// A component identity that can seed a search.
pub trait ContentId {
    /// Grouping namespace (for example a Maven group id), if any.
    fn namespace(&self) -> Option<&str>;
    /// Component name.
    fn name(&self) -> &str;
    /// Whether the id is complete enough to search for.
    fn is_valid(&self) -> bool;
}

/// Error returned when coordinates cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid coordinates '{0}', expected type/source/namespace/name/version")]
pub struct CoordinatesError(pub String);

/// `type/source/namespace/name/version` component coordinates.
///
/// A namespace of `-` means the component has none.
///
/// # Examples
///
/// ```
/// use spdx_expr::search::{ContentId, Coordinates};
///
/// let id: Coordinates = "maven/mavencentral/org.eclipse.jgit/org.eclipse.jgit/5.12.0"
///     .parse()
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(id.namespace(), Some("org.eclipse.jgit"));
/// assert!(id.is_valid());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coordinates {
    kind: String,
    source: String,
    namespace: Option<String>,
    name: String,
    version: String,
}

impl Coordinates {
    /// Package type, such as `maven` or `npm`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Where the package was published, such as `mavencentral`.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Package version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl ContentId for Coordinates {
    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        [&self.kind, &self.source, &self.name, &self.version]
            .iter()
            .all(|part| !part.is_empty())
    }
}

impl FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let parts: Vec<&str> = trimmed.split('/').collect();
        let [kind, source, namespace, name, version] = parts.as_slice() else {
            return Err(CoordinatesError(trimmed.to_string()));
        };
        let namespace = match *namespace {
            "-" | "" => None,
            other => Some(other.to_string()),
        };
        Ok(Self {
            kind: (*kind).to_string(),
            source: (*source).to_string(),
            namespace,
            name: (*name).to_string(),
            version: (*version).to_string(),
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.kind,
            self.source,
            self.namespace.as_deref().unwrap_or("-"),
            self.name,
            self.version
        )
    }
}

/// Tunables for [`SearchQuery`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Endpoint the query string is appended to.
    pub base_url: String,
    /// Terms skipped regardless of length, compared case-insensitively.
    pub common_terms: Vec<String>,
    /// Terms shorter than this many bytes are skipped.
    pub minimum_term_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            common_terms: COMMON_TERMS.iter().map(ToString::to_string).collect(),
            minimum_term_length: MINIMUM_TERM_LENGTH,
        }
    }
}

/// Accumulates distinctive search terms for one content id.
#[derive(Clone, Debug, Default)]
pub struct SearchQuery {
    config: SearchConfig,
    terms: Vec<String>,
}

impl SearchQuery {
    /// Start an empty query governed by `config`.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            terms: Vec::new(),
        }
    }

    /// Build a search URL for `id` using the default configuration.
    ///
    /// Returns `None` when the id is invalid or yields no usable terms.
    ///
    /// # Examples
    ///
    /// ```
    /// use spdx_expr::search::{Coordinates, SearchQuery};
    ///
    /// let id: Coordinates = "npm/npmjs/-/left-pad/1.3.0"
    ///     .parse()
    ///     .unwrap_or_else(|err| panic!("{err}"));
    /// assert_eq!(
    ///     SearchQuery::build(&id).as_deref(),
    ///     Some(
    ///         "https://dev.eclipse.org/ipzilla/buglist.cgi?short_desc_type=anywords\
    ///          &short_desc=left-pad&long_desc_type=substring"
    ///     )
    /// );
    /// ```
    #[must_use]
    pub fn build(id: &dyn ContentId) -> Option<String> {
        let mut query = Self::default();
        query.add_content_id(id);
        query.url()
    }

    /// Add the namespace, the name, and their word segments of `id`.
    ///
    /// Invalid ids contribute nothing.
    pub fn add_content_id(&mut self, id: &dyn ContentId) {
        if !id.is_valid() {
            log::debug!("skipping search terms for invalid content id");
            return;
        }
        let namespace = id.namespace();
        let name = id.name();
        if let Some(namespace) = namespace {
            self.add(namespace);
        }
        self.add(name);
        for segment in NON_WORD.split(name) {
            self.add(segment);
        }
        for segment in namespace.map(|ns| NON_WORD.split(ns)).into_iter().flatten() {
            self.add(segment);
        }
    }

    /// Add a single term unless it is common, short, or already present.
    pub fn add(&mut self, term: &str) {
        let common = self
            .config
            .common_terms
            .iter()
            .any(|each| each.eq_ignore_ascii_case(term));
        if common || term.len() < self.config.minimum_term_length {
            return;
        }
        if !self.terms.iter().any(|existing| existing == term) {
            self.terms.push(term.to_string());
        }
    }

    /// Accepted terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Render the query as a URL, or `None` when there are no terms.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        if self.terms.is_empty() {
            return None;
        }
        Some(format!(
            "{}?short_desc_type=anywords&short_desc={}&long_desc_type=substring",
            self.config.base_url,
            self.terms.join("+")
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    struct Fixed {
        namespace: Option<&'static str>,
        name: &'static str,
        valid: bool,
    }

    impl ContentId for Fixed {
        fn namespace(&self) -> Option<&str> {
            self.namespace
        }

        fn name(&self) -> &str {
            self.name
        }

        fn is_valid(&self) -> bool {
            self.valid
        }
    }

    fn coordinates(value: &str) -> Coordinates {
        value
            .parse()
            .unwrap_or_else(|err| panic!("parse coordinates `{value}`: {err}"))
    }

    fn terms_for(id: &dyn ContentId) -> Vec<String> {
        let mut query = SearchQuery::default();
        query.add_content_id(id);
        query.terms().to_vec()
    }

    #[test]
    fn collects_whole_values_then_segments() {
        let id = coordinates("maven/mavencentral/org.eclipse.jgit/org.eclipse.jgit.http/5.12.0");
        assert_eq!(
            terms_for(&id),
            vec!["org.eclipse.jgit", "org.eclipse.jgit.http"]
        );
    }

    #[test]
    fn keeps_long_distinctive_segments() {
        let id = coordinates(
            "maven/mavencentral/com.fasterxml.jackson.core/jackson-databind/2.13.0",
        );
        assert_eq!(
            terms_for(&id),
            vec![
                "com.fasterxml.jackson.core",
                "jackson-databind",
                "jackson",
                "databind",
                "fasterxml",
            ]
        );
    }

    #[rstest]
    #[case("Apache")]
    #[case("ECLIPSE")]
    #[case("plugin")]
    fn skips_common_terms_case_insensitively(#[case] name: &'static str) {
        let id = Fixed {
            namespace: None,
            name,
            valid: true,
        };
        assert!(terms_for(&id).is_empty());
    }

    #[test]
    fn skips_short_terms() {
        let config = SearchConfig {
            minimum_term_length: 4,
            ..SearchConfig::default()
        };
        let mut query = SearchQuery::new(config);
        query.add("abc");
        query.add("abcd");
        assert_eq!(query.terms(), ["abcd"]);
    }

    #[test]
    fn invalid_id_builds_nothing() {
        let id = Fixed {
            namespace: Some("org.example"),
            name: "interesting",
            valid: false,
        };
        assert_eq!(SearchQuery::build(&id), None);
    }

    #[test]
    fn id_without_terms_builds_nothing() {
        let id = coordinates("npm/npmjs/-/ms/2.1.3");
        assert_eq!(SearchQuery::build(&id), None);
    }

    #[test]
    fn builds_url_with_plus_separated_terms() {
        let id = Fixed {
            namespace: Some("org.mockito"),
            name: "mockito-core",
            valid: true,
        };
        assert_eq!(
            SearchQuery::build(&id).as_deref(),
            Some(
                "https://dev.eclipse.org/ipzilla/buglist.cgi?short_desc_type=anywords\
                 &short_desc=org.mockito+mockito-core+mockito&long_desc_type=substring"
            )
        );
    }

    #[test]
    fn honours_custom_base_url() {
        let config = SearchConfig {
            base_url: "https://search.example/find".into(),
            ..SearchConfig::default()
        };
        let mut query = SearchQuery::new(config);
        query.add("tomcat-embed");
        assert_eq!(
            query.url().as_deref(),
            Some(
                "https://search.example/find?short_desc_type=anywords\
                 &short_desc=tomcat-embed&long_desc_type=substring"
            )
        );
    }

    #[rstest]
    #[case("maven/mavencentral/org.example/widget")]
    #[case("")]
    #[case("a/b/c/d/e/f")]
    fn rejects_malformed_coordinates(#[case] value: &str) {
        assert_eq!(
            value.parse::<Coordinates>(),
            Err(CoordinatesError(value.to_string()))
        );
    }

    #[test]
    fn coordinates_round_trip_through_display() {
        let text = "npm/npmjs/-/left-pad/1.3.0";
        let id = coordinates(text);
        assert_eq!(id.namespace(), None);
        assert_eq!(id.kind(), "npm");
        assert_eq!(id.source(), "npmjs");
        assert_eq!(id.version(), "1.3.0");
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn coordinates_with_empty_parts_are_invalid() {
        let id = coordinates("maven/mavencentral/org.example//1.0");
        assert!(!id.is_valid());
    }
}
