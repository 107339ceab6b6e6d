//! Path and method matching.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A prefix pattern ends in `/` and captures the rest of the path
//! - No regex in the hot path

use axum::http::Method;

/// Public path a route answers on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches exactly this path.
    Exact(String),
    /// Matches any path starting with this prefix. The prefix ends in `/`.
    Prefix(String),
}

impl PathPattern {
    pub fn exact(path: impl Into<String>) -> Self {
        PathPattern::Exact(path.into())
    }

    /// Create a prefix pattern, appending the trailing `/` when missing.
    pub fn prefix(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.ends_with('/') {
            path.push('/');
        }
        PathPattern::Prefix(path)
    }

    /// Returns the captured suffix if `path` matches. Exact matches capture
    /// the empty string.
    pub fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathPattern::Exact(expected) => (path == expected.as_str()).then_some(""),
            PathPattern::Prefix(prefix) => path.strip_prefix(prefix.as_str()),
        }
    }

    /// Length used to rank competing prefixes.
    pub fn specificity(&self) -> usize {
        match self {
            PathPattern::Exact(p) | PathPattern::Prefix(p) => p.len(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, PathPattern::Exact(_))
    }
}

/// Methods a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    Any,
    Only(Vec<Method>),
}

impl MethodFilter {
    pub fn only(methods: impl IntoIterator<Item = Method>) -> Self {
        MethodFilter::Only(methods.into_iter().collect())
    }

    pub fn allows(&self, method: &Method) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::Only(methods) => methods.contains(method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let pattern = PathPattern::exact("/images");
        assert_eq!(pattern.matches("/images"), Some(""));
        assert_eq!(pattern.matches("/images/"), None);
        assert_eq!(pattern.matches("/IMAGES"), None); // Case sensitive
    }

    #[test]
    fn test_prefix_matcher() {
        let pattern = PathPattern::prefix("/images");
        assert_eq!(pattern, PathPattern::Prefix("/images/".into()));
        assert_eq!(pattern.matches("/images/cat.png"), Some("cat.png"));
        assert_eq!(pattern.matches("/images/a/b.png"), Some("a/b.png"));
        assert_eq!(pattern.matches("/images/"), Some(""));
        assert_eq!(pattern.matches("/images"), None);
    }

    #[test]
    fn test_method_filter() {
        let filter = MethodFilter::only([Method::GET, Method::DELETE]);
        assert!(filter.allows(&Method::GET));
        assert!(filter.allows(&Method::DELETE));
        assert!(!filter.allows(&Method::POST));
        assert!(MethodFilter::Any.allows(&Method::PATCH));
    }
}
