//! Generated statements paired with their known-benign errors.

use std::collections::BTreeSet;

/// Error message fragments a statement is allowed to fail with.
///
/// A failure whose message contains any registered fragment is documented
/// engine behavior and must not be reported as a bug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedErrors {
    errors: BTreeSet<String>,
}

impl ExpectedErrors {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeSet::new(),
        }
    }

    /// Registers a fragment. Duplicates collapse.
    pub fn add(&mut self, error: impl Into<String>) {
        self.errors.insert(error.into());
    }

    /// Returns true if the exact fragment is registered.
    #[must_use]
    pub fn contains(&self, error: &str) -> bool {
        self.errors.contains(error)
    }

    /// Returns true if `message` contains any registered fragment.
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        self.errors.iter().any(|e| message.contains(e.as_str()))
    }

    /// Number of distinct fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no fragment is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates the fragments in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for ExpectedErrors {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.errors.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for ExpectedErrors {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut errors = Self::new();
        errors.extend(iter);
        errors
    }
}

/// A SQL statement and the errors it may legitimately raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The complete statement text.
    pub sql: String,
    /// Known-benign error fragments.
    pub expected_errors: ExpectedErrors,
}

impl Query {
    /// Creates a new query.
    #[must_use]
    pub fn new(sql: impl Into<String>, expected_errors: ExpectedErrors) -> Self {
        Self {
            sql: sql.into(),
            expected_errors,
        }
    }

    /// Returns true if an engine failure with this message is expected.
    #[must_use]
    pub fn is_expected_error(&self, message: &str) -> bool {
        self.expected_errors.matches(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_errors_collapse_duplicates() {
        let mut errors = ExpectedErrors::new();
        errors.add("overflow");
        errors.add("overflow");
        errors.add("malformed JSON");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec!["malformed JSON", "overflow"]
        );
    }

    #[test]
    fn test_expected_errors_match_substrings() {
        let errors: ExpectedErrors = ["database table is locked"].into_iter().collect();
        assert!(errors.matches("[SQLITE_LOCKED] database table is locked (code 6)"));
        assert!(!errors.matches("database disk image is malformed"));
        assert!(errors.contains("database table is locked"));
        assert!(!errors.contains("table is locked"));
    }

    #[test]
    fn test_query_without_errors() {
        let query = Query::new("PRAGMA stats;", ExpectedErrors::new());
        assert!(query.expected_errors.is_empty());
        assert!(!query.is_expected_error("anything"));
    }
}
