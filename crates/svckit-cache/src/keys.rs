//! Namespaced key construction.
//!
//! Every key the store touches is `prefix:logical_key`. The prefix is fixed
//! when the namespace is built, so clients configured with different prefixes
//! never see each other's keys.

use svckit_core::error::AppError;
use svckit_core::result::AppResult;

/// Separator between the namespace prefix and the logical key.
pub const SEPARATOR: char = ':';

/// Characters with a meaning in Redis glob patterns.
const GLOB_CHARS: [char; 5] = ['*', '?', '[', ']', '\\'];

/// An immutable key prefix applied to every logical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyNamespace {
    prefix: String,
}

impl KeyNamespace {
    /// Create a namespace. The prefix must be non-empty, must not end with
    /// the separator, and must not contain glob metacharacters, so that
    /// [`pattern`](Self::pattern) matches this namespace only.
    pub fn new(prefix: impl Into<String>) -> AppResult<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(AppError::configuration("Key prefix must not be empty"));
        }
        if prefix.ends_with(SEPARATOR) {
            return Err(AppError::configuration(format!(
                "Key prefix '{prefix}' must not end with '{SEPARATOR}'"
            )));
        }
        if prefix.contains(GLOB_CHARS) {
            return Err(AppError::configuration(format!(
                "Key prefix '{prefix}' must not contain any of * ? [ ] \\"
            )));
        }
        Ok(Self { prefix })
    }

    /// Return the prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the effective key for `logical`.
    pub fn key(&self, logical: &str) -> AppResult<String> {
        if logical.is_empty() {
            return Err(AppError::validation("Cache key must not be empty"));
        }
        Ok(format!("{}{SEPARATOR}{logical}", self.prefix))
    }

    /// Build effective keys for every logical key, failing if any is empty.
    pub fn keys<I, S>(&self, logical: I) -> AppResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        logical.into_iter().map(|k| self.key(k.as_ref())).collect()
    }

    /// Glob pattern matching keys inside this namespace, e.g. `"*"` or `"user:*"`.
    pub fn pattern(&self, glob: &str) -> String {
        format!("{}{SEPARATOR}{glob}", self.prefix)
    }

    /// Strip this namespace from an effective key, if it belongs to it.
    pub fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.prefix.as_str())?
            .strip_prefix(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(prefix: &str) -> KeyNamespace {
        KeyNamespace::new(prefix).expect("valid prefix")
    }

    #[test]
    fn test_key_is_prefixed() {
        assert_eq!(ns("app").key("user:1").expect("key"), "app:user:1");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(ns("app").key("").is_err());
        assert!(ns("app").keys(["a", ""]).is_err());
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        assert!(KeyNamespace::new("").is_err());
        assert!(KeyNamespace::new("app:").is_err());
    }

    #[test]
    fn test_glob_prefix_rejected() {
        for prefix in ["app*", "a?c", "a[b]", "a\\b"] {
            assert!(KeyNamespace::new(prefix).is_err(), "{prefix} accepted");
        }
        assert!(KeyNamespace::new("app-v2.cache").is_ok());
    }

    #[test]
    fn test_pattern_does_not_reach_sibling_prefix() {
        let ns = ns("app");
        assert_eq!(ns.pattern("*"), "app:*");
        assert_eq!(ns.strip("apple:k"), None);
        assert_eq!(ns.strip("app:k"), Some("k"));
    }

    #[test]
    fn test_keys_and_pattern() {
        let ns = ns("app");
        assert_eq!(
            ns.keys(["a", "b"]).expect("keys"),
            vec!["app:a".to_string(), "app:b".to_string()]
        );
        assert_eq!(ns.pattern("*"), "app:*");
    }

    #[test]
    fn test_prefixes_partition_keys() {
        let a = ns("app");
        let b = ns("other");
        let key = a.key("user:1").expect("key");
        assert_eq!(a.strip(&key), Some("user:1"));
        assert_eq!(b.strip(&key), None);
        assert_eq!(ns("ap").strip(&key), None);
    }
}
