use serde::{Deserialize, Serialize};

/// Options for [`flatten_with`](crate::flatten_with),
/// [`unflatten_with`](crate::unflatten_with) and
/// [`nested_keys_with`](crate::nested_keys_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Joins key segments. An empty separator concatenates when flattening
    /// and disables splitting when unflattening.
    pub separator: String,
    /// Prepended to every top-level key, followed by the separator.
    /// Ignored by `unflatten_with`.
    pub prefix: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            separator: ".".to_string(),
            prefix: String::new(),
        }
    }
}

impl FlattenOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// `prefix` and `key` joined by the separator, or `key` alone when the
    /// prefix is empty.
    pub(crate) fn join(&self, prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            return key.to_string();
        }
        let mut out = String::with_capacity(prefix.len() + self.separator.len() + key.len());
        out.push_str(prefix);
        out.push_str(&self.separator);
        out.push_str(key);
        out
    }
}
