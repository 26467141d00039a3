//! JSON Value Extension
//!
//! Accessors for loosely typed JSON records coming from external sources.

use serde_json::{Map, Value};

/// Extension trait for JSON objects with convenient accessor methods
///
/// ```rust
/// use serde_json::json;
/// use themis_providers::utils::JsonExt;
///
/// let record = json!({"_key": 1234, "content": "Article premier"});
/// assert_eq!(record.opt_string("_key").as_deref(), Some("1234"));
/// assert_eq!(record.str_or("content", ""), "Article premier");
/// ```
pub trait JsonExt {
    /// Get string value or default
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Get optional string (replaces .get().and_then(as_str))
    fn opt_str(&self, key: &str) -> Option<&str>;

    /// Get a string or number value as an owned string
    fn opt_string(&self, key: &str) -> Option<String>;

    /// Get optional u64
    fn opt_u64(&self, key: &str) -> Option<u64>;
}

/// Internal trait for types that can be used as JSON-like containers
trait JsonContainer {
    fn get_value(&self, key: &str) -> Option<&Value>;
}

impl JsonContainer for Value {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl JsonContainer for Map<String, Value> {
    #[inline]
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Macro to implement JsonExt for types that implement JsonContainer
macro_rules! impl_json_ext {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl JsonExt for $ty {
                #[inline]
                fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
                    self.get_value(key).and_then(Value::as_str).unwrap_or(default)
                }

                #[inline]
                fn opt_str(&self, key: &str) -> Option<&str> {
                    self.get_value(key).and_then(Value::as_str)
                }

                #[inline]
                fn opt_string(&self, key: &str) -> Option<String> {
                    match self.get_value(key)? {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    }
                }

                #[inline]
                fn opt_u64(&self, key: &str) -> Option<u64> {
                    self.get_value(key).and_then(Value::as_u64)
                }
            }
        )+
    };
}

impl_json_ext!(Value, Map<String, Value>);
