use std::time::Duration;

use crate::error::RuntimeError;

/// Represents a runtime value in the interpreter.
///
/// The set of kinds is closed. There are no conversions between kinds and no
/// operation ever changes a value in place, so values are freely copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// A signed integer, produced by literals such as `42`.
    Integer(i64),
    /// A whole number of seconds, produced by literals such as `100s`.
    Duration(Duration),
    /// `true` or `false`.
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Self::Duration(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl Value {
    /// Name of the value's kind, as used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Duration(_) => "duration",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns the integer payload, or a type mismatch blamed on `function`.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Integer(7).as_integer("click").unwrap(), 7);
    /// assert!(Value::Bool(true).as_integer("click").is_err());
    /// ```
    pub fn as_integer(&self, function: &str) -> Result<i64, RuntimeError> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::ArgumentTypeMismatch { function: function.to_string() }),
        }
    }

    /// Returns the duration payload, or a type mismatch blamed on `function`.
    pub fn as_duration(&self, function: &str) -> Result<Duration, RuntimeError> {
        match self {
            Self::Duration(d) => Ok(*d),
            _ => Err(RuntimeError::ArgumentTypeMismatch { function: function.to_string() }),
        }
    }

    /// Returns the boolean payload, or a type mismatch blamed on `function`.
    pub fn as_bool(&self, function: &str) -> Result<bool, RuntimeError> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ArgumentTypeMismatch { function: function.to_string() }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Duration(d) => write!(f, "{}s", d.as_secs()),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
