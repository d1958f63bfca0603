//! Parameter bag
//!
//! Named scalar values that definitions reference through `%name%`
//! placeholders, most commonly in class names.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::value_objects::Value;

/// Ordered map of parameter name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    values: IndexMap<String, Value>,
}

impl ParameterBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    pub fn set<S: Into<String>, V: Into<Value>>(&mut self, name: S, value: V) {
        self.values.insert(name.into(), value.into());
    }

    /// Value of a parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether a parameter is defined
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate parameters in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Replace `%name%` placeholders in `input`
    ///
    /// `%%` yields a literal `%`. A `%` that does not open a well-formed
    /// placeholder (no closing `%`, or whitespace inside) is kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterNotFound`] for an unknown name and
    /// [`Error::Configuration`] when the parameter is not a scalar.
    pub fn resolve_string(&self, input: &str) -> Result<String> {
        let mut resolved = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find('%') {
            resolved.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            if let Some(stripped) = after.strip_prefix('%') {
                resolved.push('%');
                rest = stripped;
                continue;
            }

            match after.find('%') {
                Some(end) if !after[..end].contains(char::is_whitespace) => {
                    let name = &after[..end];
                    let value = self
                        .get(name)
                        .ok_or_else(|| Error::parameter_not_found(name))?;
                    let rendered = value.as_placeholder_string().ok_or_else(|| {
                        Error::configuration(format!(
                            "parameter \"{name}\" is not a scalar and cannot be used inside string \"{input}\""
                        ))
                    })?;
                    resolved.push_str(&rendered);
                    rest = &after[end + 1..];
                }
                _ => {
                    resolved.push('%');
                    rest = after;
                }
            }
        }

        resolved.push_str(rest);
        Ok(resolved)
    }
}
