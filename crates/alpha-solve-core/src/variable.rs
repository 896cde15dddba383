//! Named variable bindings

use crate::error::{Error, Result};
use std::fmt;

/// How a variable's values are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VariableType {
    /// Values are literal numbers written as text
    Numerical,
    /// Values are symbolic expressions that must be evaluated before numeric use
    Analytical,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Numerical => write!(f, "numerical"),
            VariableType::Analytical => write!(f, "analytical"),
        }
    }
}

/// A named binding with an ordered list of values
///
/// Variables are immutable once built. A variable with no values is
/// treated as absent by every consumer (see [`Variable::is_defined`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "VariableRepr"))]
pub struct Variable {
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: VariableType,
    #[cfg_attr(feature = "serde", serde(default))]
    values: Vec<String>,
}

impl Variable {
    /// Create a variable, validating its name
    pub fn new<N, I, V>(name: N, kind: VariableType, values: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            kind,
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a numerical variable
    ///
    /// Names are taken as given; use [`Variable::new`] to validate untrusted input.
    pub fn numerical<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            kind: VariableType::Numerical,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an analytical variable
    pub fn analytical<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            kind: VariableType::Analytical,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableType {
        self.kind
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// First value, if any
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// A variable counts as defined only when it carries at least one value
    pub fn is_defined(&self) -> bool {
        !self.values.is_empty()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = [{}]", self.name, self.values.join(", "))
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct VariableRepr {
    name: String,
    #[serde(rename = "type")]
    kind: VariableType,
    #[serde(default)]
    values: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<VariableRepr> for Variable {
    type Error = Error;

    fn try_from(repr: VariableRepr) -> Result<Self> {
        Variable::new(repr.name, repr.kind, repr.values)
    }
}
