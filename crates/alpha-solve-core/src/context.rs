//! The variable context threaded between cells

use crate::error::{Error, Result};
use crate::variable::Variable;
use std::collections::HashSet;

/// Ordered set of variables visible to a cell
///
/// A context is a value: plug-ins never change one in place, they build a
/// new context with [`Context::with_variable`] and hand it back. Names are
/// unique within one context.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ContextRepr"))]
pub struct Context {
    variables: Vec<Variable>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a list of variables, rejecting duplicate names
    pub fn from_variables(variables: Vec<Variable>) -> Result<Self> {
        let mut seen = HashSet::new();
        for var in &variables {
            if !seen.insert(var.name()) {
                return Err(Error::DuplicateVariable(var.name().to_string()));
            }
        }
        Ok(Self { variables })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Look up a variable by name, whether or not it has values
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Look up a variable that has at least one value
    pub fn defined(&self, name: &str) -> Option<&Variable> {
        self.get(name).filter(|v| v.is_defined())
    }

    /// True when `name` is bound to at least one value
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined(name).is_some()
    }

    /// Iterate over variables that carry values, in context order
    pub fn defined_variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.iter().filter(|v| v.is_defined())
    }

    /// Return a new context where `variable` replaces any entry of the same name
    ///
    /// The replacement is appended at the end of the list.
    pub fn with_variable(&self, variable: Variable) -> Self {
        let mut context = self.without_variable(variable.name());
        context.variables.push(variable);
        context
    }

    /// Return a new context without the named variable
    pub fn without_variable(&self, name: &str) -> Self {
        Self {
            variables: self
                .variables
                .iter()
                .filter(|v| v.name() != name)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ContextRepr {
    #[serde(default)]
    variables: Vec<Variable>,
}

#[cfg(feature = "serde")]
impl TryFrom<ContextRepr> for Context {
    type Error = Error;

    fn try_from(repr: ContextRepr) -> Result<Self> {
        Context::from_variables(repr.variables)
    }
}
