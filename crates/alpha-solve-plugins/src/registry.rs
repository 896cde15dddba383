//! Plug-in registry and ranking

use crate::options::PluginOptions;
use crate::plugin::{CellFunction, CellFunctionInput, ProcMacro, ProcMacroInput};
use crate::plugins::{EvaluateNumerical, FindRoots, NumMacro, SolveNumerical};
use alpha_solve_core::MetaFunctionResult;

/// An applicable plug-in together with its applicability verdict
pub struct Ranked<'a, P: ?Sized + 'a> {
    pub meta: MetaFunctionResult,
    pub plugin: &'a P,
}

/// Ordered collection of macros and cell functions
pub struct PluginRegistry {
    macros: Vec<Box<dyn ProcMacro>>,
    cell_functions: Vec<Box<dyn CellFunction>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_builtins(&PluginOptions::default())
    }
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            macros: Vec::new(),
            cell_functions: Vec::new(),
        }
    }

    /// Create a registry holding the four built-in plug-ins
    pub fn with_builtins(options: &PluginOptions) -> Self {
        let mut registry = Self::new();
        registry.register_macro(NumMacro::new(options.num_macro.clone()));
        registry.register_cell_function(EvaluateNumerical::new(options.decimals));
        registry.register_cell_function(FindRoots::new(options.search.clone(), options.decimals));
        registry
            .register_cell_function(SolveNumerical::new(options.search.clone(), options.decimals));
        registry
    }

    pub fn register_macro<M: ProcMacro + 'static>(&mut self, plugin: M) {
        self.macros.push(Box::new(plugin));
    }

    pub fn register_cell_function<F: CellFunction + 'static>(&mut self, plugin: F) {
        self.cell_functions.push(Box::new(plugin));
    }

    pub fn macros(&self) -> impl Iterator<Item = &dyn ProcMacro> + '_ {
        self.macros.iter().map(|m| m.as_ref())
    }

    pub fn cell_functions(&self) -> impl Iterator<Item = &dyn CellFunction> + '_ {
        self.cell_functions.iter().map(|f| f.as_ref())
    }

    /// Applicable macros, lowest index first
    ///
    /// Ties keep registration order.
    pub fn rank_macros(&self, input: &ProcMacroInput<'_>) -> Vec<Ranked<'_, dyn ProcMacro>> {
        let mut ranked: Vec<_> = self
            .macros()
            .map(|plugin| Ranked {
                meta: plugin.meta(input),
                plugin,
            })
            .filter(|r| r.meta.use_result)
            .collect();
        ranked.sort_by_key(|r| r.meta.index);
        ranked
    }

    /// Applicable cell functions, lowest index first
    ///
    /// Ties keep registration order.
    pub fn rank_cell_functions(
        &self,
        input: &CellFunctionInput<'_>,
    ) -> Vec<Ranked<'_, dyn CellFunction>> {
        let mut ranked: Vec<_> = self
            .cell_functions()
            .map(|plugin| Ranked {
                meta: plugin.meta(input),
                plugin,
            })
            .filter(|r| r.meta.use_result)
            .collect();
        ranked.sort_by_key(|r| r.meta.index);
        ranked
    }

    /// Every plug-in's verdict, applicable or not, macros first
    pub fn check_all(
        &self,
        macro_input: &ProcMacroInput<'_>,
        cell_input: &CellFunctionInput<'_>,
    ) -> Vec<MetaFunctionResult> {
        self.macros()
            .map(|m| m.meta(macro_input))
            .chain(self.cell_functions().map(|f| f.meta(cell_input)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_solve_core::{Cell, Context, Variable};
    use pretty_assertions::assert_eq;

    fn ranked_names(latex: &str, context: &Context) -> Vec<&'static str> {
        let registry = PluginRegistry::default();
        let cell = Cell::new(latex);
        registry
            .rank_cell_functions(&CellFunctionInput::new(&cell, context))
            .iter()
            .map(|r| r.plugin.name())
            .collect()
    }

    #[test]
    fn test_builtins() {
        let registry = PluginRegistry::default();
        assert_eq!(registry.macros().count(), 1);
        let names: Vec<_> = registry.cell_functions().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec!["Numerical Evaluation", "Root Finder", "Numerical Solver"]
        );
    }

    #[test]
    fn test_rank_cell_functions() {
        let context = Context::new().with_variable(Variable::numerical("a", ["1", "2"]));
        assert_eq!(ranked_names("1 + 1", &context), vec!["Numerical Evaluation"]);
        assert_eq!(ranked_names("x^2 - 4", &context), vec!["Root Finder"]);
        assert_eq!(ranked_names("x + a = 5", &context), vec!["Numerical Solver"]);
        assert_eq!(ranked_names("a x", &context), vec!["Numerical Evaluation"]);
        assert!(ranked_names("x + y", &context).is_empty());
    }

    #[test]
    fn test_rank_macros() {
        let registry = PluginRegistry::default();
        let context = Context::new();
        let ranked = registry.rank_macros(&ProcMacroInput::new("num(2)", &context));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].meta.index, 5);
        assert!(registry
            .rank_macros(&ProcMacroInput::new("2", &context))
            .is_empty());
    }

    #[test]
    fn test_check_all() {
        let registry = PluginRegistry::default();
        let context = Context::new();
        let cell = Cell::new("x^2 - 4");
        let verdicts = registry.check_all(
            &ProcMacroInput::new(&cell.latex, &context),
            &CellFunctionInput::new(&cell, &context),
        );
        let flags: Vec<(i32, bool)> = verdicts.iter().map(|m| (m.index, m.use_result)).collect();
        assert_eq!(flags, vec![(5, false), (75, false), (125, true), (150, false)]);
    }
}
