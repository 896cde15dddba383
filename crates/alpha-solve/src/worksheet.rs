//! Worksheet evaluation
//!
//! Runs cells in order, threading one [`Context`] from each cell to the
//! next. For every cell the applicable macros rewrite the text first
//! (lowest index first, each on the previous output), then the
//! lowest-index applicable cell function evaluates the rewritten cell.
//!
//! # Example
//!
//! ```rust
//! use alpha_solve::prelude::*;
//!
//! let worksheet = Worksheet::from_latex(["x^2 - 4", "x^3"]);
//! let run = worksheet.run(&PluginRegistry::default(), Context::new());
//!
//! assert_eq!(run.outcomes[0].visible_solutions, vec!["x = -2.0", "x = 2.0"]);
//! assert_eq!(run.outcomes[1].visible_solutions, vec!["-8.0", "8.0"]);
//! ```

use crate::{
    Cell, CellFunctionInput, Context, MetaFunctionResult, PluginRegistry, ProcMacroInput,
};

/// What happened to one cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellOutcome {
    /// Cell text after macro expansion
    pub latex: String,
    /// Names of the macros that rewrote the cell, in order
    pub macros: Vec<String>,
    /// Cell function that produced the solutions, if any applied
    pub plugin: Option<String>,
    pub visible_solutions: Vec<String>,
}

/// Result of running a whole worksheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorksheetRun {
    pub outcomes: Vec<CellOutcome>,
    /// Context after the last cell
    pub context: Context,
}

impl WorksheetRun {
    /// Number of cells no cell function handled
    pub fn unhandled(&self) -> usize {
        self.outcomes.iter().filter(|o| o.plugin.is_none()).count()
    }
}

/// An ordered list of cells
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Worksheet {
    cells: Vec<Cell>,
}

impl Worksheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a worksheet with one cell per LaTeX string
    pub fn from_latex<I, S>(latex: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: latex.into_iter().map(Cell::new).collect(),
        }
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Evaluate every cell, starting from `context`
    pub fn run(&self, registry: &PluginRegistry, context: Context) -> WorksheetRun {
        let mut context = context;
        let mut outcomes = Vec::with_capacity(self.cells.len());

        for (i, cell) in self.cells.iter().enumerate() {
            let _span = tracing::debug_span!("cell", index = i).entered();
            let (outcome, next) = evaluate_cell(registry, cell, &context);
            context = next;
            outcomes.push(outcome);
        }

        WorksheetRun { outcomes, context }
    }
}

/// Expand macros in `latex`, returning the text and the macros that ran
pub fn expand_macros(
    registry: &PluginRegistry,
    latex: &str,
    context: &Context,
) -> (String, Vec<String>) {
    let mut text = latex.to_string();
    let mut applied = Vec::new();

    for ranked in registry.rank_macros(&ProcMacroInput::new(latex, context)) {
        let result = ranked.plugin.expand(&ProcMacroInput::new(&text, context));
        tracing::debug!(
            plugin = %ranked.meta.name,
            before = %text,
            after = %result.modified_latex,
            "macro expanded"
        );
        text = result.modified_latex;
        applied.push(ranked.meta.name);
    }

    (text, applied)
}

/// Evaluate one cell, returning its outcome and the context for the next cell
pub fn evaluate_cell(
    registry: &PluginRegistry,
    cell: &Cell,
    context: &Context,
) -> (CellOutcome, Context) {
    let (latex, macros) = expand_macros(registry, &cell.latex, context);
    let expanded = Cell::new(latex);

    let input = CellFunctionInput::new(&expanded, context);
    let ranked = registry.rank_cell_functions(&input);

    let Some(winner) = ranked.first() else {
        tracing::debug!(latex = %expanded.latex, "no applicable cell function");
        let outcome = CellOutcome {
            latex: expanded.latex,
            macros,
            plugin: None,
            visible_solutions: Vec::new(),
        };
        return (outcome, context.clone());
    };

    let MetaFunctionResult { name, index, .. } = &winner.meta;
    tracing::debug!(plugin = %name, index, latex = %expanded.latex, "evaluating cell");
    let result = winner.plugin.solve(&input);

    let outcome = CellOutcome {
        latex: expanded.latex.clone(),
        macros,
        plugin: Some(name.clone()),
        visible_solutions: result.visible_solutions,
    };
    (outcome, result.new_context)
}
