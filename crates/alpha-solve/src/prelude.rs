//! Prelude module - common imports for alpha-solve users
//!
//! ```rust
//! use alpha_solve::prelude::*;
//! ```

pub use crate::{
    // Data model
    Cell,
    CellFunctionResult,
    Context,
    MetaFunctionResult,
    ProcMacroResult,
    Variable,
    VariableType,

    // Plug-in interfaces
    CellFunction,
    CellFunctionInput,
    ProcMacro,
    ProcMacroInput,

    // Configuration
    PluginOptions,
    PluginRegistry,

    // Worksheets
    CellOutcome,
    Worksheet,
    WorksheetRun,
};
