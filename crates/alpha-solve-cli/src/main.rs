//! alpha-solve CLI - evaluate LaTeX worksheets from the command line

use alpha_solve::prelude::*;
use alpha_solve::evaluate_cell;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alpha")]
#[command(author, version, about = "Evaluate LaTeX worksheets with numeric solvers")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every cell of a worksheet file in order
    Run {
        /// Worksheet file: a JSON array of cells, or one cell per line
        input: PathBuf,

        /// JSON file with the starting variable context
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// JSON file with plug-in options
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Print the run as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a single cell
    Eval {
        /// Cell LaTeX
        latex: String,

        /// JSON file with the variable context
        #[arg(short, long)]
        context: Option<PathBuf>,
    },

    /// Show which plug-ins apply to a cell
    Check {
        /// Cell LaTeX
        latex: String,

        /// JSON file with the variable context
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            context,
            options,
            json,
        } => run_worksheet(&input, context.as_deref(), options.as_deref(), json),
        Commands::Eval { latex, context } => eval_cell(&latex, context.as_deref()),
        Commands::Check { latex, context } => check_cell(&latex, context.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_worksheet(
    input: &Path,
    context: Option<&Path>,
    options: Option<&Path>,
    json: bool,
) -> Result<()> {
    let worksheet = load_worksheet(input)?;
    let context = load_context(context)?;
    let registry = match options {
        Some(path) => PluginRegistry::with_builtins(&load_options(path)?),
        None => PluginRegistry::default(),
    };

    tracing::info!(cells = worksheet.len(), path = %input.display(), "running worksheet");
    let run = worksheet.run(&registry, context);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&run).context("Failed to serialize run")?
        );
        return Ok(());
    }

    for (i, outcome) in run.outcomes.iter().enumerate() {
        println!("[{}] {}", i + 1, outcome.latex);
        match &outcome.plugin {
            Some(plugin) => {
                for line in &outcome.visible_solutions {
                    println!("    {}", line);
                }
                tracing::debug!(cell = i + 1, plugin = %plugin, "cell handled");
            }
            None => println!("    (no applicable plug-in)"),
        }
    }

    if run.unhandled() > 0 {
        eprintln!("{} of {} cells not handled", run.unhandled(), run.outcomes.len());
    }
    Ok(())
}

fn eval_cell(latex: &str, context: Option<&Path>) -> Result<()> {
    let context = load_context(context)?;
    let registry = PluginRegistry::default();
    let (outcome, _) = evaluate_cell(&registry, &Cell::new(latex), &context);

    if outcome.plugin.is_none() {
        anyhow::bail!("No plug-in applies to '{}'", latex);
    }
    for line in &outcome.visible_solutions {
        println!("{}", line);
    }
    Ok(())
}

fn check_cell(latex: &str, context: Option<&Path>) -> Result<()> {
    let context = load_context(context)?;
    let registry = PluginRegistry::default();
    let cell = Cell::new(latex);

    let verdicts = registry.check_all(
        &ProcMacroInput::new(latex, &context),
        &CellFunctionInput::new(&cell, &context),
    );
    for meta in verdicts {
        let mark = if meta.use_result { "yes" } else { "no" };
        println!("{:>5}  {:<3}  {}", meta.index, mark, meta.name);
    }
    Ok(())
}

fn load_worksheet(path: &Path) -> Result<Worksheet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    if path.extension().map_or(false, |ext| ext == "json") {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid worksheet JSON in '{}'", path.display()))
    } else {
        Ok(parse_worksheet_text(&text))
    }
}

/// One cell per non-blank line; lines starting with `%` are comments
fn parse_worksheet_text(text: &str) -> Worksheet {
    let mut worksheet = Worksheet::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        worksheet.push(Cell::new(line));
    }
    worksheet
}

fn load_context(path: Option<&Path>) -> Result<Context> {
    let Some(path) = path else {
        return Ok(Context::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid context JSON in '{}'", path.display()))
}

fn load_options(path: &Path) -> Result<PluginOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid options JSON in '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_text_worksheet_skips_comments_and_blanks() {
        let worksheet = parse_worksheet_text("% setup\nx^2 - 4\n\n  x + 1  \n");
        let cells: Vec<&str> = worksheet.cells().iter().map(|c| c.latex.as_str()).collect();
        assert_eq!(cells, vec!["x^2 - 4", "x + 1"]);
    }

    #[test]
    fn test_json_worksheet() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"latex": "x - 1"}}, {{"latex": "2x"}}]"#).unwrap();

        let worksheet = load_worksheet(file.path()).unwrap();
        assert_eq!(worksheet.len(), 2);
        assert_eq!(worksheet.cells()[1].latex, "2x");
    }

    #[test]
    fn test_context_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"variables": [{{"name": "a", "type": "numerical", "values": ["1", "2"]}}]}}"#
        )
        .unwrap();

        let context = load_context(Some(file.path())).unwrap();
        assert_eq!(context.get("a").unwrap().values(), ["1", "2"]);
        assert!(load_context(None).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_context_variables_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"variables": [{{"name": "a", "type": "numerical", "values": ["1"]}}, {{"name": "a", "type": "numerical", "values": ["2"]}}]}}"#
        )
        .unwrap();
        assert!(load_context(Some(file.path())).is_err());
    }

    #[test]
    fn test_invalid_context_variable_name_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"variables": [{{"name": "a b", "type": "numerical", "values": ["1"]}}]}}"#
        )
        .unwrap();

        let err = load_context(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid variable name"), "{:#}", err);
    }

    #[test]
    fn test_partial_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"decimals": 4}}"#).unwrap();

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.decimals, 4);
        assert_eq!(options.search, PluginOptions::default().search);
    }
}
