//! # Hydrocalc CLI
//!
//! Command-style adapter over `hydro_core`. Every command prints a single JSON
//! envelope on stdout:
//!
//! ```json
//! {"success": true, "data": ...}
//! {"success": false, "error": "Unknown formula ID: foo", "code": "UNKNOWN_FORMULA"}
//! ```
//!
//! Logs go to stderr so stdout stays machine-readable.
//!
//! ## Usage
//!
//! ```bash
//! hydro formulas
//! hydro calculate tank_volume '{"D": {"value": 3, "unit": "m"}, "H": {"value": 4, "unit": "m"}}'
//! hydro docs > FORMULAS.md
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hydro_core::equations::generate_formulas_markdown;
use hydro_core::{list_formulas, CalcError, CalcResult, CalculationInput, EngineSettings, HydraulicCalculator};

#[derive(Parser)]
#[command(name = "hydro")]
#[command(about = "Hydrocalc - Hydraulic engineering formula calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON settings file overriding fluid constants
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every available formula with its parameters
    Formulas,
    /// Evaluate one formula
    Calculate {
        /// Formula ID (e.g., darcy_weisbach)
        formula_id: String,
        /// JSON object mapping symbol to {"value": number, "unit": string}
        inputs: String,
    },
    /// Print the formula reference as markdown
    Docs,
}

/// Response wrapper printed for every command.
#[derive(Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl<T: Serialize> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }
}

impl Envelope<()> {
    fn err(message: impl Into<String>, code: Option<&'static str>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "hydro_core=debug,hydro_cli=debug"
    } else {
        "hydro_core=info,hydro_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => println!(r#"{{"success":false,"error":"{}"}}"#, e),
    }
}

fn build_calculator(settings: Option<&PathBuf>) -> CalcResult<HydraulicCalculator> {
    match settings {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            let settings = EngineSettings::load(path)?;
            HydraulicCalculator::from_settings(&settings)
        }
        None => Ok(HydraulicCalculator::default()),
    }
}

fn run_calculate(cli: &Cli, formula_id: &str, raw_inputs: &str) -> CalcResult<()> {
    let calculator = build_calculator(cli.settings.as_ref())?;
    let inputs: CalculationInput = serde_json::from_str(raw_inputs)?;
    debug!(formula_id, symbols = inputs.len(), "parsed inputs");

    let response = calculator.calculate(formula_id, &inputs)?;
    print_json(&Envelope::ok(response), cli.pretty);
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let message = e.to_string();
            let first_line = message.lines().next().unwrap_or("Invalid arguments");
            print_json(&Envelope::err(first_line, None), false);
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.verbose);

    let outcome = match &cli.command {
        Commands::Formulas => {
            print_json(&Envelope::ok(list_formulas()), cli.pretty);
            Ok(())
        }
        Commands::Calculate { formula_id, inputs } => run_calculate(&cli, formula_id, inputs),
        Commands::Docs => {
            print!("{}", generate_formulas_markdown());
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, cli.pretty);
            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &CalcError, pretty: bool) {
    debug!(code = error.error_code(), "command failed");
    print_json(&Envelope::err(error.to_string(), Some(error.error_code())), pretty);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_calculate() {
        let cli = Cli::try_parse_from(["hydro", "calculate", "tank_volume", "{}", "--pretty"]).unwrap();
        assert!(cli.pretty);
        match cli.command {
            Commands::Calculate { formula_id, inputs } => {
                assert_eq!(formula_id, "tank_volume");
                assert_eq!(inputs, "{}");
            }
            _ => panic!("expected calculate"),
        }
    }

    #[test]
    fn test_calculate_requires_inputs() {
        assert!(Cli::try_parse_from(["hydro", "calculate", "tank_volume"]).is_err());
    }

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][1], 2);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let error = CalcError::unknown_formula("foo");
        let json = serde_json::to_value(Envelope::err(error.to_string(), Some(error.error_code()))).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Unknown formula ID: foo");
        assert_eq!(json["code"], "UNKNOWN_FORMULA");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_default_calculator_without_settings() {
        let calculator = build_calculator(None).unwrap();
        assert_eq!(calculator, HydraulicCalculator::default());
    }
}
