//! # SDB Console
//!
//! Evaluates debugger expressions against a machine image from the command
//! line.

use clap::{Parser, Subcommand};
use sdb_console::{check_lines, MachineImage};
use sdb_expr::config::build_info;
use sdb_expr::machine::WORD_BYTES;
use sdb_expr::{log_info, logging, ExprEngine, ExprError, RuntimeConfig, Word};
use std::path::PathBuf;

/// Exit status is 2 for a malformed expression and 1 for any other failure.
#[derive(Parser, Debug)]
#[command(name = "sdb", version, about = "Simple debugger expression console")]
struct Cli {
    /// TOML machine image with registers and memory segments
    #[arg(short, long, value_name = "FILE", global = true)]
    image: Option<PathBuf>,

    /// TOML runtime configuration
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one expression
    Eval {
        /// Expression text; separate arguments are joined with spaces
        #[arg(required = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Check a file of `<expected> <expression>` lines
    Check { file: PathBuf },

    /// Print the disambiguated token stream
    Tokens {
        #[arg(required = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::default(),
    };
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    log_info!("SDB console starting", "build" => build_info::source_info());

    let image = match &cli.image {
        Some(path) => MachineImage::from_toml_file(path)?,
        None => MachineImage::default(),
    };
    let machine = image.build()?;
    log::debug!(
        "Machine ready: {} registers, {} memory segments",
        machine.registers.count(),
        machine.memory.segments().len()
    );
    let engine = ExprEngine::with_config(&config)?;

    match cli.command {
        Command::Eval { expression } => {
            let expression = expression.join(" ");
            match engine.evaluate(&expression, &machine.context()) {
                Ok(value) => println!("{} = {} ({})", expression, value, format_hex(value)),
                Err(error) => report_failure(&expression, &error),
            }
        }

        Command::Check { file } => {
            let text = std::fs::read_to_string(&file)?;
            let report = check_lines(&text, &engine, &machine.context());

            for failure in &report.failures {
                println!("FAIL {}", failure);
            }
            println!(
                "{} cases: {} passed, {} failed ({:.1}%)",
                report.total,
                report.passed,
                report.failed(),
                report.success_rate() * 100.0
            );

            log_info!("Batch check finished",
                "file" => file.display(),
                "passed" => report.passed,
                "failed" => report.failed()
            );
            if !report.all_passed() {
                std::process::exit(1);
            }
        }

        Command::Tokens { expression } => {
            let expression = expression.join(" ");
            match engine.tokenize(&expression) {
                Ok(tokens) => {
                    println!("{}", tokens.diagnostic());
                    for (index, token) in tokens.iter().enumerate() {
                        println!(
                            "{:>3}  {:<10} {:<12} {}",
                            index,
                            token.kind.as_str(),
                            token.text,
                            token.span
                        );
                    }
                }
                Err(error) => report_failure(&expression, &error),
            }
        }
    }

    Ok(())
}

/// Exit status for a malformed expression
const EXIT_SYNTAX: i32 = 2;

/// Exit status for a well-formed expression the machine state rejects
const EXIT_EVALUATION: i32 = 1;

fn exit_status(error: &ExprError) -> i32 {
    if error.is_structural() {
        EXIT_SYNTAX
    } else {
        EXIT_EVALUATION
    }
}

/// Print the error under the offending part of the expression and exit
fn report_failure(expression: &str, error: &ExprError) -> ! {
    let message = format!("[{}] {}", error.error_code(), error);
    match error.span() {
        Some(span) => eprint!("{}", span.format_pointer(expression, &message)),
        None => eprintln!("Error: {}", message),
    }
    std::process::exit(exit_status(error));
}

/// Zero-padded hex at the guest word width
fn format_hex(value: Word) -> String {
    format!("{:#0width$x}", value, width = 2 + WORD_BYTES * 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_separates_syntax_from_evaluation() {
        let machine = MachineImage::default().build().unwrap();
        let engine = ExprEngine::new().unwrap();

        let syntax = engine.evaluate("(1 + 2", &machine.context()).unwrap_err();
        assert_eq!(exit_status(&syntax), EXIT_SYNTAX);

        let lexical = engine.evaluate("1 @ 2", &machine.context()).unwrap_err();
        assert_eq!(exit_status(&lexical), EXIT_SYNTAX);

        let runtime = engine.evaluate("*0", &machine.context()).unwrap_err();
        assert_eq!(exit_status(&runtime), EXIT_EVALUATION);
    }

    #[test]
    fn test_word_width_hex() {
        assert_eq!(format_hex(0x10), format!("0x{:0width$x}", 0x10, width = WORD_BYTES * 2));
    }
}
