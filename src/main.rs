use clap::{Parser, Subcommand};
use colored::Colorize;
use covm_semantics::config::{self, CONFIG};
use covm_semantics::conformance::{run_suite, ConformanceSuite, Outcome, Step, SuiteReport};
use covm_semantics::vm::{ExecutionContext, MemorySnapshot, Op, VMError};
use covm_semantics::word::{format_word, OutputFormat};
use log::debug;
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("VM error: {0}")]
    VM(#[from] VMError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::Other(s.to_string())
    }
}

/// Reference semantics for the 256-bit word machine
#[derive(Debug, Parser)]
#[command(name = "covm-semantics", version, about)]
struct Cli {
    /// Display detailed execution information
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// How to print words (hex or decimal); overrides COVM_OUTPUT_FORMAT
    #[arg(short, long, global = true, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Memory ceiling in bytes; overrides COVM_MEMORY_LIMIT
    #[arg(long, global = true, value_name = "BYTES")]
    memory_limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one operation in a fresh context
    Eval {
        /// Operation mnemonic, e.g. sdiv
        op: String,

        /// Operands, top of stack first (decimal, 0x-hex, or negative)
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Evaluate a sequence of "op arg arg" steps sharing one memory
    Steps {
        #[arg(required = true, allow_hyphen_values = true)]
        steps: Vec<String>,
    },

    /// Run a conformance-vector file
    Check {
        /// JSON vector file
        #[arg(required_unless_present = "builtin")]
        file: Option<PathBuf>,

        /// Run the vectors shipped with this crate
        #[arg(long, conflicts_with = "file")]
        builtin: bool,
    },

    /// List every operation with its opcode and arity
    Ops,
}

/// Settings after merging the environment and the command line
struct Settings {
    verbose: bool,
    json: bool,
    format: OutputFormat,
    memory_limit: Option<usize>,
}

#[derive(Serialize)]
struct StepOutput {
    op: Op,
    args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
}

#[derive(Serialize)]
struct StepsOutput {
    steps: Vec<StepOutput>,
    memory: MemorySnapshot,
}

#[derive(Serialize)]
struct OpInfo {
    mnemonic: &'static str,
    opcode: String,
    arity: usize,
    produces_value: bool,
    touches_memory: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    config::init();

    let settings = Settings {
        verbose: cli.verbose,
        json: cli.json,
        format: cli.format.unwrap_or(CONFIG.output_format),
        memory_limit: cli.memory_limit.or(CONFIG.memory_limit),
    };
    debug!(
        "output format {}, memory limit {:?}",
        settings.format, settings.memory_limit
    );

    let result = match cli.command {
        Command::Eval { op, args } => run_eval(&settings, &op, &args),
        Command::Steps { steps } => run_steps(&settings, &steps),
        Command::Check { file, builtin } => run_check(&settings, file, builtin),
        Command::Ops => run_ops(&settings),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn run_eval(settings: &Settings, op: &str, args: &[String]) -> Result<bool, AppError> {
    let mut step_text = vec![op.to_string()];
    step_text.extend(args.iter().cloned());
    run_steps(settings, &[step_text.join(" ")])
}

fn run_steps(settings: &Settings, steps: &[String]) -> Result<bool, AppError> {
    let mut ctx = ExecutionContext::with_memory_limit(settings.memory_limit);
    let mut outputs = Vec::with_capacity(steps.len());

    for text in steps {
        let step = Step::parse(text)?;
        let operands = step.operands()?;
        let result = ctx.evaluate(step.op, &operands)?;

        outputs.push(StepOutput {
            op: step.op,
            args: step.args,
            result: result.map(|value| format_word(value, settings.format)),
        });
    }

    let memory = ctx.memory();
    if settings.json {
        let output = StepsOutput {
            steps: outputs,
            memory: memory.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(true);
    }

    let single = outputs.len() == 1;
    for output in &outputs {
        match (&output.result, single) {
            (Some(value), true) => println!("{}", value),
            (Some(value), false) => {
                println!("{} {} => {}", output.op, output.args.join(" "), value)
            }
            (None, _) => println!("{} {}", output.op, output.args.join(" ")),
        }
    }

    let touched_memory = !memory.as_bytes().is_empty();
    let stored = outputs.iter().any(|o| o.result.is_none());
    if touched_memory && (settings.verbose || !single || stored) {
        println!("{}", memory);
        println!("Digest: {}", memory.digest());
    }

    Ok(true)
}

fn run_check(settings: &Settings, file: Option<PathBuf>, builtin: bool) -> Result<bool, AppError> {
    let suite = match (file, builtin) {
        (_, true) => ConformanceSuite::builtin()?,
        (Some(path), false) => ConformanceSuite::load(path)?,
        (None, false) => return Err("no vector file given".into()),
    };

    let report = run_suite(&suite, settings.memory_limit);

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, settings.verbose);
    }

    Ok(report.all_passed())
}

fn print_report(report: &SuiteReport, verbose: bool) {
    for result in &report.results {
        match &result.outcome {
            Outcome::Pass => {
                if verbose {
                    println!("{} {}", "PASS".green(), result.name);
                }
            }
            Outcome::Fail { reasons } => {
                println!("{} {}", "FAIL".red().bold(), result.name);
                for reason in reasons {
                    println!("     {}", reason);
                }
            }
            Outcome::Error { message } => {
                println!("{} {}", "ERROR".yellow().bold(), result.name);
                println!("     {}", message);
            }
        }
    }

    let summary = format!("{} passed, {} failed", report.passed, report.failed);
    if report.all_passed() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

fn run_ops(settings: &Settings) -> Result<bool, AppError> {
    let infos: Vec<OpInfo> = Op::ALL
        .iter()
        .map(|op| OpInfo {
            mnemonic: op.mnemonic(),
            opcode: format!("{:#04x}", op.opcode()),
            arity: op.arity(),
            produces_value: op.produces_value(),
            touches_memory: op.touches_memory(),
        })
        .collect();

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(true);
    }

    for info in &infos {
        let memory = if info.touches_memory { " (memory)" } else { "" };
        println!(
            "{}  {:<10} arity {}{}",
            info.opcode, info.mnemonic, info.arity, memory
        );
    }

    Ok(true)
}
