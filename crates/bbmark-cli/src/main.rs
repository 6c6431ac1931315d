use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process;

use bbmark_core::{ParamGrammar, TransformOptions, Transformed, Transformer};
use bbmark_renderer::{Renderer, Theme};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BBMARK_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),
    #[error("{0}")]
    Usage(String),
    #[error("failed to write output: {0}")]
    Write(io::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy)]
enum ReportMode {
    Json,
    Pretty,
}

struct Args {
    input: Option<String>,
    raw: bool,
    theme: Theme,
    options: TransformOptions,
    report: Option<ReportMode>,
    deny_unclosed: bool,
}

fn main() {
    init_tracing();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{}", err);
            if let CliError::Usage(_) = err {
                print_usage();
            }
            process::exit(err.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<i32, CliError> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        print_usage();
        return Ok(0);
    };

    let source = match &args.input {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            buffer
        }
    };

    let result = Transformer::new(args.options).transform(&source);
    debug!(raw = args.raw, "rendering output");

    let output = if args.raw {
        result.html.clone()
    } else {
        Renderer::new(args.theme).embed_html(&result.html, true)
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(CliError::Write)?;

    if let Some(mode) = args.report {
        emit_report(&result, mode);
    }

    if args.deny_unclosed && !result.unclosed.is_empty() {
        return Ok(1);
    }
    Ok(0)
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>, CliError> {
    let mut args = Args {
        input: None,
        raw: false,
        theme: Theme::Auto,
        options: TransformOptions::default(),
        report: None,
        deny_unclosed: false,
    };

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--raw" => args.raw = true,
            "--strict-params" => args.options.param_grammar = ParamGrammar::Strict,
            "--deny-unclosed" => args.deny_unclosed = true,
            "--theme" => {
                args.theme = argv
                    .next()
                    .as_deref()
                    .and_then(Theme::from_name)
                    .ok_or_else(|| CliError::Usage("--theme expects: auto | light | dark".into()))?;
            }
            "--max-depth" => {
                args.options.max_depth = argv
                    .next()
                    .and_then(|value| value.parse::<usize>().ok())
                    .filter(|depth| *depth > 0)
                    .ok_or_else(|| {
                        CliError::Usage("--max-depth expects a positive integer".into())
                    })?;
            }
            "--unclosed" => {
                let mode = match argv.next().as_deref() {
                    Some("json") => ReportMode::Json,
                    Some("pretty") => ReportMode::Pretty,
                    _ => return Err(CliError::Usage("--unclosed expects: json | pretty".into())),
                };
                args.report = Some(mode);
            }
            _ if arg.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option: {}", arg)));
            }
            _ => {
                if args.input.is_some() {
                    return Err(CliError::Usage(format!("unexpected argument: {}", arg)));
                }
                args.input = Some(arg);
            }
        }
    }

    Ok(Some(args))
}

fn print_usage() {
    eprintln!(
        "Usage: bbmark [--raw] [--theme auto|light|dark] [--strict-params] [--max-depth N] [--unclosed json|pretty] [--deny-unclosed] [input]"
    );
}

fn emit_report(result: &Transformed, mode: ReportMode) {
    match mode {
        ReportMode::Json => {
            let report = serde_json::json!({
                "unclosed": result.unclosed,
                "depthLimited": result.depth_limited,
            });
            eprintln!("{}", report);
        }
        ReportMode::Pretty => {
            for name in &result.unclosed {
                eprintln!("warning: unclosed tag [{}]", name);
            }
            if result.depth_limited {
                eprintln!("warning: nesting limit reached, remaining tags left as text");
            }
        }
    }
}
