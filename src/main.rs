mod debug_report;

use designate::{Backend, Dataset, Options, Parser};
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATASET: &str = "data/company_designator.yml";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let parser = match load_parser(&config) {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let inputs = match config.input.clone() {
        Some(input) => vec![input],
        None => match read_stdin_lines() {
            Ok(lines) if !lines.is_empty() => lines,
            Ok(_) => {
                eprintln!("error: no input provided\n\n{}", help_text());
                std::process::exit(2);
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
    };

    for input in &inputs {
        match config.output {
            Output::Verbose => debug_report::print_run(&parser.parse_verbose(input), config.color),
            Output::Yaml => {
                if let Err(err) = debug_report::print_yaml(&parser.parse(input)) {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
            Output::Line => debug_report::print_line(&parser.parse(input), config.color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Line,
    Verbose,
    Yaml,
}

struct CliConfig {
    input: Option<String>,
    dataset: PathBuf,
    backend: Backend,
    output: Output,
    color: bool,
}

fn load_parser(config: &CliConfig) -> Result<Parser, designate::Error> {
    let dataset = Dataset::from_path(&config.dataset)?;
    tracing::info!(path = %config.dataset.display(), entries = dataset.len(), "dataset loaded");
    Parser::with_options(&dataset, Options::default().with_backend(config.backend))
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut dataset = PathBuf::from(DEFAULT_DATASET);
    let mut backend = Backend::default();
    let mut output = Output::Line;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("designate {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--verbose" | "-v" => output = Output::Verbose,
            "--yaml" => output = Output::Yaml,
            "--dataset" | "-d" => {
                let value = args.next().ok_or_else(|| "error: --dataset expects a value".to_string())?;
                dataset = PathBuf::from(value);
            }
            "--backend" => {
                let value = args.next().ok_or_else(|| "error: --backend expects a value".to_string())?;
                backend = parse_backend(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--dataset=") => {
                dataset = PathBuf::from(arg.trim_start_matches("--dataset="));
            }
            _ if arg.starts_with("--backend=") => {
                backend = parse_backend(arg.trim_start_matches("--backend="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    if input.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, dataset, backend, output, color })
}

fn parse_backend(value: &str) -> Result<Backend, String> {
    match value {
        "regex" => Ok(Backend::Regex),
        "set" => Ok(Backend::Set),
        _ => Err(format!("error: invalid --backend '{value}' (expected regex or set)")),
    }
}

/// One company name per non-blank line.
fn read_stdin_lines() -> Result<Vec<String>, String> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.map_err(|err| format!("error: failed to read stdin: {err}"))?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "designate {version}

Split company names into a short name and a legal-form designator.

Usage:
  designate [OPTIONS] [--] <name...>
  designate [OPTIONS] --input <name>
  designate [OPTIONS] < names.txt

Options:
  -i, --input <name>         Company name to parse. If omitted, reads remaining args
                             or one name per line from stdin.
  -d, --dataset <path>       Designator dataset (YAML).
                             Default: {default_dataset}
  --backend <regex|set>      Matcher backend. Default: regex
  -v, --verbose              Print the per-tier trace for each name.
  --yaml                     Print each result as a YAML document.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter for diagnostics on stderr (e.g. designate=debug).

Exit codes:
  0  Success.
  1  Dataset or pattern compilation error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_dataset = DEFAULT_DATASET
    )
}
