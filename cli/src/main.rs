mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reformat::{Config, Error, Rewrite};
use specdoc::{Document, Heading, Notice, extract_headings};

const SUBCOMMANDS: &[&str] = &["enhance", "format", "test", "help"];

#[derive(Parser)]
#[command(name = "specfmt", version, about = "Specification document formatter")]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    /// Log every pass (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a table of contents, code tags, dividers and emphasis to a formatted document
    Enhance(RewriteArgs),

    /// Normalize headings and block spacing of a raw document
    Format(RewriteArgs),

    /// Run .test.md fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RewriteArgs {
    /// Markdown file to read
    input: Option<PathBuf>,

    /// File to write (enhance: `_formatted` -> `_enhanced`; format: the input)
    output: Option<PathBuf>,

    /// TOML file overriding keywords, TOC title and wrap width
    #[arg(long)]
    config: Option<PathBuf>,

    /// Don't write anything; exit 1 if the document would change
    #[arg(long)]
    check: bool,

    /// Print the heading outline and exit
    #[arg(long)]
    list_headings: bool,

    /// Suppress the progress summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or a directory containing them
    path: PathBuf,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(Debug, Clone, Copy)]
enum Pipeline {
    Enhance,
    Format,
}

impl Pipeline {
    fn default_input(self) -> &'static str {
        match self {
            Pipeline::Enhance => "docs/spec_formatted.md",
            Pipeline::Format => "docs/spec.md",
        }
    }

    fn default_output(self, input: &Path) -> PathBuf {
        match self {
            Pipeline::Enhance => reformat::fs::enhanced_path(input),
            Pipeline::Format => input.to_path_buf(),
        }
    }

    fn run(self, source: &str, config: &Config) -> Result<Rewrite, Error> {
        match self {
            Pipeline::Enhance => reformat::enhance(source, config),
            Pipeline::Format => Ok(reformat::format(source, config)),
        }
    }
}

fn main() {
    let cli = Cli::parse_from(with_default_subcommand(std::env::args().collect()));
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Command::Enhance(args) => do_rewrite(Pipeline::Enhance, args, cli.no_color),
        Command::Format(args) => do_rewrite(Pipeline::Format, args, cli.no_color),
        Command::Test(args) => {
            if args.list_categories {
                test_runner::list_categories(&args.path);
                return;
            }
            Ok(test_runner::run_tests(&args.path, cli.no_color, &args.category))
        }
    };

    match exit_code {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

/// `specfmt in.md out.md`, `specfmt --check in.md` and a bare `specfmt` mean
/// `specfmt enhance ...`.
///
/// `enhance` goes right after the program name so every following flag is
/// parsed as an enhance flag; `--no-color` and `-v` are global and still
/// apply.
fn with_default_subcommand(mut args: Vec<String>) -> Vec<String> {
    let has_subcommand = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .is_some_and(|a| SUBCOMMANDS.contains(&a.as_str()));
    if has_subcommand {
        return args;
    }

    let has_positional = args.iter().skip(1).any(|a| !a.starts_with('-'));
    let wants_info = args
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));
    if has_positional || !wants_info {
        args.insert(1.min(args.len()), "enhance".to_string());
    }
    args
}

fn init_tracing(verbose: bool) {
    // --verbose forces DEBUG, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn do_rewrite(pipeline: Pipeline, args: RewriteArgs, no_color: bool) -> Result<i32, Error> {
    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(pipeline.default_input()));
    let config = Config::load_or_default(args.config.as_deref())?;
    debug!(?pipeline, input = %input.display(), "starting");

    let source = reformat::fs::read_text(&input)?;

    if args.list_headings {
        print_headings(&extract_headings(&Document::parse(&source)));
        return Ok(0);
    }

    let summary = !args.quiet && !args.check;
    if summary {
        println!("Reading: {}", input.display());
    }

    let rewrite = pipeline.run(&source, &config)?;

    if args.check {
        return Ok(do_check(&input, &source, &rewrite, no_color));
    }

    let output = args
        .output
        .unwrap_or_else(|| pipeline.default_output(&input));
    if summary {
        println!("Writing: {}", output.display());
    }
    reformat::fs::write_text(&output, &rewrite.text)?;

    if summary {
        print_summary(pipeline, &source, &rewrite);
    }
    Ok(0)
}

fn do_check(input: &Path, source: &str, rewrite: &Rewrite, no_color: bool) -> i32 {
    let mut files = SimpleFiles::new();
    let file_id = files.add(input.display().to_string(), source.to_string());
    let notices = reformat::check::check(source, rewrite, file_id);
    emit_notices(&files, &notices, no_color);

    if notices.iter().any(Notice::is_error) {
        1
    } else {
        eprintln!("ok: {} is already formatted", input.display());
        0
    }
}

fn emit_notices(files: &SimpleFiles<String, String>, notices: &[Notice], no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for notice in notices {
        let diagnostic = notice.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}

fn print_summary(pipeline: Pipeline, source: &str, rewrite: &Rewrite) {
    match pipeline {
        Pipeline::Enhance => {
            println!("   Found {} headings", rewrite.headings.len());
            println!(
                "Enhancement complete: {} bytes -> {} bytes",
                source.len(),
                rewrite.text.len()
            );
        }
        Pipeline::Format => {
            let before = Document::parse(source).newline_count() as i64;
            let after = Document::parse(&rewrite.text).newline_count() as i64;
            println!("Formatting complete");
            println!("   Original lines: {}", before);
            println!("   Formatted lines: {}", after);
            println!("   Difference: {:+}", after - before);
        }
    }
}

fn print_headings(headings: &[Heading]) {
    for heading in headings {
        let pad = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        let marker = "#".repeat(usize::from(heading.level));
        println!("{}{} {}  (#{})", pad, marker, heading.title, heading.anchor());
    }
}
