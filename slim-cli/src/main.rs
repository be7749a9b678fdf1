//! slim command-line interface
//!
//! Reads an HTML or CSS document from a file or stdin and writes its reduced
//! form to a file or stdout.

mod config;
mod stats;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use slim_common::warning::{clear_warnings, set_warnings_enabled};
use slim_css::reduce_css;
use slim_html::reduce_html;

use config::FileConfig;
use stats::{Counter, Stats};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "slim", version, about = "Reduce the size of HTML and CSS documents")]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print `ratio<TAB>read<TAB>written` to stderr when done
    #[arg(long)]
    stats: bool,

    /// Treat the input as CSS (implied by a .css input file)
    #[arg(long)]
    css: bool,

    /// JSON file with base options: {"html": {...}, "css": {...}}
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep HTML comments
    #[arg(long)]
    keep_comments: bool,

    /// Do not insert readability newlines into HTML
    #[arg(long)]
    no_html_newlines: bool,

    /// Treat HTML CDATA sections as text instead of comments
    #[arg(long)]
    html_cdata: bool,

    /// Write a newline after every CSS rule
    #[arg(long)]
    css_newlines: bool,

    /// Keep CSS comments starting with /*!
    #[arg(long)]
    keep_excl_comments: bool,

    /// Do not print tokenizer warnings
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Html,
    Css,
}

impl Cli {
    fn mode(&self) -> Mode {
        let css_file = self
            .input
            .as_deref()
            .and_then(Path::extension)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css"));
        if self.css || css_file {
            Mode::Css
        } else {
            Mode::Html
        }
    }

    /// The config file's options with the flags applied on top.
    fn options(&self) -> Result<FileConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        if self.keep_comments {
            config.html.strip_comments = false;
        }
        if self.no_html_newlines {
            config.html.extra_newlines = false;
        }
        if self.html_cdata {
            config.html.allow_cdata = true;
        }
        if self.css_newlines {
            config.css.line_breaks_after_rules = true;
        }
        if self.keep_excl_comments {
            config.css.keep_exclamation_comments = true;
        }
        Ok(config)
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(cli: &Cli) -> Result<Option<Stats>> {
    set_warnings_enabled(!cli.quiet);
    clear_warnings();
    let config = cli.options()?;

    let mut source = Counter::new(open_input(cli.input.as_deref())?);
    let mut sink = Counter::new(open_output(cli.output.as_deref())?);
    match cli.mode() {
        Mode::Html => reduce_html(&mut sink, &mut source, &config.html)?,
        Mode::Css => reduce_css(&mut sink, &mut source, &config.css)?,
    }
    sink.flush().context("failed to write output")?;

    Ok(cli.stats.then_some(Stats {
        read: source.count(),
        written: sink.count(),
    }))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(stats) => {
            if let Some(stats) = stats {
                eprintln!("\n{stats}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("slim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_mode_from_flag_and_extension() {
        assert_eq!(parse(&[]).mode(), Mode::Html);
        assert_eq!(parse(&["--css"]).mode(), Mode::Css);
        assert_eq!(parse(&["-i", "site/main.CSS"]).mode(), Mode::Css);
        assert_eq!(parse(&["-i", "index.html"]).mode(), Mode::Html);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&["--keep-comments", "--no-html-newlines", "--css-newlines"])
            .options()
            .unwrap();
        assert!(!config.html.strip_comments);
        assert!(!config.html.extra_newlines);
        assert!(!config.html.allow_cdata);
        assert!(config.css.line_breaks_after_rules);
        assert!(!config.css.keep_exclamation_comments);
    }
}
