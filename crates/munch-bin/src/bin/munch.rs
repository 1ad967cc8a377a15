use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{error::ErrorKind, Parser, ValueEnum};
use munch_lex::{parse_grammar, LexerOptions, Scanner, TieBreak};
use petgraph::dot::Dot;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read grammar file {}", path.display())]
    GrammarUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read source file {}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TieBreakArg {
    /// Lower category ordinal wins (KEYWORD first, UNKNOWN last)
    Ordinal,
    /// The rule declared first wins
    FirstDeclared,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> TieBreak {
        match arg {
            TieBreakArg::Ordinal => TieBreak::CategoryOrdinal,
            TieBreakArg::FirstDeclared => TieBreak::FirstDeclared,
        }
    }
}

/// Tokenize a text file with a minimized automaton built from literal
/// pattern rules.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Grammar file, one `CATEGORY -> pattern` rule per line
    grammar: PathBuf,

    /// Text file to tokenize
    source: PathBuf,

    /// How a pattern claimed by several categories is resolved
    #[arg(long, value_enum, default_value_t = TieBreakArg::Ordinal)]
    tie_break: TieBreakArg,

    /// Print the minimized transition table to stderr
    #[arg(long)]
    dump_table: bool,

    /// Print the minimized automaton as Graphviz DOT to stderr
    #[arg(long)]
    dot: bool,
}

/// Enable with `RUST_LOG=munch_lex=debug` and friends; logs go to stderr.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // both inputs must be readable before anything gets built; bytes that are
    // not UTF-8 decode to U+FFFD and surface later as lexical errors
    let grammar = fs::read(&args.grammar).map_err(|source| CliError::GrammarUnreadable {
        path: args.grammar.clone(),
        source,
    })?;
    let source = fs::read(&args.source).map_err(|source| CliError::SourceUnreadable {
        path: args.source.clone(),
        source,
    })?;
    let grammar = String::from_utf8_lossy(&grammar);
    let source = String::from_utf8_lossy(&source);

    let rules = parse_grammar(&grammar);
    let options = LexerOptions {
        tie_break: args.tie_break.into(),
    };
    let scanner = Scanner::from_rules(&rules, options);

    if args.dump_table {
        eprintln!("{}", scanner.automaton());
    }
    if args.dot {
        eprintln!("{}", Dot::with_config(&scanner.automaton().to_graph(), &[]));
    }

    let mut out = BufWriter::new(io::stdout().lock());
    let mut tokens = 0usize;
    let mut lexical_errors = 0usize;
    for result in scanner.tokens(&source) {
        match result {
            Ok(token) => {
                writeln!(out, "{token}")?;
                tokens += 1;
            }
            Err(e) => {
                eprintln!("{e}");
                lexical_errors += 1;
            }
        }
    }
    out.flush()?;

    tracing::info!(tokens, lexical_errors, "scan finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
