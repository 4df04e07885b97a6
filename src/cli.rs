//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

pub mod args;
pub mod output;

use std::path::Path;
use std::process;
use std::sync::Once;

use clap::Parser;
use tracing::debug;

use crate::{
    errors::{print_error, ErrorReporting, ParseContext, SourceContext},
    AshError, Grammar,
};

use self::args::{AshArgs, Command};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Only active when `RUST_LOG` is set, e.g. `RUST_LOG=ash=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = AshArgs::parse();
    let grammar = Grammar::new();

    match args.command {
        Command::Parse { sentence, compact } => match grammar.parse(&sentence) {
            Ok(tree) => output::print_tree(&tree, compact),
            Err(e) => {
                print_error(e);
                process::exit(1);
            }
        },

        Command::File { file, compact } => {
            let source = read_file_or_exit(&file);
            let mut failed = 0;
            for (line_number, sentence) in sentence_lines(&source) {
                match parse_line(&grammar, &file, line_number, sentence) {
                    Ok(tree) => output::print_tree(&tree, compact),
                    Err(e) => {
                        failed += 1;
                        print_error(e);
                    }
                }
            }
            if failed > 0 {
                process::exit(1);
            }
        }

        Command::Check { file } => {
            let source = read_file_or_exit(&file);
            let mut passed = 0;
            let mut failed = 0;
            for (line_number, sentence) in sentence_lines(&source) {
                match parse_line(&grammar, &file, line_number, sentence) {
                    Ok(_) => {
                        passed += 1;
                        output::print_check(line_number, sentence, true);
                    }
                    Err(e) => {
                        failed += 1;
                        output::print_check(line_number, sentence, false);
                        print_error(e);
                    }
                }
            }
            output::print_summary(passed, failed);
            if failed > 0 {
                process::exit(1);
            }
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Yields `(line number, sentence)` for every line that holds a sentence.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Line numbers are
/// 1-based and count skipped lines too.
pub fn sentence_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_line(
    grammar: &Grammar,
    file: &Path,
    line_number: usize,
    sentence: &str,
) -> Result<crate::Tree, AshError> {
    debug!(line = line_number, "parsing file line");
    grammar
        .parse(sentence)
        .map_err(|e| e.with_source_name(format!("{}:{}", file.display(), line_number)))
}

fn read_file(path: &Path) -> Result<String, AshError> {
    std::fs::read_to_string(path).map_err(|e| {
        ParseContext::new(SourceContext::default(), "cli")
            .io_error(&path.display().to_string(), &e.to_string())
    })
}

fn read_file_or_exit(path: &Path) -> String {
    read_file(path).unwrap_or_else(|e| {
        print_error(e);
        process::exit(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_lines_skip_comments_and_blanks() {
        let source = "# greetings\nshi vene\n\n   \n  vese ses  \n#ka shae vesem ses\n";
        let lines: Vec<_> = sentence_lines(source).collect();
        assert_eq!(lines, vec![(2, "shi vene"), (5, "vese ses")]);
    }

    #[test]
    fn parse_line_names_the_source_after_the_file() {
        let grammar = Grammar::new();
        let error = parse_line(&grammar, Path::new("story.ash"), 7, "shi").unwrap_err();
        assert_eq!(error.source_info.source.name(), "story.ash:7");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = read_file(Path::new("does/not/exist.ash")).unwrap_err();
        assert_eq!(error.category(), crate::ErrorCategory::Io);
    }
}
