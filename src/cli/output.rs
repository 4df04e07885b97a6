//! Handles all user-facing output for the CLI.
//!
//! Trees are printed as JSON on stdout; pass/fail lines are coloured when the
//! terminal supports it. Diagnostics go to stderr through miette.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Tree;

/// Renders a tree as JSON, pretty unless `compact`.
pub fn render_tree(tree: &Tree, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(tree)
    } else {
        serde_json::to_string_pretty(tree)
    };
    rendered.expect("a tree holds only strings, arrays and objects")
}

pub fn print_tree(tree: &Tree, compact: bool) {
    println!("{}", render_tree(tree, compact));
}

/// Prints one line of a check run.
pub fn print_check(line_number: usize, sentence: &str, passed: bool) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let (mark, color) = if passed {
        ("✓", Color::Green)
    } else {
        ("✗", Color::Red)
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)));
    let _ = write!(stdout, "{}", mark);
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {:>4}: {}", line_number, sentence);
}

pub fn print_summary(passed: usize, failed: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_bold(true));
    let _ = writeln!(stdout, "\nSummary");
    let _ = stdout.reset();
    if passed > 0 {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = writeln!(stdout, "✓ Passed: {} sentences", passed);
        let _ = stdout.reset();
    }
    if failed > 0 {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(stdout, "✗ Failed: {} sentences", failed);
        let _ = stdout.reset();
    }
}
