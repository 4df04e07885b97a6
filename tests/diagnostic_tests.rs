//! Tests for diagnostic output.
//!
//! These render errors through miette's graphical handler without colour and check
//! the parts a reader relies on: the error code, the label and the attempt tree.

use ash::errors::attempt_tree;
use ash::{AshError, ErrorKind, Grammar};
use miette::{GraphicalReportHandler, GraphicalTheme};

/// Test helper to capture diagnostic output as a string.
fn render(error: &AshError) -> String {
    let mut out = String::new();
    GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut out, error)
        .unwrap();
    out
}

fn parse_error(input: &str) -> AshError {
    Grammar::new().parse(input).unwrap_err()
}

#[test]
fn test_trailing_input_diagnostic() {
    let error = parse_error("shi vene $$$");
    let output = render(&error);

    assert!(output.contains("ash::parse::trailing_input"), "{}", output);
    assert!(output.contains("not part of the sentence"), "{}", output);
    assert!(output.contains("end of input"), "{}", output);
    assert!(output.contains("shi vene $$$"), "{}", output);
}

#[test]
fn test_syntax_diagnostic_points_at_the_end() {
    let error = parse_error("shi vene shae ko");
    let output = render(&error);

    assert!(output.contains("ash::parse::syntax"), "{}", output);
    assert!(output.contains("sentence ends here"), "{}", output);
    assert!(output.contains("noun"), "{}", output);
}

#[test]
fn test_unexpected_character_is_named() {
    let error = parse_error("shi Vene");
    match &error.kind {
        ErrorKind::Syntax { found, column, .. } => {
            assert_eq!(*found, Some('V'));
            assert_eq!(*column, 5);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
    assert!(render(&error).contains("unexpected 'V'"));
}

#[test]
fn test_help_is_the_attempt_tree() {
    let error = parse_error("shi");
    let help = error.diagnostic_info.help.clone().unwrap();
    assert_eq!(help, attempt_tree(1, 4, error.expected()));
    assert!(help.starts_with("at line 1, column 4, the parser tried:"));
}

#[test]
fn test_display_is_single_line() {
    let error = parse_error("shi vene $$$");
    let message = error.to_string();
    assert!(!message.contains('\n'));
    assert!(message.starts_with("Syntax error at line 1, column 10"));
}
