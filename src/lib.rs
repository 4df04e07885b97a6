pub use crate::errors::{AshError, ErrorCategory, ErrorKind};
pub use crate::ast::{normalize, renormalize, Sentence, Tree};
pub use crate::syntax::parser::{parse, Grammar};

pub mod ast;
pub mod cli;
pub mod errors;
pub mod syntax;
