//! Front end for a small expression language: a line-oriented scanner, a
//! recursive-descent parser, and a prefix-form printer for the resulting
//! tree.
//!
//! ```
//! let state = lox_front::scan_source("(1 + 2) * 3");
//! assert!(!state.has_errors());
//!
//! let e = lox_front::parse(state.into_token_stream()).unwrap();
//! assert_eq!(
//!     "(* ((group (+ (1.000000 2.000000))) 3.000000))",
//!     lox_front::render(&e)
//! );
//! ```

pub mod error;
pub mod expr;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod state;
pub mod token;
pub mod value;

pub use crate::{
    error::{Error, ErrorKind, Result},
    expr::{Expr, Visitor},
    parser::{parse, Parser, ParserConfig, StartPolicy, TokenStream},
    printer::render,
    scanner::{scan, scan_source},
    state::ExecutionState,
    token::{Token, TokenKind},
    value::Literal,
};
