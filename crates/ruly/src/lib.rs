//! Rule-table driven lexing and shift-reduce parsing.
//!
//! A grammar is three ordered tables: lexical rules, reduction rules and an
//! operator precedence table. [`Lexer`] turns the lexical rules into a lazy
//! token stream, [`Parser`] drives a shift-reduce loop over that stream and
//! returns the single fully-reduced token.

pub mod grammar;
pub mod lexer;
pub mod parser;

pub use crate::grammar::{Assoc, LexRule, OpPrecedence, ParseRule, Token};
pub use crate::lexer::{LexError, Lexer};
pub use crate::parser::{ParseError, Parser};
