//! Parser generator: a shift-reduce loop driven by declarative rule tables.

use crate::grammar::{Assoc, OpPrecedence, ParseRule, Token};
use std::fmt;

/// A shift-reduce parser built from an ordered table of [`ParseRule`]s and
/// an operator precedence table.
///
/// Both tables are read-only and may be shared across any number of
/// independent [`parse`](Parser::parse) calls; the parse stack and lookahead
/// are private to each call.
pub struct Parser<V> {
    rules: Vec<ParseRule<V>>,
    precedence: Vec<OpPrecedence>,
}

impl<V> Parser<V> {
    pub fn new(rules: Vec<ParseRule<V>>, precedence: Vec<OpPrecedence>) -> Self {
        Self { rules, precedence }
    }

    fn tier_of(&self, operator: &str) -> Option<usize> {
        self.precedence.iter().position(|tier| tier.contains(operator))
    }

    /// Whether reducing with `operator` must wait until `lookahead` has been
    /// shifted: the lookahead sits in a strictly higher tier, or in the same
    /// right-associative tier. If either operator is absent from the table,
    /// the reduction goes ahead.
    fn prefers_shift(&self, operator: &str, lookahead: &str) -> bool {
        match (self.tier_of(operator), self.tier_of(lookahead)) {
            (Some(t1), Some(t2)) => {
                t1 < t2 || (t1 == t2 && self.precedence[t2].assoc == Assoc::Right)
            }
            _ => false,
        }
    }

    /// Consume the token stream and reduce it to a single token.
    ///
    /// The stream yields `Result` items so that a lazy lexer plugs in
    /// directly; a lexer failure surfaces as [`ParseError::Lex`] at the
    /// moment the offending token would be pulled.
    pub fn parse<I, E>(&self, tokens: I) -> Result<Token<V>, ParseError<V, E>>
    where
        I: IntoIterator<Item = Result<Token<V>, E>>,
        E: fmt::Display,
        V: fmt::Debug,
    {
        let mut tokens = tokens.into_iter();
        let mut stack: Vec<Token<V>> = vec![];
        let mut lookahead = tokens.next().transpose().map_err(ParseError::Lex)?;

        'step: loop {
            // Reduce attempt: first match candidate in declaration order
            // that is not deferred by precedence fires.
            for rule in &self.rules {
                let n = rule.inputs().len();
                if n > stack.len() {
                    continue;
                }
                let top = &stack[stack.len() - n..];
                if !top.iter().map(|t| t.kind).eq(rule.inputs().iter().copied()) {
                    continue;
                }
                if let (Some(op), Some(next)) = (rule.operator(), lookahead.as_ref()) {
                    if self.prefers_shift(op, next.kind) {
                        continue;
                    }
                }
                let args = stack.split_off(stack.len() - n);
                let reduced = rule.reduce(args);
                tracing::trace!("reduce {:?} -> {}", rule.inputs(), reduced.kind);
                stack.push(reduced);
                continue 'step;
            }

            // Shift-or-halt: only reached when no rule fired.
            match lookahead.take() {
                Some(token) => {
                    tracing::trace!("shift {}", token.kind);
                    stack.push(token);
                    lookahead = tokens.next().transpose().map_err(ParseError::Lex)?;
                }
                None if stack.len() > 1 => return Err(ParseError::Stuck { stack }),
                None => return stack.pop().ok_or(ParseError::EmptyInput),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError<V: fmt::Debug, E: fmt::Display> {
    /// The token stream itself failed.
    #[error("from lexer: {0}")]
    Lex(E),

    /// No reduction applies, no token remains to shift, and the stack has
    /// not collapsed to a single entry.
    #[error("no applicable rule, stack: {stack:?}")]
    Stuck { stack: Vec<Token<V>> },

    /// The token stream was empty from the start.
    #[error("empty input")]
    EmptyInput,
}
