//! Grammar types.

use regex::Regex;
use std::fmt;

/// A grammar symbol together with its semantic payload.
///
/// `kind` is the symbol name used for matching against rule tables; `value`
/// is caller-defined data carried through reductions and never inspected by
/// the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V> {
    pub kind: &'static str,
    pub value: V,
}

impl<V> Token<V> {
    pub fn new(kind: &'static str, value: V) -> Self {
        Self { kind, value }
    }
}

impl<V> fmt::Display for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind)
    }
}

/// A single lexical rule: a pattern matched against the start of the
/// remaining input, and a handler mapping the matched text to a token.
///
/// A handler returning `None` consumes the match without producing a token
/// (e.g. whitespace).
pub struct LexRule<V> {
    pattern: Regex,
    handler: Box<dyn Fn(&str) -> Option<Token<V>> + Send + Sync>,
}

impl<V> LexRule<V> {
    /// Compile `pattern` anchored to the start of the haystack, so that the
    /// rule only ever matches a prefix of the remaining input.
    pub fn new<F>(pattern: &str, handler: F) -> Result<Self, regex::Error>
    where
        F: Fn(&str) -> Option<Token<V>> + Send + Sync + 'static,
    {
        let pattern = Regex::new(&format!(r"\A(?:{pattern})"))?;
        Ok(Self {
            pattern,
            handler: Box::new(handler),
        })
    }

    /// Length of the prefix matched by this rule, if any.
    ///
    /// An empty match is treated as no match, so that the lexer always makes
    /// progress.
    pub(crate) fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern.find(input).map(|m| m.end()).filter(|&n| n > 0)
    }

    pub(crate) fn emit(&self, matched: &str) -> Option<Token<V>> {
        (self.handler)(matched)
    }
}

impl<V> fmt::Debug for LexRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexRule")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// A reduction rule of the shift-reduce parser.
///
/// When the kinds of the topmost `inputs.len()` stack entries equal `inputs`
/// (oldest first), the rule may fire: the entries are popped, passed to the
/// handler in the same order, and replaced by the single token it returns.
pub struct ParseRule<V> {
    operator: Option<&'static str>,
    inputs: Vec<&'static str>,
    handler: Box<dyn Fn(Vec<Token<V>>) -> Token<V> + Send + Sync>,
}

impl<V> ParseRule<V> {
    /// A rule with no operator tag. It reduces unconditionally whenever its
    /// `inputs` pattern matches, bypassing precedence comparison entirely.
    pub fn new<I, F>(inputs: I, handler: F) -> Self
    where
        I: Into<Vec<&'static str>>,
        F: Fn(Vec<Token<V>>) -> Token<V> + Send + Sync + 'static,
    {
        Self {
            operator: None,
            inputs: inputs.into(),
            handler: Box::new(handler),
        }
    }

    /// Tag this rule with the operator used for shift/reduce disambiguation.
    pub fn prec(mut self, operator: &'static str) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn operator(&self) -> Option<&'static str> {
        self.operator
    }

    pub fn inputs(&self) -> &[&'static str] {
        &self.inputs
    }

    pub(crate) fn reduce(&self, args: Vec<Token<V>>) -> Token<V> {
        (self.handler)(args)
    }
}

impl<V> fmt::Debug for ParseRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseRule")
            .field("operator", &self.operator)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

/// One tier of the operator precedence table.
///
/// The table is an ordered sequence of tiers; earlier tiers bind more
/// loosely than later ones. An operator belongs to at most one tier. An
/// operator absent from every tier never defers a reduction to a shift.
#[derive(Debug, Clone)]
pub struct OpPrecedence {
    pub assoc: Assoc,
    pub operators: &'static [&'static str],
}

impl OpPrecedence {
    pub const fn new(assoc: Assoc, operators: &'static [&'static str]) -> Self {
        Self { assoc, operators }
    }

    pub(crate) fn contains(&self, operator: &str) -> bool {
        self.operators.contains(&operator)
    }
}

/// Associativity of a precedence tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

impl fmt::Display for Assoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_rule_matches_only_at_start() {
        let rule: LexRule<()> = LexRule::new(r"\d+", |_| None).unwrap();
        assert_eq!(rule.match_len("42abc"), Some(2));
        assert_eq!(rule.match_len("abc42"), None);
    }

    #[test]
    fn empty_match_is_no_match() {
        let rule: LexRule<()> = LexRule::new(r"\d*", |_| None).unwrap();
        assert_eq!(rule.match_len("abc"), None);
        assert_eq!(rule.match_len("7abc"), Some(1));
    }
}
