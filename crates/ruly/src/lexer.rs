//! Lexer generator: turns an ordered lex-rule table into a lazy token stream.

use crate::grammar::{LexRule, Token};

/// A tokenizer built from an ordered table of [`LexRule`]s.
///
/// The table is read-only and may be shared across any number of independent
/// [`tokenize`](Lexer::tokenize) calls.
pub struct Lexer<V> {
    rules: Vec<LexRule<V>>,
}

impl<V> Lexer<V> {
    pub fn new(rules: Vec<LexRule<V>>) -> Self {
        Self { rules }
    }

    /// Tokenize `input`, producing tokens on demand.
    ///
    /// The returned stream is finite and not restartable; call `tokenize`
    /// again to re-lex.
    pub fn tokenize<'a>(&'a self, input: &'a str) -> Tokens<'a, V> {
        Tokens {
            rules: &self.rules,
            rest: input,
            done: false,
        }
    }
}

/// Lazy token stream over one input string.
///
/// Rules are tried in declaration order at each position; the first whose
/// pattern matches a prefix of the remaining input wins. If no rule matches,
/// the stream yields a single [`LexError`] and ends.
pub struct Tokens<'a, V> {
    rules: &'a [LexRule<V>],
    rest: &'a str,
    done: bool,
}

impl<V> Iterator for Tokens<'_, V> {
    type Item = Result<Token<V>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        'scan: while !self.rest.is_empty() {
            for rule in self.rules {
                let Some(len) = rule.match_len(self.rest) else {
                    continue;
                };
                let (matched, rest) = self.rest.split_at(len);
                self.rest = rest;
                match rule.emit(matched) {
                    Some(token) => {
                        tracing::trace!("token {} from {:?}", token.kind, matched);
                        return Some(Ok(token));
                    }
                    // skipped text, e.g. whitespace
                    None => continue 'scan,
                }
            }
            self.done = true;
            return Some(Err(LexError::NoMatch {
                rest: self.rest.to_owned(),
            }));
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// No rule in the table matches the remaining input. Lexing halts
    /// immediately; `rest` is the unconsumed text starting at the offending
    /// position.
    #[error("no lexical rule matches remaining input {rest:?}")]
    NoMatch { rest: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::LexRule;

    fn lexer() -> Lexer<Option<i64>> {
        Lexer::new(vec![
            LexRule::new(r"\s+", |_| None).unwrap(),
            LexRule::new(r"\d+", |m| Some(Token::new("num", m.parse().ok()))).unwrap(),
            LexRule::new(r"\+", |_| Some(Token::new("add", None))).unwrap(),
        ])
    }

    #[test]
    fn produces_tokens_in_order() {
        let lexer = lexer();
        let kinds: Vec<_> = lexer
            .tokenize("1 + 23")
            .map(|t| t.unwrap().kind)
            .collect();
        assert_eq!(kinds, ["num", "add", "num"]);
    }

    #[test]
    fn skip_rules_advance_without_yielding() {
        let lexer = lexer();
        let spaced: Vec<_> = lexer.tokenize("1   +   2").map(Result::unwrap).collect();
        let dense: Vec<_> = lexer.tokenize("1+2").map(Result::unwrap).collect();
        assert_eq!(spaced, dense);
    }

    #[test]
    fn unmatched_input_fails_with_rest() {
        let lexer = lexer();
        let mut tokens = lexer.tokenize("1 & 2");
        assert_eq!(tokens.next().unwrap().unwrap().kind, "num");
        assert_eq!(
            tokens.next(),
            Some(Err(LexError::NoMatch {
                rest: "& 2".to_owned()
            }))
        );
        // the stream is fused after a failure
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn first_match_wins() {
        let lexer: Lexer<()> = Lexer::new(vec![
            LexRule::new(r"ab", |_| Some(Token::new("ab", ()))).unwrap(),
            LexRule::new(r"a", |_| Some(Token::new("a", ()))).unwrap(),
        ]);
        let kinds: Vec<_> = lexer.tokenize("aba").map(|t| t.unwrap().kind).collect();
        assert_eq!(kinds, ["ab", "a"]);
    }
}
