//! The calculator grammar: lexical rules, reduction rules and precedence.

use anyhow::Context as _;
use ruly::{Assoc, LexRule, Lexer, OpPrecedence, ParseRule, Parser, Token};

/// Semantic payload: number literals and `E` nodes carry their value,
/// operator and parenthesis tokens carry nothing.
pub type Value = Option<f64>;

pub fn lexer() -> anyhow::Result<Lexer<Value>> {
    Ok(Lexer::new(vec![
        LexRule::new(r"\s+", |_| None)?,
        LexRule::new(r"\d+\.?\d*", |m| Some(Token::new("number", m.parse().ok())))?,
        LexRule::new(r"\+", |_| Some(Token::new("add", None)))?,
        LexRule::new(r"-", |_| Some(Token::new("sub", None)))?,
        LexRule::new(r"\*", |_| Some(Token::new("mul", None)))?,
        LexRule::new(r"/", |_| Some(Token::new("div", None)))?,
        LexRule::new(r"\^", |_| Some(Token::new("pow", None)))?,
        LexRule::new(r"\(", |_| Some(Token::new("(", None)))?,
        LexRule::new(r"\)", |_| Some(Token::new(")", None)))?,
    ]))
}

fn binary(op: &'static str, apply: fn(f64, f64) -> f64) -> ParseRule<Value> {
    ParseRule::new(["E", op, "E"], move |mut args| {
        let rhs = args.pop().and_then(|t| t.value).unwrap_or(f64::NAN);
        args.pop();
        let lhs = args.pop().and_then(|t| t.value).unwrap_or(f64::NAN);
        Token::new("E", Some(apply(lhs, rhs)))
    })
    .prec(op)
}

pub fn parser() -> Parser<Value> {
    Parser::new(
        vec![
            ParseRule::new(["number"], |mut args| {
                Token::new("E", args.pop().and_then(|t| t.value))
            }),
            ParseRule::new(["(", "E", ")"], |mut args| {
                args.pop();
                // the inner expression replaces the whole group
                args.swap_remove(1)
            }),
            binary("add", |l, r| l + r),
            binary("sub", |l, r| l - r),
            binary("mul", |l, r| l * r),
            binary("div", |l, r| l / r),
            binary("pow", f64::powf),
        ],
        vec![
            OpPrecedence::new(Assoc::Left, &["add", "sub"]),
            OpPrecedence::new(Assoc::Left, &["mul", "div"]),
            OpPrecedence::new(Assoc::Right, &["pow"]),
        ],
    )
}

/// Lex and parse `input`, returning the computed value.
pub fn eval(input: &str) -> anyhow::Result<f64> {
    let lexer = lexer()?;
    let parser = parser();
    let result = parser.parse(lexer.tokenize(input))?;
    result.value.context("result token carries no value")
}

#[cfg(test)]
mod tests {
    use super::eval;

    #[test]
    fn evaluates_with_precedence() {
        assert_eq!(eval("3 + 4 * 2").unwrap(), 11.0);
        assert_eq!(eval("10 / 2 - 3").unwrap(), 2.0);
    }

    #[test]
    fn pow_is_right_associative() {
        assert_eq!(eval("2 ^ 3 ^ 2").unwrap(), 512.0);
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(eval("(1 + 2) * 3").unwrap(), 9.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(eval("1 & 2").is_err());
        assert!(eval("1 2").is_err());
        assert!(eval("").is_err());
    }
}
