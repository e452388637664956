//! Turns tokens into values
//!
//! ```text
//! expr := ATOM | TEXT | NUMBER | OPEN expr* CLOSE
//! ```

use super::lexer::{Token, TokenKind};
use super::value::Value;

/// Deepest list nesting the parser builds; deeper lists become an error value
pub const MAX_NESTING: usize = 512;

/// Parse the first expression in `tokens`; `None` when there is nothing to parse
pub fn parse(tokens: &[Token]) -> Option<Value> {
    Parser::new(tokens).next_expr()
}

/// Parse every top-level expression in `tokens`, in order
pub fn parse_all(tokens: &[Token]) -> Vec<Value> {
    let mut parser = Parser::new(tokens);
    let mut exprs = Vec::new();
    while let Some(expr) = parser.next_expr() {
        exprs.push(expr);
    }
    exprs
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Next top-level expression, skipping stray closing parens
    fn next_expr(&mut self) -> Option<Value> {
        while self.tokens.get(self.pos)?.kind == TokenKind::Close {
            self.pos += 1;
        }
        self.expr()
    }

    /// Parse one expression; `None` at a closing paren or end of input
    fn expr(&mut self) -> Option<Value> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        match token.kind {
            TokenKind::Atom => Some(Value::atom(token.value.as_str())),
            TokenKind::Number => Some(Value::number(&token.value)),
            TokenKind::Text => Some(Value::text(token.value.as_str())),
            TokenKind::Open if self.depth >= MAX_NESTING => {
                self.skip_list();
                Some(Value::error(format!(
                    "maximum nesting depth of {} exceeded",
                    MAX_NESTING
                )))
            }
            TokenKind::Open => {
                self.depth += 1;
                let mut items = Vec::new();
                while let Some(item) = self.expr() {
                    items.push(item);
                }
                self.depth -= 1;
                Some(Value::List(items))
            }
            TokenKind::Close => None,
        }
    }

    /// Consume the rest of a list whose `(` was already read
    fn skip_list(&mut self) {
        let mut open = 1usize;
        while open > 0 {
            let Some(token) = self.tokens.get(self.pos) else {
                return;
            };
            self.pos += 1;
            match token.kind {
                TokenKind::Open => open += 1,
                TokenKind::Close => open -= 1,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lisp::lexer::lex;

    fn parse_str(input: &str) -> Option<Value> {
        parse(&lex(input))
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_str(""), None);
        assert_eq!(parse_str("hi"), Some(Value::atom("hi")));
        assert_eq!(parse_str("'hi'"), Some(Value::text("hi")));
        assert_eq!(parse_str("()"), Some(Value::List(vec![])));
        assert_eq!(
            parse_str("( + '1' '2' )"),
            Some(Value::List(vec![
                Value::atom("+"),
                Value::text("1"),
                Value::text("2")
            ]))
        );
        assert_eq!(
            parse_str("( a 'b' )"),
            Some(Value::List(vec![Value::atom("a"), Value::text("b")]))
        );
        assert_eq!(
            parse_str("( () () )"),
            Some(Value::List(vec![Value::List(vec![]), Value::List(vec![])]))
        );
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_str("42"), Some(Value::int(42)));
        assert_eq!(parse_str("-3.5"), Some(Value::number("-3.5")));
    }

    #[test]
    fn test_unclosed_list_runs_to_end() {
        assert_eq!(
            parse_str("(a (b"),
            Some(Value::List(vec![
                Value::atom("a"),
                Value::List(vec![Value::atom("b")])
            ]))
        );
    }

    #[test]
    fn test_parse_all() {
        let exprs = parse_all(&lex("(def x 5) x"));
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1], Value::atom("x"));
    }

    fn nesting_of(mut value: &Value) -> usize {
        let mut depth = 0;
        while let Value::List(items) = value {
            depth += 1;
            match items.last() {
                Some(last) => value = last,
                None => break,
            }
        }
        depth
    }

    #[test]
    fn test_deep_nesting_becomes_error() {
        let exprs = parse_all(&lex(&"(".repeat(200_000)));
        assert_eq!(exprs.len(), 1);
        assert_eq!(nesting_of(&exprs[0]), MAX_NESTING);

        let mut innermost = &exprs[0];
        while let Value::List(items) = innermost {
            innermost = &items[0];
        }
        assert_eq!(
            *innermost,
            Value::error("maximum nesting depth of 512 exceeded")
        );
    }

    #[test]
    fn test_parsing_resumes_after_too_deep_list() {
        let source = format!("{}{} 7", "(".repeat(600), ")".repeat(600));
        let exprs = parse_all(&lex(&source));
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1], Value::int(7));
    }

    #[test]
    fn test_parse_all_skips_stray_close() {
        let exprs = parse_all(&lex(") 1 ) 2"));
        assert_eq!(exprs, vec![Value::int(1), Value::int(2)]);
    }
}
