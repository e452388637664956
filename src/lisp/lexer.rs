//! Tokenizer for the Lisp surface syntax
//!
//! ```text
//! OPEN   := (
//! CLOSE  := )
//! NUMBER := -?[0-9]+(.[0-9]+)?
//! TEXT   := '...'        ('' inside the quotes is a literal quote)
//! ATOM   := anything else up to whitespace or a paren
//! ```

use std::fmt;

/// Kinds of Lisp tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    Open,
    /// `)`
    Close,
    /// A bare symbol
    Atom,
    /// A decimal number
    Number,
    /// Quoted text, stored without the quotes
    Text,
}

/// A single Lisp token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Token text
    pub value: String,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Text => write!(f, "'{}'", self.value.replace('\'', "''")),
            _ => f.write_str(&self.value),
        }
    }
}

/// Split source text into tokens
pub fn lex(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '(' {
            tokens.push(Token::new(TokenKind::Open, "("));
            i += 1;
        } else if c == ')' {
            tokens.push(Token::new(TokenKind::Close, ")"));
            i += 1;
        } else if c == '\'' {
            let (text, next) = read_text(&chars, i + 1);
            tokens.push(Token::new(TokenKind::Text, text));
            i = next;
        } else if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let (number, next) = read_number(&chars, i);
            tokens.push(Token::new(TokenKind::Number, number));
            i = next;
        } else if c.is_whitespace() {
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
        } else {
            let start = i;
            while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '(' && chars[i] != ')' {
                i += 1;
            }
            tokens.push(Token::new(TokenKind::Atom, chars[start..i].iter().collect::<String>()));
        }
    }

    tokens
}

/// Read quoted text starting just after the opening quote
fn read_text(chars: &[char], mut i: usize) -> (String, usize) {
    let mut text = String::new();
    while i < chars.len() {
        if chars[i] == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                text.push('\'');
                i += 2;
                continue;
            }
            return (text, i + 1);
        }
        text.push(chars[i]);
        i += 1;
    }
    // unterminated text runs to end of input
    (text, i)
}

fn read_number(chars: &[char], mut i: usize) -> (String, usize) {
    let mut number = String::new();
    if chars[i] == '-' {
        number.push('-');
        i += 1;
    }
    while i < chars.len() && chars[i].is_ascii_digit() {
        number.push(chars[i]);
        i += 1;
    }
    if chars.get(i) == Some(&'.') && chars.get(i + 1).is_some_and(char::is_ascii_digit) {
        number.push('.');
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            number.push(chars[i]);
            i += 1;
        }
    }
    (number, i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    #[test]
    fn test_numbers() {
        assert_eq!(lex("1"), vec![Token::new(Number, "1")]);
        assert_eq!(lex("101"), vec![Token::new(Number, "101")]);
        assert_eq!(lex("-101"), vec![Token::new(Number, "-101")]);
        assert_eq!(lex("1.0"), vec![Token::new(Number, "1.0")]);
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        assert_eq!(lex("1."), vec![Token::new(Number, "1"), Token::new(Atom, ".")]);
    }

    #[test]
    fn test_text() {
        assert_eq!(lex("''"), vec![Token::new(Text, "")]);
        assert_eq!(lex("' '"), vec![Token::new(Text, " ")]);
        assert_eq!(lex("'hi'"), vec![Token::new(Text, "hi")]);
        assert_eq!(lex("''''"), vec![Token::new(Text, "'")]);
        assert_eq!(lex("'it''s'"), vec![Token::new(Text, "it's")]);
    }

    #[test]
    fn test_unterminated_text() {
        assert_eq!(lex("'abc"), vec![Token::new(Text, "abc")]);
    }

    #[test]
    fn test_parens_and_atoms() {
        assert_eq!(lex("("), vec![Token::new(Open, "(")]);
        assert_eq!(lex(")"), vec![Token::new(Close, ")")]);
        assert_eq!(lex("apple"), vec![Token::new(Atom, "apple")]);
        assert_eq!(lex("()"), vec![Token::new(Open, "("), Token::new(Close, ")")]);
        assert_eq!(
            lex("(+ 1 1)"),
            vec![
                Token::new(Open, "("),
                Token::new(Atom, "+"),
                Token::new(Number, "1"),
                Token::new(Number, "1"),
                Token::new(Close, ")"),
            ]
        );
    }

    #[test]
    fn test_minus_alone_is_an_atom() {
        assert_eq!(lex("- 1"), vec![Token::new(Atom, "-"), Token::new(Number, "1")]);
    }

    #[test]
    fn test_namespaced_atom() {
        assert_eq!(
            lex("(number/add 1 2)")[1],
            Token::new(Atom, "number/add")
        );
    }
}
