//! Tokenizer for dice expressions

use std::fmt;

/// Kinds of dice tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiceTokenKind {
    /// The die separator (`d` or `D`)
    D,
    /// A run of digits, optionally with a leading minus sign
    Digits,
    /// `+`
    Plus,
    /// `-` not followed by a digit
    Minus,
}

/// A single dice token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiceToken {
    /// Token kind
    pub kind: DiceTokenKind,
    /// Source text (the die separator is always normalized to `D`)
    pub value: String,
}

impl DiceToken {
    /// Create a new token
    pub fn new(kind: DiceTokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for DiceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Split a dice expression into tokens.
///
/// Unknown characters and whitespace are skipped. A `-` directly followed by
/// a digit starts a negative number rather than a subtraction.
pub fn lex(input: &str) -> Vec<DiceToken> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            'd' | 'D' => tokens.push(DiceToken::new(DiceTokenKind::D, "D")),
            '+' => tokens.push(DiceToken::new(DiceTokenKind::Plus, "+")),
            '-' => {
                if chars.peek().is_some_and(|n| n.is_ascii_digit()) {
                    let mut digits = String::from("-");
                    while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                        digits.push(d);
                        chars.next();
                    }
                    tokens.push(DiceToken::new(DiceTokenKind::Digits, digits));
                } else {
                    tokens.push(DiceToken::new(DiceTokenKind::Minus, "-"));
                }
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::from(c);
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(d);
                    chars.next();
                }
                tokens.push(DiceToken::new(DiceTokenKind::Digits, digits));
            }
            _ => {}
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use DiceTokenKind::*;

    fn t(kind: DiceTokenKind, value: &str) -> DiceToken {
        DiceToken::new(kind, value)
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("   ").is_empty());
    }

    #[test]
    fn test_single_symbols() {
        assert_eq!(lex("D"), vec![t(D, "D")]);
        assert_eq!(lex("d"), vec![t(D, "D")]);
        assert_eq!(lex("+"), vec![t(Plus, "+")]);
        assert_eq!(lex("-"), vec![t(Minus, "-")]);
        assert_eq!(lex("0"), vec![t(Digits, "0")]);
        assert_eq!(lex("01"), vec![t(Digits, "01")]);
    }

    #[test]
    fn test_multiple_symbols() {
        assert_eq!(lex("1d4"), vec![t(Digits, "1"), t(D, "D"), t(Digits, "4")]);
        assert_eq!(
            lex("1 + 4"),
            vec![t(Digits, "1"), t(Plus, "+"), t(Digits, "4")]
        );
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(lex("-5"), vec![t(Digits, "-5")]);
        assert_eq!(
            lex("-5+3"),
            vec![t(Digits, "-5"), t(Plus, "+"), t(Digits, "3")]
        );
        assert_eq!(
            lex("3+-5"),
            vec![t(Digits, "3"), t(Plus, "+"), t(Digits, "-5")]
        );
    }

    #[test]
    fn test_minus_directly_before_digit_is_a_sign() {
        assert_eq!(lex("3-5"), vec![t(Digits, "3"), t(Digits, "-5")]);
        assert_eq!(
            lex("1d6-3"),
            vec![t(Digits, "1"), t(D, "D"), t(Digits, "6"), t(Digits, "-3")]
        );
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(lex("2x d?6"), vec![t(Digits, "2"), t(D, "D"), t(Digits, "6")]);
    }
}
