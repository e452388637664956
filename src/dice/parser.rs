//! Parser and evaluator for dice expressions
//!
//! Grammar (prefix notation):
//!
//! ```text
//! expr     := value | operator value* expr?
//! value    := dice | constant
//! dice     := DIGITS D DIGITS
//! constant := DIGITS
//! operator := PLUS | MINUS
//! ```

use std::fmt;

use super::{DiceError, DiceToken, DiceTokenKind, DieRoller, MAX_DICE};

/// Arithmetic operators available in dice expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
}

impl DiceOp {
    /// Symbol used in descriptions
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
        }
    }

    /// Fold `right` into a running `(value, min, max)` total
    fn apply(&self, (value, min, max): (i64, i64, i64), right: &RollResult) -> (i64, i64, i64) {
        match self {
            Self::Add => (
                value.saturating_add(right.value),
                min.saturating_add(right.min),
                max.saturating_add(right.max),
            ),
            Self::Sub => (
                value.saturating_sub(right.value),
                min.saturating_sub(right.max),
                max.saturating_sub(right.min),
            ),
        }
    }
}

/// A parsed dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiceExpr {
    /// Nothing to roll
    Empty,
    /// A fixed number, kept with its source text
    Constant {
        /// Text as written
        text: String,
        /// Parsed value
        value: i64,
    },
    /// `XdY`
    Dice {
        /// Number of dice
        count: i64,
        /// Faces per die
        sides: i64,
    },
    /// An operator applied left to right over its operands
    Operation {
        /// Operator
        op: DiceOp,
        /// Operands, folded in order
        operands: Vec<DiceExpr>,
    },
}

/// Outcome of evaluating a dice expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    /// Prefix-notation description of what was rolled
    pub description: String,
    /// Rolled total
    pub value: i64,
    /// Smallest possible total
    pub min: i64,
    /// Largest possible total
    pub max: i64,
}

impl RollResult {
    fn fixed(description: impl Into<String>, value: i64) -> Self {
        Self {
            description: description.into(),
            value,
            min: value,
            max: value,
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description, self.value)
    }
}

impl DiceExpr {
    /// Evaluate the expression, rolling dice with `roller`
    pub fn eval(&self, roller: &mut dyn DieRoller) -> RollResult {
        match self {
            Self::Empty => RollResult::fixed("", 0),
            Self::Constant { text, value } => RollResult::fixed(text.as_str(), *value),
            Self::Dice { count, sides } => {
                let total = (0..*count).fold(0i64, |acc, _| acc.saturating_add(roller.roll(*sides)));
                RollResult {
                    description: format!("{}D{}", count, sides),
                    value: total,
                    min: *count,
                    max: count.saturating_mul(*sides),
                }
            }
            Self::Operation { op, operands } => {
                let results: Vec<RollResult> = operands.iter().map(|o| o.eval(&mut *roller)).collect();
                let parts: Vec<&str> = results.iter().map(|r| r.description.as_str()).collect();
                let description = format!("{} {}", op.symbol(), parts.join(" "))
                    .trim_end()
                    .to_string();

                let mut iter = results.iter();
                let Some(first) = iter.next() else {
                    return RollResult::fixed(description, 0);
                };
                let (value, min, max) = iter.fold((first.value, first.min, first.max), |acc, next| {
                    op.apply(acc, next)
                });

                RollResult {
                    description,
                    value,
                    min,
                    max,
                }
            }
        }
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Constant { text, .. } => f.write_str(text),
            Self::Dice { count, sides } => write!(f, "{}D{}", count, sides),
            Self::Operation { op, operands } => {
                f.write_str(op.symbol())?;
                for operand in operands {
                    write!(f, " {}", operand)?;
                }
                Ok(())
            }
        }
    }
}

/// Parse a token stream into a dice expression
pub fn parse(tokens: &[DiceToken]) -> Result<DiceExpr, DiceError> {
    if tokens.is_empty() {
        return Ok(DiceExpr::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;

    if parser.pos < tokens.len() {
        let rest: Vec<String> = tokens[parser.pos..].iter().map(|t| t.value.clone()).collect();
        return Err(DiceError::TrailingTokens(rest.join(" ")));
    }

    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [DiceToken],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek_kind(&self, offset: usize) -> Option<DiceTokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn parse_expr(&mut self) -> Result<DiceExpr, DiceError> {
        let op = match self.peek_kind(0) {
            Some(DiceTokenKind::Plus) => DiceOp::Add,
            Some(DiceTokenKind::Minus) => DiceOp::Sub,
            _ => {
                return match self.parse_value()? {
                    Some(value) => Ok(value),
                    None => Err(self.unexpected()),
                };
            }
        };
        self.pos += 1;

        let mut operands = Vec::new();
        while let Some(value) = self.parse_value()? {
            operands.push(value);
        }
        if matches!(
            self.peek_kind(0),
            Some(DiceTokenKind::Plus) | Some(DiceTokenKind::Minus)
        ) {
            operands.push(self.parse_expr()?);
        }

        Ok(DiceExpr::Operation { op, operands })
    }

    fn parse_value(&mut self) -> Result<Option<DiceExpr>, DiceError> {
        if let Some(die) = self.parse_die()? {
            return Ok(Some(die));
        }
        self.parse_constant()
    }

    fn parse_die(&mut self) -> Result<Option<DiceExpr>, DiceError> {
        let is_die = self.peek_kind(0) == Some(DiceTokenKind::Digits)
            && self.peek_kind(1) == Some(DiceTokenKind::D)
            && self.peek_kind(2) == Some(DiceTokenKind::Digits);
        if !is_die {
            return Ok(None);
        }

        let count = parse_number(&self.tokens[self.pos].value)?;
        let sides = parse_number(&self.tokens[self.pos + 2].value)?;
        let text = format!("{}D{}", count, sides);
        if !(0..=MAX_DICE).contains(&count) {
            return Err(DiceError::InvalidDie(format!(
                "{} (dice count must be between 0 and {})",
                text, MAX_DICE
            )));
        }
        if sides < 1 {
            return Err(DiceError::InvalidDie(format!(
                "{} (a die needs at least one side)",
                text
            )));
        }

        self.pos += 3;
        Ok(Some(DiceExpr::Dice { count, sides }))
    }

    fn parse_constant(&mut self) -> Result<Option<DiceExpr>, DiceError> {
        if self.peek_kind(0) != Some(DiceTokenKind::Digits) {
            return Ok(None);
        }
        let text = self.tokens[self.pos].value.clone();
        let value = parse_number(&text)?;
        self.pos += 1;
        Ok(Some(DiceExpr::Constant { text, value }))
    }

    fn unexpected(&self) -> DiceError {
        let token = self
            .tokens
            .get(self.pos)
            .map(|t| t.value.clone())
            .unwrap_or_default();
        DiceError::UnexpectedToken(token)
    }
}

fn parse_number(text: &str) -> Result<i64, DiceError> {
    text.parse()
        .map_err(|_| DiceError::InvalidNumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{lex, FixedRoller};

    fn parse_and_eval(input: &str) -> RollResult {
        parse(&lex(input)).unwrap().eval(&mut FixedRoller(0))
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(parse_and_eval("").description, "");
        assert_eq!(parse_and_eval("       ").description, "");
        assert_eq!(parse_and_eval("").value, 0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(parse_and_eval("1").description, "1");
        assert_eq!(parse_and_eval("1d4").description, "1D4");
    }

    #[test]
    fn test_addition() {
        assert_eq!(parse_and_eval("+ 1 1").description, "+ 1 1");
        assert_eq!(parse_and_eval("+ 1D4 1").description, "+ 1D4 1");
        assert_eq!(parse_and_eval("+ 1 1D4").description, "+ 1 1D4");
        assert_eq!(parse_and_eval("+ 1D4 1D4").description, "+ 1D4 1D4");
        assert_eq!(parse_and_eval("+ 1 + 2 3").description, "+ 1 + 2 3");
        assert_eq!(parse_and_eval("+ 1 + 1d4 3").description, "+ 1 + 1D4 3");
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(parse_and_eval("- 1 1").description, "- 1 1");
        assert_eq!(parse_and_eval("- 1D4 1").description, "- 1D4 1");
        assert_eq!(parse_and_eval("- 1 1D4").description, "- 1 1D4");
        assert_eq!(parse_and_eval("- 1D4 1D4").description, "- 1D4 1D4");
    }

    #[test]
    fn test_values_and_bounds() {
        let result = parse(&lex("+ 2d6 1")).unwrap().eval(&mut FixedRoller(3));
        assert_eq!(result.value, 7);
        assert_eq!(result.min, 3);
        assert_eq!(result.max, 13);

        let result = parse(&lex("- 10 1d4")).unwrap().eval(&mut FixedRoller(2));
        assert_eq!(result.value, 8);
        assert_eq!(result.min, 6);
        assert_eq!(result.max, 9);
    }

    #[test]
    fn test_single_operand_keeps_value() {
        let result = parse_and_eval("+ 5");
        assert_eq!(result.value, 5);
        assert_eq!(result.description, "+ 5");
    }

    #[test]
    fn test_negative_constant() {
        let result = parse_and_eval("-5");
        assert_eq!(result.value, -5);
        assert_eq!(result.description, "-5");
    }

    #[test]
    fn test_invalid_expressions() {
        assert!(matches!(parse(&lex("d6")), Err(DiceError::UnexpectedToken(_))));
        assert!(matches!(parse(&lex("1d6 2")), Err(DiceError::TrailingTokens(_))));
        assert!(matches!(parse(&lex("1d0")), Err(DiceError::InvalidDie(_))));
        assert!(matches!(parse(&lex("-1d6")), Err(DiceError::InvalidDie(_))));
        assert!(parse(&lex("10000d6")).is_ok());
        assert!(matches!(parse(&lex("10001d6")), Err(DiceError::InvalidDie(_))));
        assert!(matches!(
            parse(&lex("99999999999999999999")),
            Err(DiceError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_display_round_trips_structure() {
        let expr = parse(&lex("+ 1d4 + 2 3")).unwrap();
        assert_eq!(expr.to_string(), "+ 1D4 + 2 3");
    }
}
