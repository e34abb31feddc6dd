//! Splits a pattern into tokens and reorders them into postfix form.
use std::fmt::{self, Display};

/// Token kinds, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal,
    Union,
    Star,
    Plus,
    Question,
    LParen,
    RParen,
    Concat,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Literal => "Literal",
            TokenKind::Union => "Union",
            TokenKind::Star => "Star",
            TokenKind::Plus => "Plus",
            TokenKind::Question => "Question",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::Concat => "Concat",
            TokenKind::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// A single pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(char), // alphanumeric character
    Union,         // |
    Star,          // *
    Plus,          // +
    Question,      // ?
    LParen,        // (
    RParen,        // )
    Concat,        // implicit, inserted by insert_concats
    Unknown(char), // anything else
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Literal(_) => TokenKind::Literal,
            Token::Union => TokenKind::Union,
            Token::Star => TokenKind::Star,
            Token::Plus => TokenKind::Plus,
            Token::Question => TokenKind::Question,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Concat => TokenKind::Concat,
            Token::Unknown(_) => TokenKind::Unknown,
        }
    }

    /// The character this token was read from. `Concat` has no source
    /// character and is shown as `.`.
    pub fn as_char(&self) -> char {
        match self {
            Token::Literal(c) | Token::Unknown(c) => *c,
            Token::Union => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Question => '?',
            Token::LParen => '(',
            Token::RParen => ')',
            Token::Concat => '.',
        }
    }

    /// Binding strength used by [`to_postfix`]. Grouping and operand tokens
    /// have none.
    fn precedence(&self) -> u8 {
        match self {
            Token::Star | Token::Plus | Token::Question => 3,
            Token::Concat => 2,
            Token::Union => 1,
            _ => 0,
        }
    }

    /// True if the token closes something that can be followed by an
    /// implicit concatenation.
    fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Literal(_) | Token::RParen | Token::Star | Token::Plus | Token::Question
        )
    }

    /// True if the token opens a new operand.
    fn starts_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::LParen)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.kind(), self.as_char())
    }
}

/// Classifies every character of `pattern`. Never fails: characters with no
/// meaning become [`Token::Unknown`]. The i-th token comes from the i-th
/// character.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    pattern
        .chars()
        .map(|c| match c {
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Question,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_alphanumeric() => Token::Literal(c),
            c => Token::Unknown(c),
        })
        .collect()
}

/// Makes concatenation explicit.
///
/// A [`Token::Concat`] goes between `curr` and `next` when `curr` ends an
/// operand and `next` starts one, e.g. `a(b)*c` becomes `a.(b)*.c`.
pub fn insert_concats(tokens: &[Token]) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() * 2);

    for (i, tok) in tokens.iter().enumerate() {
        result.push(*tok);
        if let Some(next) = tokens.get(i + 1) {
            if tok.ends_operand() && next.starts_operand() {
                result.push(Token::Concat);
            }
        }
    }

    result
}

/// Reorders infix tokens into postfix form with the shunting-yard algorithm.
///
/// Operators of equal precedence are left associative. Parentheses are not
/// validated here: an unmatched `(` is drained to the output at the end and
/// an unmatched `)` is emitted as is, both of which the builder rejects.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for tok in tokens {
        match tok {
            Token::Literal(_) => out.push(*tok),
            Token::LParen => stack.push(*tok),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => out.push(op),
                    None => {
                        out.push(*tok);
                        break;
                    }
                }
            },
            _ => {
                while let Some(top) = stack.last() {
                    if *top == Token::LParen || top.precedence() < tok.precedence() {
                        break;
                    }
                    out.push(*top);
                    stack.pop();
                }
                stack.push(*tok);
            }
        }
    }

    while let Some(op) = stack.pop() {
        out.push(op);
    }

    out
}
