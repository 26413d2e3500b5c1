//! Tokenizer for range formulas
//!
//! Whitespace is not a plain separator here. A run of whitespace between two
//! clauses is the AND operator, while whitespace next to `||`, around a
//! hyphen-range dash, after an operator, or at either end is dropped.

use super::ast::SpecOperator;
use super::operator::Operator;
use crate::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Version or pattern text, validated later by the parser
    Word(&'a str),
    Op(Operator),
    Spec(SpecOperator),
    And,
    Or,
    /// The ` - ` of a hyphen range
    Dash,
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'*'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'+' | b'*')
}

fn unexpected(input: &str, offset: usize) -> SyntaxError {
    SyntaxError::UnexpectedCharacter {
        input: input.to_string(),
        ch: input[offset..].chars().next().unwrap_or('\0'),
        offset,
    }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b.is_ascii_whitespace() {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let after_word = matches!(tokens.last(), Some(Token::Word(_)));
            let before_or = input[i..].starts_with("||");
            let before_dash = bytes.get(i) == Some(&b'-');
            if after_word && i < bytes.len() && !before_or && !before_dash {
                tokens.push(Token::And);
            }
            continue;
        }

        match b {
            b'|' => {
                if bytes.get(i + 1) != Some(&b'|') {
                    return Err(unexpected(input, i));
                }
                tokens.push(Token::Or);
                i += 2;
            }
            b'-' => {
                // Only a free-standing dash is a hyphen range; dashes inside a
                // version are consumed as part of the word.
                let spaced_before = i > 0 && bytes[i - 1].is_ascii_whitespace();
                let spaced_after = bytes.get(i + 1).map_or(true, |n| n.is_ascii_whitespace());
                if !(spaced_before && spaced_after) {
                    return Err(unexpected(input, i));
                }
                tokens.push(Token::Dash);
                i += 1;
            }
            b'<' | b'>' | b'=' => {
                let len = if b != b'=' && bytes.get(i + 1) == Some(&b'=') { 2 } else { 1 };
                let op = Operator::from_token(&input[i..i + len]).ok_or_else(|| unexpected(input, i))?;
                tokens.push(Token::Op(op));
                i += len;
            }
            b'~' => {
                tokens.push(Token::Spec(SpecOperator::Tilde));
                i += 1;
            }
            b'^' => {
                tokens.push(Token::Spec(SpecOperator::Caret));
                i += 1;
            }
            b if is_word_start(b) => {
                let start = i;
                while i < bytes.len() && is_word_byte(bytes[i]) {
                    i += 1;
                }
                tokens.push(Token::Word(&input[start..i]));
            }
            _ => return Err(unexpected(input, i)),
        }
    }

    log::trace!("Tokenized {:?} into {:?}", input, tokens);
    Ok(tokens)
}
