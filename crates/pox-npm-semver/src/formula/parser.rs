//! Recursive-descent parser for range formulas

use super::ast::{Clause, Formula, Range};
use super::lexer::{tokenize, Token};
use super::operator::Operator;
use super::pattern::VersionOrPattern;
use crate::error::SyntaxError;

/// Parse a range formula; empty input yields a formula matching any release
pub fn parse(input: &str) -> Result<Formula, SyntaxError> {
    let result = tokenize(input).and_then(|tokens| {
        if tokens.is_empty() {
            return Ok(Formula::any());
        }
        Parser { input, tokens, pos: 0 }.formula()
    });

    if let Err(err) = &result {
        log::debug!("Could not parse formula {:?}: {}", input, err);
    }
    result
}

fn describe(token: Token<'_>) -> String {
    match token {
        Token::Word(word) => format!("\"{}\"", word),
        Token::Op(Operator::Equal) => "operator \"=\"".to_string(),
        Token::Op(op) => format!("operator \"{}\"", op),
        Token::Spec(spec) => format!("operator \"{}\"", spec.as_str()),
        Token::And => "whitespace".to_string(),
        Token::Or => "\"||\"".to_string(),
        Token::Dash => "hyphen \"-\"".to_string(),
    }
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token<'_>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: impl Into<String>) -> SyntaxError {
        SyntaxError::formula(self.input, reason)
    }

    fn formula(&mut self) -> Result<Formula, SyntaxError> {
        let mut ranges = vec![self.range()?];
        while self.eat(Token::Or) {
            ranges.push(self.range()?);
        }

        match self.peek() {
            None => Ok(Formula::new(ranges)),
            Some(token) => Err(self.error(format!("unexpected {}", describe(token)))),
        }
    }

    fn range(&mut self) -> Result<Range, SyntaxError> {
        let first = self.clause()?;

        if self.eat(Token::Dash) {
            let Clause::Patt(from) = first else {
                return Err(self.error("hyphen range bounds cannot carry operators"));
            };
            let to = match self.next() {
                Some(Token::Word(word)) => self.operand(word)?,
                Some(token) => {
                    return Err(self.error(format!("hyphen range upper bound expected, found {}", describe(token))));
                }
                None => return Err(self.error("hyphen range is missing its upper bound")),
            };
            return match self.peek() {
                None | Some(Token::Or) => Ok(Range::Hyphen(from, to)),
                Some(_) => Err(self.error("hyphen range cannot be combined with other clauses")),
            };
        }

        let mut clauses = vec![first];
        while self.eat(Token::And) {
            clauses.push(self.clause()?);
        }
        Ok(Range::Simple(clauses))
    }

    fn clause(&mut self) -> Result<Clause, SyntaxError> {
        match self.next() {
            Some(Token::Word(word)) => Ok(Clause::Patt(self.operand(word)?)),
            Some(Token::Op(op)) => Ok(Clause::Expr(op, self.operator_operand()?)),
            Some(Token::Spec(spec)) => Ok(Clause::Spec(spec, self.operator_operand()?)),
            Some(token) => Err(self.error(format!("expected a version, found {}", describe(token)))),
            None => Err(self.error("expected a version, found end of input")),
        }
    }

    fn operator_operand(&mut self) -> Result<VersionOrPattern, SyntaxError> {
        match self.next() {
            Some(Token::Word(word)) => self.operand(word),
            Some(token) => Err(self.error(format!(
                "operator must be followed by a version, found {}",
                describe(token)
            ))),
            None => Err(self.error("operator must be followed by a version")),
        }
    }

    fn operand(&self, word: &str) -> Result<VersionOrPattern, SyntaxError> {
        VersionOrPattern::parse(word).map_err(|err| self.error(err.to_string()))
    }
}
