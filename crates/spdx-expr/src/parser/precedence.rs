//! Recursive-descent parser following SPDX operator precedence.
//!
//! ```text
//! or-expr   := and-expr ( "OR" and-expr )*
//! and-expr  := with-expr ( "AND" with-expr )*
//! with-expr := primary ( "WITH" primary )?
//! primary   := identifier | "(" or-expr ")"
//! ```
//!
//! Operator chains are folded in a loop. Only parenthesised groups recurse,
//! so `depth` counts open groups.

use crate::ast::Expression;
use crate::errors::ParseError;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

pub(super) struct PrecedenceParser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    max_depth: usize,
}

impl<'a> PrecedenceParser<'a> {
    pub(super) fn new(input: &'a str, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
            max_depth,
        }
    }

    pub(super) fn parse(mut self) -> Result<Expression, ParseError> {
        if self.current.kind == TokenKind::End {
            return Err(ParseError::EmptyExpression {
                offset: self.current.start,
            });
        }
        let expr = self.parse_or()?;
        self.expect_end()?;
        Ok(expr)
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                offset: self.current.start,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        self.parse_chain(Self::parse_and, Keyword::Or, Expression::disjunction)
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        self.parse_chain(Self::parse_with, Keyword::And, Expression::conjunction)
    }

    fn parse_chain<F, B>(
        &mut self,
        mut parse_operand: F,
        operator: Keyword,
        mut build: B,
    ) -> Result<Expression, ParseError>
    where
        F: FnMut(&mut Self) -> Result<Expression, ParseError>,
        B: FnMut(Expression, Expression) -> Expression,
    {
        let mut node = parse_operand(self)?;
        while self.current.kind.keyword() == Some(operator) {
            self.advance();
            self.ensure_operand(operator)?;
            let rhs = parse_operand(self)?;
            node = build(node, rhs);
        }
        Ok(node)
    }

    fn parse_with(&mut self) -> Result<Expression, ParseError> {
        let license = self.parse_primary()?;
        if self.current.kind.keyword() != Some(Keyword::With) {
            return Ok(license);
        }
        self.advance();
        self.ensure_operand(Keyword::With)?;
        let exception = self.parse_primary()?;
        Ok(Expression::exception(license, exception))
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        if let Some(operator) = token.kind.keyword() {
            return Err(ParseError::MissingOperand {
                offset: token.start,
                operator,
            });
        }
        match token.kind {
            TokenKind::Word(word) => {
                self.advance();
                Ok(Expression::Identifier(word))
            }
            TokenKind::LeftParen => self.parse_group(token.start),
            TokenKind::RightParen => Err(ParseError::UnmatchedParenthesis {
                offset: token.start,
            }),
            TokenKind::End => Err(ParseError::EmptyExpression {
                offset: token.start,
            }),
        }
    }

    fn parse_group(&mut self, start: usize) -> Result<Expression, ParseError> {
        self.enter()?;
        self.advance();
        match self.current.kind {
            TokenKind::RightParen => return Err(ParseError::EmptyGroup { offset: start }),
            TokenKind::End => return Err(ParseError::UnmatchedParenthesis { offset: start }),
            TokenKind::Word(_) | TokenKind::LeftParen => {}
        }
        let inner = self.parse_or()?;
        match self.current.kind {
            TokenKind::RightParen => {
                self.advance();
                self.depth -= 1;
                Ok(Expression::group(inner))
            }
            TokenKind::End => Err(ParseError::UnmatchedParenthesis { offset: start }),
            TokenKind::Word(_) | TokenKind::LeftParen => Err(self.unexpected()),
        }
    }

    fn ensure_operand(&self, operator: Keyword) -> Result<(), ParseError> {
        let missing = match &self.current.kind {
            TokenKind::RightParen | TokenKind::End => true,
            kind => kind.keyword().is_some(),
        };
        if missing {
            return Err(ParseError::MissingOperand {
                offset: self.current.start,
                operator,
            });
        }
        Ok(())
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        match self.current.kind {
            TokenKind::End => Ok(()),
            TokenKind::RightParen => Err(ParseError::UnmatchedParenthesis {
                offset: self.current.start,
            }),
            TokenKind::Word(_) | TokenKind::LeftParen => Err(self.unexpected()),
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            offset: self.current.start,
            found: self.current.describe(),
        }
    }
}
