//! Right-nested parsing driven by an explicit stack of open scopes.
//!
//! A scope is either the whole input, the inside of a `(`, or the right
//! operand of an operator. Each scope has a single accumulator. An operator
//! keyword opens an operand scope holding the accumulator as its left
//! operand; the operand scope runs until a `)` or the end of input, which it
//! leaves for the enclosing scope to see. A `(` opens a group scope that
//! consumes its matching `)`.
//!
//! Only group scopes count against the depth limit. Operand scopes live on
//! the same heap stack, so operator chains of any length are accepted.

use log::debug;

use crate::ast::Expression;
use crate::errors::ParseError;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Strictness {
    Lenient,
    Strict,
}

enum Frame {
    Group {
        start: usize,
        outer: Option<Expression>,
    },
    Operand {
        start: usize,
        operator: Keyword,
        left: Option<Expression>,
    },
}

pub(super) struct ScopeParser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    strictness: Strictness,
    max_depth: usize,
    open_groups: usize,
    frames: Vec<Frame>,
}

impl<'a> ScopeParser<'a> {
    pub(super) fn new(input: &'a str, strictness: Strictness, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            strictness,
            max_depth,
            open_groups: 0,
            frames: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> Result<Option<Expression>, ParseError> {
        let mut expression = None;
        loop {
            let token = self.current.clone();
            match &token.kind {
                TokenKind::End => {
                    let Some(frame) = self.frames.pop() else {
                        return Ok(expression);
                    };
                    expression = self.close(frame, expression, &token)?;
                }
                TokenKind::RightParen => {
                    let Some(frame) = self.frames.pop() else {
                        self.reject(
                            ParseError::UnmatchedParenthesis {
                                offset: token.start,
                            },
                            "ignoring input after unmatched ')'",
                        )?;
                        return Ok(expression);
                    };
                    if matches!(frame, Frame::Group { .. }) {
                        self.advance();
                    }
                    expression = self.close(frame, expression, &token)?;
                }
                TokenKind::LeftParen => {
                    self.overwrite(expression.as_ref(), &token)?;
                    self.enter(&token)?;
                    self.open_groups += 1;
                    self.frames.push(Frame::Group {
                        start: token.start,
                        outer: expression.take(),
                    });
                    self.advance();
                }
                TokenKind::Word(word) => {
                    if let Some(operator) = token.kind.keyword() {
                        if expression.is_none() {
                            self.reject(
                                ParseError::MissingOperand {
                                    offset: token.start,
                                    operator,
                                },
                                "using the right operand alone",
                            )?;
                        }
                        self.frames.push(Frame::Operand {
                            start: token.start,
                            operator,
                            left: expression.take(),
                        });
                    } else {
                        self.overwrite(expression.as_ref(), &token)?;
                        expression = Some(Expression::identifier(word.as_str()));
                    }
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn enter(&self, token: &Token) -> Result<(), ParseError> {
        if self.open_groups >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                offset: token.start,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Finish the innermost scope, folding its accumulator into its frame.
    fn close(
        &mut self,
        frame: Frame,
        inner: Option<Expression>,
        terminator: &Token,
    ) -> Result<Option<Expression>, ParseError> {
        match frame {
            Frame::Group { start, outer } => {
                self.open_groups -= 1;
                if terminator.kind == TokenKind::End {
                    self.reject(
                        ParseError::UnmatchedParenthesis { offset: start },
                        "closing '(' left open at end of input",
                    )?;
                }
                let Some(inner) = inner else {
                    self.reject(
                        ParseError::EmptyGroup { offset: start },
                        "dropping empty parentheses",
                    )?;
                    return Ok(outer);
                };
                Ok(Some(Expression::group(inner)))
            }
            Frame::Operand {
                start,
                operator,
                left,
            } => match (left, inner) {
                (Some(left), Some(right)) => Ok(Some(combine(operator, left, right))),
                (left, None) => {
                    self.reject(
                        ParseError::MissingOperand {
                            offset: terminator.start,
                            operator,
                        },
                        "keeping the left operand",
                    )?;
                    Ok(left)
                }
                (None, right) => {
                    // Only reachable leniently; strict mode rejects the keyword.
                    debug!("collapsing '{operator}' at byte {start} onto its right operand");
                    Ok(right)
                }
            },
        }
    }

    /// A second operand in the same scope replaces the first.
    fn overwrite(&self, existing: Option<&Expression>, token: &Token) -> Result<(), ParseError> {
        if existing.is_none() {
            return Ok(());
        }
        self.reject(
            ParseError::UnexpectedToken {
                offset: token.start,
                found: token.describe(),
            },
            "discarding earlier operand",
        )
    }

    fn reject(&self, error: ParseError, recovery: &str) -> Result<(), ParseError> {
        match self.strictness {
            Strictness::Strict => Err(error),
            Strictness::Lenient => {
                debug!("{error}; {recovery}");
                Ok(())
            }
        }
    }
}

fn combine(operator: Keyword, left: Expression, right: Expression) -> Expression {
    match operator {
        Keyword::And => Expression::conjunction(left, right),
        Keyword::Or => Expression::disjunction(left, right),
        Keyword::With => Expression::exception(left, right),
    }
}
