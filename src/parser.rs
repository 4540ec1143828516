//! Parsing: tokens → expression tree.
//!
//! Recursive descent over this grammar, lowest precedence first:
//!
//! ```text
//! expr      := term (('+' | '-') term)*
//! term      := unary (('*' | '/' | '%') unary)*
//! unary     := ('+' | '-') unary | power
//! power     := primary ('**' unary)?
//! primary   := NUMBER | '(' expr ')'
//! ```
//!
//! `**` binds tighter than a leading sign, so `-2**2` is `-(2**2)`.
//! Its right operand goes back through `unary`, which makes it right
//! associative and lets the exponent carry a sign (`2**-1`).
//!
//! Every recursive descent (parenthesis, sign, exponent) counts against
//! a nesting limit so hostile input cannot exhaust the stack. Operator
//! chains grow the tree without nesting, so the token count is capped too.

use crate::types::{BinaryOp, EvalError, Expr, Token, TokenKind, UnaryOp};

/// Longest accepted token stream.
pub const MAX_TOKENS: usize = 4096;

/// Parse a token stream into an expression tree.
pub fn parse(tokens: &[Token], max_depth: usize) -> Result<Expr, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(EvalError::TooLong { limit: MAX_TOKENS });
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth,
    };
    let expr = parser.expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if `select` maps it to an operator.
    fn take_op<T>(&mut self, select: impl Fn(&TokenKind) -> Option<T>) -> Option<T> {
        let op = self.peek().and_then(|t| select(&t.kind))?;
        self.pos += 1;
        Some(op)
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(EvalError::TooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.term()?;
        while let Some(op) = self.take_op(|k| match k {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }) {
            let right = self.term()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.unary()?;
        while let Some(op) = self.take_op(|k| match k {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            _ => None,
        }) {
            let right = self.unary()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let sign = self.take_op(|k| match k {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            _ => None,
        });

        match sign {
            Some(op) => {
                self.descend()?;
                let operand = self.unary()?;
                self.ascend();
                Ok(Expr::unary(op, operand))
            }
            None => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;

        if self
            .take_op(|k| matches!(k, TokenKind::StarStar).then_some(()))
            .is_none()
        {
            return Ok(base);
        }

        self.descend()?;
        let exponent = self.unary()?;
        self.ascend();
        Ok(Expr::binary(base, BinaryOp::Pow, exponent))
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let Some(token) = self.advance() else {
            return Err(EvalError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::number(value)),
            TokenKind::LParen => {
                let open = token.pos;
                self.descend()?;
                let inner = self.expr()?;
                self.ascend();
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(unexpected(other)),
                    None => Err(EvalError::UnclosedParen { pos: open }),
                }
            }
            _ => Err(unexpected(token)),
        }
    }
}

fn unexpected(token: &Token) -> EvalError {
    EvalError::UnexpectedToken {
        found: token.kind.to_string(),
        pos: token.pos,
    }
}

// ============================================================================
// TESTS
// ============================================================================
