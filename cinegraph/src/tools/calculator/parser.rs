//! Recursive-descent parser over [`Token`]s.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr     := arith (cmp_op arith)*
//! arith    := term (('+' | '-') term)*
//! term     := unary (('*' | '/' | '//' | '%') unary)*
//! unary    := ('+' | '-') unary | power
//! power    := atom ['**' unary]
//! atom     := INT | FLOAT | NAME | NAME '(' args ')' | '(' expr ')' | '(' tuple ')' | '[' items ']'
//! ```
//!
//! `**` is right-associative and binds tighter than a unary minus on its left, so
//! `-2 ** 2` is `-4`.

use super::lexer::Token;
use super::value::{BinOp, CmpOp, UnaryOp, Value};
use super::CalcError;

/// Deepest nesting of unary operators, powers, parentheses and calls.
const MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Name(String),
    Unary(UnaryOp, Box<Expr>),
    /// Left-associative chain: `first op1 e1 op2 e2 ...`.
    Chain(Box<Expr>, Vec<(BinOp, Expr)>),
    Power(Box<Expr>, Box<Expr>),
    Compare(Box<Expr>, Vec<(CmpOp, Expr)>),
    Call(String, Vec<Expr>),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses the whole token stream as one expression.
    pub fn parse(mut self) -> Result<Expr, CalcError> {
        let expr = self.expr()?;
        if self.pos != self.tokens.len() {
            return Err(CalcError::Syntax);
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), CalcError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(CalcError::Syntax)
        }
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let first = self.arith()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => CmpOp::Lt,
                Some(Token::Le) => CmpOp::Le,
                Some(Token::Gt) => CmpOp::Gt,
                Some(Token::Ge) => CmpOp::Ge,
                Some(Token::EqEq) => CmpOp::Eq,
                Some(Token::NotEq) => CmpOp::Ne,
                _ => break,
            };
            self.pos += 1;
            rest.push((op, self.arith()?));
        }
        Ok(if rest.is_empty() {
            first
        } else {
            Expr::Compare(Box::new(first), rest)
        })
    }

    fn arith(&mut self) -> Result<Expr, CalcError> {
        self.chain(Self::term, |t| match t {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        self.chain(Self::unary, |t| match t {
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            Token::DoubleSlash => Some(BinOp::FloorDiv),
            Token::Percent => Some(BinOp::Mod),
            _ => None,
        })
    }

    fn chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, CalcError>,
        op_for: fn(&Token) -> Option<BinOp>,
    ) -> Result<Expr, CalcError> {
        let first = operand(self)?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek().and_then(op_for) {
            self.pos += 1;
            rest.push((op, operand(self)?));
        }
        Ok(if rest.is_empty() {
            first
        } else {
            Expr::Chain(Box::new(first), rest)
        })
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        let result = match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.unary().map(|e| Expr::Unary(UnaryOp::Neg, Box::new(e)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary().map(|e| Expr::Unary(UnaryOp::Pos, Box::new(e)))
            }
            _ => self.power(),
        };
        self.depth -= 1;
        result
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.atom()?;
        if self.eat(&Token::DoubleStar) {
            let exponent = self.unary()?;
            return Ok(Expr::Power(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, CalcError> {
        match self.advance() {
            Some(Token::Int(i)) => Ok(Expr::Literal(Value::Int(i))),
            Some(Token::Float(f)) => Ok(Expr::Literal(Value::Float(f))),
            Some(Token::Name(name)) => {
                if name == "True" || name == "False" {
                    Ok(Expr::Literal(Value::Bool(name == "True")))
                } else if self.eat(&Token::LParen) {
                    let args = self.items(&Token::RParen)?;
                    Ok(Expr::Call(name, args))
                } else {
                    Ok(Expr::Name(name))
                }
            }
            Some(Token::LParen) => {
                if self.eat(&Token::RParen) {
                    return Ok(Expr::Tuple(Vec::new()));
                }
                let first = self.expr()?;
                if self.eat(&Token::RParen) {
                    return Ok(first);
                }
                self.expect(&Token::Comma)?;
                let mut items = vec![first];
                items.extend(self.items(&Token::RParen)?);
                Ok(Expr::Tuple(items))
            }
            Some(Token::LBracket) => Ok(Expr::List(self.items(&Token::RBracket)?)),
            _ => Err(CalcError::Syntax),
        }
    }

    /// Comma-separated expressions up to and including `close`; a trailing comma is allowed.
    fn items(&mut self, close: &Token) -> Result<Vec<Expr>, CalcError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.expr()?);
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }
}
