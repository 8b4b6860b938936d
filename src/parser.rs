use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    Eof { expected: &'static str },
    #[error("expected {expected} at line {line}, col {col}\n   @ ... {context} ...")]
    Expected {
        expected: &'static str,
        line: usize,
        col: usize,
        context: String,
    },
    #[error("block requires at least one statement, at line {line}, col {col}\n   @ ... {context} ...")]
    EmptyBlock {
        line: usize,
        col: usize,
        context: String,
    },
}

/// Recursive-descent parser over the robot grammar. One function per
/// production, dispatched on a single token of lookahead; fails fast on
/// the first mismatch and never returns a partial program.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(src: &str) -> Self {
        let tokens = Lexer::new(src).lex();
        Self { tokens, pos: 0 }
    }

    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.statement()?);
        }
        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek_kind().cloned() {
            Some(TokenKind::Loop) => self.loop_stmt(),
            Some(TokenKind::While) => self.while_stmt(),
            Some(TokenKind::If) => self.if_stmt(),
            Some(TokenKind::Variable(_)) => self.assignment(),
            Some(k) if action_kind(&k).is_some() => self.action(),
            _ => Err(self.error_expected("a statement")),
        }
    }

    fn action(&mut self) -> Result<Stmt, ParseError> {
        let kind = match self.peek_kind().and_then(action_kind) {
            Some(kind) => kind,
            None => return Err(self.error_expected("an action")),
        };
        self.advance();
        let count = if kind.takes_count() && self.check(&TokenKind::LeftParen) {
            self.advance();
            let count = self.expression()?;
            self.consume(TokenKind::RightParen, "')'")?;
            Some(count)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Action { kind, count })
    }

    fn loop_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::Loop, "'loop'")?;
        Ok(Stmt::Loop(self.block()?))
    }

    fn while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::While, "'while'")?;
        self.consume(TokenKind::LeftParen, "'('")?;
        let cond = self.condition()?;
        self.consume(TokenKind::RightParen, "')'")?;
        let body = self.block()?;
        Ok(Stmt::While { cond, body })
    }

    fn if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::If, "'if'")?;
        self.consume(TokenKind::LeftParen, "'('")?;
        let cond = self.condition()?;
        self.consume(TokenKind::RightParen, "')'")?;
        let then_block = self.block()?;
        let mut elif_clauses = Vec::new();
        while self.check(&TokenKind::Elif) {
            self.advance();
            self.consume(TokenKind::LeftParen, "'('")?;
            let elif_cond = self.condition()?;
            self.consume(TokenKind::RightParen, "')'")?;
            elif_clauses.push((elif_cond, self.block()?));
        }
        let else_block = if self.check(&TokenKind::Else) {
            self.advance();
            Some(self.block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_block,
            elif_clauses,
            else_block,
        })
    }

    fn assignment(&mut self) -> Result<Stmt, ParseError> {
        let name = match self.peek_kind() {
            Some(TokenKind::Variable(name)) => name.clone(),
            _ => return Err(self.error_expected("a variable")),
        };
        self.advance();
        self.consume(TokenKind::Assign, "'='")?;
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Assign { name, value })
    }

    fn block(&mut self) -> Result<Block, ParseError> {
        self.consume(TokenKind::LeftBrace, "'{'")?;
        if self.check(&TokenKind::RightBrace) {
            return Err(self.error_empty_block());
        }
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(ParseError::Eof { expected: "'}'" });
            }
            statements.push(self.statement()?);
        }
        self.consume(TokenKind::RightBrace, "'}'")?;
        Ok(Block { statements })
    }

    fn condition(&mut self) -> Result<Cond, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::And) => {
                self.advance();
                let (a, b) = self.cond_pair()?;
                Ok(Cond::And(Box::new(a), Box::new(b)))
            }
            Some(TokenKind::Or) => {
                self.advance();
                let (a, b) = self.cond_pair()?;
                Ok(Cond::Or(Box::new(a), Box::new(b)))
            }
            Some(TokenKind::Not) => {
                self.advance();
                self.consume(TokenKind::LeftParen, "'('")?;
                let inner = self.condition()?;
                self.consume(TokenKind::RightParen, "')'")?;
                Ok(Cond::Not(Box::new(inner)))
            }
            Some(TokenKind::Gt) | Some(TokenKind::Lt) | Some(TokenKind::Eq) => {
                let op = match self.peek_kind() {
                    Some(TokenKind::Gt) => CmpOp::Gt,
                    Some(TokenKind::Lt) => CmpOp::Lt,
                    _ => CmpOp::Eq,
                };
                self.advance();
                let (left, right) = self.expr_pair()?;
                Ok(Cond::Compare { op, left, right })
            }
            _ => Err(self.error_expected("a condition")),
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind().cloned() {
            Some(TokenKind::Number(n)) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Some(TokenKind::Variable(name)) => {
                self.advance();
                Ok(Expr::Var(name))
            }
            Some(TokenKind::Add) | Some(TokenKind::Sub) | Some(TokenKind::Mul)
            | Some(TokenKind::Div) => {
                let op = match self.peek_kind() {
                    Some(TokenKind::Add) => ArithOp::Add,
                    Some(TokenKind::Sub) => ArithOp::Sub,
                    Some(TokenKind::Mul) => ArithOp::Mul,
                    _ => ArithOp::Div,
                };
                self.advance();
                let (left, right) = self.expr_pair()?;
                Ok(Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            Some(k) if sensor_kind(&k).is_some() => self.sensor(),
            _ => Err(self.error_expected("an expression")),
        }
    }

    fn sensor(&mut self) -> Result<Expr, ParseError> {
        let kind = match self.peek_kind().and_then(sensor_kind) {
            Some(kind) => kind,
            None => return Err(self.error_expected("a sensor")),
        };
        self.advance();
        let index = if kind.takes_index() && self.check(&TokenKind::LeftParen) {
            self.advance();
            let index = self.expression()?;
            self.consume(TokenKind::RightParen, "')'")?;
            Some(Box::new(index))
        } else {
            None
        };
        Ok(Expr::Sensor { kind, index })
    }

    fn expr_pair(&mut self) -> Result<(Expr, Expr), ParseError> {
        self.consume(TokenKind::LeftParen, "'('")?;
        let left = self.expression()?;
        self.consume(TokenKind::Comma, "','")?;
        let right = self.expression()?;
        self.consume(TokenKind::RightParen, "')'")?;
        Ok((left, right))
    }

    fn cond_pair(&mut self) -> Result<(Cond, Cond), ParseError> {
        self.consume(TokenKind::LeftParen, "'('")?;
        let left = self.condition()?;
        self.consume(TokenKind::Comma, "','")?;
        let right = self.condition()?;
        self.consume(TokenKind::RightParen, "')'")?;
        Ok((left, right))
    }

    // Utilities
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }
    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }
    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn consume(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if self.check(&kind) {
            self.advance();
            return Ok(());
        }
        Err(self.error_expected(expected))
    }

    /// Up to five unconsumed tokens, rendered as source text, for error
    /// messages.
    fn context(&self) -> String {
        self.tokens[self.pos..]
            .iter()
            .take(5)
            .map(|t| t.kind.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn error_expected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(t) => ParseError::Expected {
                expected,
                line: t.line,
                col: t.col,
                context: self.context(),
            },
            None => ParseError::Eof { expected },
        }
    }

    fn error_empty_block(&self) -> ParseError {
        match self.peek() {
            Some(t) => ParseError::EmptyBlock {
                line: t.line,
                col: t.col,
                context: self.context(),
            },
            None => ParseError::Eof { expected: "a statement" },
        }
    }
}

fn action_kind(kind: &TokenKind) -> Option<ActionKind> {
    match kind {
        TokenKind::Move => Some(ActionKind::Move),
        TokenKind::TurnL => Some(ActionKind::TurnL),
        TokenKind::TurnR => Some(ActionKind::TurnR),
        TokenKind::TurnAround => Some(ActionKind::TurnAround),
        TokenKind::ShieldOn => Some(ActionKind::ShieldOn),
        TokenKind::ShieldOff => Some(ActionKind::ShieldOff),
        TokenKind::TakeFuel => Some(ActionKind::TakeFuel),
        TokenKind::Wait => Some(ActionKind::Wait),
        _ => None,
    }
}

fn sensor_kind(kind: &TokenKind) -> Option<SensorKind> {
    match kind {
        TokenKind::FuelLeft => Some(SensorKind::FuelLeft),
        TokenKind::OppLR => Some(SensorKind::OppLR),
        TokenKind::OppFB => Some(SensorKind::OppFB),
        TokenKind::NumBarrels => Some(SensorKind::NumBarrels),
        TokenKind::WallDist => Some(SensorKind::WallDist),
        TokenKind::BarrelLR => Some(SensorKind::BarrelLR),
        TokenKind::BarrelFB => Some(SensorKind::BarrelFB),
        _ => None,
    }
}
