use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Single-char
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Assign,

    // Literals
    Number(i64),
    Variable(String),

    // Actions
    Move,
    TurnL,
    TurnR,
    TurnAround,
    ShieldOn,
    ShieldOff,
    TakeFuel,
    Wait,

    // Control
    Loop,
    While,
    If,
    Elif,
    Else,

    // Connectives and comparators
    And,
    Or,
    Not,
    Gt,
    Lt,
    Eq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Sensors
    FuelLeft,
    OppLR,
    OppFB,
    NumBarrels,
    WallDist,
    BarrelLR,
    BarrelFB,

    // Any word the lexer could not classify; rejected by parser lookahead
    Ident(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, col: usize) -> Self {
        Self { kind, line, col }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        match self {
            LeftParen => write!(f, "("),
            RightParen => write!(f, ")"),
            LeftBrace => write!(f, "{{"),
            RightBrace => write!(f, "}}"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            Assign => write!(f, "="),
            Number(n) => write!(f, "{n}"),
            Variable(name) => write!(f, "${name}"),
            Move => write!(f, "move"),
            TurnL => write!(f, "turnL"),
            TurnR => write!(f, "turnR"),
            TurnAround => write!(f, "turnAround"),
            ShieldOn => write!(f, "shieldOn"),
            ShieldOff => write!(f, "shieldOff"),
            TakeFuel => write!(f, "takeFuel"),
            Wait => write!(f, "wait"),
            Loop => write!(f, "loop"),
            While => write!(f, "while"),
            If => write!(f, "if"),
            Elif => write!(f, "elif"),
            Else => write!(f, "else"),
            And => write!(f, "and"),
            Or => write!(f, "or"),
            Not => write!(f, "not"),
            Gt => write!(f, "gt"),
            Lt => write!(f, "lt"),
            Eq => write!(f, "eq"),
            Add => write!(f, "add"),
            Sub => write!(f, "sub"),
            Mul => write!(f, "mul"),
            Div => write!(f, "div"),
            FuelLeft => write!(f, "fuelLeft"),
            OppLR => write!(f, "oppLR"),
            OppFB => write!(f, "oppFB"),
            NumBarrels => write!(f, "numBarrels"),
            WallDist => write!(f, "wallDist"),
            BarrelLR => write!(f, "barrelLR"),
            BarrelFB => write!(f, "barrelFB"),
            Ident(s) => write!(f, "{s}"),
        }
    }
}
