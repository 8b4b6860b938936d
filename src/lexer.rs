use crate::token::{Token, TokenKind};
use logos::Logos;

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum LexToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Assign,

    // The sign belongs to the literal; the grammar has no minus operator.
    #[regex(r"-?[0-9]+")]
    Number,
    #[regex(r"\$[A-Za-z][A-Za-z0-9]*")]
    Variable,
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Word,
    #[regex(r"\n+")]
    Newline,
    #[regex(r"//[^\n]*")]
    LineComment,
}

pub struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    /// Total: never fails. Unclassifiable input is carried as an `Ident`
    /// token and rejected by the parser's lookahead, which can then show
    /// it in the error context.
    pub fn lex(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut line = 1usize;
        let mut col = 1usize;
        let mut lex = LexToken::lexer(self.src);
        let mut last_end = 0usize;
        while let Some(tok) = lex.next() {
            let span = lex.span();
            // Update line/col by counting the characters logos skipped
            let skipped = &self.src[last_end..span.start];
            for ch in skipped.chars() {
                if ch == '\n' {
                    line += 1;
                    col = 1;
                } else {
                    col += 1;
                }
            }
            let slice = &self.src[span.start..span.end];
            let t = match tok {
                Ok(LexToken::LParen) => TokenKind::LeftParen,
                Ok(LexToken::RParen) => TokenKind::RightParen,
                Ok(LexToken::LBrace) => TokenKind::LeftBrace,
                Ok(LexToken::RBrace) => TokenKind::RightBrace,
                Ok(LexToken::Comma) => TokenKind::Comma,
                Ok(LexToken::Semicolon) => TokenKind::Semicolon,
                Ok(LexToken::Assign) => TokenKind::Assign,
                Ok(LexToken::Number) => match slice.parse() {
                    Ok(n) => TokenKind::Number(n),
                    // out of i64 range; let the parser report it in place
                    Err(_) => TokenKind::Ident(slice.to_string()),
                },
                Ok(LexToken::Variable) => TokenKind::Variable(slice[1..].to_string()),
                Ok(LexToken::Word) => keyword(slice),
                Ok(LexToken::Newline) => {
                    line += span.len();
                    col = 1;
                    last_end = span.end;
                    continue;
                }
                Ok(LexToken::LineComment) => {
                    last_end = span.end;
                    continue;
                }
                Err(_) => TokenKind::Ident(slice.to_string()),
            };
            tokens.push(Token::new(t, line, col));
            col += slice.chars().count();
            last_end = span.end;
        }
        tokens
    }
}

fn keyword(s: &str) -> TokenKind {
    match s {
        "move" => TokenKind::Move,
        "turnL" => TokenKind::TurnL,
        "turnR" => TokenKind::TurnR,
        "turnAround" => TokenKind::TurnAround,
        "shieldOn" => TokenKind::ShieldOn,
        "shieldOff" => TokenKind::ShieldOff,
        "takeFuel" => TokenKind::TakeFuel,
        "wait" => TokenKind::Wait,
        "loop" => TokenKind::Loop,
        "while" => TokenKind::While,
        "if" => TokenKind::If,
        "elif" => TokenKind::Elif,
        "else" => TokenKind::Else,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "gt" => TokenKind::Gt,
        "lt" => TokenKind::Lt,
        "eq" => TokenKind::Eq,
        "add" => TokenKind::Add,
        "sub" => TokenKind::Sub,
        "mul" => TokenKind::Mul,
        "div" => TokenKind::Div,
        "fuelLeft" => TokenKind::FuelLeft,
        "oppLR" => TokenKind::OppLR,
        "oppFB" => TokenKind::OppFB,
        "numBarrels" => TokenKind::NumBarrels,
        "wallDist" => TokenKind::WallDist,
        "barrelLR" => TokenKind::BarrelLR,
        "barrelFB" => TokenKind::BarrelFB,
        _ => TokenKind::Ident(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn punctuation_needs_no_whitespace() {
        // "move;" and "move ;" must tokenize identically
        let glued: Vec<_> = Lexer::new("move;").lex().into_iter().map(|t| t.kind).collect();
        let spaced: Vec<_> = Lexer::new("move ;").lex().into_iter().map(|t| t.kind).collect();
        assert_eq!(glued, spaced);
        assert_eq!(glued, vec![TokenKind::Move, TokenKind::Semicolon]);
    }

    #[test]
    fn lex_numbers_variables_and_comments() {
        let src = "$reps = -12; // set up\nmove($reps);";
        let kinds: Vec<_> = Lexer::new(src).lex().into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Variable("reps".into()),
                TokenKind::Assign,
                TokenKind::Number(-12),
                TokenKind::Semicolon,
                TokenKind::Move,
                TokenKind::LeftParen,
                TokenKind::Variable("reps".into()),
                TokenKind::RightParen,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn unknown_words_become_idents() {
        let toks = Lexer::new("fly;").lex();
        assert_eq!(toks[0].kind, TokenKind::Ident("fly".into()));
    }

    #[test]
    fn tracks_line_and_col() {
        let toks = Lexer::new("move;\n  turnL;").lex();
        let turn = toks.iter().find(|t| t.kind == TokenKind::TurnL).unwrap();
        assert_eq!((turn.line, turn.col), (2, 3));
    }
}
