// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL lexer
//!
//! Scans a statement into tokens, tracking line/column positions.
//! Whitespace and `--` comments are consumed silently; unquoted
//! identifiers fold to ASCII lower case and keywords are recognized after
//! folding.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Location, ParserError, ParserResult};

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    As,
    And,
    Or,
    True,
    False,
    Null,
    Create,
    Table,
    Insert,
    Into,
    Values,
    Drop,
    Show,
    Tables,
    Columns,
    Describe,
    Import,
    Not,
    If,
    Exists,
}

impl Keyword {
    /// Looks up a case-folded identifier; `None` means a plain identifier.
    fn from_ident(ident: &str) -> Option<Keyword> {
        match ident {
            "select" => Some(Keyword::Select),
            "from" => Some(Keyword::From),
            "where" => Some(Keyword::Where),
            "as" => Some(Keyword::As),
            "and" => Some(Keyword::And),
            "or" => Some(Keyword::Or),
            "true" => Some(Keyword::True),
            "false" => Some(Keyword::False),
            "null" => Some(Keyword::Null),
            "create" => Some(Keyword::Create),
            "table" => Some(Keyword::Table),
            "insert" => Some(Keyword::Insert),
            "into" => Some(Keyword::Into),
            "values" => Some(Keyword::Values),
            "drop" => Some(Keyword::Drop),
            "show" => Some(Keyword::Show),
            "tables" => Some(Keyword::Tables),
            "columns" => Some(Keyword::Columns),
            "describe" => Some(Keyword::Describe),
            "import" => Some(Keyword::Import),
            "not" => Some(Keyword::Not),
            "if" => Some(Keyword::If),
            "exists" => Some(Keyword::Exists),
            _ => None,
        }
    }
}

/// Punctuation and operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    LParen,
    RParen,
    Comma,
    Period,
    Semicolon,
}

impl Symbol {
    pub fn text(&self) -> &'static str {
        match self {
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::Eq => "=",
            Symbol::Neq => "<>",
            Symbol::Lt => "<",
            Symbol::LtEq => "<=",
            Symbol::Gt => ">",
            Symbol::GtEq => ">=",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::Comma => ",",
            Symbol::Period => ".",
            Symbol::Semicolon => ";",
        }
    }
}

/// One scanned token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Case-folded identifier.
    Ident(String),
    Keyword(Keyword),
    /// Numeric literal, unparsed text.
    Number(String),
    /// Single-quoted string literal, quotes stripped.
    StringLit(String),
    Symbol(Symbol),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) => f.write_str(s),
            Token::Keyword(k) => write!(f, "{k:?}"),
            Token::Number(s) => f.write_str(s),
            Token::StringLit(s) => write!(f, "'{s}'"),
            Token::Symbol(s) => f.write_str(s.text()),
        }
    }
}

/// SQL lexer over a statement string.
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    location: Location,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iter: input.chars().peekable(),
            location: Location::default(),
        }
    }

    /// Scans the whole input into `(token, location)` pairs.
    pub fn tokenize(mut self) -> ParserResult<Vec<(Token, Location)>> {
        let mut tokens = vec![];
        loop {
            self.skip_trivia();
            let location = self.location;
            match self.next_token()? {
                Some(token) => tokens.push((token, location)),
                None => break,
            }
        }
        Ok(tokens)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        if ch == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(ch)
    }

    fn next_if_is(&mut self, expected: char) -> bool {
        if self.iter.peek() == Some(&expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.iter.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.next_char();
                }
                Some('-') => {
                    // only a comment when followed by a second dash
                    let mut ahead = self.iter.clone();
                    ahead.next();
                    if ahead.peek() == Some(&'-') {
                        while let Some(ch) = self.next_char() {
                            if ch == '\n' {
                                break;
                            }
                        }
                    } else {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    fn next_token(&mut self) -> ParserResult<Option<Token>> {
        let Some(&ch) = self.iter.peek() else {
            return Ok(None);
        };
        let token = match ch {
            ch if is_ident_start(ch) => {
                self.next_char();
                let ident = self.scan_ident(ch);
                match Keyword::from_ident(&ident) {
                    Some(kw) => Token::Keyword(kw),
                    None => Token::Ident(ident),
                }
            }
            ch if ch.is_ascii_digit() => {
                self.next_char();
                Token::Number(self.scan_number(ch))
            }
            '\'' => {
                self.next_char();
                Token::StringLit(self.scan_string_literal()?)
            }
            _ => {
                self.next_char();
                Token::Symbol(self.scan_symbol(ch)?)
            }
        };
        Ok(Some(token))
    }

    fn scan_ident(&mut self, first: char) -> String {
        let mut ident = String::new();
        ident.push(first.to_ascii_lowercase());
        while let Some(&ch) = self.iter.peek() {
            if is_ident_part(ch) {
                self.next_char();
                ident.push(ch.to_ascii_lowercase());
            } else {
                break;
            }
        }
        ident
    }

    fn scan_number(&mut self, first: char) -> String {
        let mut text = String::new();
        text.push(first);
        while let Some(&ch) = self.iter.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                self.next_char();
                text.push(ch);
            } else {
                break;
            }
        }
        text
    }

    fn scan_string_literal(&mut self) -> ParserResult<String> {
        let start = self.location;
        let mut text = String::new();
        loop {
            match self.next_char() {
                Some('\'') => return Ok(text),
                Some(ch) => text.push(ch),
                None => return Err(ParserError::UnterminatedString { location: start }),
            }
        }
    }

    fn scan_symbol(&mut self, ch: char) -> ParserResult<Symbol> {
        let symbol = match ch {
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '=' => Symbol::Eq,
            '<' => {
                if self.next_if_is('>') {
                    Symbol::Neq
                } else if self.next_if_is('=') {
                    Symbol::LtEq
                } else {
                    Symbol::Lt
                }
            }
            '>' => {
                if self.next_if_is('=') {
                    Symbol::GtEq
                } else {
                    Symbol::Gt
                }
            }
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            ',' => Symbol::Comma,
            '.' => Symbol::Period,
            ';' => Symbol::Semicolon,
            _ => {
                return Err(ParserError::UnexpectedChar {
                    ch,
                    location: self.location,
                });
            }
        };
        Ok(symbol)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_keywords_and_idents_fold_case() {
        assert_eq!(
            tokens("SELECT A1 From a"),
            vec![
                Token::Keyword(Keyword::Select),
                Token::Ident("a1".into()),
                Token::Keyword(Keyword::From),
                Token::Ident("a".into()),
            ]
        );
    }

    #[test]
    fn test_ddl_keywords() {
        assert_eq!(
            tokens("Create TABLE if not exists"),
            vec![
                Token::Keyword(Keyword::Create),
                Token::Keyword(Keyword::Table),
                Token::Keyword(Keyword::If),
                Token::Keyword(Keyword::Not),
                Token::Keyword(Keyword::Exists),
            ]
        );
        // type names are plain identifiers, not keywords
        assert_eq!(tokens("integer"), vec![Token::Ident("integer".into())]);
    }

    #[test]
    fn test_two_char_symbols() {
        assert_eq!(
            tokens("<= >= <> < > ="),
            vec![
                Token::Symbol(Symbol::LtEq),
                Token::Symbol(Symbol::GtEq),
                Token::Symbol(Symbol::Neq),
                Token::Symbol(Symbol::Lt),
                Token::Symbol(Symbol::Gt),
                Token::Symbol(Symbol::Eq),
            ]
        );
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(
            tokens("42 3.14 'hi'"),
            vec![
                Token::Number("42".into()),
                Token::Number("3.14".into()),
                Token::StringLit("hi".into()),
            ]
        );
    }

    #[test]
    fn test_comment_skipped() {
        assert_eq!(
            tokens("1 -- rest of line\n2"),
            vec![Token::Number("1".into()), Token::Number("2".into())]
        );
        // a single dash is still the minus operator
        assert_eq!(
            tokens("1 - 2"),
            vec![
                Token::Number("1".into()),
                Token::Symbol(Symbol::Minus),
                Token::Number("2".into()),
            ]
        );
    }

    #[test]
    fn test_locations() {
        let toks = Lexer::new("select\n  a1").tokenize().unwrap();
        assert_eq!(toks[0].1, Location { line: 1, column: 1 });
        assert_eq!(toks[1].1, Location { line: 2, column: 3 });
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("'abc").tokenize().unwrap_err();
        assert!(matches!(err, ParserError::UnterminatedString { .. }));
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new("select @").tokenize().unwrap_err();
        assert!(matches!(err, ParserError::UnexpectedChar { ch: '@', .. }));
    }
}
