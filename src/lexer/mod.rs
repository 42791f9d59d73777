//! # VTX1 Lexer
//!
//! Tokenizes VTX1 assembly source code into a stream of tokens.
//!
//! Matching is greedy against a fixed priority list: whitespace/comments,
//! then mnemonics and register names (closed, case-insensitive vocabularies),
//! then punctuation, then directives, then literals in four radices, then
//! identifiers, then newline. Any other character yields a lex error and
//! lexing continues — the lexer never aborts early.
//!
//! ## Balanced ternary
//!
//! `0t` followed by one or more of `- 0 +` decodes left-to-right as
//! `value = value * 3 + digit`, equivalent to the positional definition
//! `Σ d_i · 3^i`.

pub mod cursor;
pub mod mnemonic;
pub mod token;


use crate::error::{AsmError, ErrorKind, Span};
use cursor::Cursor;
use mnemonic::Mnemonic;
use token::{Directive, Register, Token, TokenKind};

pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<AsmError>,
}

#[must_use]
pub fn tokenize(source: &str) -> LexResult {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while !cursor.is_at_end() {
        match lex_token(&mut cursor) {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }

    let (l, c) = cursor.current_pos();
    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        span: Span { line: l, col: c },
    });

    LexResult { tokens, errors }
}

fn lex_token(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    while matches!(cursor.peek(), Some(' ' | '\t')) {
        cursor.advance();
    }

    if cursor.is_at_end() {
        return Ok(None);
    }

    let (sl, sc) = cursor.current_pos();
    let ch = cursor.peek().unwrap();

    match ch {
        '\n' | '\r' => lex_newline(cursor, sl, sc),
        ';' => lex_comment(cursor, sl, sc),
        ',' => single(cursor, sl, sc, TokenKind::Comma, ","),
        ':' => single(cursor, sl, sc, TokenKind::Colon, ":"),
        '+' => single(cursor, sl, sc, TokenKind::Plus, "+"),
        '[' => single(cursor, sl, sc, TokenKind::LBracket, "["),
        ']' => single(cursor, sl, sc, TokenKind::RBracket, "]"),
        '"' => lex_string(cursor, sl, sc),
        '.' => lex_directive(cursor, sl, sc),
        c if c.is_ascii_digit() => lex_number(cursor, sl, sc),
        c if c.is_alphabetic() || c == '_' => lex_word(cursor, sl, sc),
        _ => {
            cursor.advance();
            Err(AsmError::error(
                ErrorKind::UnexpectedCharacter(ch),
                cursor.make_span(sl, sc),
            ))
        }
    }
}

fn single(
    cursor: &mut Cursor,
    sl: usize,
    sc: usize,
    kind: TokenKind,
    lexeme: &str,
) -> Result<Option<Token>, AsmError> {
    cursor.advance();
    Ok(Some(Token {
        kind,
        lexeme: lexeme.into(),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_newline(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    if cursor.peek() == Some('\r') {
        cursor.advance();
        if cursor.peek() == Some('\n') {
            cursor.advance();
        }
    } else {
        cursor.advance();
    }
    Ok(Some(Token {
        kind: TokenKind::Newline,
        lexeme: "\n".into(),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_comment(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    cursor.advance();
    let mut text = String::new();
    while let Some(ch) = cursor.peek() {
        if ch == '\n' || ch == '\r' {
            break;
        }
        cursor.advance();
        text.push(ch);
    }
    Ok(Some(Token {
        kind: TokenKind::Comment(text.clone()),
        lexeme: format!(";{text}"),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_string(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    cursor.advance();
    let mut text = String::new();
    loop {
        match cursor.peek() {
            None | Some('\n') | Some('\r') => {
                return Err(AsmError::error(
                    ErrorKind::UnterminatedString,
                    cursor.make_span(sl, sc),
                ));
            }
            Some('"') => {
                cursor.advance();
                break;
            }
            Some(ch) => {
                cursor.advance();
                text.push(ch);
            }
        }
    }
    Ok(Some(Token {
        kind: TokenKind::Str(text.clone()),
        lexeme: format!("\"{text}\""),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_directive(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    cursor.advance();
    let mut word = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_alphabetic()) {
        word.push(cursor.advance().unwrap());
    }
    let upper = word.to_ascii_uppercase();
    let directive = Directive::from_str(&upper).ok_or_else(|| {
        AsmError::error(
            ErrorKind::InvalidLiteral("directive", format!(".{word}")),
            cursor.make_span(sl, sc),
        )
    })?;
    Ok(Some(Token {
        kind: TokenKind::Directive(directive),
        lexeme: format!(".{word}"),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_number(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    // Balanced ternary, binary, and hex all share the leading '0' with a
    // radix letter; decimal is every other sequence of digits.
    if cursor.peek() == Some('0') {
        match cursor.peek_at(1) {
            Some('t') | Some('T') => return lex_ternary(cursor, sl, sc),
            Some('b') | Some('B') => {
                return lex_radix(cursor, sl, sc, 2, "binary", TokenKind::Binary)
            }
            Some('x') | Some('X') => {
                return lex_radix(cursor, sl, sc, 16, "hexadecimal", TokenKind::Hex)
            }
            _ => {}
        }
    }

    let mut digits = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        digits.push(cursor.advance().unwrap());
    }
    let value = digits.parse::<i64>().map_err(|_| {
        AsmError::error(
            ErrorKind::InvalidLiteral("decimal", digits.clone()),
            cursor.make_span(sl, sc),
        )
    })?;
    Ok(Some(Token {
        kind: TokenKind::Decimal(value),
        lexeme: digits,
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_radix(
    cursor: &mut Cursor,
    sl: usize,
    sc: usize,
    radix: u32,
    name: &'static str,
    make: fn(i64) -> TokenKind,
) -> Result<Option<Token>, AsmError> {
    cursor.advance(); // '0'
    cursor.advance(); // radix letter
    let mut raw = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_digit(radix)) {
        raw.push(cursor.advance().unwrap());
    }
    if raw.is_empty() {
        return Err(AsmError::error(
            ErrorKind::InvalidLiteral(name, raw),
            cursor.make_span(sl, sc),
        ));
    }
    let value = i64::from_str_radix(&raw, radix).map_err(|_| {
        AsmError::error(
            ErrorKind::InvalidLiteral(name, raw.clone()),
            cursor.make_span(sl, sc),
        )
    })?;
    let prefix = if radix == 2 { "0b" } else { "0x" };
    Ok(Some(Token {
        kind: make(value),
        lexeme: format!("{prefix}{raw}"),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_ternary(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    cursor.advance(); // '0'
    cursor.advance(); // 't'
    let mut raw = String::new();
    while matches!(cursor.peek(), Some('-' | '0' | '+')) {
        raw.push(cursor.advance().unwrap());
    }
    if raw.is_empty() {
        return Err(AsmError::error(
            ErrorKind::InvalidLiteral("ternary", raw),
            cursor.make_span(sl, sc),
        ));
    }
    let mut value: i64 = 0;
    for ch in raw.chars() {
        let digit = match ch {
            '+' => 1,
            '0' => 0,
            '-' => -1,
            _ => unreachable!(),
        };
        value = value * 3 + digit;
    }
    Ok(Some(Token {
        kind: TokenKind::Ternary(value),
        lexeme: format!("0t{raw}"),
        span: cursor.make_span(sl, sc),
    }))
}

fn lex_word(cursor: &mut Cursor, sl: usize, sc: usize) -> Result<Option<Token>, AsmError> {
    let mut word = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
        word.push(cursor.advance().unwrap());
    }
    let upper = word.to_ascii_uppercase();

    if let Some(mnemonic) = Mnemonic::from_str(&upper) {
        return Ok(Some(Token {
            kind: TokenKind::Mnemonic(mnemonic),
            lexeme: word,
            span: cursor.make_span(sl, sc),
        }));
    }
    if let Some(register) = Register::from_str(&upper) {
        return Ok(Some(Token {
            kind: TokenKind::Register(register),
            lexeme: word,
            span: cursor.make_span(sl, sc),
        }));
    }

    Ok(Some(Token {
        kind: TokenKind::Identifier(word.clone()),
        lexeme: word,
        span: cursor.make_span(sl, sc),
    }))
}
