//! # VTX1 Parser
//!
//! Parses tokenized VTX1 assembly code into an Abstract Syntax Tree (AST).
//!
//! ## Architecture
//!
//! The parser processes tokens line by line, handling:
//! - Optional labels at the start of lines (`IDENT ':'`)
//! - Instructions and VLIW bundles of 1-3 bracketed instructions
//! - Assembler directives
//! - Comments (filtered out during parsing)
//!
//! Every mnemonic shares one operand-list grammar — `MNEMONIC (operand
//! (',' operand)*)?` — so there is a single generic operand parser rather
//! than one parse function per opcode; shape validation against a mnemonic's
//! execution category happens later, in the encoder. A NEWLINE always ends a
//! line's token span, so splitting the stream on NEWLINE before parsing each
//! line is itself the required error-recovery synchronization point: an error
//! on one line never desynchronizes the next.

#[macro_use]
mod macros;
pub mod ast;


use crate::error::{AsmError, ErrorKind, Span};
use crate::lexer::token::{Token, TokenKind};
use ast::{DirectiveStmt, Instruction, LineContent, Offset, Operand, SourceLine};

pub struct ParseResult {
    pub lines: Vec<SourceLine>,
    pub errors: Vec<AsmError>,
}

#[must_use]
pub fn parse_lines(tokens: &[Token]) -> ParseResult {
    let mut lines = Vec::new();
    let mut errors = Vec::new();
    let mut line_start = 0;
    let mut line_number = 1;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Newline => {
                process_line(&tokens[line_start..i], line_number, &mut lines, &mut errors);
                line_start = i + 1;
                line_number += 1;
            }
            TokenKind::Eof => {
                process_line(&tokens[line_start..i], line_number, &mut lines, &mut errors);
                break;
            }
            _ => {}
        }
    }

    ParseResult { lines, errors }
}

fn process_line(
    tokens: &[Token],
    line_number: usize,
    lines: &mut Vec<SourceLine>,
    errors: &mut Vec<AsmError>,
) {
    let span = tokens
        .first()
        .map(|t| t.span)
        .unwrap_or(Span { line: line_number, col: 1 });

    let comment_end = tokens
        .iter()
        .position(|t| matches!(t.kind, TokenKind::Comment(_)))
        .unwrap_or(tokens.len());
    let comment_text = tokens.get(comment_end).and_then(|t| match &t.kind {
        TokenKind::Comment(text) => Some(text.clone()),
        _ => None,
    });
    let code = &tokens[..comment_end];

    if code.is_empty() {
        let content = match comment_text {
            Some(text) => LineContent::Comment(text),
            None => LineContent::Empty,
        };
        lines.push(SourceLine { label: None, content, line_number, span });
        return;
    }

    let (label, content_tokens) = match &code[0].kind {
        TokenKind::Identifier(name) if code.len() > 1 && code[1].kind == TokenKind::Colon => {
            (Some(name.clone()), &code[2..])
        }
        kind if kind.is_statement_start() => (None, &code[..]),
        _ => {
            errors.push(AsmError::error(
                ErrorKind::UnexpectedToken(code[0].lexeme.clone()),
                code[0].span,
            ));
            lines.push(SourceLine {
                label: None,
                content: LineContent::Empty,
                line_number,
                span,
            });
            return;
        }
    };

    if content_tokens.is_empty() {
        lines.push(SourceLine {
            label,
            content: LineContent::Empty,
            line_number,
            span,
        });
        return;
    }

    match parse_statement(content_tokens) {
        Ok(content) => lines.push(SourceLine { label, content, line_number, span }),
        Err(err) => {
            errors.push(err);
            lines.push(SourceLine {
                label,
                content: LineContent::Empty,
                line_number,
                span,
            });
        }
    }
}

fn parse_statement(tokens: &[Token]) -> Result<LineContent, AsmError> {
    match &tokens[0].kind {
        TokenKind::Mnemonic(_) => Ok(LineContent::Instruction(parse_instruction(tokens)?)),
        TokenKind::LBracket => Ok(LineContent::Vliw(parse_vliw(tokens)?)),
        TokenKind::Directive(_) => Ok(LineContent::Directive(parse_directive(tokens)?)),
        _ => Err(AsmError::error(
            ErrorKind::UnexpectedToken(tokens[0].lexeme.clone()),
            tokens[0].span,
        )),
    }
}

fn parse_instruction(tokens: &[Token]) -> Result<Instruction, AsmError> {
    let mnemonic = match tokens[0].kind {
        TokenKind::Mnemonic(m) => m,
        _ => unreachable!("caller guarantees a mnemonic token"),
    };
    let operands = parse_operand_list(&tokens[1..])?;
    Ok(Instruction { mnemonic, operands, span: tokens[0].span })
}

fn parse_operand_list(tokens: &[Token]) -> Result<Vec<Operand>, AsmError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut operands = Vec::new();
    let mut idx = 0;
    loop {
        let (operand, next) = parse_operand(tokens, idx)?;
        operands.push(operand);
        idx = next;
        if idx >= tokens.len() {
            break;
        }
        match tokens[idx].kind {
            TokenKind::Comma => idx += 1,
            _ => return Err(AsmError::error(ErrorKind::TrailingTokens, tokens[idx].span)),
        }
        if idx >= tokens.len() {
            return Err(AsmError::error(
                ErrorKind::ExpectedOperand,
                tokens[idx - 1].span,
            ));
        }
    }
    Ok(operands)
}

fn parse_operand(tokens: &[Token], idx: usize) -> Result<(Operand, usize), AsmError> {
    let token = &tokens[idx];
    match &token.kind {
        TokenKind::Register(r) => Ok((Operand::Register(*r), idx + 1)),
        TokenKind::Identifier(name) => Ok((Operand::SymbolRef(name.clone()), idx + 1)),
        TokenKind::LBracket => parse_memory_ref(tokens, idx),
        kind if kind.literal_value().is_some() => {
            Ok((Operand::Immediate(kind.literal_value().unwrap()), idx + 1))
        }
        _ => Err(AsmError::error(ErrorKind::ExpectedOperand, token.span)),
    }
}

fn parse_memory_ref(tokens: &[Token], idx: usize) -> Result<(Operand, usize), AsmError> {
    let mut idx = idx + 1; // consume '['
    let base = match tokens.get(idx).map(|t| &t.kind) {
        Some(TokenKind::Register(r)) => *r,
        _ => {
            return Err(AsmError::error(
                ErrorKind::ExpectedRegister,
                tokens.get(idx).map(|t| t.span).unwrap_or(tokens[idx - 1].span),
            ))
        }
    };
    idx += 1;

    let mut offset = None;
    if matches!(tokens.get(idx).map(|t| &t.kind), Some(TokenKind::Plus)) {
        idx += 1;
        match tokens.get(idx).map(|t| &t.kind) {
            Some(TokenKind::Register(r)) => {
                offset = Some(Offset::Register(*r));
                idx += 1;
            }
            Some(kind) if kind.literal_value().is_some() => {
                offset = Some(Offset::Immediate(kind.literal_value().unwrap()));
                idx += 1;
            }
            _ => {
                return Err(AsmError::error(
                    ErrorKind::ExpectedOperand,
                    tokens.get(idx).map(|t| t.span).unwrap_or(tokens[idx - 1].span),
                ))
            }
        }
    }

    match tokens.get(idx).map(|t| &t.kind) {
        Some(TokenKind::RBracket) => Ok((Operand::MemoryRef { base, offset }, idx + 1)),
        _ => Err(AsmError::error(
            ErrorKind::ExpectedCloseBracket,
            tokens.get(idx).map(|t| t.span).unwrap_or(tokens[idx - 1].span),
        )),
    }
}

fn parse_vliw(tokens: &[Token]) -> Result<Vec<Instruction>, AsmError> {
    let mut instructions = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        if tokens[idx].kind != TokenKind::LBracket {
            return Err(AsmError::error(
                ErrorKind::UnexpectedToken(tokens[idx].lexeme.clone()),
                tokens[idx].span,
            ));
        }
        let close = find_matching_rbracket(tokens, idx + 1)?;
        let inner = &tokens[idx + 1..close];
        if inner.is_empty() || !matches!(inner[0].kind, TokenKind::Mnemonic(_)) {
            return Err(AsmError::error(
                ErrorKind::ExpectedOperand,
                tokens[idx].span,
            ));
        }
        instructions.push(parse_instruction(inner)?);
        idx = close + 1;
    }

    if instructions.is_empty() || instructions.len() > 3 {
        return Err(AsmError::error(
            ErrorKind::InvalidVliwSize(instructions.len()),
            tokens[0].span,
        ));
    }
    Ok(instructions)
}

fn find_matching_rbracket(tokens: &[Token], mut idx: usize) -> Result<usize, AsmError> {
    let mut depth = 1;
    while idx < tokens.len() {
        match tokens[idx].kind {
            TokenKind::LBracket => depth += 1,
            TokenKind::RBracket => {
                depth -= 1;
                if depth == 0 {
                    return Ok(idx);
                }
            }
            _ => {}
        }
        idx += 1;
    }
    Err(AsmError::error(
        ErrorKind::ExpectedCloseBracket,
        tokens.last().map(|t| t.span).unwrap_or(Span::start()),
    ))
}

fn parse_directive(tokens: &[Token]) -> Result<DirectiveStmt, AsmError> {
    use crate::lexer::token::Directive;

    let directive = match tokens[0].kind {
        TokenKind::Directive(d) => d,
        _ => unreachable!("caller guarantees a directive token"),
    };

    match directive {
        Directive::Org => Ok(DirectiveStmt::Org(parse_single_immediate!(".ORG", tokens)?)),
        Directive::Align => Ok(DirectiveStmt::Align(parse_single_immediate!(".ALIGN", tokens)?)),
        Directive::Space => Ok(DirectiveStmt::Space(parse_single_immediate!(".SPACE", tokens)?)),
        Directive::Db => Ok(DirectiveStmt::Db(parse_data_list!(".DB", tokens)?)),
        Directive::Dw => Ok(DirectiveStmt::Dw(parse_data_list!(".DW", tokens)?)),
        Directive::Dt => Ok(DirectiveStmt::Dt(parse_data_list!(".DT", tokens)?)),
        Directive::Equ => parse_equ(tokens),
        Directive::Include => parse_include(tokens),
        Directive::Section => parse_section(tokens),
    }
}

fn parse_equ(tokens: &[Token]) -> Result<DirectiveStmt, AsmError> {
    if tokens.len() != 4 {
        return Err(AsmError::error(
            ErrorKind::InvalidDirectiveOperands(".EQU", "an identifier, comma, and immediate"),
            tokens[0].span,
        ));
    }
    let name = match &tokens[1].kind {
        TokenKind::Identifier(s) => s.clone(),
        _ => return Err(AsmError::error(ErrorKind::ExpectedIdentifier, tokens[1].span)),
    };
    if tokens[2].kind != TokenKind::Comma {
        return Err(AsmError::error(ErrorKind::ExpectedComma, tokens[2].span));
    }
    let value = tokens[3]
        .kind
        .literal_value()
        .ok_or_else(|| AsmError::error(ErrorKind::ExpectedOperand, tokens[3].span))?;
    Ok(DirectiveStmt::Equ { name, value })
}

fn parse_include(tokens: &[Token]) -> Result<DirectiveStmt, AsmError> {
    if tokens.len() != 2 {
        return Err(AsmError::error(
            ErrorKind::InvalidDirectiveOperands(".INCLUDE", "a string"),
            tokens[0].span,
        ));
    }
    match &tokens[1].kind {
        TokenKind::Str(s) => Ok(DirectiveStmt::Include(s.clone())),
        _ => Err(AsmError::error(
            ErrorKind::InvalidDirectiveOperands(".INCLUDE", "a string"),
            tokens[1].span,
        )),
    }
}

fn parse_section(tokens: &[Token]) -> Result<DirectiveStmt, AsmError> {
    if tokens.len() != 2 {
        return Err(AsmError::error(
            ErrorKind::InvalidDirectiveOperands(".SECTION", "an identifier"),
            tokens[0].span,
        ));
    }
    match &tokens[1].kind {
        TokenKind::Identifier(s) => Ok(DirectiveStmt::Section(s.clone())),
        _ => Err(AsmError::error(
            ErrorKind::InvalidDirectiveOperands(".SECTION", "an identifier"),
            tokens[1].span,
        )),
    }
}
