//! # Abstract Syntax Tree (AST)
//!
//! Defines the data structures representing parsed VTX1 assembly code.
//!
//! ## Structure
//!
//! A program is a sequence of `SourceLine` objects, each carrying an optional
//! label, the line's content, and source location information for error
//! reporting.
//!
//! ## Design Philosophy
//!
//! Every mnemonic shares one `Instruction { mnemonic, operands }` shape rather
//! than a per-opcode struct variant: VTX1's grammar imposes no fixed operand
//! count or kind per mnemonic at parse time, so shape validation happens once,
//! in the encoder, against the category tables instead of being duplicated
//! across dozens of AST variants.

use crate::error::Span;
use crate::lexer::mnemonic::Mnemonic;
use crate::lexer::token::Register;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub label: Option<String>,
    pub content: LineContent,
    pub line_number: usize,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineContent {
    Empty,
    Comment(String),
    Instruction(Instruction),
    Vliw(Vec<Instruction>),
    Directive(DirectiveStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operands: Vec<Operand>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Register(Register),
    Immediate(i64),
    MemoryRef {
        base: Register,
        offset: Option<Offset>,
    },
    SymbolRef(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Offset {
    Register(Register),
    Immediate(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveStmt {
    Org(i64),
    Db(Vec<DataItem>),
    Dw(Vec<DataItem>),
    Dt(Vec<DataItem>),
    Equ { name: String, value: i64 },
    Include(String),
    Section(String),
    Align(i64),
    Space(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataItem {
    Immediate(i64),
    Str(String),
}
