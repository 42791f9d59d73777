//! Token types for VTX1 assembly.

use crate::error::Span;
use crate::lexer::mnemonic::Mnemonic;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Mnemonic(Mnemonic),
    Register(Register),
    Directive(Directive),

    LBracket,
    RBracket,
    Comma,
    Colon,
    Plus,

    Ternary(i64),
    Binary(i64),
    Hex(i64),
    Decimal(i64),
    Str(String),

    Identifier(String),
    Comment(String),
    Newline,
    Eof,
}

impl TokenKind {
    pub fn is_statement_start(&self) -> bool {
        matches!(
            self,
            TokenKind::Mnemonic(_)
                | TokenKind::Directive(_)
                | TokenKind::LBracket
                | TokenKind::Identifier(_)
        )
    }

    pub fn literal_value(&self) -> Option<i64> {
        match self {
            TokenKind::Ternary(v)
            | TokenKind::Binary(v)
            | TokenKind::Hex(v)
            | TokenKind::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

/// The four register banks, per the source language surface. GPR and special
/// registers occupy 3-bit fields that physically overlap (`TB..TI` alias
/// `T0..T3`); see the encoder's register-encoding notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Gpr(u8),
    Special(SpecialReg),
    Vector(VectorReg),
    Fp(FpReg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialReg {
    Ta,
    Tb,
    Tc,
    Ts,
    Ti,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorReg {
    Va,
    Vt,
    Vb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpReg {
    Fa,
    Ft,
    Fb,
}

impl Register {
    pub fn from_str(word: &str) -> Option<Self> {
        use Register::*;
        Some(match word {
            "T0" => Gpr(0),
            "T1" => Gpr(1),
            "T2" => Gpr(2),
            "T3" => Gpr(3),
            "T4" => Gpr(4),
            "T5" => Gpr(5),
            "T6" => Gpr(6),
            "TA" => Special(SpecialReg::Ta),
            "TB" => Special(SpecialReg::Tb),
            "TC" => Special(SpecialReg::Tc),
            "TS" => Special(SpecialReg::Ts),
            "TI" => Special(SpecialReg::Ti),
            "VA" => Vector(VectorReg::Va),
            "VT" => Vector(VectorReg::Vt),
            "VB" => Vector(VectorReg::Vb),
            "FA" => Fp(FpReg::Fa),
            "FT" => Fp(FpReg::Ft),
            "FB" => Fp(FpReg::Fb),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Org,
    Db,
    Dw,
    Dt,
    Equ,
    Include,
    Section,
    Align,
    Space,
}

impl Directive {
    pub fn from_str(word: &str) -> Option<Self> {
        use Directive::*;
        Some(match word {
            "ORG" => Org,
            "DB" => Db,
            "DW" => Dw,
            "DT" => Dt,
            "EQU" => Equ,
            "INCLUDE" => Include,
            "SECTION" => Section,
            "ALIGN" => Align,
            "SPACE" => Space,
            _ => return None,
        })
    }
}
