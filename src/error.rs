//! Shared diagnostic types used by every pipeline stage.
//!
//! `Span` carries only `(line, col)` — the encoder patches by image offset,
//! not source offset, so a byte range into the source text is never needed
//! downstream of the lexer.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub const fn start() -> Self {
        Self { line: 1, col: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// One diagnostic classification per stage: lex error, parse error, semantic
/// error, or warning. Each variant carries whatever data its message needs
/// to be self-contained.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    // --- lex ---
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid {0} literal '{1}'")]
    InvalidLiteral(&'static str, String),

    // --- parse ---
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("expected a register operand")]
    ExpectedRegister,
    #[error("expected ','")]
    ExpectedComma,
    #[error("expected ']'")]
    ExpectedCloseBracket,
    #[error("expected an operand")]
    ExpectedOperand,
    #[error("expected an identifier")]
    ExpectedIdentifier,
    #[error("{0} requires {1}")]
    InvalidDirectiveOperands(&'static str, &'static str),
    #[error("VLIW bundle must have 1-3 operations, found {0}")]
    InvalidVliwSize(usize),
    #[error("unexpected token after statement")]
    TrailingTokens,

    // --- semantic ---
    #[error("duplicate label '{0}' (first defined at {1}:{2})")]
    DuplicateLabel(String, usize, usize),
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),
    #[error("branch target '{0}' out of range (offset {1}, must fit in 11-bit signed field)")]
    BranchOutOfRange(String, i64),
    #[error("{0} must be a register operand in this position")]
    ExpectedRegisterOperand(&'static str),
    #[error("{0} does not accept a string operand")]
    UnexpectedStringOperand(&'static str),
    #[error("{0} second operand must be a memory reference, immediate, or symbol")]
    InvalidMemoryOperand(&'static str),

    // --- warnings ---
    #[error(".ORG {0} is less than current address {1}; directive ignored")]
    OrgRegression(u32, u32),
    #[error("value {0} does not fit in a byte; truncated")]
    ByteTruncated(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub span: Span,
}

impl AsmError {
    pub fn error(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            span,
        }
    }

    pub fn warning(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for AsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.span.line, self.span.col, self.severity, self.kind
        )
    }
}

impl std::error::Error for AsmError {}
