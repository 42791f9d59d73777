//! # Parser Macros
//!
//! VTX1's grammar gives every mnemonic the same operand-list shape, so the
//! per-opcode macros a fixed-shape ISA needs collapse to a single generic
//! operand parser in `mod.rs`. What remains genuinely repetitive is the
//! directive grammar: `.DB`/`.DW`/`.DT` all parse a comma-separated list of
//! immediates-or-strings, and `.ORG`/`.ALIGN`/`.SPACE` all parse a single
//! immediate. These two macros generate those directive parsers.

macro_rules! parse_data_list {
    ($name:expr, $tokens:expr) => {{
        use $crate::error::{AsmError, ErrorKind};
        use $crate::parser::ast::DataItem;

        let tokens = $tokens;
        if tokens.len() < 2 {
            return Err(AsmError::error(
                ErrorKind::InvalidDirectiveOperands($name, "one or more comma-separated items"),
                tokens[0].span,
            ));
        }
        let mut items = Vec::new();
        let mut idx = 1;
        loop {
            if idx >= tokens.len() {
                return Err(AsmError::error(
                    ErrorKind::ExpectedOperand,
                    tokens[tokens.len() - 1].span,
                ));
            }
            match &tokens[idx].kind {
                $crate::lexer::token::TokenKind::Str(s) => items.push(DataItem::Str(s.clone())),
                kind if kind.literal_value().is_some() => {
                    items.push(DataItem::Immediate(kind.literal_value().unwrap()))
                }
                _ => {
                    return Err(AsmError::error(
                        ErrorKind::ExpectedOperand,
                        tokens[idx].span,
                    ))
                }
            }
            idx += 1;
            if idx >= tokens.len() {
                break;
            }
            match tokens[idx].kind {
                $crate::lexer::token::TokenKind::Comma => idx += 1,
                _ => {
                    return Err(AsmError::error(
                        ErrorKind::TrailingTokens,
                        tokens[idx].span,
                    ))
                }
            }
        }
        Ok(items)
    }};
}

macro_rules! parse_single_immediate {
    ($name:expr, $tokens:expr) => {{
        use $crate::error::{AsmError, ErrorKind};

        let tokens = $tokens;
        if tokens.len() != 2 {
            return Err(AsmError::error(
                ErrorKind::InvalidDirectiveOperands($name, "a single immediate"),
                tokens[0].span,
            ));
        }
        match tokens[1].kind.literal_value() {
            Some(v) => Ok(v),
            None => Err(AsmError::error(
                ErrorKind::InvalidDirectiveOperands($name, "a single immediate"),
                tokens[1].span,
            )),
        }
    }};
}
