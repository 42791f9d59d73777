//! Pass 1 — address assignment and symbol table construction.

use std::collections::HashMap;

use crate::error::{AsmError, ErrorKind, Span};
use crate::parser::ast::{DataItem, DirectiveStmt, LineContent, SourceLine};

use super::symbol_table::SymbolTable;

pub struct Pass1Result {
    pub symbol_table: SymbolTable,
    /// Start address of each source line, plus one trailing sentinel equal to
    /// the final cursor value. Always `lines.len() + 1` entries, so pass 2
    /// can slice per-line image bytes without redeciding `.ORG` regression.
    pub line_addresses: Vec<u32>,
    pub diagnostics: Vec<AsmError>,
}

pub fn run(lines: &[SourceLine]) -> Pass1Result {
    let mut symbol_table = SymbolTable::new();
    let mut defined_at: HashMap<String, Span> = HashMap::new();
    let mut diagnostics = Vec::new();
    let mut line_addresses = Vec::with_capacity(lines.len() + 1);
    let mut cursor: u32 = 0;

    for line in lines {
        line_addresses.push(cursor);

        if let Some(label) = &line.label {
            bind_symbol(
                &mut symbol_table,
                &mut defined_at,
                label.clone(),
                cursor,
                line.span,
                &mut diagnostics,
            );
        }

        cursor = match &line.content {
            LineContent::Empty | LineContent::Comment(_) => cursor,
            LineContent::Instruction(_) => cursor + 4,
            LineContent::Vliw(_) => cursor + 12,
            LineContent::Directive(d) => {
                apply_directive(d, cursor, line.span, &mut symbol_table, &mut defined_at, &mut diagnostics)
            }
        };
    }

    line_addresses.push(cursor);

    Pass1Result { symbol_table, line_addresses, diagnostics }
}

fn apply_directive(
    directive: &DirectiveStmt,
    cursor: u32,
    span: Span,
    symbol_table: &mut SymbolTable,
    defined_at: &mut HashMap<String, Span>,
    diagnostics: &mut Vec<AsmError>,
) -> u32 {
    match directive {
        DirectiveStmt::Org(n) => {
            let target = *n as u32;
            if target < cursor {
                diagnostics.push(AsmError::warning(
                    ErrorKind::OrgRegression(target, cursor),
                    span,
                ));
                cursor
            } else {
                target
            }
        }
        DirectiveStmt::Db(items) => cursor + data_byte_count(items),
        DirectiveStmt::Dw(items) | DirectiveStmt::Dt(items) => cursor + 4 * items.len() as u32,
        DirectiveStmt::Space(n) => cursor + *n as u32,
        DirectiveStmt::Align(n) => {
            let align = (*n).max(1) as u32;
            cursor.div_ceil(align) * align
        }
        DirectiveStmt::Equ { name, value } => {
            bind_symbol(symbol_table, defined_at, name.clone(), *value as u32, span, diagnostics);
            cursor
        }
        DirectiveStmt::Include(_) | DirectiveStmt::Section(_) => cursor,
    }
}

/// `.DB` counts string operands by their byte length (no terminator), and
/// every other item as one byte.
fn data_byte_count(items: &[DataItem]) -> u32 {
    items
        .iter()
        .map(|item| match item {
            DataItem::Immediate(_) => 1,
            DataItem::Str(s) => s.len() as u32,
        })
        .sum()
}

fn bind_symbol(
    symbol_table: &mut SymbolTable,
    defined_at: &mut HashMap<String, Span>,
    name: String,
    value: u32,
    span: Span,
    diagnostics: &mut Vec<AsmError>,
) {
    if let Some(first_span) = defined_at.get(&name) {
        diagnostics.push(AsmError::error(
            ErrorKind::DuplicateLabel(name.clone(), first_span.line, first_span.col),
            span,
        ));
        return;
    }
    defined_at.insert(name.clone(), span);
    symbol_table.insert(name, value);
}
