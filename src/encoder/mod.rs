//! Three-pass assembler backend.
//!
//! Turns parsed source lines into a byte image: pass 1 assigns addresses and
//! builds the symbol table, pass 2 emits bytes (deferring any symbol
//! reference as a pending patch even though the symbol table is already
//! complete), pass 3 resolves those patches.

pub mod pass1;
pub mod pass2;
pub mod pass3;
pub mod pending;
pub mod symbol_table;
pub mod tables;

use crate::error::AsmError;
use crate::parser::ast::SourceLine;

use symbol_table::SymbolTable;

pub struct EncodeResult {
    /// `None` if any pass reported an `ERROR`-severity diagnostic.
    pub image: Option<Vec<u8>>,
    pub symbol_table: SymbolTable,
    pub line_addresses: Vec<u32>,
    pub diagnostics: Vec<AsmError>,
}

#[must_use]
pub fn encode(lines: &[SourceLine]) -> EncodeResult {
    let p1 = pass1::run(lines);
    let p2 = pass2::run(lines, &p1.line_addresses);

    let mut image = p2.image;
    let p3_diagnostics = pass3::run(&mut image, &p2.pending, &p1.symbol_table);

    let mut diagnostics = p1.diagnostics;
    diagnostics.extend(p2.diagnostics);
    diagnostics.extend(p3_diagnostics);

    let has_error = diagnostics.iter().any(AsmError::is_error);

    EncodeResult {
        image: if has_error { None } else { Some(image) },
        symbol_table: p1.symbol_table,
        line_addresses: p1.line_addresses,
        diagnostics,
    }
}

#[cfg(test)]
mod tests;
