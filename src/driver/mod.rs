//! Sequences lexer → parser → encoder over in-memory source text.
//!
//! The core never touches the filesystem or a clock; the CLI in `main.rs` is
//! the only layer that reads an input file or writes an output image.

use log::{debug, info, warn};

use crate::encoder::symbol_table::SymbolTable;
use crate::encoder::{self, EncodeResult};
use crate::error::AsmError;
use crate::lexer::{self};
use crate::parser::{self, ast::SourceLine};

#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    pub verbosity: u8,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { verbosity: 0 }
    }
}

pub struct AssembleOutcome {
    pub image: Option<Vec<u8>>,
    pub symbol_table: SymbolTable,
    pub source_lines: Vec<SourceLine>,
    pub line_addresses: Vec<u32>,
    pub diagnostics: Vec<AsmError>,
}

impl AssembleOutcome {
    pub fn is_success(&self) -> bool {
        self.image.is_some()
    }
}

#[must_use]
pub fn assemble(source: &str, _opts: &AssembleOptions) -> AssembleOutcome {
    info!("lexing {} bytes of source", source.len());
    let lexed = lexer::tokenize(source);
    debug!("lexer produced {} tokens, {} errors", lexed.tokens.len(), lexed.errors.len());

    info!("parsing");
    let parsed = parser::parse_lines(&lexed.tokens);
    debug!("parser produced {} lines, {} errors", parsed.lines.len(), parsed.errors.len());

    info!("encoding");
    let EncodeResult { image, symbol_table, line_addresses, diagnostics: encode_diagnostics } =
        encoder::encode(&parsed.lines);

    let mut diagnostics = lexed.errors;
    diagnostics.extend(parsed.errors);
    diagnostics.extend(encode_diagnostics);

    let has_error = diagnostics.iter().any(AsmError::is_error);
    if has_error {
        warn!("assembly failed with {} error diagnostic(s)", diagnostics.iter().filter(|d| d.is_error()).count());
    } else {
        info!("assembly succeeded, image is {} bytes", image.as_ref().map_or(0, Vec::len));
    }

    AssembleOutcome {
        image: if has_error { None } else { image },
        symbol_table,
        source_lines: parsed.lines,
        line_addresses,
        diagnostics,
    }
}
