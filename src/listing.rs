//! Renders a text listing: the symbol table, then source annotated with
//! image offsets and emitted machine-code bytes.

use std::fmt::Write as _;

use crate::driver::AssembleOutcome;
use crate::parser::ast::LineContent;

#[must_use]
pub fn render(source: &str, outcome: &AssembleOutcome) -> String {
    let mut out = String::new();

    writeln!(out, "Symbol Table:").unwrap();
    for (name, addr) in outcome.symbol_table.iter() {
        writeln!(out, "  {name:<24} 0x{addr:08X}").unwrap();
    }
    writeln!(out).unwrap();

    let source_lines: Vec<&str> = source.lines().collect();
    let image = outcome.image.as_deref();

    for (i, line) in outcome.source_lines.iter().enumerate() {
        let text = source_lines.get(i).copied().unwrap_or("");
        match &line.content {
            LineContent::Empty | LineContent::Comment(_) => {
                writeln!(out, "{:>28}  {}", "", text).unwrap();
            }
            _ => {
                let start = outcome.line_addresses[i] as usize;
                let end = outcome.line_addresses[i + 1] as usize;
                let bytes = image.map(|img| &img[start..end]).unwrap_or(&[]);
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ");
                writeln!(out, "{start:06X}  {hex:<20}  {text}").unwrap();
            }
        }
    }

    out
}
