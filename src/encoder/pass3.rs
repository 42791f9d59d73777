//! Pass 3 — symbol resolution.
//!
//! Patches every [`PendingPatch`] left by pass 2 into the image. Unlike the
//! byte-level patch a naive port would use, this reads back the whole 4-byte
//! little-endian word, clears only the 11-bit immediate subfield, and writes
//! the word back — the immediate field straddles three separate bytes of the
//! layout, so there is no byte-aligned region to patch directly.

use crate::error::{AsmError, ErrorKind};

use super::pending::PendingPatch;
use super::symbol_table::SymbolTable;

const IMMEDIATE_MIN: i64 = -1024;
const IMMEDIATE_MAX: i64 = 1023;

pub fn run(image: &mut [u8], pending: &[PendingPatch], symbol_table: &SymbolTable) -> Vec<AsmError> {
    let mut diagnostics = Vec::new();

    for patch in pending {
        let Some(target) = symbol_table.get(&patch.symbol) else {
            diagnostics.push(AsmError::error(
                ErrorKind::UndefinedSymbol(patch.symbol.clone()),
                patch.span,
            ));
            continue;
        };

        if patch.is_pc_relative {
            let offset = target as i64 - patch.pc_value as i64;
            if offset < IMMEDIATE_MIN || offset > IMMEDIATE_MAX {
                diagnostics.push(AsmError::error(
                    ErrorKind::BranchOutOfRange(patch.symbol.clone(), offset),
                    patch.span,
                ));
                continue;
            }
            patch_word(image, patch.patch_offset, offset as i32);
        } else {
            // Absolute references are truncated to the low 11 bits, never range-checked.
            patch_word(image, patch.patch_offset, target as i32);
        }
    }

    diagnostics
}

fn patch_word(image: &mut [u8], word_offset: usize, immediate: i32) {
    let bytes: [u8; 4] = image[word_offset..word_offset + 4].try_into().expect("word-aligned patch");
    let mut word = u32::from_le_bytes(bytes);
    word &= !(0x7FF << 6);
    word |= (immediate as u32 & 0x7FF) << 6;
    image[word_offset..word_offset + 4].copy_from_slice(&word.to_le_bytes());
}
