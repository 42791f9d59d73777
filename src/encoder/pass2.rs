//! Pass 2 — code emission.
//!
//! Walks the source lines again, this time producing bytes. Operands that
//! are `SymbolRef`s are left as a zeroed immediate field plus a
//! [`PendingPatch`] record — pass 1 already knows every label's address, but
//! resolution is deliberately deferred to pass 3 rather than looked up here.

use crate::error::{AsmError, ErrorKind, Span};
use crate::lexer::mnemonic::Category;
use crate::parser::ast::{DataItem, DirectiveStmt, Instruction, LineContent, Offset, Operand, SourceLine};

use super::pending::PendingPatch;
use super::tables::{encode_register, opcode_and_type, OpType, PAR_FULL_PARALLEL, PAR_SERIAL};

pub struct Pass2Result {
    pub image: Vec<u8>,
    pub pending: Vec<PendingPatch>,
    pub diagnostics: Vec<AsmError>,
}

pub fn run(lines: &[SourceLine], line_addresses: &[u32]) -> Pass2Result {
    let mut image = Vec::new();
    let mut pending = Vec::new();
    let mut diagnostics = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let start = line_addresses[i] as usize;
        let end = line_addresses[i + 1] as usize;
        if image.len() < start {
            image.resize(start, 0);
        }

        match &line.content {
            LineContent::Empty | LineContent::Comment(_) => {}
            LineContent::Instruction(instr) => {
                let word = encode_instruction(
                    instr,
                    line_addresses[i],
                    &mut pending,
                    &mut diagnostics,
                    PAR_SERIAL,
                );
                image.extend_from_slice(&word.to_le_bytes());
            }
            LineContent::Vliw(instrs) => {
                encode_vliw(instrs, line_addresses[i], &mut image, &mut pending, &mut diagnostics);
            }
            LineContent::Directive(d) => {
                encode_directive(d, line.span, &mut image, &mut diagnostics);
            }
        }

        if image.len() < end {
            image.resize(end, 0);
        }
    }

    Pass2Result { image, pending, diagnostics }
}

fn encode_directive(directive: &DirectiveStmt, span: Span, image: &mut Vec<u8>, diagnostics: &mut Vec<AsmError>) {
    match directive {
        DirectiveStmt::Db(items) => {
            for item in items {
                match item {
                    DataItem::Immediate(n) => {
                        if *n < 0 || *n > 255 {
                            diagnostics.push(AsmError::warning(ErrorKind::ByteTruncated(*n), span));
                        }
                        image.push((*n & 0xFF) as u8);
                    }
                    DataItem::Str(s) => image.extend_from_slice(s.as_bytes()),
                }
            }
        }
        DirectiveStmt::Dw(items) | DirectiveStmt::Dt(items) => {
            for item in items {
                match item {
                    DataItem::Immediate(n) => image.extend_from_slice(&(*n as u32).to_le_bytes()),
                    DataItem::Str(_) => {
                        diagnostics.push(AsmError::error(
                            ErrorKind::UnexpectedStringOperand(".DW/.DT"),
                            span,
                        ));
                        image.extend_from_slice(&0u32.to_le_bytes());
                    }
                }
            }
        }
        DirectiveStmt::Org(_)
        | DirectiveStmt::Space(_)
        | DirectiveStmt::Align(_)
        | DirectiveStmt::Equ { .. }
        | DirectiveStmt::Include(_)
        | DirectiveStmt::Section(_) => {}
    }
}

fn encode_vliw(
    instrs: &[Instruction],
    base_address: u32,
    image: &mut Vec<u8>,
    pending: &mut Vec<PendingPatch>,
    diagnostics: &mut Vec<AsmError>,
) {
    let n = instrs.len();
    for (i, instr) in instrs.iter().enumerate() {
        let par_flags = if i + 1 == n { PAR_SERIAL } else { PAR_FULL_PARALLEL };
        let address = base_address + (i as u32) * 4;
        let word = encode_instruction(instr, address, pending, diagnostics, par_flags);
        image.extend_from_slice(&word.to_le_bytes());
    }
    for _ in n..3 {
        let (opcode, op_type) = opcode_and_type(crate::lexer::mnemonic::Mnemonic::Nop);
        let word = encode_word(opcode, 0, 0, 0, 0, op_type, PAR_SERIAL);
        image.extend_from_slice(&word.to_le_bytes());
    }
}

fn encode_instruction(
    instr: &Instruction,
    address: u32,
    pending: &mut Vec<PendingPatch>,
    diagnostics: &mut Vec<AsmError>,
    par_flags: u32,
) -> u32 {
    let (opcode, op_type) = opcode_and_type(instr.mnemonic);
    let (reg1, reg2, reg3, immediate) = match instr.mnemonic.category() {
        Category::Alu | Category::Vector | Category::Fpu | Category::System | Category::Microcode => {
            positional_fields(instr, address, pending, diagnostics)
        }
        Category::Memory => memory_fields(instr, address, pending, diagnostics),
        Category::Control => control_fields(instr, address, pending, diagnostics),
    };

    encode_word(opcode, reg1, reg2, reg3, immediate, op_type, par_flags)
}

fn encode_word(opcode: u8, reg1: u8, reg2: u8, reg3: u8, immediate: i32, op_type: OpType, par_flags: u32) -> u32 {
    ((opcode as u32 & 0x3F) << 26)
        | ((reg1 as u32 & 0x7) << 23)
        | ((reg2 as u32 & 0x7) << 20)
        | ((reg3 as u32 & 0x7) << 17)
        | ((immediate as u32 & 0x7FF) << 6)
        | ((op_type.bits() & 0x7) << 3)
        | (par_flags & 0x7)
}

fn register_field(
    operand: Option<&Operand>,
    position: &'static str,
    diagnostics: &mut Vec<AsmError>,
    span: Span,
) -> u8 {
    match operand {
        Some(Operand::Register(r)) => encode_register(*r),
        Some(_) => {
            diagnostics.push(AsmError::error(ErrorKind::ExpectedRegisterOperand(position), span));
            0
        }
        None => 0,
    }
}

fn positional_fields(
    instr: &Instruction,
    address: u32,
    pending: &mut Vec<PendingPatch>,
    diagnostics: &mut Vec<AsmError>,
) -> (u8, u8, u8, i32) {
    let reg1 = register_field(instr.operands.first(), "first operand", diagnostics, instr.span);
    let reg2 = register_field(instr.operands.get(1), "second operand", diagnostics, instr.span);
    let mut reg3 = 0;
    let mut immediate = 0;

    match instr.operands.get(2) {
        Some(Operand::Register(r)) => reg3 = encode_register(*r),
        Some(Operand::Immediate(n)) => immediate = *n as i32,
        Some(Operand::SymbolRef(name)) => {
            pending.push(PendingPatch {
                symbol: name.clone(),
                patch_offset: address as usize,
                is_pc_relative: false,
                pc_value: address,
                span: instr.span,
            });
        }
        Some(Operand::MemoryRef { .. }) | None => {}
    }

    (reg1, reg2, reg3, immediate)
}

fn memory_fields(
    instr: &Instruction,
    address: u32,
    pending: &mut Vec<PendingPatch>,
    diagnostics: &mut Vec<AsmError>,
) -> (u8, u8, u8, i32) {
    let reg1 = register_field(instr.operands.first(), "first operand", diagnostics, instr.span);
    let mut reg2 = 0;
    let mut reg3 = 0;
    let mut immediate = 0;

    match instr.operands.get(1) {
        Some(Operand::MemoryRef { base, offset }) => {
            reg2 = encode_register(*base);
            match offset {
                Some(Offset::Register(r)) => reg3 = encode_register(*r),
                Some(Offset::Immediate(n)) => immediate = *n as i32,
                None => {}
            }
        }
        Some(Operand::Immediate(n)) => immediate = *n as i32,
        Some(Operand::SymbolRef(name)) => {
            pending.push(PendingPatch {
                symbol: name.clone(),
                patch_offset: address as usize,
                is_pc_relative: false,
                pc_value: address,
                span: instr.span,
            });
        }
        Some(Operand::Register(_)) => {
            diagnostics.push(AsmError::error(
                ErrorKind::InvalidMemoryOperand("memory instruction"),
                instr.span,
            ));
        }
        None => {}
    }

    (reg1, reg2, reg3, immediate)
}

fn register_or_immediate(
    operand: Option<&Operand>,
    position: &'static str,
    diagnostics: &mut Vec<AsmError>,
    span: Span,
) -> (u8, i32) {
    match operand {
        Some(Operand::Register(r)) => (encode_register(*r), 0),
        Some(Operand::Immediate(n)) => (0, *n as i32),
        Some(_) => {
            diagnostics.push(AsmError::error(ErrorKind::ExpectedRegisterOperand(position), span));
            (0, 0)
        }
        None => (0, 0),
    }
}

fn control_fields(
    instr: &Instruction,
    address: u32,
    pending: &mut Vec<PendingPatch>,
    diagnostics: &mut Vec<AsmError>,
) -> (u8, u8, u8, i32) {
    use crate::lexer::mnemonic::Mnemonic::*;

    match instr.mnemonic {
        Beq | Bne | Blt | Bge | Bltu | Bgeu => {
            let reg1 = register_field(instr.operands.first(), "first operand", diagnostics, instr.span);
            let (reg2, mut immediate) =
                register_or_immediate(instr.operands.get(1), "second operand", diagnostics, instr.span);

            match instr.operands.get(2) {
                Some(Operand::SymbolRef(name)) => {
                    pending.push(PendingPatch {
                        symbol: name.clone(),
                        patch_offset: address as usize,
                        is_pc_relative: true,
                        pc_value: address + 4,
                        span: instr.span,
                    });
                }
                Some(Operand::Immediate(n)) => immediate = *n as i32,
                _ => {}
            }

            (reg1, reg2, 0, immediate)
        }
        Jmp | Jal | Call => {
            let mut immediate = 0;
            match instr.operands.first() {
                Some(Operand::SymbolRef(name)) => {
                    pending.push(PendingPatch {
                        symbol: name.clone(),
                        patch_offset: address as usize,
                        is_pc_relative: false,
                        pc_value: address,
                        span: instr.span,
                    });
                }
                Some(Operand::Immediate(n)) => immediate = *n as i32,
                _ => {}
            }
            (0, 0, 0, immediate)
        }
        Jr | Jalr => {
            let reg1 = register_field(instr.operands.first(), "first operand", diagnostics, instr.span);
            (reg1, 0, 0, 0)
        }
        Ret => (0, 0, 0, 0),
        _ => unreachable!("non-control mnemonic routed to control_fields"),
    }
}
