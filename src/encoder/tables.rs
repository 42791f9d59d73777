//! Opcode and operation-type tables.
//!
//! Transcribed directly from the closed per-category opcode sets: every
//! mnemonic the lexer recognizes appears here exactly once, paired with its
//! `(opcode, OpType)`.

use crate::lexer::mnemonic::Mnemonic;
use crate::lexer::token::Register;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
    Alu = 0,
    Memory = 1,
    Control = 2,
    Vector = 3,
    Fpu = 4,
    System = 5,
    Microcode = 6,
}

impl OpType {
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// Serial execution; VLIW bundling rewrites this to `FULL_PARALLEL` for every
/// operation but the bundle's last.
pub const PAR_SERIAL: u32 = 0;
pub const PAR_FULL_PARALLEL: u32 = 4;

pub fn opcode_and_type(mnemonic: Mnemonic) -> (u8, OpType) {
    use Mnemonic::*;
    let opcode = match mnemonic {
        Add => 0b000001,
        Sub => 0b000010,
        Mul => 0b000011,
        And => 0b000100,
        Or => 0b000101,
        Not => 0b000110,
        Xor => 0b000111,
        Shl => 0b001000,
        Shr => 0b001001,
        Rol => 0b001010,
        Ror => 0b001011,
        Cmp => 0b001100,
        Test => 0b001101,
        Inc => 0b001110,
        Dec => 0b001111,
        Neg => 0b010000,

        Ld => 0b010001,
        St => 0b010010,
        Vld => 0b010011,
        Vst => 0b010100,
        Fld => 0b010101,
        Fst => 0b010110,
        Lea => 0b010111,
        Push => 0b011000,

        Jmp => 0b011001,
        Jal => 0b011010,
        Jr => 0b011011,
        Jalr => 0b011100,
        Beq => 0b011101,
        Bne => 0b011110,
        Blt => 0b011111,
        Bge => 0b100000,
        Bltu => 0b100001,
        Bgeu => 0b100010,
        Call => 0b100011,
        Ret => 0b100100,

        Vadd => 0b100101,
        Vsub => 0b100110,
        Vmul => 0b100111,
        Vand => 0b101000,
        Vor => 0b101001,
        Vnot => 0b101010,
        Vshl => 0b101011,
        Vshr => 0b101100,

        Fadd => 0b101101,
        Fsub => 0b101110,
        Fmul => 0b101111,
        Fcmp => 0b110000,
        Fmov => 0b110001,
        Fneg => 0b110010,

        Nop => 0b110011,
        Wfi => 0b110100,

        Div => 0b110101,
        Mod => 0b110110,
        Udiv => 0b110111,
        Umod => 0b111000,
        Sqrt => 0b111001,
        Abs => 0b111010,
        Sin => 0b111011,
        Cos => 0b111100,
        Tan => 0b111101,
        Asin => 0b111110,
        Acos => 0b111111,
        Atan => 0b000000,
        Exp => 0b000001,
        Log => 0b000010,
        Vdot => 0b000011,
        Vreduce => 0b000100,
        Vmax => 0b000101,
        Vmin => 0b000110,
        Vsum => 0b000111,
        Vperm => 0b001000,
        Cache => 0b001001,
        Flush => 0b001010,
        Membar => 0b001011,
        Syscall => 0b001100,
        Break => 0b001101,
        Halt => 0b001110,
    };

    let op_type = match mnemonic.category() {
        crate::lexer::mnemonic::Category::Alu => OpType::Alu,
        crate::lexer::mnemonic::Category::Memory => OpType::Memory,
        crate::lexer::mnemonic::Category::Control => OpType::Control,
        crate::lexer::mnemonic::Category::Vector => OpType::Vector,
        crate::lexer::mnemonic::Category::Fpu => OpType::Fpu,
        crate::lexer::mnemonic::Category::System => OpType::System,
        crate::lexer::mnemonic::Category::Microcode => OpType::Microcode,
    };

    (opcode, op_type)
}

/// Encodes a register into its 3-bit field value.
///
/// `TB/TC/TS/TI` alias `T0/T1/T2/T3`'s encodings; the op-type field is what
/// distinguishes them at the hardware level, not the register field itself.
/// Vector and FP banks are single-register extension points, encoded as 0.
pub const fn encode_register(reg: Register) -> u8 {
    use crate::lexer::token::{FpReg, SpecialReg, VectorReg};
    match reg {
        Register::Gpr(n) => n,
        Register::Special(SpecialReg::Ta) => 0b111,
        Register::Special(SpecialReg::Tb) => 0,
        Register::Special(SpecialReg::Tc) => 1,
        Register::Special(SpecialReg::Ts) => 2,
        Register::Special(SpecialReg::Ti) => 3,
        Register::Vector(VectorReg::Va | VectorReg::Vt | VectorReg::Vb) => 0,
        Register::Fp(FpReg::Fa | FpReg::Ft | FpReg::Fb) => 0,
    }
}
