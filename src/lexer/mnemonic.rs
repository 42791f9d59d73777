//! Mnemonic vocabulary and execution categories.
//!
//! Mnemonic kinds are partitioned into seven execution categories so the
//! parser and encoder never need to re-classify a mnemonic by string; the
//! classification happens once, here, at lex time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Alu,
    Memory,
    Control,
    Vector,
    Fpu,
    System,
    Microcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // ALU
    Add,
    Sub,
    Mul,
    And,
    Or,
    Not,
    Xor,
    Shl,
    Shr,
    Rol,
    Ror,
    Cmp,
    Test,
    Inc,
    Dec,
    Neg,
    // MEMORY
    Ld,
    St,
    Vld,
    Vst,
    Fld,
    Fst,
    Lea,
    Push,
    // CONTROL
    Jmp,
    Jal,
    Jr,
    Jalr,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Call,
    Ret,
    // VECTOR
    Vadd,
    Vsub,
    Vmul,
    Vand,
    Vor,
    Vnot,
    Vshl,
    Vshr,
    // FPU
    Fadd,
    Fsub,
    Fmul,
    Fcmp,
    Fmov,
    Fneg,
    // SYSTEM
    Nop,
    Wfi,
    // MICROCODE
    Div,
    Mod,
    Udiv,
    Umod,
    Sqrt,
    Abs,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Exp,
    Log,
    Vdot,
    Vreduce,
    Vmax,
    Vmin,
    Vsum,
    Vperm,
    Cache,
    Flush,
    Membar,
    Syscall,
    Break,
    Halt,
}

impl Mnemonic {
    pub const fn category(self) -> Category {
        use Mnemonic::*;
        match self {
            Add | Sub | Mul | And | Or | Not | Xor | Shl | Shr | Rol | Ror | Cmp | Test | Inc
            | Dec | Neg => Category::Alu,
            Ld | St | Vld | Vst | Fld | Fst | Lea | Push => Category::Memory,
            Jmp | Jal | Jr | Jalr | Beq | Bne | Blt | Bge | Bltu | Bgeu | Call | Ret => {
                Category::Control
            }
            Vadd | Vsub | Vmul | Vand | Vor | Vnot | Vshl | Vshr => Category::Vector,
            Fadd | Fsub | Fmul | Fcmp | Fmov | Fneg => Category::Fpu,
            Nop | Wfi => Category::System,
            Div | Mod | Udiv | Umod | Sqrt | Abs | Sin | Cos | Tan | Asin | Acos | Atan | Exp
            | Log | Vdot | Vreduce | Vmax | Vmin | Vsum | Vperm | Cache | Flush | Membar
            | Syscall | Break | Halt => Category::Microcode,
        }
    }

    /// Looks up a mnemonic by its upper-cased text.
    ///
    /// Ordered longest-first within any pair that shares a prefix (`JALR`
    /// before `JAL`) so a greedy keyword match never mis-resolves the longer
    /// name to the shorter one.
    pub fn from_str(word: &str) -> Option<Self> {
        use Mnemonic::*;
        Some(match word {
            "ADD" => Add,
            "SUB" => Sub,
            "MUL" => Mul,
            "AND" => And,
            "OR" => Or,
            "NOT" => Not,
            "XOR" => Xor,
            "SHL" => Shl,
            "SHR" => Shr,
            "ROL" => Rol,
            "ROR" => Ror,
            "CMP" => Cmp,
            "TEST" => Test,
            "INC" => Inc,
            "DEC" => Dec,
            "NEG" => Neg,

            "LD" => Ld,
            "ST" => St,
            "VLD" => Vld,
            "VST" => Vst,
            "FLD" => Fld,
            "FST" => Fst,
            "LEA" => Lea,
            "PUSH" => Push,

            "JALR" => Jalr,
            "JAL" => Jal,
            "JMP" => Jmp,
            "JR" => Jr,
            "BEQ" => Beq,
            "BNE" => Bne,
            "BLT" => Blt,
            "BGE" => Bge,
            "BLTU" => Bltu,
            "BGEU" => Bgeu,
            "CALL" => Call,
            "RET" => Ret,

            "VADD" => Vadd,
            "VSUB" => Vsub,
            "VMUL" => Vmul,
            "VAND" => Vand,
            "VOR" => Vor,
            "VNOT" => Vnot,
            "VSHL" => Vshl,
            "VSHR" => Vshr,

            "FADD" => Fadd,
            "FSUB" => Fsub,
            "FMUL" => Fmul,
            "FCMP" => Fcmp,
            "FMOV" => Fmov,
            "FNEG" => Fneg,

            "NOP" => Nop,
            "WFI" => Wfi,

            "DIV" => Div,
            "MOD" => Mod,
            "UDIV" => Udiv,
            "UMOD" => Umod,
            "SQRT" => Sqrt,
            "ABS" => Abs,
            "SIN" => Sin,
            "COS" => Cos,
            "TAN" => Tan,
            "ASIN" => Asin,
            "ACOS" => Acos,
            "ATAN" => Atan,
            "EXP" => Exp,
            "LOG" => Log,
            "VDOT" => Vdot,
            "VREDUCE" => Vreduce,
            "VMAX" => Vmax,
            "VMIN" => Vmin,
            "VSUM" => Vsum,
            "VPERM" => Vperm,
            "CACHE" => Cache,
            "FLUSH" => Flush,
            "MEMBAR" => Membar,
            "SYSCALL" => Syscall,
            "BREAK" => Break,
            "HALT" => Halt,

            _ => return None,
        })
    }
}
