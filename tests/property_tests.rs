use proptest::prelude::*;

use vtx1_assembler::driver::{assemble, AssembleOptions};

fn assemble_ok(source: &str) -> Vec<u8> {
    let outcome = assemble(source, &AssembleOptions::default());
    outcome.image.unwrap_or_else(|| panic!("expected success, got: {:?}", outcome.diagnostics))
}

fn decimal_to_ternary(mut value: i64) -> String {
    if value == 0 {
        return "0t0".to_string();
    }
    let mut digits = Vec::new();
    while value != 0 {
        let mut rem = value % 3;
        value /= 3;
        if rem == 2 {
            rem = -1;
            value += 1;
        } else if rem == -2 {
            rem = 1;
            value -= 1;
        }
        digits.push(match rem {
            1 => '+',
            0 => '0',
            -1 => '-',
            _ => unreachable!(),
        });
    }
    let mut s = String::from("0t");
    s.extend(digits.iter().rev());
    s
}

proptest! {
    /// Image length always equals the final assigned address for a well-formed program.
    #[test]
    fn image_alignment_holds(n in 1u32..64) {
        let mut source = String::new();
        for _ in 0..n {
            source.push_str("NOP\n");
        }
        let image = assemble_ok(&source);
        prop_assert_eq!(image.len() as u32, n * 4);
    }

    /// Every literal radix decodes to the value it was written from.
    #[test]
    fn round_trip_decimal(value in 0i64..0x7FF) {
        let source = format!(".DW {value}\n");
        let image = assemble_ok(&source);
        let decoded = u32::from_le_bytes(image[0..4].try_into().unwrap());
        prop_assert_eq!(decoded, value as u32);
    }

    #[test]
    fn round_trip_hex(value in 0i64..0x7FF) {
        let source = format!(".DW 0x{value:X}\n");
        let image = assemble_ok(&source);
        let decoded = u32::from_le_bytes(image[0..4].try_into().unwrap());
        prop_assert_eq!(decoded, value as u32);
    }

    #[test]
    fn round_trip_binary(value in 0i64..0x7FF) {
        let source = format!(".DW 0b{value:b}\n");
        let image = assemble_ok(&source);
        let decoded = u32::from_le_bytes(image[0..4].try_into().unwrap());
        prop_assert_eq!(decoded, value as u32);
    }

    #[test]
    fn round_trip_balanced_ternary(value in 0i64..0x7FF) {
        let literal = decimal_to_ternary(value);
        let source = format!(".DW {literal}\n");
        let image = assemble_ok(&source);
        let decoded = u32::from_le_bytes(image[0..4].try_into().unwrap());
        prop_assert_eq!(decoded, value as u32);
    }

    /// A VLIW bundle of 1..=3 operations always emits exactly 12 bytes.
    #[test]
    fn vliw_padding_is_always_twelve_bytes(n in 1usize..=3) {
        let ops: Vec<&str> = std::iter::repeat("[NOP]").take(n).collect();
        let source = ops.join(" ");
        let image = assemble_ok(&source);
        prop_assert_eq!(image.len(), 12);
    }

    /// Moving a branch target by delta changes only the immediate field by delta.
    #[test]
    fn branch_relativity_under_relocation(padding in 0usize..40, delta in 0usize..8) {
        let build = |gap: usize| -> u32 {
            let mut source = String::from("BEQ T0, T1, target\n");
            for _ in 0..gap {
                source.push_str("NOP\n");
            }
            source.push_str("target: NOP\n");
            let image = assemble_ok(&source);
            let word = u32::from_le_bytes(image[0..4].try_into().unwrap());
            (word >> 6) & 0x7FF
        };

        let before = build(padding);
        let after = build(padding + delta);
        let before_signed = if before & 0x400 != 0 { before as i32 - 0x800 } else { before as i32 };
        let after_signed = if after & 0x400 != 0 { after as i32 - 0x800 } else { after as i32 };
        prop_assert_eq!(after_signed - before_signed, (delta * 4) as i32);
    }

    /// Two consecutive `.ORG n` directives behave identically to a single one.
    #[test]
    fn org_directive_is_idempotent(addr in 0u32..0x4000) {
        let once = assemble_ok(&format!(".ORG {addr}\nNOP\n"));
        let twice = assemble_ok(&format!(".ORG {addr}\n.ORG {addr}\nNOP\n"));
        prop_assert_eq!(once, twice);
    }
}
