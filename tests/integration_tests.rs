use vtx1_assembler::driver::{assemble, AssembleOptions};
use vtx1_assembler::error::ErrorKind;

fn run(source: &str) -> vtx1_assembler::driver::AssembleOutcome {
    assemble(source, &AssembleOptions::default())
}

fn word_at(image: &[u8], addr: usize) -> u32 {
    u32::from_le_bytes(image[addr..addr + 4].try_into().unwrap())
}

#[test]
fn minimal_program() {
    let source = ".ORG 0x1000\nmain:\n    LD T0, 0x1234\n    NOP\n";
    let outcome = run(source);
    assert!(outcome.is_success(), "diagnostics: {:?}", outcome.diagnostics);

    assert_eq!(outcome.symbol_table.get("main"), Some(0x1000));

    let image = outcome.image.unwrap();
    assert_eq!(image.len(), 0x1000 + 8);

    let ld_word = word_at(&image, 0x1000);
    assert_eq!((ld_word >> 26) & 0x3F, 0b010001); // LD opcode
    assert_eq!((ld_word >> 6) & 0x7FF, 0x1234 & 0x7FF); // truncated to 11 bits

    let nop_word = word_at(&image, 0x1004);
    assert_eq!(nop_word & 0x7, 0); // serial
}

#[test]
fn vliw_triple() {
    let source = "[ADD T2, T0, T1] [SUB T3, T1, T0] [MUL T4, T0, T1]";
    let outcome = run(source);
    assert!(outcome.is_success(), "diagnostics: {:?}", outcome.diagnostics);

    let image = outcome.image.unwrap();
    assert_eq!(image.len(), 12);

    let first = word_at(&image, 0);
    let second = word_at(&image, 4);
    let third = word_at(&image, 8);

    assert_eq!(first & 0x7, 4);
    assert_eq!(second & 0x7, 4);
    assert_eq!(third & 0x7, 0);
}

#[test]
fn backward_branch() {
    let source = "loop: ADD T0, T0, T1\n      BNE T0, 0, loop\n";
    let outcome = run(source);
    assert!(outcome.is_success(), "diagnostics: {:?}", outcome.diagnostics);

    let image = outcome.image.unwrap();
    let branch_word = word_at(&image, 4);
    assert_eq!((branch_word >> 6) & 0x7FF, 0x7FC);
}

#[test]
fn forward_branch_range_error() {
    let mut source = String::from("BEQ T0, T1, far\n");
    for _ in 0..256 {
        source.push_str("ADD T0, T0, T0\n");
    }
    source.push_str("far: NOP\n");

    let outcome = run(&source);
    assert!(!outcome.is_success());
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::BranchOutOfRange(..))));
}

#[test]
fn balanced_ternary_data_word() {
    let source = ".DW 0t+0-\n";
    let outcome = run(source);
    assert!(outcome.is_success(), "diagnostics: {:?}", outcome.diagnostics);

    let image = outcome.image.unwrap();
    assert_eq!(image.len(), 4);
    assert_eq!(word_at(&image, 0), 8);
}

#[test]
fn unknown_symbol_error() {
    let outcome = run("JMP nowhere\n");
    assert!(!outcome.is_success());
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::UndefinedSymbol(ref s) if s == "nowhere")));
}

#[test]
fn listing_renders_symbol_table_and_source() {
    let source = "main:\n    ADD T0, T1, T2\n    ; a trailing comment\n";
    let outcome = run(source);
    assert!(outcome.is_success(), "diagnostics: {:?}", outcome.diagnostics);

    let rendered = vtx1_assembler::listing::render(source, &outcome);
    assert!(rendered.contains("main"));
    assert!(rendered.contains("ADD T0, T1, T2"));
}

#[test]
fn idempotent_org_directive() {
    let once = run(".ORG 0x2000\nNOP\n").image.unwrap();
    let twice = run(".ORG 0x2000\n.ORG 0x2000\nNOP\n").image.unwrap();
    assert_eq!(once, twice);
}

#[test]
fn duplicate_label_reported_without_growing_symbol_table() {
    let outcome = run("dup: NOP\ndup: NOP\n");
    assert!(!outcome.is_success());
    assert_eq!(outcome.symbol_table.len(), 1);
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| matches!(d.kind, ErrorKind::DuplicateLabel(ref name, _, _) if name == "dup")));
}

#[test]
fn equ_binds_literal_value_not_cursor() {
    let source = ".EQU LIMIT, 42\nADD T0, T0, T1\n";
    let outcome = run(source);
    assert!(outcome.is_success(), "diagnostics: {:?}", outcome.diagnostics);
    assert_eq!(outcome.symbol_table.get("LIMIT"), Some(42));
}
