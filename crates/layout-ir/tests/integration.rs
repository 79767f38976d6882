//! Integration tests for building, printing, parsing and verifying code.

use layout_ir::{
    parse_code, verify, Arg, Block, Code, CodeBuilder, DoubleCondition, FrequentedBlock, Inst,
    Opcode, RelationalCondition, Tmp,
};

/// Build code, print it, parse it back and check both sides agree.
fn build_parse_roundtrip<F>(name: &str, builder_fn: F, expected_source: Option<&str>) -> Code
where
    F: FnOnce(&mut CodeBuilder),
{
    let mut builder = CodeBuilder::new(name);
    builder_fn(&mut builder);
    let built = builder.finish();
    verify(&built).expect("built code should verify");

    let text = format!("{}", built);
    if let Some(expected) = expected_source {
        let actual: Vec<&str> = text.lines().map(|l| l.trim()).collect();
        let expected: Vec<&str> = expected.trim().lines().map(|l| l.trim()).collect();
        assert_eq!(actual, expected, "printed code should match expected source");
    }

    let parsed = parse_code(&text).expect("failed to parse printed code");
    verify(&parsed).expect("parsed code should verify");

    assert_eq!(built.name, parsed.name);
    assert_eq!(built.layout(), parsed.layout());
    assert_eq!(built.entrypoints(), parsed.entrypoints());
    for block in built.blocks() {
        assert_eq!(built[block].insts, parsed[block].insts);
        assert_eq!(built.successors(block), parsed.successors(block));
        assert_eq!(built.predecessors(block), parsed.predecessors(block));
        assert_eq!(built.frequency(block), parsed.frequency(block));
    }
    parsed
}

#[test]
fn test_loop_roundtrip() {
    let code = build_parse_roundtrip(
        "count_down",
        |b| {
            let entry = b.create_block();
            let header = b.create_block_with_frequency(10.0);
            let exit = b.create_block();
            b.entrypoint(entry)
                .inst(entry, Inst::new(Opcode::Move, vec![Arg::Imm(10), Arg::Tmp(Tmp::new(0))]))
                .jump(entry, header)
                .inst(
                    header,
                    Inst::new(Opcode::Sub32, vec![Arg::Imm(1), Arg::Tmp(Tmp::new(0))]),
                )
                .branch(
                    header,
                    Opcode::Branch32,
                    vec![
                        Arg::RelCond(RelationalCondition::NotEqual),
                        Arg::Tmp(Tmp::new(0)),
                        Arg::Imm(0),
                    ],
                    header,
                    exit,
                )
                .ret(exit);
        },
        Some(
            "
code @count_down {
    entry block0
block0 (freq 1):
    Move $10, %t0
    Jump
    successors: block1
block1 (freq 10):
    Sub32 $1, %t0
    Branch32 NotEqual, %t0, $0
    successors: block1, block2
block2 (freq 1):
    Ret64
}
",
        ),
    );

    assert_eq!(code.predecessors(Block::new(1)), &[Block::new(0), Block::new(1)]);
}

#[test]
fn test_rare_edges_roundtrip() {
    build_parse_roundtrip(
        "float_check",
        |b| {
            let entry = b.create_block();
            let fast = b.create_block();
            let slow = b.create_block_with_frequency(0.0);
            let osr = b.create_block_with_frequency(0.0);
            b.entrypoint(entry)
                .rare_entrypoint(osr)
                .branch(
                    entry,
                    Opcode::BranchDouble,
                    vec![
                        Arg::DoubleCond(DoubleCondition::DoubleNotEqualOrUnordered),
                        Arg::Tmp(Tmp::new(0)),
                        Arg::Tmp(Tmp::new(1)),
                    ],
                    FrequentedBlock::rare(slow),
                    fast,
                )
                .ret(fast)
                .oops(slow)
                .jump(osr, fast);
        },
        None,
    );
}

#[test]
fn test_parsed_layout_differs_from_labels() {
    let code = parse_code(
        "
code @shuffled {
    entry block2
block2:
    Jump
    successors: block0
block0:
    Jump
    successors: block1
block1:
    Ret32 %t0
}
",
    )
    .unwrap();
    assert!(verify(&code).is_ok());
    assert_eq!(
        code.layout(),
        &[Block::new(2), Block::new(0), Block::new(1)]
    );
    assert_eq!(code.find_next_block(Block::new(2)), Some(Block::new(0)));
}

#[test]
fn test_verify_rejects_missing_entrypoint() {
    let code = parse_code("code @noentry {\nblock0:\n    Ret64\n}").unwrap();
    let errors = verify(&code).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("no entrypoint"));
}

#[test]
fn test_verify_rejects_bad_branch() {
    let code = parse_code(
        "
code @bad {
    entry block0
block0:
    Branch32 %t0, %t1
    successors: block1
block1:
    Ret64
}
",
    )
    .unwrap();
    let errors = verify(&code).unwrap_err();
    assert!(errors.iter().any(|e| e.message.contains("expects 2 successors")));
    assert!(errors.iter().any(|e| e.message.contains("Relational condition")));
    assert!(errors.iter().all(|e| e.location.as_deref() == Some("block0")));
}
