//! Block and instruction parsers.

use alloc::vec::Vec;

use nom::{
    bytes::complete::tag,
    character::complete::{char, space0, space1},
    combinator::{map_opt, opt},
    multi::{many0, separated_list0, separated_list1},
    number::complete::double,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use super::{
    primitives::{comma, identifier, parse_arg, parse_block, parse_frequented_block},
    whitespace::blank,
};
use crate::{
    block::FrequentedBlock,
    entity::Block,
    inst::{Arg, Inst},
    opcode::Opcode,
};

/// A block as written in the text, before labels are resolved.
#[derive(Debug, Clone)]
pub(crate) struct ParsedBlock {
    pub label: Block,
    pub frequency: f64,
    pub insts: Vec<Inst>,
    pub successors: Vec<FrequentedBlock>,
}

/// Parse one instruction line: `Branch32 Equal, %t0, $0`
pub(crate) fn parse_instruction(input: &str) -> IResult<&str, Inst> {
    let (input, opcode) = map_opt(identifier, Opcode::from_name)(input)?;
    let (input, args) = opt(preceded(space1, separated_list1(comma, parse_arg)))(input)?;
    let args: Vec<Arg> = args.unwrap_or_default();
    Ok((input, Inst::new(opcode, args)))
}

/// Parse a successor list line: `successors: block1, block2 rare`
pub(crate) fn parse_successors(input: &str) -> IResult<&str, Vec<FrequentedBlock>> {
    preceded(
        tuple((tag("successors"), space0, char(':'), space0)),
        separated_list0(comma, parse_frequented_block),
    )(input)
}

/// Parse the optional frequency annotation: `(freq 0.5)`
fn parse_frequency(input: &str) -> IResult<&str, f64> {
    delimited(
        terminated(char('('), space0),
        preceded(terminated(tag("freq"), space1), double),
        preceded(space0, char(')')),
    )(input)
}

/// Parse a block: header, instructions, then an optional successor list.
pub(crate) fn parse_block_body(input: &str) -> IResult<&str, ParsedBlock> {
    let (input, _) = blank(input)?;
    let (input, label) = terminated(parse_block, space0)(input)?;
    let (input, frequency) = opt(terminated(parse_frequency, space0))(input)?;
    let (input, _) = terminated(char(':'), blank)(input)?;

    // Instructions stop at the first line that isn't an opcode: the
    // successor list, the next block label or the closing brace.
    let (input, insts) = many0(terminated(parse_instruction, blank))(input)?;
    let (input, successors) = opt(terminated(parse_successors, blank))(input)?;

    Ok((
        input,
        ParsedBlock {
            label,
            frequency: frequency.unwrap_or(1.0),
            insts,
            successors: successors.unwrap_or_default(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{condcodes::ResultCondition, entity::Tmp};

    #[test]
    fn test_parse_instruction_without_args() {
        let (rest, inst) = parse_instruction("Jump\n").unwrap();
        assert_eq!(rest, "\n");
        assert_eq!(inst, Inst::jump());
    }

    #[test]
    fn test_parse_instruction_with_args() {
        let (rest, inst) = parse_instruction("BranchTest32 NonZero, %t0, $-1").unwrap();
        assert_eq!(rest, "");
        assert_eq!(inst.opcode, Opcode::BranchTest32);
        assert_eq!(
            inst.args,
            [
                Arg::ResCond(ResultCondition::NonZero),
                Arg::Tmp(Tmp::new(0)),
                Arg::Imm(-1)
            ]
        );
    }

    #[test]
    fn test_parse_instruction_rejects_unknown_opcode() {
        assert!(parse_instruction("successors: block1").is_err());
        assert!(parse_instruction("block1:").is_err());
        assert!(parse_instruction("Frobnicate %t0").is_err());
    }

    #[test]
    fn test_parse_successors() {
        let (rest, succs) = parse_successors("successors: block1, block2 rare\n").unwrap();
        assert_eq!(rest, "\n");
        assert_eq!(
            succs,
            [
                FrequentedBlock::normal(Block::new(1)),
                FrequentedBlock::rare(Block::new(2))
            ]
        );
    }

    #[test]
    fn test_parse_block_body() {
        let input = "block3 (freq 0.25):\n    Move $1, %t0\n    Jump\n    successors: block0\nblock0:";
        let (rest, block) = parse_block_body(input).unwrap();
        assert_eq!(rest, "block0:");
        assert_eq!(block.label, Block::new(3));
        assert_eq!(block.frequency, 0.25);
        assert_eq!(block.insts.len(), 2);
        assert_eq!(block.successors, [FrequentedBlock::normal(Block::new(0))]);
    }

    #[test]
    fn test_parse_block_body_default_frequency() {
        let (_, block) = parse_block_body("block0:\n    Ret64\n}").unwrap();
        assert_eq!(block.frequency, 1.0);
        assert!(block.successors.is_empty());
    }
}
