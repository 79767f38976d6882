//! Primitive parsers for names, entities, literals and arguments.

use alloc::string::{String, ToString};

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0, space1},
    combinator::{map, map_opt, map_res, opt, recognize},
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::{
    block::{FrequencyClass, FrequentedBlock},
    condcodes::{DoubleCondition, RelationalCondition, ResultCondition, StatusCondition},
    entity::{Block, Tmp},
    inst::Arg,
};

/// Parse an integer literal
pub(crate) fn integer(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(pair(
            opt(char('-')),
            take_while1(|c: char| c.is_ascii_digit()),
        )),
        |s: &str| s.parse::<i64>(),
    )(input)
}

/// Parse an identifier made of letters, digits and underscores
pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// Parse a code name (@name)
pub(crate) fn parse_code_name(input: &str) -> IResult<&str, String> {
    map(preceded(char('@'), identifier), |s: &str| s.to_string())(input)
}

/// Parse a block label (block0, block1, etc.)
pub(crate) fn parse_block(input: &str) -> IResult<&str, Block> {
    map(
        map_res(
            preceded(tag("block"), take_while1(|c: char| c.is_ascii_digit())),
            |s: &str| s.parse::<u32>(),
        ),
        Block::new,
    )(input)
}

/// Parse a block reference with an optional `rare` marker: `block3 rare`
pub(crate) fn parse_frequented_block(input: &str) -> IResult<&str, FrequentedBlock> {
    map(
        pair(parse_block, opt(preceded(space1, tag("rare")))),
        |(block, rare)| {
            let class = if rare.is_some() {
                FrequencyClass::Rare
            } else {
                FrequencyClass::Normal
            };
            FrequentedBlock::new(block, class)
        },
    )(input)
}

/// Parse a temporary (%t0, %t1, etc.)
pub(crate) fn parse_tmp(input: &str) -> IResult<&str, Tmp> {
    map(
        map_res(
            preceded(tag("%t"), take_while1(|c: char| c.is_ascii_digit())),
            |s: &str| s.parse::<u32>(),
        ),
        Tmp::new,
    )(input)
}

/// Parse a condition code by name
pub(crate) fn parse_condition(input: &str) -> IResult<&str, Arg> {
    map_opt(identifier, |name: &str| {
        RelationalCondition::ALL
            .into_iter()
            .find(|cond| cond.name() == name)
            .map(Arg::RelCond)
            .or_else(|| {
                ResultCondition::ALL
                    .into_iter()
                    .find(|cond| cond.name() == name)
                    .map(Arg::ResCond)
            })
            .or_else(|| {
                DoubleCondition::ALL
                    .into_iter()
                    .find(|cond| cond.name() == name)
                    .map(Arg::DoubleCond)
            })
            .or_else(|| {
                StatusCondition::ALL
                    .into_iter()
                    .find(|cond| cond.name() == name)
                    .map(Arg::StatusCond)
            })
    })(input)
}

/// Parse an instruction argument: `%t0`, `$42` or a condition name
pub(crate) fn parse_arg(input: &str) -> IResult<&str, Arg> {
    alt((
        map(parse_tmp, Arg::Tmp),
        map(preceded(char('$'), integer), Arg::Imm),
        parse_condition,
    ))(input)
}

/// Parse a comma separator within a single line
pub(crate) fn comma(input: &str) -> IResult<&str, ()> {
    map(tuple((space0, char(','), space0)), |_| ())(input)
}
