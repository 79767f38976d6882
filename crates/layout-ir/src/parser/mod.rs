//! Parser for the textual form of `Code`.
//!
//! ```text
//! code @name {
//!     entry block0
//!     entry block2 rare
//! block0 (freq 1):
//!     Branch32 Equal, %t0, $0
//!     successors: block1, block2 rare
//! block1:
//!     Ret64
//! block2 (freq 0):
//!     Oops
//! }
//! ```
//!
//! Block labels are the block entities and must be exactly `block0` ..
//! `blockN-1`, in any order. The order in which blocks are written is the
//! layout.

mod block;
mod error;
mod primitives;
mod whitespace;

use alloc::{format, string::String, vec, vec::Vec};

use nom::{
    bytes::complete::tag,
    character::complete::{char, space1},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};

use self::block::{parse_block_body, ParsedBlock};
use error::{parse_error, validation_error};
pub use error::ParseError;
use primitives::{parse_code_name, parse_frequented_block};
use whitespace::blank;

use crate::{block::FrequentedBlock, code::Code, entity::Block, entity::EntityRef};

struct ParsedCode {
    name: String,
    entrypoints: Vec<FrequentedBlock>,
    blocks: Vec<ParsedBlock>,
}

fn parse_entry(input: &str) -> IResult<&str, FrequentedBlock> {
    preceded(terminated(tag("entry"), space1), parse_frequented_block)(input)
}

fn parse_code_internal(input: &str) -> IResult<&str, ParsedCode> {
    let (input, _) = blank(input)?;
    let (input, _) = terminated(tag("code"), space1)(input)?;
    let (input, name) = terminated(parse_code_name, blank)(input)?;
    let (input, _) = terminated(char('{'), blank)(input)?;
    let (input, entrypoints) = many0(terminated(parse_entry, blank))(input)?;
    let (input, blocks) = many0(parse_block_body)(input)?;
    let (input, _) = preceded(blank, terminated(char('}'), blank))(input)?;

    Ok((
        input,
        ParsedCode {
            name,
            entrypoints,
            blocks,
        },
    ))
}

/// Parse a single `code` from text.
///
/// Predecessor lists are computed from the parsed successor edges.
pub fn parse_code(input: &str) -> Result<Code, ParseError> {
    let trimmed = input.trim();
    match parse_code_internal(trimmed) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(parse_error(
                    trimmed,
                    remaining,
                    &format!("Unexpected input remaining: {}", remaining),
                ));
            }
            build_code(parsed)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(parse_error(
            trimmed,
            e.input,
            &format!("Parse error: {:?}", e.code),
        )),
        Err(nom::Err::Incomplete(_)) => Err(parse_error(trimmed, "", "Unexpected end of input")),
    }
}

/// Resolve labels and build the `Code`.
fn build_code(parsed: ParsedCode) -> Result<Code, ParseError> {
    let num_blocks = parsed.blocks.len();

    // Blocks are created in label order so that `blockN` is entity N.
    let mut by_label: Vec<Option<&ParsedBlock>> = vec![None; num_blocks];
    for block in &parsed.blocks {
        let index = block.label.index();
        if index >= num_blocks {
            return Err(validation_error(format!(
                "{} is out of range: {} blocks are defined",
                block.label, num_blocks
            )));
        }
        if by_label[index].is_some() {
            return Err(validation_error(format!(
                "{} is defined more than once",
                block.label
            )));
        }
        by_label[index] = Some(block);
    }

    let check_target = |target: Block, context: &str| {
        if target.index() < num_blocks {
            Ok(())
        } else {
            Err(validation_error(format!(
                "{} refers to undefined {}",
                context, target
            )))
        }
    };

    let mut code = Code::new(parsed.name);
    for block in by_label.iter().flatten() {
        code.create_block(block.frequency);
    }

    for entry in &parsed.entrypoints {
        check_target(entry.block, "entrypoint")?;
        code.add_entrypoint(*entry);
    }

    for block in &parsed.blocks {
        for succ in &block.successors {
            check_target(succ.block, &format!("successor of {}", block.label))?;
        }
        for inst in &block.insts {
            code.push_inst(block.label, inst.clone());
        }
        code.set_successors(block.label, block.successors.clone());
    }

    code.set_block_order(parsed.blocks.iter().map(|block| block.label).collect());
    code.recompute_predecessors();
    Ok(code)
}
