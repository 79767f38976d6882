//! Low-level control flow graph model for block layout.
//!
//! This crate defines the code representation the layout pass works on:
//! - Entities (blocks, temporaries) and dense entity maps
//! - Instructions with condition-code arguments
//! - Blocks with frequencies and frequency-classed successor edges
//! - `Code`: blocks, their physical layout and entrypoints
//! - A text format with parser and printer
//! - A verifier

#![no_std]

extern crate alloc;

mod block;
mod builder;
mod code;
mod condcodes;
mod entity;
mod entity_map;
mod inst;
mod opcode;
mod parser;
mod verifier;

pub use block::{BlockData, FrequencyClass, FrequentedBlock};
pub use builder::CodeBuilder;
pub use code::Code;
pub use condcodes::{DoubleCondition, RelationalCondition, ResultCondition, StatusCondition};
pub use entity::{Block, EntityRef, Tmp};
pub use entity_map::{EntitySet, PrimaryMap};
pub use inst::{Arg, Inst};
pub use opcode::{ConditionKind, Opcode};
pub use parser::{parse_code, ParseError};
pub use verifier::{verify, verify_cfg, verify_format, verify_layout, VerifierError};
