//! Code builder.

use alloc::{string::String, vec, vec::Vec};

use crate::{
    block::FrequentedBlock,
    code::Code,
    entity::Block,
    inst::{Arg, Inst},
    opcode::Opcode,
};

/// Builder for constructing a `Code` CFG by hand.
///
/// Terminal helpers append the terminal instruction and set the block's
/// successors together, so the two can't disagree. `finish` computes the
/// predecessor lists.
#[derive(Debug)]
pub struct CodeBuilder {
    code: Code,
}

impl CodeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            code: Code::new(String::from(name)),
        }
    }

    /// Create a block with frequency 1.
    pub fn create_block(&mut self) -> Block {
        self.code.create_block(1.0)
    }

    pub fn create_block_with_frequency(&mut self, frequency: f64) -> Block {
        self.code.create_block(frequency)
    }

    pub fn entrypoint(&mut self, block: Block) -> &mut Self {
        self.code.add_entrypoint(FrequentedBlock::normal(block));
        self
    }

    pub fn rare_entrypoint(&mut self, block: Block) -> &mut Self {
        self.code.add_entrypoint(FrequentedBlock::rare(block));
        self
    }

    /// Append a non-terminal instruction.
    pub fn inst(&mut self, block: Block, inst: Inst) -> &mut Self {
        self.code.push_inst(block, inst);
        self
    }

    pub fn jump(&mut self, from: Block, to: impl Into<FrequentedBlock>) -> &mut Self {
        self.code.push_inst(from, Inst::jump());
        self.code.set_successors(from, vec![to.into()]);
        self
    }

    /// Append a two-way branch. `taken` is used when the condition in
    /// `args[0]` holds.
    pub fn branch(
        &mut self,
        from: Block,
        opcode: Opcode,
        args: Vec<Arg>,
        taken: impl Into<FrequentedBlock>,
        not_taken: impl Into<FrequentedBlock>,
    ) -> &mut Self {
        debug_assert!(opcode.condition_kind().is_some(), "{} is not a branch", opcode);
        self.code.push_inst(from, Inst::new(opcode, args));
        self.code
            .set_successors(from, vec![taken.into(), not_taken.into()]);
        self
    }

    pub fn ret(&mut self, block: Block) -> &mut Self {
        self.code.push_inst(block, Inst::new(Opcode::Ret64, Vec::new()));
        self
    }

    pub fn oops(&mut self, block: Block) -> &mut Self {
        self.code.push_inst(block, Inst::new(Opcode::Oops, Vec::new()));
        self
    }

    pub fn finish(mut self) -> Code {
        self.code.recompute_predecessors();
        self.code
    }
}
