//! A compilation unit: blocks, their layout and entrypoints.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{
    block::{BlockData, FrequentedBlock},
    entity::Block,
    entity_map::{EntitySet, PrimaryMap},
    inst::Inst,
};

/// The code of one compiled function.
///
/// Block data lives in a `PrimaryMap` and never moves; the physical order of
/// the blocks is the separate `layout` list. Every block in the layout knows
/// its own position through `BlockData::index`.
#[derive(Debug, Clone)]
pub struct Code {
    pub name: String,
    blocks: PrimaryMap<Block, BlockData>,
    layout: Vec<Block>,
    entrypoints: Vec<FrequentedBlock>,
}

impl Code {
    pub fn new(name: String) -> Self {
        Self {
            name,
            blocks: PrimaryMap::new(),
            layout: Vec::new(),
            entrypoints: Vec::new(),
        }
    }

    /// Create a new empty block at the end of the layout.
    pub fn create_block(&mut self, frequency: f64) -> Block {
        let mut data = BlockData::new(frequency);
        data.index = self.layout.len();
        let block = self.blocks.push(data);
        self.layout.push(block);
        block
    }

    pub fn add_entrypoint(&mut self, entrypoint: FrequentedBlock) {
        self.entrypoints.push(entrypoint);
    }

    pub fn num_entrypoints(&self) -> usize {
        self.entrypoints.len()
    }

    /// Entrypoint 0 is the primary entry into the function.
    pub fn entrypoint(&self, index: usize) -> FrequentedBlock {
        self.entrypoints[index]
    }

    pub fn entrypoints(&self) -> &[FrequentedBlock] {
        &self.entrypoints
    }

    pub fn block_data(&self, block: Block) -> &BlockData {
        &self.blocks[block]
    }

    pub fn block_data_mut(&mut self, block: Block) -> &mut BlockData {
        &mut self.blocks[block]
    }

    /// Whether `block` was created by this code.
    pub fn is_valid_block(&self, block: Block) -> bool {
        self.blocks.is_valid(block)
    }

    pub fn frequency(&self, block: Block) -> f64 {
        self.blocks[block].frequency
    }

    pub fn successors(&self, block: Block) -> &[FrequentedBlock] {
        &self.blocks[block].successors
    }

    pub fn predecessors(&self, block: Block) -> &[Block] {
        &self.blocks[block].predecessors
    }

    pub fn set_successors(&mut self, block: Block, successors: Vec<FrequentedBlock>) {
        self.blocks[block].successors = successors;
    }

    pub fn push_inst(&mut self, block: Block, inst: Inst) {
        self.blocks[block].push_inst(inst);
    }

    pub fn last_inst(&self, block: Block) -> Option<&Inst> {
        self.blocks[block].last_inst()
    }

    pub fn last_inst_mut(&mut self, block: Block) -> Option<&mut Inst> {
        self.blocks[block].last_inst_mut()
    }

    /// Exchange the taken and not-taken successors of a two-way block.
    pub fn swap_successors(&mut self, block: Block) {
        let successors = &mut self.blocks[block].successors;
        assert_eq!(
            successors.len(),
            2,
            "{} must have exactly two successors to swap them",
            block
        );
        successors.swap(0, 1);
    }

    /// Blocks in layout order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.layout.iter().copied()
    }

    pub fn layout(&self) -> &[Block] {
        &self.layout
    }

    /// Number of blocks in the layout.
    pub fn num_blocks(&self) -> usize {
        self.layout.len()
    }

    /// Number of blocks ever created, including ones dropped from the layout.
    pub fn num_block_entities(&self) -> usize {
        self.blocks.len()
    }

    /// The block laid out right after `block`, if any.
    pub fn find_next_block(&self, block: Block) -> Option<Block> {
        self.layout.get(self.blocks[block].index + 1).copied()
    }

    /// Re-home the blocks into `order`, assigning positions 0..N-1.
    ///
    /// Blocks of the current layout that do not appear in `order` leave the
    /// layout; predecessors are recomputed when that happens. Returns how many
    /// blocks were dropped.
    ///
    /// # Panics
    ///
    /// Panics if `order` names an unknown block or names a block twice.
    pub fn set_block_order(&mut self, order: Vec<Block>) -> usize {
        let mut placed = EntitySet::with_capacity(self.blocks.len());
        for (index, &block) in order.iter().enumerate() {
            assert!(self.blocks.is_valid(block), "unknown block {}", block);
            assert!(placed.insert(block), "{} placed twice", block);
            self.blocks[block].index = index;
        }

        let dropped = self
            .layout
            .iter()
            .filter(|&&block| !placed.contains(block))
            .count();
        self.layout = order;
        if dropped != 0 {
            self.recompute_predecessors();
        }
        dropped
    }

    /// Rebuild every predecessor list from the successor edges of the blocks
    /// in the layout.
    pub fn recompute_predecessors(&mut self) {
        for data in self.blocks.values_mut() {
            data.predecessors.clear();
        }
        for position in 0..self.layout.len() {
            let block = self.layout[position];
            for succ_index in 0..self.blocks[block].successors.len() {
                let succ = self.blocks[block].successors[succ_index].block;
                let succ_data = &mut self.blocks[succ];
                if !succ_data.contains_predecessor(block) {
                    succ_data.predecessors.push(block);
                }
            }
        }
    }
}

impl core::ops::Index<Block> for Code {
    type Output = BlockData;

    fn index(&self, block: Block) -> &BlockData {
        &self.blocks[block]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "code @{} {{", self.name)?;
        for entrypoint in &self.entrypoints {
            writeln!(f, "    entry {}", entrypoint)?;
        }
        for block in self.blocks() {
            let data = &self.blocks[block];
            writeln!(f, "{} (freq {}):", block, data.frequency)?;
            for inst in &data.insts {
                writeln!(f, "    {}", inst)?;
            }
            if !data.successors.is_empty() {
                write!(f, "    successors:")?;
                for (i, succ) in data.successors.iter().enumerate() {
                    if i == 0 {
                        write!(f, " {}", succ)?;
                    } else {
                        write!(f, ", {}", succ)?;
                    }
                }
                writeln!(f)?;
            }
        }
        writeln!(f, "}}")
    }
}
