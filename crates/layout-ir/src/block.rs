//! Basic blocks.

use alloc::vec::Vec;
use core::fmt;

use crate::{entity::Block, inst::Inst};

/// Frequency class of a control flow edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrequencyClass {
    #[default]
    Normal,
    /// Unlikely to be taken. Blocks only reachable through rare edges are
    /// laid out after everything else.
    Rare,
}

/// A successor edge (or entrypoint): a target block plus its frequency class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrequentedBlock {
    pub block: Block,
    pub class: FrequencyClass,
}

impl FrequentedBlock {
    pub fn new(block: Block, class: FrequencyClass) -> Self {
        Self { block, class }
    }

    pub fn normal(block: Block) -> Self {
        Self::new(block, FrequencyClass::Normal)
    }

    pub fn rare(block: Block) -> Self {
        Self::new(block, FrequencyClass::Rare)
    }

    pub fn is_rare(&self) -> bool {
        self.class == FrequencyClass::Rare
    }
}

impl From<Block> for FrequentedBlock {
    fn from(block: Block) -> Self {
        Self::normal(block)
    }
}

impl fmt::Display for FrequentedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block)?;
        if self.is_rare() {
            write!(f, " rare")?;
        }
        Ok(())
    }
}

/// Data of a basic block.
///
/// A basic block is a straight-line list of instructions whose last
/// instruction is its terminal. Successor order is significant: for two-way
/// branches successor 0 is the taken target.
#[derive(Debug, Clone)]
pub struct BlockData {
    pub insts: Vec<Inst>,
    pub successors: Vec<FrequentedBlock>,
    /// Blocks with an edge to this one. Back-references only, kept in sync by
    /// `Code::recompute_predecessors`.
    pub predecessors: Vec<Block>,
    /// Relative execution frequency, only ever compared against other blocks.
    pub frequency: f64,
    /// Position in the code's layout.
    pub index: usize,
}

impl BlockData {
    pub fn new(frequency: f64) -> Self {
        Self {
            insts: Vec::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            frequency,
            index: 0,
        }
    }

    pub fn push_inst(&mut self, inst: Inst) {
        self.insts.push(inst);
    }

    pub fn last_inst(&self) -> Option<&Inst> {
        self.insts.last()
    }

    pub fn last_inst_mut(&mut self) -> Option<&mut Inst> {
        self.insts.last_mut()
    }

    pub fn num_successors(&self) -> usize {
        self.successors.len()
    }

    pub fn successor(&self, index: usize) -> FrequentedBlock {
        self.successors[index]
    }

    pub fn successor_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.successors.iter().map(|succ| succ.block)
    }

    pub fn num_predecessors(&self) -> usize {
        self.predecessors.len()
    }

    pub fn predecessor(&self, index: usize) -> Block {
        self.predecessors[index]
    }

    pub fn contains_predecessor(&self, block: Block) -> bool {
        self.predecessors.contains(&block)
    }
}

impl Default for BlockData {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::*;

    #[test]
    fn test_block_data_defaults() {
        let data = BlockData::default();
        assert_eq!(data.frequency, 1.0);
        assert_eq!(data.num_successors(), 0);
        assert_eq!(data.num_predecessors(), 0);
        assert!(data.last_inst().is_none());
    }

    #[test]
    fn test_successor_accessors() {
        let mut data = BlockData::new(2.0);
        data.successors = vec![
            FrequentedBlock::normal(Block::new(1)),
            FrequentedBlock::rare(Block::new(2)),
        ];
        assert!(!data.successor(0).is_rare());
        assert!(data.successor(1).is_rare());
        let blocks: alloc::vec::Vec<_> = data.successor_blocks().collect();
        assert_eq!(blocks, [Block::new(1), Block::new(2)]);
    }

    #[test]
    fn test_frequented_block_display() {
        assert_eq!(format!("{}", FrequentedBlock::normal(Block::new(3))), "block3");
        assert_eq!(format!("{}", FrequentedBlock::rare(Block::new(3))), "block3 rare");
    }
}
