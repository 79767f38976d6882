//! Worklists driving the hot and cold placement phases.

use alloc::{collections::VecDeque, vec::Vec};

use layout_ir::{Block, EntitySet};

use crate::sorted_successors::BlockSink;

/// Worklist of hot blocks, used to grow chains of fallthroughs.
///
/// Normally the most recently appended block is taken next, which turns the
/// jump to it into a fallthrough. Once a chain can't be extended the next pop
/// takes the oldest entry instead, starting a new chain from a block that was
/// queued early.
///
/// Entries are never deduplicated. Blocks already placed are skipped on pop.
#[derive(Debug, Default)]
pub struct ChainWorklist {
    blocks: VecDeque<Block>,
    start_new_chain: bool,
}

impl ChainWorklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, block: Block) {
        self.blocks.push_back(block);
    }

    /// Make the next `pop` start a new chain.
    pub fn mark_start_new_chain(&mut self) {
        self.start_new_chain = true;
    }

    /// Take the next block that isn't in `visited`.
    pub fn pop(&mut self, visited: &EntitySet<Block>) -> Option<Block> {
        if self.start_new_chain {
            self.start_new_chain = false;
            self.pop_new_chain(visited)
        } else {
            self.pop_chain(visited)
        }
    }

    fn pop_chain(&mut self, visited: &EntitySet<Block>) -> Option<Block> {
        while let Some(block) = self.blocks.pop_back() {
            if !visited.contains(block) {
                return Some(block);
            }
        }
        None
    }

    fn pop_new_chain(&mut self, visited: &EntitySet<Block>) -> Option<Block> {
        while let Some(block) = self.blocks.pop_front() {
            if !visited.contains(block) {
                return Some(block);
            }
        }
        None
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockSink for ChainWorklist {
    fn push_block(&mut self, block: Block) {
        self.append(block);
    }
}

/// LIFO worklist that accepts each block at most once.
#[derive(Debug, Default)]
pub struct BlockWorklist {
    stack: Vec<Block>,
    seen: EntitySet<Block>,
}

impl BlockWorklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `block` unless it was queued before. Returns whether it was
    /// queued now.
    pub fn push(&mut self, block: Block) -> bool {
        if !self.seen.insert(block) {
            return false;
        }
        self.stack.push(block);
        true
    }

    pub fn pop(&mut self) -> Option<Block> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl BlockSink for BlockWorklist {
    fn push_block(&mut self, block: Block) {
        self.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(n: u32) -> Block {
        Block::new(n)
    }

    #[test]
    fn test_chain_pops_lifo() {
        let mut worklist = ChainWorklist::new();
        let visited = EntitySet::new();
        worklist.append(b(1));
        worklist.append(b(2));
        worklist.append(b(3));
        assert_eq!(worklist.pop(&visited), Some(b(3)));
        assert_eq!(worklist.pop(&visited), Some(b(2)));
        assert_eq!(worklist.len(), 1);
    }

    #[test]
    fn test_new_chain_pops_fifo_once() {
        let mut worklist = ChainWorklist::new();
        let visited = EntitySet::new();
        worklist.append(b(1));
        worklist.append(b(2));
        worklist.append(b(3));
        worklist.mark_start_new_chain();
        assert_eq!(worklist.pop(&visited), Some(b(1)));
        assert_eq!(worklist.pop(&visited), Some(b(3)));
        assert_eq!(worklist.pop(&visited), Some(b(2)));
    }

    #[test]
    fn test_pop_skips_visited() {
        let mut worklist = ChainWorklist::new();
        let mut visited = EntitySet::new();
        visited.insert(b(1));
        visited.insert(b(3));
        worklist.append(b(1));
        worklist.append(b(2));
        worklist.append(b(3));
        assert_eq!(worklist.pop(&visited), Some(b(2)));
        worklist.mark_start_new_chain();
        assert_eq!(worklist.pop(&visited), None);
        assert!(worklist.is_empty());
    }

    #[test]
    fn test_new_chain_mode_is_consumed_by_empty_pop() {
        let mut worklist = ChainWorklist::new();
        let visited = EntitySet::new();
        worklist.mark_start_new_chain();
        assert_eq!(worklist.pop(&visited), None);
        worklist.append(b(1));
        worklist.append(b(2));
        assert_eq!(worklist.pop(&visited), Some(b(2)));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut worklist = ChainWorklist::new();
        worklist.append(b(1));
        worklist.append(b(1));
        assert_eq!(worklist.len(), 2);
    }

    #[test]
    fn test_block_worklist_accepts_once() {
        let mut worklist = BlockWorklist::new();
        assert!(worklist.push(b(4)));
        assert!(worklist.push(b(5)));
        assert!(!worklist.push(b(4)));
        assert_eq!(worklist.len(), 2);
        assert_eq!(worklist.pop(), Some(b(5)));
        assert_eq!(worklist.pop(), Some(b(4)));
        assert!(!worklist.push(b(4)));
        assert_eq!(worklist.pop(), None);
        assert!(worklist.is_empty());
    }
}
