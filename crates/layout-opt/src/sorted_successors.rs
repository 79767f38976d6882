//! Frequency-sorted staging of candidate successors.

use alloc::vec::Vec;

use layout_ir::{Block, Code};

/// Something blocks can be handed to, in priority order.
pub trait BlockSink {
    fn push_block(&mut self, block: Block);
}

/// Staging buffer that hands its blocks to a worklist in ascending order of
/// block frequency.
///
/// Worklists pop from the end, so the most frequent candidate is handed over
/// last and comes out first.
#[derive(Debug, Default)]
pub struct SortedSuccessors {
    successors: Vec<Block>,
}

impl SortedSuccessors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a candidate. Duplicates are kept.
    pub fn append(&mut self, block: Block) {
        self.successors.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Sort the staged blocks, push them into `destination` and clear the
    /// buffer.
    pub fn process(&mut self, code: &Code, destination: &mut impl BlockSink) {
        self.sort(code);
        for &block in &self.successors {
            destination.push_block(block);
        }
        self.successors.clear();
    }

    /// Stable bubble sort on `<` alone.
    ///
    /// Equal or unordered (NaN) frequencies never swap, so such entries keep
    /// their staging order. The buffer rarely holds more than two blocks.
    fn sort(&mut self, code: &Code) {
        let successors = &mut self.successors;
        let len = successors.len();
        for i in 0..len.saturating_sub(1) {
            let mut swapped = false;
            for j in (i + 1..len).rev() {
                if code.frequency(successors[j]) < code.frequency(successors[j - 1]) {
                    successors.swap(j, j - 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
    }
}
