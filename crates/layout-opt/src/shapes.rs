//! Recognizers for small CFG shapes with a better layout than the generic
//! frequency order.
//!
//! Each detector looks at the block that was just placed. On a match it
//! queues the blocks of the shape in the order they should be laid out
//! (last queued is placed first) and returns `true`. Already placed blocks
//! are never queued.

use layout_ir::{Block, Code, EntitySet};

use crate::worklist::ChainWorklist;

fn append_unvisited(worklist: &mut ChainWorklist, visited: &EntitySet<Block>, block: Block) {
    if !visited.contains(block) {
        worklist.append(block);
    }
}

/// Triangle: `a` branches to `b` and `c`, and `c` also flows into `b`.
///
/// ```text
///   a
///   | \
///   |  c
///   | /
///   b
/// ```
///
/// `c` is laid out right after `a` so it can fall through into `b`. Both
/// successor orders of `a` are tried.
pub fn detect_triangle(
    code: &Code,
    a: Block,
    worklist: &mut ChainWorklist,
    visited: &EntitySet<Block>,
) -> bool {
    let successors = code.successors(a);
    if successors.len() != 2 || successors[0].is_rare() || successors[1].is_rare() {
        return false;
    }

    let mut attempt = |b: Block, c: Block| {
        let flows_into_b = code.successors(c).iter().take(2).any(|succ| succ.block == b);
        if flows_into_b {
            append_unvisited(worklist, visited, b);
            append_unvisited(worklist, visited, c);
        }
        flows_into_b
    };

    let (first, second) = (successors[0].block, successors[1].block);
    attempt(first, second) || attempt(second, first)
}

/// Diamond, seen from one of its arms `b`.
///
/// ```text
///     a
///    / \
///   b   c
///    \ /
///     d
/// ```
///
/// `b` and `c` each have a single predecessor and a single successor. Rather
/// than letting one arm fall through and the other jump twice, the arms are
/// laid out back to back: `c` next, then `d`. Fires again when the other arm
/// is placed, which only queues what is still unplaced.
pub fn detect_diamond(
    code: &Code,
    b: Block,
    worklist: &mut ChainWorklist,
    visited: &EntitySet<Block>,
) -> bool {
    let b_data = code.block_data(b);
    if b_data.num_successors() != 1 || b_data.num_predecessors() != 1 {
        return false;
    }
    if b_data.successor(0).is_rare() {
        return false;
    }

    let d = b_data.successor(0).block;
    let a = b_data.predecessor(0);

    let a_data = code.block_data(a);
    if a_data.num_successors() != 2 {
        return false;
    }
    let c = if a_data.successor(0).block == b {
        if a_data.successor(1).is_rare() {
            return false;
        }
        a_data.successor(1).block
    } else if a_data.successor(1).block == b {
        if a_data.successor(0).is_rare() {
            return false;
        }
        a_data.successor(0).block
    } else {
        return false;
    };

    let c_data = code.block_data(c);
    if c_data.num_successors() != 1 || c_data.num_predecessors() != 1 {
        return false;
    }
    if c_data.successor(0).block != d {
        return false;
    }

    append_unvisited(worklist, visited, d);
    append_unvisited(worklist, visited, c);
    true
}

/// Exclusive successor: `a` branches to `b` and `c` of equal frequency, `b`
/// is only reachable from `a` while `c` has other predecessors.
///
/// ```text
///     a     d
///    / \   /
///   b   c-'
/// ```
///
/// `b` gets the fallthrough from `a`: `c` can still get one from elsewhere.
pub fn detect_exclusive_successor(
    code: &Code,
    a: Block,
    worklist: &mut ChainWorklist,
    visited: &EntitySet<Block>,
) -> bool {
    let successors = code.successors(a);
    if successors.len() != 2 || successors[0].is_rare() || successors[1].is_rare() {
        return false;
    }

    let b = successors[0].block;
    let c = successors[1].block;
    if code.frequency(b) != code.frequency(c) {
        return false;
    }

    if code.block_data(b).num_predecessors() == 1 && code.block_data(c).num_predecessors() > 1 {
        append_unvisited(worklist, visited, c);
        append_unvisited(worklist, visited, b);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use layout_ir::{parse_code, FrequentedBlock};

    use super::*;

    fn b(n: u32) -> Block {
        Block::new(n)
    }

    fn drain(worklist: &mut ChainWorklist) -> Vec<Block> {
        let visited = EntitySet::new();
        let mut out = Vec::new();
        while let Some(block) = worklist.pop(&visited) {
            out.push(block);
        }
        out.reverse();
        out
    }

    const TRIANGLE: &str = "
code @triangle {
    entry block0
block0:
    Branch32 Equal, %t0, $0
    successors: block1, block2
block1:
    Ret64
block2:
    Jump
    successors: block1
}";

    const DIAMOND: &str = "
code @diamond {
    entry block0
block0:
    Branch32 Equal, %t0, $0
    successors: block1, block2
block1:
    Jump
    successors: block3
block2:
    Jump
    successors: block3
block3:
    Ret64
}";

    const EXCLUSIVE: &str = "
code @exclusive {
    entry block0
block0:
    Branch32 Equal, %t0, $0
    successors: block1, block2
block1:
    Jump
    successors: block3
block2:
    Ret64
block3:
    Jump
    successors: block2
}";

    #[test]
    fn test_triangle_queues_join_then_arm() {
        let code = parse_code(TRIANGLE).unwrap();
        let mut worklist = ChainWorklist::new();
        assert!(detect_triangle(&code, b(0), &mut worklist, &EntitySet::new()));
        assert_eq!(drain(&mut worklist), [b(1), b(2)]);
    }

    #[test]
    fn test_triangle_with_swapped_successors() {
        let mut code = parse_code(TRIANGLE).unwrap();
        code.swap_successors(b(0));
        let mut worklist = ChainWorklist::new();
        assert!(detect_triangle(&code, b(0), &mut worklist, &EntitySet::new()));
        assert_eq!(drain(&mut worklist), [b(1), b(2)]);
    }

    #[test]
    fn test_triangle_skips_visited() {
        let code = parse_code(TRIANGLE).unwrap();
        let mut visited = EntitySet::new();
        visited.insert(b(1));
        let mut worklist = ChainWorklist::new();
        assert!(detect_triangle(&code, b(0), &mut worklist, &visited));
        assert_eq!(drain(&mut worklist), [b(2)]);
    }

    #[test]
    fn test_triangle_rejects_rare_edge() {
        let mut code = parse_code(TRIANGLE).unwrap();
        code.set_successors(
            b(0),
            alloc::vec![FrequentedBlock::normal(b(1)), FrequentedBlock::rare(b(2))],
        );
        let mut worklist = ChainWorklist::new();
        assert!(!detect_triangle(&code, b(0), &mut worklist, &EntitySet::new()));
        assert!(worklist.is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_triangle() {
        let code = parse_code(DIAMOND).unwrap();
        let mut worklist = ChainWorklist::new();
        assert!(!detect_triangle(&code, b(0), &mut worklist, &EntitySet::new()));
        assert!(!detect_diamond(&code, b(0), &mut worklist, &EntitySet::new()));
        assert!(worklist.is_empty());
    }

    #[test]
    fn test_diamond_from_either_arm() {
        let code = parse_code(DIAMOND).unwrap();

        let mut worklist = ChainWorklist::new();
        assert!(detect_diamond(&code, b(1), &mut worklist, &EntitySet::new()));
        assert_eq!(drain(&mut worklist), [b(3), b(2)]);

        let mut worklist = ChainWorklist::new();
        assert!(detect_diamond(&code, b(2), &mut worklist, &EntitySet::new()));
        assert_eq!(drain(&mut worklist), [b(3), b(1)]);
    }

    #[test]
    fn test_diamond_rejects_shared_arm() {
        // block2 gets a second predecessor.
        let mut code = parse_code(DIAMOND).unwrap();
        let extra = code.create_block(1.0);
        code.set_successors(extra, alloc::vec![FrequentedBlock::normal(b(2))]);
        code.recompute_predecessors();
        let mut worklist = ChainWorklist::new();
        assert!(!detect_diamond(&code, b(1), &mut worklist, &EntitySet::new()));
    }

    #[test]
    fn test_exclusive_successor() {
        let code = parse_code(EXCLUSIVE).unwrap();
        let mut worklist = ChainWorklist::new();
        assert!(!detect_triangle(&code, b(0), &mut worklist, &EntitySet::new()));
        assert!(detect_exclusive_successor(&code, b(0), &mut worklist, &EntitySet::new()));
        assert_eq!(drain(&mut worklist), [b(2), b(1)]);
    }

    #[test]
    fn test_exclusive_successor_needs_equal_frequencies() {
        let mut code = parse_code(EXCLUSIVE).unwrap();
        code.block_data_mut(b(2)).frequency = 2.0;
        let mut worklist = ChainWorklist::new();
        assert!(!detect_exclusive_successor(&code, b(0), &mut worklist, &EntitySet::new()));
        assert!(worklist.is_empty());
    }

    #[test]
    fn test_exclusive_successor_is_directional() {
        let mut code = parse_code(EXCLUSIVE).unwrap();
        code.swap_successors(b(0));
        let mut worklist = ChainWorklist::new();
        assert!(!detect_exclusive_successor(&code, b(0), &mut worklist, &EntitySet::new()));
    }
}
