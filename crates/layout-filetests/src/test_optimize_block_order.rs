//! The `optimize-block-order` subtest - prints the code after the pass

use layout_opt::optimize_block_order;

use crate::{check_output, parse_case_code, TestCase};

/// Output: the code in its new layout, then
/// `stats: placed N, dropped N, flipped N`
pub(crate) fn run_case(case: &TestCase) {
    let mut code = parse_case_code(case);
    let stats = optimize_block_order(&mut code);

    let actual = format!(
        "{}stats: placed {}, dropped {}, flipped {}\n",
        code, stats.blocks_placed, stats.blocks_dropped, stats.branches_flipped
    );
    check_output(case, &actual);
}
