//! The `block-order` subtest - prints the computed block order

use layout_opt::blocks_in_optimized_order;

use crate::{check_output, parse_case_code, TestCase};

/// Output: `order: block0, block2, block1`
pub(crate) fn run_case(case: &TestCase) {
    let code = parse_case_code(case);
    let order = blocks_in_optimized_order(&code);

    let names: Vec<String> = order.iter().map(|block| block.to_string()).collect();
    let actual = format!("order: {}\n", names.join(", "));
    check_output(case, &actual);
}
