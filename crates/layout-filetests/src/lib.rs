//! File-based tests for the block layout pass.
//!
//! Test files under `filetests/` hold:
//! - A test command header (`test block-order`, `test optimize-block-order`,
//!   `test verifier` or `test cat`)
//! - One or more `code` bodies
//! - Filecheck directives in `;` comments after each body

pub mod filecheck;
pub mod parser;

mod test_block_order;
mod test_cat;
mod test_optimize_block_order;
mod test_verifier;

pub use filecheck::match_filecheck;
pub use parser::{parse_test_file, TestCase};

/// Run every test case of a test file, dispatching on its command.
///
/// # Panics
///
/// Panics on the first failing case, or if the file has no cases or an
/// unknown command.
pub fn run_filetest(content: &str) {
    let test_cases = parse_test_file(content);
    assert!(!test_cases.is_empty(), "No test cases found in test file");

    for case in &test_cases {
        let run: fn(&TestCase) = match case.command.as_str() {
            "test block-order" => test_block_order::run_case,
            "test optimize-block-order" => test_optimize_block_order::run_case,
            "test verifier" => test_verifier::run_case,
            "test cat" => test_cat::run_case,
            other => panic!("Unknown test command: {}", other),
        };
        run(case);
    }
}

/// Parse the code of a test case, panicking with context on failure.
pub(crate) fn parse_case_code(case: &TestCase) -> layout_ir::Code {
    layout_ir::parse_code(&case.code_text).unwrap_or_else(|e| {
        panic!(
            "Failed to parse code: {}\n\nCode text:\n{}",
            e, case.code_text
        )
    })
}

/// Match `actual` against the directives of `case`, panicking with both
/// sides on mismatch.
pub(crate) fn check_output(case: &TestCase, actual: &str) {
    if let Err(e) = match_filecheck(actual, &case.expected_text) {
        panic!(
            "{} failed: {}\n\nExpected:\n{}\n\nActual:\n{}\n\nCode:\n{}",
            case.command, e, case.expected_text, actual, case.code_text
        );
    }
}

#[cfg(test)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
