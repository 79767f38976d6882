//! The `cat` subtest - parses and prints code unchanged

use crate::{check_output, parse_case_code, TestCase};

pub(crate) fn run_case(case: &TestCase) {
    let code = parse_case_code(case);
    let printed = code.to_string();

    let reparsed = layout_ir::parse_code(&printed).unwrap_or_else(|e| {
        panic!("Failed to reparse printed code: {}\n\n{}", e, printed)
    });
    assert_eq!(
        reparsed.to_string(),
        printed,
        "printing is not stable across a reparse"
    );

    check_output(case, &printed);
}

#[cfg(test)]
mod tests {
    use crate::run_filetest;

    #[test]
    fn test_cat() {
        run_filetest(include_str!("../filetests/cat/format.air"));
    }
}
