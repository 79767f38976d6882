//! The `verifier` subtest - prints verifier errors

use layout_ir::verify;

use crate::{check_output, parse_case_code, TestCase};

/// Output: `ok`, or one `error: ` line per verifier error
pub(crate) fn run_case(case: &TestCase) {
    let code = parse_case_code(case);
    let actual = match verify(&code) {
        Ok(()) => String::from("ok\n"),
        Err(errors) => errors
            .iter()
            .map(|error| format!("error: {}\n", error))
            .collect(),
    };
    check_output(case, &actual);
}

#[cfg(test)]
mod tests {
    use crate::run_filetest;

    #[test]
    fn test_verifier() {
        run_filetest(include_str!("../filetests/verifier/errors.air"));
    }
}
