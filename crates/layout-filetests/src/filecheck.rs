//! Filecheck matching using the filecheck crate

use filecheck::{Checker, CheckerBuilder, NO_VARIABLES};

/// Build a filechecker from expected text containing directives
///
/// Lines without a directive are ignored. Fails if there is no directive
/// at all.
pub fn build_filechecker(expected_text: &str) -> Result<Checker, String> {
    let mut builder = CheckerBuilder::new();
    let mut directives = 0;
    for line in expected_text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let is_directive = builder
            .directive(line)
            .map_err(|e| format!("Failed to parse filecheck directive '{}': {}", line, e))?;
        if is_directive {
            directives += 1;
        }
    }
    if directives == 0 {
        return Err(String::from("No filecheck directives"));
    }
    Ok(builder.finish())
}

/// Match actual output against filecheck directives
pub fn match_filecheck(actual: &str, expected_text: &str) -> Result<(), String> {
    let checker = build_filechecker(expected_text)?;

    if checker
        .check(actual, NO_VARIABLES)
        .map_err(|e| format!("Filecheck error: {}", e))?
    {
        Ok(())
    } else {
        let (_, explain) = checker
            .explain(actual, NO_VARIABLES)
            .map_err(|e| format!("Failed to get filecheck explanation: {}", e))?;
        Err(format!("Filecheck failed:\n{}", explain))
    }
}
