//! Test file parsing

/// A test case extracted from a test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// The `code` text, from its header to the closing brace
    pub code_text: String,
    /// The `;` comment lines after the code, with the `;` stripped
    pub expected_text: String,
    /// The test command, e.g. `test block-order`
    pub command: String,
}

fn is_code_start(line: &str) -> bool {
    line.trim_start().starts_with("code ")
}

/// Index of the line holding the brace that closes the body starting at
/// `start`, or the last line if the body is unterminated.
fn find_code_end(lines: &[&str], start: usize) -> usize {
    let mut depth = 0usize;
    for (i, line) in lines.iter().enumerate().skip(start) {
        let line = line.split('#').next().unwrap_or("");
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i;
                    }
                }
                _ => {}
            }
        }
    }
    lines.len().saturating_sub(1)
}

fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix(';').unwrap_or(line);
    line.strip_prefix(' ').unwrap_or(line)
}

/// Parse a test file and extract each code body with its expected output
///
/// The first `test ...` line is the command for every case. Expected output
/// is every `;` line between the end of a code body and the next one.
pub fn parse_test_file(content: &str) -> Vec<TestCase> {
    let lines: Vec<&str> = content.lines().collect();

    let command = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| line.starts_with("test "))
        .map(String::from)
        .unwrap_or_default();

    let mut test_cases = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !is_code_start(lines[i]) {
            i += 1;
            continue;
        }

        let code_end = find_code_end(&lines, i);
        let code_text = lines[i..=code_end].join("\n");

        let mut next = code_end + 1;
        let mut expected = Vec::new();
        while next < lines.len() && !is_code_start(lines[next]) {
            if lines[next].trim_start().starts_with(';') {
                expected.push(strip_comment(lines[next]));
            }
            next += 1;
        }

        test_cases.push(TestCase {
            code_text,
            expected_text: expected.join("\n"),
            command: command.clone(),
        });
        i = next;
    }

    test_cases
}
