use std::io::{self, BufRead, Write};

/// Print `question` and read one answer line. Only `y` (any case, surrounding
/// whitespace ignored) confirms; EOF and read errors count as no.
pub fn confirm(question: &str) -> bool {
    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm_with(question, &mut stdin.lock(), &mut stdout.lock())
}

fn confirm_with(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{question}").and_then(|()| output.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
    }
}
