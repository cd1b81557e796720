// src/core/sanitize.rs

/// Collapse whitespace runs to one space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Trimmed lines of a scraped block, blank ones dropped.
/// Handles `\r\n` and stray non-breaking spaces from copied DOM text.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Split a legend header line into column names.
/// `Last *` renders as two tokens but names a single column.
pub fn header_tokens(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut it = line.split_whitespace().peekable();
    while let Some(tok) = it.next() {
        if tok == "Last" && it.peek() == Some(&"*") {
            it.next();
            out.push(s!("Last *"));
        } else {
            out.push(s!(tok));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_dropped_and_trimmed() {
        let text = "\n  Name Mean  \n\n\t svcA \r\n 1% 2% \n   \n";
        assert_eq!(non_blank_lines(text), vec!["Name Mean", "svcA", "1% 2%"]);
    }

    #[test]
    fn last_star_collapses() {
        assert_eq!(
            header_tokens("Name Mean Last * Max"),
            vec!["Name", "Mean", "Last *", "Max"]
        );
        // A lone `*` elsewhere stays its own token
        assert_eq!(header_tokens("Name * Max"), vec!["Name", "*", "Max"]);
        assert_eq!(header_tokens("Name Last"), vec!["Name", "Last"]);
    }

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  gw   elk\t1 "), "gw elk 1");
    }
}
