// src/lines.rs - Buffer text <-> line sequence conversion for line-wise commands

/// Split buffer text into lines, each carrying its trailing terminator.
///
/// Every emitted line ends with `nl`: the final fragment gets one appended if
/// it is missing, and when the text ends exactly on a terminator an extra
/// terminator-only line is emitted for the empty last line. Empty input
/// yields an empty sequence.
pub fn split(text: &str, nl: char) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if c == nl {
            lines.push(std::mem::take(&mut current));
        }
    }

    if current.is_empty() {
        // Text ended on a terminator: the empty last line still gets one
        lines.push(nl.to_string());
    } else {
        current.push(nl);
        lines.push(current);
    }
    lines
}

/// Reassemble lines into buffer text. The last line in final order has its
/// trailing terminator stripped so the rebuilt buffer does not gain a
/// spurious trailing newline; `join(split(text, nl), nl) == text` for any
/// non-empty text.
pub fn join(lines: &[String], nl: char) -> String {
    let mut text = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i + 1 == lines.len() {
            text.push_str(line.strip_suffix(nl).unwrap_or(line));
        } else {
            text.push_str(line);
        }
    }
    text
}
