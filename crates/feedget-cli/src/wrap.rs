use terminal_size::{terminal_size, Width};

/// Wraps `text` to `width` columns, starting every emitted line with
/// `prefix`.
///
/// The column rules are deliberate and a little asymmetric:
/// - a space right after the prefix of a freshly wrapped line is dropped,
/// - carriage returns are dropped entirely,
/// - an explicit newline resets the column to 0, not to the prefix length,
///   and no new prefix is emitted for it,
/// - a tab advances the column to the next multiple of 8 but is copied
///   through unchanged.
pub fn wrap(prefix: &str, text: &str, width: usize) -> String {
    let prefix_len = prefix.chars().count();
    let mut out = String::with_capacity(prefix.len() + text.len());
    out.push_str(prefix);
    let mut col = prefix_len;

    for c in text.chars() {
        if col > width {
            out.push('\n');
            out.push_str(prefix);
            col = prefix_len;
        }
        if col == prefix_len && c == ' ' {
            continue;
        }
        match c {
            '\r' => {}
            '\n' => {
                col = 0;
                out.push(c);
            }
            '\t' => {
                col = (col / 8 + 1) * 8;
                out.push(c);
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

/// Usable column count: terminal width minus a small right margin, with an
/// 80-column fallback when the width cannot be determined.
pub fn usable_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(80)
        .saturating_sub(8)
}
