mod natural;

pub use natural::natural_cmp;

use std::fmt::Write;

/// Convert spaces to hyphens. Remove characters that aren't alphanumerics,
/// underscores, or hyphens. Convert to lowercase. Also strip leading and
/// trailing whitespace.
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut need_dash = false;
    for ch in string.chars() {
        let ascii = match deunicode::deunicode_char(ch) {
            Some(s) if !s.is_empty() => s,
            _ => "-",
        };

        for b in ascii.bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => {
                    if need_dash {
                        output.push('-');
                        need_dash = false;
                    }

                    output.push(b.to_ascii_lowercase() as char);
                }
                _ => {
                    // All sequences of characters not alphanumeric or `_` are
                    // converted into one `-`.
                    need_dash = !output.is_empty();
                }
            }
        }
    }

    output
}

/// Escapes `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes.
pub fn escape_html(string: &str) -> String {
    let mut output = String::with_capacity(string.len());
    for ch in string.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }

    output
}

/// Appends `-n` to `id` for the `n`th repeated occurrence of the same id.
pub(crate) fn dedup_id(seen: &mut rustc_hash::FxHashMap<String, usize>, mut id: String) -> String {
    let count = seen.entry(id.clone()).or_insert(0);
    if *count > 0 {
        let _ = write!(&mut id, "-{}", count);
    }

    *count += 1;
    id
}
