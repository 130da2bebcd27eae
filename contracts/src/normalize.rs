//! Key normalization for open-text table lookups (job titles, cities).
//!
//! Policy:
//! - Drop control characters.
//! - Drop common zero-width characters (ZWS/ZWNJ/ZWJ/WJ/BOM).
//! - Unicode-aware lowercasing (char.to_lowercase()).
//! - Trim, and collapse inner whitespace runs to one space.
//!
//! This is normalization, not fuzzy matching: after it runs the lookup is exact.

/// Normalize free text into a table key.
pub fn for_lookup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() {
            continue;
        }
        for lc in ch.to_lowercase() {
            match lc {
                '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' => {}
                _ => {
                    if pending_space {
                        out.push(' ');
                        pending_space = false;
                    }
                    out.push(lc);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::for_lookup;

    #[test]
    fn trims_lowercases_and_collapses() {
        assert_eq!(for_lookup("  Senior   Software\tEngineer "), "senior software engineer");
    }

    #[test]
    fn drops_zero_width() {
        assert_eq!(for_lookup("New\u{200B} York"), "new york");
    }
}
