//! OCR text normalization.

/// Normalize raw OCR output for pattern matching.
///
/// Trims surrounding whitespace from every line, drops lines that are
/// empty after trimming, and joins the rest with `\n`. The result has no
/// leading or trailing newline; interior spacing within a line is kept
/// as the OCR engine produced it. The function is total and idempotent.
pub fn normalize(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_drops_blank_lines() {
        let raw = "  Fatura No: FTR123  \n\n   \n\tToplam: 100,00 TL\n";
        assert_eq!(normalize(raw), "Fatura No: FTR123\nToplam: 100,00 TL");
    }

    #[test]
    fn test_keeps_interior_spacing() {
        assert_eq!(normalize("a   b\n c  d "), "a   b\nc  d");
    }

    #[test]
    fn test_handles_crlf() {
        assert_eq!(normalize("one\r\ntwo\r\n"), "one\ntwo");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t\n  "), "");
    }

    #[test]
    fn test_idempotent() {
        let raw = "  x \n\n y\n";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}
