//! Axis label and hover text formatting shared by every layer.

/// Y-axis tick label, e.g. `TP53 (42%)`.
pub fn gene_label(gene: &str, ratio: u8) -> String {
    format!("{} ({}%)", gene, ratio)
}

/// Hover text of an alteration segment.
pub fn hover_text(sample: &str, description: &str) -> String {
    format!("{}<br>{}", sample, description)
}

/// `round(100 * altered / total)` with halves rounded up; 0 when `total` is 0.
pub fn percent(altered: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let altered = altered.min(total) as u64;
    let total = total as u64;
    ((200 * altered + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_label() {
        assert_eq!(gene_label("TP53", 42), "TP53 (42%)");
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13); // 12.5 rounds up
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 0);
    }
}
