//! Snapshot helpers for lint diagnostics
//!
//! Diagnostics are numbered one per line so snapshots stay readable.

/// Format a list of diagnostics for snapshot testing.
///
/// # Example
///
/// ```ignore
/// use openapi_test_utils::assertions::format_diagnostics;
///
/// let diagnostics = linter.check(&document)?;
/// insta::assert_snapshot!(format_diagnostics(&diagnostics));
/// ```
pub fn format_diagnostics<D: std::fmt::Display>(diagnostics: &[D]) -> String {
    if diagnostics.is_empty() {
        return String::from("(no diagnostics)");
    }

    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| format!("[{}] {d}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_diagnostics_empty() {
        let empty: Vec<String> = vec![];
        assert_eq!(format_diagnostics(&empty), "(no diagnostics)");
    }

    #[test]
    fn test_format_diagnostics_numbered() {
        let diagnostics = vec!["error[required]: a", "warning[allof]: b"];
        assert_eq!(
            format_diagnostics(&diagnostics),
            "[1] error[required]: a\n[2] warning[allof]: b"
        );
    }
}
