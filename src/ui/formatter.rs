//! Formatting helpers for CLI output.

use std::collections::BTreeMap;

use console::style;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a bare value (tag or version) so it can be captured by scripts.
pub fn display_value(value: &str) {
    println!("{}", value);
}

/// Print a freshly generated config.
///
/// # Arguments
/// * `json` - The config as written to disk
pub fn display_config(json: &str) {
    println!("{}", style("New config generated:").bold());
    print!("{}", json);
}

/// Render alternates as `name: template` lines, sorted by name.
pub fn format_alternates(alternates: &BTreeMap<String, String>) -> Vec<String> {
    alternates
        .iter()
        .map(|(name, template)| format!("{}: {}", name, template))
        .collect()
}

/// Print the configured alternate formats.
pub fn display_alternates(alternates: &BTreeMap<String, String>) {
    if alternates.is_empty() {
        display_status("No alternate formats configured");
        return;
    }
    println!("{}", style("Alternate formats:").bold());
    for line in format_alternates(alternates) {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_alternates_sorted() {
        let mut alternates = BTreeMap::new();
        alternates.insert("latest".to_string(), "app:latest".to_string());
        alternates.insert("major".to_string(), "app:{0}".to_string());
        alternates.insert("edge".to_string(), "app:edge-{0}.{1}".to_string());

        assert_eq!(
            format_alternates(&alternates),
            vec!["edge: app:edge-{0}.{1}", "latest: app:latest", "major: app:{0}"]
        );
    }

    #[test]
    fn test_format_alternates_empty() {
        assert!(format_alternates(&BTreeMap::new()).is_empty());
    }
}
