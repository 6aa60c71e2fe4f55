//! Loading filter sections from a TOML file.
//!
//! # File Format
//!
//! ```toml
//! [[sections]]
//! id = "carType"
//! title = "CAR TYPE"
//!
//! [[sections.options]]
//! id = "manual"
//! label = "Manual"
//! value = "manual"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::domain::error::{DriveSphereError, Result};
use crate::engine::FilterSection;

#[derive(Debug, Deserialize)]
struct FilterFile {
    #[serde(default)]
    sections: Vec<FilterSection>,
}

/// Parses filter sections from TOML text.
///
/// # Errors
///
/// Returns [`DriveSphereError::Config`] when the text is not valid TOML,
/// declares no sections, repeats a section id, or repeats an option id or
/// value within a section.
pub fn parse_filter_sections(contents: &str) -> Result<Vec<FilterSection>> {
    let file: FilterFile = toml::from_str(contents)
        .map_err(|e| DriveSphereError::Config(format!("invalid filters file: {e}")))?;

    if file.sections.is_empty() {
        return Err(DriveSphereError::Config(
            "filters file declares no sections".to_string(),
        ));
    }

    for (index, section) in file.sections.iter().enumerate() {
        if file.sections[..index].iter().any(|earlier| earlier.id == section.id) {
            return Err(DriveSphereError::Config(format!(
                "duplicate filter section id: {}",
                section.id
            )));
        }

        for (position, option) in section.options.iter().enumerate() {
            let earlier = &section.options[..position];
            if earlier.iter().any(|other| other.id == option.id) {
                return Err(DriveSphereError::Config(format!(
                    "duplicate option id in section {}: {}",
                    section.id, option.id
                )));
            }
            if earlier.iter().any(|other| other.value == option.value) {
                return Err(DriveSphereError::Config(format!(
                    "duplicate option value in section {}: {}",
                    section.id, option.value
                )));
            }
        }
    }

    Ok(file.sections)
}

/// Reads and parses the filters file at `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a configuration error
/// from [`parse_filter_sections`].
pub fn load_filter_sections(path: &Path) -> Result<Vec<FilterSection>> {
    let _span = tracing::debug_span!("load_filter_sections", path = ?path).entered();

    let contents = std::fs::read_to_string(path)?;
    let sections = parse_filter_sections(&contents)?;

    tracing::debug!(section_count = sections.len(), "filter sections loaded");
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_and_options() {
        let sections = parse_filter_sections(
            r#"
            [[sections]]
            id = "carType"
            title = "CAR TYPE"

            [[sections.options]]
            id = "manual"
            label = "Manual"
            value = "manual"

            [[sections]]
            id = "fuel"
            title = "FUEL"
            "#,
        )
        .unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].options[0].value, "manual");
        assert!(sections[1].options.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = parse_filter_sections(
            r#"
            [[sections]]
            id = "a"
            title = "A"

            [[sections]]
            id = "a"
            title = "Again"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, DriveSphereError::Config(_)));
    }

    #[test]
    fn rejects_duplicate_option_ids() {
        let err = parse_filter_sections(
            r#"
            [[sections]]
            id = "carType"
            title = "CAR TYPE"

            [[sections.options]]
            id = "manual"
            label = "Manual"
            value = "manual"

            [[sections.options]]
            id = "manual"
            label = "Stick"
            value = "stick"
            "#,
        )
        .unwrap_err();
        assert!(
            matches!(err, DriveSphereError::Config(ref message) if message.contains("option id"))
        );
    }

    #[test]
    fn rejects_duplicate_option_values() {
        let err = parse_filter_sections(
            r#"
            [[sections]]
            id = "carType"
            title = "CAR TYPE"

            [[sections.options]]
            id = "manual"
            label = "Manual"
            value = "manual"

            [[sections.options]]
            id = "stick"
            label = "Stick"
            value = "manual"
            "#,
        )
        .unwrap_err();
        assert!(
            matches!(err, DriveSphereError::Config(ref message) if message.contains("option value"))
        );
    }

    #[test]
    fn same_option_id_in_different_sections_is_allowed() {
        let sections = parse_filter_sections(
            r#"
            [[sections]]
            id = "a"
            title = "A"

            [[sections.options]]
            id = "x"
            label = "X"
            value = "x"

            [[sections]]
            id = "b"
            title = "B"

            [[sections.options]]
            id = "x"
            label = "X"
            value = "x"
            "#,
        )
        .unwrap();
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn rejects_empty_file() {
        assert!(parse_filter_sections("").is_err());
    }
}
