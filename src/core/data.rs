//! RON data file loading shared by every definition type.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use super::error::DataLoadError;

/// Root directory for tuning data.
pub const DATA_DIR: &str = "assets/data";

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&display, &contents)
}

/// Parse RON text, naming `source` in errors.
pub fn parse_ron<T: DeserializeOwned>(source: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: source.to_string(),
        details: e.to_string(),
    })
}

/// Load a RON file, falling back to `T::default()` with a warning.
pub fn load_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    match load_ron(path.as_ref()) {
        Ok(value) => {
            info!("Loaded {}", path.as_ref().display());
            value
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Default, PartialEq)]
    struct Sample {
        speed: f32,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn parses_ron_text() {
        let sample: Sample = parse_ron("inline", "(speed: 2.5)").unwrap();
        assert_eq!(sample, Sample { speed: 2.5, name: String::new() });
    }

    #[test]
    fn parse_error_names_source() {
        let err = parse_ron::<Sample>("inline.ron", "(speed: )").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { ref path, .. } if path == "inline.ron"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_ron::<Sample>("assets/data/does_not_exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let sample: Sample = load_or_default("assets/data/does_not_exist.ron");
        assert_eq!(sample, Sample::default());
    }
}
