//! Input validation for the command-line front end.

use crate::constants::AUDIO_EXTENSIONS;
use owo_colors::OwoColorize;
use std::error::Error;
use std::path::Path;

/// Validate that a path exists and return an error if it doesn't.
pub fn validate_path_exists(path: &Path) -> Result<(), Box<dyn Error>> {
    if !path.exists() {
        return Err(format!(
            "{} Path does not exist: {}",
            "Error:".red().bold(),
            path.display()
        )
        .into());
    }
    Ok(())
}

/// Validate that `path` names a file type the decoder understands.
pub fn validate_audio_file(path: &Path) -> Result<(), Box<dyn Error>> {
    validate_path_exists(path)?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "{} Unsupported audio format '{}' (expected one of: {})",
            "Error:".red().bold(),
            path.display(),
            AUDIO_EXTENSIONS.join(", ")
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_path_exists_valid() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_path_exists(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_path_exists_invalid() {
        let path = Path::new("/this/path/does/not/exist/hopefully/12345");
        let result = validate_path_exists(path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_audio_file() {
        let temp_dir = TempDir::new().unwrap();
        let wav = temp_dir.path().join("take.WAV");
        let text = temp_dir.path().join("notes.txt");
        fs::write(&wav, "RIFF").unwrap();
        fs::write(&text, "test").unwrap();

        assert!(validate_audio_file(&wav).is_ok());
        let err = validate_audio_file(&text).unwrap_err().to_string();
        assert!(err.contains("Unsupported audio format"));
        assert!(validate_audio_file(&temp_dir.path().join("missing.wav")).is_err());
    }
}
