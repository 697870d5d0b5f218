//! Value parsers for CLI arguments that clap cannot check on its own

use std::fs;
use std::path::PathBuf;

/// Accepts an existing, readable file
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Splits `KEY=VALUE` at the first `=`; the value may be empty, the key may not
pub fn validate_param(param: &str) -> Result<(String, String), String> {
    let (key, value) = param
        .split_once('=')
        .ok_or_else(|| format!("Parameter must have the form KEY=VALUE, got: '{}'", param))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Parameter key cannot be empty: '{}'", param));
    }

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_config_file_path() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        assert!(validate_config_file_path("/nonexistent/herald.toml").is_err());

        let dir = tempfile::tempdir().unwrap();
        let err = validate_config_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));
    }

    #[test]
    fn test_validate_param() {
        assert_eq!(
            validate_param("sound=bell").unwrap(),
            ("sound".to_string(), "bell".to_string())
        );
        assert_eq!(
            validate_param("url=https://x.test/?a=b").unwrap(),
            ("url".to_string(), "https://x.test/?a=b".to_string())
        );
        assert_eq!(
            validate_param(" group =").unwrap(),
            ("group".to_string(), String::new())
        );
        assert!(validate_param("sound").is_err());
        assert!(validate_param("=bell").is_err());
    }
}
