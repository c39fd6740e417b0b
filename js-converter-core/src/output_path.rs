use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Suffix added to the file stem when the output would overwrite its own input
pub const DEFAULT_CONVERTED_SUFFIX: &str = "_converted";

/// Where converted programs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Overwrite each input file
    InPlace,
    /// Write into this directory
    Directory(PathBuf),
}

/// Accept only existing files with a `.js` extension
pub fn validate_input(path: &Path) -> Result<PathBuf, ConvertError> {
    if !path.is_file() {
        return Err(ConvertError::NotAFile(path.to_path_buf()));
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("js") {
        return Err(ConvertError::NotJavaScript(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

pub fn validate_out_dir(path: &Path) -> Result<PathBuf, ConvertError> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(ConvertError::NotADirectory(path.to_path_buf()))
    }
}

/// Compute the path a converted program is written to.
///
/// Writing into the directory that already holds the input appends `suffix` to
/// the file stem (`a.js` becomes `a_converted.js`).
pub fn resolve_output_path(input: &Path, target: &OutputTarget, suffix: &str) -> PathBuf {
    let OutputTarget::Directory(out_dir) = target else {
        return input.to_path_buf();
    };

    let file_name = input.file_name().map(PathBuf::from).unwrap_or_default();
    let in_dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if same_directory(in_dir, out_dir) {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut name = format!("{stem}{suffix}");
        if let Some(ext) = input.extension() {
            name.push('.');
            name.push_str(&ext.to_string_lossy());
        }
        out_dir.join(name)
    } else {
        out_dir.join(file_name)
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_place_keeps_input_path() {
        let path = resolve_output_path(
            Path::new("samples/a.js"),
            &OutputTarget::InPlace,
            DEFAULT_CONVERTED_SUFFIX,
        );
        assert_eq!(path, PathBuf::from("samples/a.js"));
    }

    #[test]
    fn test_other_directory_keeps_name() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("in");
        let out_dir = temp_dir.path().join("out");
        fs::create_dir_all(&input_dir).unwrap();
        fs::create_dir_all(&out_dir).unwrap();

        let path = resolve_output_path(
            &input_dir.join("a.js"),
            &OutputTarget::Directory(out_dir.clone()),
            DEFAULT_CONVERTED_SUFFIX,
        );
        assert_eq!(path, out_dir.join("a.js"));
    }

    #[test]
    fn test_same_directory_gets_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();

        let path = resolve_output_path(
            &dir.join("a.js"),
            &OutputTarget::Directory(dir.join(".")),
            DEFAULT_CONVERTED_SUFFIX,
        );
        assert_eq!(path, dir.join(".").join("a_converted.js"));
    }

    #[test]
    fn test_validate_input() {
        let temp_dir = TempDir::new().unwrap();
        let js = temp_dir.path().join("a.js");
        let txt = temp_dir.path().join("a.txt");
        fs::write(&js, "").unwrap();
        fs::write(&txt, "").unwrap();

        assert!(validate_input(&js).is_ok());
        assert!(matches!(
            validate_input(&txt),
            Err(ConvertError::NotJavaScript(_))
        ));
        assert!(matches!(
            validate_input(&temp_dir.path().join("missing.js")),
            Err(ConvertError::NotAFile(_))
        ));
        assert!(matches!(
            validate_input(temp_dir.path()),
            Err(ConvertError::NotAFile(_))
        ));
    }

    #[test]
    fn test_validate_out_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_out_dir(temp_dir.path()).is_ok());
        let err = validate_out_dir(&temp_dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().ends_with("is not a valid directory."));
    }
}
