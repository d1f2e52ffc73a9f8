// ── Target files ──
//
// One element name per line. Blank lines and `#` comments are skipped.

use std::path::Path;

use crate::error::CoreError;

pub fn read_element_names(path: &Path) -> Result<Vec<String>, CoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::TargetFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_element_names(&text))
}

pub fn parse_element_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn skips_blanks_and_comments() {
        let names = parse_element_names("ion-1\n\n  # spare\n ion-2 \r\n");
        assert_eq!(names, vec!["ion-1", "ion-2"]);
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "branch-ion-01").unwrap();
        writeln!(file, "branch-ion-02").unwrap();

        let names = read_element_names(file.path()).unwrap();
        assert_eq!(names, vec!["branch-ion-01", "branch-ion-02"]);
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_element_names(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, CoreError::TargetFile { .. }));
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
