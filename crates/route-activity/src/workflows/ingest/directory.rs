use super::reader::SpreadsheetFormat;
use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// Spreadsheet files available in a data folder, sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirectory {
    root: PathBuf,
    files: Vec<String>,
}

impl DataDirectory {
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self, ConfigError> {
        let root = root.as_ref().to_path_buf();
        let entries =
            std::fs::read_dir(&root).map_err(|source| ConfigError::UnreadableDataDirectory {
                path: root.clone(),
                source,
            })?;

        let mut files: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter(|entry| SpreadsheetFormat::from_path(&entry.path()).is_some())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with("~$"))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(ConfigError::EmptyDataDirectory { path: root });
        }

        Ok(Self { root, files })
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Resolves a file by exact name, or the first file when none is given.
    pub fn select(&self, name: Option<&str>) -> Result<PathBuf, ConfigError> {
        let chosen = match name {
            None => &self.files[0],
            Some(name) => self
                .files
                .iter()
                .find(|file| file.as_str() == name)
                .ok_or_else(|| ConfigError::UnknownDataFile {
                    name: name.to_string(),
                    available: self.files.clone(),
                })?,
        };

        Ok(self.root.join(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn scan_lists_spreadsheets_sorted_and_ignores_other_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("norte.xlsx"), b"").expect("write");
        fs::write(dir.path().join("aloma.csv"), b"").expect("write");
        fs::write(dir.path().join("notas.txt"), b"").expect("write");
        fs::write(dir.path().join("~$aloma.xlsx"), b"").expect("write");

        let data = DataDirectory::scan(dir.path()).expect("scan succeeds");
        assert_eq!(data.files(), ["aloma.csv", "norte.xlsx"]);
        assert_eq!(
            data.select(None).expect("default selection"),
            dir.path().join("aloma.csv")
        );
        assert_eq!(
            data.select(Some("norte.xlsx")).expect("named selection"),
            dir.path().join("norte.xlsx")
        );
    }

    #[test]
    fn empty_directory_is_a_configuration_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = DataDirectory::scan(dir.path()).expect_err("empty dir rejected");
        assert!(matches!(err, ConfigError::EmptyDataDirectory { .. }));
        assert!(err.to_string().starts_with("no spreadsheet files in"));
    }

    #[test]
    fn unknown_selection_lists_available_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("aloma.xlsx"), b"").expect("write");

        let data = DataDirectory::scan(dir.path()).expect("scan succeeds");
        let err = data.select(Some("otro.xlsx")).expect_err("unknown file rejected");
        assert!(err.to_string().contains("aloma.xlsx"));
    }
}
