use std::path::{Path, PathBuf};

use walkshed_core::util::fs::split_extension;

use super::{ScanError, DESCRIPTOR_SUFFIX};

/// lists the files directly inside `directory` whose extension matches
/// `extension` (case-insensitive, without the dot), sorted by file name.
///
/// entries with another extension, subdirectories and names that are not
/// valid UTF-8 are skipped with a warning. descriptor sidecars are skipped
/// silently. only a failure to list the directory itself is returned.
pub fn scan<P: AsRef<Path>>(directory: P, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    let dir = directory.as_ref();
    let expected = extension.trim_start_matches('.').to_lowercase();
    let read_dir_error = |source| ScanError::ReadDirError {
        path: dir.display().to_string(),
        source,
    };

    let mut matches = vec![];
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                log::warn!("skipping {}: file name is not valid UTF-8", path.display());
                continue;
            }
        };
        if file_name.ends_with(DESCRIPTOR_SUFFIX) {
            continue;
        }
        if path.is_dir() {
            log::warn!("skipping {file_name}: is a directory");
            continue;
        }
        let (_, ext) = split_extension(&file_name);
        if ext != expected {
            log::warn!("skipping {file_name}: expected a .{expected} file");
            continue;
        }
        matches.push(path);
    }
    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "RP Burbridge Cost Walking.geojson",
            "RP Argyle Cost Cane.GEOJSON",
            "RP Argyle Cost Cane.descriptor.json",
            "notes.txt",
        ] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.geojson")).unwrap();

        let names = scan(dir.path(), "geojson")
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "RP Argyle Cost Cane.GEOJSON",
                "RP Burbridge Cost Walking.geojson"
            ]
        );
    }

    #[test]
    fn scan_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan(dir.path().join("missing"), ".geojson");
        assert!(matches!(result, Err(ScanError::ReadDirError { .. })));
    }
}
