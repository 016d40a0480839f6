use std::path::Path;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), std::io::Error>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        log::debug!("creating output directory {}", dirspath.display());
        std::fs::create_dir_all(dirspath)
    } else {
        Ok(())
    }
}

/// splits a file name into its stem and lowercase extension (without the dot).
/// names without an extension produce an empty extension.
pub fn split_extension(file_name: &str) -> (&str, String) {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let stem = &file_name[..file_name.len() - ext.len() - 1];
            (stem, ext.to_lowercase())
        }
        None => (file_name, String::new()),
    }
}
