use anyhow::{anyhow, Result};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

/// Resolves a CLI argument that may be inline text, a path to a file with
/// the given extension, or `-` for stdin.
pub fn read_inline_or_file(arg: &str, extension: &str) -> Result<String> {
    if arg == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else if arg.ends_with(extension) {
        read_text_file(arg)
    } else {
        Ok(arg.to_string())
    }
}

pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| anyhow!("Failed to read file {:?}: {}", path, e))
}

/// Name a source is known by: its file name, or the path as given when it has none.
pub fn source_name<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
