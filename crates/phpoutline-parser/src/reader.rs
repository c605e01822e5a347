//! Source text loading.
//!
//! Reads a file fully into memory before scanning starts; no handles are
//! held during the scan. Content that is not valid UTF-8 is transcoded
//! lossily so the scanner always works on normalized text.

use crate::config::ScanConfig;
use crate::errors::{ParserError, ParserResult};
use std::fs;
use std::path::Path;

/// Read and normalize the full source text of `path`.
pub fn read_source(path: &Path, config: &ScanConfig) -> ParserResult<String> {
    let bytes = fs::read(path).map_err(|e| ParserError::Io(path.to_path_buf(), e))?;
    if bytes.len() > config.max_file_size {
        return Err(ParserError::FileTooLarge(
            path.to_path_buf(),
            config.max_file_size,
        ));
    }
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_missing_file_is_io_error() {
        let result = read_source(Path::new("/nonexistent/nope.php"), &ScanConfig::default());
        assert!(matches!(result, Err(ParserError::Io(_, _))));
    }

    #[test]
    fn read_rejects_oversize_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<?php echo 1;\n").unwrap();
        let config = ScanConfig::default().with_max_file_size(4);
        let result = read_source(file.path(), &config);
        assert!(matches!(result, Err(ParserError::FileTooLarge(_, 4))));
    }

    #[test]
    fn read_transcodes_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // Latin-1 'ü' byte inside an otherwise ASCII file
        file.write_all(b"<?php // gr\xfc\xdf\n").unwrap();
        let text = read_source(file.path(), &ScanConfig::default()).unwrap();
        assert!(text.starts_with("<?php"));
        assert!(text.contains('\u{FFFD}'));
    }
}
