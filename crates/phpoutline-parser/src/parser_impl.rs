//! Public parser entry point.

use crate::config::ScanConfig;
use crate::errors::ParserResult;
use crate::metrics::ScanMetrics;
use crate::reader::read_source;
use crate::scanner::Scanner;
use phpoutline_model::FileEntity;
use std::path::Path;

/// Scans PHP source text into [`FileEntity`] records.
///
/// One parser can process many files; each scan owns private state, so
/// independent files may also be scanned by independent parsers in
/// parallel. Metrics accumulate across calls until reset.
#[derive(Debug, Default)]
pub struct SourceParser {
    config: ScanConfig,
    metrics: ScanMetrics,
}

impl SourceParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            metrics: ScanMetrics::default(),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Accumulated metrics over all scans since construction or reset.
    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn reset_metrics(&mut self) {
        self.metrics = ScanMetrics::default();
    }

    /// Read and scan one file. `root` is the leading path fragment to
    /// strip when recording the file's relative pathname.
    pub fn parse_file(&mut self, path: &Path, root: &str) -> ParserResult<FileEntity> {
        let source = read_source(path, &self.config)?;
        self.parse_source(&source, path, root)
    }

    /// Scan in-memory source text. `path` is the logical location of the
    /// text and is only used for the file record's naming fields.
    pub fn parse_source(
        &mut self,
        source: &str,
        path: &Path,
        root: &str,
    ) -> ParserResult<FileEntity> {
        let uri = path.to_string_lossy().replace('\\', "/");
        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| uri.clone());
        let pathname = uri.strip_prefix(root).unwrap_or(&uri).to_string();

        let mut file = FileEntity::new(basename);
        file.pathname = pathname;
        file.uri = uri;

        let mut scanner = Scanner::new(self.config.clone());
        scanner.scan(source, &mut file)?;
        self.metrics.absorb(scanner.metrics());
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_sets_naming_fields() {
        let mut parser = SourceParser::new();
        let file = parser
            .parse_source("<?php\n", Path::new("/base/src/Foo.php"), "/base/")
            .unwrap();
        assert_eq!(file.basename, "Foo.php");
        assert_eq!(file.pathname, "src/Foo.php");
        assert_eq!(file.uri, "/base/src/Foo.php");
    }

    #[test]
    fn metrics_accumulate_across_scans() {
        let mut parser = SourceParser::new();
        parser
            .parse_source("<?php\nfunction a() {}\n", Path::new("a.php"), "")
            .unwrap();
        parser
            .parse_source("<?php\nfunction b() {}\n", Path::new("b.php"), "")
            .unwrap();
        assert_eq!(parser.metrics().functions_found, 2);

        parser.reset_metrics();
        assert_eq!(parser.metrics().functions_found, 0);
    }
}
