use serde::{Deserialize, Serialize};

/// Metrics collected during scanning
///
/// The unrecognized-line counter is the observability hook for the
/// best-effort skip policy: unmatched input never aborts a scan, but it
/// is counted and logged rather than vanishing silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMetrics {
    /// Total lines fed through the state machine
    pub lines_scanned: usize,

    /// Non-empty lines at declaration depth that matched no pattern
    pub lines_unrecognized: usize,

    /// Doc blocks parsed
    pub doc_blocks: usize,

    /// Classes, interfaces and traits constructed
    pub types_found: usize,

    /// Top-level functions constructed
    pub functions_found: usize,

    /// Methods constructed
    pub methods_found: usize,

    /// Member variables constructed
    pub members_found: usize,
}

impl ScanMetrics {
    /// Fold another scan's counters into this one.
    pub fn absorb(&mut self, other: &ScanMetrics) {
        self.lines_scanned += other.lines_scanned;
        self.lines_unrecognized += other.lines_unrecognized;
        self.doc_blocks += other.doc_blocks;
        self.types_found += other.types_found;
        self.functions_found += other.functions_found;
        self.methods_found += other.methods_found;
        self.members_found += other.members_found;
    }

    /// Share of scanned lines the state machine recognized (0.0 to 1.0)
    pub fn recognition_rate(&self) -> f64 {
        if self.lines_scanned == 0 {
            1.0
        } else {
            1.0 - self.lines_unrecognized as f64 / self.lines_scanned as f64
        }
    }
}
