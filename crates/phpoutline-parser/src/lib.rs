//! # phpoutline-parser
//!
//! Line-oriented PHP source scanner. Extracts classes, interfaces,
//! traits, functions, methods, members and their doc-block metadata from
//! source text without executing or loading it.
//!
//! ## How it works
//!
//! - A regex-driven state machine scans the file line by line, tracking
//!   brace depth to delimit declaration bodies
//! - Doc comment blocks are parsed into tag-keyed attribute records as
//!   they are found and queued until the next declaration
//! - A decorator merges each doc record onto the signature-derived
//!   entity, by-name for parameters, so neither source of truth has to
//!   be complete
//!
//! This is deliberately not a PHP grammar parser: unmodeled syntax is
//! skipped (and counted) rather than failing the scan, trading
//! completeness for robustness on arbitrary real-world source.
//!
//! ## Quick Start
//!
//! ```rust
//! use phpoutline_parser::SourceParser;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), phpoutline_parser::ParserError> {
//! let source = "<?php\nfunction add(int $a, int $b): int { return $a + $b; }\n";
//! let mut parser = SourceParser::new();
//! let file = parser.parse_source(source, Path::new("add.php"), "")?;
//! println!("parsed {} functions", file.functions.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod decorator;
mod docblock;
mod errors;
mod metrics;
mod parser_impl;
mod patterns;
mod reader;
mod scanner;

// Re-export model types for convenience
pub use phpoutline_model::{
    ClassEntity, FileEntity, FunctionEntity, InterfaceEntity, Member, MethodEntity, ModelError,
    Parameter, ReturnValue, ThrowsClause, TraitEntity, TriggerClause, Visibility,
};

pub use config::ScanConfig;
pub use decorator::{
    decorate_class, decorate_file, decorate_function, decorate_interface, decorate_method,
    decorate_trait,
};
pub use docblock::{parse_doc_block, DocBlock};
pub use errors::{ParserError, ParserResult};
pub use metrics::ScanMetrics;
pub use parser_impl::SourceParser;
pub use scanner::Scanner;
