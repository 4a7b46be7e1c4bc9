//! Issue Summoner - turn actionable comments into issues
//!
//! Walks a source tree, finds comments carrying an annotation such as
//! `@TODO`, and turns each one into a structured [`Tag`] (title,
//! description, file, line) ready for reporting or filing as an issue.
//!
//! # Features
//!
//! - Per-language comment syntax, including multi-line blocks
//! - Multi-line block comments become the tag's description
//! - `.gitignore`-style pruning of the directory walk
//! - Output reports in multiple formats (terminal, markdown, JSON, issue payloads)
//!
//! # Example
//!
//! ```rust,no_run
//! use issue_summoner::*;
//! use std::path::Path;
//!
//! let config = config::load_config(None).unwrap();
//! let registry = config::build_registry(&config);
//! let patterns = config::build_ignore_set(&config, Path::new("."), None).unwrap();
//!
//! let tags =
//!     scanner::scan_directory(Path::new("."), &config.annotation, &patterns, &registry)
//!         .unwrap();
//!
//! let report = models::TagReport::new(tags, &config.annotation, Path::new(".").to_path_buf());
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod issue;
pub mod models;
pub mod patterns;
pub mod remote;
pub mod reporter;
pub mod scanner;
pub mod syntax;

// Re-export commonly used types
pub use models::{Config, Tag, TagReport};
pub use patterns::{IgnorePattern, IgnoreSet};
pub use syntax::{CommentSyntax, LineType, SyntaxRegistry};
