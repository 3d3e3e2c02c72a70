//! treeshape: shape-aware transformer and indented reporter for JSON-like trees
//!
//! Architecture:
//! - `domain`: tree model, record classifiers, transforms (no I/O)
//! - `application`: printer, bundled samples, report service
//! - `infrastructure`: I/O boundary traits and service wiring
//! - `cli`: argument parsing, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
