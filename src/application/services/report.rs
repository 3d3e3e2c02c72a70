//! Report service
//!
//! Loads a document, runs the shape-aware transform and renders the report.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::render::{render, ReportLine};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::TransformMode;
use crate::domain::{classify_paths, smart_transform, transform_groups, Node, Shape};
use crate::infrastructure::traits::FileSystem;

/// Service turning documents into shape-aware reports.
pub struct ReportService {
    fs: Arc<dyn FileSystem>,
}

impl ReportService {
    /// Create a new report service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and decode a document from disk.
    pub fn load(&self, path: &Path) -> ApplicationResult<Node> {
        debug!("load: path={}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        self.parse(&content, &path.display().to_string())
    }

    /// Decode document text. `source_name` only labels errors.
    pub fn parse(&self, content: &str, source_name: &str) -> ApplicationResult<Node> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|source| ApplicationError::Decode {
                source_name: source_name.to_string(),
                source,
            })?;
        Ok(Node::from(value))
    }

    /// Apply the smart transform according to `mode`.
    #[instrument(level = "debug", skip(self, node))]
    pub fn transform(&self, node: &Node, mode: TransformMode) -> ApplicationResult<Node> {
        let transformed = match mode {
            TransformMode::Whole => smart_transform(node)?,
            TransformMode::Grouped => transform_groups(node)?,
        };
        Ok(transformed)
    }

    /// Transform, then render the result from depth 0.
    pub fn report(&self, node: &Node, mode: TransformMode) -> ApplicationResult<Vec<ReportLine>> {
        let transformed = self.transform(node, mode)?;
        let lines = render(&transformed, 0)?;
        debug!("report: {} lines", lines.len());
        Ok(lines)
    }

    /// Shapes of all mappings in the document.
    pub fn classify(&self, node: &Node) -> Vec<(String, Shape)> {
        classify_paths(node)
    }
}
