//! Hierarchical printer: turns a transformed tree into indented report lines
//!
//! Display shapes are re-derived here from key presence alone (`firstName`,
//! then `name`, then any other mapping). This is looser than the transform-time
//! classifiers and is only a rendering heuristic.

use std::io::{self, Write};

use termtree::Tree;

use crate::config::{OutputFormat, MAX_INDENT_WIDTH};
use crate::domain::transform::require_field;
use crate::domain::{DomainResult, Node};

const EMPLOYEE_DISPLAY: &str = "Employee display";
const DEPARTMENT_DISPLAY: &str = "Department display";

/// One logical report entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub depth: usize,
    pub text: String,
}

impl ReportLine {
    fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

/// Render `node` starting at `depth`, in depth-first order.
pub fn render(node: &Node, depth: usize) -> DomainResult<Vec<ReportLine>> {
    let mut lines = Vec::new();
    render_into(node, depth, &mut lines)?;
    Ok(lines)
}

fn render_into(node: &Node, depth: usize, lines: &mut Vec<ReportLine>) -> DomainResult<()> {
    match node {
        Node::Mapping(map) if map.contains_key("firstName") => {
            let first = require_field(node, EMPLOYEE_DISPLAY, "firstName")?;
            let last = require_field(node, EMPLOYEE_DISPLAY, "lastName")?;
            let age = require_field(node, EMPLOYEE_DISPLAY, "age")?;
            let address = require_field(node, EMPLOYEE_DISPLAY, "address")?;
            lines.push(ReportLine::new(depth, format!("Employee: {} {}", first, last)));
            lines.push(ReportLine::new(depth + 1, format!("Age: {}", age)));
            lines.push(ReportLine::new(depth + 1, "Address:"));
            render_into(address, depth + 2, lines)
        }
        Node::Mapping(map) if map.contains_key("name") => {
            let name = require_field(node, DEPARTMENT_DISPLAY, "name")?;
            let employees = require_field(node, DEPARTMENT_DISPLAY, "employees")?;
            lines.push(ReportLine::new(depth, format!("Department: {}", name)));
            render_into(employees, depth + 1, lines)
        }
        Node::Mapping(map) => {
            for (key, value) in map {
                lines.push(ReportLine::new(depth, format!("{}:", key)));
                render_into(value, depth + 1, lines)?;
            }
            Ok(())
        }
        Node::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                lines.push(ReportLine::new(depth, format!("Item {}:", i)));
                render_into(item, depth + 1, lines)?;
            }
            Ok(())
        }
        Node::Scalar(scalar) => {
            lines.push(ReportLine::new(depth, scalar.to_string()));
            Ok(())
        }
    }
}

/// Join lines as text, indenting each by `indent_width * depth` spaces.
///
/// `indent_width` is capped at [`MAX_INDENT_WIDTH`].
pub fn to_text(lines: &[ReportLine], indent_width: usize) -> String {
    let indent_width = indent_width.min(MAX_INDENT_WIDTH);
    lines
        .iter()
        .map(|line| format!("{}{}\n", " ".repeat(indent_width * line.depth), line.text))
        .collect()
}

/// Fold depth-ordered lines into a forest: each line becomes a child of the
/// nearest preceding line with a smaller depth.
pub fn to_trees(lines: &[ReportLine]) -> Vec<Tree<String>> {
    let mut roots = Vec::new();
    let mut stack: Vec<(usize, Tree<String>)> = Vec::new();

    for line in lines {
        close_until(&mut stack, &mut roots, line.depth);
        stack.push((line.depth, Tree::new(line.text.clone())));
    }
    close_until(&mut stack, &mut roots, 0);
    roots
}

fn close_until(
    stack: &mut Vec<(usize, Tree<String>)>,
    roots: &mut Vec<Tree<String>>,
    depth: usize,
) {
    while stack.last().is_some_and(|(d, _)| *d >= depth) {
        if let Some((_, tree)) = stack.pop() {
            match stack.last_mut() {
                Some((_, parent)) => {
                    parent.push(tree);
                }
                None => roots.push(tree),
            }
        }
    }
}

/// Write report lines to `sink` in the requested format.
pub fn write_report<W: Write>(
    lines: &[ReportLine],
    format: OutputFormat,
    indent_width: usize,
    sink: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => sink.write_all(to_text(lines, indent_width).as_bytes())?,
        OutputFormat::Tree => {
            for tree in to_trees(lines) {
                write!(sink, "{}", tree)?;
            }
        }
    }
    sink.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use serde_json::json;

    fn texts(lines: &[ReportLine]) -> Vec<(usize, &str)> {
        lines.iter().map(|l| (l.depth, l.text.as_str())).collect()
    }

    #[test]
    fn given_scalar_when_rendering_then_single_line_at_depth() {
        let lines = render(&Node::from(json!(30)), 3).unwrap();
        assert_eq!(texts(&lines), vec![(3, "30")]);
    }

    #[test]
    fn given_sequence_when_rendering_then_items_are_zero_indexed() {
        let lines = render(&Node::from(json!(["CPU", "Memory"])), 0).unwrap();
        assert_eq!(
            texts(&lines),
            vec![(0, "Item 0:"), (1, "CPU"), (0, "Item 1:"), (1, "Memory")]
        );
    }

    #[test]
    fn given_empty_containers_when_rendering_then_no_child_lines() {
        let lines = render(&Node::from(json!({"list": [], "map": {}})), 0).unwrap();
        assert_eq!(texts(&lines), vec![(0, "list:"), (0, "map:")]);
    }

    #[test]
    fn given_first_name_only_mapping_when_rendering_then_missing_last_name() {
        let result = render(&Node::from(json!({"firstName": "A"})), 0);
        assert_eq!(
            result,
            Err(DomainError::MissingField {
                record: EMPLOYEE_DISPLAY,
                field: "lastName"
            })
        );
    }

    #[test]
    fn given_name_without_employees_when_rendering_then_missing_employees() {
        let result = render(&Node::from(json!({"name": "Eng"})), 0);
        assert_eq!(
            result,
            Err(DomainError::MissingField {
                record: DEPARTMENT_DISPLAY,
                field: "employees"
            })
        );
    }

    #[test]
    fn given_lines_when_to_text_then_indents_by_width() {
        let lines = vec![ReportLine::new(0, "a:"), ReportLine::new(2, "b")];
        assert_eq!(to_text(&lines, 2), "a:\n    b\n");
        assert_eq!(to_text(&lines, 3), "a:\n      b\n");
    }

    #[test]
    fn given_oversized_width_when_to_text_then_capped_at_maximum() {
        let lines = vec![ReportLine::new(1, "x")];
        let expected = format!("{}x\n", " ".repeat(MAX_INDENT_WIDTH));
        assert_eq!(to_text(&lines, usize::MAX), expected);
    }

    #[test]
    fn given_lines_when_to_trees_then_nests_by_depth() {
        let lines = vec![
            ReportLine::new(0, "root"),
            ReportLine::new(1, "child"),
            ReportLine::new(2, "grandchild"),
            ReportLine::new(1, "sibling"),
            ReportLine::new(0, "second root"),
        ];

        let trees = to_trees(&lines);

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].root, "root");
        assert_eq!(trees[0].leaves.len(), 2);
        assert_eq!(trees[0].leaves[0].leaves[0].root, "grandchild");
        assert_eq!(trees[1].root, "second root");
    }
}
