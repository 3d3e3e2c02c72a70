//! Record classifiers: decide which known record shape a mapping has
//!
//! Rules are evaluated in a fixed order (Employee, then Department). The first
//! rule that matches wins, anything unmatched is `Generic`.

use std::fmt;

use crate::domain::node::Node;

/// Keys an Employee record must carry.
pub const EMPLOYEE_KEYS: [&str; 4] = ["firstName", "lastName", "age", "address"];

/// Key whose sequence value marks a Department record.
pub const DEPARTMENT_KEY: &str = "employees";

/// Structural classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Employee,
    Department,
    Generic,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Employee => "Employee",
            Shape::Department => "Department",
            Shape::Generic => "Generic",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping containing every Employee key. Value types are not checked.
pub fn is_employee_shape(node: &Node) -> bool {
    node.as_mapping()
        .is_some_and(|map| EMPLOYEE_KEYS.iter().all(|key| map.contains_key(*key)))
}

/// Mapping whose `employees` value is a sequence (elements are not inspected).
pub fn is_department_shape(node: &Node) -> bool {
    node.as_mapping()
        .and_then(|map| map.get(DEPARTMENT_KEY))
        .is_some_and(|employees| employees.as_sequence().is_some())
}

/// Ordered classification rules.
const RULES: [(Shape, fn(&Node) -> bool); 2] = [
    (Shape::Employee, is_employee_shape),
    (Shape::Department, is_department_shape),
];

/// Classify a node using the first matching rule.
pub fn classify(node: &Node) -> Shape {
    RULES
        .iter()
        .find(|(_, matches)| matches(node))
        .map(|(shape, _)| *shape)
        .unwrap_or(Shape::Generic)
}

/// Shape of every mapping in the tree, depth-first, keyed by location
/// (`$`, `$.key`, `$.key[0]`).
pub fn classify_paths(node: &Node) -> Vec<(String, Shape)> {
    let mut found = Vec::new();
    collect_shapes(node, "$".to_string(), &mut found);
    found
}

fn collect_shapes(node: &Node, path: String, found: &mut Vec<(String, Shape)>) {
    match node {
        Node::Mapping(map) => {
            found.push((path.clone(), classify(node)));
            for (key, value) in map {
                collect_shapes(value, format!("{}.{}", path, key), found);
            }
        }
        Node::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_shapes(item, format!("{}[{}]", path, i), found);
            }
        }
        Node::Scalar(_) => {}
    }
}
