//! Tree transforms: the generic structural rewrite, the record-specific
//! transforms and the smart dispatcher joining them with classification.

use tracing::trace;

use crate::domain::classify::{classify, Shape};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Mapping, Node};

/// Rebuild any node purely by structure.
///
/// Mappings keep their keys and order, sequences their length, scalars are
/// returned unchanged. Knows nothing about records.
pub fn generic_transform(node: &Node) -> Node {
    match node {
        Node::Mapping(map) => Node::Mapping(
            map.iter()
                .map(|(key, value)| (key.clone(), generic_transform(value)))
                .collect(),
        ),
        Node::Sequence(items) => Node::Sequence(items.iter().map(generic_transform).collect()),
        Node::Scalar(scalar) => Node::Scalar(scalar.clone()),
    }
}

/// Look up a field a record transform reads unconditionally.
pub(crate) fn require_field<'a>(
    node: &'a Node,
    record: &'static str,
    field: &'static str,
) -> DomainResult<&'a Node> {
    node.as_mapping()
        .and_then(|map| map.get(field))
        .ok_or(DomainError::MissingField { record, field })
}

/// Rewrite an Employee record.
///
/// Output carries exactly `firstName`, `lastName`, `age` (copied) and
/// `address` (generically transformed), in that order. Other keys are dropped.
pub fn transform_employee(node: &Node) -> DomainResult<Node> {
    let record = Shape::Employee.as_str();
    let mut out = Mapping::with_capacity(4);
    for field in ["firstName", "lastName", "age"] {
        out.insert(field.to_string(), require_field(node, record, field)?.clone());
    }
    let address = require_field(node, record, "address")?;
    out.insert("address".to_string(), generic_transform(address));
    Ok(Node::Mapping(out))
}

/// Rewrite a Department record.
///
/// Every `employees` element goes through [`transform_employee`] without
/// re-checking its shape, so a non-Employee element fails the whole call.
pub fn transform_department(node: &Node) -> DomainResult<Node> {
    let record = Shape::Department.as_str();
    let name = require_field(node, record, "name")?;
    let employees = require_field(node, record, "employees")?
        .as_sequence()
        .ok_or(DomainError::MissingField {
            record,
            field: "employees",
        })?;

    let employees = employees
        .iter()
        .map(transform_employee)
        .collect::<DomainResult<Vec<_>>>()?;

    let mut out = Mapping::with_capacity(2);
    out.insert("name".to_string(), name.clone());
    out.insert("employees".to_string(), Node::Sequence(employees));
    Ok(Node::Mapping(out))
}

/// Single entry point: classify, then apply the matching record transform or
/// fall back to [`generic_transform`].
pub fn smart_transform(node: &Node) -> DomainResult<Node> {
    let shape = classify(node);
    trace!("smart_transform: {} node classified as {}", node.kind(), shape);
    match shape {
        Shape::Employee => transform_employee(node),
        Shape::Department => transform_department(node),
        Shape::Generic => Ok(generic_transform(node)),
    }
}

/// Smart-transform each element of every top-level group.
///
/// The root must be a mapping. Sequence values become sequences of
/// smart-transformed elements; other values are smart-transformed whole.
pub fn transform_groups(node: &Node) -> DomainResult<Node> {
    let groups = node.as_mapping().ok_or(DomainError::UnsupportedShape {
        operation: "grouped transform",
        found: node.kind(),
    })?;

    let mut out = Mapping::with_capacity(groups.len());
    for (key, value) in groups {
        let transformed = match value {
            Node::Sequence(items) => Node::Sequence(
                items
                    .iter()
                    .map(smart_transform)
                    .collect::<DomainResult<Vec<_>>>()?,
            ),
            other => smart_transform(other)?,
        };
        out.insert(key.clone(), transformed);
    }
    Ok(Node::Mapping(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Node::from(value)
    }

    #[test]
    fn given_scalar_when_generic_transform_then_identity() {
        let n = node(json!(30));
        assert_eq!(generic_transform(&n), n);
    }

    #[test]
    fn given_nested_tree_when_generic_transform_then_structurally_equal() {
        let n = node(json!({"a": [1, {"b": null}], "c": {"d": [[], {}]}}));
        let out = generic_transform(&n);
        assert_eq!(out, n);
        assert_eq!(out.keys(), vec!["a", "c"]);
    }

    #[test]
    fn given_employee_with_extra_keys_when_transforming_then_keeps_only_known_fields() {
        let n = node(json!({
            "badge": 9, "age": 23, "lastName": "Doe", "firstName": "John",
            "address": {"street": "123 Main St", "geo": {"lat": 1.5}}
        }));

        let out = transform_employee(&n).unwrap();

        assert_eq!(out.keys(), vec!["firstName", "lastName", "age", "address"]);
        assert_eq!(
            out,
            node(json!({
                "firstName": "John", "lastName": "Doe", "age": 23,
                "address": {"street": "123 Main St", "geo": {"lat": 1.5}}
            }))
        );
    }

    #[test]
    fn given_employee_missing_age_when_transforming_then_missing_field() {
        let n = node(json!({"firstName": "A", "lastName": "B", "address": {}}));
        assert_eq!(
            transform_employee(&n),
            Err(DomainError::MissingField {
                record: "Employee",
                field: "age"
            })
        );
    }

    #[test]
    fn given_department_when_transforming_then_transforms_each_employee() {
        let n = node(json!({
            "budget": 10,
            "employees": [{"firstName": "A", "lastName": "B", "age": 1, "address": {}, "x": 0}],
            "name": "Eng"
        }));

        let out = transform_department(&n).unwrap();

        assert_eq!(out.keys(), vec!["name", "employees"]);
        assert_eq!(
            out,
            node(json!({
                "name": "Eng",
                "employees": [{"firstName": "A", "lastName": "B", "age": 1, "address": {}}]
            }))
        );
    }

    #[test]
    fn given_department_with_non_employee_element_when_transforming_then_fails() {
        let n = node(json!({"name": "Eng", "employees": ["not a person"]}));
        assert_eq!(
            transform_department(&n),
            Err(DomainError::MissingField {
                record: "Employee",
                field: "firstName"
            })
        );
    }

    #[test]
    fn given_department_without_name_when_smart_transform_then_missing_field() {
        let n = node(json!({"employees": []}));
        assert_eq!(
            smart_transform(&n),
            Err(DomainError::MissingField {
                record: "Department",
                field: "name"
            })
        );
    }

    #[test]
    fn given_generic_root_when_smart_transform_then_nested_records_left_untouched() {
        let n = node(json!({"team": [{"firstName": "A", "lastName": "B", "age": 1, "address": {}, "x": 0}]}));
        assert_eq!(smart_transform(&n).unwrap(), n);
    }

    #[test]
    fn given_groups_when_transform_groups_then_records_inside_sequences_transformed() {
        let n = node(json!({
            "accounting": [{"firstName": "A", "lastName": "B", "age": 1, "address": {}, "x": 0}],
            "meta": {"v": 1}
        }));

        let out = transform_groups(&n).unwrap();

        assert_eq!(
            out,
            node(json!({
                "accounting": [{"firstName": "A", "lastName": "B", "age": 1, "address": {}}],
                "meta": {"v": 1}
            }))
        );
    }

    #[test]
    fn given_sequence_root_when_transform_groups_then_unsupported_shape() {
        let n = node(json!([1, 2]));
        assert_eq!(
            transform_groups(&n),
            Err(DomainError::UnsupportedShape {
                operation: "grouped transform",
                found: "sequence"
            })
        );
    }
}
