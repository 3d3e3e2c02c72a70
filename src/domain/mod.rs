//! Domain layer: tree model, shape classification and transforms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod classify;
pub mod error;
pub mod node;
pub mod transform;

pub use classify::{classify, classify_paths, is_department_shape, is_employee_shape, Shape};
pub use error::{DomainError, DomainResult};
pub use node::{Mapping, Node, Scalar};
pub use transform::{
    generic_transform, smart_transform, transform_department, transform_employee,
    transform_groups,
};
