//! Bundled sample documents shown by `treeshape demo`

use crate::config::TransformMode;

/// Employees grouped by department name.
pub const EMPLOYEE_SAMPLE: &str = r#"
{
  "accounting": [{
    "firstName": "John",
    "lastName": "Doe",
    "age": 23,
    "address": {
      "street": "123 Main St",
      "zip": "12345"
    }
  }],
  "sales": [{
    "firstName": "Sally",
    "lastName": "Green",
    "age": 27,
    "address": {
      "street": "456 Main St",
      "zip": "23456"
    }
  }]
}
"#;

/// Document with no record shapes anywhere.
pub const GENERIC_SAMPLE: &str = r#"
{
  "system": {
    "components": ["CPU", "Memory"],
    "config": {
      "timeout": 30,
      "retries": 3
    }
  }
}
"#;

#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub title: &'static str,
    pub document: &'static str,
    pub mode: TransformMode,
}

pub fn builtin() -> [Sample; 2] {
    [
        Sample {
            title: "Employee Structure",
            document: EMPLOYEE_SAMPLE,
            mode: TransformMode::Grouped,
        },
        Sample {
            title: "Generic Structure",
            document: GENERIC_SAMPLE,
            mode: TransformMode::Whole,
        },
    ]
}
