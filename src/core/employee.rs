use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Registry view of an employee: identity, latest known name and owned award ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    pub awards: BTreeSet<String>,
}

impl EmployeeRecord {
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            awards: BTreeSet::new(),
        }
    }
}
