// Employee registry: which awards each employee owns, and the name to report for them.
//
// Responsibilities
// - Upsert employees with last-write-wins on the name.
// - Attach awards to known employees only. Register the employee first.
// - Answer lookups without failing; unknown ids yield nothing.

use crate::core::employee::EmployeeRecord;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct EmployeeRegistry {
    employees: RwLock<HashMap<String, EmployeeRecord>>,
}

impl EmployeeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register_employee(&self, employee_id: &str, name: &str) {
        let mut guard = self.employees.write().await;
        match guard.get_mut(employee_id) {
            Some(record) => {
                if record.name != name {
                    tracing::debug!(
                        employee_id,
                        from = %record.name,
                        to = name,
                        "employee renamed"
                    );
                    record.name = name.to_string();
                }
            }
            None => {
                guard.insert(employee_id.to_string(), EmployeeRecord::new(employee_id, name));
            }
        }
    }

    pub async fn register_award(&self, employee_id: &str, award_id: &str) {
        let mut guard = self.employees.write().await;
        if let Some(record) = guard.get_mut(employee_id) {
            record.awards.insert(award_id.to_string());
        }
    }

    pub async fn get_employee(&self, employee_id: &str) -> Option<EmployeeRecord> {
        self.employees.read().await.get(employee_id).cloned()
    }

    pub async fn get_all_employee_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.employees.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn get_employee_awards(&self, employee_id: &str) -> BTreeSet<String> {
        self.employees
            .read()
            .await
            .get(employee_id)
            .map(|record| record.awards.clone())
            .unwrap_or_default()
    }
}
