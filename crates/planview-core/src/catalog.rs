use crate::api::TaskService;
use crate::config::CustomerField;
use crate::error::{PlanviewError, Result};
use crate::types::{Folder, Task};
use serde::Serialize;
use std::collections::HashSet;

/// The customer value of `task`, if it carries a non-empty one.
pub fn customer_of(task: &Task, field: &CustomerField) -> Option<String> {
    task.custom_fields
        .iter()
        .filter(|f| f.name == field.name)
        .filter(|f| match field.field_type.as_deref() {
            Some(ty) => f.field_type == ty,
            None => true,
        })
        .find_map(|f| f.text_value())
}

/// Distinct customer values in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomerCatalog {
    customers: Vec<String>,
}

impl CustomerCatalog {
    pub fn insert(&mut self, customer: String) -> bool {
        if self.customers.contains(&customer) {
            return false;
        }
        self.customers.push(customer);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn contains(&self, customer: &str) -> bool {
        self.customers.iter().any(|c| c == customer)
    }

    /// The customer at zero-based `index`.
    pub fn select(&self, index: usize) -> Result<&str> {
        if self.customers.is_empty() {
            return Err(PlanviewError::EmptyCatalog);
        }
        self.customers
            .get(index)
            .map(String::as_str)
            .ok_or(PlanviewError::InvalidSelection {
                index: index + 1,
                len: self.customers.len(),
            })
    }
}

impl FromIterator<String> for CustomerCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let customers = iter
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect();
        Self { customers }
    }
}

/// Scan every task of every list in `folder` for customer values.
pub fn collect_customers<S: TaskService + ?Sized>(
    service: &S,
    folder: &Folder,
    field: &CustomerField,
) -> Result<CustomerCatalog> {
    let mut catalog = CustomerCatalog::default();
    for list in &folder.lists {
        let tasks = service.tasks(&list.id)?;
        tracing::debug!(list = %list.name, tasks = tasks.len(), "scanning list for customers");
        for task in &tasks {
            if let Some(customer) = customer_of(task, field) {
                catalog.insert(customer);
            }
        }
    }
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
