//! Full-replace reconciliation of customer view lists.
//!
//! For every (source list → destination list) pair the destination is
//! emptied, the source re-read, and one fresh task created per source task:
//! a copy when the task belongs to the chosen customer, an anonymized
//! `Project <n>` placeholder otherwise. Nothing is updated in place, so a
//! run interrupted after the clear leaves an empty list that the next run
//! refills.

use crate::api::TaskService;
use crate::catalog::customer_of;
use crate::config::{CustomFieldPolicy, CustomerField};
use crate::error::Result;
use crate::resolver::{DestinationMapping, ListPair};
use crate::types::{CustomFieldValue, NewTask, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a source task turns into in the destination list.
#[derive(Debug, Clone, PartialEq)]
pub enum Planned {
    Copy(NewTask),
    Placeholder(NewTask),
}

impl Planned {
    pub fn task(&self) -> &NewTask {
        match self {
            Planned::Copy(t) | Planned::Placeholder(t) => t,
        }
    }
}

fn schedule_of(task: &Task, name: String) -> NewTask {
    NewTask {
        name,
        status: task.status.status.clone(),
        start_date: task.start_date.clone(),
        due_date: task.due_date.clone(),
        assignees: task.assignee_ids(),
        custom_fields: Vec::new(),
    }
}

/// Field types whose read value is accepted unchanged on create.
///
/// Dropdowns read back an orderindex but are written by option id, people
/// and relationship fields take `{add: [...]}`, and formula/rollup fields
/// are computed, so none of those are copied.
const PASS_THROUGH_TYPES: &[&str] = &[
    "text",
    "short_text",
    "number",
    "currency",
    "email",
    "phone",
    "url",
    "date",
    "checkbox",
    "emoji",
    "labels",
];

fn writes_as_read(field_type: &str) -> bool {
    PASS_THROUGH_TYPES.contains(&field_type)
}

/// Decide the destination task for each source task, in source order.
///
/// Placeholder numbers start at 1 and only advance on placeholders.
pub fn plan_tasks(
    tasks: &[Task],
    customer: &str,
    field: &CustomerField,
    policy: CustomFieldPolicy,
) -> Vec<Planned> {
    let mut placeholder = 0;
    tasks
        .iter()
        .map(|task| {
            if customer_of(task, field).as_deref() == Some(customer) {
                let mut copy = schedule_of(task, task.name.clone());
                if policy == CustomFieldPolicy::Copy {
                    copy.custom_fields = task
                        .custom_fields
                        .iter()
                        .filter(|f| writes_as_read(&f.field_type))
                        .filter_map(|f| {
                            f.value.clone().map(|value| CustomFieldValue {
                                id: f.id.clone(),
                                value,
                            })
                        })
                        .collect();
                }
                Planned::Copy(copy)
            } else {
                placeholder += 1;
                Planned::Placeholder(schedule_of(task, format!("Project {placeholder}")))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListReport {
    pub source_list: String,
    pub destination_list: String,
    pub destination_id: String,
    pub cleared: usize,
    pub copied: usize,
    pub placeholders: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub customer: String,
    pub lists: Vec<ListReport>,
    pub finished_at: DateTime<Utc>,
}

impl ReconcileReport {
    /// "2 lists, 3 copied, 5 placeholders"
    pub fn summary(&self) -> String {
        let copied: usize = self.lists.iter().map(|l| l.copied).sum();
        let placeholders: usize = self.lists.iter().map(|l| l.placeholders).sum();
        format!(
            "{} lists, {copied} copied, {placeholders} placeholders",
            self.lists.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

pub struct Reconciler<'a, S: TaskService + ?Sized> {
    service: &'a S,
    field: &'a CustomerField,
    policy: CustomFieldPolicy,
}

impl<'a, S: TaskService + ?Sized> Reconciler<'a, S> {
    pub fn new(service: &'a S, field: &'a CustomerField, policy: CustomFieldPolicy) -> Self {
        Self {
            service,
            field,
            policy,
        }
    }

    /// Rebuild every destination list of `mapping` for `customer`.
    /// Stops at the first service error.
    pub fn reconcile(&self, mapping: &DestinationMapping, customer: &str) -> Result<ReconcileReport> {
        let mut lists = Vec::with_capacity(mapping.pairs.len());
        for pair in &mapping.pairs {
            lists.push(self.reconcile_list(pair, customer)?);
        }
        Ok(ReconcileReport {
            customer: customer.to_string(),
            lists,
            finished_at: Utc::now(),
        })
    }

    /// Clear, then fetch, then create. The order is load-bearing: creates
    /// must never interleave with the deletes of the same list.
    pub fn reconcile_list(&self, pair: &ListPair, customer: &str) -> Result<ListReport> {
        let destination = &pair.destination;
        let cleared = self.clear(&destination.id)?;

        let tasks = self.service.tasks(&pair.source.id)?;
        let plan = plan_tasks(&tasks, customer, self.field, self.policy);

        let mut copied = 0;
        let mut placeholders = 0;
        for planned in &plan {
            self.service.create_task(&destination.id, planned.task())?;
            match planned {
                Planned::Copy(_) => copied += 1,
                Planned::Placeholder(_) => placeholders += 1,
            }
        }

        tracing::info!(
            source = %pair.source.name,
            destination = %destination.name,
            cleared,
            copied,
            placeholders,
            "reconciled list"
        );

        Ok(ListReport {
            source_list: pair.source.name.clone(),
            destination_list: destination.name.clone(),
            destination_id: destination.id.clone(),
            cleared,
            copied,
            placeholders,
        })
    }

    fn clear(&self, list_id: &str) -> Result<usize> {
        let existing = self.service.tasks(list_id)?;
        for task in &existing {
            self.service.delete_task(&task.id)?;
        }
        Ok(existing.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
