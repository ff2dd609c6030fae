//! In-memory `TaskService` used by unit tests.

use crate::api::TaskService;
use crate::error::{PlanviewError, Result};
use crate::types::{
    Assignee, CustomField, Folder, NewTask, Space, Task, TaskList, TaskStatus, Team,
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
struct State {
    teams: Vec<Team>,
    spaces: HashMap<String, Vec<Space>>,
    folders: HashMap<String, Vec<Folder>>,
    tasks: HashMap<String, Vec<Task>>,
    next_id: u32,
    calls: Vec<String>,
    fail_on: Option<String>,
}

#[derive(Default)]
pub struct FakeService {
    state: RefCell<State>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_team(&self, id: &str, name: &str) {
        self.state.borrow_mut().teams.push(Team {
            id: id.into(),
            name: name.into(),
        });
    }

    pub fn add_space(&self, team_id: &str, id: &str, name: &str) {
        self.state
            .borrow_mut()
            .spaces
            .entry(team_id.into())
            .or_default()
            .push(Space {
                id: id.into(),
                name: name.into(),
            });
    }

    pub fn add_folder(&self, space_id: &str, id: &str, name: &str) {
        self.state
            .borrow_mut()
            .folders
            .entry(space_id.into())
            .or_default()
            .push(Folder {
                id: id.into(),
                name: name.into(),
                lists: Vec::new(),
            });
    }

    pub fn add_list(&self, folder_id: &str, id: &str, name: &str) {
        let mut state = self.state.borrow_mut();
        for folder in state.folders.values_mut().flatten() {
            if folder.id == folder_id {
                folder.lists.push(TaskList {
                    id: id.into(),
                    name: name.into(),
                });
            }
        }
        state.tasks.entry(id.into()).or_default();
    }

    pub fn add_task(&self, list_id: &str, task: Task) {
        self.state
            .borrow_mut()
            .tasks
            .entry(list_id.into())
            .or_default()
            .push(task);
    }

    /// Make every call whose log entry starts with `prefix` fail.
    pub fn fail_on(&self, prefix: &str) {
        self.state.borrow_mut().fail_on = Some(prefix.into());
    }

    pub fn tasks_in(&self, list_id: &str) -> Vec<Task> {
        self.state
            .borrow()
            .tasks
            .get(list_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn folder(&self, space_id: &str, name: &str) -> Option<Folder> {
        self.state
            .borrow()
            .folders
            .get(space_id)?
            .iter()
            .find(|f| f.name == name)
            .cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let failing = state
            .fail_on
            .as_deref()
            .is_some_and(|prefix| call.starts_with(prefix));
        state.calls.push(call.clone());
        if failing {
            return Err(PlanviewError::Service {
                method: "FAKE".into(),
                path: call,
                status: 500,
                body: "injected failure".into(),
            });
        }
        Ok(())
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        format!("{prefix}{}", state.next_id)
    }
}

impl TaskService for FakeService {
    fn teams(&self) -> Result<Vec<Team>> {
        self.record("teams".into())?;
        Ok(self.state.borrow().teams.clone())
    }

    fn spaces(&self, team_id: &str) -> Result<Vec<Space>> {
        self.record(format!("spaces {team_id}"))?;
        Ok(self
            .state
            .borrow()
            .spaces
            .get(team_id)
            .cloned()
            .unwrap_or_default())
    }

    fn folders(&self, space_id: &str) -> Result<Vec<Folder>> {
        self.record(format!("folders {space_id}"))?;
        Ok(self
            .state
            .borrow()
            .folders
            .get(space_id)
            .cloned()
            .unwrap_or_default())
    }

    fn create_folder(&self, space_id: &str, name: &str) -> Result<Folder> {
        self.record(format!("create_folder {space_id} {name}"))?;
        let id = self.fresh_id("F");
        self.add_folder(space_id, &id, name);
        Ok(Folder {
            id,
            name: name.into(),
            lists: Vec::new(),
        })
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>> {
        self.record(format!("lists {folder_id}"))?;
        Ok(self
            .state
            .borrow()
            .folders
            .values()
            .flatten()
            .find(|f| f.id == folder_id)
            .map(|f| f.lists.clone())
            .unwrap_or_default())
    }

    fn create_list(&self, folder_id: &str, name: &str) -> Result<TaskList> {
        self.record(format!("create_list {folder_id} {name}"))?;
        let id = self.fresh_id("L");
        self.add_list(folder_id, &id, name);
        Ok(TaskList {
            id,
            name: name.into(),
        })
    }

    fn tasks(&self, list_id: &str) -> Result<Vec<Task>> {
        self.record(format!("tasks {list_id}"))?;
        Ok(self.tasks_in(list_id))
    }

    fn create_task(&self, list_id: &str, task: &NewTask) -> Result<String> {
        self.record(format!("create_task {list_id} {}", task.name))?;
        let id = self.fresh_id("T");
        let custom_fields = task
            .custom_fields
            .iter()
            .map(|f| CustomField {
                id: f.id.clone(),
                name: f.id.clone(),
                field_type: String::new(),
                value: Some(f.value.clone()),
            })
            .collect();
        self.add_task(
            list_id,
            Task {
                id: id.clone(),
                name: task.name.clone(),
                status: TaskStatus {
                    status: task.status.clone(),
                },
                start_date: task.start_date.clone(),
                due_date: task.due_date.clone(),
                assignees: task
                    .assignees
                    .iter()
                    .map(|&id| Assignee { id, username: None })
                    .collect(),
                custom_fields,
            },
        );
        Ok(id)
    }

    fn delete_task(&self, task_id: &str) -> Result<()> {
        self.record(format!("delete_task {task_id}"))?;
        let mut state = self.state.borrow_mut();
        for tasks in state.tasks.values_mut() {
            tasks.retain(|t| t.id != task_id);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Task builders
// ---------------------------------------------------------------------------

pub fn task(id: &str, name: &str) -> Task {
    Task {
        id: id.into(),
        name: name.into(),
        status: TaskStatus {
            status: "open".into(),
        },
        start_date: Some("1700000000000".into()),
        due_date: Some("1700600000000".into()),
        assignees: vec![Assignee {
            id: 42,
            username: Some("pat".into()),
        }],
        custom_fields: Vec::new(),
    }
}

pub fn with_field(mut task: Task, name: &str, field_type: &str, value: Option<Value>) -> Task {
    task.custom_fields.push(CustomField {
        id: format!("cf-{}", name.to_lowercase()),
        name: name.into(),
        field_type: field_type.into(),
        value,
    });
    task
}

pub fn customer_task(id: &str, name: &str, customer: Option<&str>) -> Task {
    with_field(
        task(id, name),
        "Customer",
        "short_text",
        customer.map(|c| Value::String(c.into())),
    )
}
