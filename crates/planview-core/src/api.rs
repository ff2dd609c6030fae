//! Remote task tracker access.
//!
//! [`TaskService`] is the seam the resolver, catalog and reconciler are
//! written against. [`ClickUpClient`] implements it over the ClickUp v2 REST
//! API with a blocking `reqwest` client: one request at a time, no retries.

use crate::config::ClientConfig;
use crate::error::{PlanviewError, Result};
use crate::types::{Folder, NewContainer, NewTask, Space, Task, TaskList, Team};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub trait TaskService {
    fn teams(&self) -> Result<Vec<Team>>;
    fn spaces(&self, team_id: &str) -> Result<Vec<Space>>;
    fn folders(&self, space_id: &str) -> Result<Vec<Folder>>;
    fn create_folder(&self, space_id: &str, name: &str) -> Result<Folder>;
    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>>;
    fn create_list(&self, folder_id: &str, name: &str) -> Result<TaskList>;
    /// Every non-archived task in the list, closed tasks and subtasks
    /// included, across all pages.
    fn tasks(&self, list_id: &str) -> Result<Vec<Task>>;
    /// Create a task and return its new id.
    fn create_task(&self, list_id: &str, task: &NewTask) -> Result<String>;
    fn delete_task(&self, task_id: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TeamsResponse {
    teams: Vec<Team>,
}

#[derive(Deserialize)]
struct SpacesResponse {
    spaces: Vec<Space>,
}

#[derive(Deserialize)]
struct FoldersResponse {
    folders: Vec<Folder>,
}

#[derive(Deserialize)]
struct ListsResponse {
    lists: Vec<TaskList>,
}

#[derive(Deserialize)]
struct TasksPage {
    tasks: Vec<Task>,
    #[serde(default)]
    last_page: Option<bool>,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

// ---------------------------------------------------------------------------
// ClickUpClient
// ---------------------------------------------------------------------------

pub struct ClickUpClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ClickUpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("planview/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let req = self.http.get(self.url(path)).query(query);
        let body = self.send("GET", path, req)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, payload: &B) -> Result<T> {
        let req = self.http.post(self.url(path)).json(payload);
        let body = self.send("POST", path, req)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Attach credentials, execute, and turn any non-2xx into `Service`.
    fn send(&self, method: &str, path: &str, req: RequestBuilder) -> Result<String> {
        tracing::debug!(method, path, "clickup request");
        let resp = req.header(AUTHORIZATION, &self.token).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(PlanviewError::Service {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn not_archived() -> Vec<(&'static str, String)> {
    vec![("archived", "false".to_string())]
}

/// Task listings hide closed tasks and subtasks unless asked for them.
fn every_task(page: u32) -> Vec<(&'static str, String)> {
    let mut query = not_archived();
    query.push(("include_closed", "true".to_string()));
    query.push(("subtasks", "true".to_string()));
    query.push(("page", page.to_string()));
    query
}

impl TaskService for ClickUpClient {
    fn teams(&self) -> Result<Vec<Team>> {
        let resp: TeamsResponse = self.get("/team", &[])?;
        Ok(resp.teams)
    }

    fn spaces(&self, team_id: &str) -> Result<Vec<Space>> {
        let resp: SpacesResponse = self.get(&format!("/team/{team_id}/space"), &not_archived())?;
        Ok(resp.spaces)
    }

    fn folders(&self, space_id: &str) -> Result<Vec<Folder>> {
        let resp: FoldersResponse =
            self.get(&format!("/space/{space_id}/folder"), &not_archived())?;
        Ok(resp.folders)
    }

    fn create_folder(&self, space_id: &str, name: &str) -> Result<Folder> {
        self.post(
            &format!("/space/{space_id}/folder"),
            &NewContainer { name: name.to_string() },
        )
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<TaskList>> {
        let resp: ListsResponse = self.get(&format!("/folder/{folder_id}/list"), &not_archived())?;
        Ok(resp.lists)
    }

    fn create_list(&self, folder_id: &str, name: &str) -> Result<TaskList> {
        self.post(
            &format!("/folder/{folder_id}/list"),
            &NewContainer { name: name.to_string() },
        )
    }

    fn tasks(&self, list_id: &str) -> Result<Vec<Task>> {
        let path = format!("/list/{list_id}/task");
        let mut tasks = Vec::new();
        let mut page = 0u32;
        loop {
            let resp: TasksPage = self.get(&path, &every_task(page))?;
            // Responses without `last_page` are single-page.
            let done = resp.tasks.is_empty() || resp.last_page.unwrap_or(true);
            tasks.extend(resp.tasks);
            if done {
                break;
            }
            page += 1;
        }
        Ok(tasks)
    }

    fn create_task(&self, list_id: &str, task: &NewTask) -> Result<String> {
        let created: Created = self.post(&format!("/list/{list_id}/task"), task)?;
        Ok(created.id)
    }

    fn delete_task(&self, task_id: &str) -> Result<()> {
        let path = format!("/task/{task_id}");
        let req = self.http.delete(self.url(&path));
        self.send("DELETE", &path, req)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
