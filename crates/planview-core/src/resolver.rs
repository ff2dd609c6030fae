use crate::api::TaskService;
use crate::error::{PlanviewError, Result};
use crate::types::{Folder, Space, TaskList};
use serde::Serialize;

/// Name of the destination list mirroring `source_list` for `customer`.
pub fn destination_list_name(source_list: &str, customer: &str) -> String {
    format!("{source_list} - {customer}")
}

/// One source list paired with the list that mirrors it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPair {
    pub source: TaskList,
    pub destination: TaskList,
}

/// Source → destination lists for one (customer, source folder), in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DestinationMapping {
    pub pairs: Vec<ListPair>,
}

/// Name-based lookups in the space → folder → list hierarchy.
///
/// Names match exactly (case-sensitive). The `resolve_or_create_*` calls
/// only create when the lookup comes back empty, so calling them again with
/// the same name returns the same id.
pub struct Resolver<'a, S: TaskService + ?Sized> {
    service: &'a S,
}

impl<'a, S: TaskService + ?Sized> Resolver<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Every space visible to the token, team by team.
    pub fn spaces(&self) -> Result<Vec<Space>> {
        let mut spaces = Vec::new();
        for team in self.service.teams()? {
            spaces.extend(self.service.spaces(&team.id)?);
        }
        Ok(spaces)
    }

    pub fn find_space(&self, name: &str) -> Result<Space> {
        for team in self.service.teams()? {
            if let Some(space) = self
                .service
                .spaces(&team.id)?
                .into_iter()
                .find(|s| s.name == name)
            {
                return Ok(space);
            }
        }
        Err(PlanviewError::not_found("space", name))
    }

    pub fn find_folder(&self, space_id: &str, name: &str) -> Result<Folder> {
        self.service
            .folders(space_id)?
            .into_iter()
            .find(|f| f.name == name)
            .ok_or_else(|| PlanviewError::not_found("folder", name))
    }

    pub fn resolve_or_create_folder(&self, space_id: &str, name: &str) -> Result<Folder> {
        if let Some(folder) = self
            .service
            .folders(space_id)?
            .into_iter()
            .find(|f| f.name == name)
        {
            return Ok(folder);
        }
        tracing::info!(space_id, folder = name, "creating folder");
        self.service.create_folder(space_id, name)
    }

    pub fn resolve_or_create_list(&self, folder_id: &str, name: &str) -> Result<TaskList> {
        if let Some(list) = self
            .service
            .lists(folder_id)?
            .into_iter()
            .find(|l| l.name == name)
        {
            return Ok(list);
        }
        tracing::info!(folder_id, list = name, "creating list");
        self.service.create_list(folder_id, name)
    }

    /// Resolve (creating as needed) the mirror list of every list in `source`.
    pub fn map_destinations(
        &self,
        source: &Folder,
        view_folder: &Folder,
        customer: &str,
    ) -> Result<DestinationMapping> {
        let mut pairs = Vec::with_capacity(source.lists.len());
        for list in &source.lists {
            let name = destination_list_name(&list.name, customer);
            let destination = self.resolve_or_create_list(&view_folder.id, &name)?;
            pairs.push(ListPair {
                source: list.clone(),
                destination,
            });
        }
        Ok(DestinationMapping { pairs })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
