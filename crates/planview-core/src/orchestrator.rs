use crate::api::TaskService;
use crate::catalog::{collect_customers, CustomerCatalog};
use crate::config::Config;
use crate::error::{PlanviewError, Result};
use crate::reconcile::{ReconcileReport, Reconciler};
use crate::resolver::Resolver;
use crate::select::{pick, Selector};
use crate::types::{Folder, Space};

/// Selections given up front; anything left `None` goes to the selector.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub space: Option<String>,
    pub source_folder: Option<String>,
    pub customer: Option<String>,
}

/// Wires resolver, catalog and reconciler together for one run.
pub struct Orchestrator<'a, S: TaskService + ?Sized> {
    service: &'a S,
    config: &'a Config,
}

impl<'a, S: TaskService + ?Sized> Orchestrator<'a, S> {
    pub fn new(service: &'a S, config: &'a Config) -> Self {
        Self { service, config }
    }

    fn resolver(&self) -> Resolver<'a, S> {
        Resolver::new(self.service)
    }

    /// The named space, or one chosen from every visible space.
    pub fn choose_space<Sel: Selector + ?Sized>(
        &self,
        name: Option<&str>,
        selector: &Sel,
    ) -> Result<Space> {
        let name = name.or(self.config.space.as_deref()).filter(|n| !n.trim().is_empty());
        if let Some(name) = name {
            return self.resolver().find_space(name);
        }
        let spaces = self.resolver().spaces()?;
        if spaces.is_empty() {
            return Err(PlanviewError::not_found("space", "<any>"));
        }
        let names: Vec<String> = spaces.iter().map(|s| s.name.clone()).collect();
        let chosen = pick(selector, "Space", &names)?;
        spaces
            .into_iter()
            .find(|s| s.name == chosen)
            .ok_or_else(|| PlanviewError::not_found("space", chosen))
    }

    pub fn source_folder(&self, space: &Space, name: Option<&str>) -> Result<Folder> {
        let name = name.unwrap_or(&self.config.source_folder);
        self.resolver().find_folder(&space.id, name)
    }

    pub fn customers(&self, folder: &Folder) -> Result<CustomerCatalog> {
        collect_customers(self.service, folder, &self.config.customer_field)
    }

    /// The requested customer if the catalog knows it, otherwise a selection.
    pub fn choose_customer<Sel: Selector + ?Sized>(
        &self,
        catalog: &CustomerCatalog,
        requested: Option<&str>,
        selector: &Sel,
    ) -> Result<String> {
        if catalog.is_empty() {
            return Err(PlanviewError::EmptyCatalog);
        }
        match requested {
            Some(customer) if catalog.contains(customer) => Ok(customer.to_string()),
            Some(customer) => Err(PlanviewError::not_found("customer", customer)),
            None => pick(selector, "Customer", catalog.as_slice()).map(str::to_string),
        }
    }

    /// Resolve everything, pick a customer and rebuild its view lists.
    pub fn sync<Sel: Selector + ?Sized>(
        &self,
        options: &SyncOptions,
        selector: &Sel,
    ) -> Result<ReconcileReport> {
        let space = self.choose_space(options.space.as_deref(), selector)?;
        let source = self.source_folder(&space, options.source_folder.as_deref())?;
        let catalog = self.customers(&source)?;
        let customer = self.choose_customer(&catalog, options.customer.as_deref(), selector)?;

        tracing::info!(space = %space.name, folder = %source.name, %customer, "syncing customer view");

        let resolver = self.resolver();
        let views = resolver.resolve_or_create_folder(&space.id, &self.config.view_folder)?;
        if views.id == source.id {
            return Err(PlanviewError::ViewFolderIsSource(views.name));
        }
        let mapping = resolver.map_destinations(&source, &views, &customer)?;

        Reconciler::new(
            self.service,
            &self.config.customer_field,
            self.config.custom_fields,
        )
        .reconcile(&mapping, &customer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
