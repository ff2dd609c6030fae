use crate::context::GlobalArgs;
use crate::output::print_json;
use crate::prompt::PromptSelector;
use anyhow::Context;
use planview_core::orchestrator::Orchestrator;

pub fn run(
    globals: &GlobalArgs,
    space: Option<String>,
    folder: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let (config, client) = globals.connect()?;
    let orchestrator = Orchestrator::new(&client, &config);

    let space = orchestrator.choose_space(space.as_deref(), &PromptSelector)?;
    let source = orchestrator.source_folder(&space, folder.as_deref())?;
    let catalog = orchestrator
        .customers(&source)
        .with_context(|| format!("failed to scan folder '{}'", source.name))?;

    if json {
        print_json(&serde_json::json!({
            "space": space.name,
            "folder": source.name,
            "customers": catalog,
        }))?;
    } else if catalog.is_empty() {
        println!(
            "No '{}' values found in {} / {}.",
            config.customer_field.name, space.name, source.name
        );
    } else {
        for (i, customer) in catalog.as_slice().iter().enumerate() {
            println!("{}. {}", i + 1, customer);
        }
    }
    Ok(())
}
