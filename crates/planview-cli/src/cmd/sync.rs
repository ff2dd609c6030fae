use crate::context::GlobalArgs;
use crate::output::{print_json, print_table};
use crate::prompt::PromptSelector;
use planview_core::orchestrator::{Orchestrator, SyncOptions};

pub fn run(
    globals: &GlobalArgs,
    space: Option<String>,
    folder: Option<String>,
    customer: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let (config, client) = globals.connect()?;
    let options = SyncOptions {
        space,
        source_folder: folder,
        customer,
    };

    let report = Orchestrator::new(&client, &config).sync(&options, &PromptSelector)?;

    if json {
        return print_json(&report);
    }

    println!("Customer view for '{}' rebuilt in '{}'", report.customer, config.view_folder);
    if !report.lists.is_empty() {
        let rows = report
            .lists
            .iter()
            .map(|l| {
                vec![
                    l.source_list.clone(),
                    l.destination_list.clone(),
                    l.cleared.to_string(),
                    l.copied.to_string(),
                    l.placeholders.to_string(),
                ]
            })
            .collect();
        print_table(&["SOURCE", "VIEW", "CLEARED", "COPIED", "PLACEHOLDERS"], rows);
    }
    println!("{}", report.summary());
    Ok(())
}
