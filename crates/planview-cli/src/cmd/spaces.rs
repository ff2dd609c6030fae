use crate::context::GlobalArgs;
use crate::output::{print_json, print_table};
use anyhow::Context;
use planview_core::resolver::Resolver;

pub fn run(globals: &GlobalArgs, json: bool) -> anyhow::Result<()> {
    let (_, client) = globals.connect()?;
    let spaces = Resolver::new(&client)
        .spaces()
        .context("failed to list spaces")?;

    if json {
        print_json(&spaces)?;
        return Ok(());
    }

    if spaces.is_empty() {
        println!("No spaces visible to this token.");
        return Ok(());
    }

    let rows = spaces
        .iter()
        .map(|s| vec![s.id.clone(), s.name.clone()])
        .collect();
    print_table(&["ID", "NAME"], rows);
    Ok(())
}
