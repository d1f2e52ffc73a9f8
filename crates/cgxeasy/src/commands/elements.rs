//! Element command handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tabled::Tabled;

use cgxeasy_core::{Element, Session};

use crate::cli::{ElementsArgs, ElementsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ElementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
}

/// Unassigned elements carry no site id, or the placeholder `"1"`.
fn site_label(element: &Element, site_names: &HashMap<String, String>) -> String {
    match element.site_id.as_deref() {
        None | Some("" | "1") => "(unassigned)".into(),
        Some(id) => site_names.get(id).cloned().unwrap_or_else(|| id.to_owned()),
    }
}

pub async fn handle(
    session: &Session,
    args: ElementsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ElementsCommand::List { matching } => {
            let filter = util::name_filter(matching.as_deref())?;
            let mut elements = session.elements().await?;
            if let Some(re) = filter {
                elements.retain(|e| re.is_match(&e.name));
            }
            elements.sort_by(|a, b| a.name.cmp(&b.name));

            let site_names: HashMap<String, String> = session
                .sites()
                .await?
                .iter()
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect();

            let out = output::render_list(
                global.output,
                &elements,
                |e: &Arc<Element>| ElementRow {
                    id: e.id.clone(),
                    name: e.name.clone(),
                    site: site_label(e, &site_names),
                    model: e.model_name.clone().unwrap_or_default(),
                    serial: e.serial_number.clone().unwrap_or_default(),
                },
                |e| e.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
