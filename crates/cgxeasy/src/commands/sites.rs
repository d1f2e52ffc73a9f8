//! Site command handlers.

use std::sync::Arc;

use tabled::Tabled;

use cgxeasy_core::{Session, Site};

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Admin State")]
    admin_state: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&Arc<Site>> for SiteRow {
    fn from(s: &Arc<Site>) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            admin_state: s.admin_state.clone().unwrap_or_default(),
            role: s.element_cluster_role.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: SitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List { matching } => {
            let filter = util::name_filter(matching.as_deref())?;
            let mut sites = session.sites().await?;
            if let Some(re) = filter {
                sites.retain(|s| re.is_match(&s.name));
            }
            sites.sort_by(|a, b| a.name.cmp(&b.name));

            let out = output::render_list(
                global.output,
                &sites,
                |s| SiteRow::from(s),
                |s| s.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
