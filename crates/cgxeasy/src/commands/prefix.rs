//! Prefix list command handlers.

use cgxeasy_core::{Command as CoreCommand, Session};

use crate::cli::{GlobalOpts, PrefixArgs, PrefixCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    session: &Session,
    args: PrefixArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let command = match args.command {
        PrefixCommand::GlobalSet { name, prefixes } => {
            CoreCommand::GlobalPrefixUpsert { name, prefixes }
        }
        PrefixCommand::LocalSet {
            sites,
            name,
            prefixes,
        } => CoreCommand::LocalPrefixUpsert {
            sites: util::site_target(sites)?,
            name,
            prefixes,
        },
    };

    util::execute(session, command, global).await
}
