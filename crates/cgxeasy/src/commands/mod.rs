//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod dhcp;
pub mod elements;
pub mod interface;
pub mod prefix;
pub mod shell;
pub mod sites;
pub mod snmp;
pub mod tunnel;
pub mod util;

use cgxeasy_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Sites(args) => sites::handle(session, args, global).await,
        Command::Elements(args) => elements::handle(session, args, global).await,
        Command::Dhcp(args) => dhcp::handle(session, args, global).await,
        Command::Interface(args) => interface::handle(session, args, global).await,
        Command::Snmp(args) => snmp::handle(session, args, global).await,
        Command::Prefix(args) => prefix::handle(session, args, global).await,
        Command::Tunnel(args) => tunnel::handle(session, args, global).await,
        Command::Shell(args) => shell::handle(session, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a controller session".into(),
        )),
    }
}
