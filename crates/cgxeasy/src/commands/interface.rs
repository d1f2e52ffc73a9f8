//! Interface command handlers: relays, tags, zones, sub-interfaces.

use cgxeasy_core::{Command as CoreCommand, Session};

use crate::cli::{GlobalOpts, InterfaceArgs, InterfaceCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    session: &Session,
    args: InterfaceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let command = match args.command {
        InterfaceCommand::RelayAdd {
            target,
            interface,
            server,
        } => CoreCommand::RelayAdd {
            target: util::element_target(target)?,
            interface,
            server_ip: server,
        },
        InterfaceCommand::RelayRemove {
            target,
            interface,
            server,
        } => CoreCommand::RelayRemove {
            target: util::element_target(target)?,
            interface,
            server_ip: server,
        },
        InterfaceCommand::TagAdd {
            target,
            interface,
            tag,
        } => CoreCommand::TagAdd {
            target: util::element_target(target)?,
            interface,
            tag,
        },
        InterfaceCommand::TagRemove {
            target,
            interface,
            tag,
        } => CoreCommand::TagRemove {
            target: util::element_target(target)?,
            interface,
            tag,
        },
        InterfaceCommand::ZoneSet {
            target,
            interface,
            zone,
        } => CoreCommand::ZoneSet {
            target: util::element_target(target)?,
            interface,
            zone,
        },
        InterfaceCommand::ZoneClear { target, interface } => CoreCommand::ZoneClear {
            target: util::element_target(target)?,
            interface,
        },
        InterfaceCommand::SubCreate {
            target,
            parent,
            vlan,
            used_for,
        } => CoreCommand::SubinterfaceCreate {
            target: util::element_target(target)?,
            parent,
            vlan,
            used_for,
        },
        InterfaceCommand::SubDelete { target, interface } => {
            let target = util::element_target(target)?;
            if !util::confirm(
                &format!("Delete sub-interface {interface} on the selected elements?"),
                global.yes,
            )? {
                return Ok(());
            }
            CoreCommand::SubinterfaceDelete {
                target,
                name: interface,
            }
        }
    };

    util::execute(session, command, global).await
}
