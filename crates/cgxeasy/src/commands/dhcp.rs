//! DHCP pool command handlers.

use cgxeasy_core::{Command as CoreCommand, DhcpOptionSpec, Session};

use crate::cli::{DhcpArgs, DhcpCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    session: &Session,
    args: DhcpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let command = match args.command {
        DhcpCommand::Delete { site, subnet } => {
            if !util::confirm(
                &format!("Delete the DHCP pool for {subnet} at site '{site}'?"),
                global.yes,
            )? {
                return Ok(());
            }
            CoreCommand::DhcpPoolDelete { site, subnet }
        }

        DhcpCommand::OptionAdd {
            site,
            subnet,
            name,
            definition,
            value,
            vendor_class,
        } => CoreCommand::DhcpOptionAdd {
            site,
            subnet,
            option: DhcpOptionSpec {
                name,
                definition,
                value,
                vendor_class,
            },
        },

        DhcpCommand::OptionRemove {
            site,
            subnet,
            name,
            vendor_class,
        } => CoreCommand::DhcpOptionRemove {
            site,
            subnet,
            name,
            vendor_class,
        },
    };

    util::execute(session, command, global).await
}
