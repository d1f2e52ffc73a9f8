//! Tunnel command handlers.

use cgxeasy_core::{Command as CoreCommand, Session};

use crate::cli::{GlobalOpts, TunnelArgs, TunnelCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    session: &Session,
    args: TunnelArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TunnelCommand::Create { site_a, site_b } => {
            util::execute(session, CoreCommand::TunnelCreate { site_a, site_b }, global).await
        }
    }
}
