//! SNMP agent command handlers.

use std::io::IsTerminal;

use cgxeasy_core::{Command as CoreCommand, Session, SnmpV3User};

use crate::cli::{GlobalOpts, SnmpArgs, SnmpCommand};
use crate::error::CliError;

use super::util;

/// Use the given passphrase, or prompt for one when the matching
/// algorithm is set and a terminal is attached.
fn passphrase(
    given: Option<String>,
    algorithm: Option<&str>,
    label: &str,
) -> Result<Option<String>, CliError> {
    if given.is_some() || algorithm.is_none() || !std::io::stdin().is_terminal() {
        return Ok(given);
    }
    let phrase = rpassword::prompt_password(format!("{label} passphrase: "))?;
    if phrase.is_empty() {
        return Err(CliError::Validation {
            field: label.to_ascii_lowercase(),
            reason: "passphrase cannot be empty".into(),
        });
    }
    Ok(Some(phrase))
}

pub async fn handle(
    session: &Session,
    args: SnmpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let command = match args.command {
        SnmpCommand::UserSet {
            target,
            user,
            security_level,
            auth_type,
            auth_phrase,
            enc_type,
            enc_phrase,
            engine_id,
        } => {
            let target = util::element_target(target)?;
            let auth_phrase = passphrase(auth_phrase, auth_type.as_deref(), "Auth")?;
            let enc_phrase = passphrase(enc_phrase, enc_type.as_deref(), "Privacy")?;
            CoreCommand::SnmpUserUpsert {
                target,
                user: SnmpV3User {
                    user_name: user,
                    engine_id,
                    security_level,
                    auth_type,
                    auth_phrase,
                    enc_type,
                    enc_phrase,
                    ..SnmpV3User::default()
                },
            }
        }

        SnmpCommand::UserRemove { target, user } => {
            let target = util::element_target(target)?;
            if !util::confirm(
                &format!("Remove SNMP user '{user}' from the selected elements?"),
                global.yes,
            )? {
                return Ok(());
            }
            CoreCommand::SnmpUserRemove {
                target,
                user_name: user,
            }
        }
    };

    util::execute(session, command, global).await
}
