//! `shell` handler: run line commands from a terminal or a script file.

use std::io::{IsTerminal, Write};
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};

use cgxeasy_core::Session;

use crate::cli::{GlobalOpts, ShellArgs};
use crate::error::CliError;
use crate::shell::{self, Line};

use super::util;

const PROMPT: &str = "cgx> ";

/// Running totals across all commands of one shell run.
#[derive(Debug, Default)]
struct Tally {
    total: usize,
    failed: usize,
}

impl Tally {
    fn into_result(self) -> Result<(), CliError> {
        if self.failed == 0 {
            Ok(())
        } else {
            Err(CliError::OperationsFailed {
                failed: self.failed,
                total: self.total,
            })
        }
    }
}

enum Flow {
    Continue,
    Stop,
}

pub async fn handle(
    session: &Session,
    args: ShellArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.script {
        Some(path) => run_script(session, &path, args.fail_fast, global).await,
        None => run_interactive(session, global).await,
    }
}

async fn run_script(
    session: &Session,
    path: &Path,
    fail_fast: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::Validation {
            field: "script".into(),
            reason: format!("{}: {e}", path.display()),
        })?;

    let mut tally = Tally::default();
    for (index, line) in text.lines().enumerate() {
        let before = tally.failed;
        let flow = run_line(session, line, index + 1, &mut tally, global).await;
        if matches!(flow, Flow::Stop) || (fail_fast && tally.failed > before) {
            break;
        }
    }
    tally.into_result()
}

async fn run_interactive(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let interactive = std::io::stdin().is_terminal();
    if interactive {
        eprintln!("Type 'help' for the command list, 'exit' to leave.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tally = Tally::default();
    let mut number = 0;
    loop {
        if interactive {
            show_prompt(&mut std::io::stderr())?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        number += 1;
        if matches!(
            run_line(session, &line, number, &mut tally, global).await,
            Flow::Stop
        ) {
            break;
        }
    }

    // a terminal session already showed every failure as it happened
    if interactive {
        Ok(())
    } else {
        tally.into_result()
    }
}

fn show_prompt(out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()
}

async fn run_line(
    session: &Session,
    line: &str,
    number: usize,
    tally: &mut Tally,
    global: &GlobalOpts,
) -> Flow {
    match shell::parse_line(line) {
        Ok(Line::Empty) => Flow::Continue,
        Ok(Line::Help) => {
            println!("{}", shell::HELP);
            Flow::Continue
        }
        Ok(Line::Exit) => Flow::Stop,
        Ok(Line::Run(command)) => {
            tracing::debug!(line = number, operation = command.operation(), "shell command");
            match session.execute(*command).await {
                Ok(report) => {
                    tally.total += report.len();
                    tally.failed += report.failed();
                    util::show_report(&report, global);
                }
                Err(err) => {
                    tally.total += 1;
                    tally.failed += 1;
                    eprintln!("line {number}: {err}");
                }
            }
            Flow::Continue
        }
        Err(err) => {
            tally.total += 1;
            tally.failed += 1;
            eprintln!("line {number}: {err}");
            Flow::Continue
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::*;

    struct ClosedStderr;

    impl Write for ClosedStderr {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn prompt_is_flushed() {
        let mut out = Vec::new();
        show_prompt(&mut out).unwrap();
        assert_eq!(out, PROMPT.as_bytes());
    }

    #[test]
    fn prompt_flush_failure_is_an_io_error() {
        let err = CliError::from(show_prompt(&mut ClosedStderr).unwrap_err());
        assert!(matches!(err, CliError::Io(_)), "got {err:?}");
    }

    #[test]
    fn tally_fails_only_with_failures() {
        assert!(Tally::default().into_result().is_ok());
        let tally = Tally { total: 3, failed: 1 };
        assert!(matches!(
            tally.into_result(),
            Err(CliError::OperationsFailed { failed: 1, total: 3 })
        ));
    }
}
