//! Shared helpers for command handlers.

use std::io::IsTerminal;

use regex::Regex;

use cgxeasy_core::{BatchReport, Command as CoreCommand, ElementTarget, Session, SiteTarget};

use crate::cli::{ElementTargetArgs, GlobalOpts, SiteTargetArgs};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

fn compile(field: &str, pattern: &str) -> Result<Regex, CliError> {
    Regex::new(pattern).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: e.to_string(),
    })
}

/// Turn the mutually exclusive element flags into a core target.
pub fn element_target(args: ElementTargetArgs) -> Result<ElementTarget, CliError> {
    match (args.element, args.elements_file, args.element_match) {
        (Some(name), _, _) => Ok(ElementTarget::Name(name)),
        (None, Some(path), _) => Ok(ElementTarget::File(path)),
        (None, None, Some(pattern)) => {
            compile("element-match", &pattern).map(ElementTarget::Pattern)
        }
        (None, None, None) => Err(CliError::Validation {
            field: "element".into(),
            reason: "one of --element, --elements-file or --element-match is required".into(),
        }),
    }
}

pub fn site_target(args: SiteTargetArgs) -> Result<SiteTarget, CliError> {
    match (args.site, args.site_match) {
        (Some(name), _) => Ok(SiteTarget::Name(name)),
        (None, Some(pattern)) => compile("site-match", &pattern).map(SiteTarget::Pattern),
        (None, None) => Err(CliError::Validation {
            field: "site".into(),
            reason: "one of --site or --site-match is required".into(),
        }),
    }
}

/// Optional name filter for list commands.
pub fn name_filter(pattern: Option<&str>) -> Result<Option<Regex>, CliError> {
    pattern.map(|p| compile("matching", p)).transpose()
}

/// Run a core command, print its results and fail if any item failed.
pub async fn execute(
    session: &Session,
    command: CoreCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    tracing::debug!(operation = command.operation(), "executing");
    let report = session.execute(command).await?;
    print_report(&report, global)?;
    Ok(())
}

/// Render a batch and turn failures into a non-zero exit.
pub fn print_report(report: &BatchReport, global: &GlobalOpts) -> Result<(), CliError> {
    show_report(report, global);
    if report.all_succeeded() {
        Ok(())
    } else {
        Err(CliError::OperationsFailed {
            failed: report.failed(),
            total: report.len(),
        })
    }
}

/// Render a batch to stdout with a summary on stderr.
pub fn show_report(report: &BatchReport, global: &GlobalOpts) {
    let color = output::should_color(global.color);
    let out = output::render_report(global.output, report, color);
    output::print_output(&out, global.quiet);
    if !global.quiet {
        if report.is_empty() {
            eprintln!("No targets matched");
        } else if report.len() > 1 {
            eprintln!("{}", output::summary(report));
        }
    }
}
