use std::path::Path;

use indicatif::ProgressBar;

use crate::app::AppState;
use crate::config::validate_subdir;
use crate::cli::ui::{confirm_destructive_operation, create_deletion_progress_bar};
use crate::core::{unprivileged_links_expected, Confirm, LinkManager, LinkOutcome, LinkRequest};
use crate::error::{LinkError, Result};

/// How an existing target is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Ask,
    Always,
    Never,
}

impl OverwritePolicy {
    /// `--yes` and `--no` are mutually exclusive on the command line; either
    /// one overrides `link.assume_yes`, which otherwise turns `Ask` into `Always`.
    pub fn from_flags(yes: bool, no: bool, assume_yes: bool) -> Self {
        if no {
            OverwritePolicy::Never
        } else if yes || assume_yes {
            OverwritePolicy::Always
        } else {
            OverwritePolicy::Ask
        }
    }
}

/// Terminal side of the overwrite decision, with a spinner while deleting.
struct TerminalConfirm {
    policy: OverwritePolicy,
    spinner: Option<ProgressBar>,
}

impl Confirm for TerminalConfirm {
    fn confirm_overwrite(&mut self, target: &Path) -> bool {
        match self.policy {
            OverwritePolicy::Always => true,
            OverwritePolicy::Never => false,
            OverwritePolicy::Ask => {
                let target = target.display().to_string();
                confirm_destructive_operation("Target exists. Delete it and recreate the link at", &target)
                    .unwrap_or_else(|e| {
                        tracing::warn!("could not read confirmation: {}", e);
                        false
                    })
            }
        }
    }

    fn removal_started(&mut self, target: &Path) {
        self.spinner = Some(create_deletion_progress_bar(&target.display().to_string()));
    }

    fn removal_finished(&mut self, _target: &Path) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

/// Handle `modlink link`
pub fn handle_link(
    state: &mut AppState,
    source: &Path,
    target: Option<&Path>,
    project: Option<&Path>,
    subdir: Option<&str>,
    yes: bool,
    no: bool,
) -> Result<LinkOutcome> {
    let mut manager = LinkManager::real();
    state.privilege_advisory(manager.fs(), unprivileged_links_expected());

    if let Some(subdir) = subdir {
        validate_subdir(subdir)?;
        state.config.link.subdir = subdir.to_string();
    }

    let source = state.resolve_path(source);
    let target = match (target, project) {
        (Some(target), _) => state.resolve_path(target),
        (None, Some(project)) => state.target_from_project(project)?,
        (None, None) => {
            return Err(LinkError::EmptyPath { field: "target".to_string() });
        }
    };

    let policy = OverwritePolicy::from_flags(yes, no, state.config.link.assume_yes);
    tracing::debug!(?policy, source = %source.display(), target = %target.display(), "linking");

    let mut confirm = TerminalConfirm { policy, spinner: None };
    let request = LinkRequest::new(source, target);
    manager.run(&request, &mut confirm, &mut state.log)
}
