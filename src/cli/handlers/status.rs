use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::AppState;
use crate::cli::ui::{print_info, print_success, print_warning};
use crate::core::{LinkManager, LinkStatus};
use crate::error::{LinkError, Result};

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: LinkStatus,
}

/// Handle `modlink status`
pub fn handle_status(state: &AppState, path: &Path, json: bool) -> Result<StatusReport> {
    let path = state.resolve_path(path);
    let status = LinkManager::real().inspect(&path);
    let report = StatusReport { path, status };

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| LinkError::Generic {
            message: "serializing status".to_string(),
            source: Some(Box::new(e)),
        })?;
        println!("{}", out);
        return Ok(report);
    }

    let shown = report.path.display();
    match &report.status {
        LinkStatus::Missing => print_info(&format!("{} does not exist", shown)),
        LinkStatus::Directory => print_info(&format!("{} is a real directory (not linked)", shown)),
        LinkStatus::File => print_info(&format!("{} is a regular file", shown)),
        LinkStatus::Symlink { points_to, dangling: false } => {
            print_success(&format!("{} -> {}", shown, points_to.display()))
        }
        LinkStatus::Symlink { points_to, dangling: true } => {
            print_warning(&format!("{} -> {} (dangling)", shown, points_to.display()))
        }
    }
    Ok(report)
}
