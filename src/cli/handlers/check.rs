use crate::core::{is_elevated, unprivileged_links_expected};
use crate::cli::ui::{print_info, print_success, print_warning};
use crate::error::Result;

/// Handle `modlink check`
pub fn handle_check() -> Result<()> {
    print_info(&format!("User: {}", whoami::username()));
    print_info(&format!("Platform: {} ({})", std::env::consts::OS, std::env::consts::ARCH));

    if is_elevated() {
        print_success("Running with elevated privileges");
    } else if unprivileged_links_expected() {
        print_success("Not elevated; this platform allows unprivileged symbolic links");
    } else {
        print_warning("Not running with elevated privileges; creating symbolic links may fail");
        print_warning("Run modlink from an administrator shell, or enable Developer Mode");
    }
    Ok(())
}
