//! Final environment report.
//!
//! The tool never edits shell profile files; it tells the operator what to
//! add and leaves the editing to them.

use crate::config::Config;

/// Render the manual environment-variable adjustments for a provisioned
/// toolchain.
pub fn render(config: &Config) -> String {
    let mut lines = vec![
        "To use the provisioned toolchain, add to your shell profile:".to_string(),
        format!(
            "  export PATH=\"{}:$PATH\"",
            config.runtime_dir.join("bin").display()
        ),
        format!("  export PATH=\"{}:$PATH\"", config.toolset_dir.display()),
        format!(
            "  export LD_LIBRARY_PATH=\"{}:$LD_LIBRARY_PATH\"",
            config.prefix.join("lib").display()
        ),
    ];
    lines.push(String::new());
    lines.join("\n")
}
