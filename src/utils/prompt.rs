//! User prompt utilities using dialoguer

use crate::utils::error::{InstallerError, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;
use std::path::Path;

/// Prompt for yes/no confirmation
pub fn prompt_confirm(prompt: &str, default: bool) -> Result<bool> {
    let theme = ColorfulTheme::default();
    Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact_opt()
        .map_err(|e| InstallerError::Io(std::io::Error::other(e.to_string())))?
        .ok_or(InstallerError::UserCancelled)
}

/// Whether to ask before starting: never with `--yes` or without a terminal on stdin
pub fn should_prompt(assume_yes: bool, stdin_is_terminal: bool) -> bool {
    !assume_yes && stdin_is_terminal
}

/// Ask before launching the installer script.
///
/// The prompt goes to stderr so stdout stays clean for JSON output.
pub fn confirm_start(script: &Path, assume_yes: bool) -> Result<bool> {
    if !should_prompt(assume_yes, std::io::stdin().is_terminal()) {
        return Ok(true);
    }
    eprintln!("\nThe installer script {} will be run.\n", script.display());
    prompt_confirm("Start installation?", true)
}

/// Display a success message
pub fn success(message: &str) {
    println!("✓ {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_only_on_an_interactive_stdin() {
        assert!(should_prompt(false, true));
        assert!(!should_prompt(false, false));
    }

    #[test]
    fn yes_skips_the_prompt() {
        assert!(!should_prompt(true, true));
        assert!(!should_prompt(true, false));
    }

    #[test]
    fn assume_yes_confirms_without_prompting() {
        assert!(confirm_start(Path::new("./usr/bin/install_truckersmp.sh"), true).unwrap());
    }
}
