use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(flags, std::io::stderr().is_terminal()));
}

/// Spinners only on an interactive terminal, and never under `--quiet` or
/// when emitting JSON for another program.
const fn prefs_for(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    UiPrefs {
        progress: is_tty && !flags.quiet && !matches!(flags.format, OutputFormat::Json),
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs { progress: false })
}
