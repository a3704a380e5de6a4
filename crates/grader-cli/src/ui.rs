use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Terminal presentation preferences resolved once at startup.
#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    const PLAIN: Self = Self {
        table_color: false,
        progress: false,
        term_width: None,
    };

    fn resolve(flags: &GlobalFlags, is_tty: bool, no_color: bool, columns: Option<&str>) -> Self {
        let interactive = is_tty && !flags.quiet;
        Self {
            table_color: interactive && flags.format == OutputFormat::Table && !no_color,
            progress: interactive && flags.format != OutputFormat::Json,
            term_width: columns
                .and_then(|value| value.parse::<usize>().ok())
                .filter(|width| *width >= 40),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let prefs = UiPrefs::resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        columns.as_deref(),
    );
    let _ = UI_PREFS.set(prefs);
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs::PLAIN)
}
