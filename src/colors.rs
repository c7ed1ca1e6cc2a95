use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI escape prefixes for the message kinds envmerge prints.
#[derive(Clone, Copy)]
pub struct Colors {
    pub error: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
    pub info: &'static str,
    pub added: &'static str,
    pub removed: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                error: "",
                warning: "",
                success: "",
                info: "",
                added: "",
                removed: "",
                enabled: false,
            };
        }

        Self {
            error: "\x1b[31m",   // Red
            warning: "\x1b[33m", // Yellow
            success: "\x1b[32m", // Green
            info: "\x1b[36m",    // Cyan
            added: "\x1b[32m",
            removed: "\x1b[31m",
            enabled: true,
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }
}

/// `--no-color` > `NO_COLOR` env > TTY detection
pub fn should_use_colors(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}
