//! ANSI styling with explicit color configuration.

use std::io::IsTerminal;

pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const GRAY: &str = "\x1b[90m";
pub const BRIGHT_RED: &str = "\x1b[91m";
pub const BRIGHT_GREEN: &str = "\x1b[92m";
pub const BRIGHT_YELLOW: &str = "\x1b[93m";
pub const BRIGHT_BLUE: &str = "\x1b[94m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const UNDERLINE: &str = "\x1b[4m";

/// How a [`Styler`] decides whether to emit ANSI escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Enable styling when stdout is a terminal and `TERM` is not `dumb`.
    #[default]
    Auto,
    Always,
    Never,
}

/// Applies ANSI styles when enabled, passes text through untouched
/// otherwise.
///
/// Color support is resolved once at construction from the requested
/// [`ColorMode`]; no process-wide state is consulted afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    pub fn new(mode: ColorMode) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::io::stdout().is_terminal()
                    && std::env::var("TERM").map(|term| term != "dumb").unwrap_or(true)
            }
        };
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn apply(&self, text: &str, styles: &[&str]) -> String {
        if !self.enabled || styles.is_empty() {
            return text.to_string();
        }
        format!("{}{text}{RESET}", styles.concat())
    }

    pub fn red(&self, text: &str) -> String {
        self.apply(text, &[RED])
    }

    pub fn green(&self, text: &str) -> String {
        self.apply(text, &[GREEN])
    }

    pub fn yellow(&self, text: &str) -> String {
        self.apply(text, &[YELLOW])
    }

    pub fn cyan(&self, text: &str) -> String {
        self.apply(text, &[CYAN])
    }

    pub fn bold(&self, text: &str) -> String {
        self.apply(text, &[BOLD])
    }

    pub fn dim(&self, text: &str) -> String {
        self.apply(text, &[DIM])
    }

    pub fn error(&self, text: &str) -> String {
        self.apply(text, &[BRIGHT_RED, BOLD])
    }

    pub fn success(&self, text: &str) -> String {
        self.apply(text, &[BRIGHT_GREEN, BOLD])
    }

    pub fn warning(&self, text: &str) -> String {
        self.apply(text, &[BRIGHT_YELLOW, BOLD])
    }

    pub fn info(&self, text: &str) -> String {
        self.apply(text, &[BRIGHT_BLUE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_mode_passes_text_through() {
        let styler = Styler::new(ColorMode::Never);

        assert!(!styler.enabled());
        assert_eq!(styler.red("plain"), "plain");
        assert_eq!(styler.apply("plain", &[BOLD, CYAN]), "plain");
    }

    #[test]
    fn always_mode_wraps_with_reset() {
        let styler = Styler::new(ColorMode::Always);

        assert_eq!(styler.green("ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(styler.error("boom"), "\x1b[91m\x1b[1mboom\x1b[0m");
    }

    #[test]
    fn empty_style_list_is_untouched() {
        let styler = Styler::new(ColorMode::Always);

        assert_eq!(styler.apply("text", &[]), "text");
    }
}
