//! Console presentation adapters for corral applications.
//!
//! The matching engine never depends on this crate; applications use it to
//! present [`corral_match`] outcomes — errors, help text, result tables.
//! Writes go through an async sink and may suspend on the underlying I/O;
//! none of them return a value the matcher or help renderer need.
//!
//! Color support is an explicit configuration value resolved at
//! construction (see [`ColorMode`]), not process-wide state.
//!
//! [`corral_match`]: https://docs.rs/corral-match

pub mod style;
pub mod table;

pub use style::{ColorMode, Styler};

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};

/// Behaviour switches for an [`Output`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub color: ColorMode,
    /// Suppress all output.
    pub quiet: bool,
    /// Emit `info` messages.
    pub verbose: bool,
    /// Emit `debug` messages.
    pub debug: bool,
}

/// Leveled console writer over any async sink.
pub struct Output<W> {
    writer: W,
    styler: Styler,
    config: OutputConfig,
}

impl Output<Stdout> {
    /// An output writing to stdout.
    pub fn stdout(config: OutputConfig) -> Self {
        Self::new(tokio::io::stdout(), config)
    }
}

impl<W: AsyncWrite + Unpin> Output<W> {
    pub fn new(writer: W, config: OutputConfig) -> Self {
        Self {
            writer,
            styler: Styler::new(config.color),
            config,
        }
    }

    pub fn styler(&self) -> &Styler {
        &self.styler
    }

    pub async fn write(&mut self, message: &str) -> io::Result<()> {
        if self.config.quiet {
            return Ok(());
        }
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn writeln(&mut self, message: &str) -> io::Result<()> {
        if self.config.quiet {
            return Ok(());
        }
        let mut line = String::with_capacity(message.len() + 1);
        line.push_str(message);
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn error(&mut self, message: &str) -> io::Result<()> {
        let prefix = self.styler.error("error: ");
        self.writeln(&format!("{prefix}{message}")).await
    }

    pub async fn success(&mut self, message: &str) -> io::Result<()> {
        let prefix = self.styler.success("✓ ");
        self.writeln(&format!("{prefix}{message}")).await
    }

    pub async fn warning(&mut self, message: &str) -> io::Result<()> {
        let prefix = self.styler.warning("warning: ");
        self.writeln(&format!("{prefix}{message}")).await
    }

    /// Emitted only when the output is configured verbose.
    pub async fn info(&mut self, message: &str) -> io::Result<()> {
        if !self.config.verbose {
            return Ok(());
        }
        let prefix = self.styler.info("info: ");
        self.writeln(&format!("{prefix}{message}")).await
    }

    /// Emitted only when the output is configured for debugging.
    pub async fn debug(&mut self, message: &str) -> io::Result<()> {
        if !self.config.debug {
            return Ok(());
        }
        let prefix = self.styler.apply("[DEBUG] ", &[style::MAGENTA]);
        self.writeln(&format!("{prefix}{message}")).await
    }

    pub async fn section(&mut self, title: &str) -> io::Result<()> {
        let styled = self.styler.apply(title, &[style::BOLD, style::CYAN]);
        self.writeln(&styled).await
    }

    /// Write a box-drawn table, header row emphasized.
    pub async fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        for (i, line) in table::render(headers, rows).into_iter().enumerate() {
            let line = if i == 1 { self.styler.bold(&line) } else { line };
            self.writeln(&line).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputConfig {
        OutputConfig {
            color: ColorMode::Never,
            ..Default::default()
        }
    }

    fn rendered(buffer: &[u8]) -> &str {
        std::str::from_utf8(buffer).unwrap()
    }

    #[tokio::test]
    async fn writeln_appends_newline() {
        let mut buffer = Vec::new();
        let mut out = Output::new(&mut buffer, plain());

        out.write("a").await.unwrap();
        out.writeln("b").await.unwrap();

        assert_eq!(rendered(&buffer), "ab\n");
    }

    #[tokio::test]
    async fn leveled_helpers_prefix_messages() {
        let mut buffer = Vec::new();
        let mut out = Output::new(&mut buffer, plain());

        out.error("boom").await.unwrap();
        out.success("done").await.unwrap();
        out.warning("careful").await.unwrap();

        assert_eq!(
            rendered(&buffer),
            "error: boom\n\u{2713} done\nwarning: careful\n"
        );
    }

    #[tokio::test]
    async fn info_and_debug_are_gated() {
        let mut buffer = Vec::new();
        let mut out = Output::new(&mut buffer, plain());

        out.info("hidden").await.unwrap();
        out.debug("hidden").await.unwrap();

        assert!(buffer.is_empty());

        let mut buffer = Vec::new();
        let config = OutputConfig {
            color: ColorMode::Never,
            verbose: true,
            debug: true,
            ..Default::default()
        };
        let mut out = Output::new(&mut buffer, config);

        out.info("shown").await.unwrap();
        out.debug("shown").await.unwrap();

        assert_eq!(rendered(&buffer), "info: shown\n[DEBUG] shown\n");
    }

    #[tokio::test]
    async fn quiet_suppresses_everything() {
        let mut buffer = Vec::new();
        let config = OutputConfig {
            color: ColorMode::Never,
            quiet: true,
            verbose: true,
            debug: true,
        };
        let mut out = Output::new(&mut buffer, config);

        out.write("a").await.unwrap();
        out.error("b").await.unwrap();
        out.table(&["h"], &[]).await.unwrap();

        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn styled_error_wraps_prefix_only() {
        let mut buffer = Vec::new();
        let config = OutputConfig {
            color: ColorMode::Always,
            ..Default::default()
        };
        let mut out = Output::new(&mut buffer, config);

        out.error("boom").await.unwrap();

        assert_eq!(
            rendered(&buffer),
            "\x1b[91m\x1b[1merror: \x1b[0mboom\n"
        );
    }

    #[tokio::test]
    async fn table_writes_every_line() {
        let mut buffer = Vec::new();
        let mut out = Output::new(&mut buffer, plain());

        out.table(&["k", "v"], &[vec!["a".to_string(), "b".to_string()]])
            .await
            .unwrap();

        let text = rendered(&buffer);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("│ a │ b │"));
    }
}
