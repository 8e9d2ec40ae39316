//! Terminal rendering for markdown output.
//!
//! Uses termimad for styled output, or prints the markdown as-is when color
//! is disabled.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.code_block.set_bg(Color::AnsiValue(236));
        skin.inline_code.set_fg(Color::Green);
        skin.inline_code.set_bg(Color::AnsiValue(236));

        Self { rich_enabled, skin }
    }

    /// Render a markdown document.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Tables and quotes need whole-document layout.
            print!("{}", self.skin.term_text(markdown));
        } else {
            print!("{markdown}");
        }
        io::stdout().flush()?;
        Ok(())
    }

    /// Print a raw increment of streamed text, without a trailing newline.
    pub fn stream(&self, chunk: &str) -> Result<()> {
        print!("{chunk}");
        io::stdout().flush()?;
        Ok(())
    }

    /// Print the interactive prompt marker.
    pub fn prompt(&self) -> Result<()> {
        if self.rich_enabled {
            print!("\x1b[36m>\x1b[0m ");
        } else {
            print!("> ");
        }
        io::stdout().flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
