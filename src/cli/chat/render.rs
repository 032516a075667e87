use std::io::Write;

use color_print::cformat;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use eyre::Result;

use super::conversation_state::Message;
use crate::config::Config;

pub const TITLE: &str = "DASH – Dynamic Analytics & Semantic Handling";

const CAPTION: &str = "Inventory & returns analytics chatbot (Bedrock Agent + Athena)";

const EXAMPLES: [&str; 3] = [
    "Return-to-vendor data for December 2024, grouped by country",
    "Break down Germany RTV COGS by macro_category for Dec 2024",
    "Top 5 reason_code by COGS for UK in Dec 2024",
];

const COMMANDS_TEXT: &str = "/help         Show this help
/quit         Quit DASH";

pub const BUSY_TEXT: &str = "Querying Bedrock Agent (via Athena)...";

const RULE: &str = "────────────────────────────────────────";

/// Draws the chat page onto a terminal (or any writer)
pub struct Renderer {
    output: Box<dyn Write>,
    clear_screen: bool,
}

impl Renderer {
    pub fn new(output: Box<dyn Write>, clear_screen: bool) -> Self {
        Self {
            output,
            clear_screen,
        }
    }

    /// Redraw the whole page: header, help, transcript and input hint.
    pub fn page(&mut self, config: &Config, messages: &[Message]) -> Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        writeln!(self.output, "{}", cformat!("<bold><cyan>{}</cyan></bold>", TITLE))?;
        writeln!(self.output, "{}", cformat!("<dim>{}</dim>", CAPTION))?;
        writeln!(self.output)?;

        self.help(config)?;
        writeln!(self.output)?;

        for message in messages {
            self.message(message)?;
        }

        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "{}", cformat!("<dim>e.g. {}</dim>", EXAMPLES[0]))?;
        self.output.flush()?;
        Ok(())
    }

    /// The sidebar block: example questions and the active agent identity.
    pub fn help(&mut self, config: &Config) -> Result<()> {
        writeln!(self.output, "{}", cformat!("<bold>How to use</bold>"))?;
        writeln!(self.output, "Examples you can ask:")?;
        for example in EXAMPLES {
            writeln!(self.output, "  • {}", example)?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "{}", COMMANDS_TEXT)?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "{}", cformat!("<bold>Region:</bold> {}", config.region))?;
        writeln!(self.output, "{}", cformat!("<bold>Agent ID:</bold> {}", config.agent_id))?;
        writeln!(
            self.output,
            "{}",
            cformat!("<bold>Alias ID:</bold> {}", config.agent_alias_id)
        )?;
        Ok(())
    }

    pub fn message(&mut self, message: &Message) -> Result<()> {
        writeln!(
            self.output,
            "{}",
            cformat!("<bold>{}:</bold> {}", message.role().label(), message.content())
        )?;
        Ok(())
    }

    /// Shown while the agent call is in flight; the next redraw replaces it.
    pub fn busy(&mut self) -> Result<()> {
        writeln!(self.output, "{}", cformat!("<yellow>{}</yellow>", BUSY_TEXT))?;
        self.output.flush()?;
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}
