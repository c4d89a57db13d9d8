use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

/// Where the menu reads operator input and writes its output.
pub trait Console {
    /// Prompt for one line. `Ok(None)` means input has ended.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Sink for everything the menu prints.
    fn out(&mut self) -> &mut dyn Write;

    /// Whether a human is watching; spinners are only drawn when true.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Console bound to the process's stdin/stdout. Uses `dialoguer` prompts
/// on a terminal and plain line reads when input is piped in.
pub struct TerminalConsole {
    stdout: io::Stdout,
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole {
            stdout: io::stdout(),
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.stdout.flush()?;
        if self.interactive {
            // `Input::interact_text()` shows the prompt and returns the line.
            let line: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(Some(line));
        }

        write!(self.stdout, "{prompt}: ")?;
        self.stdout.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
