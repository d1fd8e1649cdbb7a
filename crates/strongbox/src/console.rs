// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User interaction seam for commands.
//!
//! Commands talk to the user only through [`Console`], so the prompt/retry
//! flows can be driven by a script in tests.

use std::io::BufRead as _;

use secrecy::SecretString;
use strongbox_core::{Result, StrongboxError};

/// Input and output for one command invocation.
pub trait Console {
    /// Read one line of visible input, without the trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read a secret without echo.
    fn read_secret(&mut self, prompt: &str) -> Result<SecretString>;

    /// Obtain the master key; `confirm` asks twice for a new store.
    fn master_key(&mut self, confirm: bool) -> Result<SecretString>;

    /// Show one line to the user.
    fn println(&mut self, line: &str);
}

/// The process's terminal.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        eprint!("{prompt}");
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| StrongboxError::Prompt(format!("failed to read input: {e}")))?;
        if read == 0 {
            return Err(StrongboxError::Prompt("unexpected end of input".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<SecretString> {
        rpassword::prompt_password(prompt)
            .map(SecretString::from)
            .map_err(|e| StrongboxError::Prompt(format!("failed to read secret: {e}")))
    }

    fn master_key(&mut self, confirm: bool) -> Result<SecretString> {
        if confirm {
            strongbox_vault::get_master_key_with_confirm()
        } else {
            strongbox_vault::get_master_key()
        }
    }

    fn println(&mut self, line: &str) {
        println!("{line}");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays canned answers and records everything printed.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedConsole {
        pub lines: VecDeque<String>,
        pub secrets: VecDeque<String>,
        pub master: String,
        pub output: Vec<String>,
    }

    impl ScriptedConsole {
        pub(crate) fn new(master: &str) -> Self {
            Self {
                master: master.to_string(),
                ..Self::default()
            }
        }

        pub(crate) fn with_lines(mut self, lines: &[&str]) -> Self {
            self.lines.extend(lines.iter().map(|l| l.to_string()));
            self
        }

        pub(crate) fn with_secrets(mut self, secrets: &[&str]) -> Self {
            self.secrets.extend(secrets.iter().map(|s| s.to_string()));
            self
        }

        pub(crate) fn printed(&self) -> String {
            self.output.join("\n")
        }
    }

    impl Console for ScriptedConsole {
        fn read_line(&mut self, _prompt: &str) -> Result<String> {
            self.lines
                .pop_front()
                .ok_or_else(|| StrongboxError::Prompt("unexpected end of input".to_string()))
        }

        fn read_secret(&mut self, _prompt: &str) -> Result<SecretString> {
            self.secrets
                .pop_front()
                .map(SecretString::from)
                .ok_or_else(|| StrongboxError::Prompt("unexpected end of input".to_string()))
        }

        fn master_key(&mut self, _confirm: bool) -> Result<SecretString> {
            Ok(SecretString::from(self.master.clone()))
        }

        fn println(&mut self, line: &str) {
            self.output.push(line.to_string());
        }
    }
}
