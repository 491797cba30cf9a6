use std::io;

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::credential::Prompter;

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

pub fn ask_text(prompt: &str, default: Option<&str>) -> io::Result<String> {
    let theme = theme();
    let mut input = Input::<String>::with_theme(&theme);
    input.with_prompt(prompt);
    if let Some(default) = default {
        input.default(default.to_owned());
    }
    input.interact_text()
}

pub fn ask_password(prompt: &str) -> io::Result<String> {
    Password::with_theme(&theme())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
}

pub fn ask_select(prompt: &str, default: &str, choices: &[&str]) -> io::Result<String> {
    let default = choices.iter().position(|&c| c == default).unwrap_or(0);
    let i = Select::with_theme(&theme())
        .with_prompt(prompt)
        .items(choices)
        .default(default)
        .interact()?;
    Ok(choices[i].to_owned())
}

/// Prompts on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn ask_with(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        ask_text(question, default)
    }

    fn ask_secretly(&mut self, question: &str) -> io::Result<String> {
        ask_password(question)
    }

    fn ask_choice(
        &mut self,
        question: &str,
        default: &str,
        choices: &[&str],
    ) -> io::Result<String> {
        ask_select(question, default, choices)
    }
}
