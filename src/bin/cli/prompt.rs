//! Text and confirmation prompts.

use std::io;

use dialoguer::{Confirm, Input, theme::ColorfulTheme};

fn into_io(e: dialoguer::Error) -> io::Error {
    match e {
        dialoguer::Error::IO(e) => e,
    }
}

/// Asks for a line of text, repeating until it is not blank.
pub fn input_required(prompt: &str) -> io::Result<String> {
    loop {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(into_io)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        eprintln!("Name cannot be empty.");
    }
}

/// Asks for a line of text, offering `default` when left blank.
pub fn input_with_default(prompt: &str, default: &str) -> io::Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if !default.is_empty() {
        input = input.default(default.to_string());
    }
    let answer = input.interact_text().map_err(into_io)?;
    Ok(answer.trim().to_string())
}

/// Asks a yes/no question defaulting to "no".
pub fn confirm(prompt: &str) -> io::Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(into_io)
}
