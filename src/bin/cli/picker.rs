//! Terminal driver for the list picker.

use std::io;

use console::{Key, Term, style};
use leetbox::{PickerEvent, PickerState, Step};

/// Lets the user pick one of `items` with arrow keys, typing to filter,
/// digits to jump, Enter to accept and Escape or `q` to abort.
///
/// Blocks until a choice is made. Returns `Ok(None)` when the user aborts.
pub fn select_item<S: AsRef<str>>(items: &[S], title: &str) -> io::Result<Option<String>> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(io::Error::other(
            "interactive selection needs a terminal; pass the name as an argument",
        ));
    }

    let mut state = PickerState::new(items.iter().map(|s| s.as_ref()));
    term.hide_cursor()?;
    let result = drive(&term, &mut state, title);
    term.show_cursor()?;
    result
}

fn drive(term: &Term, state: &mut PickerState, title: &str) -> io::Result<Option<String>> {
    let mut drawn = render(term, state, title, 0)?;
    loop {
        let event = match term.read_key()? {
            Key::ArrowUp => PickerEvent::Up,
            Key::ArrowDown => PickerEvent::Down,
            Key::Enter => PickerEvent::Confirm,
            Key::Escape => PickerEvent::Cancel,
            Key::Backspace => PickerEvent::Backspace,
            Key::Char('\u{3}') => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            Key::Char(c) => PickerEvent::from_char(c),
            _ => continue,
        };

        match state.step(event) {
            Step::Continue => drawn = render(term, state, title, drawn)?,
            Step::Confirmed(item) => {
                term.clear_last_lines(drawn)?;
                return Ok(Some(item));
            }
            Step::Cancelled => {
                term.clear_last_lines(drawn)?;
                return Ok(None);
            }
        }
    }
}

/// Redraws the picker in place and returns the number of lines written.
fn render(term: &Term, state: &PickerState, title: &str, previous: usize) -> io::Result<usize> {
    if previous > 0 {
        term.clear_last_lines(previous)?;
    }

    let mut lines = vec![
        format!(
            "{} {}",
            style(title).bold(),
            style("(↑/↓, type to filter, Backspace, Enter, q)").dim()
        ),
        format!(
            "Filter: {}",
            if state.filter().is_empty() {
                style("<begin typing...>".to_string()).dim()
            } else {
                style(state.filter().to_string())
            }
        ),
    ];

    let visible = state.visible();
    if visible.is_empty() {
        lines.push("  No matches".to_string());
    }
    for (i, item) in visible.iter().enumerate() {
        if i == state.highlighted() {
            lines.push(style(format!("> {}", item)).cyan().to_string());
        } else {
            lines.push(format!("  {}", item));
        }
    }

    for line in &lines {
        term.write_line(line)?;
    }
    Ok(lines.len())
}
