//! Filterable list picker as a finite-state machine.
//!
//! The machine is pure: it consumes [`PickerEvent`]s and reports a
//! [`Step`]. The terminal driver in the `leetbox` binary reads raw keys,
//! feeds them in, and renders [`PickerState::visible`] after every step.

/// An input to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Move the highlight up, wrapping to the last item.
    Up,
    /// Move the highlight down, wrapping to the first item.
    Down,
    /// Remove the last filter character.
    Backspace,
    /// Highlight item `n` (1-based) of the filtered list.
    ///
    /// Falls back to typing the digit when there is no such item.
    Jump(u8),
    /// A typed character.
    Char(char),
    /// Accept the highlighted item.
    Confirm,
    /// Abort without a selection.
    Cancel,
}

impl PickerEvent {
    /// Maps a typed character to an event. Digits 1-9 become jumps.
    pub fn from_char(c: char) -> Self {
        match c.to_digit(10) {
            Some(n @ 1..=9) => PickerEvent::Jump(n as u8),
            _ => PickerEvent::Char(c),
        }
    }
}

/// Result of feeding one event to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The picker is still open; re-render.
    Continue,
    /// The user accepted an item.
    Confirmed(String),
    /// The user aborted.
    Cancelled,
}

/// Filter text and highlight position over an immutable item list.
#[derive(Debug, Clone)]
pub struct PickerState {
    items: Vec<String>,
    filter: String,
    highlighted: usize,
}

impl PickerState {
    /// Creates a picker over `items` with an empty filter.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            filter: String::new(),
            highlighted: 0,
        }
    }

    /// Returns the current filter text.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Returns the index of the highlighted row in [`visible`](Self::visible).
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Returns the items matching the filter, case-insensitively, in their
    /// original order.
    pub fn visible(&self) -> Vec<&str> {
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Applies one event.
    pub fn step(&mut self, event: PickerEvent) -> Step {
        let count = self.visible().len();
        match event {
            PickerEvent::Up => {
                self.highlighted = if count == 0 {
                    0
                } else {
                    (self.highlighted + count - 1) % count
                };
            }
            PickerEvent::Down => {
                self.highlighted = if count == 0 {
                    0
                } else {
                    (self.highlighted + 1) % count
                };
            }
            PickerEvent::Backspace => {
                self.filter.pop();
                self.highlighted = 0;
            }
            PickerEvent::Jump(n) if (1..=count).contains(&usize::from(n)) => {
                self.highlighted = usize::from(n) - 1;
            }
            PickerEvent::Jump(n) => self.push_filter(char::from(b'0' + n.min(9))),
            PickerEvent::Char('q') if self.filter.is_empty() => return Step::Cancelled,
            PickerEvent::Char(c) => self.push_filter(c),
            PickerEvent::Confirm => {
                if let Some(item) = self.visible().get(self.highlighted) {
                    return Step::Confirmed((*item).to_string());
                }
            }
            PickerEvent::Cancel => return Step::Cancelled,
        }
        Step::Continue
    }

    fn push_filter(&mut self, c: char) {
        // Printable ASCII only; control characters are ignored.
        if (' '..='~').contains(&c) {
            self.filter.push(c);
            self.highlighted = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(items: &[&str], events: &[PickerEvent]) -> Step {
        let mut picker = PickerState::new(items.iter().copied());
        for &event in events {
            match picker.step(event) {
                Step::Continue => {}
                done => return done,
            }
        }
        Step::Continue
    }

    fn confirmed(item: &str) -> Step {
        Step::Confirmed(item.to_string())
    }

    const ITEMS: &[&str] = &["item1", "item2", "item3"];
    const FRUIT: &[&str] = &["apple", "banana", "cherry"];

    #[test]
    fn test_enter_selects_first() {
        assert_eq!(run(ITEMS, &[PickerEvent::Confirm]), confirmed("item1"));
    }

    #[test]
    fn test_escape_and_q_cancel() {
        assert_eq!(run(ITEMS, &[PickerEvent::Cancel]), Step::Cancelled);
        assert_eq!(run(ITEMS, &[PickerEvent::Char('q')]), Step::Cancelled);
    }

    #[test]
    fn test_q_types_when_filtering() {
        let items = &["quick", "square", "other"];
        let step = run(
            items,
            &[PickerEvent::Char('s'), PickerEvent::Char('q'), PickerEvent::Confirm],
        );
        assert_eq!(step, confirmed("square"));
    }

    #[test]
    fn test_navigation_wraps() {
        assert_eq!(
            run(ITEMS, &[PickerEvent::Down, PickerEvent::Confirm]),
            confirmed("item2")
        );
        assert_eq!(
            run(ITEMS, &[PickerEvent::Up, PickerEvent::Confirm]),
            confirmed("item3")
        );
        assert_eq!(
            run(
                ITEMS,
                &[PickerEvent::Down, PickerEvent::Down, PickerEvent::Down, PickerEvent::Confirm]
            ),
            confirmed("item1")
        );
    }

    #[test]
    fn test_typing_filters() {
        assert_eq!(
            run(FRUIT, &[PickerEvent::Char('b'), PickerEvent::Confirm]),
            confirmed("banana")
        );
        assert_eq!(
            run(FRUIT, &[PickerEvent::Char('E'), PickerEvent::Down, PickerEvent::Confirm]),
            confirmed("cherry")
        );
    }

    #[test]
    fn test_backspace_clears_filter() {
        assert_eq!(
            run(
                FRUIT,
                &[PickerEvent::Char('b'), PickerEvent::Backspace, PickerEvent::Confirm]
            ),
            confirmed("apple")
        );
    }

    #[test]
    fn test_numeric_jump() {
        assert_eq!(
            run(ITEMS, &[PickerEvent::from_char('3'), PickerEvent::Confirm]),
            confirmed("item3")
        );
    }

    #[test]
    fn test_numeric_jump_out_of_range_filters() {
        let mut picker = PickerState::new(ITEMS.iter().copied());
        assert_eq!(picker.step(PickerEvent::from_char('7')), Step::Continue);
        assert_eq!(picker.filter(), "7");
        assert!(picker.visible().is_empty());
    }

    #[test]
    fn test_confirm_ignored_without_matches() {
        let mut picker = PickerState::new(FRUIT.iter().copied());
        picker.step(PickerEvent::Char('z'));
        assert_eq!(picker.step(PickerEvent::Confirm), Step::Continue);
        assert_eq!(picker.step(PickerEvent::Up), Step::Continue);
        assert_eq!(picker.highlighted(), 0);
    }

    #[test]
    fn test_control_characters_ignored() {
        let mut picker = PickerState::new(FRUIT.iter().copied());
        picker.step(PickerEvent::Char('\u{7}'));
        picker.step(PickerEvent::Char('é'));
        assert_eq!(picker.filter(), "");
        assert_eq!(picker.visible().len(), 3);
    }

    #[test]
    fn test_empty_list() {
        let mut picker = PickerState::new(Vec::<String>::new());
        assert_eq!(picker.step(PickerEvent::Down), Step::Continue);
        assert_eq!(picker.step(PickerEvent::Confirm), Step::Continue);
        assert_eq!(picker.step(PickerEvent::Cancel), Step::Cancelled);
    }
}
