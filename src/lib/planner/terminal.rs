//! Surface and popups for running the pages in a terminal.
use std::io::{self, BufRead, Write};

use log::{debug, warn};

use super::{
    popup::{Popup, Popups},
    surface::{Control, ListId, ListItem, MemorySurface, Picker, SelectOption, Surface},
    validation::DocumentField,
};

/// Keeps the page state in a [`MemorySurface`] and echoes messages to stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    inner: MemorySurface,
}

impl TerminalSurface {
    pub fn new() -> TerminalSurface {
        TerminalSurface::default()
    }

    pub fn state(&self) -> &MemorySurface {
        &self.inner
    }

    pub fn print_list(&self, list: ListId) {
        for text in self.inner.visible_texts(list) {
            println!("{}", text);
        }
    }

    pub fn print_fields(&self, fields: &[(&str, Control)]) {
        for (label, control) in fields {
            println!("{}: {}", label, self.inner.text(*control));
        }
    }
}

impl Surface for TerminalSurface {
    fn set_text(&mut self, control: Control, text: &str) {
        if control == Control::Message && !text.is_empty() {
            println!("{}", text);
        }
        self.inner.set_text(control, text);
    }

    fn set_visible(&mut self, control: Control, visible: bool) {
        self.inner.set_visible(control, visible);
    }

    fn reset_options(&mut self, picker: Picker, placeholder: Option<&str>) {
        self.inner.reset_options(picker, placeholder);
    }

    fn append_options(&mut self, picker: Picker, options: Vec<SelectOption>) {
        self.inner.append_options(picker, options);
    }

    fn select_value(&mut self, picker: Picker, value: Option<&str>) {
        self.inner.select_value(picker, value);
    }

    fn input_value(&self, field: DocumentField) -> String {
        self.inner.input_value(field)
    }

    fn set_input_value(&mut self, field: DocumentField, value: &str) {
        self.inner.set_input_value(field, value);
    }

    fn mark_invalid(&mut self, field: DocumentField, invalid: bool) {
        self.inner.mark_invalid(field, invalid);
    }

    fn render_list(&mut self, list: ListId, items: Vec<ListItem>) {
        self.inner.render_list(list, items);
    }
}

/// Prints popups and reads the chosen button number from stdin. With
/// `assume_yes` the first button is clicked without asking.
#[derive(Debug, Default)]
pub struct TerminalPopups {
    pub assume_yes: bool,
}

fn parse_choice(line: &str, buttons: usize) -> Option<usize> {
    let choice = line.trim().parse::<usize>().ok()?;
    (1..=buttons).contains(&choice).then(|| choice - 1)
}

impl Popups for TerminalPopups {
    async fn show(&mut self, popup: Popup) -> Option<usize> {
        println!("{}", popup.message());
        let buttons = popup.buttons().len();
        if buttons == 1 || self.assume_yes {
            debug!("Clicking {:?}", popup.buttons().first().map(|b| &b.text));
            return Some(0);
        }
        let prompt = popup
            .buttons()
            .iter()
            .enumerate()
            .map(|(index, button)| format!("[{}] {}", index + 1, button.text))
            .collect::<Vec<_>>()
            .join(" ");
        print!("{} ", prompt);
        if let Err(e) = io::stdout().flush() {
            warn!("Cannot flush stdout: {}", e);
        }
        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;
        match line {
            Ok(Ok(line)) => parse_choice(&line, buttons),
            Ok(Err(e)) => {
                warn!("Cannot read the answer: {}", e);
                None
            }
            Err(e) => {
                warn!("Answer reader stopped: {}", e);
                None
            }
        }
    }
}
