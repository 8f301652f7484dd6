use log::error;

use super::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Ok,
    Save,
    Cancel,
}

impl ButtonStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            ButtonStyle::Ok => "ok_popup_btn",
            ButtonStyle::Save => "save_popup_btn",
            ButtonStyle::Cancel => "cancel_popup_btn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupButton {
    pub text: String,
    pub style: ButtonStyle,
}

/// A modal message with at least one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    message: String,
    buttons: Vec<PopupButton>,
}

impl Popup {
    pub fn new(message: &str, buttons: Vec<PopupButton>) -> Result<Popup, PlannerError> {
        if buttons.is_empty() {
            error!("No buttons provided for popup {:?}", message);
            return Err(PlannerError::NoPopupButtons);
        }
        Ok(Popup {
            message: message.to_owned(),
            buttons,
        })
    }

    pub fn acknowledge(message: &str) -> Result<Popup, PlannerError> {
        Popup::new(
            message,
            vec![PopupButton {
                text: "Ok".to_owned(),
                style: ButtonStyle::Ok,
            }],
        )
    }

    /// `Yes` is always the first button.
    pub fn confirm(message: &str) -> Result<Popup, PlannerError> {
        Popup::new(
            message,
            vec![
                PopupButton {
                    text: "Yes".to_owned(),
                    style: ButtonStyle::Save,
                },
                PopupButton {
                    text: "No".to_owned(),
                    style: ButtonStyle::Cancel,
                },
            ],
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn buttons(&self) -> &[PopupButton] {
        &self.buttons
    }
}

/// A trait, necessary for every entity that can put a popup in front of the user.
#[allow(async_fn_in_trait)]
pub trait Popups {
    /// Shows the popup and waits for a click, returning the index of the
    /// clicked button or `None` if the popup was dismissed otherwise. The popup
    /// must already be removed when this returns, so the caller may open the
    /// next one straight away.
    async fn show(&mut self, popup: Popup) -> Option<usize>;
}

/// Asks a Yes/No question; anything but `Yes` counts as a refusal.
pub async fn confirm<P: Popups>(popups: &mut P, message: &str) -> bool {
    match Popup::confirm(message) {
        Ok(popup) => popups.show(popup).await == Some(0),
        Err(_) => false,
    }
}

pub async fn acknowledge<P: Popups>(popups: &mut P, message: &str) {
    if let Ok(popup) = Popup::acknowledge(message) {
        popups.show(popup).await;
    }
}
