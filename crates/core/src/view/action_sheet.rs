use super::alert::{AlertButton, ButtonRole};
use super::style::Style;
use super::{RenderContext, Renderer};
use crate::binding::Binding;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionSheetError {
    #[error("an action sheet can only have one cancel button, found {0}")]
    MultipleCancelButtons(usize),
}

/// A set of choices presented over some content.
///
/// The cancel button, if any, always comes last.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSheet {
    pub title: String,
    pub message: Option<String>,
    pub buttons: Vec<AlertButton>,
}

impl ActionSheet {
    pub fn builder(title: impl Into<String>) -> ActionSheetBuilder {
        ActionSheetBuilder {
            title: title.into(),
            message: None,
            buttons: Vec::new(),
        }
    }

    pub fn cancel_button(&self) -> Option<&AlertButton> {
        self.buttons
            .last()
            .filter(|button| button.role == ButtonRole::Cancel)
    }
}

#[derive(Debug, Clone)]
pub struct ActionSheetBuilder {
    title: String,
    message: Option<String>,
    buttons: Vec<AlertButton>,
}

impl ActionSheetBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Buttons are listed in the order they are added.
    pub fn button(mut self, button: AlertButton) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn build(mut self) -> Result<ActionSheet, ActionSheetError> {
        let cancels = self
            .buttons
            .iter()
            .filter(|button| button.role == ButtonRole::Cancel)
            .count();
        if cancels > 1 {
            return Err(ActionSheetError::MultipleCancelButtons(cancels));
        }

        if let Some(index) = self
            .buttons
            .iter()
            .position(|button| button.role == ButtonRole::Cancel)
        {
            let cancel = self.buttons.remove(index);
            self.buttons.push(cancel);
        }

        Ok(ActionSheet {
            title: self.title,
            message: self.message,
            buttons: self.buttons,
        })
    }
}

/// What an action sheet style gets to draw.
#[derive(Debug, Clone)]
pub struct ActionSheetStyleConfiguration<V> {
    pub content: V,
    pub action_sheet: ActionSheet,
    pub is_presented: Binding<bool>,
}

impl<V> ActionSheetStyleConfiguration<V> {
    pub fn new(content: V, action_sheet: ActionSheet, is_presented: Binding<bool>) -> Self {
        ActionSheetStyleConfiguration {
            content,
            action_sheet,
            is_presented,
        }
    }

    pub fn is_presented(&self) -> bool {
        self.is_presented.get()
    }

    pub fn dismiss(&self) {
        self.is_presented.set(false);
    }
}

/// Forwards to [`Renderer::native_action_sheet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeActionSheetStyle;

impl<R: Renderer> Style<R, ActionSheetStyleConfiguration<R::View>> for NativeActionSheetStyle {
    fn make_body(
        &self,
        renderer: &R,
        configuration: ActionSheetStyleConfiguration<R::View>,
    ) -> R::View {
        renderer.native_action_sheet(configuration)
    }
}

pub fn action_sheet_with_style<R: Renderer>(
    cx: &RenderContext<'_, R>,
    content: R::View,
    is_presented: Binding<bool>,
    action_sheet: ActionSheet,
) -> R::View {
    let configuration = ActionSheetStyleConfiguration::new(content, action_sheet, is_presented);
    cx.styles().action_sheet().make_body(cx.renderer, configuration)
}

/// Same as [`alert_for_item`](super::alert::alert_for_item), for action sheets.
pub fn action_sheet_for_item<R, T>(
    cx: &RenderContext<'_, R>,
    content: R::View,
    item: Binding<Option<T>>,
    make: impl FnOnce(T) -> ActionSheet,
) -> R::View
where
    R: Renderer,
    T: Clone + 'static,
{
    match item.get() {
        Some(value) => action_sheet_with_style(cx, content, item.is_some(), make(value)),
        None => content,
    }
}
