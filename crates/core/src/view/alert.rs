//! Alerts routed through the active alert style.

use super::style::Style;
use super::{Action, RenderContext, Renderer};
use crate::binding::Binding;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a button presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonRole {
    #[default]
    Default,
    Cancel,
    Destructive,
}

/// A button of an alert or an action sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertButton {
    pub id: String,
    pub role: ButtonRole,
    pub label: String,
    pub action: Action,
}

impl AlertButton {
    pub fn new(role: ButtonRole, label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        AlertButton {
            id: Uuid::now_v7().to_string(),
            role,
            label: label.into(),
            action: Action::new(action),
        }
    }

    /// A button with the [`ButtonRole::Default`] role.
    pub fn plain(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        AlertButton::new(ButtonRole::Default, label, action)
    }

    pub fn cancel(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        AlertButton::new(ButtonRole::Cancel, label, action)
    }

    pub fn destructive(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        AlertButton::new(ButtonRole::Destructive, label, action)
    }
}

/// Contents of an alert.
///
/// An alert with two buttons lays them out side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: Option<String>,
    pub primary_button: Option<AlertButton>,
    pub secondary_button: Option<AlertButton>,
    pub is_side_by_side: bool,
}

impl Alert {
    pub fn builder(title: impl Into<String>) -> AlertBuilder {
        AlertBuilder {
            title: title.into(),
            message: None,
            primary_button: None,
            secondary_button: None,
        }
    }

    /// Primary then secondary button, skipping the missing ones.
    pub fn buttons(&self) -> impl Iterator<Item = &AlertButton> {
        self.primary_button
            .iter()
            .chain(self.secondary_button.iter())
    }
}

/// Builder for an [`Alert`].
///
/// ```
/// use veneer_core::view::alert::{Alert, AlertButton};
///
/// let alert = Alert::builder("Delete draft?")
///     .message("This can't be undone.")
///     .primary_button(AlertButton::destructive("Delete", || {}))
///     .secondary_button(AlertButton::cancel("Keep", || {}))
///     .build();
/// assert!(alert.is_side_by_side);
/// ```
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    title: String,
    message: Option<String>,
    primary_button: Option<AlertButton>,
    secondary_button: Option<AlertButton>,
}

impl AlertBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn primary_button(mut self, button: AlertButton) -> Self {
        self.primary_button = Some(button);
        self
    }

    pub fn secondary_button(mut self, button: AlertButton) -> Self {
        self.secondary_button = Some(button);
        self
    }

    pub fn build(self) -> Alert {
        let is_side_by_side = self.primary_button.is_some() && self.secondary_button.is_some();
        Alert {
            title: self.title,
            message: self.message,
            primary_button: self.primary_button,
            secondary_button: self.secondary_button,
            is_side_by_side,
        }
    }
}

/// What an alert style gets to draw.
#[derive(Debug, Clone)]
pub struct AlertStyleConfiguration<V> {
    /// The view the alert is attached to.
    pub content: V,
    pub alert: Alert,
    pub is_presented: Binding<bool>,
}

impl<V> AlertStyleConfiguration<V> {
    pub fn new(content: V, alert: Alert, is_presented: Binding<bool>) -> Self {
        AlertStyleConfiguration {
            content,
            alert,
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

/// Forwards to [`Renderer::native_alert`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAlertStyle;

impl<R: Renderer> Style<R, AlertStyleConfiguration<R::View>> for NativeAlertStyle {
    fn make_body(&self, renderer: &R, configuration: AlertStyleConfiguration<R::View>) -> R::View {
        renderer.native_alert(configuration)
    }
}

/// Attaches `alert` to `content`, shown while `is_presented` is `true`.
pub fn alert_with_style<R: Renderer>(
    cx: &RenderContext<'_, R>,
    content: R::View,
    is_presented: Binding<bool>,
    alert: Alert,
) -> R::View {
    let configuration = AlertStyleConfiguration::new(content, alert, is_presented);
    cx.styles().alert().make_body(cx.renderer, configuration)
}

/// Attaches the alert `make` builds for `item`, shown while there is an item.
///
/// Dismissing the alert clears `item`. Without an item `content` is returned
/// as is.
pub fn alert_for_item<R, T>(
    cx: &RenderContext<'_, R>,
    content: R::View,
    item: Binding<Option<T>>,
    make: impl FnOnce(T) -> Alert,
) -> R::View
where
    R: Renderer,
    T: Clone + 'static,
{
    match item.get() {
        Some(value) => alert_with_style(cx, content, item.is_some(), make(value)),
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::State;
    use crate::outline::{Outline, OutlineRenderer};
    use crate::view::style::{FnStyle, Styles};
    use std::cell::Cell;
    use std::rc::Rc;

    fn body() -> Outline {
        Outline::Text("Body".to_string())
    }

    #[test]
    fn test_single_button_alert_is_not_side_by_side() {
        let alert = Alert::builder("Saved")
            .primary_button(AlertButton::plain("OK", || {}))
            .build();

        assert!(!alert.is_side_by_side);
        assert_eq!(alert.buttons().count(), 1);
        assert_eq!(
            alert.primary_button.map(|button| button.role),
            Some(ButtonRole::Default)
        );
    }

    #[test]
    fn test_buttons_get_unique_ids() {
        let first = AlertButton::cancel("Cancel", || {});
        let second = AlertButton::cancel("Cancel", || {});

        assert_ne!(first.id, second.id);
        assert_eq!(first.role, ButtonRole::Cancel);
    }

    #[test]
    fn test_native_alert_dismisses_after_button_action() {
        let presented = State::new(true);
        let tapped = Rc::new(Cell::new(false));
        let seen = Rc::clone(&tapped);
        let alert = Alert::builder("Delete?")
            .primary_button(AlertButton::destructive("Delete", move || seen.set(true)))
            .build();
        let styles = Styles::new();
        let cx = RenderContext::new(&OutlineRenderer, &styles);

        let outline = alert_with_style(&cx, body(), presented.binding(), alert);

        assert!(matches!(outline, Outline::Alert { .. }));
        assert!(outline.activate("Delete"));
        assert!(tapped.get());
        assert!(!presented.get());
    }

    #[test]
    fn test_hidden_alert_leaves_content_alone() {
        let styles = Styles::new();
        let cx = RenderContext::new(&OutlineRenderer, &styles);

        let outline = alert_with_style(
            &cx,
            body(),
            Binding::constant(false),
            Alert::builder("Hidden").build(),
        );

        assert_eq!(outline, body());
    }

    #[test]
    fn test_alert_for_item() {
        let item = State::new(None::<u32>);
        let styles = Styles::new();
        let cx = RenderContext::new(&OutlineRenderer, &styles);

        let outline = alert_for_item(&cx, body(), item.binding(), |value| {
            Alert::builder(format!("Item {value}")).build()
        });
        assert_eq!(outline, body());

        item.set(Some(7));
        let outline = alert_for_item(&cx, body(), item.binding(), |value| {
            Alert::builder(format!("Item {value}"))
                .primary_button(AlertButton::plain("OK", || {}))
                .build()
        });
        assert!(matches!(&outline, Outline::Alert { title, .. } if title == "Item 7"));

        assert!(outline.activate("OK"));
        assert_eq!(item.get(), None);
    }

    #[test]
    fn test_custom_alert_style_can_dismiss() {
        let presented = State::new(true);
        let styles = Styles::new().alert_style(FnStyle::new(
            |renderer: &OutlineRenderer, configuration: AlertStyleConfiguration<Outline>| {
                configuration.dismiss();
                renderer.text(&configuration.alert.title)
            },
        ));
        let cx = RenderContext::new(&OutlineRenderer, &styles);

        let outline = alert_with_style(
            &cx,
            body(),
            presented.binding(),
            Alert::builder("Custom").build(),
        );

        assert_eq!(outline, Outline::Text("Custom".to_string()));
        assert!(!presented.get());
    }
}
