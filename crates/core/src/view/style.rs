//! Pluggable styles and the per-kind style registry.
//!
//! A [`Style`] turns the normalized configuration of one widget kind into the
//! final view. [`Styles`] holds the current style of every kind; a kind that
//! has no custom style falls back to a passthrough that forwards the
//! configuration to the renderer's native widget.
//!
//! ```
//! use veneer_core::outline::{Outline, OutlineRenderer};
//! use veneer_core::view::style::{FnStyle, Styles};
//! use veneer_core::view::navigation::NavigationStyleConfiguration;
//!
//! let styles = Styles::<OutlineRenderer>::new().navigation_style(FnStyle::new(
//!     |_: &OutlineRenderer, configuration: NavigationStyleConfiguration<Outline>| {
//!         configuration.content
//!     },
//! ));
//! assert!(styles.navigation().is_custom());
//! assert!(!styles.alert().is_custom());
//! ```

use super::action_sheet::{ActionSheetStyleConfiguration, NativeActionSheetStyle};
use super::alert::{AlertStyleConfiguration, NativeAlertStyle};
use super::navigation::{NativeNavigationStyle, NavigationStyleConfiguration};
use super::slider::{NativeSliderStyle, SliderStyleConfiguration};
use super::Renderer;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::trace;

/// Renders the configuration `C` of one widget kind.
pub trait Style<R: Renderer, C> {
    fn make_body(&self, renderer: &R, configuration: C) -> R::View;
}

/// Adapts a closure into a [`Style`].
pub struct FnStyle<F> {
    body: F,
}

impl<F> FnStyle<F> {
    pub fn new(body: F) -> Self {
        FnStyle { body }
    }
}

impl<R, C, F> Style<R, C> for FnStyle<F>
where
    R: Renderer,
    F: Fn(&R, C) -> R::View,
{
    fn make_body(&self, renderer: &R, configuration: C) -> R::View {
        (self.body)(renderer, configuration)
    }
}

/// The current style of one widget kind, with its built-in fallback.
pub struct StyleSlot<R: Renderer, C> {
    custom: Option<Rc<dyn Style<R, C>>>,
    fallback: Rc<dyn Style<R, C>>,
    _configuration: PhantomData<fn(C)>,
}

impl<R: Renderer, C> Clone for StyleSlot<R, C> {
    fn clone(&self) -> Self {
        StyleSlot {
            custom: self.custom.clone(),
            fallback: Rc::clone(&self.fallback),
            _configuration: PhantomData,
        }
    }
}

impl<R: Renderer, C> fmt::Debug for StyleSlot<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleSlot")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl<R: Renderer, C> StyleSlot<R, C> {
    pub fn new(fallback: impl Style<R, C> + 'static) -> Self {
        StyleSlot {
            custom: None,
            fallback: Rc::new(fallback),
            _configuration: PhantomData,
        }
    }

    pub fn set(&mut self, style: impl Style<R, C> + 'static) {
        self.custom = Some(Rc::new(style));
    }

    /// Drops the custom style, going back to the fallback.
    pub fn reset(&mut self) {
        self.custom = None;
    }

    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// The style in effect: the custom one if set, the fallback otherwise.
    pub fn resolve(&self) -> &dyn Style<R, C> {
        match &self.custom {
            Some(style) => style.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    pub fn make_body(&self, renderer: &R, configuration: C) -> R::View {
        trace!(custom = self.is_custom(), "resolving style");
        self.resolve().make_body(renderer, configuration)
    }
}

/// Current style of every widget kind.
pub struct Styles<R: Renderer> {
    alert: StyleSlot<R, AlertStyleConfiguration<R::View>>,
    action_sheet: StyleSlot<R, ActionSheetStyleConfiguration<R::View>>,
    slider: StyleSlot<R, SliderStyleConfiguration<R::View>>,
    navigation: StyleSlot<R, NavigationStyleConfiguration<R::View>>,
}

impl<R: Renderer> Clone for Styles<R> {
    fn clone(&self) -> Self {
        Styles {
            alert: self.alert.clone(),
            action_sheet: self.action_sheet.clone(),
            slider: self.slider.clone(),
            navigation: self.navigation.clone(),
        }
    }
}

impl<R: Renderer> fmt::Debug for Styles<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Styles")
            .field("alert", &self.alert)
            .field("action_sheet", &self.action_sheet)
            .field("slider", &self.slider)
            .field("navigation", &self.navigation)
            .finish()
    }
}

impl<R: Renderer> Default for Styles<R> {
    fn default() -> Self {
        Styles::new()
    }
}

impl<R: Renderer> Styles<R> {
    /// Styles that forward every kind to the renderer's native widgets.
    pub fn new() -> Self {
        Styles {
            alert: StyleSlot::new(NativeAlertStyle),
            action_sheet: StyleSlot::new(NativeActionSheetStyle),
            slider: StyleSlot::new(NativeSliderStyle),
            navigation: StyleSlot::new(NativeNavigationStyle),
        }
    }

    pub fn alert_style(
        mut self,
        style: impl Style<R, AlertStyleConfiguration<R::View>> + 'static,
    ) -> Self {
        self.alert.set(style);
        self
    }

    pub fn action_sheet_style(
        mut self,
        style: impl Style<R, ActionSheetStyleConfiguration<R::View>> + 'static,
    ) -> Self {
        self.action_sheet.set(style);
        self
    }

    pub fn slider_style(
        mut self,
        style: impl Style<R, SliderStyleConfiguration<R::View>> + 'static,
    ) -> Self {
        self.slider.set(style);
        self
    }

    pub fn navigation_style(
        mut self,
        style: impl Style<R, NavigationStyleConfiguration<R::View>> + 'static,
    ) -> Self {
        self.navigation.set(style);
        self
    }

    pub fn alert(&self) -> &StyleSlot<R, AlertStyleConfiguration<R::View>> {
        &self.alert
    }

    pub fn action_sheet(&self) -> &StyleSlot<R, ActionSheetStyleConfiguration<R::View>> {
        &self.action_sheet
    }

    pub fn slider(&self) -> &StyleSlot<R, SliderStyleConfiguration<R::View>> {
        &self.slider
    }

    pub fn navigation(&self) -> &StyleSlot<R, NavigationStyleConfiguration<R::View>> {
        &self.navigation
    }

    pub fn alert_mut(&mut self) -> &mut StyleSlot<R, AlertStyleConfiguration<R::View>> {
        &mut self.alert
    }

    pub fn action_sheet_mut(
        &mut self,
    ) -> &mut StyleSlot<R, ActionSheetStyleConfiguration<R::View>> {
        &mut self.action_sheet
    }

    pub fn slider_mut(&mut self) -> &mut StyleSlot<R, SliderStyleConfiguration<R::View>> {
        &mut self.slider
    }

    pub fn navigation_mut(
        &mut self,
    ) -> &mut StyleSlot<R, NavigationStyleConfiguration<R::View>> {
        &mut self.navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::State;
    use crate::outline::{Outline, OutlineRenderer};
    use crate::view::alert::Alert;

    fn configuration() -> AlertStyleConfiguration<Outline> {
        AlertStyleConfiguration::new(
            Outline::Text("Body".to_string()),
            Alert::builder("Delete?").build(),
            State::new(true).binding(),
        )
    }

    #[test]
    fn test_fallback_forwards_to_native_widget() {
        let styles = Styles::<OutlineRenderer>::new();

        let view = styles
            .alert()
            .make_body(&OutlineRenderer, configuration());

        assert!(matches!(view, Outline::Alert { .. }));
    }

    #[test]
    fn test_custom_style_replaces_fallback_until_reset() {
        let mut styles = Styles::<OutlineRenderer>::new().alert_style(FnStyle::new(
            |renderer: &OutlineRenderer, configuration: AlertStyleConfiguration<Outline>| {
                renderer.text(&format!("custom: {}", configuration.alert.title))
            },
        ));

        let view = styles
            .alert()
            .make_body(&OutlineRenderer, configuration());
        assert_eq!(view, Outline::Text("custom: Delete?".to_string()));

        styles.alert_mut().reset();
        assert!(!styles.alert().is_custom());
        let view = styles
            .alert()
            .make_body(&OutlineRenderer, configuration());
        assert!(matches!(view, Outline::Alert { .. }));
    }

    #[test]
    fn test_cloned_styles_can_be_overridden_independently() {
        let base = Styles::<OutlineRenderer>::new();
        let overridden = base.clone().slider_style(FnStyle::new(
            |renderer: &OutlineRenderer, _: SliderStyleConfiguration<Outline>| renderer.empty(),
        ));

        assert!(!base.slider().is_custom());
        assert!(overridden.slider().is_custom());
    }
}
