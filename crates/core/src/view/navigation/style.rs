use crate::color::Color;
use crate::view::style::Style;
use crate::view::{Action, Renderer, Tagged};
use std::fmt;

/// Leading and trailing navigation bar items.
#[derive(Clone)]
pub struct BarItems<V> {
    pub leading: Option<Tagged<V>>,
    pub trailing: Option<Tagged<V>>,
}

impl<V> BarItems<V> {
    pub fn new(leading: Option<V>, trailing: Option<V>) -> Self {
        BarItems {
            leading: leading.map(Tagged::new),
            trailing: trailing.map(Tagged::new),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_none() && self.trailing.is_none()
    }
}

impl<V> Default for BarItems<V> {
    fn default() -> Self {
        BarItems {
            leading: None,
            trailing: None,
        }
    }
}

impl<V> PartialEq for BarItems<V> {
    fn eq(&self, other: &Self) -> bool {
        self.leading == other.leading && self.trailing == other.trailing
    }
}

impl<V> fmt::Debug for BarItems<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarItems")
            .field("leading", &self.leading)
            .field("trailing", &self.trailing)
            .finish()
    }
}

/// What a navigation style gets to draw one render pass of a container.
#[derive(Clone)]
pub struct NavigationStyleConfiguration<V> {
    /// The visible content, already identified and given its transition.
    pub content: V,
    pub bar_items: BarItems<V>,
    pub title: Option<String>,
    /// Title of the screen below, for a back button label.
    pub previous_title: Option<String>,
    pub background: Option<Tagged<V>>,
    pub tint_color: Color,
    /// Pops the top screen. Only set when there is one to pop.
    pub back_action: Option<Action>,
}

impl<V> NavigationStyleConfiguration<V> {
    pub fn can_pop_up(&self) -> bool {
        self.back_action.is_some()
    }
}

impl<V> fmt::Debug for NavigationStyleConfiguration<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStyleConfiguration")
            .field("bar_items", &self.bar_items)
            .field("title", &self.title)
            .field("previous_title", &self.previous_title)
            .field("background", &self.background)
            .field("tint_color", &self.tint_color)
            .field("can_pop_up", &self.can_pop_up())
            .finish()
    }
}

/// Forwards to [`Renderer::native_navigation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeNavigationStyle;

impl<R: Renderer> Style<R, NavigationStyleConfiguration<R::View>> for NativeNavigationStyle {
    fn make_body(&self, renderer: &R, configuration: NavigationStyleConfiguration<R::View>) -> R::View {
        renderer.native_navigation(configuration)
    }
}
