//! Render boundary and the explicit render context.
//!
//! The core never renders anything itself. It receives opaque view handles
//! from a [`Renderer`] (the host engine), arranges them, and hands normalized
//! configurations to the active [`Style`](style::Style) of each widget kind.
//!
//! Everything a widget needs while it is being rendered travels through a
//! [`RenderContext`]: the renderer, the active [`Styles`], and, when the widget
//! sits inside a [`NavigationView`](navigation::NavigationView), the navigation
//! scope used to emit bar metadata and to request pushes.
//!
//! ```
//! use veneer_core::outline::{Outline, OutlineRenderer};
//! use veneer_core::view::style::Styles;
//! use veneer_core::view::{RenderContext, Renderer};
//!
//! let renderer = OutlineRenderer;
//! let styles = Styles::new();
//! let cx = RenderContext::new(&renderer, &styles);
//! let text = cx.renderer.text("Hello");
//! assert_eq!(text, Outline::Text("Hello".to_string()));
//! ```

pub mod action_sheet;
pub mod alert;
pub mod navigation;
pub mod slider;
pub mod style;
pub mod transition;

use crate::binding::Binding;
use crate::color::Color;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use self::action_sheet::ActionSheetStyleConfiguration;
use self::alert::AlertStyleConfiguration;
use self::navigation::{BarItems, NavigationEvent, NavigationHandle, NavigationScope};
use self::navigation::NavigationStyleConfiguration;
use self::slider::SliderStyleConfiguration;
use self::style::Styles;
use self::transition::Transition;

/// Identity token for tagged views.
pub type Id = u64;

/// Hands out process-wide unique [`Id`]s.
#[derive(Debug)]
pub struct IdFeeder(AtomicU64);

impl IdFeeder {
    pub const fn new() -> Self {
        IdFeeder(AtomicU64::new(1))
    }

    pub fn next(&self) -> Id {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdFeeder {
    fn default() -> Self {
        IdFeeder::new()
    }
}

pub static ID_FEEDER: IdFeeder = IdFeeder::new();

/// The host rendering engine.
///
/// `View` is the engine's opaque view description. The primitive methods
/// compose views; the `native_*` methods render the engine's own widget for a
/// configuration and back the default passthrough styles.
pub trait Renderer: Sized + 'static {
    type View: Clone + 'static;

    fn empty(&self) -> Self::View;

    fn text(&self, text: &str) -> Self::View;

    fn group(&self, children: Vec<Self::View>) -> Self::View;

    /// Gives `view` a stable identity so the engine can tell frames apart.
    fn identified(&self, view: Self::View, id: &str) -> Self::View;

    fn transition(&self, view: Self::View, transition: &Transition) -> Self::View;

    fn button(&self, label: Self::View, action: Action) -> Self::View;

    /// The engine's own navigation link, used by triggers outside a navigation container.
    fn native_link(
        &self,
        label: Self::View,
        destination: Content<Self>,
        is_active: Option<Binding<bool>>,
    ) -> Self::View;

    fn native_alert(&self, configuration: AlertStyleConfiguration<Self::View>) -> Self::View;

    fn native_action_sheet(
        &self,
        configuration: ActionSheetStyleConfiguration<Self::View>,
    ) -> Self::View;

    fn native_slider(&self, configuration: SliderStyleConfiguration<Self::View>) -> Self::View;

    fn native_navigation(
        &self,
        configuration: NavigationStyleConfiguration<Self::View>,
    ) -> Self::View;
}

/// Renders a view description in a given context.
pub type Content<R> = Rc<dyn Fn(&mut RenderContext<'_, R>) -> <R as Renderer>::View>;

/// Wraps a closure into [`Content`].
pub fn content<R: Renderer>(
    body: impl Fn(&mut RenderContext<'_, R>) -> R::View + 'static,
) -> Content<R> {
    Rc::new(body)
}

/// Content that ignores its context and always yields `view`.
pub fn constant<R: Renderer>(view: R::View) -> Content<R> {
    Rc::new(move |_| view.clone())
}

/// Callback run when an actionable element is activated.
#[derive(Clone)]
pub struct Action(Rc<dyn Fn()>);

impl Action {
    pub fn new(action: impl Fn() + 'static) -> Self {
        Action(Rc::new(action))
    }

    pub fn perform(&self) {
        (self.0)()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}

/// A view handle with a stable identity token.
///
/// Two tagged views are equal iff they carry the same token, whatever the
/// views themselves are.
#[derive(Clone)]
pub struct Tagged<V> {
    id: Id,
    view: V,
}

impl<V> Tagged<V> {
    pub fn new(view: V) -> Self {
        Tagged {
            id: ID_FEEDER.next(),
            view,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

impl<V> PartialEq for Tagged<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V> Eq for Tagged<V> {}

impl<V> fmt::Debug for Tagged<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tagged").field("id", &self.id).finish()
    }
}

/// Context threaded through every render call.
pub struct RenderContext<'a, R: Renderer> {
    pub renderer: &'a R,
    styles: &'a Styles<R>,
    navigation: Option<NavigationScope<'a, R>>,
}

impl<'a, R: Renderer> RenderContext<'a, R> {
    /// Creates a top-level context, outside of any navigation container.
    pub fn new(renderer: &'a R, styles: &'a Styles<R>) -> Self {
        RenderContext {
            renderer,
            styles,
            navigation: None,
        }
    }

    pub(crate) fn with_navigation(
        renderer: &'a R,
        styles: &'a Styles<R>,
        navigation: NavigationScope<'a, R>,
    ) -> Self {
        RenderContext {
            renderer,
            styles,
            navigation: Some(navigation),
        }
    }

    pub fn styles(&self) -> &'a Styles<R> {
        self.styles
    }

    /// Controller of the enclosing navigation container, if any.
    pub fn navigation(&self) -> Option<&NavigationHandle<R>> {
        self.navigation.as_ref().map(|scope| &scope.controller)
    }

    /// Renders `body` with `styles` replacing the active styles.
    ///
    /// The navigation scope, if any, is shared with the subtree.
    pub fn scoped<U>(
        &mut self,
        styles: &Styles<R>,
        body: impl FnOnce(&mut RenderContext<'_, R>) -> U,
    ) -> U {
        let mut child = RenderContext {
            renderer: self.renderer,
            styles,
            navigation: self.navigation.as_mut().map(NavigationScope::reborrow),
        };
        body(&mut child)
    }

    /// Declares the navigation bar title for the visible content.
    pub fn navigation_bar_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        match self.navigation.as_mut() {
            Some(scope) => scope.preferences.title.emit(title),
            None => debug!(%title, "navigation bar title declared outside of a navigation view"),
        }
    }

    /// Declares leading and trailing navigation bar items.
    pub fn navigation_bar_items(&mut self, leading: Option<R::View>, trailing: Option<R::View>) {
        match self.navigation.as_mut() {
            Some(scope) => scope
                .preferences
                .bar_items
                .emit(BarItems::new(leading, trailing)),
            None => debug!("navigation bar items declared outside of a navigation view"),
        }
    }

    pub fn navigation_bar_leading_item(&mut self, leading: R::View) {
        self.navigation_bar_items(Some(leading), None);
    }

    pub fn navigation_bar_trailing_item(&mut self, trailing: R::View) {
        self.navigation_bar_items(None, Some(trailing));
    }

    pub fn navigation_bar_background(&mut self, background: R::View) {
        match self.navigation.as_mut() {
            Some(scope) => scope.preferences.background.emit(Tagged::new(background)),
            None => debug!("navigation bar background declared outside of a navigation view"),
        }
    }

    pub fn navigation_bar_tint_color(&mut self, color: Color) {
        match self.navigation.as_mut() {
            Some(scope) => scope.preferences.tint_color.emit(color),
            None => debug!(%color, "navigation bar tint declared outside of a navigation view"),
        }
    }

    /// Queues a navigation request to run once the current render pass is over.
    ///
    /// Returns `false` when there is no enclosing navigation container.
    pub(crate) fn defer(&mut self, event: NavigationEvent<Content<R>>) -> bool {
        match self.navigation.as_mut() {
            Some(scope) => {
                scope.bus.push_back(event);
                true
            }
            None => false,
        }
    }
}
