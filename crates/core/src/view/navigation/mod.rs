//! Stack based navigation.
//!
//! A [`NavigationView`] owns a [`NavigationController`], which owns the
//! [`Stack`] of pushed frames. On every render the view shows either its root
//! content or the top frame, collects the bar metadata the visible content
//! emits through its [`RenderContext`](super::RenderContext), and hands the
//! result to the active navigation style.
//!
//! The split:
//! - [`stack`]: ordered frames and their contract violations
//! - [`controller`]: the shared handle mutating the stack and notifying observers
//! - [`preferences`]: metadata channels and the merged bar state
//! - [`container`]: the view deciding what is visible
//! - [`button`]: triggers pushing destinations

pub mod button;
pub mod container;
pub mod controller;
pub mod preferences;
pub mod stack;
pub mod style;

pub use self::button::NavigationButton;
pub use self::container::{NavigationView, ROOT_ID};
pub use self::controller::{
    NavigationController, NavigationEvent, PopDestination, Subscription, TopChange,
};
pub use self::preferences::{Channel, MergedMetadata, Preferences};
pub use self::stack::{Frame, Stack, StackError};
pub use self::style::{BarItems, NativeNavigationStyle, NavigationStyleConfiguration};

use super::{Content, Renderer};
use std::collections::VecDeque;

/// Controller handle as seen by content rendered through `R`.
pub type NavigationHandle<R> = NavigationController<Content<R>>;

/// Navigation requests raised during a render pass, applied once it is over.
pub type Bus<R> = VecDeque<NavigationEvent<Content<R>>>;

/// What content rendered inside a [`NavigationView`] can reach.
pub struct NavigationScope<'a, R: Renderer> {
    pub(crate) controller: NavigationHandle<R>,
    pub(crate) preferences: &'a mut Preferences<R::View>,
    pub(crate) bus: &'a mut Bus<R>,
}

impl<'a, R: Renderer> NavigationScope<'a, R> {
    pub(crate) fn new(
        controller: NavigationHandle<R>,
        preferences: &'a mut Preferences<R::View>,
        bus: &'a mut Bus<R>,
    ) -> Self {
        NavigationScope {
            controller,
            preferences,
            bus,
        }
    }

    pub(crate) fn reborrow(&mut self) -> NavigationScope<'_, R> {
        NavigationScope {
            controller: self.controller.clone(),
            preferences: &mut *self.preferences,
            bus: &mut *self.bus,
        }
    }
}
