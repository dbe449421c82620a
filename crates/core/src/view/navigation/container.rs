use super::controller::{NavigationController, PopDestination, Subscription};
use super::preferences::{MergedMetadata, Preferences};
use super::style::NavigationStyleConfiguration;
use super::{Bus, NavigationHandle, NavigationScope};
use crate::color::{Color, DEFAULT_TINT};
use crate::settings::NavigationSettings;
use crate::view::transition::Transitions;
use crate::view::{Action, Content, RenderContext, Renderer};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Identity given to the root content.
pub const ROOT_ID: &str = "root";

/// A container showing its root content or the top of its navigation stack.
///
/// The view owns its controller: content rendered inside it reaches the
/// controller through the render context, and [`NavigationView::controller`]
/// hands out clones for code driving navigation from outside.
///
/// Rendering is explicit. After a push or a pop [`NavigationView::needs_render`]
/// turns `true` and the embedding application is expected to call
/// [`NavigationView::render`] again.
pub struct NavigationView<R: Renderer> {
    root: Content<R>,
    controller: NavigationHandle<R>,
    transitions: Transitions,
    default_tint_color: Color,
    merged: MergedMetadata<R::View>,
    dirty: Rc<Cell<bool>>,
    subscription: Subscription,
}

impl<R: Renderer> NavigationView<R> {
    pub fn new(root: Content<R>) -> Self {
        let controller = NavigationController::new();
        let dirty = Rc::new(Cell::new(true));
        let subscription = {
            let dirty = Rc::clone(&dirty);
            controller.subscribe(move |_| dirty.set(true))
        };

        NavigationView {
            root,
            controller,
            transitions: Transitions::default(),
            default_tint_color: DEFAULT_TINT,
            merged: MergedMetadata::new(),
            dirty,
            subscription,
        }
    }

    /// Creates a view using the configured tint and transitions.
    pub fn from_settings(root: Content<R>, settings: &NavigationSettings) -> Self {
        NavigationView::new(root)
            .with_transitions(settings.transitions())
            .with_default_tint_color(settings.default_tint_color)
    }

    pub fn with_transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }

    /// Tint used until some visible content emits one.
    pub fn with_default_tint_color(mut self, color: Color) -> Self {
        self.default_tint_color = color;
        self
    }

    pub fn controller(&self) -> &NavigationHandle<R> {
        &self.controller
    }

    /// `true` when the stack changed since the last render.
    pub fn needs_render(&self) -> bool {
        self.dirty.get()
    }

    pub fn metadata(&self) -> &MergedMetadata<R::View> {
        &self.merged
    }

    pub fn title_history(&self) -> &[String] {
        self.merged.title_history()
    }

    /// Renders the visible content through the active navigation style.
    ///
    /// Navigation requested by the content while it renders is applied once the
    /// output is built, so it only shows on the next render.
    pub fn render(&mut self, cx: &mut RenderContext<'_, R>) -> R::View {
        let renderer = cx.renderer;
        let snapshot = self.controller.snapshot();

        let (id, body) = match &snapshot.top {
            Some(frame) => (frame.id().to_string(), Rc::clone(frame.content())),
            None => (ROOT_ID.to_string(), Rc::clone(&self.root)),
        };

        self.dirty.set(false);
        let mut preferences = Preferences::new();
        let mut bus: Bus<R> = Bus::new();
        let view = {
            let scope = NavigationScope::new(self.controller.clone(), &mut preferences, &mut bus);
            let mut inner = RenderContext::with_navigation(renderer, cx.styles(), scope);
            body(&mut inner)
        };

        let view = renderer.identified(view, &id);
        let view = renderer.transition(view, self.transitions.for_direction(snapshot.direction));

        self.merged.fold(&id, snapshot.direction, snapshot.depth, preferences);

        let configuration = NavigationStyleConfiguration {
            content: view,
            bar_items: self.merged.bar_items().clone(),
            title: self.merged.title().map(str::to_string),
            previous_title: self.merged.previous_title().map(str::to_string),
            background: self.merged.background().cloned(),
            tint_color: self.merged.tint_color(self.default_tint_color),
            back_action: (snapshot.depth > 0).then(|| {
                let controller = self.controller.clone();
                Action::new(move || controller.pop(PopDestination::Previous))
            }),
        };
        trace!(id = %id, depth = snapshot.depth, "rendering navigation view");

        let output = cx.styles().navigation().make_body(renderer, configuration);

        for event in bus.drain(..) {
            debug!(?event, "applying deferred navigation event");
            self.controller.apply(event);
        }

        output
    }
}

impl<R: Renderer> Drop for NavigationView<R> {
    fn drop(&mut self) {
        self.controller.unsubscribe(self.subscription);
    }
}
