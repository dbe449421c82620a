use super::controller::{NavigationController, NavigationEvent};
use crate::binding::Binding;
use crate::view::{content, Action, Content, RenderContext, Renderer};
use std::rc::Rc;
use tracing::debug;

/// A trigger pushing `destination` onto the enclosing navigation stack.
///
/// Inside a [`NavigationView`](super::NavigationView) the button renders as a
/// plain button whose action pushes a new frame. Outside of one it falls back
/// to the renderer's own link.
///
/// A button bound to a flag also fires when the flag is `true` at render
/// time. The flag is cleared in the same render pass and the push is queued
/// until the pass is over, so rendering twice before the push is applied
/// still pushes once.
pub struct NavigationButton<R: Renderer> {
    destination: Content<R>,
    label: Content<R>,
    is_active: Option<Binding<bool>>,
}

impl<R: Renderer> Clone for NavigationButton<R> {
    fn clone(&self) -> Self {
        NavigationButton {
            destination: Rc::clone(&self.destination),
            label: Rc::clone(&self.label),
            is_active: self.is_active.clone(),
        }
    }
}

impl<R: Renderer> NavigationButton<R> {
    pub fn new(destination: Content<R>, label: Content<R>) -> Self {
        NavigationButton {
            destination,
            label,
            is_active: None,
        }
    }

    /// A button labelled with plain text.
    pub fn titled(title: impl Into<String>, destination: Content<R>) -> Self {
        let title = title.into();
        NavigationButton::new(
            destination,
            content(move |cx: &mut RenderContext<'_, R>| cx.renderer.text(&title)),
        )
    }

    /// Fires whenever `is_active` reads `true`, then writes `false` back.
    pub fn is_active(mut self, is_active: Binding<bool>) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Fires whenever `selection` equals `tag`, then clears the selection.
    pub fn tagged<T>(self, tag: T, selection: Binding<Option<T>>) -> Self
    where
        T: PartialEq + Clone + 'static,
    {
        self.is_active(selection.selects(tag))
    }

    pub fn render(&self, cx: &mut RenderContext<'_, R>) -> R::View {
        let label = (self.label)(cx);

        let Some(controller) = cx.navigation().cloned() else {
            return cx.renderer.native_link(
                label,
                Rc::clone(&self.destination),
                self.is_active.clone(),
            );
        };

        if let Some(is_active) = self.is_active.as_ref().filter(|flag| flag.get()) {
            is_active.set(false);
            let id = NavigationController::<Content<R>>::generate_id();
            debug!(id = %id, "navigation button activated by binding");
            cx.defer(NavigationEvent::Push {
                content: Rc::clone(&self.destination),
                id,
            });
        }

        let destination = Rc::clone(&self.destination);
        let action = Action::new(move || {
            controller.push(Rc::clone(&destination), None);
        });
        cx.renderer.button(label, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::State;
    use crate::outline::{Outline, OutlineRenderer};
    use crate::view::constant;
    use crate::view::navigation::Preferences;
    use crate::view::navigation::{Bus, NavigationHandle, NavigationScope, NavigationView};
    use crate::view::style::Styles;

    fn destination(text: &str) -> Content<OutlineRenderer> {
        constant(Outline::Text(text.to_string()))
    }

    fn render(view: &mut NavigationView<OutlineRenderer>) -> Outline {
        let styles = Styles::new();
        let mut cx = RenderContext::new(&OutlineRenderer, &styles);
        view.render(&mut cx)
    }

    fn hosting(button: NavigationButton<OutlineRenderer>) -> NavigationView<OutlineRenderer> {
        NavigationView::new(content(move |cx: &mut RenderContext<'_, OutlineRenderer>| {
            button.render(cx)
        }))
    }

    #[test]
    fn test_activation_pushes_destination() {
        let mut view = hosting(NavigationButton::titled("Next", destination("Detail")));
        let outline = render(&mut view);
        assert!(!view.controller().can_pop_up());

        assert!(outline.activate("Next"));

        assert_eq!(view.controller().depth(), 1);
        let outline = render(&mut view);
        assert!(outline.contains_text("Detail"));
    }

    #[test]
    fn test_each_activation_pushes_a_fresh_frame() {
        let mut view = hosting(NavigationButton::titled("Next", destination("Detail")));
        let outline = render(&mut view);

        assert!(outline.activate("Next"));
        assert!(outline.activate("Next"));

        let ids = view.controller().frame_ids();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_flag_fires_once_across_repeated_renders() {
        let flag = State::new(true);
        let button =
            NavigationButton::titled("Next", destination("Detail")).is_active(flag.binding());
        let controller: NavigationHandle<OutlineRenderer> = NavigationController::new();
        let styles = Styles::new();
        let mut preferences = Preferences::new();
        let mut bus: Bus<OutlineRenderer> = Bus::new();

        {
            let scope = NavigationScope::new(controller.clone(), &mut preferences, &mut bus);
            let mut cx = RenderContext::with_navigation(&OutlineRenderer, &styles, scope);
            button.render(&mut cx);
            button.render(&mut cx);
        }

        assert!(!flag.get());
        assert_eq!(bus.len(), 1);
        assert_eq!(controller.depth(), 0);

        for event in bus.drain(..) {
            controller.apply(event);
        }
        assert_eq!(controller.depth(), 1);
    }

    #[test]
    fn test_flag_push_shows_on_next_render() {
        let flag = State::new(false);
        let mut view = hosting(
            NavigationButton::titled("Next", destination("Detail")).is_active(flag.binding()),
        );
        render(&mut view);
        assert!(!view.controller().can_pop_up());

        flag.set(true);
        let outline = render(&mut view);

        assert!(!outline.contains_text("Detail"));
        assert!(!flag.get());
        assert_eq!(view.controller().depth(), 1);

        let outline = render(&mut view);
        assert!(outline.contains_text("Detail"));
        assert_eq!(view.controller().depth(), 1);
    }

    #[test]
    fn test_selection_fires_matching_tag_only() {
        let selection = State::new(None);
        let buttons = vec![
            NavigationButton::titled("Inbox", destination("Inbox"))
                .tagged("inbox", selection.binding()),
            NavigationButton::titled("Sent", destination("Sent"))
                .tagged("sent", selection.binding()),
        ];
        let mut view = NavigationView::new(content(
            move |cx: &mut RenderContext<'_, OutlineRenderer>| {
                let children = buttons.iter().map(|button| button.render(cx)).collect();
                cx.renderer.group(children)
            },
        ));
        render(&mut view);

        selection.set(Some("sent"));
        render(&mut view);

        assert_eq!(selection.get(), None);
        assert_eq!(view.controller().depth(), 1);
        let outline = render(&mut view);
        assert!(outline.contains_text("Sent"));
        assert!(!outline.contains_text("Inbox"));
    }

    #[test]
    fn test_standalone_button_falls_back_to_native_link() {
        let flag = State::new(false);
        let button =
            NavigationButton::titled("Next", destination("Detail")).is_active(flag.binding());
        let styles = Styles::new();
        let mut cx = RenderContext::new(&OutlineRenderer, &styles);

        let outline = button.render(&mut cx);

        assert!(matches!(
            outline,
            Outline::Link {
                is_active: Some(false),
                ..
            }
        ));
    }
}
