//! A scripted walk through an inbox: push a message, edit a slider, follow a
//! programmatic link, answer an alert, then unwind the stack.

use anyhow::{bail, ensure, Error};
use tracing::info;
use veneer_core::binding::State;
use veneer_core::color::Color;
use veneer_core::outline::{Outline, OutlineRenderer, BACK_LABEL};
use veneer_core::settings::Settings;
use veneer_core::view::alert::{alert_with_style, Alert, AlertButton};
use veneer_core::view::navigation::{
    NavigationButton, NavigationStyleConfiguration, NavigationView, PopDestination,
};
use veneer_core::view::slider::Slider;
use veneer_core::view::style::{FnStyle, Styles};
use veneer_core::view::{constant, content, Action, Content, RenderContext, Renderer};

const ACCENT: Color = Color::rgb(0x0A, 0x84, 0xFF);

/// Values the pages read and write.
#[derive(Clone, Default)]
struct Model {
    volume: State<f32>,
    replying: State<bool>,
    confirm_delete: State<bool>,
    deleted: State<bool>,
}

fn inbox(model: Model) -> Content<OutlineRenderer> {
    content(move |cx: &mut RenderContext<'_, OutlineRenderer>| {
        cx.navigation_bar_title("Inbox");
        let compose = cx.renderer.text("Compose");
        cx.navigation_bar_trailing_item(compose);
        cx.navigation_bar_tint_color(ACCENT);

        let open = NavigationButton::titled("Open message", message(model.clone())).render(cx);
        let status = if model.deleted.get() {
            "1 message deleted"
        } else {
            "1 unread message"
        };
        let status = cx.renderer.text(status);
        cx.renderer.group(vec![status, open])
    })
}

fn message(model: Model) -> Content<OutlineRenderer> {
    content(move |cx: &mut RenderContext<'_, OutlineRenderer>| {
        cx.navigation_bar_title("Message");

        let volume = Slider::new(model.volume.binding())
            .bounds(0.0..=1.0)
            .step(0.25)
            .label(constant(cx.renderer.text("Volume")))
            .on_editing_changed(|editing| info!(editing, "volume slider"))
            .render(cx);

        let reply = NavigationButton::titled("Reply", reply())
            .is_active(model.replying.binding())
            .render(cx);

        let confirm = model.confirm_delete.clone();
        let delete = cx
            .renderer
            .button(cx.renderer.text("Delete message"), Action::new(move || confirm.set(true)));

        let page = cx.renderer.group(vec![volume, reply, delete]);
        let deleted = model.deleted.clone();
        let alert = Alert::builder("Delete message?")
            .message("This can't be undone.")
            .primary_button(AlertButton::destructive("Delete", move || deleted.set(true)))
            .secondary_button(AlertButton::cancel("Cancel", || {}))
            .build();
        alert_with_style(cx, page, model.confirm_delete.binding(), alert)
    })
}

fn reply() -> Content<OutlineRenderer> {
    content(|cx: &mut RenderContext<'_, OutlineRenderer>| {
        cx.navigation_bar_title("Reply");
        let send = cx.renderer.text("Send");
        cx.navigation_bar_trailing_item(send);
        cx.renderer.text("Write your reply")
    })
}

/// Draws the bar as a plain header line above the content.
fn header_style(styles: Styles<OutlineRenderer>) -> Styles<OutlineRenderer> {
    styles.navigation_style(FnStyle::new(
        |renderer: &OutlineRenderer, configuration: NavigationStyleConfiguration<Outline>| {
            let title = configuration.title.as_deref().unwrap_or_default();
            let mut header = vec![renderer.text(&format!("== {title} =="))];
            if let Some(action) = configuration.back_action {
                let label = configuration
                    .previous_title
                    .as_deref()
                    .unwrap_or(BACK_LABEL);
                header.push(renderer.button(renderer.text(label), action));
            }
            header.push(configuration.content);
            renderer.group(header)
        },
    ))
}

struct Session {
    view: NavigationView<OutlineRenderer>,
    styles: Styles<OutlineRenderer>,
    outline: Outline,
}

impl Session {
    fn new(view: NavigationView<OutlineRenderer>, styles: Styles<OutlineRenderer>) -> Self {
        Session {
            view,
            styles,
            outline: Outline::Empty,
        }
    }

    /// Renders until the stack settles and prints the last outline.
    fn show(&mut self, step: &str) {
        let mut passes = 0;
        loop {
            let mut cx = RenderContext::new(&OutlineRenderer, &self.styles);
            self.outline = self.view.render(&mut cx);
            passes += 1;
            if !self.view.needs_render() {
                break;
            }
        }

        let depth = self.view.controller().depth();
        info!(step, depth, passes, "rendered");
        println!("-- {step} (depth {depth})");
        print!("{}", self.outline);
    }

    /// Taps the button labelled `label` and renders the result.
    fn tap(&mut self, label: &str) -> Result<(), Error> {
        ensure!(
            self.outline.activate(label),
            "no button labelled {label:?} on screen"
        );
        self.show(&format!("tap {label:?}"));
        Ok(())
    }

    /// Taps the back button of the navigation bar, whatever its label.
    fn tap_back(&mut self) -> Result<(), Error> {
        let label = match self.view.metadata().previous_title() {
            Some(title) => title.to_string(),
            None if self.view.controller().can_pop_up() => BACK_LABEL.to_string(),
            None => bail!("nothing to go back to"),
        };
        self.tap(&label)
    }
}

pub fn run(settings: &Settings, custom_style: bool) -> Result<(), Error> {
    let model = Model::default();
    let view = NavigationView::from_settings(inbox(model.clone()), &settings.navigation);
    let styles = if custom_style {
        header_style(Styles::new())
    } else {
        Styles::new()
    };
    let mut session = Session::new(view, styles);

    session.show("launch");
    session.tap("Open message")?;

    model.volume.set(0.6);
    info!(volume = model.volume.get(), "volume changed");
    session.show("volume");

    model.replying.set(true);
    session.show("reply link activated");
    ensure!(!model.replying.get(), "reply link should fire once");

    session.tap_back()?;
    session.tap("Delete message")?;
    session.tap("Cancel")?;
    ensure!(!model.deleted.get(), "cancel should keep the message");
    session.tap("Delete message")?;
    session.tap("Delete")?;
    ensure!(model.deleted.get(), "message should be deleted");

    session.view.controller().pop(PopDestination::Root);
    session.show("pop to root");
    info!(titles = ?session.view.title_history(), "session finished");

    Ok(())
}
