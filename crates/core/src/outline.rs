//! A headless renderer producing an inspectable view tree.
//!
//! [`OutlineRenderer`] stands in for a real rendering engine: every call
//! builds an [`Outline`] node. Outlines compare structurally, can find and
//! activate their buttons by label, and print as an indented tree.

use crate::binding::Binding;
use crate::color::Color;
use crate::view::action_sheet::ActionSheetStyleConfiguration;
use crate::view::alert::{AlertButton, AlertStyleConfiguration};
use crate::view::navigation::NavigationStyleConfiguration;
use crate::view::slider::SliderStyleConfiguration;
use crate::view::transition::Transition;
use crate::view::{Action, Content, Renderer};
use std::fmt;

pub const BACK_LABEL: &str = "Back";

#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Empty,
    Text(String),
    Group(Vec<Outline>),
    Identified {
        id: String,
        child: Box<Outline>,
    },
    Transition {
        transition: Transition,
        child: Box<Outline>,
    },
    Button {
        label: Box<Outline>,
        action: Action,
    },
    Link {
        label: Box<Outline>,
        is_active: Option<bool>,
    },
    Alert {
        title: String,
        message: Option<String>,
        buttons: Vec<Outline>,
        is_side_by_side: bool,
        content: Box<Outline>,
    },
    ActionSheet {
        title: String,
        message: Option<String>,
        buttons: Vec<Outline>,
        content: Box<Outline>,
    },
    Slider {
        value: f32,
        fraction: f32,
        label: Option<Box<Outline>>,
        minimum_value_label: Option<Box<Outline>>,
        maximum_value_label: Option<Box<Outline>>,
    },
    NavigationBar {
        title: Option<String>,
        back: Option<Box<Outline>>,
        leading: Option<Box<Outline>>,
        trailing: Option<Box<Outline>>,
        background: Option<Box<Outline>>,
        tint: Color,
        content: Box<Outline>,
    },
}

impl Outline {
    /// Direct children, in display order.
    pub fn children(&self) -> Vec<&Outline> {
        match self {
            Outline::Empty | Outline::Text(_) => Vec::new(),
            Outline::Group(children) => children.iter().collect(),
            Outline::Identified { child, .. } | Outline::Transition { child, .. } => {
                vec![&**child]
            }
            Outline::Button { label, .. } | Outline::Link { label, .. } => vec![&**label],
            Outline::Alert {
                buttons, content, ..
            }
            | Outline::ActionSheet {
                buttons, content, ..
            } => std::iter::once(&**content)
                .chain(buttons.iter())
                .collect(),
            Outline::Slider {
                label,
                minimum_value_label,
                maximum_value_label,
                ..
            } => [label, minimum_value_label, maximum_value_label]
                .into_iter()
                .flatten()
                .map(|child| &**child)
                .collect(),
            Outline::NavigationBar {
                back,
                leading,
                trailing,
                background,
                content,
                ..
            } => [background, back, leading, trailing]
                .into_iter()
                .flatten()
                .map(|child| &**child)
                .chain(std::iter::once(&**content))
                .collect(),
        }
    }

    /// Depth-first search, including `self`.
    pub fn find(&self, predicate: &impl Fn(&Outline) -> bool) -> Option<&Outline> {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find(predicate))
    }

    /// The first text in the tree.
    pub fn first_text(&self) -> Option<&str> {
        match self.find(&|node| matches!(node, Outline::Text(_))) {
            Some(Outline::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.find(&|node| matches!(node, Outline::Text(t) if t == text))
            .is_some()
    }

    pub fn contains_identified(&self, id: &str) -> bool {
        self.find(&|node| matches!(node, Outline::Identified { id: i, .. } if i == id))
            .is_some()
    }

    /// The outermost transition in the tree.
    pub fn transition(&self) -> Option<&Transition> {
        match self.find(&|node| matches!(node, Outline::Transition { .. })) {
            Some(Outline::Transition { transition, .. }) => Some(transition),
            _ => None,
        }
    }

    /// Action of the first button whose label reads `label`.
    pub fn find_button(&self, label: &str) -> Option<&Action> {
        let button = self.find(&|node| match node {
            Outline::Button { label: inner, .. } => inner.first_text() == Some(label),
            _ => false,
        });
        match button {
            Some(Outline::Button { action, .. }) => Some(action),
            _ => None,
        }
    }

    /// Performs the action of the button labelled `label`.
    ///
    /// Returns `false` when there is no such button.
    pub fn activate(&self, label: &str) -> bool {
        match self.find_button(label) {
            Some(action) => {
                action.perform();
                true
            }
            None => false,
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Outline::Empty => writeln!(f, "{indent}empty")?,
            Outline::Text(text) => writeln!(f, "{indent}text {text:?}")?,
            Outline::Group(_) => writeln!(f, "{indent}group")?,
            Outline::Identified { id, .. } => writeln!(f, "{indent}#{id}")?,
            Outline::Transition { transition, .. } => {
                writeln!(f, "{indent}transition {}", describe(transition))?
            }
            Outline::Button { .. } => writeln!(f, "{indent}button")?,
            Outline::Link { is_active, .. } => match is_active {
                Some(active) => writeln!(f, "{indent}link active={active}")?,
                None => writeln!(f, "{indent}link")?,
            },
            Outline::Alert {
                title,
                message,
                is_side_by_side,
                ..
            } => {
                write!(f, "{indent}alert {title:?}")?;
                if let Some(message) = message {
                    write!(f, " message={message:?}")?;
                }
                writeln!(f, " side-by-side={is_side_by_side}")?
            }
            Outline::ActionSheet { title, message, .. } => {
                write!(f, "{indent}action-sheet {title:?}")?;
                if let Some(message) = message {
                    write!(f, " message={message:?}")?;
                }
                writeln!(f)?
            }
            Outline::Slider {
                value, fraction, ..
            } => writeln!(f, "{indent}slider value={value} fraction={fraction:.2}")?,
            Outline::NavigationBar { title, tint, .. } => {
                write!(f, "{indent}navigation-bar")?;
                if let Some(title) = title {
                    write!(f, " {title:?}")?;
                }
                writeln!(f, " tint={tint}")?
            }
        }

        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Identity => "identity".to_string(),
        Transition::Opacity => "opacity".to_string(),
        Transition::Move { edge } => format!("move({edge:?})").to_lowercase(),
        Transition::Asymmetric { insertion, removal } => {
            format!("{} / {}", describe(insertion), describe(removal))
        }
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Renders into [`Outline`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineRenderer;

impl OutlineRenderer {
    /// A button that also dismisses the presentation it belongs to.
    fn dismissing_button(button: &AlertButton, is_presented: &Binding<bool>) -> Outline {
        let action = button.action.clone();
        let is_presented = is_presented.clone();
        Outline::Button {
            label: Box::new(Outline::Text(button.label.clone())),
            action: Action::new(move || {
                action.perform();
                is_presented.set(false);
            }),
        }
    }
}

impl Renderer for OutlineRenderer {
    type View = Outline;

    fn empty(&self) -> Outline {
        Outline::Empty
    }

    fn text(&self, text: &str) -> Outline {
        Outline::Text(text.to_string())
    }

    fn group(&self, children: Vec<Outline>) -> Outline {
        Outline::Group(children)
    }

    fn identified(&self, view: Outline, id: &str) -> Outline {
        Outline::Identified {
            id: id.to_string(),
            child: Box::new(view),
        }
    }

    fn transition(&self, view: Outline, transition: &Transition) -> Outline {
        Outline::Transition {
            transition: transition.clone(),
            child: Box::new(view),
        }
    }

    fn button(&self, label: Outline, action: Action) -> Outline {
        Outline::Button {
            label: Box::new(label),
            action,
        }
    }

    fn native_link(
        &self,
        label: Outline,
        _destination: Content<Self>,
        is_active: Option<Binding<bool>>,
    ) -> Outline {
        Outline::Link {
            label: Box::new(label),
            is_active: is_active.map(|flag| flag.get()),
        }
    }

    fn native_alert(&self, configuration: AlertStyleConfiguration<Outline>) -> Outline {
        if !configuration.is_presented() {
            return configuration.content;
        }

        let buttons = configuration
            .alert
            .buttons()
            .map(|button| Self::dismissing_button(button, &configuration.is_presented))
            .collect();
        let AlertStyleConfiguration { content, alert, .. } = configuration;
        Outline::Alert {
            title: alert.title,
            message: alert.message,
            buttons,
            is_side_by_side: alert.is_side_by_side,
            content: Box::new(content),
        }
    }

    fn native_action_sheet(&self, configuration: ActionSheetStyleConfiguration<Outline>) -> Outline {
        if !configuration.is_presented() {
            return configuration.content;
        }

        let buttons = configuration
            .action_sheet
            .buttons
            .iter()
            .map(|button| Self::dismissing_button(button, &configuration.is_presented))
            .collect();
        let ActionSheetStyleConfiguration {
            content,
            action_sheet,
            ..
        } = configuration;
        Outline::ActionSheet {
            title: action_sheet.title,
            message: action_sheet.message,
            buttons,
            content: Box::new(content),
        }
    }

    fn native_slider(&self, configuration: SliderStyleConfiguration<Outline>) -> Outline {
        let value = configuration.value();
        let fraction = configuration.fraction();
        Outline::Slider {
            value,
            fraction,
            label: configuration.label.map(Box::new),
            minimum_value_label: configuration.minimum_value_label.map(Box::new),
            maximum_value_label: configuration.maximum_value_label.map(Box::new),
        }
    }

    fn native_navigation(&self, configuration: NavigationStyleConfiguration<Outline>) -> Outline {
        let NavigationStyleConfiguration {
            content,
            bar_items,
            title,
            previous_title,
            background,
            tint_color,
            back_action,
        } = configuration;

        let back = back_action.map(|action| {
            let label = previous_title.unwrap_or_else(|| BACK_LABEL.to_string());
            Box::new(self.button(Outline::Text(label), action))
        });

        Outline::NavigationBar {
            title,
            back,
            leading: bar_items.leading.map(|item| Box::new(item.into_view())),
            trailing: bar_items.trailing.map(|item| Box::new(item.into_view())),
            background: background.map(|item| Box::new(item.into_view())),
            tint: tint_color,
            content: Box::new(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::transition::Edge;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_activate_finds_nested_button() {
        let taps = Rc::new(Cell::new(0));
        let counter = Rc::clone(&taps);
        let renderer = OutlineRenderer;
        let outline = renderer.group(vec![
            renderer.text("Header"),
            renderer.identified(
                renderer.button(
                    renderer.text("Go"),
                    Action::new(move || counter.set(counter.get() + 1)),
                ),
                "page",
            ),
        ]);

        assert!(outline.activate("Go"));
        assert!(!outline.activate("Stop"));
        assert_eq!(taps.get(), 1);
    }

    #[test]
    fn test_display_indents_children() {
        let renderer = OutlineRenderer;
        let outline = renderer.transition(
            renderer.identified(renderer.text("Hi"), "root"),
            &Transition::move_edge(Edge::Leading),
        );

        assert_eq!(
            outline.to_string(),
            "transition move(leading)\n  #root\n    text \"Hi\"\n"
        );
    }

    #[test]
    fn test_first_text_is_depth_first() {
        let renderer = OutlineRenderer;
        let outline = renderer.group(vec![
            renderer.group(vec![renderer.empty(), renderer.text("inner")]),
            renderer.text("outer"),
        ]);

        assert_eq!(outline.first_text(), Some("inner"));
        assert!(outline.contains_text("outer"));
    }
}
