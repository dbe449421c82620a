//! Metadata channels carried from the visible content up to its container.
//!
//! Each render pass of a [`NavigationView`](super::NavigationView) collects a
//! fresh [`Preferences`] from the subtree it is showing, so values emitted by
//! content that is no longer visible never reach the bar. [`MergedMetadata`]
//! then folds the collected values into what the bar displays.

use super::style::BarItems;
use crate::color::Color;
use crate::view::transition::Direction;
use crate::view::Tagged;
use tracing::trace;

/// A last-write-wins value slot.
#[derive(Debug, Clone)]
pub struct Channel<T> {
    value: Option<T>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Channel { value: None }
    }
}

impl<T> Channel<T> {
    pub fn emit(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

/// The four channels of one render pass.
#[derive(Debug, Clone)]
pub struct Preferences<V> {
    pub title: Channel<String>,
    pub bar_items: Channel<BarItems<V>>,
    pub background: Channel<Tagged<V>>,
    pub tint_color: Channel<Color>,
}

impl<V> Default for Preferences<V> {
    fn default() -> Self {
        Preferences {
            title: Channel::default(),
            bar_items: Channel::default(),
            background: Channel::default(),
            tint_color: Channel::default(),
        }
    }
}

impl<V> Preferences<V> {
    pub fn new() -> Self {
        Preferences::default()
    }
}

/// Bar metadata as the container shows it.
///
/// The title history holds one entry per frame below the visible one, so its
/// last entry is the title of the previous screen. History is only touched
/// when the visible content changes: going forward records the title that was
/// showing at its own depth, going backward truncates the history. Either way
/// the history is then sized to the new stack depth, frames that were never
/// shown getting an empty title.
#[derive(Debug, Clone)]
pub struct MergedMetadata<V> {
    visible: Option<String>,
    depth: usize,
    title: Option<String>,
    title_history: Vec<String>,
    bar_items: BarItems<V>,
    background: Option<Tagged<V>>,
    tint_color: Option<Color>,
}

impl<V> Default for MergedMetadata<V> {
    fn default() -> Self {
        MergedMetadata {
            visible: None,
            depth: 0,
            title: None,
            title_history: Vec::new(),
            bar_items: BarItems::default(),
            background: None,
            tint_color: None,
        }
    }
}

impl<V> MergedMetadata<V> {
    pub fn new() -> Self {
        MergedMetadata::default()
    }

    /// Folds the values collected while rendering `visible`.
    ///
    /// `direction` and `depth` describe the controller state that rendering
    /// observed.
    pub fn fold(
        &mut self,
        visible: &str,
        direction: Direction,
        depth: usize,
        mut preferences: Preferences<V>,
    ) {
        let previous = self.visible.replace(visible.to_string());
        let previous_depth = std::mem::replace(&mut self.depth, depth);
        let changed = previous.as_deref().is_some_and(|previous| previous != visible);

        if changed {
            if let Direction::Forward = direction {
                let title = self.title.take().unwrap_or_default();
                self.title_history.truncate(previous_depth);
                self.title_history.push(title);
            }
        }
        if changed || previous.is_none() {
            self.title_history.resize(depth, String::new());
        }

        self.title = preferences.title.take();
        self.bar_items = preferences.bar_items.take().unwrap_or_default();
        self.background = preferences.background.take();
        if let Some(color) = preferences.tint_color.take() {
            self.tint_color = Some(color);
        }

        trace!(
            visible,
            changed,
            title = ?self.title,
            history = self.title_history.len(),
            "folded navigation metadata"
        );
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_history(&self) -> &[String] {
        &self.title_history
    }

    /// Title of the screen below the visible one, if it had any.
    pub fn previous_title(&self) -> Option<&str> {
        self.title_history
            .last()
            .map(String::as_str)
            .filter(|title| !title.is_empty())
    }

    pub fn bar_items(&self) -> &BarItems<V> {
        &self.bar_items
    }

    pub fn background(&self) -> Option<&Tagged<V>> {
        self.background.as_ref()
    }

    /// The last tint any visible content emitted, or `default`.
    pub fn tint_color(&self, default: Color) -> Color {
        self.tint_color.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_TINT;

    fn titled(title: &str) -> Preferences<&'static str> {
        let mut preferences = Preferences::new();
        preferences.title.emit(title.to_string());
        preferences
    }

    #[test]
    fn test_channel_keeps_last_write() {
        let mut channel = Channel::default();
        channel.emit(1);
        channel.emit(2);

        assert_eq!(channel.value(), Some(&2));
        assert_eq!(channel.take(), Some(2));
        assert_eq!(channel.take(), None);
    }

    #[test]
    fn test_history_depth_follows_stack_depth() {
        let mut merged = MergedMetadata::new();
        merged.fold("root", Direction::Forward, 0, titled("Root"));
        assert!(merged.title_history().is_empty());

        for depth in 1..=4 {
            let id = format!("frame-{depth}");
            merged.fold(&id, Direction::Forward, depth, titled(&format!("Title {depth}")));
            assert_eq!(merged.title_history().len(), depth);
        }
        assert_eq!(merged.previous_title(), Some("Title 3"));

        merged.fold("frame-3", Direction::Backward, 3, titled("Title 3"));
        assert_eq!(merged.title_history().len(), 3);
        assert_eq!(merged.previous_title(), Some("Title 2"));

        merged.fold("frame-1", Direction::Backward, 1, titled("Title 1"));
        assert_eq!(merged.title_history(), ["Root".to_string()]);

        merged.fold("root", Direction::Backward, 0, titled("Root"));
        assert!(merged.title_history().is_empty());
        assert_eq!(merged.previous_title(), None);
    }

    #[test]
    fn test_history_is_padded_when_several_frames_appear_at_once() {
        let mut merged = MergedMetadata::new();
        merged.fold("root", Direction::Forward, 0, titled("Home"));

        merged.fold("B", Direction::Forward, 2, titled("B"));

        assert_eq!(merged.title_history(), ["Home".to_string(), String::new()]);
        assert_eq!(merged.previous_title(), None);

        merged.fold("C", Direction::Forward, 3, titled("C"));
        assert_eq!(merged.previous_title(), Some("B"));

        merged.fold("A", Direction::Backward, 1, titled("A"));
        assert_eq!(merged.title_history(), ["Home".to_string()]);
        assert_eq!(merged.previous_title(), Some("Home"));
    }

    #[test]
    fn test_first_fold_sizes_history_to_depth() {
        let mut merged = MergedMetadata::new();

        merged.fold("A", Direction::Forward, 1, titled("A"));

        assert_eq!(merged.title_history().len(), 1);
        assert_eq!(merged.previous_title(), None);
    }

    #[test]
    fn test_rerender_of_same_content_keeps_history() {
        let mut merged = MergedMetadata::new();
        merged.fold("root", Direction::Forward, 0, titled("Root"));
        merged.fold("A", Direction::Forward, 1, titled("A"));

        merged.fold("A", Direction::Forward, 1, titled("A, edited"));

        assert_eq!(merged.title(), Some("A, edited"));
        assert_eq!(merged.title_history(), ["Root".to_string()]);
    }

    #[test]
    fn test_untitled_screen_has_no_previous_title() {
        let mut merged = MergedMetadata::new();
        merged.fold("root", Direction::Forward, 0, Preferences::new());
        merged.fold("A", Direction::Forward, 1, titled("A"));

        assert_eq!(merged.title_history().len(), 1);
        assert_eq!(merged.previous_title(), None);
    }

    #[test]
    fn test_bar_items_reset_and_tint_is_sticky() {
        let mut merged = MergedMetadata::new();
        let mut first = Preferences::new();
        first.bar_items.emit(BarItems::new(None, Some("Edit")));
        first.tint_color.emit(Color::rgb(255, 0, 0));
        merged.fold("root", Direction::Forward, 0, first);

        assert!(merged.bar_items().trailing.is_some());
        assert_eq!(merged.tint_color(DEFAULT_TINT), Color::rgb(255, 0, 0));

        merged.fold("A", Direction::Forward, 1, Preferences::new());

        assert!(merged.bar_items().trailing.is_none());
        assert!(merged.background().is_none());
        assert_eq!(merged.tint_color(DEFAULT_TINT), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_tint_falls_back_to_default() {
        let mut merged: MergedMetadata<&str> = MergedMetadata::new();
        merged.fold("root", Direction::Forward, 0, Preferences::new());

        assert_eq!(merged.tint_color(DEFAULT_TINT), DEFAULT_TINT);
    }
}
