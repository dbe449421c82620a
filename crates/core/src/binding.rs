//! Shared state and two-way bindings.
//!
//! A [`State`] owns a value on the single render/update timeline. A [`Binding`]
//! is a get/set pair that reads and writes some source of truth without owning
//! it, so a presentation flag or a selection can be handed to a style or a
//! trigger and written back from there.
//!
//! ```
//! use veneer_core::binding::State;
//!
//! let selection = State::new(None::<u32>);
//! let is_active = selection.binding().map(|s| *s == Some(3), |_, active| {
//!     if active { None } else { Some(0) }
//! });
//! assert!(!is_active.get());
//! selection.set(Some(3));
//! assert!(is_active.get());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Mutable value shared between a view and the bindings derived from it.
pub struct State<T> {
    value: Rc<RefCell<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        State {
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&self.value.borrow()).finish()
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        State::new(T::default())
    }
}

impl<T> State<T> {
    pub fn new(value: T) -> Self {
        State {
            value: Rc::new(RefCell::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    /// Runs `f` against a shared reference to the current value.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.value.borrow())
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
    }
}

impl<T: Clone> State<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: Clone + 'static> State<T> {
    /// Returns a binding that reads and writes this state.
    pub fn binding(&self) -> Binding<T> {
        let getter = self.clone();
        let setter = self.clone();
        Binding::from_fn(move || getter.get(), move |value| setter.set(value))
    }
}

/// A read/write view over a value owned elsewhere.
pub struct Binding<T> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Binding {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&(self.get)()).finish()
    }
}

impl<T: 'static> Binding<T> {
    pub fn from_fn(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Binding {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, value: T) {
        (self.set)(value)
    }

    /// Derives a binding of another type.
    ///
    /// `read` projects the current source value, `write` computes the new
    /// source value from the current one and the written value.
    pub fn map<U: 'static>(
        &self,
        read: impl Fn(&T) -> U + 'static,
        write: impl Fn(&T, U) -> T + 'static,
    ) -> Binding<U> {
        let source = self.clone();
        let target = self.clone();
        Binding::from_fn(
            move || read(&source.get()),
            move |value| {
                let current = target.get();
                target.set(write(&current, value));
            },
        )
    }
}

impl<T: Clone + 'static> Binding<T> {
    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: T) -> Self {
        Binding::from_fn(move || value.clone(), |_| {})
    }
}

impl<T: PartialEq + Clone + 'static> Binding<Option<T>> {
    /// Boolean view of a selection: `true` while the selection equals `tag`.
    ///
    /// Writing `true` selects `tag`. Writing `false` clears the selection
    /// only if it is still `tag`.
    pub fn selects(&self, tag: T) -> Binding<bool> {
        let read_tag = tag.clone();
        self.map(
            move |selection| selection.as_ref() == Some(&read_tag),
            move |current, active| match (active, current) {
                (true, _) => Some(tag.clone()),
                (false, Some(selected)) if *selected == tag => None,
                (false, current) => current.clone(),
            },
        )
    }
}

impl<T: Clone + 'static> Binding<Option<T>> {
    /// Boolean view of an optional item: `true` while an item is present.
    ///
    /// Writing `false` clears the item, writing `true` leaves it untouched.
    pub fn is_some(&self) -> Binding<bool> {
        self.map(
            Option::is_some,
            |current, present| if present { current.clone() } else { None },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_writes_through_to_state() {
        let state = State::new(false);
        let binding = state.binding();

        binding.set(true);

        assert!(state.get());
        assert!(binding.get());
    }

    #[test]
    fn test_constant_binding_ignores_writes() {
        let binding = Binding::constant(4);
        binding.set(9);
        assert_eq!(binding.get(), 4);
    }

    #[test]
    fn test_selects_clears_selection_on_false() {
        let selection = State::new(Some("settings"));
        let active = selection.binding().selects("settings");
        let other = selection.binding().selects("profile");

        assert!(active.get());
        assert!(!other.get());

        other.set(false);
        assert_eq!(selection.get(), Some("settings"));

        active.set(false);
        assert_eq!(selection.get(), None);

        other.set(true);
        assert_eq!(selection.get(), Some("profile"));
    }

    #[test]
    fn test_is_some_only_clears() {
        let item = State::new(Some(7));
        let presented = item.binding().is_some();

        presented.set(true);
        assert_eq!(item.get(), Some(7));

        presented.set(false);
        assert_eq!(item.get(), None);
        assert!(!presented.get());
    }
}
