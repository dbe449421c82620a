use super::stack::{Frame, Stack, StackError};
use crate::view::transition::Direction;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

/// Where a pop goes back to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopDestination {
    /// The frame below the top one.
    #[default]
    Previous,
    /// The root content.
    Root,
    /// The frame with this id, which becomes the top.
    View(String),
}

/// A navigation request queued during a render pass.
pub enum NavigationEvent<C> {
    Push { content: C, id: String },
    Pop(PopDestination),
}

impl<C> fmt::Debug for NavigationEvent<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationEvent::Push { id, .. } => f.debug_struct("Push").field("id", id).finish(),
            NavigationEvent::Pop(destination) => f.debug_tuple("Pop").field(destination).finish(),
        }
    }
}

/// What observers receive after every mutation.
#[derive(Debug, Clone)]
pub struct TopChange<C> {
    pub direction: Direction,
    pub top: Option<Frame<C>>,
    pub depth: usize,
}

/// Handle returned by [`NavigationController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer<C> = Rc<dyn Fn(&TopChange<C>)>;

struct Inner<C> {
    stack: Stack<C>,
    direction: Direction,
    current_top: Option<Frame<C>>,
    observers: Vec<(Subscription, Observer<C>)>,
    next_subscription: u64,
}

/// Owns the navigation [`Stack`] of one container.
///
/// The controller is the single source of truth for what is visible. It is a
/// cheap handle: clones share the same state, so nested triggers can request
/// pushes while the container keeps ownership. All access happens on the
/// render/update timeline and the handle is `!Send`.
///
/// Every mutation sets the direction first, then changes the stack, refreshes
/// the `current_top` mirror, and only then notifies observers, so observers
/// always see a consistent `(direction, top)` pair.
pub struct NavigationController<C> {
    inner: Rc<RefCell<Inner<C>>>,
}

impl<C> Clone for NavigationController<C> {
    fn clone(&self) -> Self {
        NavigationController {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for NavigationController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("NavigationController")
            .field("stack", &inner.stack)
            .field("direction", &inner.direction)
            .finish()
    }
}

impl<C: Clone> Default for NavigationController<C> {
    fn default() -> Self {
        NavigationController::new()
    }
}

impl<C: Clone> NavigationController<C> {
    pub fn new() -> Self {
        NavigationController {
            inner: Rc::new(RefCell::new(Inner {
                stack: Stack::new(),
                direction: Direction::Forward,
                current_top: None,
                observers: Vec::new(),
                next_subscription: 0,
            })),
        }
    }

    /// Generates a fresh, globally unique frame id.
    pub fn generate_id() -> String {
        Uuid::now_v7().to_string()
    }

    /// Pushes `content`, returning the id of the new frame.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already on the stack.
    pub fn push(&self, content: C, id: Option<String>) -> String {
        match self.try_push(content, id) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Pushes `content`, reporting a duplicate id instead of panicking.
    ///
    /// On error neither the stack nor the direction change.
    pub fn try_push(&self, content: C, id: Option<String>) -> Result<String, StackError> {
        let id = id.unwrap_or_else(Self::generate_id);

        let change = {
            let mut inner = self.inner.borrow_mut();
            let previous_direction = inner.direction;
            inner.direction = Direction::Forward;

            if let Err(err) = inner.stack.try_push(Frame::new(id.clone(), content)) {
                inner.direction = previous_direction;
                return Err(err);
            }

            debug!(id = %id, depth = inner.stack.len(), "pushed frame");
            inner.publish()
        };

        self.notify(&change);
        Ok(id)
    }

    /// # Panics
    ///
    /// Panics when popping to an id that is not on the stack.
    pub fn pop(&self, destination: PopDestination) {
        if let Err(err) = self.try_pop(destination) {
            panic!("{err}");
        }
    }

    /// Pops, reporting a missing id instead of panicking.
    ///
    /// On error neither the stack nor the direction change.
    pub fn try_pop(&self, destination: PopDestination) -> Result<(), StackError> {
        let change = {
            let mut inner = self.inner.borrow_mut();
            let previous_direction = inner.direction;
            inner.direction = Direction::Backward;

            let removed = match &destination {
                PopDestination::Previous => inner.stack.pop_to_previous().into_iter().count(),
                PopDestination::Root => inner.stack.pop_to_root().len(),
                PopDestination::View(id) => match inner.stack.try_pop_to(id) {
                    Ok(removed) => removed.len(),
                    Err(err) => {
                        inner.direction = previous_direction;
                        return Err(err);
                    }
                },
            };

            debug!(
                destination = ?destination,
                removed,
                depth = inner.stack.len(),
                "popped frames"
            );
            inner.publish()
        };

        self.notify(&change);
        Ok(())
    }

    /// Applies a request queued during a render pass.
    pub fn apply(&self, event: NavigationEvent<C>) {
        match event {
            NavigationEvent::Push { content, id } => {
                self.push(content, Some(id));
            }
            NavigationEvent::Pop(destination) => self.pop(destination),
        }
    }

    /// `true` iff there is a frame to pop.
    pub fn can_pop_up(&self) -> bool {
        !self.inner.borrow().stack.is_empty()
    }

    pub fn current_top(&self) -> Option<Frame<C>> {
        self.inner.borrow().current_top.clone()
    }

    /// Direction of the last mutating operation.
    pub fn direction(&self) -> Direction {
        self.inner.borrow().direction
    }

    pub fn depth(&self) -> usize {
        self.inner.borrow().stack.len()
    }

    /// Ids of all frames, oldest first.
    pub fn frame_ids(&self) -> Vec<String> {
        self.inner
            .borrow()
            .stack
            .frames()
            .iter()
            .map(|frame| frame.id().to_string())
            .collect()
    }

    /// Direction, top and depth read under a single borrow.
    pub fn snapshot(&self) -> TopChange<C> {
        self.inner.borrow().snapshot()
    }

    /// Registers `observer`, called synchronously after every mutation.
    ///
    /// Observers may read the controller; they run after its state is final.
    pub fn subscribe(&self, observer: impl Fn(&TopChange<C>) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let subscription = Subscription(inner.next_subscription);
        inner.next_subscription += 1;
        inner.observers.push((subscription, Rc::new(observer)));
        subscription
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .borrow_mut()
            .observers
            .retain(|(registered, _)| *registered != subscription);
    }

    fn notify(&self, change: &TopChange<C>) {
        let observers: Vec<Observer<C>> = self
            .inner
            .borrow()
            .observers
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();

        for observer in observers {
            observer(change);
        }
    }
}

impl<C: Clone> Inner<C> {
    fn publish(&mut self) -> TopChange<C> {
        self.current_top = self.stack.peek().cloned();
        self.snapshot()
    }

    fn snapshot(&self) -> TopChange<C> {
        TopChange {
            direction: self.direction,
            top: self.current_top.clone(),
            depth: self.stack.len(),
        }
    }
}
