//! Declarative transitions attached to navigation content.
//!
//! The core only decides *which* transition applies; animating it is the
//! renderer's job.

use serde::{Deserialize, Serialize};

/// Edge of the container a view moves from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    Leading,
    Trailing,
    Top,
    Bottom,
}

/// A transition applied when a view is inserted into or removed from the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Transition {
    /// No visual change.
    Identity,
    /// Fade in and out.
    Opacity,
    /// Slide from/to the given edge.
    Move { edge: Edge },
    /// Different transitions for insertion and removal.
    Asymmetric {
        insertion: Box<Transition>,
        removal: Box<Transition>,
    },
}

impl Transition {
    pub fn move_edge(edge: Edge) -> Transition {
        Transition::Move { edge }
    }

    pub fn asymmetric(insertion: Transition, removal: Transition) -> Transition {
        Transition::Asymmetric {
            insertion: Box::new(insertion),
            removal: Box::new(removal),
        }
    }

    /// Slide in from the trailing edge, out to the leading edge.
    pub fn push() -> Transition {
        Transition::asymmetric(
            Transition::move_edge(Edge::Trailing),
            Transition::move_edge(Edge::Leading),
        )
    }

    /// Mirror of [`Transition::push`].
    pub fn pop() -> Transition {
        Transition::asymmetric(
            Transition::move_edge(Edge::Leading),
            Transition::move_edge(Edge::Trailing),
        )
    }
}

/// Direction of the most recent navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Pair of transitions a navigation container picks from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transitions {
    pub push: Transition,
    pub pop: Transition,
}

impl Default for Transitions {
    fn default() -> Self {
        Transitions {
            push: Transition::push(),
            pop: Transition::pop(),
        }
    }
}

impl Transitions {
    pub fn for_direction(&self, direction: Direction) -> &Transition {
        match direction {
            Direction::Forward => &self.push,
            Direction::Backward => &self.pop,
        }
    }
}
