//! Styling and stack navigation for declarative view trees.
//!
//! The crate never draws anything. A host engine implements
//! [`view::Renderer`]; the crate composes the views it hands back, routes
//! alerts, action sheets, sliders and navigation through pluggable
//! [`view::style::Style`]s, and keeps the navigation stack of every
//! [`view::navigation::NavigationView`].

pub mod binding;
pub mod color;
pub mod helpers;
pub mod logging;
pub mod outline;
pub mod settings;
pub mod view;
