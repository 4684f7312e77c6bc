//! Controller layer: UI events, store-driven view state, and command orchestration.

pub mod directory;
pub mod events;
pub mod modal;
pub mod notifications;
pub mod orchestration;
pub mod view;
