//! # vosettings Core
//!
//! Core types and utilities shared by the vosettings crates.
//! Provides the dynamically-typed setting value, the shared-ownership
//! aliases used by the headless control model, and the application
//! event bus that carries dialog notifications to listeners.

pub mod event_bus;
pub mod types;
pub mod value;

pub use value::{SettingValue, VariantMap};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, EventBus, EventCategory, EventFilter, SettingsEvent, SubscriptionId,
    UiEvent,
};

pub use types::{shared, Shared, SharedVec, WeakShared};
