//! # Event Bus Module
//!
//! Provides the event bus used to notify listeners of dialog output.
//!
//! ## Overview
//!
//! - The settings dialog publishes typed events without knowing who listens
//! - Subscribers filter by category and are called synchronously, in
//!   subscription order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vosettings_core::event_bus::{event_bus, AppEvent, EventCategory, EventFilter, SettingsEvent};
//!
//! let subscription = event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Settings]),
//!     |event| {
//!         if let AppEvent::Settings(SettingsEvent::VoCommandLine(cmd)) = event {
//!             println!("vo options: {}", cmd);
//!         }
//!     },
//! );
//!
//! event_bus().publish(&AppEvent::Settings(SettingsEvent::SubsAreGray(true)));
//!
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
