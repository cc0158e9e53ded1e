//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::value::VariantMap;

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Settings output produced by the dialog
    Settings(SettingsEvent),
    /// Dialog navigation and lifecycle
    Ui(UiEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Settings(_) => EventCategory::Settings,
            AppEvent::Ui(_) => EventCategory::Ui,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Settings(e) => e.description(),
            AppEvent::Ui(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Settings output events.
    Settings,
    /// User interface events.
    Ui,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Settings => write!(f, "Settings"),
            EventCategory::Ui => write!(f, "Ui"),
        }
    }
}

/// Notifications emitted after the dialog settings are applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// Every accepted setting, keyed by control name.
    SettingsData(VariantMap),
    /// Colon-joined video output options, or `dumb-mode`.
    VoCommandLine(String),
    /// Frame dropping mode label.
    FramedropMode(String),
    /// Decoder frame dropping mode label.
    DecoderDropMode(String),
    /// Display synchronisation mode label.
    DisplaySyncMode(String),
    /// Audio drop size used by display-sync modes.
    AudioDropSize(f64),
    /// Maximum audio speed change.
    MaximumAudioChange(f64),
    /// Maximum video speed change.
    MaximumVideoChange(f64),
    /// Whether subtitles are rendered in grayscale.
    SubsAreGray(bool),
}

impl SettingsEvent {
    fn description(&self) -> String {
        match self {
            SettingsEvent::SettingsData(map) => format!("Settings data ({} entries)", map.len()),
            SettingsEvent::VoCommandLine(cmd) => format!("VO command line: {}", cmd),
            SettingsEvent::FramedropMode(mode) => format!("Frame drop mode: {}", mode),
            SettingsEvent::DecoderDropMode(mode) => format!("Decoder drop mode: {}", mode),
            SettingsEvent::DisplaySyncMode(mode) => format!("Display sync mode: {}", mode),
            SettingsEvent::AudioDropSize(size) => format!("Audio drop size: {}", size),
            SettingsEvent::MaximumAudioChange(change) => {
                format!("Maximum audio change: {}", change)
            }
            SettingsEvent::MaximumVideoChange(change) => {
                format!("Maximum video change: {}", change)
            }
            SettingsEvent::SubsAreGray(gray) => format!("Grayscale subtitles: {}", gray),
        }
    }
}

/// Dialog navigation and lifecycle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    /// A settings page was selected.
    PageChanged {
        /// Index into the page stack.
        index: usize,
        /// Title of the selected page.
        title: String,
    },
    /// The dialog was closed.
    WindowClosed,
}

impl UiEvent {
    fn description(&self) -> String {
        match self {
            UiEvent::PageChanged { index, title } => format!("Page {} selected ({})", index, title),
            UiEvent::WindowClosed => "Settings window closed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_category() {
        let event = AppEvent::Settings(SettingsEvent::SubsAreGray(true));
        assert_eq!(event.category(), EventCategory::Settings);
        assert_eq!(AppEvent::Ui(UiEvent::WindowClosed).category(), EventCategory::Ui);
    }

    #[test]
    fn test_event_description() {
        let event = AppEvent::Settings(SettingsEvent::VoCommandLine("deband".to_string()));
        assert_eq!(event.description(), "VO command line: deband");

        let event = AppEvent::Ui(UiEvent::PageChanged {
            index: 4,
            title: "Video".to_string(),
        });
        assert_eq!(event.description(), "Page 4 selected (Video)");
    }

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::Settings(SettingsEvent::MaximumVideoChange(1.0));
        let json = serde_json::to_string(&event).expect("serializable");
        let back: AppEvent = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, event);
    }
}
