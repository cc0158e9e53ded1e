//! Notifier
//!
//! Derives the dialog's outputs from the accepted settings and publishes
//! them on the event bus. Publishing is one-way; nothing is returned to the
//! dialog.

use std::sync::Arc;

use vosettings_core::event_bus::{event_bus, AppEvent, EventBus, UiEvent};
use vosettings_core::{SettingsEvent, VariantMap};

use crate::command::CommandAssembler;
use crate::translator::OptionTranslator;

/// Everything emitted after an apply, in emission order
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSignals {
    pub vo_command_line: String,
    pub framedrop_mode: String,
    pub decoder_drop_mode: String,
    pub display_sync_mode: String,
    pub audio_drop_size: f64,
    pub maximum_audio_change: f64,
    pub maximum_video_change: f64,
    pub subs_are_gray: bool,
}

impl OutputSignals {
    /// Compute the outputs from the translator's accepted settings
    pub fn derive(assembler: &CommandAssembler, translator: &OptionTranslator<'_>) -> Self {
        let accepted = translator.accepted();
        Self {
            vo_command_line: assembler.assemble(translator),
            framedrop_mode: translator.text("framedroppingMode"),
            decoder_drop_mode: translator.text("framedroppingDecoderMode"),
            display_sync_mode: translator.text("syncMode"),
            audio_drop_size: accepted.value("syncAudioDropSize").to_double(),
            maximum_audio_change: accepted.value("syncMaxAudioChange").to_double(),
            maximum_video_change: accepted.value("syncMaxVideoChange").to_double(),
            subs_are_gray: accepted.value("subtitlesForceGrayscale").to_bool(),
        }
    }

    /// The outputs as events, in emission order
    pub fn events(&self) -> Vec<SettingsEvent> {
        vec![
            SettingsEvent::VoCommandLine(self.vo_command_line.clone()),
            SettingsEvent::FramedropMode(self.framedrop_mode.clone()),
            SettingsEvent::DecoderDropMode(self.decoder_drop_mode.clone()),
            SettingsEvent::DisplaySyncMode(self.display_sync_mode.clone()),
            SettingsEvent::AudioDropSize(self.audio_drop_size),
            SettingsEvent::MaximumAudioChange(self.maximum_audio_change),
            SettingsEvent::MaximumVideoChange(self.maximum_video_change),
            SettingsEvent::SubsAreGray(self.subs_are_gray),
        ]
    }
}

#[derive(Debug, Clone)]
enum BusHandle {
    Global,
    Owned(Arc<EventBus>),
}

/// Publishes dialog output on an event bus
#[derive(Debug, Clone)]
pub struct Notifier {
    bus: BusHandle,
}

impl Notifier {
    /// Publish on the process-wide bus
    pub fn global() -> Self {
        Self {
            bus: BusHandle::Global,
        }
    }

    /// Publish on a caller-supplied bus
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus: BusHandle::Owned(bus),
        }
    }

    pub fn bus(&self) -> &EventBus {
        match &self.bus {
            BusHandle::Global => event_bus(),
            BusHandle::Owned(bus) => bus,
        }
    }

    /// Publish one event. Having no listeners is not an error here.
    pub fn publish(&self, event: AppEvent) {
        if self.bus().publish(&event) == 0 {
            tracing::trace!("No listeners for {}", event.description());
        }
    }

    /// Publish the full accepted settings
    pub fn settings_data(&self, data: VariantMap) {
        self.publish(AppEvent::Settings(SettingsEvent::SettingsData(data)));
    }

    /// Publish every derived output
    pub fn emit_signals(&self, signals: &OutputSignals) {
        tracing::debug!("VO command line: {}", signals.vo_command_line);
        for event in signals.events() {
            self.publish(AppEvent::Settings(event));
        }
    }

    /// Publish a dialog navigation/lifecycle event
    pub fn ui(&self, event: UiEvent) {
        self.publish(AppEvent::Ui(event));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::global()
    }
}
