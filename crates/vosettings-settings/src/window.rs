//! Settings window controller
//!
//! Owns the widget tree, the startup and accepted setting maps and the
//! command assembler, and reacts to the dialog's buttons, page tree and
//! dependent widgets.

use std::rc::Rc;

use vosettings_core::{SettingValue, Shared, UiEvent, VariantMap};

use crate::command::{CommandAssembler, DUMB_MODE_CONTROL};
use crate::form::{default_form, resolve_page, PageSelection};
use crate::notifier::{Notifier, OutputSignals};
use crate::options::OptionTables;
use crate::registry::ControlRegistry;
use crate::setting::SettingMap;
use crate::translator::OptionTranslator;
use crate::widget::{Node, Panel, SharedControl};

/// Stacked and tabbed containers reset to their first page on open
pub const STACKED_CONTAINERS: [&str; 5] = [
    "pageStack",
    "videoTabs",
    "scalingTabs",
    "prescalarStack",
    "audioRendererStack",
];

/// Role of a dialog button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Apply,
    Accept,
    Reject,
}

impl ButtonRole {
    fn applies(self) -> bool {
        matches!(self, ButtonRole::Apply | ButtonRole::Accept)
    }

    fn closes(self) -> bool {
        matches!(self, ButtonRole::Accept | ButtonRole::Reject)
    }
}

/// Format the page heading shown above the stack
pub fn page_heading(title: &str) -> String {
    format!("<big><b>{}</b></big>", title)
}

/// Headless settings dialog
pub struct SettingsWindow {
    root: Node,
    tables: Rc<OptionTables>,
    assembler: CommandAssembler,
    notifier: Notifier,
    defaults: SettingMap,
    accepted: SettingMap,
    visible: bool,
}

impl SettingsWindow {
    /// Capture startup values from `root` and reset the stacked containers
    pub fn new(root: Node, tables: Rc<OptionTables>, notifier: Notifier) -> Self {
        let defaults = ControlRegistry::scan(&root);
        let accepted = defaults.clone();
        tracing::debug!("Settings window created with {} controls", defaults.len());

        let window = Self {
            root,
            tables,
            assembler: CommandAssembler::new(),
            notifier,
            defaults,
            accepted,
            visible: true,
        };
        for name in STACKED_CONTAINERS {
            window.set_current_index(name, 0);
        }
        window
    }

    /// The window over the built-in form
    pub fn with_default_form(tables: Rc<OptionTables>, notifier: Notifier) -> Self {
        let root = default_form(&tables);
        Self::new(root, tables, notifier)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn tables(&self) -> &OptionTables {
        &self.tables
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Values captured when the window was built
    pub fn defaults(&self) -> &SettingMap {
        &self.defaults
    }

    /// Values taken at the last apply or import
    pub fn accepted(&self) -> &SettingMap {
        &self.accepted
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Look up a control by name
    pub fn control(&self, name: &str) -> Option<SharedControl> {
        self.root.find_control(name)
    }

    /// Look up a container's state by name
    pub fn panel(&self, name: &str) -> Option<Shared<Panel>> {
        self.root.find_panel(name)
    }

    /// Change a control as the user would, updating dependent widgets.
    /// Returns false if no such control exists.
    pub fn set_control_value(&self, name: &str, value: impl Into<SettingValue>) -> bool {
        let Some(control) = self.control(name) else {
            tracing::warn!("No control named {}", name);
            return false;
        };
        control.borrow_mut().set_value(&value.into());
        self.sync_dependent_widgets();
        true
    }

    /// Rescan the form into the accepted settings
    pub fn update_accepted_settings(&mut self) {
        self.accepted = ControlRegistry::scan(&self.root);
        tracing::debug!("Accepted {} settings", self.accepted.len());
    }

    /// Import externally stored values and show them in the form.
    /// Returns how many values were applied.
    pub fn take_settings(&mut self, payload: &VariantMap) -> usize {
        let applied = self.accepted.import(payload);
        if applied < payload.len() {
            tracing::debug!(
                "Ignored {} unknown settings",
                payload.len() - applied
            );
        }
        self.accepted.send_all_to_controls();
        self.sync_dependent_widgets();
        applied
    }

    /// Translator over the accepted and startup values
    pub fn translator(&self) -> OptionTranslator<'_> {
        OptionTranslator::new(&self.tables, &self.accepted, &self.defaults)
    }

    /// The video output command for the accepted settings
    pub fn command_line(&self) -> String {
        self.assembler.assemble(&self.translator())
    }

    /// Derive every output without publishing
    pub fn signals(&self) -> OutputSignals {
        OutputSignals::derive(&self.assembler, &self.translator())
    }

    /// Derive and publish every output
    pub fn send_signals(&self) -> OutputSignals {
        let signals = self.signals();
        self.notifier.emit_signals(&signals);
        signals
    }

    /// Handle a click on one of the dialog buttons
    pub fn on_button_clicked(&mut self, role: ButtonRole) {
        tracing::debug!("Button clicked: {:?}", role);
        if role.applies() {
            self.update_accepted_settings();
            self.notifier.settings_data(self.accepted.export());
            self.send_signals();
        }
        if role.closes() {
            self.close();
        }
    }

    /// Hide the window
    pub fn close(&mut self) {
        self.visible = false;
        self.notifier.ui(UiEvent::WindowClosed);
    }

    /// Show the page picked in the page tree. Unknown rows are ignored.
    pub fn select_page(&mut self, selection: PageSelection) -> Option<usize> {
        let Some((index, title)) = resolve_page(selection) else {
            tracing::debug!("Ignoring page selection {:?}", selection);
            return None;
        };
        self.set_current_index("pageStack", index);
        if let Some(label) = self.panel("pageLabel") {
            label.borrow_mut().text = page_heading(title);
        }
        self.notifier.ui(UiEvent::PageChanged {
            index,
            title: title.to_string(),
        });
        Some(index)
    }

    pub fn on_prescalar_method_changed(&self, index: i64) {
        self.set_current_index("prescalarStack", index.max(0) as usize);
    }

    pub fn on_audio_renderer_changed(&self, index: i64) {
        self.set_current_index("audioRendererStack", index.max(0) as usize);
    }

    /// Dumb mode disables every video tab
    pub fn on_video_dumb_mode_toggled(&self, checked: bool) {
        if let Some(panel) = self.panel("videoTabs") {
            panel.borrow_mut().enabled = !checked;
        }
    }

    fn sync_dependent_widgets(&self) {
        let value = |name: &str| {
            self.control(name)
                .map(|control| control.borrow().value())
                .unwrap_or_default()
        };
        self.on_video_dumb_mode_toggled(value(DUMB_MODE_CONTROL).to_bool());
        self.on_prescalar_method_changed(value("prescalarMethod").to_int());
        self.on_audio_renderer_changed(value("audioRenderer").to_int());
    }

    fn set_current_index(&self, name: &str, index: usize) {
        match self.panel(name) {
            Some(panel) => panel.borrow_mut().current_index = index,
            None => tracing::warn!("No container named {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use vosettings_core::event_bus::{AppEvent, EventBus, EventFilter};
    use vosettings_core::SettingsEvent;

    fn window() -> (SettingsWindow, Arc<Mutex<Vec<AppEvent>>>) {
        let bus = Arc::new(EventBus::new());
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        bus.subscribe(EventFilter::All, move |event| sink.lock().push(event.clone()));
        let window = SettingsWindow::with_default_form(
            Rc::new(OptionTables::builtin()),
            Notifier::new(bus),
        );
        (window, received)
    }

    fn current_index(window: &SettingsWindow, name: &str) -> usize {
        window.panel(name).expect(name).borrow().current_index
    }

    #[test]
    fn test_new_captures_defaults() {
        let (window, _) = window();
        assert!(window.is_visible());
        assert_eq!(window.defaults().len(), window.accepted().len());
        assert_eq!(window.accepted().value("scaleScalar"), &SettingValue::Int(4));
        for name in STACKED_CONTAINERS {
            assert_eq!(current_index(&window, name), 0);
        }
    }

    #[test]
    fn test_apply_publishes_data_then_signals() {
        let (mut window, received) = window();
        window.set_control_value("syncMode", 1);
        window.on_button_clicked(ButtonRole::Apply);

        assert!(window.is_visible());
        let events = received.lock();
        assert_eq!(events.len(), 9);
        assert!(matches!(
            &events[0],
            AppEvent::Settings(SettingsEvent::SettingsData(data)) if data.get("syncMode") == Some(&SettingValue::Int(1))
        ));
        assert_eq!(
            events[4],
            AppEvent::Settings(SettingsEvent::DisplaySyncMode("display-resample".into()))
        );
    }

    #[test]
    fn test_accept_applies_and_closes() {
        let (mut window, received) = window();
        window.on_button_clicked(ButtonRole::Accept);
        assert!(!window.is_visible());
        let events = received.lock();
        assert_eq!(events.len(), 10);
        assert_eq!(events.last(), Some(&AppEvent::Ui(UiEvent::WindowClosed)));
    }

    #[test]
    fn test_reject_discards_changes() {
        let (mut window, received) = window();
        window.set_control_value("syncMode", 3);
        window.on_button_clicked(ButtonRole::Reject);
        assert!(!window.is_visible());
        assert_eq!(window.accepted().value("syncMode"), &SettingValue::Int(0));
        assert_eq!(*received.lock(), vec![AppEvent::Ui(UiEvent::WindowClosed)]);
    }

    #[test]
    fn test_select_page() {
        let (mut window, received) = window();
        assert_eq!(window.select_page(PageSelection::top(2)), Some(9));
        assert_eq!(current_index(&window, "pageStack"), 9);
        assert_eq!(
            window.panel("pageLabel").expect("label").borrow().text,
            "<big><b>Audio</b></big>"
        );

        assert_eq!(window.select_page(PageSelection::child(1, 3)), Some(8));
        assert_eq!(window.select_page(PageSelection::child(1, 7)), None);
        assert_eq!(current_index(&window, "pageStack"), 8);
        assert_eq!(
            received.lock().last(),
            Some(&AppEvent::Ui(UiEvent::PageChanged {
                index: 8,
                title: "Shaders".into()
            }))
        );
    }

    #[test]
    fn test_dependent_widgets_follow_controls() {
        let (window, _) = window();
        window.set_control_value("prescalarMethod", 2);
        window.set_control_value("audioRenderer", 1);
        window.set_control_value("videoDumbMode", true);
        assert_eq!(current_index(&window, "prescalarStack"), 2);
        assert_eq!(current_index(&window, "audioRendererStack"), 1);
        assert!(!window.panel("videoTabs").expect("tabs").borrow().enabled);

        window.on_video_dumb_mode_toggled(false);
        assert!(window.panel("videoTabs").expect("tabs").borrow().enabled);
        assert!(!window.set_control_value("noSuchControl", 1));
    }

    #[test]
    fn test_take_settings_updates_form() {
        let (mut window, _) = window();
        let mut payload = VariantMap::new();
        payload.insert("debandEnabled".into(), SettingValue::Bool(true));
        payload.insert("audioRenderer".into(), SettingValue::Int(2));
        payload.insert("unknownSetting".into(), SettingValue::Int(7));

        assert_eq!(window.take_settings(&payload), 2);
        assert!(!window.accepted().contains("unknownSetting"));
        let control = window.control("debandEnabled").expect("control");
        assert_eq!(control.borrow().value(), SettingValue::Bool(true));
        assert_eq!(current_index(&window, "audioRendererStack"), 2);
    }
}
