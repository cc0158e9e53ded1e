//! Settings and the setting map
//!
//! A [`Setting`] mirrors one control: its name, a non-owning reference to
//! the control, and the last value read from (or pushed to) it. A
//! [`SettingMap`] keeps settings in discovery order with lookup by name.

use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use std::cell::RefCell;
use vosettings_core::{SettingValue, VariantMap};

use crate::control::Control;
use crate::widget::SharedControl;

/// Non-owning reference to a control in the widget tree
#[derive(Clone, Default)]
pub struct ControlRef(Option<Weak<RefCell<dyn Control>>>);

impl ControlRef {
    /// Reference a control without keeping it alive
    pub fn new(control: &SharedControl) -> Self {
        Self(Some(Rc::downgrade(control)))
    }

    /// A reference to nothing
    pub fn detached() -> Self {
        Self(None)
    }

    /// The control, if it still exists
    pub fn upgrade(&self) -> Option<SharedControl> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    /// Whether both references point at the same control
    pub fn ptr_eq(&self, other: &ControlRef) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ControlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(control) => write!(f, "ControlRef({})", control.borrow().kind()),
            None => write!(f, "ControlRef(<detached>)"),
        }
    }
}

/// One control's mirrored state
#[derive(Debug, Clone)]
pub struct Setting {
    pub name: String,
    pub control: ControlRef,
    pub value: SettingValue,
}

impl Setting {
    pub fn new(name: impl Into<String>, control: ControlRef, value: SettingValue) -> Self {
        Self {
            name: name.into(),
            control,
            value,
        }
    }

    /// Capture a control's current value
    pub fn from_control(control: &SharedControl) -> Self {
        let (name, value) = {
            let c = control.borrow();
            (c.name().to_string(), c.value())
        };
        Self::new(name, ControlRef::new(control), value)
    }

    /// Write the stored value into the control.
    ///
    /// A dropped control, or one whose kind has no value property, is left
    /// untouched.
    pub fn send_to_control(&self) {
        let Some(control) = self.control.upgrade() else {
            tracing::trace!("Setting {} has no live control", self.name);
            return;
        };
        let mut control = control.borrow_mut();
        if control.kind().value_property().is_none() {
            tracing::trace!("Control {} ({}) has no value property", self.name, control.kind());
            return;
        }
        control.set_value(&self.value);
    }

    /// Read the control's current value into this setting.
    ///
    /// Same no-op rules as [`Setting::send_to_control`].
    pub fn fetch_from_control(&mut self) {
        let Some(control) = self.control.upgrade() else {
            tracing::trace!("Setting {} has no live control", self.name);
            return;
        };
        let control = control.borrow();
        if control.kind().value_property().is_none() {
            tracing::trace!("Control {} ({}) has no value property", self.name, control.kind());
            return;
        }
        self.value = control.value();
    }
}

/// Settings keyed by name, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct SettingMap {
    entries: Vec<Setting>,
    index: HashMap<String, usize>,
}

impl SettingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a setting. An existing entry with the same name is replaced in
    /// place, keeping its position.
    pub fn insert(&mut self, setting: Setting) {
        match self.index.get(&setting.name) {
            Some(&position) => self.entries[position] = setting,
            None => {
                self.index.insert(setting.name.clone(), self.entries.len());
                self.entries.push(setting);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.index.get(name).map(|&i| &mut self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The stored value for `name`, or [`SettingValue::Invalid`]
    pub fn value(&self, name: &str) -> &SettingValue {
        const INVALID: &SettingValue = &SettingValue::Invalid;
        self.get(name).map(|s| &s.value).unwrap_or(INVALID)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Settings in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.entries.iter()
    }

    /// Setting names in discovery order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name.as_str())
    }

    /// Flatten into a name-to-value map
    pub fn export(&self) -> VariantMap {
        self.entries
            .iter()
            .map(|s| (s.name.clone(), s.value.clone()))
            .collect()
    }

    /// Overwrite the values of known settings from `values`.
    ///
    /// Keys that are not already in the map are dropped, so an external
    /// payload can never introduce new settings. Returns how many values
    /// were applied.
    pub fn import(&mut self, values: &VariantMap) -> usize {
        let mut applied = 0;
        for (name, value) in values {
            match self.get_mut(name) {
                Some(setting) => {
                    setting.value = value.clone();
                    applied += 1;
                }
                None => tracing::debug!("Ignoring unknown setting '{}'", name),
            }
        }
        applied
    }

    /// Push every stored value onto its control
    pub fn send_all_to_controls(&self) {
        for setting in &self.entries {
            setting.send_to_control();
        }
    }

    /// Re-read every control into its setting
    pub fn fetch_all_from_controls(&mut self) {
        for setting in &mut self.entries {
            setting.fetch_from_control();
        }
    }
}

impl<'a> IntoIterator for &'a SettingMap {
    type Item = &'a Setting;
    type IntoIter = std::slice::Iter<'a, Setting>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{CheckBox, ComboBox, ControlKind, SpinBox};
    use vosettings_core::shared;

    struct Dial {
        position: i64,
    }

    impl Control for Dial {
        fn name(&self) -> &str {
            "volumeDial"
        }

        fn kind(&self) -> ControlKind {
            ControlKind::Custom("Dial")
        }

        fn value(&self) -> SettingValue {
            SettingValue::Int(self.position)
        }

        fn set_value(&mut self, value: &SettingValue) {
            self.position = value.to_int();
        }
    }

    fn sample() -> (Vec<SharedControl>, SettingMap) {
        let controls: Vec<SharedControl> = vec![
            shared(CheckBox::new("debandEnabled", false)),
            shared(SpinBox::new("debandIterations", 1).with_range(1, 16)),
            shared(ComboBox::new("ditherType", ["fruit", "ordered", "no"], 0)),
        ];
        let mut map = SettingMap::new();
        for control in &controls {
            map.insert(Setting::from_control(control));
        }
        (controls, map)
    }

    #[test]
    fn test_insertion_order_and_replace() {
        let (_controls, mut map) = sample();
        assert_eq!(
            map.names().collect::<Vec<_>>(),
            vec!["debandEnabled", "debandIterations", "ditherType"]
        );

        map.insert(Setting::new(
            "debandEnabled",
            ControlRef::detached(),
            SettingValue::Bool(true),
        ));
        assert_eq!(map.len(), 3);
        assert_eq!(map.names().next(), Some("debandEnabled"));
        assert_eq!(map.value("debandEnabled"), &SettingValue::Bool(true));
    }

    #[test]
    fn test_value_of_missing_setting_is_invalid() {
        let (_controls, map) = sample();
        assert_eq!(map.value("nope"), &SettingValue::Invalid);
    }

    #[test]
    fn test_export_import_round_trip() {
        let (_controls, mut map) = sample();
        let before = map.export();
        assert_eq!(map.import(&before), 3);
        assert_eq!(map.export(), before);
    }

    #[test]
    fn test_import_drops_unknown_keys() {
        let (controls, mut map) = sample();
        let mut payload = VariantMap::new();
        payload.insert("debandIterations".to_string(), SettingValue::Int(4));
        payload.insert("forgedSetting".to_string(), SettingValue::Bool(true));

        assert_eq!(map.import(&payload), 1);
        assert!(!map.contains("forgedSetting"));
        assert_eq!(map.len(), 3);
        assert_eq!(map.value("debandIterations"), &SettingValue::Int(4));
        // control reference is kept
        let setting = map.get("debandIterations").unwrap();
        assert!(setting.control.ptr_eq(&ControlRef::new(&controls[1])));
    }

    #[test]
    fn test_send_and_fetch() {
        let (controls, mut map) = sample();
        map.get_mut("debandIterations").unwrap().value = SettingValue::Int(30);
        map.send_all_to_controls();
        assert_eq!(controls[1].borrow().value(), SettingValue::Int(16));

        controls[0].borrow_mut().set_value(&SettingValue::Bool(true));
        map.fetch_all_from_controls();
        assert_eq!(map.value("debandEnabled"), &SettingValue::Bool(true));
        assert_eq!(map.value("debandIterations"), &SettingValue::Int(16));
    }

    #[test]
    fn test_custom_kind_is_not_mirrored() {
        let dial: SharedControl = shared(Dial { position: 3 });
        let mut setting = Setting::new("volumeDial", ControlRef::new(&dial), SettingValue::Int(9));

        setting.send_to_control();
        assert_eq!(dial.borrow().value(), SettingValue::Int(3));

        setting.fetch_from_control();
        assert_eq!(setting.value, SettingValue::Int(9));
    }

    #[test]
    fn test_dropped_control_is_ignored() {
        let control: SharedControl = shared(CheckBox::new("subtitlesForceGrayscale", true));
        let mut setting = Setting::from_control(&control);
        drop(control);

        setting.value = SettingValue::Bool(false);
        setting.send_to_control();
        setting.fetch_from_control();
        assert_eq!(setting.value, SettingValue::Bool(false));
        assert!(setting.control.upgrade().is_none());
    }
}
