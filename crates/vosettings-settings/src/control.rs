//! Headless controls
//!
//! Every interactive element of the settings form implements [`Control`]:
//! a name, a kind, and one value that can be read and written as a
//! [`SettingValue`]. The setters follow the usual toolkit rules (spin boxes
//! clamp, combo boxes drop to "no selection" on a bad index), so writing an
//! imported value behaves like a user typing it in.

use std::fmt;
use vosettings_core::SettingValue;

/// The kind of a control, used by the registry allow-list and in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Two-state check box
    CheckBox,
    /// Exclusive radio button
    RadioButton,
    /// Single line text entry
    LineEdit,
    /// Integer spin box
    SpinBox,
    /// Floating point spin box
    DoubleSpinBox,
    /// Drop-down list selected by index
    ComboBox,
    /// List selected by row
    ListWidget,
    /// Font family picker
    FontComboBox,
    /// Scroll bar / slider position
    ScrollBar,
    /// A control defined outside this crate. Never recorded by the registry
    /// and has no value property.
    Custom(&'static str),
}

impl ControlKind {
    /// All kinds the registry records
    pub const RECOGNIZED: [ControlKind; 9] = [
        ControlKind::CheckBox,
        ControlKind::RadioButton,
        ControlKind::LineEdit,
        ControlKind::SpinBox,
        ControlKind::DoubleSpinBox,
        ControlKind::ComboBox,
        ControlKind::ListWidget,
        ControlKind::FontComboBox,
        ControlKind::ScrollBar,
    ];

    /// Name of the property that holds this kind's current value
    pub fn value_property(&self) -> Option<&'static str> {
        match self {
            ControlKind::CheckBox | ControlKind::RadioButton => Some("checked"),
            ControlKind::LineEdit => Some("text"),
            ControlKind::SpinBox | ControlKind::DoubleSpinBox | ControlKind::ScrollBar => {
                Some("value")
            }
            ControlKind::ComboBox => Some("currentIndex"),
            ControlKind::ListWidget => Some("currentRow"),
            ControlKind::FontComboBox => Some("currentText"),
            ControlKind::Custom(_) => None,
        }
    }

    /// Whether the registry records controls of this kind
    pub fn is_recognized(&self) -> bool {
        self.value_property().is_some()
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::CheckBox => write!(f, "CheckBox"),
            ControlKind::RadioButton => write!(f, "RadioButton"),
            ControlKind::LineEdit => write!(f, "LineEdit"),
            ControlKind::SpinBox => write!(f, "SpinBox"),
            ControlKind::DoubleSpinBox => write!(f, "DoubleSpinBox"),
            ControlKind::ComboBox => write!(f, "ComboBox"),
            ControlKind::ListWidget => write!(f, "ListWidget"),
            ControlKind::FontComboBox => write!(f, "FontComboBox"),
            ControlKind::ScrollBar => write!(f, "ScrollBar"),
            ControlKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A control whose current value can be mirrored into a setting
pub trait Control {
    /// Identifying name; empty for anonymous controls
    fn name(&self) -> &str;

    /// Kind of this control
    fn kind(&self) -> ControlKind;

    /// Current value
    fn value(&self) -> SettingValue;

    /// Replace the current value, converting as the control requires
    fn set_value(&mut self, value: &SettingValue);
}

/// Check box
#[derive(Debug, Clone)]
pub struct CheckBox {
    name: String,
    checked: bool,
}

impl CheckBox {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Control for CheckBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::CheckBox
    }

    fn value(&self) -> SettingValue {
        SettingValue::Bool(self.checked)
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.checked = value.to_bool();
    }
}

/// Radio button
#[derive(Debug, Clone)]
pub struct RadioButton {
    name: String,
    checked: bool,
}

impl RadioButton {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Control for RadioButton {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::RadioButton
    }

    fn value(&self) -> SettingValue {
        SettingValue::Bool(self.checked)
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.checked = value.to_bool();
    }
}

/// Single line text entry
#[derive(Debug, Clone)]
pub struct LineEdit {
    name: String,
    text: String,
}

impl LineEdit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Control for LineEdit {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::LineEdit
    }

    fn value(&self) -> SettingValue {
        SettingValue::String(self.text.clone())
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.text = value.to_text();
    }
}

/// Integer spin box. The range defaults to `0..=99`.
#[derive(Debug, Clone)]
pub struct SpinBox {
    name: String,
    value: i64,
    min: i64,
    max: i64,
}

impl SpinBox {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            min: 0,
            max: 99,
        }
        .clamped()
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max.max(min);
        self.clamped()
    }

    /// Set the value after the range is known
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self.clamped()
    }

    pub fn current(&self) -> i64 {
        self.value
    }

    fn clamped(mut self) -> Self {
        self.value = self.value.clamp(self.min, self.max);
        self
    }
}

impl Control for SpinBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::SpinBox
    }

    fn value(&self) -> SettingValue {
        SettingValue::Int(self.value)
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.value = value.to_int().clamp(self.min, self.max);
    }
}

/// Floating point spin box. Defaults to `0.0..=99.99` with two decimals.
#[derive(Debug, Clone)]
pub struct DoubleSpinBox {
    name: String,
    value: f64,
    min: f64,
    max: f64,
    decimals: u32,
}

impl DoubleSpinBox {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        let mut spin = Self {
            name: name.into(),
            value: 0.0,
            min: 0.0,
            max: 99.99,
            decimals: 2,
        };
        spin.store(value);
        spin
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max.max(min);
        let value = self.value;
        self.store(value);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.store(value);
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        let value = self.value;
        self.store(value);
        self
    }

    pub fn current(&self) -> f64 {
        self.value
    }

    fn store(&mut self, value: f64) {
        let scale = 10f64.powi(self.decimals as i32);
        let rounded = (value * scale).round() / scale;
        self.value = if rounded.is_nan() {
            self.min
        } else {
            rounded.clamp(self.min, self.max)
        };
    }
}

impl Control for DoubleSpinBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::DoubleSpinBox
    }

    fn value(&self) -> SettingValue {
        SettingValue::Double(self.value)
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.store(value.to_double());
    }
}

/// Drop-down list. The current index is `-1` when nothing is selected.
#[derive(Debug, Clone)]
pub struct ComboBox {
    name: String,
    items: Vec<String>,
    current_index: i64,
}

impl ComboBox {
    pub fn new<I, S>(name: impl Into<String>, items: I, current_index: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut combo = Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
            current_index: -1,
        };
        combo.select(current_index);
        combo
    }

    pub fn current_index(&self) -> i64 {
        self.current_index
    }

    pub fn current_text(&self) -> Option<&str> {
        usize::try_from(self.current_index)
            .ok()
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn select(&mut self, index: i64) {
        self.current_index = if (0..self.items.len() as i64).contains(&index) {
            index
        } else {
            -1
        };
    }
}

impl Control for ComboBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::ComboBox
    }

    fn value(&self) -> SettingValue {
        SettingValue::Int(self.current_index)
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.select(value.to_int());
    }
}

/// List of items selected by row. The row is `-1` when nothing is selected.
#[derive(Debug, Clone)]
pub struct ListWidget {
    name: String,
    items: Vec<String>,
    current_row: i64,
}

impl ListWidget {
    pub fn new<I, S>(name: impl Into<String>, items: I, current_row: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let current_row = if (0..items.len() as i64).contains(&current_row) {
            current_row
        } else {
            -1
        };
        Self {
            name: name.into(),
            items,
            current_row,
        }
    }

    pub fn current_row(&self) -> i64 {
        self.current_row
    }
}

impl Control for ListWidget {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::ListWidget
    }

    fn value(&self) -> SettingValue {
        SettingValue::Int(self.current_row)
    }

    fn set_value(&mut self, value: &SettingValue) {
        let row = value.to_int();
        self.current_row = if (0..self.items.len() as i64).contains(&row) {
            row
        } else {
            -1
        };
    }
}

/// Font family picker, valued by family name
#[derive(Debug, Clone)]
pub struct FontComboBox {
    name: String,
    current_text: String,
}

impl FontComboBox {
    pub fn new(name: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_text: family.into(),
        }
    }

    pub fn family(&self) -> &str {
        &self.current_text
    }
}

impl Control for FontComboBox {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::FontComboBox
    }

    fn value(&self) -> SettingValue {
        SettingValue::String(self.current_text.clone())
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.current_text = value.to_text();
    }
}

/// Scroll bar position. The range defaults to `0..=99`.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    name: String,
    value: i64,
    min: i64,
    max: i64,
}

impl ScrollBar {
    pub fn new(name: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        let max = max.max(min);
        Self {
            name: name.into(),
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn position(&self) -> i64 {
        self.value
    }
}

impl Control for ScrollBar {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ControlKind {
        ControlKind::ScrollBar
    }

    fn value(&self) -> SettingValue {
        SettingValue::Int(self.value)
    }

    fn set_value(&mut self, value: &SettingValue) {
        self.value = value.to_int().clamp(self.min, self.max);
    }
}
