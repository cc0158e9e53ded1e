//! Option translator
//!
//! Turns a selector's integer value into its label. The accepted value is
//! tried first, then the startup default; if neither indexes the control's
//! table the result is empty.

use crate::options::OptionTables;
use crate::setting::SettingMap;

/// Resolves selector indices to labels against accepted and default values
#[derive(Debug, Clone, Copy)]
pub struct OptionTranslator<'a> {
    tables: &'a OptionTables,
    accepted: &'a SettingMap,
    defaults: &'a SettingMap,
}

impl<'a> OptionTranslator<'a> {
    pub fn new(tables: &'a OptionTables, accepted: &'a SettingMap, defaults: &'a SettingMap) -> Self {
        Self {
            tables,
            accepted,
            defaults,
        }
    }

    /// Settings taken at the last apply
    pub fn accepted(&self) -> &'a SettingMap {
        self.accepted
    }

    /// Settings captured at startup
    pub fn defaults(&self) -> &'a SettingMap {
        self.defaults
    }

    /// Label for `control`'s current selection, or an empty string
    pub fn text(&self, control: &str) -> String {
        self.lookup(self.accepted, control)
            .or_else(|| self.lookup(self.defaults, control))
            .map(str::to_string)
            .unwrap_or_default()
    }

    fn lookup(&self, map: &SettingMap, control: &str) -> Option<&'a str> {
        let setting = map.get(control)?;
        self.tables.label(control, setting.value.to_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::{ControlRef, Setting};
    use vosettings_core::SettingValue;

    fn map(entries: &[(&str, i64)]) -> SettingMap {
        let mut map = SettingMap::new();
        for (name, index) in entries {
            map.insert(Setting::new(
                *name,
                ControlRef::detached(),
                SettingValue::Int(*index),
            ));
        }
        map
    }

    fn tables() -> OptionTables {
        let mut tables = OptionTables::new();
        tables.insert(
            "syncMode",
            ["audio", "display-resample", "display-vdrop", "display-adrop", "display-desync"],
        );
        tables
    }

    #[test]
    fn test_accepted_index_wins() {
        let tables = tables();
        let accepted = map(&[("syncMode", 2)]);
        let defaults = map(&[("syncMode", 0)]);
        let translator = OptionTranslator::new(&tables, &accepted, &defaults);
        assert_eq!(translator.text("syncMode"), "display-vdrop");
    }

    #[test]
    fn test_out_of_range_falls_back_to_default() {
        let tables = tables();
        let accepted = map(&[("syncMode", 9)]);
        let defaults = map(&[("syncMode", 1)]);
        let translator = OptionTranslator::new(&tables, &accepted, &defaults);
        assert_eq!(translator.text("syncMode"), "display-resample");
    }

    #[test]
    fn test_both_out_of_range_is_empty() {
        let tables = tables();
        let accepted = map(&[("syncMode", 9)]);
        let defaults = map(&[("syncMode", 9)]);
        let translator = OptionTranslator::new(&tables, &accepted, &defaults);
        assert_eq!(translator.text("syncMode"), "");
    }

    #[test]
    fn test_negative_index_falls_back() {
        let tables = tables();
        let accepted = map(&[("syncMode", -1)]);
        let defaults = map(&[("syncMode", 4)]);
        let translator = OptionTranslator::new(&tables, &accepted, &defaults);
        assert_eq!(translator.text("syncMode"), "display-desync");
    }

    #[test]
    fn test_unknown_table_or_control_is_empty() {
        let tables = tables();
        let accepted = map(&[("videoSharpen", 1)]);
        let defaults = map(&[]);
        let translator = OptionTranslator::new(&tables, &accepted, &defaults);
        assert_eq!(translator.text("videoSharpen"), "");
        assert_eq!(translator.text("syncMode"), "");
    }
}
