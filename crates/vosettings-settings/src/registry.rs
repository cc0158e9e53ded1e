//! Control registry
//!
//! Walks the widget tree breadth-first and records every recognised,
//! named control as a [`Setting`]. A recorded control's own children are
//! not visited, so the editor inside a named spin box is never picked up.

use std::collections::VecDeque;

use crate::setting::{Setting, SettingMap};
use crate::widget::{Node, SPINBOX_EDITOR_NAME};

/// Names toolkit-internal children carry; never recorded
pub const AUXILIARY_NAMES: &[&str] = &[SPINBOX_EDITOR_NAME];

/// Discovers the controls of a widget tree
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlRegistry;

impl ControlRegistry {
    /// Build a setting map from every recognised control under `root`
    pub fn scan(root: &Node) -> SettingMap {
        let mut map = SettingMap::new();
        let mut queue: VecDeque<&Node> = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            if let Some(setting) = Self::record(node) {
                if map.contains(&setting.name) {
                    tracing::warn!("Duplicate control name '{}'", setting.name);
                }
                map.insert(setting);
                continue;
            }
            queue.extend(node.children().iter().filter(|c| c.is_traversable()));
        }

        tracing::debug!("Discovered {} controls", map.len());
        map
    }

    fn record(node: &Node) -> Option<Setting> {
        let control = node.as_control()?;
        {
            let c = control.borrow();
            if !c.kind().is_recognized()
                || c.name().is_empty()
                || AUXILIARY_NAMES.contains(&c.name())
            {
                return None;
            }
        }
        Some(Setting::from_control(control))
    }
}
