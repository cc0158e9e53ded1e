//! Settings dialog logic
//!
//! A headless model of the video player's settings dialog: named controls
//! arranged in a widget tree, the setting maps mirrored from them, the
//! option tables used to turn selector indices into option labels, and the
//! assembly of the video output command line that is published to the rest
//! of the application.

pub mod command;
pub mod control;
pub mod error;
pub mod form;
pub mod notifier;
pub mod options;
pub mod registry;
pub mod setting;
pub mod translator;
pub mod widget;
pub mod window;

pub use command::{
    video_output_fields, CommandAssembler, CommandLine, FieldDef, Gate, Token, ValueSource,
    DUMB_MODE_TOKEN,
};
pub use control::{
    CheckBox, ComboBox, Control, ControlKind, DoubleSpinBox, FontComboBox, LineEdit, ListWidget,
    RadioButton, ScrollBar, SpinBox,
};
pub use error::{InvalidTable, TablesError, TablesResult};
pub use form::{default_form, page_count, resolve_page, PageEntry, PageSelection, PAGE_TREE};
pub use notifier::{Notifier, OutputSignals};
pub use options::{OptionTables, SCALE_STAGES};
pub use registry::ControlRegistry;
pub use setting::{ControlRef, Setting, SettingMap};
pub use translator::OptionTranslator;
pub use widget::{Node, NodeClass, Panel, SharedControl};
pub use window::{page_heading, ButtonRole, SettingsWindow};
