//! The built-in settings form
//!
//! Builds the widget tree of the settings dialog with every control the
//! command assembler and notifier read, each at its startup default. Combo
//! boxes take their items from the option tables so labels and indices
//! always agree.

use crate::control::{
    CheckBox, ComboBox, DoubleSpinBox, FontComboBox, LineEdit, ListWidget, RadioButton, ScrollBar,
    SpinBox,
};
use crate::options::{OptionTables, SCALE_STAGES};
use crate::widget::Node;

/// A top-level entry of the page tree and its sub-pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry {
    pub title: &'static str,
    pub children: &'static [&'static str],
}

/// Page tree shown beside the page stack; stack pages follow this order
pub const PAGE_TREE: &[PageEntry] = &[
    PageEntry {
        title: "Player",
        children: &["Logo & Message", "Tweaks", "Keys"],
    },
    PageEntry {
        title: "Video",
        children: &["Framedropping", "Sync", "Hardware decoding", "Shaders"],
    },
    PageEntry {
        title: "Audio",
        children: &["Output", "Channels"],
    },
    PageEntry {
        title: "Subtitles",
        children: &[],
    },
    PageEntry {
        title: "Advanced",
        children: &[],
    },
];

/// A row picked in the page tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelection {
    pub row: usize,
    /// Row of the parent entry for sub-pages
    pub parent: Option<usize>,
}

impl PageSelection {
    pub fn top(row: usize) -> Self {
        Self { row, parent: None }
    }

    pub fn child(parent: usize, row: usize) -> Self {
        Self {
            row,
            parent: Some(parent),
        }
    }
}

/// Stack index of each top-level page
pub fn top_level_page_indices() -> Vec<usize> {
    let mut next = 0;
    PAGE_TREE
        .iter()
        .map(|entry| {
            let index = next;
            next += 1 + entry.children.len();
            index
        })
        .collect()
}

/// Stack index and title for a page tree selection
pub fn resolve_page(selection: PageSelection) -> Option<(usize, &'static str)> {
    let starts = top_level_page_indices();
    match selection.parent {
        None => {
            let entry = PAGE_TREE.get(selection.row)?;
            Some((starts[selection.row], entry.title))
        }
        Some(parent) => {
            let title = PAGE_TREE.get(parent)?.children.get(selection.row)?;
            Some((starts[parent] + selection.row + 1, title))
        }
    }
}

/// Total number of pages in the stack
pub fn page_count() -> usize {
    PAGE_TREE.iter().map(|e| 1 + e.children.len()).sum()
}

/// Items of the dither depth selector. It has no label table, so the
/// command carries a bare `dither-depth`.
const DITHER_DEPTHS: [&str; 6] = ["auto", "no", "8", "10", "12", "16"];

fn combo(tables: &OptionTables, name: &str, index: i64) -> Node {
    let items = tables.get(name).map(<[String]>::to_vec).unwrap_or_default();
    Node::control(ComboBox::new(name, items, index))
}

fn check(name: &str, checked: bool) -> Node {
    Node::control(CheckBox::new(name, checked))
}

fn spin(name: &str, value: i64, min: i64, max: i64) -> Node {
    Node::spin_box(SpinBox::new(name, 0).with_range(min, max).with_value(value))
}

fn double(name: &str, value: f64, min: f64, max: f64) -> Node {
    Node::double_spin_box(DoubleSpinBox::new(name, 0.0).with_range(min, max).with_value(value))
}

fn precise(name: &str, value: f64, min: f64, max: f64) -> Node {
    Node::double_spin_box(
        DoubleSpinBox::new(name, 0.0)
            .with_decimals(3)
            .with_range(min, max)
            .with_value(value),
    )
}

fn page(name: &str) -> Node {
    Node::container(name).child(Node::layout())
}

fn scale_stage_tab(tables: &OptionTables, stage: &str, scalar_index: i64) -> Node {
    let grid = Node::layout()
        .child(combo(tables, &format!("{}Scalar", stage), scalar_index))
        .child(check(&format!("{}Param1Set", stage), false))
        .child(double(&format!("{}Param1Value", stage), 0.0, -100.0, 100.0))
        .child(check(&format!("{}Param2Set", stage), false))
        .child(double(&format!("{}Param2Value", stage), 0.0, -100.0, 100.0))
        .child(check(&format!("{}RadiusSet", stage), false))
        .child(double(&format!("{}RadiusValue", stage), 3.0, 0.5, 16.0))
        .child(check(&format!("{}AntiRingSet", stage), false))
        .child(double(&format!("{}AntiRingValue", stage), 0.0, 0.0, 1.0))
        .child(check(&format!("{}BlurSet", stage), false))
        .child(double(&format!("{}BlurValue", stage), 1.0, 0.0, 10.0))
        .child(check(&format!("{}WindowParamSet", stage), false))
        .child(double(&format!("{}WindowParamValue", stage), 0.0, -100.0, 100.0))
        .child(check(&format!("{}WindowSet", stage), false))
        .child(combo(tables, &format!("{}WindowValue", stage), 0))
        .child(check(&format!("{}Clamp", stage), false));
    Node::container(format!("{}Tab", stage)).child(grid)
}

fn video_page(tables: &OptionTables) -> Node {
    let general = Node::container("videoGeneralTab").child(Node::layout().with_children([
        combo(tables, "videoFramebuffer", 3),
        check("videoUseAlpha", false),
        combo(tables, "videoAlphaMode", 0),
        double("videoSharpen", 0.0, -1.0, 1.0),
    ]));

    let dither = Node::container("videoDitherTab").child(Node::layout().with_children([
        check("ditherDithering", true),
        Node::control(ComboBox::new("ditherDepth", DITHER_DEPTHS, 0)),
        combo(tables, "ditherType", 0),
        spin("ditherFruitSize", 6, 2, 8),
        check("ditherTemporal", false),
        spin("ditherTemporalPeriod", 1, 1, 128),
    ]));

    let scalar_defaults = [4, 0, 0, 8];
    let stages = SCALE_STAGES
        .iter()
        .zip(scalar_defaults)
        .map(|(stage, index)| scale_stage_tab(tables, stage, index));
    let scaling = Node::container("videoScalingTab").child(Node::layout().with_children([
        check("scalingCorrectDownscaling", false),
        check("scalingInLinearLight", false),
        check("scalingTemporalInterpolation", false),
        check("scalingBlendSubtitles", false),
        check("scalingSigmoidizedUpscaling", false),
        double("sigmoidizedCenter", 0.75, 0.0, 1.0),
        double("sigmoidizedSlope", 6.5, 1.0, 20.0),
        Node::container("scalingTabs").with_children(stages),
    ]));

    let prescale = Node::container("videoPrescaleTab").child(Node::layout().with_children([
        combo(tables, "prescalarMethod", 0),
        Node::container("prescalarStack").with_children([
            Node::container("prescalarNonePage"),
            Node::container("prescalarSuperxbrPage"),
            Node::container("prescalarNnedi3Page").child(Node::layout().with_children([
                combo(tables, "nnedi3Neurons", 1),
                combo(tables, "nnedi3Window", 0),
                combo(tables, "nnedi3Upload", 0),
            ])),
        ]),
    ]));

    let color = Node::container("videoColorTab").child(Node::layout().with_children([
        combo(tables, "ccTargetPrim", 0),
        combo(tables, "ccTargetTRC", 0),
    ]));

    let deband = Node::container("videoDebandTab").child(Node::layout().with_children([
        check("debandEnabled", false),
        spin("debandIterations", 1, 1, 16),
        double("debandThreshold", 64.0, 0.0, 4096.0),
        double("debandRange", 16.0, 1.0, 64.0),
        double("debandGrain", 48.0, 0.0, 4096.0),
    ]));

    Node::container("videoPage").child(Node::layout().with_children([
        check("videoDumbMode", false),
        Node::container("videoTabs").with_children([general, dither, scaling, prescale, color, deband]),
    ]))
}

fn framedropping_page(tables: &OptionTables) -> Node {
    Node::container("framedroppingPage").child(Node::layout().with_children([
        combo(tables, "framedroppingMode", 1),
        combo(tables, "framedroppingDecoderMode", 1),
    ]))
}

fn sync_page(tables: &OptionTables) -> Node {
    Node::container("syncPage").child(Node::layout().with_children([
        combo(tables, "syncMode", 0),
        precise("syncAudioDropSize", 0.02, 0.0, 1.0),
        precise("syncMaxAudioChange", 0.125, 0.0, 1.0),
        precise("syncMaxVideoChange", 1.0, 0.0, 10.0),
    ]))
}

fn player_page() -> Node {
    Node::container("playerPage").child(Node::layout().with_children([
        check("playerKeepHistory", true),
        Node::control(RadioButton::new("playerOpenSame", true)),
        Node::control(RadioButton::new("playerOpenNew", false)),
        Node::control(ListWidget::new(
            "playerLanguage",
            ["English", "Français", "Deutsch", "Español"],
            0,
        )),
    ]))
}

fn logo_page() -> Node {
    Node::container("logoPage").child(
        Node::layout().child(Node::control(ScrollBar::new("interfaceOsdOpacity", 80, 0, 100))),
    )
}

fn tweaks_page() -> Node {
    Node::container("tweaksPage").child(Node::layout().child(check("tweaksFastSeek", true)))
}

fn audio_page(tables: &OptionTables) -> Node {
    Node::container("audioPage").child(Node::layout().with_children([
        combo(tables, "audioRenderer", 0),
        Node::container("audioRendererStack").with_children([
            Node::container("audioPulsePage")
                .child(Node::control(LineEdit::new("audioPulseHost", ""))),
            Node::container("audioAlsaPage")
                .child(Node::control(LineEdit::new("audioAlsaDevice", "default"))),
            Node::container("audioOssPage")
                .child(Node::control(LineEdit::new("audioOssDevice", "/dev/dsp"))),
            Node::container("audioNullPage"),
        ]),
    ]))
}

fn audio_output_page() -> Node {
    Node::container("audioOutputPage").child(Node::layout().child(spin("audioVolume", 100, 0, 130)))
}

fn subtitles_page(tables: &OptionTables) -> Node {
    Node::container("subtitlesPage").child(Node::layout().with_children([
        check("subtitlesForceGrayscale", false),
        Node::control(FontComboBox::new("subtitlesFont", "Sans")),
        combo(tables, "subtitlePlacementX", 1),
        combo(tables, "subtitlePlacementY", 2),
        combo(tables, "subtitlesAssOverride", 1),
        combo(tables, "subtitleAlignment", 4),
    ]))
}

/// The complete settings dialog tree
pub fn default_form(tables: &OptionTables) -> Node {
    // stack pages in page tree order
    let pages = vec![
        player_page(),
        logo_page(),
        tweaks_page(),
        page("keysPage"),
        video_page(tables),
        framedropping_page(tables),
        sync_page(tables),
        page("hwdecPage"),
        page("shadersPage"),
        audio_page(tables),
        audio_output_page(),
        page("audioChannelsPage"),
        subtitles_page(tables),
        page("advancedPage"),
    ];
    debug_assert_eq!(pages.len(), page_count());

    Node::container("SettingsWindow").child(Node::layout().with_children([
        Node::container("pageTree"),
        Node::container("pageLabel"),
        Node::container("pageStack").with_children(pages),
        Node::container("buttonBox"),
        Node::object("pageTreeModel"),
    ]))
}
