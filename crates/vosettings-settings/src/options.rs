//! Option tables
//!
//! Maps a control name to the ordered labels its integer value indexes.
//! Labels are emitted verbatim. Selectors without a table translate to an
//! empty string. A user file in the configuration directory may replace
//! individual tables.
//!
//! Files are JSON or TOML, chosen by extension. A TOML file is a flat list
//! of arrays:
//!
//! ```toml
//! ditherType = ["fruit", "ordered", "no"]
//! syncMode = ["audio", "display-resample"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{InvalidTable, TablesError, TablesResult};

const SCALERS: &[&str] = &[
    "bilinear",
    "bicubic_fast",
    "oversample",
    "spline16",
    "spline36",
    "spline64",
    "sinc",
    "lanczos",
    "gingseng",
    "jinc",
    "ewa_lanczos",
    "ewa_hanning",
    "ewa_gingseng",
    "ewa_lanczossharp",
    "ewa_lanczossoft",
    "hassnsoft",
    "bicubic",
    "bcspline",
    "catmull_rom",
    "mitchell",
    "robidoux",
    "robidouxsharp",
    "ewa_robidoux",
    "ewa_robidouxsharp",
    "box",
    "nearest",
    "triangle",
    "gaussian",
];

const WINDOWS: &[&str] = &[
    "box", "triable", "bartlett", "hanning", "hamming", "quadric", "welch", "kaiser", "blackman",
    "gaussian", "sinc", "jinc", "sphinx",
];

const TEMPORAL_SCALERS: &[&str] = &[
    "oversample",
    "spline16",
    "spline36",
    "spline64",
    "sinc",
    "lanczos",
    "gingseng",
    "catmull_rom",
    "mitchell",
    "robidoux",
    "robidouxsharp",
    "box",
    "nearest",
    "triangle",
    "gaussian",
];

const FIXED_TABLES: &[(&str, &[&str])] = &[
    (
        "videoFramebuffer",
        &[
            "rgb8-rgba",
            "rgb10-rgb10_a2",
            "rgba12-rgba12",
            "rgb16-rgba16",
            "rgb16f-rgba16f",
            "rgb32f-rgba32f",
        ],
    ),
    ("videoAlphaMode", &["blend", "yes", "no"]),
    ("ditherType", &["fruit", "ordered", "no"]),
    ("prescalarMethod", &["none", "superxbr", "needi3"]),
    ("nnedi3Neurons", &["16", "32", "64", "128"]),
    ("nnedi3Window", &["8x4", "8x6"]),
    ("nnedi3Upload", &["ubo", "shader"]),
    (
        "ccTargetPrim",
        &[
            "auto",
            "bt.601-525",
            "bt.601-625",
            "bt.709",
            "bt.2020",
            "bt.470m",
            "apple",
            "adobe",
            "prophoto",
            "cie1931",
        ],
    ),
    (
        "ccTargetTRC",
        &[
            "auto", "by.1886", "srgb", "linear", "gamma1.8", "gamma2.2", "gamma2.8", "prophoto",
        ],
    ),
    ("audioRenderer", &["pulse", "alsa", "oss", "null"]),
    ("framedroppingMode", &["no", "vo", "decoder", "decoder+vo"]),
    (
        "framedroppingDecoderMode",
        &["none", "default", "nonref", "bidir", "nonkey", "all"],
    ),
    (
        "syncMode",
        &[
            "audio",
            "display-resample",
            "display-resample-vdrop",
            "display-resample-desync",
            "display-adrop",
            "display-vdrop",
        ],
    ),
    ("subtitlePlacementX", &["left", "center", "right"]),
    ("subtitlePlacementY", &["top", "center", "bottom"]),
    ("subtitlesAssOverride", &["no", "yes", "force", "signfs"]),
    (
        "subtitleAlignment",
        &[
            "top-center",
            "top-right",
            "center-right",
            "bottom-right",
            "bottom-center",
            "bottom-left",
            "center-left",
            "top-left",
            "center-center",
        ],
    ),
];

/// Scaling stages sharing the scaler/window tables
pub const SCALE_STAGES: [&str; 4] = ["scale", "dscale", "cscale", "tscale"];

/// Allowed labels per control, indexed by the control's integer value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTables {
    tables: BTreeMap<String, Vec<String>>,
}

impl OptionTables {
    /// An empty set of tables
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables for the built-in settings form
    pub fn builtin() -> Self {
        let mut tables = Self::new();
        for (name, labels) in FIXED_TABLES {
            tables.insert(*name, labels.iter().copied());
        }
        for stage in SCALE_STAGES {
            let scalers = if stage == "tscale" {
                TEMPORAL_SCALERS
            } else {
                SCALERS
            };
            tables.insert(format!("{}Scalar", stage), scalers.iter().copied());
            tables.insert(format!("{}WindowValue", stage), WINDOWS.iter().copied());
        }
        tables
    }

    /// Add or replace a table
    pub fn insert<I, S>(&mut self, name: impl Into<String>, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(name.into(), labels.into_iter().map(Into::into).collect());
    }

    /// The labels for a control
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.tables.get(name).map(Vec::as_slice)
    }

    /// The label at `index` for a control; negative or out of range misses
    pub fn label(&self, name: &str, index: i64) -> Option<&str> {
        let index = usize::try_from(index).ok()?;
        self.get(name)?.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Replace tables with those present in `other`
    pub fn merge(&mut self, other: &OptionTables) {
        for (name, labels) in &other.tables {
            self.tables.insert(name.clone(), labels.clone());
        }
    }

    /// Every table must have at least one label and no empty labels
    pub fn validate(&self) -> Result<(), InvalidTable> {
        for (name, labels) in &self.tables {
            if labels.is_empty() {
                return Err(InvalidTable::Empty(name.clone()));
            }
            if let Some(index) = labels.iter().position(|l| l.trim().is_empty()) {
                return Err(InvalidTable::BlankLabel {
                    table: name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Load tables from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> TablesResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| TablesError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let tables: Self = match format {
            Format::Json => serde_json::from_str(&content).map_err(|source| TablesError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            Format::Toml => toml::from_str(&content).map_err(|source| TablesError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
        };

        tables.validate()?;
        tracing::debug!("Loaded {} option tables from {}", tables.len(), path.display());
        Ok(tables)
    }

    /// Save tables to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> TablesResult<()> {
        self.validate()?;

        let encode = |reason: String| TablesError::Encode {
            path: path.to_path_buf(),
            reason,
        };
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self).map_err(|e| encode(e.to_string()))?,
            Format::Toml => toml::to_string_pretty(self).map_err(|e| encode(e.to_string()))?,
        };

        std::fs::write(path, content).map_err(|source| TablesError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Location of the user override file
    pub fn user_override_path() -> TablesResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(TablesError::NoConfigDir(std::env::consts::OS))?;
        Ok(dir.join("vosettings").join("option_tables.toml"))
    }

    /// Built-in tables with `path` merged over them when it exists
    pub fn with_overrides_from(path: &Path) -> TablesResult<Self> {
        let mut tables = Self::builtin();
        if path.exists() {
            let overrides = Self::load_from_file(path)?;
            tracing::info!(
                "Applying {} option table overrides from {}",
                overrides.len(),
                path.display()
            );
            tables.merge(&overrides);
        }
        Ok(tables)
    }

    /// Built-in tables with the user override file merged over them
    pub fn load_with_user_overrides() -> TablesResult<Self> {
        Self::with_overrides_from(&Self::user_override_path()?)
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> TablesResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(TablesError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
