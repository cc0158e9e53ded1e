//! Video output command assembly
//!
//! The command line is built from an ordered list of [`FieldDef`]s. Each
//! definition names the option key, where its value comes from, and the
//! control that must be checked (or non-zero) for it to be emitted. Fields
//! are processed in declaration order, which is also the token order of the
//! result.

use std::fmt;

use crate::options::SCALE_STAGES;
use crate::translator::OptionTranslator;

/// Literal sent instead of the option list when dumb mode is on
pub const DUMB_MODE_TOKEN: &str = "dumb-mode";

/// Control that switches dumb mode on
pub const DUMB_MODE_CONTROL: &str = "videoDumbMode";

/// Separator between tokens
pub const TOKEN_SEPARATOR: char = ':';

/// One unit of the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `key`
    Bare(String),
    /// `key=value`
    Valued { key: String, value: String },
}

impl Token {
    pub fn key(&self) -> &str {
        match self {
            Token::Bare(key) => key,
            Token::Valued { key, .. } => key,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Token::Bare(_) => None,
            Token::Valued { value, .. } => Some(value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Bare(key) => write!(f, "{}", key),
            Token::Valued { key, value } => write!(f, "{}={}", key, value),
        }
    }
}

/// Condition under which a field is emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// The named control's value is true
    Checked(String),
    /// The named control's value is a non-zero integer
    NonZero(String),
}

/// Where a valued field takes its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// The accepted value, as text
    Value(String),
    /// The selector's translated label
    Text(String),
    /// A `opaque-alpha` framebuffer label, split on `-` and indexed by the
    /// alpha control's check state
    FramebufferFormat { format: String, alpha: String },
}

/// One field of the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub key: String,
    /// `None` for bare flags
    pub source: Option<ValueSource>,
    pub gate: Gate,
}

impl FieldDef {
    /// A bare flag
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: None,
            gate: Gate::Always,
        }
    }

    /// `key=<accepted value of control>`
    pub fn value(key: impl Into<String>, control: impl Into<String>) -> Self {
        Self::with_source(key, ValueSource::Value(control.into()))
    }

    /// `key=<translated label of control>`
    pub fn text(key: impl Into<String>, control: impl Into<String>) -> Self {
        Self::with_source(key, ValueSource::Text(control.into()))
    }

    pub fn with_source(key: impl Into<String>, source: ValueSource) -> Self {
        Self {
            key: key.into(),
            source: Some(source),
            gate: Gate::Always,
        }
    }

    pub fn when_checked(mut self, control: impl Into<String>) -> Self {
        self.gate = Gate::Checked(control.into());
        self
    }

    pub fn when_nonzero(mut self, control: impl Into<String>) -> Self {
        self.gate = Gate::NonZero(control.into());
        self
    }


    fn is_enabled(&self, translator: &OptionTranslator<'_>) -> bool {
        let accepted = translator.accepted();
        match &self.gate {
            Gate::Always => true,
            Gate::Checked(control) => accepted.value(control).to_bool(),
            Gate::NonZero(control) => accepted.value(control).to_int() != 0,
        }
    }

    /// The token for this field, or `None` when its gate is closed.
    ///
    /// A valued field that resolves to an empty string is written bare.
    fn resolve(&self, translator: &OptionTranslator<'_>) -> Option<Token> {
        if !self.is_enabled(translator) {
            return None;
        }
        let value = match &self.source {
            None => String::new(),
            Some(ValueSource::Value(control)) => translator.accepted().value(control).to_text(),
            Some(ValueSource::Text(control)) => translator.text(control),
            Some(ValueSource::FramebufferFormat { format, alpha }) => {
                let use_alpha = translator.accepted().value(alpha).to_bool();
                translator
                    .text(format)
                    .split('-')
                    .nth(usize::from(use_alpha))
                    .unwrap_or_default()
                    .to_string()
            }
        };
        Some(if value.is_empty() {
            Token::Bare(self.key.clone())
        } else {
            Token::Valued {
                key: self.key.clone(),
                value,
            }
        })
    }
}

/// Ordered tokens of an assembled command line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    tokens: Vec<Token>,
}

impl CommandLine {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::key)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", TOKEN_SEPARATOR)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Builds the video output command line from accepted settings
#[derive(Debug, Clone)]
pub struct CommandAssembler {
    fields: Vec<FieldDef>,
}

impl CommandAssembler {
    /// Assembler for the built-in settings form
    pub fn new() -> Self {
        Self::with_fields(video_output_fields())
    }

    pub fn with_fields(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Tokens for every enabled field, in declaration order
    pub fn tokens(&self, translator: &OptionTranslator<'_>) -> CommandLine {
        let tokens = self
            .fields
            .iter()
            .filter_map(|field| field.resolve(translator))
            .inspect(|token| tracing::trace!("Token {}", token))
            .collect();
        CommandLine { tokens }
    }

    /// The full command string; [`DUMB_MODE_TOKEN`] when dumb mode is on
    pub fn assemble(&self, translator: &OptionTranslator<'_>) -> String {
        if translator.accepted().value(DUMB_MODE_CONTROL).to_bool() {
            return DUMB_MODE_TOKEN.to_string();
        }
        self.tokens(translator).to_string()
    }
}

impl Default for CommandAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-stage sub-fields: option suffix, value control suffix, gate suffix
const STAGE_VALUES: [(&str, &str); 6] = [
    ("param1", "Param1"),
    ("param2", "Param2"),
    ("radius", "Radius"),
    ("antiring", "AntiRing"),
    ("blur", "Blur"),
    ("wparam", "WindowParam"),
];

fn stage_fields(stage: &str) -> Vec<FieldDef> {
    let scalar = format!("{}Scalar", stage);
    let mut fields = Vec::with_capacity(9);

    let stage_token = FieldDef::text(stage, scalar.clone());
    fields.push(if stage == "dscale" {
        stage_token.when_nonzero(scalar)
    } else {
        stage_token
    });

    for (option, control) in STAGE_VALUES {
        fields.push(
            FieldDef::value(
                format!("{}-{}", stage, option),
                format!("{}{}Value", stage, control),
            )
            .when_checked(format!("{}{}Set", stage, control)),
        );
    }

    fields.push(
        FieldDef::text(format!("{}-window", stage), format!("{}WindowValue", stage))
            .when_checked(format!("{}WindowSet", stage)),
    );
    fields.push(FieldDef::flag(format!("{}-clamp", stage)).when_checked(format!("{}Clamp", stage)));
    fields
}

/// Field definitions for the built-in settings form
pub fn video_output_fields() -> Vec<FieldDef> {
    let mut fields = vec![
        FieldDef::with_source(
            "fbo-format",
            ValueSource::FramebufferFormat {
                format: "videoFramebuffer".to_string(),
                alpha: "videoUseAlpha".to_string(),
            },
        ),
        // the check box has no label table, so this is written bare
        FieldDef::text("alpha", "videoUseAlpha"),
        FieldDef::value("sharpen", "videoSharpen"),
        FieldDef::text("dither-depth", "ditherDepth").when_checked("ditherDithering"),
        FieldDef::text("dither", "ditherType").when_checked("ditherDithering"),
        FieldDef::value("dither-size-fruit", "ditherFruitSize").when_checked("ditherDithering"),
        FieldDef::flag("temporal-dither").when_checked("ditherTemporal"),
        FieldDef::value("temporal-dither-period", "ditherTemporalPeriod")
            .when_checked("ditherTemporal"),
        FieldDef::flag("correct-downscaling").when_checked("scalingCorrectDownscaling"),
        FieldDef::flag("linear-scaling").when_checked("scalingInLinearLight"),
        FieldDef::flag("interpolation").when_checked("scalingTemporalInterpolation"),
        FieldDef::flag("blend-subtitles").when_checked("scalingBlendSubtitles"),
        FieldDef::flag("sigmoid-upscaling").when_checked("scalingSigmoidizedUpscaling"),
        FieldDef::value("sigmoid-center", "sigmoidizedCenter")
            .when_checked("scalingSigmoidizedUpscaling"),
        FieldDef::value("sigmoid-slope", "sigmoidizedSlope")
            .when_checked("scalingSigmoidizedUpscaling"),
    ];

    for stage in SCALE_STAGES {
        fields.extend(stage_fields(stage));
    }

    fields.extend([
        FieldDef::flag("deband").when_checked("debandEnabled"),
        FieldDef::value("deband-iterations", "debandIterations").when_checked("debandEnabled"),
        FieldDef::value("deband-threshold", "debandThreshold").when_checked("debandEnabled"),
        FieldDef::value("deband-range", "debandRange").when_checked("debandEnabled"),
        FieldDef::value("deband-grain", "debandGrain").when_checked("debandEnabled"),
    ]);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionTables;
    use crate::setting::{ControlRef, Setting, SettingMap};
    use vosettings_core::SettingValue;

    fn map(entries: &[(&str, SettingValue)]) -> SettingMap {
        let mut map = SettingMap::new();
        for (name, value) in entries {
            map.insert(Setting::new(*name, ControlRef::detached(), value.clone()));
        }
        map
    }

    fn assemble(accepted: &SettingMap, fields: Vec<FieldDef>) -> CommandLine {
        let tables = OptionTables::builtin();
        let defaults = SettingMap::new();
        let translator = OptionTranslator::new(&tables, accepted, &defaults);
        CommandAssembler::with_fields(fields).tokens(&translator)
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Bare("deband".into()).to_string(), "deband");
        let token = Token::Valued {
            key: "deband-grain".into(),
            value: "48".into(),
        };
        assert_eq!(token.to_string(), "deband-grain=48");
        assert_eq!(token.value(), Some("48"));
    }

    #[test]
    fn test_gates() {
        let accepted = map(&[
            ("scaleParam1Set", SettingValue::Bool(false)),
            ("scaleParam1Value", SettingValue::Double(0.5)),
            ("scaleParam2Set", SettingValue::Bool(true)),
            ("scaleParam2Value", SettingValue::Double(0.25)),
            ("dscaleScalar", SettingValue::Int(0)),
        ]);
        let line = assemble(
            &accepted,
            vec![
                FieldDef::value("scale-param1", "scaleParam1Value").when_checked("scaleParam1Set"),
                FieldDef::value("scale-param2", "scaleParam2Value").when_checked("scaleParam2Set"),
                FieldDef::text("dscale", "dscaleScalar").when_nonzero("dscaleScalar"),
            ],
        );
        assert_eq!(line.to_string(), "scale-param2=0.25");
    }

    #[test]
    fn test_empty_value_is_written_bare() {
        let accepted = map(&[("videoSharpen", SettingValue::Invalid)]);
        let line = assemble(&accepted, vec![FieldDef::value("sharpen", "videoSharpen")]);
        assert_eq!(line.tokens(), &[Token::Bare("sharpen".into())]);
    }

    #[test]
    fn test_framebuffer_format_split() {
        let mut accepted = map(&[
            ("videoFramebuffer", SettingValue::Int(1)),
            ("videoUseAlpha", SettingValue::Bool(false)),
        ]);
        let field = FieldDef::with_source(
            "fbo-format",
            ValueSource::FramebufferFormat {
                format: "videoFramebuffer".into(),
                alpha: "videoUseAlpha".into(),
            },
        );
        let line = assemble(&accepted, vec![field.clone()]);
        assert_eq!(line.to_string(), "fbo-format=rgb10");

        accepted.get_mut("videoUseAlpha").unwrap().value = SettingValue::Bool(true);
        let line = assemble(&accepted, vec![field]);
        assert_eq!(line.to_string(), "fbo-format=rgb10_a2");
    }

    #[test]
    fn test_unlabelled_selectors_are_bare() {
        let accepted = map(&[
            ("videoUseAlpha", SettingValue::Bool(true)),
            ("ditherDithering", SettingValue::Bool(true)),
            ("ditherDepth", SettingValue::Int(2)),
        ]);
        let line = assemble(
            &accepted,
            vec![
                FieldDef::text("alpha", "videoUseAlpha"),
                FieldDef::text("dither-depth", "ditherDepth").when_checked("ditherDithering"),
            ],
        );
        assert_eq!(line.to_string(), "alpha:dither-depth");
    }

    #[test]
    fn test_stage_fields_shape() {
        let fields = stage_fields("cscale");
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "cscale",
                "cscale-param1",
                "cscale-param2",
                "cscale-radius",
                "cscale-antiring",
                "cscale-blur",
                "cscale-wparam",
                "cscale-window",
                "cscale-clamp",
            ]
        );
        assert_eq!(fields[0].gate, Gate::Always);
        assert_eq!(
            fields[4].source,
            Some(ValueSource::Value("cscaleAntiRingValue".into()))
        );
        assert_eq!(fields[4].gate, Gate::Checked("cscaleAntiRingSet".into()));

        assert_eq!(
            stage_fields("dscale")[0].gate,
            Gate::NonZero("dscaleScalar".into())
        );
    }

    #[test]
    fn test_builtin_keys_are_unique() {
        let fields = video_output_fields();
        let mut keys: Vec<_> = fields.iter().map(|f| f.key.clone()).collect();
        let count = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), count);
    }

    #[test]
    fn test_dumb_mode() {
        let tables = OptionTables::builtin();
        let defaults = SettingMap::new();
        let accepted = map(&[
            (DUMB_MODE_CONTROL, SettingValue::Bool(true)),
            ("debandEnabled", SettingValue::Bool(true)),
        ]);
        let translator = OptionTranslator::new(&tables, &accepted, &defaults);
        assert_eq!(CommandAssembler::new().assemble(&translator), DUMB_MODE_TOKEN);
    }
}
