/*!
# Alteration Palette

Closed mapping from alteration class to display name, color and draw width.
Every record resolves to exactly one class; records whose type is not
recognized land in [`AlterationClass::Unknown`], which carries the fallback
style.
*/

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{AlterationRecord, AlterationType, Color};

/// Bar width for coarse-grained copy-number calls
pub const CNA_WIDTH: f64 = 0.8;
/// Bar width for expression changes
pub const EXPRESSION_WIDTH: f64 = 0.6;
/// Bar width for point mutations, fusions and the fallback class
pub const DEFAULT_WIDTH: f64 = 0.4;
/// Bar width of the background grid layer
pub const BACKGROUND_WIDTH: f64 = 0.8;

/// Visual layer classification. Declaration order is the stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlterationClass {
    Amplification,
    Gain,
    ShallowDeletion,
    DeepDeletion,
    CopyNumber,
    Upregulation,
    Downregulation,
    Expression,
    Missense,
    Inframe,
    Truncating,
    Promoter,
    OtherMutation,
    Fusion,
    Unknown,
}

impl AlterationClass {
    pub const ALL: [AlterationClass; 15] = [
        AlterationClass::Amplification,
        AlterationClass::Gain,
        AlterationClass::ShallowDeletion,
        AlterationClass::DeepDeletion,
        AlterationClass::CopyNumber,
        AlterationClass::Upregulation,
        AlterationClass::Downregulation,
        AlterationClass::Expression,
        AlterationClass::Missense,
        AlterationClass::Inframe,
        AlterationClass::Truncating,
        AlterationClass::Promoter,
        AlterationClass::OtherMutation,
        AlterationClass::Fusion,
        AlterationClass::Unknown,
    ];

    /// Resolve the class of a record from its type and direction detail.
    pub fn of(record: &AlterationRecord) -> Self {
        let detail = record
            .alteration
            .as_deref()
            .map(|a| a.trim().to_ascii_uppercase());

        match &record.alteration_type {
            AlterationType::Missense => AlterationClass::Missense,
            AlterationType::Inframe => AlterationClass::Inframe,
            AlterationType::Truncating => AlterationClass::Truncating,
            AlterationType::Promoter => AlterationClass::Promoter,
            AlterationType::Mutation => AlterationClass::OtherMutation,
            AlterationType::Fusion => AlterationClass::Fusion,
            AlterationType::Cna => match detail.as_deref() {
                Some("AMP") => AlterationClass::Amplification,
                Some("GAIN") => AlterationClass::Gain,
                Some("HETLOSS") => AlterationClass::ShallowDeletion,
                Some("HOMDEL") => AlterationClass::DeepDeletion,
                _ => AlterationClass::CopyNumber,
            },
            AlterationType::Expression => match detail.as_deref() {
                Some("UP") => AlterationClass::Upregulation,
                Some("DOWN") => AlterationClass::Downregulation,
                _ => AlterationClass::Expression,
            },
            AlterationType::Unknown(_) => AlterationClass::Unknown,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AlterationClass::Amplification => "Amplification",
            AlterationClass::Gain => "Gain",
            AlterationClass::ShallowDeletion => "Shallow Deletion",
            AlterationClass::DeepDeletion => "Deep Deletion",
            AlterationClass::CopyNumber => "Copy Number Alteration",
            AlterationClass::Upregulation => "mRNA Upregulation",
            AlterationClass::Downregulation => "mRNA Downregulation",
            AlterationClass::Expression => "Expression Change",
            AlterationClass::Missense => "Missense Mutation",
            AlterationClass::Inframe => "Inframe Mutation",
            AlterationClass::Truncating => "Truncating Mutation",
            AlterationClass::Promoter => "Promoter Mutation",
            AlterationClass::OtherMutation => "Mutation",
            AlterationClass::Fusion => "Fusion",
            AlterationClass::Unknown => "Other Alteration",
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            AlterationClass::Amplification => "#FF0000",
            AlterationClass::Gain => "#FFB6C1",
            AlterationClass::ShallowDeletion => "#8FD8D8",
            AlterationClass::DeepDeletion => "#0000FF",
            AlterationClass::CopyNumber => "#C04040",
            AlterationClass::Upregulation => "#FF9999",
            AlterationClass::Downregulation => "#6699CC",
            AlterationClass::Expression => "#B08CC0",
            AlterationClass::Missense => "#008000",
            AlterationClass::Inframe => "#993404",
            AlterationClass::Truncating => "#000000",
            AlterationClass::Promoter => "#FFA942",
            AlterationClass::OtherMutation => "#5E8C31",
            AlterationClass::Fusion => "#8B00C9",
            AlterationClass::Unknown => "#7F7F7F",
        }
    }

    /// Configuration key, e.g. `shallow_deletion`
    pub fn key(self) -> &'static str {
        match self {
            AlterationClass::Amplification => "amplification",
            AlterationClass::Gain => "gain",
            AlterationClass::ShallowDeletion => "shallow_deletion",
            AlterationClass::DeepDeletion => "deep_deletion",
            AlterationClass::CopyNumber => "copy_number",
            AlterationClass::Upregulation => "upregulation",
            AlterationClass::Downregulation => "downregulation",
            AlterationClass::Expression => "expression",
            AlterationClass::Missense => "missense",
            AlterationClass::Inframe => "inframe",
            AlterationClass::Truncating => "truncating",
            AlterationClass::Promoter => "promoter",
            AlterationClass::OtherMutation => "other_mutation",
            AlterationClass::Fusion => "fusion",
            AlterationClass::Unknown => "unknown",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.key() == key)
    }
}

/// Draw width as a function of alteration type only.
pub fn bar_width(alteration_type: &AlterationType) -> f64 {
    match alteration_type {
        AlterationType::Cna => CNA_WIDTH,
        AlterationType::Expression => EXPRESSION_WIDTH,
        _ => DEFAULT_WIDTH,
    }
}

/// Hover description for one record.
///
/// Mutations and fusions show their own detail text (protein change, fusion
/// partner). Recognized directional calls show the class name; unrecognized
/// directions keep the caller's text.
pub fn describe(record: &AlterationRecord) -> String {
    let class = AlterationClass::of(record);
    let detail = record.alteration.as_deref().map(str::trim).filter(|a| !a.is_empty());

    match (&record.alteration_type, class) {
        (AlterationType::Unknown(raw), _) => detail.unwrap_or(raw.as_str()).to_string(),
        (t, _) if t.is_mutation() => detail.unwrap_or(class.display_name()).to_string(),
        (AlterationType::Fusion, _)
        | (_, AlterationClass::CopyNumber)
        | (_, AlterationClass::Expression) => detail.unwrap_or(class.display_name()).to_string(),
        _ => class.display_name().to_string(),
    }
}

/// Resolved style of one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub name: String,
    pub color: Color,
    pub width: f64,
}

/// Palette with optional per-class color overrides
#[derive(Debug, Clone, Default)]
pub struct Palette {
    overrides: BTreeMap<AlterationClass, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from `class key -> color` pairs; unknown keys are skipped.
    pub fn from_overrides<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Color)>,
    {
        let mut palette = Self::new();
        for (key, color) in pairs {
            match AlterationClass::from_key(key) {
                Some(class) => {
                    palette.overrides.insert(class, color.clone());
                }
                None => log::warn!("Ignoring color override for unknown alteration class '{}'", key),
            }
        }
        palette
    }

    pub fn set_color(&mut self, class: AlterationClass, color: Color) {
        self.overrides.insert(class, color);
    }

    pub fn color(&self, class: AlterationClass) -> Color {
        self.overrides
            .get(&class)
            .cloned()
            .unwrap_or_else(|| Color::new(class.default_color()))
    }

    pub fn style(&self, class: AlterationClass, alteration_type: &AlterationType) -> LayerStyle {
        LayerStyle {
            name: class.display_name().to_string(),
            color: self.color(class),
            width: bar_width(alteration_type),
        }
    }
}
