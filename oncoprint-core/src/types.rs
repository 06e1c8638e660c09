use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OncoPrintError, Result};

/// Alteration category as supplied by the caller.
///
/// Parsing is case-insensitive. Anything outside the known set is kept
/// verbatim in `Unknown` so rendering can fall back instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlterationType {
    Missense,
    Inframe,
    Truncating,
    Promoter,
    /// Point mutation without a finer classification
    Mutation,
    Fusion,
    Cna,
    Expression,
    Unknown(String),
}

impl AlterationType {
    pub fn as_str(&self) -> &str {
        match self {
            AlterationType::Missense => "MISSENSE",
            AlterationType::Inframe => "INFRAME",
            AlterationType::Truncating => "TRUNC",
            AlterationType::Promoter => "PROMOTER",
            AlterationType::Mutation => "MUTATION",
            AlterationType::Fusion => "FUSION",
            AlterationType::Cna => "CNA",
            AlterationType::Expression => "EXP",
            AlterationType::Unknown(raw) => raw,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            AlterationType::Missense
                | AlterationType::Inframe
                | AlterationType::Truncating
                | AlterationType::Promoter
                | AlterationType::Mutation
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AlterationType::Unknown(_))
    }
}

impl From<&str> for AlterationType {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "MISSENSE" => AlterationType::Missense,
            "INFRAME" => AlterationType::Inframe,
            "TRUNC" | "TRUNCATING" => AlterationType::Truncating,
            "PROMOTER" => AlterationType::Promoter,
            "MUTATION" => AlterationType::Mutation,
            "FUSION" => AlterationType::Fusion,
            "CNA" => AlterationType::Cna,
            "EXP" | "EXPRESSION" => AlterationType::Expression,
            _ => AlterationType::Unknown(raw.to_string()),
        }
    }
}

impl From<String> for AlterationType {
    fn from(raw: String) -> Self {
        AlterationType::from(raw.as_str())
    }
}

impl From<AlterationType> for String {
    fn from(kind: AlterationType) -> Self {
        match kind {
            AlterationType::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for AlterationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed alteration of one gene in one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterationRecord {
    pub sample: String,
    pub gene: String,
    #[serde(rename = "type")]
    pub alteration_type: AlterationType,
    /// Display detail: protein change, CNA/expression direction or fusion partner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alteration: Option<String>,
}

impl AlterationRecord {
    pub fn new(
        sample: impl Into<String>,
        gene: impl Into<String>,
        alteration_type: AlterationType,
        alteration: Option<&str>,
    ) -> Self {
        Self {
            sample: sample.into(),
            gene: gene.into(),
            alteration_type,
            alteration: alteration.map(str::to_string),
        }
    }

    /// Parse a JSON array of records in the `{sample, gene, type, alteration}` shape.
    pub fn parse_json_list(input: &str) -> Result<Vec<AlterationRecord>> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a JSON array of records from disk.
    pub fn load_json_list<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<AlterationRecord>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OncoPrintError::io(format!("Failed to read records {}: {}", path.display(), e))
        })?;
        Self::parse_json_list(&content)
    }
}

/// CSS color string handed to the renderer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("rgb({}, {}, {})", r, g, b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.trim().is_empty() {
            return Err(OncoPrintError::invalid_color("color must not be empty"));
        }
        Ok(())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::rgb(190, 190, 190)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::new(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
