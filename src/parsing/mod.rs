//! A module for parsing curriculum files.
//!
//! This module is concerned with loading curriculum files from disk (or the
//! curriculum bundled with the binary), checking their version and turning
//! them into an immutable [Curriculum]. Walking the curriculum is the
//! responsibility of the [navigator](crate::navigator).

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;

use crate::curriculum::Curriculum;

use self::v1::JsonCurriculumV1;

pub mod v1;

pub const V_1_0: &str = "1.0";

/// The Soroban curriculum shipped with the tutorial.
const CURRICULUM_BUILTIN: &str = include_str!("../../courses/soroban.yml");

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("failed to open curriculum file at {0}")]
    FileOpenError(String),
    #[error("invalid curriculum format: {0}")]
    CurriculumFmtError(String),
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("invalid pattern in lesson '{lesson}': {source}")]
    PatternError {
        lesson: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are read as JSON, anything else as YAML.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

pub enum JsonCurriculumVersion {
    V1(JsonCurriculumV1),
}

impl TryFrom<JsonCurriculumVersion> for Curriculum {
    type Error = ParsingError;

    fn try_from(value: JsonCurriculumVersion) -> Result<Self, Self::Error> {
        match value {
            JsonCurriculumVersion::V1(curriculum) => curriculum.try_into(),
        }
    }
}

#[derive(Deserialize)]
struct JsonVersioned {
    version: Option<Value>,
}

pub fn load_curriculum(path: &str) -> Result<Curriculum, ParsingError> {
    log::debug!("Loading curriculum '{path}'");

    let contents = std::fs::read_to_string(path).map_err(|err| {
        ParsingError::FileOpenError(format!("{path}: {err}"))
    })?;

    parse_curriculum(&contents, Format::from_path(path), path)
}

pub fn load_builtin() -> Result<Curriculum, ParsingError> {
    log::debug!("Loading built-in curriculum");

    parse_curriculum(CURRICULUM_BUILTIN, Format::Yaml, "<built-in>")
}

/// Parses a curriculum document. `origin` only serves to give context in
/// error messages.
pub fn parse_curriculum(
    contents: &str,
    format: Format,
    origin: &str,
) -> Result<Curriculum, ParsingError> {
    let JsonVersioned { version } = deserialize(contents, format)?;

    let version = version.ok_or_else(|| {
        ParsingError::CurriculumFmtError(format!(
            "missing field 'version' in {origin}"
        ))
    })?;

    let curriculum = match version {
        Value::String(version) => match version.as_str() {
            V_1_0 => {
                log::debug!("Parsing curriculum as version 1.0");
                JsonCurriculumVersion::V1(deserialize(contents, format)?)
            }
            _ => {
                log::error!("Invalid curriculum version: {version}");
                return Err(ParsingError::CurriculumFmtError(format!(
                    "invalid curriculum version '{version}' in {origin}"
                )));
            }
        },
        _ => {
            return Err(ParsingError::CurriculumFmtError(format!(
                "'version' must be a string in {origin}"
            )))
        }
    };

    let curriculum = Curriculum::try_from(curriculum)?;
    log::debug!(
        "Curriculum '{}' loaded successfully, {} modules",
        curriculum.title(),
        curriculum.module_count()
    );

    Ok(curriculum)
}

fn deserialize<T: DeserializeOwned>(
    contents: &str,
    format: Format,
) -> Result<T, ParsingError> {
    match format {
        Format::Yaml => Ok(serde_yaml::from_str(contents)?),
        Format::Json => Ok(serde_json::from_str(contents)?),
    }
}
