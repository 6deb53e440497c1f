//! Error types for simulation, level patterns and settings

use std::fmt;

use crate::sim::EntityId;

/// Errors returned by the simulation core
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Play was started (or a frame was run) before any level was loaded
    NoLevelLoaded,
    /// An entity was specified with a non-positive or non-finite size
    InvalidSize { width: f32, height: f32 },
    /// An entity id did not resolve to a live entity
    MissingEntity(EntityId),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NoLevelLoaded => write!(f, "attempt to start game without loading level"),
            SimError::InvalidSize { width, height } => {
                write!(f, "entity size must be positive, got {width}x{height}")
            }
            SimError::MissingEntity(id) => write!(f, "entity {id} is not in the playfield"),
        }
    }
}

impl std::error::Error for SimError {}

/// Errors produced while reading brick patterns
#[derive(Debug)]
pub enum PatternError {
    Io(std::io::Error),
    /// Pattern file could not be parsed
    Parse(serde_json::Error),
    /// Pattern file defines no levels
    NoLevels,
    /// A row is a different width than the first row of its level
    RaggedRow { level: usize, row: usize, expected: usize, found: usize },
    /// A cell character is not one of `.`, `#`, `S`
    UnknownCell { level: usize, row: usize, cell: char },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Io(err) => write!(f, "pattern read error: {err}"),
            PatternError::Parse(err) => write!(f, "pattern parse error: {err}"),
            PatternError::NoLevels => write!(f, "pattern file defines no levels"),
            PatternError::RaggedRow {
                level,
                row,
                expected,
                found,
            } => write!(
                f,
                "level {level} row {row} has {found} cells, expected {expected}"
            ),
            PatternError::UnknownCell { level, row, cell } => {
                write!(f, "level {level} row {row} has unknown cell {cell:?}")
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Io(err) => Some(err),
            PatternError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PatternError {
    fn from(err: std::io::Error) -> Self {
        PatternError::Io(err)
    }
}

impl From<serde_json::Error> for PatternError {
    fn from(err: serde_json::Error) -> Self {
        PatternError::Parse(err)
    }
}

/// Errors produced while loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A value parsed but is unusable (e.g. non-positive dimension)
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "settings read error: {err}"),
            SettingsError::Parse(err) => write!(f, "settings parse error: {err}"),
            SettingsError::Invalid(what) => write!(f, "invalid settings: {what}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}
