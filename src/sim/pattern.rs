//! Brick patterns: which grid cells of a level hold which brick
//!
//! A pattern source is a pure function of the level id. Patterns are written
//! as rows of characters:
//! - `.` empty cell
//! - `#` normal brick
//! - `S` solid brick

use std::path::Path;

use glam::UVec2;
use serde::Deserialize;

use super::entity::BrickKind;
use crate::error::PatternError;

/// Classification of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Normal,
    Solid,
}

impl CellKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Normal),
            'S' => Some(CellKind::Solid),
            _ => None,
        }
    }

    /// Brick to instantiate for this cell, `None` for empty cells
    pub fn brick_kind(self) -> Option<BrickKind> {
        match self {
            CellKind::Empty => None,
            CellKind::Normal => Some(BrickKind::Normal),
            CellKind::Solid => Some(BrickKind::Solid),
        }
    }
}

/// Grid dimensions plus a per-cell classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickPattern {
    /// Columns (x) and rows (y)
    pub num_bricks: UVec2,
    cells: Vec<CellKind>,
}

impl BrickPattern {
    /// Pattern with no cells at all
    pub fn empty() -> Self {
        Self {
            num_bricks: UVec2::ZERO,
            cells: Vec::new(),
        }
    }

    /// Build a `cols` x `rows` pattern by classifying each cell
    pub fn from_fn(cols: u32, rows: u32, mut kind_at: impl FnMut(u32, u32) -> CellKind) -> Self {
        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for iy in 0..rows {
            for ix in 0..cols {
                cells.push(kind_at(ix, iy));
            }
        }
        Self {
            num_bricks: UVec2::new(cols, rows),
            cells,
        }
    }

    /// Parse character rows; `level` is only used in error reports
    pub fn from_rows<S: AsRef<str>>(level: usize, rows: &[S]) -> Result<Self, PatternError> {
        let expected = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(expected * rows.len());

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(PatternError::RaggedRow {
                    level,
                    row,
                    expected,
                    found,
                });
            }
            for cell in line.chars() {
                let kind = CellKind::from_char(cell).ok_or(PatternError::UnknownCell {
                    level,
                    row,
                    cell,
                })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            num_bricks: UVec2::new(expected as u32, rows.len() as u32),
            cells,
        })
    }

    /// Classification of cell (`ix`, `iy`); out-of-range cells are empty
    pub fn brick_kind(&self, ix: u32, iy: u32) -> CellKind {
        if ix >= self.num_bricks.x || iy >= self.num_bricks.y {
            return CellKind::Empty;
        }
        let index = iy as usize * self.num_bricks.x as usize + ix as usize;
        self.cells.get(index).copied().unwrap_or_default()
    }

    /// Number of non-empty cells
    pub fn brick_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != CellKind::Empty).count()
    }
}

/// Maps a level id to its brick pattern
pub trait PatternSource {
    fn pattern(&self, level: u32) -> BrickPattern;
}

impl<F> PatternSource for F
where
    F: Fn(u32) -> BrickPattern,
{
    fn pattern(&self, level: u32) -> BrickPattern {
        self(level)
    }
}

/// Level index for a 1-based id over `count` levels, wrapping past the end
fn wrap_level(level: u32, count: usize) -> usize {
    (level.saturating_sub(1) as usize) % count.max(1)
}

const BUILTIN_LEVELS: &[&[&str]] = &[
    &[
        "########",
        "########",
        "########",
        "########",
    ],
    &[
        "S########S",
        "##########",
        "#.#.##.#.#",
        "##########",
        "..SS..SS..",
    ],
    &[
        "....####....",
        "...######...",
        "..########..",
        ".##########.",
        "SSSS....SSSS",
        "############",
    ],
    &[
        "#S#S#S#S",
        "S#S#S#S#",
        "########",
        "#.#.#.#.",
        "########",
    ],
];

/// The levels that ship with the game
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinPatterns;

impl BuiltinPatterns {
    pub fn level_count(&self) -> usize {
        BUILTIN_LEVELS.len()
    }
}

impl PatternSource for BuiltinPatterns {
    fn pattern(&self, level: u32) -> BrickPattern {
        let index = wrap_level(level, BUILTIN_LEVELS.len());
        BrickPattern::from_rows(index, BUILTIN_LEVELS[index]).unwrap_or_else(|err| {
            log::error!("Built-in level {} is malformed: {}", level, err);
            BrickPattern::empty()
        })
    }
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    levels: Vec<LevelDef>,
}

#[derive(Debug, Deserialize)]
struct LevelDef {
    rows: Vec<String>,
}

/// Levels read from a JSON document: `{ "levels": [ { "rows": [...] } ] }`
#[derive(Debug, Clone)]
pub struct JsonPatterns {
    levels: Vec<BrickPattern>,
}

impl JsonPatterns {
    pub fn from_json(json: &str) -> Result<Self, PatternError> {
        let file: PatternFile = serde_json::from_str(json)?;
        if file.levels.is_empty() {
            return Err(PatternError::NoLevels);
        }

        let levels = file
            .levels
            .iter()
            .enumerate()
            .map(|(index, def)| BrickPattern::from_rows(index, &def.rows))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { levels })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let patterns = Self::from_json(&json)?;
        log::info!(
            "Loaded {} levels from {}",
            patterns.level_count(),
            path.display()
        );
        Ok(patterns)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl PatternSource for JsonPatterns {
    fn pattern(&self, level: u32) -> BrickPattern {
        self.levels[wrap_level(level, self.levels.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let pattern = BrickPattern::from_rows(0, &["#.S", "S#."]).unwrap();
        assert_eq!(pattern.num_bricks, UVec2::new(3, 2));
        assert_eq!(pattern.brick_kind(0, 0), CellKind::Normal);
        assert_eq!(pattern.brick_kind(1, 0), CellKind::Empty);
        assert_eq!(pattern.brick_kind(2, 0), CellKind::Solid);
        assert_eq!(pattern.brick_kind(0, 1), CellKind::Solid);
        assert_eq!(pattern.brick_kind(5, 5), CellKind::Empty);
        assert_eq!(pattern.brick_count(), 4);
    }

    #[test]
    fn test_from_rows_errors() {
        let err = BrickPattern::from_rows(3, &["###", "##"]).unwrap_err();
        assert!(matches!(
            err,
            PatternError::RaggedRow {
                level: 3,
                row: 1,
                expected: 3,
                found: 2
            }
        ));

        let err = BrickPattern::from_rows(0, &["#x#"]).unwrap_err();
        assert!(matches!(err, PatternError::UnknownCell { cell: 'x', .. }));
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let pattern = BrickPattern::from_fn(3, 2, |ix, iy| {
            if ix == 2 && iy == 1 {
                CellKind::Solid
            } else {
                CellKind::Normal
            }
        });
        assert_eq!(pattern.brick_kind(2, 1), CellKind::Solid);
        assert_eq!(pattern.brick_kind(1, 2), CellKind::Empty);
    }

    #[test]
    fn test_builtin_levels_parse_and_wrap() {
        let source = BuiltinPatterns;
        for level in 1..=source.level_count() as u32 {
            assert!(source.pattern(level).brick_count() > 0, "level {level}");
        }
        assert_eq!(source.pattern(1), source.pattern(source.level_count() as u32 + 1));
        assert_eq!(source.pattern(0), source.pattern(1));
    }

    #[test]
    fn test_json_patterns() {
        let json = serde_json::json!({
            "levels": [ { "rows": ["##", "S."] }, { "rows": ["#####"] } ]
        });
        let source = JsonPatterns::from_json(&json.to_string()).unwrap();
        assert_eq!(source.level_count(), 2);
        assert_eq!(source.pattern(1).num_bricks, UVec2::new(2, 2));
        assert_eq!(source.pattern(2).num_bricks, UVec2::new(5, 1));
        assert_eq!(source.pattern(3), source.pattern(1));

        assert!(matches!(
            JsonPatterns::from_json(r#"{ "levels": [] }"#),
            Err(PatternError::NoLevels)
        ));
        assert!(matches!(
            JsonPatterns::from_json("{"),
            Err(PatternError::Parse(_))
        ));
    }

    #[test]
    fn test_large_grid_index_does_not_overflow() {
        let mut pattern = BrickPattern::empty();
        pattern.num_bricks = UVec2::new(70_000, 70_000);
        assert_eq!(pattern.brick_kind(69_999, 69_999), CellKind::Empty);
    }

    #[test]
    fn test_closure_source() {
        let source = |level: u32| BrickPattern::from_fn(level, 1, |_, _| CellKind::Normal);
        assert_eq!(source.pattern(4).num_bricks, UVec2::new(4, 1));
    }
}
