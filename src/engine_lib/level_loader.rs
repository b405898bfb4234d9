// src/engine_lib/level_loader.rs
//! Line-oriented level format.
//!
//! ```text
//! [WALLS]
//! <id> <x1> <z1> <x2> <z2> <is_solid> [<is_invisible> [<r> <g> <b> [<texture>]]]
//! [SECTORS]
//! <id> <light> <floor_h> <ceil_h> <wall_id>...
//! ```
//!
//! `#` comments and blank lines are ignored. Walls are staged by id and copied
//! into each sector that lists them, so one wall id may appear in several sectors.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::level_types::{Level, Sector, SectorId, Wall, WallId};

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Syntax { line: usize, message: String },
    DuplicateWallId { line: usize, wall_id: WallId },
    UnknownWallId { line: usize, sector_id: SectorId, wall_id: WallId },
    DegenerateWall { line: usize, wall_id: WallId },
    InvalidHeights { line: usize, sector_id: SectorId, floor_height: f32, ceil_height: f32 },
    NotEnclosed { sector_id: SectorId, walls: Vec<Wall> },
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "IO error: {}", e),
            LevelError::Syntax { line, message } => write!(f, "line {}: {}", line, message),
            LevelError::DuplicateWallId { line, wall_id } => {
                write!(f, "line {}: wall {} is defined more than once", line, wall_id)
            }
            LevelError::UnknownWallId { line, sector_id, wall_id } => {
                write!(f, "line {}: sector {} references undefined wall {}", line, sector_id, wall_id)
            }
            LevelError::DegenerateWall { line, wall_id } => {
                write!(f, "line {}: wall {} has identical endpoints", line, wall_id)
            }
            LevelError::InvalidHeights { line, sector_id, floor_height, ceil_height } => write!(
                f,
                "line {}: sector {} ceiling {} is not above floor {}",
                line, sector_id, ceil_height, floor_height
            ),
            LevelError::NotEnclosed { sector_id, walls } => {
                write!(f, "sector {} walls are not enclosed", sector_id)?;
                for wall in walls {
                    write!(
                        f,
                        "\n  Wall {}: ({}, {}) -> ({}, {})",
                        wall.id, wall.x1, wall.z1, wall.x2, wall.z2
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Walls,
    Sectors,
}

struct LineFields<'a> {
    line: usize,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> LineFields<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self { line, tokens: text.split_whitespace() }
    }

    fn required<T: FromStr>(&mut self, what: &str) -> Result<T, LevelError> {
        let token = self.tokens.next().ok_or_else(|| LevelError::Syntax {
            line: self.line,
            message: format!("missing {}", what),
        })?;
        self.parse(token, what)
    }

    fn optional<T: FromStr>(&mut self, what: &str) -> Result<Option<T>, LevelError> {
        match self.tokens.next() {
            Some(token) => self.parse(token, what).map(Some),
            None => Ok(None),
        }
    }

    fn flag(&mut self, what: &str) -> Result<Option<bool>, LevelError> {
        Ok(self.optional::<i32>(what)?.map(|v| v != 0))
    }

    fn parse<T: FromStr>(&self, token: &str, what: &str) -> Result<T, LevelError> {
        token.parse().map_err(|_| LevelError::Syntax {
            line: self.line,
            message: format!("invalid {} '{}'", what, token),
        })
    }
}

fn parse_wall(fields: &mut LineFields) -> Result<Wall, LevelError> {
    let id = fields.required("wall id")?;
    let x1 = fields.required("x1")?;
    let z1 = fields.required("z1")?;
    let x2 = fields.required("x2")?;
    let z2 = fields.required("z2")?;
    let is_solid = fields
        .flag("is_solid")?
        .ok_or_else(|| LevelError::Syntax { line: fields.line, message: "missing is_solid".to_string() })?;

    let mut wall = Wall::new(id, x1, z1, x2, z2, is_solid);
    wall.is_invisible = fields.flag("is_invisible")?.unwrap_or(false);
    for channel in 0..3 {
        if let Some(value) = fields.optional::<f32>("color component")? {
            wall.color[channel] = value;
        }
    }
    wall.texture_ref = fields.tokens.next().map(str::to_string);

    if wall.is_degenerate() {
        return Err(LevelError::DegenerateWall { line: fields.line, wall_id: id });
    }
    Ok(wall)
}

fn parse_sector(fields: &mut LineFields, staged_walls: &HashMap<WallId, Wall>) -> Result<Sector, LevelError> {
    let id: SectorId = fields.required("sector id")?;
    let light: f32 = fields.required("light")?;
    let floor_height: f32 = fields.required("floor height")?;
    let ceil_height: f32 = fields.required("ceiling height")?;

    if ceil_height <= floor_height {
        return Err(LevelError::InvalidHeights { line: fields.line, sector_id: id, floor_height, ceil_height });
    }

    let light_intensity = if (0.0..=1.0).contains(&light) {
        light
    } else {
        log::warn!("line {}: sector {} light {} clamped to [0, 1]", fields.line, id, light);
        light.clamp(0.0, 1.0)
    };

    let mut walls = Vec::new();
    while let Some(wall_id) = fields.optional::<WallId>("wall id")? {
        let wall = staged_walls
            .get(&wall_id)
            .ok_or(LevelError::UnknownWallId { line: fields.line, sector_id: id, wall_id })?;
        walls.push(wall.clone());
    }
    if walls.is_empty() {
        log::warn!("line {}: sector {} has no walls", fields.line, id);
    }

    let sector = Sector::new(id, light_intensity, floor_height, ceil_height, walls);
    if !sector.is_enclosed() {
        return Err(LevelError::NotEnclosed { sector_id: id, walls: sector.walls });
    }
    Ok(sector)
}

/// Cuts the line at the first token starting with `#`.
fn strip_comment(line: &str) -> &str {
    let mut after_space = true;
    for (i, c) in line.char_indices() {
        if c == '#' && after_space {
            return &line[..i];
        }
        after_space = c.is_whitespace();
    }
    line
}

impl Level {
    /// Parses level text. The wall staging table lives only for this call.
    pub fn parse(name: impl Into<String>, source_path: impl Into<String>, text: &str) -> Result<Level, LevelError> {
        let mut level = Level::empty(name, source_path);
        let mut staged_walls: HashMap<WallId, Wall> = HashMap::new();
        let mut section = Section::None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with("[WALLS]") {
                section = Section::Walls;
                continue;
            }
            if line.starts_with("[SECTORS]") {
                section = Section::Sectors;
                continue;
            }

            let mut fields = LineFields::new(line_no, line);
            match section {
                Section::None => {
                    log::warn!("{}:{}: data outside of any section skipped", level.source_path, line_no);
                }
                Section::Walls => {
                    let wall = parse_wall(&mut fields)?;
                    if staged_walls.contains_key(&wall.id) {
                        return Err(LevelError::DuplicateWallId { line: line_no, wall_id: wall.id });
                    }
                    staged_walls.insert(wall.id, wall);
                }
                Section::Sectors => {
                    let sector = parse_sector(&mut fields, &staged_walls)?;
                    level.sectors.push(sector);
                }
            }
        }

        log::info!(
            "Loaded level '{}': {} sectors, {} walls",
            level.name,
            level.sector_count(),
            staged_walls.len()
        );
        Ok(level)
    }

    /// Reads and parses a level file.
    ///
    /// A file that cannot be read is logged and yields an empty level; callers check
    /// `sector_count()` before using it. Malformed content is an error.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Level, LevelError> {
        let path = path.as_ref();
        let source_path = path.display().to_string();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_path.clone());

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Could not open level file {}: {}", source_path, e);
                return Ok(Level::empty(name, source_path));
            }
        };
        Level::parse(name, source_path, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = "\
# two rooms joined by a doorway
[WALLS]
0 0 0 4 0 1
1 4 0 4 4 0 1 0.5 0.5 0.5
2 4 4 0 4 1 0 1 0 0 brick
3 0 4 0 0 1
4 4 0 8 0 1
5 8 0 8 4 1
6 8 4 4 4 1
7 4 4 4 0 0 1

[SECTORS]
0 1.0 0.0 3.0 0 1 2 3
1 0.5 0.5 3.0 4 5 6 7
";

    #[test]
    fn parses_walls_and_sectors() {
        let level = Level::parse("two_rooms", "mem", TWO_ROOMS).unwrap();
        assert_eq!(level.sector_count(), 2);
        assert_eq!(level.wall_count(), 8);

        let first = &level.sectors[0];
        assert_eq!(first.floor_height, 0.0);
        assert_eq!(first.ceil_height, 3.0);
        assert!(first.walls[1].is_invisible);
        assert_eq!(first.walls[1].color, [0.5, 0.5, 0.5]);
        assert!(!first.walls[2].is_invisible);
        assert_eq!(first.walls[2].color, [1.0, 0.0, 0.0]);
        assert_eq!(first.walls[2].texture_ref.as_deref(), Some("brick"));
        assert_eq!(first.walls[0].color, [1.0, 1.0, 1.0]);
        assert!(level.sectors[1].walls[3].is_invisible);
    }

    #[test]
    fn every_loaded_sector_is_closed() {
        let level = Level::parse("two_rooms", "mem", TWO_ROOMS).unwrap();
        for sector in &level.sectors {
            assert!(sector.is_enclosed(), "sector {} not closed", sector.id);
        }
    }

    #[test]
    fn open_sector_is_rejected_with_wall_dump() {
        let text = "[WALLS]\n0 0 0 1 0 1\n1 1 0 1 1 1\n2 1 1 0 2 1\n[SECTORS]\n7 1 0 2 0 1 2\n";
        let err = Level::parse("open", "mem", text).unwrap_err();
        match &err {
            LevelError::NotEnclosed { sector_id, walls } => {
                assert_eq!(*sector_id, 7);
                assert_eq!(walls.len(), 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("sector 7"));
        assert!(message.contains("Wall 2: (1, 1) -> (0, 2)"));
    }

    #[test]
    fn duplicate_wall_id_is_rejected() {
        let text = "[WALLS]\n0 0 0 1 0 1\n0 1 0 1 1 1\n";
        assert!(matches!(
            Level::parse("dup", "mem", text),
            Err(LevelError::DuplicateWallId { line: 3, wall_id: 0 })
        ));
    }

    #[test]
    fn unknown_wall_reference_is_rejected() {
        let text = "[WALLS]\n0 0 0 1 0 1\n[SECTORS]\n0 1 0 2 0 9\n";
        assert!(matches!(
            Level::parse("unknown", "mem", text),
            Err(LevelError::UnknownWallId { sector_id: 0, wall_id: 9, .. })
        ));
    }

    #[test]
    fn short_wall_line_is_a_syntax_error() {
        let text = "[WALLS]\n0 0 0 1 0\n";
        assert!(matches!(Level::parse("short", "mem", text), Err(LevelError::Syntax { line: 2, .. })));
    }

    #[test]
    fn degenerate_wall_and_inverted_heights_are_rejected() {
        assert!(matches!(
            Level::parse("deg", "mem", "[WALLS]\n3 1 1 1 1 1\n"),
            Err(LevelError::DegenerateWall { wall_id: 3, .. })
        ));
        let text = "[WALLS]\n0 0 0 1 0 1\n1 1 0 0 0 1\n[SECTORS]\n0 1 2 2 0 1\n";
        assert!(matches!(Level::parse("heights", "mem", text), Err(LevelError::InvalidHeights { .. })));
    }

    #[test]
    fn light_is_clamped() {
        let text = "[WALLS]\n0 0 0 1 0 1\n1 1 0 0 1 1\n2 0 1 0 0 1\n[SECTORS]\n0 1.5 0 2 0 1 2\n";
        let level = Level::parse("bright", "mem", text).unwrap();
        assert_eq!(level.sectors[0].light_intensity, 1.0);
    }

    #[test]
    fn lines_before_a_section_are_skipped() {
        let level = Level::parse("stray", "mem", "1 2 3\n   \n# note\n").unwrap();
        assert!(level.is_empty());
    }

    #[test]
    fn negative_sector_id_is_accepted() {
        let text = "[WALLS]\n0 0 0 1 0 1\n1 1 0 0 1 1\n2 0 1 0 0 1\n[SECTORS]\n-1 1 0 2 0 1 2\n";
        let level = Level::parse("negative", "mem", text).unwrap();
        assert_eq!(level.sectors[0].id, -1);
        assert_eq!(level.find_containing_sector(0.2, 0.2).map(|s| s.id), Some(-1));
    }

    #[test]
    fn sector_closing_within_epsilon_loads() {
        let text = "[WALLS]\n0 0 0 1 0 1\n1 1 0 0.001 1 1\n2 0.001 1 0.001 0 1\n[SECTORS]\n0 1 0 2 0 1 2\n";
        let level = Level::parse("tight", "mem", text).unwrap();
        assert_eq!(level.sector_count(), 1);
    }

    #[test]
    fn trailing_comments_are_ignored() {
        let text = "[WALLS]  # boundary\n\
                    0 0 0 1 0 1 # floor edge\n\
                    1 1 0 0 1 1 0 0.5 0.5 0.5 stone #diagonal\n\
                    2 0 1 0 0 1\n\
                    [SECTORS]\n\
                    0 1 0 3 0 1 2 # room\n";
        let level = Level::parse("commented", "mem", text).unwrap();
        assert_eq!(level.wall_count(), 3);
        assert_eq!(level.sectors[0].walls[1].texture_ref.as_deref(), Some("stone"));
        assert_eq!(level.sectors[0].walls[1].color, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn missing_file_yields_empty_level() {
        let level = Level::load_from_file("definitely/not/here.lvl").unwrap();
        assert!(level.is_empty());
        assert_eq!(level.name, "here");
    }
}
