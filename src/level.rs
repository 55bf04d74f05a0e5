//! Character-grid level layouts
//!
//! A level is a rectangle of single characters, one string per row:
//! `w` is a wall cell, `g` is a goal cell, anything else is empty floor.

use glam::IVec2;

use crate::error::LevelError;
use crate::sim::World;

pub const WALL_CELL: char = 'w';
pub const GOAL_CELL: char = 'g';
pub const EMPTY_CELL: char = ' ';

/// A parsed, rectangular level grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Level {
    /// Parse newline-separated rows
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    /// Build from rows that must all have the same number of characters
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let rows: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = rows.first().map(Vec::len).ok_or(LevelError::Empty)?;
        if width == 0 {
            return Err(LevelError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(LevelError::Ragged {
                row,
                expected: width,
                found,
            });
        }
        Ok(Self { rows, width })
    }

    /// Default arena: goal columns on the left and right edges, wall rows
    /// along the top and bottom between them
    pub fn bordered(width: i32, height: i32) -> Self {
        let width = width.max(1) as usize;
        let height = height.max(1) as usize;
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        if x == 0 || x == width - 1 {
                            GOAL_CELL
                        } else if y == 0 || y == height - 1 {
                            WALL_CELL
                        } else {
                            EMPTY_CELL
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cells holding `c`, as (column, row)
    fn cells(&self, c: char) -> impl Iterator<Item = IVec2> + '_ {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |&(_, &cell)| cell == c)
                .map(move |(x, _)| IVec2::new(x as i32, y as i32))
        })
    }

    pub fn wall_count(&self) -> usize {
        self.cells(WALL_CELL).count()
    }

    pub fn goal_count(&self) -> usize {
        self.cells(GOAL_CELL).count()
    }

    /// Add a wall or goal to `world` for every marked cell, row by row
    pub fn load_into(&self, world: &mut World) {
        if self.width() as i32 != world.width() || self.height() as i32 != world.height() {
            log::warn!(
                "Level is {}x{} but the arena is {}x{}",
                self.width(),
                self.height(),
                world.width(),
                world.height()
            );
        }
        let mut walls = 0;
        let mut goals = 0;
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let at = IVec2::new(x as i32, y as i32);
                match cell {
                    WALL_CELL => {
                        world.spawn_wall(at);
                        walls += 1;
                    }
                    GOAL_CELL => {
                        world.spawn_goal(at);
                        goals += 1;
                    }
                    _ => {}
                }
            }
        }
        log::debug!("Loaded level: {} walls, {} goals", walls, goals);
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Actor, ActorKind, CollisionTable};

    #[test]
    fn test_parse_and_load() {
        let level = Level::parse("wwww\ng..g\nwwww").unwrap();
        assert_eq!(level.width(), 4);
        assert_eq!(level.height(), 3);

        let mut world = World::new(4, 3, CollisionTable::standard(), 0);
        level.load_into(&mut world);
        let walls: Vec<_> = world
            .actors()
            .iter()
            .filter(|a| a.kind() == ActorKind::Wall)
            .map(|a| a.position())
            .collect();
        let goals: Vec<_> = world
            .actors()
            .iter()
            .filter(|a| a.kind() == ActorKind::Goal)
            .map(|a| a.position())
            .collect();
        assert_eq!(walls.len(), 8);
        assert_eq!(goals, vec![IVec2::new(0, 1), IVec2::new(3, 1)]);
        assert!(walls.contains(&IVec2::new(3, 2)));
    }

    #[test]
    fn test_unknown_characters_are_floor() {
        let level = Level::from_rows(&["x?w", "g.#"]).unwrap();
        assert_eq!(level.wall_count(), 1);
        assert_eq!(level.goal_count(), 1);
    }

    #[test]
    fn test_reject_empty() {
        assert_eq!(Level::parse(""), Err(LevelError::Empty));
        assert_eq!(Level::from_rows(&[""]), Err(LevelError::Empty));
    }

    #[test]
    fn test_reject_ragged() {
        let err = Level::from_rows(&["www", "ww", "www"]).unwrap_err();
        assert_eq!(
            err,
            LevelError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_bordered_layout() {
        let level = Level::bordered(6, 4);
        assert_eq!(level.to_string(), "gwwwwg\ng    g\ng    g\ngwwwwg");
        assert_eq!(level.goal_count(), 8);
        assert_eq!(level.wall_count(), 8);
        assert_eq!(Level::parse(&level.to_string()).unwrap(), level);
    }
}
