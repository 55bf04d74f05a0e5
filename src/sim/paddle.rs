//! Segmented paddle
//!
//! A paddle is a short column of cells. Segment 0 is the head: it is the
//! only one that moves on its own. Every trailing segment takes the old
//! position of the segment in front of it, so the body follows the head
//! like a shift register.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Color, EntityId};
use crate::Point;

/// Pending paddle command for the next update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
}

/// Inclusive vertical range the head may occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalBounds {
    pub min_y: i32,
    pub max_y: i32,
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    segments: Vec<Point>,
    direction: Direction,
    color: Color,
    /// Head clamp, `None` for unbounded movement
    #[serde(default)]
    bounds: Option<VerticalBounds>,
}

impl Paddle {
    /// Create a vertical paddle of `length` cells hanging down from `head`
    pub fn new(id: EntityId, head: Point, length: usize, color: Color) -> Self {
        assert!(length > 0, "paddle needs at least one segment");
        let segments = (0..length as i32)
            .map(|i| IVec2::new(head.x, head.y + i))
            .collect();
        Self {
            id,
            segments,
            direction: Direction::None,
            color,
            bounds: None,
        }
    }

    /// Create a paddle from explicit segment positions (head first)
    pub fn from_segments(id: EntityId, segments: Vec<Point>, color: Color) -> Self {
        assert!(!segments.is_empty(), "paddle needs at least one segment");
        Self {
            id,
            segments,
            direction: Direction::None,
            color,
            bounds: None,
        }
    }

    /// Restrict head movement to `[min_y, max_y]`
    pub fn with_bounds(mut self, min_y: i32, max_y: i32) -> Self {
        self.bounds = Some(VerticalBounds { min_y, max_y });
        self
    }

    pub fn bounds(&self) -> Option<VerticalBounds> {
        self.bounds
    }

    /// All segments, head first
    pub fn parts(&self) -> &[Point] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move up on the next update
    pub fn turn_up(&mut self) {
        self.direction = Direction::Up;
    }

    /// Move down on the next update
    pub fn turn_down(&mut self) {
        self.direction = Direction::Down;
    }

    /// Apply the pending direction, then forget it
    pub fn move_by(&mut self, steps: i32) {
        let direction = std::mem::take(&mut self.direction);
        let head = self.segments[0];
        let mut next = match direction {
            Direction::None => return,
            Direction::Up => IVec2::new(head.x, head.y - steps),
            Direction::Down => IVec2::new(head.x, head.y + steps),
        };

        if let Some(bounds) = self.bounds {
            next.y = next.y.clamp(bounds.min_y, bounds.max_y);
            if next == head {
                return;
            }
        }

        // Drop the tail, push the new head: every segment inherits its predecessor
        self.segments.pop();
        self.segments.insert(0, next);
    }
}

impl Actor for Paddle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Paddle
    }

    fn position(&self) -> Point {
        self.segments[0]
    }

    fn color(&self) -> Color {
        self.color
    }

    fn update(&mut self, steps: i32) {
        self.move_by(steps);
    }
}
