//! Actor capabilities and the entity container the world stores

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::Paddle;
use crate::Point;

/// Stable identifier handed out by the world
pub type EntityId = u32;

/// Entity category, used as the collision dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Wall,
    Goal,
    Paddle,
    Ball,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Wall => "Wall",
            ActorKind::Goal => "Goal",
            ActorKind::Paddle => "Paddle",
            ActorKind::Ball => "Ball",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fill color for an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Gray,
    Red,
    Blue,
    Green,
    Orange,
}

impl Color {
    /// CSS color name for canvas fill styles
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Gray => "gray",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Orange => "orange",
        }
    }
}

/// Anything placed in the arena that takes part in the tick
pub trait Actor {
    fn id(&self) -> EntityId;
    fn kind(&self) -> ActorKind;
    /// Anchor cell (the head segment for paddles)
    fn position(&self) -> Point;
    fn color(&self) -> Color;
    /// Advance by `steps` logical steps
    fn update(&mut self, steps: i32);
}

/// An actor that initiates collision tests against other entities
pub trait Collidable: Actor {
    fn did_collide(&self, other: &Entity) -> bool;
}

/// Boundary cell the ball bounces off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub id: EntityId,
    pub position: Point,
}

impl Wall {
    pub fn new(id: EntityId, position: Point) -> Self {
        Self { id, position }
    }
}

impl Actor for Wall {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Wall
    }

    fn position(&self) -> Point {
        self.position
    }

    fn color(&self) -> Color {
        Color::White
    }

    fn update(&mut self, _steps: i32) {}
}

/// Scoring cell; the side credited is worked out from where it sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: EntityId,
    pub position: Point,
}

impl Goal {
    pub fn new(id: EntityId, position: Point) -> Self {
        Self { id, position }
    }
}

impl Actor for Goal {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Goal
    }

    fn position(&self) -> Point {
        self.position
    }

    fn color(&self) -> Color {
        Color::Gray
    }

    fn update(&mut self, _steps: i32) {}
}

/// Every concrete actor variant, owned by the world's actor list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Wall(Wall),
    Goal(Goal),
    Paddle(Paddle),
    Ball(Ball),
}

impl Entity {
    /// Cells this entity occupies (every segment for paddles)
    pub fn parts(&self) -> &[Point] {
        match self {
            Entity::Wall(wall) => std::slice::from_ref(&wall.position),
            Entity::Goal(goal) => std::slice::from_ref(&goal.position),
            Entity::Paddle(paddle) => paddle.parts(),
            Entity::Ball(ball) => std::slice::from_ref(&ball.position),
        }
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Entity::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Entity::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Entity::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    fn actor(&self) -> &dyn Actor {
        match self {
            Entity::Wall(wall) => wall,
            Entity::Goal(goal) => goal,
            Entity::Paddle(paddle) => paddle,
            Entity::Ball(ball) => ball,
        }
    }

    fn actor_mut(&mut self) -> &mut dyn Actor {
        match self {
            Entity::Wall(wall) => wall,
            Entity::Goal(goal) => goal,
            Entity::Paddle(paddle) => paddle,
            Entity::Ball(ball) => ball,
        }
    }
}

impl Actor for Entity {
    fn id(&self) -> EntityId {
        self.actor().id()
    }

    fn kind(&self) -> ActorKind {
        self.actor().kind()
    }

    fn position(&self) -> Point {
        self.actor().position()
    }

    fn color(&self) -> Color {
        self.actor().color()
    }

    fn update(&mut self, steps: i32) {
        self.actor_mut().update(steps);
    }
}

impl From<Wall> for Entity {
    fn from(wall: Wall) -> Self {
        Entity::Wall(wall)
    }
}

impl From<Goal> for Entity {
    fn from(goal: Goal) -> Self {
        Entity::Goal(goal)
    }
}

impl From<Paddle> for Entity {
    fn from(paddle: Paddle) -> Self {
        Entity::Paddle(paddle)
    }
}

impl From<Ball> for Entity {
    fn from(ball: Ball) -> Self {
        Entity::Ball(ball)
    }
}
