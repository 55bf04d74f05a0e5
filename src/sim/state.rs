//! World state and core simulation types
//!
//! The world owns every actor by value. Anything outside the simulation
//! (players, views) refers to actors by `EntityId` instead of holding them.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Color, Entity, EntityId, Goal, Wall};
use super::ball::{Ball, random_diagonal};
use super::collision::CollisionTable;
use super::paddle::Paddle;
use crate::renderer::View;
use crate::{Point, Velocity, arena_center};

/// Which half of the arena a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// The side that has reached `max_score`, if any
    pub fn winner(&self, max_score: u32) -> Option<Side> {
        if self.left == max_score {
            Some(Side::Left)
        } else if self.right == max_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Things that happened during a tick, for sound/HUD hooks and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a wall or paddle
    Bounce { against: ActorKind, at: Point },
    /// Ball entered a goal
    Goal { scorer: Side, at: Point },
    /// A fresh ball was served from the center
    BallRespawned { at: Point, velocity: Velocity },
}

/// The arena and everything in it
pub struct World {
    width: i32,
    height: i32,
    /// Insertion order doubles as draw order
    pub(crate) actors: Vec<Entity>,
    pub(crate) score: Score,
    pub(crate) collisions: CollisionTable,
    pub(crate) views: Vec<Box<dyn View>>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) tick_count: u64,
    seed: u64,
    next_id: EntityId,
}

impl World {
    /// Create an empty arena; the size is fixed for the world's lifetime
    pub fn new(width: i32, height: i32, collisions: CollisionTable, seed: u64) -> Self {
        assert!(
            width > 0 && height > 0,
            "arena must have a positive size, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            actors: Vec::new(),
            score: Score::default(),
            collisions,
            views: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tick_count: 0,
            seed,
            next_id: 1,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn collisions(&self) -> &CollisionTable {
        &self.collisions
    }

    /// All actors in draw order
    pub fn actors(&self) -> &[Entity] {
        &self.actors
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an actor built elsewhere; its id must come from `next_entity_id`
    pub fn add_actor(&mut self, actor: impl Into<Entity>) -> EntityId {
        let actor = actor.into();
        let id = actor.id();
        assert!(
            self.entity(id).is_none(),
            "entity id {} is already in the world",
            id
        );
        self.actors.push(actor);
        id
    }

    pub fn spawn_wall(&mut self, position: Point) -> EntityId {
        let id = self.next_entity_id();
        self.add_actor(Wall::new(id, position))
    }

    pub fn spawn_goal(&mut self, position: Point) -> EntityId {
        let id = self.next_entity_id();
        self.add_actor(Goal::new(id, position))
    }

    pub fn spawn_paddle(&mut self, head: Point, length: usize, color: Color) -> EntityId {
        let id = self.next_entity_id();
        self.add_actor(Paddle::new(id, head, length, color))
    }

    pub fn spawn_ball(&mut self, position: Point, velocity: Velocity) -> EntityId {
        let id = self.next_entity_id();
        let height = self.height;
        self.add_actor(Ball::new(id, position, velocity, height))
    }

    /// Put a ball at the center heading in a random diagonal direction
    pub fn serve(&mut self) -> EntityId {
        let at = arena_center(self.width, self.height);
        let velocity = random_diagonal(&mut self.rng);
        let id = self.spawn_ball(at, velocity);
        log::debug!("Ball {} served from {} heading {}", id, at, velocity);
        self.events.push(GameEvent::BallRespawned { at, velocity });
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn paddle(&self, id: EntityId) -> Option<&Paddle> {
        self.entity(id).and_then(Entity::as_paddle)
    }

    pub fn paddle_mut(&mut self, id: EntityId) -> Option<&mut Paddle> {
        self.entity_mut(id).and_then(Entity::as_paddle_mut)
    }

    pub fn ball_count(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| matches!(a, Entity::Ball(_)))
            .count()
    }

    /// Index of the one and only ball
    ///
    /// Panics when there is no ball or more than one: either means the
    /// respawn bookkeeping is broken.
    pub fn ball_index(&self) -> usize {
        let mut balls = self
            .actors
            .iter()
            .enumerate()
            .filter(|(_, a)| matches!(a, Entity::Ball(_)))
            .map(|(i, _)| i);
        let Some(index) = balls.next() else {
            log::error!("World has no ball");
            panic!("world invariant violated: no ball in the actor list");
        };
        if balls.next().is_some() {
            let count = self.ball_count();
            log::error!("World has {} balls", count);
            panic!("world invariant violated: {} balls in the actor list", count);
        }
        index
    }

    /// The one and only ball (see `ball_index`)
    pub fn ball(&self) -> &Ball {
        match &self.actors[self.ball_index()] {
            Entity::Ball(ball) => ball,
            _ => unreachable!("ball_index always points at a ball"),
        }
    }

    /// Register a display collaborator, notified after every tick
    pub fn add_view(&mut self, view: Box<dyn View>) {
        self.views.push(view);
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Show the current state on every view
    pub fn notify_views(&mut self) {
        let mut views = std::mem::take(&mut self.views);
        for view in views.iter_mut() {
            view.display(self);
        }
        self.views = views;
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Dispose of every view and remove every actor
    pub fn reset(&mut self) {
        for view in self.views.iter_mut() {
            view.dispose();
        }
        self.views.clear();
        self.actors.clear();
        self.events.clear();
        log::info!("World reset after {} ticks", self.tick_count);
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("actors", &self.actors)
            .field("score", &self.score)
            .field("collisions", &self.collisions)
            .field("views", &self.views.len())
            .field("tick_count", &self.tick_count)
            .finish()
    }
}
