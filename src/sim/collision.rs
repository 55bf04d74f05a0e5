//! Collision dispatch
//!
//! What happens when the ball touches something is decided by a table keyed
//! by the ordered pair (kind of the thing hit, kind of the initiator). The
//! world only detects contact; the table owns the consequences.

use std::collections::HashMap;

use super::actor::{Actor, ActorKind, Entity};
use super::ball::Ball;
use super::state::{GameEvent, Score, Side};
use crate::arena_center;

/// World state a reaction is allowed to touch besides the ball
pub struct CollisionContext<'a> {
    pub width: i32,
    pub height: i32,
    pub score: &'a mut Score,
    pub events: &'a mut Vec<GameEvent>,
}

/// Response to a detected contact
///
/// Reactions may only change the ball (and the score/event log in the
/// context); `other` is read-only.
pub trait CollisionReaction {
    fn apply(&self, other: &Entity, ball: &mut Ball, ctx: &mut CollisionContext<'_>);
}

impl<F> CollisionReaction for F
where
    F: Fn(&Entity, &mut Ball, &mut CollisionContext<'_>),
{
    fn apply(&self, other: &Entity, ball: &mut Ball, ctx: &mut CollisionContext<'_>) {
        self(other, ball, ctx)
    }
}

/// Bounce the ball (walls and paddles)
#[derive(Debug, Clone, Copy, Default)]
pub struct Reflect;

impl CollisionReaction for Reflect {
    fn apply(&self, other: &Entity, ball: &mut Ball, ctx: &mut CollisionContext<'_>) {
        ball.reflect_angle();
        ctx.events.push(GameEvent::Bounce {
            against: other.kind(),
            at: ball.position,
        });
    }
}

/// Take the ball out of play and credit the side opposite the goal
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreGoal;

impl ScoreGoal {
    /// A goal on the left half is defended by Left, so Right scores
    pub fn scorer(goal: &Entity, width: i32, height: i32) -> Side {
        if goal.position().x < arena_center(width, height).x {
            Side::Right
        } else {
            Side::Left
        }
    }
}

impl CollisionReaction for ScoreGoal {
    fn apply(&self, other: &Entity, ball: &mut Ball, ctx: &mut CollisionContext<'_>) {
        ball.score();
        let scorer = Self::scorer(other, ctx.width, ctx.height);
        ctx.score.increment(scorer);
        ctx.events.push(GameEvent::Goal {
            scorer,
            at: ball.position,
        });
    }
}

/// Reaction registry keyed by (collider kind, collided kind)
#[derive(Default)]
pub struct CollisionTable {
    pairs: HashMap<(ActorKind, ActorKind), Box<dyn CollisionReaction>>,
}

impl CollisionTable {
    /// An empty table: every contact is ignored
    pub fn new() -> Self {
        Self::default()
    }

    /// Wall and paddle bounce the ball, goals score it
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(ActorKind::Wall, ActorKind::Ball, Reflect);
        table.register(ActorKind::Paddle, ActorKind::Ball, Reflect);
        table.register(ActorKind::Goal, ActorKind::Ball, ScoreGoal);
        table
    }

    /// Register (or replace) the reaction for an ordered pair
    pub fn register<R>(&mut self, collider: ActorKind, collided: ActorKind, reaction: R)
    where
        R: CollisionReaction + 'static,
    {
        self.pairs.insert((collider, collided), Box::new(reaction));
    }

    pub fn has_reaction(&self, collider: ActorKind, collided: ActorKind) -> bool {
        self.pairs.contains_key(&(collider, collided))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Run the reaction registered for `(other.kind(), ball.kind())`
    ///
    /// Returns false (and does nothing) for unregistered pairs.
    pub fn apply(&self, other: &Entity, ball: &mut Ball, ctx: &mut CollisionContext<'_>) -> bool {
        match self.pairs.get(&(other.kind(), ball.kind())) {
            Some(reaction) => {
                reaction.apply(other, ball, ctx);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for CollisionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.pairs.keys().collect();
        keys.sort_by_key(|(a, b)| (a.as_str(), b.as_str()));
        f.debug_struct("CollisionTable").field("pairs", &keys).finish()
    }
}
