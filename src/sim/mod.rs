//! Simulation module
//!
//! All gameplay logic lives here. This module is pure:
//! - Integer grid, fixed step ticks
//! - Seeded RNG only
//! - Stable iteration order (actor insertion order)
//! - No platform dependencies; views only see the world through `View`

pub mod actor;
pub mod ball;
pub mod collision;
pub mod paddle;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, Collidable, Color, Entity, EntityId, Goal, Wall};
pub use ball::{Ball, random_diagonal};
pub use collision::{CollisionContext, CollisionReaction, CollisionTable, Reflect, ScoreGoal};
pub use paddle::{Direction, Paddle, VerticalBounds};
pub use state::{GameEvent, Score, Side, World};
