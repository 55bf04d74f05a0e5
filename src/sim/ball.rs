//! The ball: the only actor that initiates collision tests

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Collidable, Color, Entity, EntityId};
use crate::{Point, Velocity};

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    pub position: Point,
    pub velocity: Velocity,
    /// Cleared when the ball enters a goal; the world then replaces it
    active: bool,
    /// Arena height, needed by the reflection rule
    world_height: i32,
    color: Color,
}

impl Ball {
    pub fn new(id: EntityId, position: Point, velocity: Velocity, world_height: i32) -> Self {
        Self {
            id,
            position,
            velocity,
            active: true,
            world_height,
            color: Color::White,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn world_height(&self) -> i32 {
        self.world_height
    }

    /// Mark the ball as scored; it is removed at the end of the tick
    pub fn score(&mut self) {
        self.active = false;
    }

    /// Bounce off whatever the ball just hit
    ///
    /// Away from the top and bottom edges the ball must have hit something
    /// on its side, so the horizontal component flips. On the edge rows it
    /// flips vertically instead. Speed never changes.
    pub fn reflect_angle(&mut self) {
        let y = self.position.y;
        if y > 1 && y < self.world_height - 1 {
            self.velocity.x = -self.velocity.x;
        } else {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Unit diagonal velocity with independently random signs
pub fn random_diagonal<R: Rng>(rng: &mut R) -> Velocity {
    let sign = |positive: bool| if positive { 1 } else { -1 };
    IVec2::new(sign(rng.random_bool(0.5)), sign(rng.random_bool(0.5)))
}

impl Actor for Ball {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Ball
    }

    fn position(&self) -> Point {
        self.position
    }

    fn color(&self) -> Color {
        self.color
    }

    fn update(&mut self, steps: i32) {
        self.position += self.velocity * steps;
    }
}

impl Collidable for Ball {
    fn did_collide(&self, other: &Entity) -> bool {
        if other.id() == self.id {
            return false;
        }
        match other {
            Entity::Paddle(paddle) => paddle.parts().iter().any(|&p| p == self.position),
            _ => other.position() == self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{Goal, Wall};
    use crate::sim::paddle::Paddle;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(x: i32, y: i32, vx: i32, vy: i32) -> Ball {
        Ball::new(99, IVec2::new(x, y), IVec2::new(vx, vy), 25)
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut ball = ball_at(10, 10, 1, -1);
        ball.update(1);
        assert_eq!(ball.position, IVec2::new(11, 9));
        ball.update(2);
        assert_eq!(ball.position, IVec2::new(13, 7));
    }

    #[test]
    fn test_reflect_side_bounce_inside_band() {
        let mut ball = ball_at(3, 12, 1, 1);
        ball.reflect_angle();
        assert_eq!(ball.velocity, IVec2::new(-1, 1));
    }

    #[test]
    fn test_reflect_vertical_on_edge_rows() {
        for y in [0, 1, 24, 25] {
            let mut ball = ball_at(3, y, 1, 1);
            ball.reflect_angle();
            assert_eq!(ball.velocity, IVec2::new(1, -1), "y = {}", y);
        }
    }

    #[test]
    fn test_reflect_band_boundaries() {
        // world_height 25: horizontal flips only for 2..=23
        let mut ball = ball_at(3, 2, 1, 1);
        ball.reflect_angle();
        assert_eq!(ball.velocity, IVec2::new(-1, 1));

        let mut ball = ball_at(3, 23, 1, 1);
        ball.reflect_angle();
        assert_eq!(ball.velocity, IVec2::new(-1, 1));
    }

    #[test]
    fn test_score_deactivates() {
        let mut ball = ball_at(0, 12, -1, 0);
        assert!(ball.is_active());
        ball.score();
        assert!(!ball.is_active());
    }

    #[test]
    fn test_did_collide_single_cell() {
        let ball = ball_at(0, 12, -1, 0);
        let goal = Entity::from(Goal::new(1, IVec2::new(0, 12)));
        let wall = Entity::from(Wall::new(2, IVec2::new(0, 13)));
        assert!(ball.did_collide(&goal));
        assert!(!ball.did_collide(&wall));
    }

    #[test]
    fn test_did_collide_excludes_self() {
        let ball = ball_at(5, 5, 1, 1);
        let same = Entity::from(ball.clone());
        assert!(!ball.did_collide(&same));

        let other = Entity::from(Ball::new(7, IVec2::new(5, 5), IVec2::ONE, 25));
        assert!(ball.did_collide(&other));
    }

    #[test]
    fn test_did_collide_paddle_mid_segment() {
        let segments = (20..25).map(|y| IVec2::new(20, y)).collect();
        let paddle = Entity::from(Paddle::from_segments(1, segments, Color::Red));
        assert!(ball_at(20, 22, 1, 1).did_collide(&paddle));
        assert!(ball_at(20, 24, 1, 1).did_collide(&paddle));
        assert!(!ball_at(20, 25, 1, 1).did_collide(&paddle));
        assert!(!ball_at(21, 22, 1, 1).did_collide(&paddle));
    }

    #[test]
    fn test_random_diagonal_is_unit() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let v = random_diagonal(&mut rng);
            assert_eq!(v.x.abs(), 1);
            assert_eq!(v.y.abs(), 1);
            seen.insert((v.x, v.y));
        }
        assert_eq!(seen.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_reflection_preserves_magnitude(
            y in -5i32..40,
            vx in -3i32..=3,
            vy in -3i32..=3,
            bounces in 1usize..20,
        ) {
            let mut ball = ball_at(10, y, vx, vy);
            for _ in 0..bounces {
                let before = ball.velocity;
                ball.reflect_angle();
                prop_assert_eq!(ball.velocity.abs(), before.abs());
                // Exactly one axis may change sign
                prop_assert!(ball.velocity.x == before.x || ball.velocity.y == before.y);
            }
        }
    }
}
