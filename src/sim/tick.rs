//! Fixed step simulation tick
//!
//! One tick: move everything, test the ball against everything else, let the
//! collision table react, replace a scored ball, show the result.

use super::actor::{Actor, Collidable, Entity};
use super::collision::CollisionContext;
use super::state::World;

impl World {
    /// Advance the simulation by `steps` logical steps
    pub fn update(&mut self, steps: i32) {
        assert!(steps > 0, "tick must advance at least one step, got {}", steps);

        for actor in self.actors.iter_mut() {
            actor.update(steps);
        }

        // Lift the ball out so it can be mutated while the rest is read
        let index = self.ball_index();
        let Entity::Ball(mut ball) = self.actors.remove(index) else {
            unreachable!("ball_index always points at a ball");
        };

        let mut ctx = CollisionContext {
            width: self.width(),
            height: self.height(),
            score: &mut self.score,
            events: &mut self.events,
        };
        for other in self.actors.iter() {
            if ball.did_collide(other) {
                self.collisions.apply(other, &mut ball, &mut ctx);
            }
        }

        if ball.is_active() {
            self.actors.insert(index, Entity::Ball(ball));
        } else {
            log::info!(
                "Ball {} scored at {}; score {}:{}",
                ball.id,
                ball.position,
                self.score.left,
                self.score.right
            );
            self.serve();
        }

        self.tick_count += 1;
        self.notify_views();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::View;
    use crate::sim::actor::{ActorKind, Color};
    use crate::sim::ball::Ball;
    use crate::sim::collision::CollisionTable;
    use crate::sim::paddle::Paddle;
    use crate::sim::state::{GameEvent, Score, Side};
    use glam::IVec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn world() -> World {
        World::new(50, 25, CollisionTable::standard(), 12345)
    }

    fn add_ball(world: &mut World, x: i32, y: i32, vx: i32, vy: i32) -> u32 {
        world.spawn_ball(IVec2::new(x, y), IVec2::new(vx, vy))
    }

    #[test]
    fn test_goal_scores_and_respawns() {
        let mut w = world();
        // The ball moves before collisions are tested, so start one cell in
        add_ball(&mut w, 1, 12, -1, 0);
        w.spawn_goal(IVec2::new(0, 12));
        let old_id = w.ball().id;

        w.update(1);

        assert_eq!(w.score(), Score { left: 0, right: 1 });
        assert_eq!(w.ball_count(), 1);
        let ball = w.ball();
        assert_ne!(ball.id, old_id);
        assert!(ball.is_active());
        assert_eq!(ball.position, IVec2::new(25, 12));
        assert_eq!(ball.velocity.abs(), IVec2::ONE);
        // Respawned ball goes to the end of the actor list
        assert!(matches!(w.actors().last(), Some(Entity::Ball(_))));

        let events = w.take_events();
        assert!(matches!(
            events.as_slice(),
            [
                GameEvent::Goal { scorer: Side::Right, .. },
                GameEvent::BallRespawned { .. }
            ]
        ));
    }

    #[test]
    fn test_right_goal_credits_left() {
        let mut w = world();
        w.spawn_goal(IVec2::new(49, 12));
        add_ball(&mut w, 48, 12, 1, 0);
        w.update(1);
        assert_eq!(w.score(), Score { left: 1, right: 0 });
    }

    #[test]
    fn test_paddle_mid_segment_bounce_keeps_ball() {
        let mut w = world();
        let segments = (20..25).map(|y| IVec2::new(20, y)).collect();
        let id = w.next_entity_id();
        w.add_actor(Paddle::from_segments(id, segments, Color::Red));
        let ball_id = add_ball(&mut w, 19, 21, 1, 1);

        w.update(1);

        let ball = w.ball();
        assert_eq!(ball.id, ball_id);
        assert_eq!(ball.position, IVec2::new(20, 22));
        assert_eq!(ball.velocity, IVec2::new(-1, 1));
        assert_eq!(w.score(), Score::default());
        // Ball keeps its slot when it stays in play
        assert!(matches!(w.actors()[1], Entity::Ball(_)));
    }

    #[test]
    fn test_wall_on_edge_row_flips_vertical() {
        let mut w = world();
        w.spawn_wall(IVec2::new(10, 0));
        add_ball(&mut w, 9, 1, 1, -1);
        w.update(1);
        assert_eq!(w.ball().velocity, IVec2::new(1, 1));
    }

    #[test]
    fn test_every_hit_in_a_tick_applies() {
        // Two walls on the same cell: both reflections run, cancelling out
        let mut w = world();
        w.spawn_wall(IVec2::new(10, 10));
        w.spawn_wall(IVec2::new(10, 10));
        add_ball(&mut w, 9, 9, 1, 1);
        w.update(1);
        assert_eq!(w.ball().velocity, IVec2::new(1, 1));
        let bounces = w
            .take_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Bounce { against: ActorKind::Wall, .. }))
            .count();
        assert_eq!(bounces, 2);
    }

    #[test]
    fn test_unregistered_pair_is_ignored_in_tick() {
        let mut w = World::new(50, 25, CollisionTable::new(), 1);
        w.spawn_goal(IVec2::new(5, 5));
        add_ball(&mut w, 4, 4, 1, 1);
        w.update(1);
        assert!(w.ball().is_active());
        assert_eq!(w.ball().position, IVec2::new(5, 5));
    }

    #[test]
    fn test_paddles_move_during_tick() {
        let mut w = world();
        let paddle = w.spawn_paddle(IVec2::new(2, 10), 3, Color::Blue);
        w.serve();
        if let Some(p) = w.paddle_mut(paddle) {
            p.turn_up();
        }
        w.update(1);
        assert_eq!(
            w.paddle(paddle).map(|p| p.parts().to_vec()),
            Some(vec![IVec2::new(2, 9), IVec2::new(2, 10), IVec2::new(2, 11)])
        );
    }

    #[test]
    fn test_exactly_one_ball_after_many_ticks() {
        let mut w = world();
        crate::level::Level::bordered(50, 25).load_into(&mut w);
        w.serve();
        for _ in 0..500 {
            w.update(1);
            assert_eq!(w.ball_count(), 1);
        }
        assert_eq!(w.tick_count(), 500);
    }

    #[test]
    #[should_panic(expected = "no ball")]
    fn test_tick_without_ball_panics() {
        let mut w = world();
        w.spawn_wall(IVec2::ZERO);
        w.update(1);
    }

    #[test]
    #[should_panic(expected = "at least one step")]
    fn test_zero_steps_panics() {
        let mut w = world();
        w.serve();
        w.update(0);
    }

    struct Recorder(Rc<RefCell<Vec<IVec2>>>);

    impl View for Recorder {
        fn display(&mut self, world: &World) {
            self.0.borrow_mut().push(world.ball().position);
        }

        fn dispose(&mut self) {}
    }

    #[test]
    fn test_views_see_post_tick_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut w = world();
        w.add_view(Box::new(Recorder(seen.clone())));
        let id = w.next_entity_id();
        w.add_actor(Ball::new(id, IVec2::new(10, 10), IVec2::new(1, 1), 25));
        w.update(1);
        w.update(1);
        assert_eq!(*seen.borrow(), vec![IVec2::new(11, 11), IVec2::new(12, 12)]);
    }
}
