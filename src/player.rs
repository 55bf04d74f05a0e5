//! Players: turning an input source into paddle commands

use crate::Point;
use crate::input::InputHandler;
use crate::sim::{Actor, Direction, EntityId, Paddle, World};

/// Who is steering a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// Handle to one paddle inside a world
///
/// Holds only the paddle's id; every call borrows the world it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleController {
    paddle: EntityId,
}

impl PaddleController {
    /// Panics if `paddle` is not a paddle in `world`
    pub fn new(world: &World, paddle: EntityId) -> Self {
        assert!(
            world.paddle(paddle).is_some(),
            "entity {} is not a paddle in this world",
            paddle
        );
        Self { paddle }
    }

    pub fn paddle_id(&self) -> EntityId {
        self.paddle
    }

    fn paddle<'w>(&self, world: &'w World) -> &'w Paddle {
        match world.paddle(self.paddle) {
            Some(paddle) => paddle,
            None => panic!("paddle {} is no longer in the world", self.paddle),
        }
    }

    fn paddle_mut<'w>(&self, world: &'w mut World) -> &'w mut Paddle {
        match world.paddle_mut(self.paddle) {
            Some(paddle) => paddle,
            None => panic!("paddle {} is no longer in the world", self.paddle),
        }
    }

    pub fn turn_paddle_up(&self, world: &mut World) {
        self.paddle_mut(world).turn_up();
    }

    pub fn turn_paddle_down(&self, world: &mut World) {
        self.paddle_mut(world).turn_down();
    }

    pub fn paddle_position(&self, world: &World) -> Point {
        self.paddle(world).position()
    }

    pub fn paddle_direction(&self, world: &World) -> Direction {
        self.paddle(world).direction()
    }

    pub fn world_width(&self, world: &World) -> i32 {
        world.width()
    }

    pub fn world_height(&self, world: &World) -> i32 {
        world.height()
    }
}

/// Something that issues paddle commands once per game-loop iteration
pub trait Player {
    fn kind(&self) -> PlayerKind;
    fn controller(&self) -> &PaddleController;
    fn make_turn(&mut self, world: &mut World);
}

/// A player driven by an input source
#[derive(Debug, Clone)]
pub struct HumanPlayer<I: InputHandler> {
    controller: PaddleController,
    input: I,
}

impl<I: InputHandler> HumanPlayer<I> {
    pub fn new(controller: PaddleController, input: I) -> Self {
        Self { controller, input }
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<I: InputHandler> Player for HumanPlayer<I> {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn controller(&self) -> &PaddleController {
        &self.controller
    }

    /// Up wins if both were requested; only the consumed request is cleared
    fn make_turn(&mut self, world: &mut World) {
        if self.input.made_up_move() {
            self.controller.turn_paddle_up(world);
            self.input.reset_up_move();
        } else if self.input.made_down_move() {
            self.controller.turn_paddle_down(world);
            self.input.reset_down_move();
        }
    }
}

/// Computer-controlled slot
///
/// No strategy is implemented yet: the paddle never receives a command.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    controller: PaddleController,
    level: u8,
}

impl AiPlayer {
    pub fn new(controller: PaddleController, level: u8) -> Self {
        Self { controller, level }
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Player for AiPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Ai
    }

    fn controller(&self) -> &PaddleController {
        &self.controller
    }

    fn make_turn(&mut self, _world: &mut World) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyBindings, KeyInputHandler};
    use crate::sim::{Color, CollisionTable};
    use glam::IVec2;

    /// Scripted flags for exercising the turn logic
    #[derive(Default)]
    struct Flags {
        up: bool,
        down: bool,
    }

    impl InputHandler for Flags {
        fn made_up_move(&self) -> bool {
            self.up
        }
        fn made_down_move(&self) -> bool {
            self.down
        }
        fn reset_up_move(&mut self) {
            self.up = false;
        }
        fn reset_down_move(&mut self) {
            self.down = false;
        }
    }

    fn setup() -> (World, PaddleController) {
        let mut world = World::new(50, 25, CollisionTable::standard(), 3);
        let id = world.spawn_paddle(IVec2::new(2, 10), 3, Color::Red);
        let controller = PaddleController::new(&world, id);
        (world, controller)
    }

    #[test]
    fn test_controller_reads_paddle() {
        let (mut world, pc) = setup();
        assert_eq!(pc.paddle_position(&world), IVec2::new(2, 10));
        assert_eq!(pc.paddle_direction(&world), Direction::None);
        pc.turn_paddle_down(&mut world);
        assert_eq!(pc.paddle_direction(&world), Direction::Down);
        assert_eq!(pc.world_width(&world), 50);
        assert_eq!(pc.world_height(&world), 25);
    }

    #[test]
    #[should_panic(expected = "not a paddle")]
    fn test_controller_rejects_non_paddle() {
        let mut world = World::new(10, 10, CollisionTable::standard(), 0);
        let wall = world.spawn_wall(IVec2::ZERO);
        PaddleController::new(&world, wall);
    }

    #[test]
    fn test_up_wins_and_down_stays_pending() {
        let (mut world, pc) = setup();
        let mut player = HumanPlayer::new(pc, Flags { up: true, down: true });

        player.make_turn(&mut world);
        assert_eq!(pc.paddle_direction(&world), Direction::Up);
        assert!(!player.input().up);
        assert!(player.input().down);

        if let Some(paddle) = world.paddle_mut(pc.paddle_id()) {
            paddle.update(1);
        }
        player.make_turn(&mut world);
        assert_eq!(pc.paddle_direction(&world), Direction::Down);
        assert!(!player.input().down);
    }

    #[test]
    fn test_no_request_no_command() {
        let (mut world, pc) = setup();
        let mut player = HumanPlayer::new(pc, Flags::default());
        player.make_turn(&mut world);
        assert_eq!(pc.paddle_direction(&world), Direction::None);
        assert_eq!(player.kind(), PlayerKind::Human);
    }

    #[test]
    fn test_human_with_keyboard() {
        let (mut world, pc) = setup();
        let keys = KeyInputHandler::new(KeyBindings::wasd());
        let mut player = HumanPlayer::new(pc, keys.clone());
        keys.handle_key("w");
        player.make_turn(&mut world);
        assert_eq!(pc.paddle_direction(&world), Direction::Up);
        assert!(!keys.made_up_move());
    }

    #[test]
    fn test_ai_player_issues_nothing() {
        let (mut world, pc) = setup();
        let mut ai = AiPlayer::new(pc, 1);
        ai.make_turn(&mut world);
        assert_eq!(ai.kind(), PlayerKind::Ai);
        assert_eq!(ai.level(), 1);
        assert_eq!(ai.controller().paddle_direction(&world), Direction::None);
    }
}
