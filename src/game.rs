//! Menu / game context switching and the per-frame session loop

use glam::IVec2;

use crate::clock::TickClock;
use crate::consts::PADDLE_INSET;
use crate::error::{SettingsError, SetupError};
use crate::input::{KeyBindings, KeyInputHandler};
use crate::level::Level;
use crate::player::{AiPlayer, HumanPlayer, PaddleController, Player};
use crate::renderer::View;
use crate::settings::Settings;
use crate::sim::{Color, CollisionTable, EntityId, Paddle, Score, Side, World};

/// Paddles that fit in the arena (one per side)
pub const MAX_PLAYERS: u8 = 2;

/// Difficulty given to computer players
const AI_LEVEL: u8 = 1;

const HUMAN_COLORS: [Color; 2] = [Color::Red, Color::Blue];
const AI_COLORS: [Color; 2] = [Color::Green, Color::Orange];

/// How many humans and computer players take part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSetup {
    human_players: u8,
    ai_players: u8,
}

impl PlayerSetup {
    pub fn new(human_players: u8, ai_players: u8) -> Result<Self, SetupError> {
        if human_players > MAX_PLAYERS {
            return Err(SetupError::TooManyOfKind {
                kind: "human",
                found: human_players,
                max: MAX_PLAYERS,
            });
        }
        if ai_players > MAX_PLAYERS {
            return Err(SetupError::TooManyOfKind {
                kind: "AI",
                found: ai_players,
                max: MAX_PLAYERS,
            });
        }
        let total = human_players + ai_players;
        if total > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers {
                found: total,
                max: MAX_PLAYERS,
            });
        }
        Ok(Self {
            human_players,
            ai_players,
        })
    }

    pub fn human_players(&self) -> u8 {
        self.human_players
    }

    pub fn ai_players(&self) -> u8 {
        self.ai_players
    }

    pub fn total(&self) -> u8 {
        self.human_players + self.ai_players
    }
}

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    TwoHumans,
    HumanVsAi,
    TwoAi,
}

impl MenuChoice {
    pub fn all() -> [MenuChoice; 3] {
        [MenuChoice::TwoHumans, MenuChoice::HumanVsAi, MenuChoice::TwoAi]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::TwoHumans => "Human vs Human",
            MenuChoice::HumanVsAi => "Human vs AI",
            MenuChoice::TwoAi => "AI vs AI",
        }
    }

    pub fn setup(&self) -> PlayerSetup {
        let (human_players, ai_players) = match self {
            MenuChoice::TwoHumans => (2, 0),
            MenuChoice::HumanVsAi => (1, 1),
            MenuChoice::TwoAi => (0, 2),
        };
        PlayerSetup {
            human_players,
            ai_players,
        }
    }
}

/// Which context the game is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Menu,
    Playing,
}

/// Result of one session frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    Finished,
}

/// One match: the world, its players and the tick clock
pub struct Session {
    world: World,
    players: Vec<Box<dyn Player>>,
    keys: Vec<KeyInputHandler>,
    clock: TickClock,
    settings: Settings,
    final_score: Option<Score>,
}

impl Session {
    /// Build the arena, place one paddle per player and serve
    ///
    /// `fallback_seed` is used when the settings do not pin a seed.
    pub fn start(
        settings: Settings,
        setup: PlayerSetup,
        fallback_seed: u64,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or(fallback_seed);
        let (width, height) = (settings.arena_width, settings.arena_height);

        let mut world = World::new(width, height, CollisionTable::standard(), seed);
        Level::bordered(width, height).load_into(&mut world);

        let mut players: Vec<Box<dyn Player>> = Vec::with_capacity(setup.total() as usize);
        let mut keys = Vec::new();
        let mut slot = 0;

        for human in 0..setup.human_players as usize {
            let paddle = spawn_slot_paddle(&mut world, &settings, slot, HUMAN_COLORS[human]);
            let controller = PaddleController::new(&world, paddle);
            if let Some(bindings) = KeyBindings::for_slot(human) {
                let input = KeyInputHandler::new(bindings);
                keys.push(input.clone());
                players.push(Box::new(HumanPlayer::new(controller, input)));
            }
            slot += 1;
        }
        for ai in 0..setup.ai_players as usize {
            let paddle = spawn_slot_paddle(&mut world, &settings, slot, AI_COLORS[ai]);
            let controller = PaddleController::new(&world, paddle);
            players.push(Box::new(AiPlayer::new(controller, AI_LEVEL)));
            slot += 1;
        }

        world.serve();
        log::info!(
            "Session started: {}x{}, {} human, {} AI, seed {}",
            width,
            height,
            setup.human_players,
            setup.ai_players,
            seed
        );

        let clock = TickClock::new(settings.tick_interval_ms, settings.clock_mode());
        Ok(Self {
            world,
            players,
            keys,
            clock,
            settings,
            final_score: None,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn players(&self) -> &[Box<dyn Player>] {
        &self.players
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_finished(&self) -> bool {
        self.final_score.is_some()
    }

    /// Score at the moment the session ended
    pub fn final_score(&self) -> Option<Score> {
        self.final_score
    }

    pub fn add_view(&mut self, view: Box<dyn View>) {
        self.world.add_view(view);
    }

    /// Route a key press to whichever human owns it
    pub fn handle_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.handle_key(key))
    }

    /// Advance one animation frame at timestamp `now` (ms)
    pub fn frame(&mut self, now: f64) -> FrameOutcome {
        if self.is_finished() {
            return FrameOutcome::Finished;
        }

        for player in self.players.iter_mut() {
            player.make_turn(&mut self.world);
        }
        if self.clock.poll(now) {
            self.world.update(self.settings.steps_per_tick);
        }
        for event in self.world.take_events() {
            log::debug!("{:?}", event);
        }

        let score = self.world.score();
        let winner = score.winner(self.settings.max_score);
        if winner.is_none() && !self.players.is_empty() {
            return FrameOutcome::Running;
        }

        match winner {
            Some(Side::Left) => log::info!("Left wins {} : {}", score.left, score.right),
            Some(Side::Right) => log::info!("Right wins {} : {}", score.left, score.right),
            None => log::info!("No players, ending session"),
        }
        self.finish(score);
        FrameOutcome::Finished
    }

    fn finish(&mut self, score: Score) {
        self.world.reset();
        self.players.clear();
        self.keys.clear();
        self.clock.reset();
        self.final_score = Some(score);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("world", &self.world)
            .field("players", &self.players.len())
            .field("clock", &self.clock)
            .field("final_score", &self.final_score)
            .finish()
    }
}

/// Column of the paddle for a slot: left side first, then right
fn slot_column(width: i32, slot: usize) -> i32 {
    if slot == 0 {
        PADDLE_INSET
    } else {
        width - 1 - PADDLE_INSET
    }
}

fn spawn_slot_paddle(world: &mut World, settings: &Settings, slot: usize, color: Color) -> EntityId {
    let length = settings.paddle_length;
    let height = settings.arena_height;
    let head = IVec2::new(
        slot_column(settings.arena_width, slot),
        (height - length as i32) / 2,
    );

    let id = world.next_entity_id();
    let mut paddle = Paddle::new(id, head, length, color);
    if settings.clamp_paddles {
        paddle = paddle.with_bounds(1, height - length as i32 - 1);
    }
    log::debug!("Paddle {} for slot {} at {}", id, slot, head);
    world.add_actor(paddle)
}

/// Top-level state: a menu, or a running session
pub struct Game {
    context: Context,
    settings: Settings,
    session: Option<Session>,
    last_score: Option<Score>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self {
            context: Context::Menu,
            settings,
            session: None,
            last_score: None,
        }
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Score of the most recently finished session
    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    /// Start a session from a menu entry
    pub fn start(&mut self, choice: MenuChoice, seed: u64) -> Result<&mut Session, SettingsError> {
        log::info!("Menu: {}", choice.label());
        self.start_with(choice.setup(), seed)
    }

    /// Start a session with an explicit setup, replacing any running one
    pub fn start_with(
        &mut self,
        setup: PlayerSetup,
        seed: u64,
    ) -> Result<&mut Session, SettingsError> {
        if let Some(mut old) = self.session.take() {
            old.world_mut().reset();
        }
        let session = Session::start(self.settings.clone(), setup, seed)?;
        self.context = Context::Playing;
        Ok(self.session.insert(session))
    }

    pub fn handle_key(&self, key: &str) -> bool {
        self.session.as_ref().is_some_and(|s| s.handle_key(key))
    }

    /// Run one frame; returns the context after it
    pub fn frame(&mut self, now: f64) -> Context {
        if let Some(session) = self.session.as_mut() {
            if session.frame(now) == FrameOutcome::Finished {
                self.last_score = session.final_score();
                self.session = None;
                self.context = Context::Menu;
                log::info!("Back to menu");
            }
        }
        self.context
    }
}
