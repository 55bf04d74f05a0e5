//! ASCII rendering of the arena
//!
//! Used by the native build and by tests; one character per cell.

use super::View;
use crate::sim::{Actor, ActorKind, World};

const EMPTY: char = ' ';

fn glyph(kind: ActorKind) -> char {
    match kind {
        ActorKind::Wall => '#',
        ActorKind::Goal => 'G',
        ActorKind::Paddle => '|',
        ActorKind::Ball => 'o',
    }
}

/// Render the score line followed by one line per grid row
///
/// Later actors overwrite earlier ones; cells outside the arena are skipped.
pub fn render(world: &World) -> String {
    let width = world.width() as usize;
    let height = world.height() as usize;
    let mut grid = vec![vec![EMPTY; width]; height];

    for actor in world.actors() {
        let c = glyph(actor.kind());
        for part in actor.parts() {
            if part.x < 0 || part.y < 0 {
                continue;
            }
            let (x, y) = (part.x as usize, part.y as usize);
            if x < width && y < height {
                grid[y][x] = c;
            }
        }
    }

    let score = world.score();
    let mut out = format!("{} : {}", score.left, score.right);
    for row in grid {
        out.push('\n');
        out.extend(row);
    }
    out
}

/// Keeps the most recent frame as text
#[derive(Debug, Default)]
pub struct TextView {
    frame: String,
    frames_drawn: u64,
    disposed: bool,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &str {
        &self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl View for TextView {
    fn display(&mut self, world: &World) {
        self.frame = render(world);
        self.frames_drawn += 1;
        log::trace!("Frame {}\n{}", self.frames_drawn, self.frame);
    }

    fn dispose(&mut self) {
        self.frame.clear();
        self.disposed = true;
    }
}
