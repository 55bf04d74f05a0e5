//! Keyboard input state
//!
//! Key events only raise flags. Players poll and clear them once per frame,
//! so how a flag gets set (DOM listener, test, script) does not matter.

use std::cell::Cell;
use std::rc::Rc;

/// Source of "move up" / "move down" requests
pub trait InputHandler {
    fn made_up_move(&self) -> bool;
    fn made_down_move(&self) -> bool;
    fn reset_up_move(&mut self);
    fn reset_down_move(&mut self);
}

/// Keys that drive one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: &'static str,
    pub down: &'static str,
}

impl KeyBindings {
    /// ArrowUp / ArrowDown
    pub const fn arrows() -> Self {
        Self {
            up: "ArrowUp",
            down: "ArrowDown",
        }
    }

    /// W / S
    pub const fn wasd() -> Self {
        Self { up: "w", down: "s" }
    }

    /// Bindings for a human player slot (0 = arrows, 1 = W/S)
    pub fn for_slot(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(Self::arrows()),
            1 => Some(Self::wasd()),
            _ => None,
        }
    }
}

/// Keyboard-backed input flags
///
/// Clones share the same flags, so one clone can live in a key listener
/// while another is polled by a player.
#[derive(Debug, Clone)]
pub struct KeyInputHandler {
    bindings: KeyBindings,
    up: Rc<Cell<bool>>,
    down: Rc<Cell<bool>>,
}

impl KeyInputHandler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            up: Rc::new(Cell::new(false)),
            down: Rc::new(Cell::new(false)),
        }
    }

    pub fn bindings(&self) -> KeyBindings {
        self.bindings
    }

    /// Record a key press by its `KeyboardEvent.key` value
    ///
    /// Returns true if the key belongs to this handler. Letter keys match
    /// regardless of case.
    pub fn handle_key(&self, key: &str) -> bool {
        if key.eq_ignore_ascii_case(self.bindings.up) {
            self.up.set(true);
            true
        } else if key.eq_ignore_ascii_case(self.bindings.down) {
            self.down.set(true);
            true
        } else {
            false
        }
    }
}

impl InputHandler for KeyInputHandler {
    fn made_up_move(&self) -> bool {
        self.up.get()
    }

    fn made_down_move(&self) -> bool {
        self.down.get()
    }

    fn reset_up_move(&mut self) {
        self.up.set(false);
    }

    fn reset_down_move(&mut self) {
        self.down.set(false);
    }
}
