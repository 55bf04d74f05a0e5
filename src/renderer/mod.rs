//! Display collaborators
//!
//! The world calls every registered view after each tick. Views read the
//! world; they never change it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasView;
pub use text::TextView;

use crate::sim::World;

/// Something that shows the world
pub trait View {
    /// Draw the state after a tick
    fn display(&mut self, world: &World);
    /// Release whatever the view owns (called on world reset)
    fn dispose(&mut self);
}
