mod camera;
mod plugin;
mod state;

pub use camera::*;
pub use plugin::*;
pub use state::*;
