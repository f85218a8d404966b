pub mod input;
pub mod render;
pub mod state;

pub use input::{CliOverrides, MutationRequest};
pub use state::{App, RunOptions};
