pub use bunnysim_core::{InitializerError, NaturalSelectionModel, SimError, SimEvent};
pub mod clock {
    pub use bunnysim_core::clock::*;
}
pub mod config {
    pub use bunnysim_core::config::*;
}
pub mod data {
    pub use bunnysim_data::*;
}
pub mod events {
    pub use bunnysim_core::events::*;
}
pub mod gene_pool {
    pub use bunnysim_core::gene_pool::*;
}
pub mod history {
    pub use bunnysim_core::history::*;
}
pub mod initializer {
    pub use bunnysim_core::initializer::*;
}
pub mod population {
    pub use bunnysim_core::population::*;
}
pub mod reproduction {
    pub use bunnysim_core::reproduction::*;
}
pub mod selection {
    pub use bunnysim_core::selection::*;
}
pub mod stats {
    pub use bunnysim_core::stats::*;
}
pub mod metrics {
    pub use bunnysim_core::metrics::*;
}
