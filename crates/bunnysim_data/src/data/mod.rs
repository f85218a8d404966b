//! Plain data shared by the engine and its consumers.

pub mod bunny;
pub mod environment;
pub mod genetics;
