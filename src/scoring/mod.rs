// Scoring engine: per-group categories and whole-hand evaluation.
mod group;
mod hand;
mod scheme;

pub use group::*;
pub use hand::*;
pub use scheme::*;
