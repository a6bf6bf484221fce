pub mod constants;
pub mod decay;
pub mod engine;
pub mod identity;
pub mod rating_tracker;
pub mod structures;

pub use engine::RatingEngine;
