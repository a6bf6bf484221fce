pub mod config;
pub mod discipline;
pub mod insight;
pub mod race;
pub mod report;
pub mod rider_rating;
pub mod tier;
