pub mod args;
pub mod host;
pub mod input;
pub mod model;
pub mod utils;
