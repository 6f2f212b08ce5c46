pub mod fleet;
pub mod geometry;
pub mod resource;
pub mod schedule;
