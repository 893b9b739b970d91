//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod pose;

pub use aabb::Aabb;
pub use ray::Ray;
pub use pose::Pose;
