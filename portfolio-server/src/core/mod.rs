//! Core geometric primitives.
//!
//! Engine-independent math shared by the village simulation and the client.

pub mod vec3;
pub mod aabb;

// Re-export core types
pub use vec3::Vec3;
pub use aabb::Aabb;
