//! # Portfolio Server
//!
//! Back end and simulation core for a personal portfolio site: a walkable
//! 3D village, a contact form with relay fallback, a live GitHub activity
//! feed, a filterable project catalog and a toy terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PORTFOLIO SERVER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Geometry                                  │
//! │  ├── vec3.rs     - 3D vector                                 │
//! │  └── aabb.rs     - Axis-aligned boxes and ray slabs          │
//! │                                                              │
//! │  village/        - 3D village (engine independent)           │
//! │  ├── input.rs    - Keyboard, mouse and touch state           │
//! │  ├── controller.rs - Movement, collision, location zones     │
//! │  ├── camera.rs   - Follow camera                             │
//! │  ├── minimap.rs  - Top-down projection                       │
//! │  ├── scene_mode.rs - Loading / 3D / fallback gate            │
//! │  └── layout.rs   - Zones, landmarks, colliders               │
//! │                                                              │
//! │  contact/        - Contact form and email relays             │
//! │  github/         - Activity feed and cache                   │
//! │  projects.rs     - Project catalog                           │
//! │  terminal.rs     - Terminal commands                         │
//! │  config.rs       - Environment configuration                 │
//! │                                                              │
//! │  network/        - HTTP API                                  │
//! │  ├── server.rs   - Axum router and handlers                  │
//! │  └── protocol.rs - Request and response bodies               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `village` module has no engine or I/O dependencies. The Bevy
//! client feeds it input events once per frame and draws what it returns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod village;
pub mod contact;
pub mod github;
pub mod projects;
pub mod terminal;
pub mod config;
pub mod network;

// Re-export commonly used types
pub use core::{Aabb, Vec3};
pub use village::{CharacterController, ColliderRegistry, InputState, PlayerSnapshot, SceneGate};
pub use config::ServerConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
