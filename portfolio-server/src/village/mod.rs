//! Village Simulation Module
//!
//! Engine-independent core of the 3D village. The host renders; everything
//! that decides where the player, camera and map markers go lives here.
//!
//! ## Module Structure
//!
//! - `input`: Keyboard, mouse and touch state
//! - `joystick`: On-screen joystick and D-pad
//! - `collision`: Collider registry and ray probing
//! - `controller`: Per-frame movement and location zones
//! - `camera`: Third-person follow camera
//! - `minimap`: Top-down map projection
//! - `scene_mode`: Loading / 3D / fallback state machine
//! - `info_panel`: Delayed location panel
//! - `layout`: Static village geometry and text
//! - `events`: Events produced by the above

pub mod input;
pub mod joystick;
pub mod collision;
pub mod controller;
pub mod camera;
pub mod minimap;
pub mod scene_mode;
pub mod info_panel;
pub mod layout;
pub mod events;

// Re-export key types
pub use input::{InputEvent, InputState, TouchPoint, DragChanged};
pub use joystick::{DirectionFlags, VirtualJoystick};
pub use collision::{ColliderId, ColliderKind, ColliderRegistry};
pub use controller::{CharacterController, ControllerConfig, FrameResult, PlayerSnapshot, PlayerState};
pub use camera::{CameraPose, CameraRig};
pub use minimap::{MiniMap, MiniMapFrame, Theme};
pub use scene_mode::{FallbackReason, SceneGate, SceneMode};
pub use info_panel::InfoPanel;
pub use events::{VillageEvent, VillageEventData};
