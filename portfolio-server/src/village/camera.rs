//! Camera Rig
//!
//! Third-person follow camera. The pose is recomputed from the player
//! snapshot every frame with no smoothing.

use serde::Serialize;

use crate::core::Vec3;
use super::controller::PlayerSnapshot;

/// Camera placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraPose {
    /// Eye position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
}

/// Follow-camera geometry.
#[derive(Clone, Debug)]
pub struct CameraRig {
    /// Distance behind the player
    pub distance: f32,
    /// Height above the player
    pub height: f32,
    /// Distance to the look target
    pub look_distance: f32,
    /// Look target height above the player
    pub look_height: f32,
    /// How far ahead the night headlights aim
    pub headlight_throw: f32,
    /// Sideways spread of the two headlight targets
    pub headlight_spread: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            distance: 7.0,
            height: 4.0,
            look_distance: 10.0,
            look_height: 1.2,
            headlight_throw: 30.0,
            headlight_spread: 2.0,
        }
    }
}

impl CameraRig {
    /// Camera pose behind the player, tilted by pitch.
    pub fn pose(&self, player: &PlayerSnapshot) -> CameraPose {
        let p = player.position;
        let (sin_yaw, cos_yaw) = player.rotation_y.sin_cos();
        let (sin_pitch, cos_pitch) = player.vertical_look_angle.sin_cos();

        let position = Vec3::new(
            p.x - sin_yaw * self.distance,
            p.y + self.height,
            p.z - cos_yaw * self.distance,
        );

        let horizontal = cos_pitch * self.look_distance;
        let look_at = Vec3::new(
            p.x + sin_yaw * horizontal,
            p.y + self.look_height + sin_pitch * self.look_distance,
            p.z + cos_yaw * horizontal,
        );

        CameraPose { position, look_at }
    }

    /// Left and right headlight aim points: ahead of the player, spread on
    /// world X, one unit below the body.
    ///
    /// The spread stays on world X regardless of yaw.
    pub fn headlight_targets(&self, player: &PlayerSnapshot) -> [Vec3; 2] {
        let p = player.position;
        let (sin_yaw, cos_yaw) = player.rotation_y.sin_cos();
        let ahead_x = p.x + sin_yaw * self.headlight_throw;
        let ahead_z = p.z + cos_yaw * self.headlight_throw;

        [
            Vec3::new(ahead_x - self.headlight_spread, p.y - 1.0, ahead_z),
            Vec3::new(ahead_x + self.headlight_spread, p.y - 1.0, ahead_z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
    use crate::village::controller::PlayerState;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_pose_at_spawn() {
        let rig = CameraRig::default();
        let pose = rig.pose(&PlayerState::default());

        assert!(close(pose.position, Vec3::new(0.0, 5.0, 3.0)));
        assert!(close(pose.look_at, Vec3::new(0.0, 2.2, 20.0)));
    }

    #[test]
    fn test_pose_follows_yaw() {
        let rig = CameraRig::default();
        let player = PlayerState {
            position: Vec3::new(10.0, 1.0, 0.0),
            rotation_y: FRAC_PI_2,
            vertical_look_angle: 0.0,
        };
        let pose = rig.pose(&player);

        assert!(close(pose.position, Vec3::new(3.0, 5.0, 0.0)));
        assert!(close(pose.look_at, Vec3::new(20.0, 2.2, 0.0)));
    }

    #[test]
    fn test_pitch_raises_and_shortens_look_target() {
        let rig = CameraRig::default();
        let player = PlayerState {
            position: Vec3::ZERO,
            rotation_y: 0.0,
            vertical_look_angle: FRAC_PI_3,
        };
        let pose = rig.pose(&player);

        // Eye position ignores pitch
        assert!(close(pose.position, Vec3::new(0.0, 4.0, -7.0)));
        assert!((pose.look_at.y - (1.2 + FRAC_PI_3.sin() * 10.0)).abs() < 1e-4);
        assert!((pose.look_at.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_headlights_straddle_forward_point() {
        let rig = CameraRig::default();
        let [left, right] = rig.headlight_targets(&PlayerState::default());

        assert!(close(left, Vec3::new(-2.0, 0.0, 40.0)));
        assert!(close(right, Vec3::new(2.0, 0.0, 40.0)));
    }
}
