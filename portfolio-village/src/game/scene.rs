//! Village scene spawning

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use portfolio::village::layout::{building_size, landmark, LandmarkCategory, LANDMARKS, WORLD_HALF_EXTENT};
use portfolio::village::{CameraRig, PlayerSnapshot};

use super::to_bevy;

/// Trees scattered around the village
const TREE_COUNT: usize = 120;

/// Fixed so the village looks the same on every visit
const TREE_SEED: u64 = 0x6b6f6e6f6861;

/// Trees keep this far from building centers
const TREE_CLEARANCE: f32 = 14.0;

// ============================================================================
// COMPONENTS
// ============================================================================

/// Parent of every 3D entity; hidden in the 2D fallback
#[derive(Component)]
pub struct VillageRoot;

/// The walking character
#[derive(Component)]
pub struct PlayerAvatar;

/// The follow camera
#[derive(Component)]
pub struct PlayerCamera;

/// One of the two night headlights
#[derive(Component)]
pub struct Headlight {
    pub index: usize,
}

/// The sun (or moon at night)
#[derive(Component)]
pub struct Sun;

// ============================================================================
// SPAWNING
// ============================================================================

/// Spawn ground, hills, buildings, gate, trees, player, camera and lights.
pub fn spawn_village(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("Spawning village...");

    let start = PlayerSnapshot::default();

    let ground = meshes.add(Plane3d::default().mesh().size(WORLD_HALF_EXTENT * 2.0, WORLD_HALF_EXTENT * 2.0));
    let grass = materials.add(Color::srgb(0.35, 0.6, 0.3));
    let hill = meshes.add(Sphere::new(10.0));
    let hill_material = materials.add(Color::srgb(0.3, 0.52, 0.27));
    let trunk = meshes.add(Cylinder::new(0.3, 2.0));
    let trunk_material = materials.add(Color::srgb(0.4, 0.26, 0.13));
    let crown = meshes.add(Cone { radius: 1.6, height: 4.0 });
    let crown_material = materials.add(Color::srgb(0.13, 0.45, 0.2));
    let post = meshes.add(Cuboid::new(2.0, 10.0, 2.0));
    let post_material = materials.add(Color::srgb(0.55, 0.15, 0.1));

    commands.spawn((
        VillageRoot,
        Transform::default(),
        Visibility::default(),
        Name::new("Village"),
    )).with_children(|parent| {
        parent.spawn((
            Mesh3d(ground),
            MeshMaterial3d(grass),
            Transform::default(),
        ));

        for (x, z) in [(-70.0, -70.0), (70.0, -70.0), (-70.0, 70.0), (70.0, 70.0)] {
            parent.spawn((
                Mesh3d(hill.clone()),
                MeshMaterial3d(hill_material.clone()),
                Transform::from_xyz(x, -1.0, z),
            ));
        }

        for landmark in LANDMARKS.iter() {
            if landmark.category == LandmarkCategory::Other {
                continue;
            }
            let size = to_bevy(building_size(landmark.category));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(building_color(landmark.category))),
                Transform::from_xyz(landmark.x, size.y / 2.0, landmark.z),
                Name::new(landmark.name),
            ));
        }

        if let Some(gate) = landmark("gate") {
            for offset in [-6.0, 6.0] {
                parent.spawn((
                    Mesh3d(post.clone()),
                    MeshMaterial3d(post_material.clone()),
                    Transform::from_xyz(gate.x + offset, 5.0, gate.z),
                ));
            }
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(16.0, 1.5, 2.5))),
                MeshMaterial3d(post_material.clone()),
                Transform::from_xyz(gate.x, 10.5, gate.z),
                Name::new(gate.name),
            ));
        }

        let mut rng = StdRng::seed_from_u64(TREE_SEED);
        let limit = WORLD_HALF_EXTENT - 5.0;
        let mut planted = 0;
        while planted < TREE_COUNT {
            let x = rng.gen_range(-limit..limit);
            let z = rng.gen_range(-limit..limit);
            let crowded = LANDMARKS
                .iter()
                .any(|l| ((l.x - x).powi(2) + (l.z - z).powi(2)).sqrt() < TREE_CLEARANCE);
            if crowded {
                continue;
            }
            let scale = rng.gen_range(0.8..1.4);
            parent.spawn((
                Transform::from_xyz(x, 0.0, z).with_scale(Vec3::splat(scale)),
                Visibility::default(),
            )).with_children(|tree| {
                tree.spawn((
                    Mesh3d(trunk.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, 1.0, 0.0),
                ));
                tree.spawn((
                    Mesh3d(crown.clone()),
                    MeshMaterial3d(crown_material.clone()),
                    Transform::from_xyz(0.0, 4.0, 0.0),
                ));
            });
            planted += 1;
        }

        parent.spawn((
            PlayerAvatar,
            Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(1.0, 0.55, 0.1))),
            Transform::from_translation(to_bevy(start.position))
                .with_rotation(Quat::from_rotation_y(start.rotation_y)),
            Name::new("Player"),
        ));

        for index in 0..2 {
            parent.spawn((
                Headlight { index },
                SpotLight {
                    color: Color::srgb(1.0, 0.95, 0.8),
                    intensity: 2_000_000.0,
                    range: 40.0,
                    inner_angle: 0.2,
                    outer_angle: 0.45,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(to_bevy(start.position)),
                Visibility::Hidden,
            ));
        }

        parent.spawn((
            Sun,
            DirectionalLight {
                illuminance: 10_000.0,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_xyz(50.0, 100.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    });

    let rig = CameraRig::default();
    let pose = rig.pose(&start);
    commands.spawn((
        PlayerCamera,
        Camera3d::default(),
        Transform::from_translation(to_bevy(pose.position)).looking_at(to_bevy(pose.look_at), Vec3::Y),
    ));

    info!("Village ready: {} landmarks, {} trees", LANDMARKS.len(), TREE_COUNT);
}

fn building_color(category: LandmarkCategory) -> Color {
    match category {
        LandmarkCategory::SummaryHall => Color::srgb(0.85, 0.35, 0.2),
        LandmarkCategory::Education => Color::srgb(0.3, 0.45, 0.85),
        LandmarkCategory::WorkExperience => Color::srgb(0.6, 0.45, 0.3),
        LandmarkCategory::Skills => Color::srgb(0.5, 0.5, 0.55),
        LandmarkCategory::Projects => Color::srgb(0.35, 0.7, 0.45),
        LandmarkCategory::Certifications => Color::srgb(0.85, 0.75, 0.3),
        LandmarkCategory::Other => Color::srgb(0.7, 0.7, 0.7),
    }
}
