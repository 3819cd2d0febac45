//! Village Layout
//!
//! Static geometry of Konahapuram: location zones, mini-map landmarks,
//! the info-panel text for each location, and the solid volumes the
//! collision prober tests against.

use serde::Serialize;

use crate::core::{Aabb, Vec3};
use super::collision::{ColliderKind, ColliderRegistry};

/// Half the width of the square play area. The world spans ±150 on X and Z.
pub const WORLD_HALF_EXTENT: f32 = 150.0;

/// Where the character starts.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 1.0, 10.0);

/// A named circular region that triggers the info panel when entered.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LocationZone {
    /// Zone identifier
    pub id: &'static str,
    /// Center X
    pub x: f32,
    /// Center Z
    pub z: f32,
    /// Trigger radius
    pub radius: f32,
}

impl LocationZone {
    /// Check if a point on the ground plane is strictly inside the zone.
    #[inline]
    pub fn contains(&self, position: Vec3) -> bool {
        position.planar_distance(self.x, self.z) < self.radius
    }
}

/// Trigger zones, checked in this order.
pub const LOCATION_ZONES: [LocationZone; 8] = [
    LocationZone { id: "konohaVillage", x: 0.0, z: 0.0, radius: 12.0 },
    LocationZone { id: "education", x: -50.0, z: -50.0, radius: 10.0 },
    LocationZone { id: "oregonState", x: 50.0, z: -50.0, radius: 10.0 },
    LocationZone { id: "agrosperity", x: 50.0, z: 50.0, radius: 10.0 },
    LocationZone { id: "hakatours", x: -50.0, z: 50.0, radius: 10.0 },
    LocationZone { id: "projects", x: 0.0, z: 50.0, radius: 10.0 },
    LocationZone { id: "skills", x: 0.0, z: -50.0, radius: 10.0 },
    LocationZone { id: "certifications", x: -50.0, z: 0.0, radius: 10.0 },
];

/// Landmark category, used for mini-map coloring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LandmarkCategory {
    /// Central castle
    SummaryHall,
    /// Education tower
    Education,
    /// Work experience district buildings
    WorkExperience,
    /// Skill forge
    Skills,
    /// Certification shrine
    Certifications,
    /// Projects square
    Projects,
    /// Anything else (the gate)
    Other,
}

/// A building shown on the mini-map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Landmark {
    /// Matches a [`LocationZone::id`] where one exists
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// World X
    pub x: f32,
    /// World Z
    pub z: f32,
    /// Coloring category
    pub category: LandmarkCategory,
}

/// Mini-map landmarks: every zone plus the village gate.
pub const LANDMARKS: [Landmark; 9] = [
    Landmark { id: "konohaVillage", name: "Summary Hall", x: 0.0, z: 0.0, category: LandmarkCategory::SummaryHall },
    Landmark { id: "education", name: "Education Tower", x: -50.0, z: -50.0, category: LandmarkCategory::Education },
    Landmark { id: "oregonState", name: "Oregon State", x: 50.0, z: -50.0, category: LandmarkCategory::WorkExperience },
    Landmark { id: "agrosperity", name: "Agrosperity", x: 50.0, z: 50.0, category: LandmarkCategory::WorkExperience },
    Landmark { id: "hakatours", name: "Hakatours", x: -50.0, z: 50.0, category: LandmarkCategory::WorkExperience },
    Landmark { id: "projects", name: "Projects Square", x: 0.0, z: 50.0, category: LandmarkCategory::Projects },
    Landmark { id: "skills", name: "Skill Forge", x: 0.0, z: -50.0, category: LandmarkCategory::Skills },
    Landmark { id: "certifications", name: "Certification Shrine", x: -50.0, z: 0.0, category: LandmarkCategory::Certifications },
    Landmark { id: "gate", name: "Village Gate", x: 0.0, z: -70.0, category: LandmarkCategory::Other },
];

/// Look up a landmark by id.
pub fn landmark(id: &str) -> Option<&'static Landmark> {
    LANDMARKS.iter().find(|l| l.id == id)
}

/// Info-panel content for a location.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LocationInfo {
    /// Location id
    pub id: &'static str,
    /// Panel title
    pub title: &'static str,
    /// Body text (may contain newlines)
    pub description: &'static str,
    /// Skill chips
    pub skills: &'static [&'static str],
}

impl LocationInfo {
    /// Description cut to `max_chars` characters with an ellipsis, the way
    /// fallback cards preview it.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut out: String = self.description.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

/// Info panels, one per zone.
pub const LOCATION_INFO: [LocationInfo; 8] = [
    LocationInfo {
        id: "konohaVillage",
        title: "The Summary Hall (Central Castle)",
        description: "Software engineer with Angular, Node.js & Cloud expertise. Passionate about scalable, secure, and efficient systems.",
        skills: &["Angular", "Node.js", "Cloud Infrastructure", "UI/UX", "TypeScript"],
    },
    LocationInfo {
        id: "education",
        title: "Education Tower",
        description: "Oregon State University - MEng in Computer Science (2022-2025) - GPA: 3.7\nHindustan Institute of Technology and Science - BTech in Computer Science (2018-2022) - CGPA: 8.6",
        skills: &["Computer Science", "Oregon State University", "Hindustan Institute of Technology"],
    },
    LocationInfo {
        id: "oregonState",
        title: "Oregon State University",
        description: "Web Developer (Oct 2024 - Present): Angular 14 & Drupal 10 web revamp. Improved load times by 40%, session durations by 50%. Reduced bounce rate by 25% using Monsido.",
        skills: &["Angular 14", "Drupal 10", "Web Performance", "UX Optimization"],
    },
    LocationInfo {
        id: "agrosperity",
        title: "Agrosperity KIVI",
        description: "Associate Software Developer (Jun 2022 - Aug 2023): Scaled user base from 300 to 10,000. Built VPC, Nginx, PostgreSQL, and firewall infra. Created 20+ modular Angular apps (Microfrontends). Automated CI/CD with GitLab & Docker.",
        skills: &["Angular", "GitLab CI/CD", "PostgreSQL", "Microfrontends", "Docker"],
    },
    LocationInfo {
        id: "hakatours",
        title: "HakaTours New Zealand",
        description: "UI/UX Intern (Mar 2020 - Oct 2020): Revamped eCommerce UX with A/B testing. Integrated Stripe/PayPal. Boosted mobile usability and conversion by 20%.",
        skills: &["UI/UX Design", "Payment Integration", "A/B Testing", "Mobile Optimization"],
    },
    LocationInfo {
        id: "projects",
        title: "Projects Square",
        description: "SCARR Framework (Open Source): Accelerated Python algorithms with multicore profiling. Used Numba, NJIT, Intel VTune for 30% speedup.\nDeepSeeker Scraper & AI v1: Stack Overflow/Medium answer aggregator with RAG-based AI.\nLibrary Content Manager: Node.js, MongoDB, RabbitMQ microservices.",
        skills: &["Python Optimization", "RAG-based AI", "Microservices", "Node.js", "MongoDB"],
    },
    LocationInfo {
        id: "skills",
        title: "Skill Forge (Workshop Area)",
        description: "Languages: Python, JavaScript, TypeScript\nFrameworks & Tools: Angular, React, Django, Firebase, Docker, RabbitMQ\nPlatforms & DBs: GCP, AWS, PostgreSQL, MongoDB\nCI/CD: GitLab CI/CD, Git, Bash, SonarQube, Sentry",
        skills: &["Python", "JavaScript", "Angular", "React", "Cloud Platforms", "Docker"],
    },
    LocationInfo {
        id: "certifications",
        title: "Certification Shrine",
        description: "Cyber Security & Forensics (Wireshark, QRadar, SolarWinds) - 2022\nGoogle Cloud Essentials - Kubernetes, WAF, Monitoring - 2022",
        skills: &["Cyber Security", "Google Cloud", "Kubernetes", "Cloud Monitoring"],
    },
];

/// Look up info-panel content by location id.
pub fn location_info(id: &str) -> Option<&'static LocationInfo> {
    LOCATION_INFO.iter().find(|info| info.id == id)
}

/// Footprint (width, height, depth) of a landmark's building.
pub fn building_size(category: LandmarkCategory) -> Vec3 {
    match category {
        LandmarkCategory::SummaryHall => Vec3::new(16.0, 20.0, 16.0),
        LandmarkCategory::Education => Vec3::new(8.0, 18.0, 8.0),
        LandmarkCategory::Skills | LandmarkCategory::Projects => Vec3::new(10.0, 12.0, 10.0),
        _ => Vec3::new(8.0, 12.0, 8.0),
    }
}

/// Every solid volume in the village.
pub fn village_colliders() -> Vec<(ColliderKind, Aabb)> {
    let mut colliders = Vec::new();
    let span = WORLD_HALF_EXTENT * 2.0;

    // Invisible walls at the edge of the play area
    for (center, size) in [
        (Vec3::new(0.0, 5.0, -WORLD_HALF_EXTENT), Vec3::new(span, 10.0, 1.0)),
        (Vec3::new(0.0, 5.0, WORLD_HALF_EXTENT), Vec3::new(span, 10.0, 1.0)),
        (Vec3::new(WORLD_HALF_EXTENT, 5.0, 0.0), Vec3::new(1.0, 10.0, span)),
        (Vec3::new(-WORLD_HALF_EXTENT, 5.0, 0.0), Vec3::new(1.0, 10.0, span)),
    ] {
        colliders.push((ColliderKind::Boundary, Aabb::from_center_size(center, size)));
    }

    // Rolling hills (radius-10 spheres sunk 1 unit), boxed at walking height
    for (x, z) in [(-70.0, -70.0), (70.0, -70.0), (-70.0, 70.0), (70.0, 70.0)] {
        colliders.push((
            ColliderKind::Terrain,
            Aabb::from_center_size(Vec3::new(x, -1.0, z), Vec3::new(19.6, 18.0, 19.6)),
        ));
    }

    for landmark in LANDMARKS.iter() {
        if landmark.category == LandmarkCategory::Other {
            continue;
        }
        let size = building_size(landmark.category);
        let center = Vec3::new(landmark.x, size.y / 2.0, landmark.z);
        colliders.push((ColliderKind::Building, Aabb::from_center_size(center, size)));
    }

    // Gate posts; the path between them stays open
    if let Some(gate) = landmark("gate") {
        for offset in [-6.0, 6.0] {
            colliders.push((
                ColliderKind::Prop,
                Aabb::from_center_size(Vec3::new(gate.x + offset, 5.0, gate.z), Vec3::new(2.0, 10.0, 2.0)),
            ));
        }
    }

    colliders
}

impl ColliderRegistry {
    /// Registry populated with the full village.
    pub fn village() -> Self {
        let mut registry = Self::new();
        for (kind, bounds) in village_colliders() {
            registry.register(kind, bounds);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_zone_has_landmark_and_info() {
        for zone in LOCATION_ZONES.iter() {
            let mark = landmark(zone.id).expect("landmark for zone");
            assert_eq!((mark.x, mark.z), (zone.x, zone.z));
            assert!(location_info(zone.id).is_some(), "info for {}", zone.id);
        }
    }

    #[test]
    fn test_gate_has_no_zone() {
        assert!(landmark("gate").is_some());
        assert!(!LOCATION_ZONES.iter().any(|z| z.id == "gate"));
    }

    #[test]
    fn test_zone_contains_is_strict() {
        let zone = LOCATION_ZONES[1];
        assert!(zone.contains(Vec3::new(-50.0, 1.0, -41.0)));
        assert!(!zone.contains(Vec3::new(-50.0, 1.0, -40.0)));
    }

    #[test]
    fn test_spawn_point_is_clear() {
        let registry = ColliderRegistry::village();
        assert!(!registry.probe(SPAWN_POSITION));
    }

    #[test]
    fn test_buildings_block_their_doorstep() {
        let registry = ColliderRegistry::village();
        // Half-width 4 building at (50, -50): 0.3 from its west face
        assert!(registry.probe(Vec3::new(45.7, 1.0, -50.0)));
    }

    #[test]
    fn test_gate_path_is_open() {
        let registry = ColliderRegistry::village();
        assert!(!registry.probe(Vec3::new(0.0, 1.0, -70.0)));
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        let info = location_info("hakatours").unwrap();
        let preview = info.preview(10);
        assert_eq!(preview, "UI/UX Inte...");
    }
}
