//! Exhibit registry
//!
//! The ordered set of objects the robot can visit. An exhibit's identity is
//! its index, which never changes once the registry is built.

use cgmath::Vector3;

use crate::gfx::scene::DrawableId;

/// One static object on display
#[derive(Debug, Clone, PartialEq)]
pub struct ExhibitRecord {
    pub name: String,
    pub description: String,
    pub position: Vector3<f32>,
    /// Per-axis scale applied to the shared cube
    pub scale: Vector3<f32>,
    pub color: Vector3<f32>,
    pub drawable: DrawableId,
    /// Set by the robot on arrival, cleared when a tour or selection restarts
    pub scanned: bool,
}

impl ExhibitRecord {
    pub fn new(name: &str, description: &str, drawable: DrawableId) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: Vector3::new(1.0, 1.0, 1.0),
            drawable,
            scanned: false,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = Vector3::new(r, g, b);
        self
    }
}

type ExhibitEntry = (&'static str, &'static str, [f32; 3], [f32; 3], [f32; 3]);

/// Name, description, position, scale, color
const MUSEUM_EXHIBITS: [ExhibitEntry; 5] = [
    (
        "Statue of Hercules",
        "A famous Roman copy of a Greek original.",
        [-4.0, 0.5, -4.0],
        [1.0, 1.0, 1.0],
        [0.7, 0.7, 0.7],
    ),
    (
        "Ancient Vase",
        "A well-preserved vase from 500 BC.",
        [4.0, 0.5, -4.0],
        [0.5, 1.0, 0.5],
        [0.8, 0.5, 0.2],
    ),
    (
        "Sarcophagus Lid",
        "Detailed carvings depict scenes of mythology.",
        [-4.0, 0.25, 4.0],
        [2.0, 0.5, 1.0],
        [0.6, 0.6, 0.5],
    ),
    (
        "Mosaic Panel",
        "A colorful mosaic showing daily life.",
        [4.0, 1.0, 4.0],
        [1.5, 1.5, 0.2],
        [0.5, 0.7, 0.8],
    ),
    (
        "Gold Coin Hoard",
        "A collection of rare gold coins.",
        [0.0, 0.25, -6.0],
        [0.5, 0.5, 0.5],
        [0.9, 0.8, 0.2],
    ),
];

/// Ordered exhibit list
#[derive(Debug, Clone, Default)]
pub struct ExhibitRegistry {
    exhibits: Vec<ExhibitRecord>,
}

impl ExhibitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard museum layout, every exhibit drawn with `drawable`
    pub fn museum(drawable: DrawableId) -> Self {
        let exhibits = MUSEUM_EXHIBITS
            .iter()
            .map(|&(name, description, [x, y, z], [sx, sy, sz], [r, g, b])| {
                ExhibitRecord::new(name, description, drawable)
                    .with_position(x, y, z)
                    .with_scale(sx, sy, sz)
                    .with_color(r, g, b)
            })
            .collect();
        Self { exhibits }
    }

    pub fn get(&self, index: usize) -> Option<&ExhibitRecord> {
        self.exhibits.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ExhibitRecord> {
        self.exhibits.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.exhibits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exhibits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExhibitRecord> {
        self.exhibits.iter()
    }

    pub fn is_scanned(&self, index: usize) -> bool {
        self.get(index).is_some_and(|exhibit| exhibit.scanned)
    }

    pub fn reset_scans(&mut self) {
        for exhibit in &mut self.exhibits {
            exhibit.scanned = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::MeshCatalog;

    fn cube() -> DrawableId {
        MeshCatalog::new().register("cube", &[])
    }

    #[test]
    fn test_museum_layout() {
        let registry = ExhibitRegistry::museum(cube());
        assert_eq!(registry.len(), 5);

        let names: Vec<&str> = registry.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Statue of Hercules",
                "Ancient Vase",
                "Sarcophagus Lid",
                "Mosaic Panel",
                "Gold Coin Hoard"
            ]
        );

        let hercules = registry.get(0).unwrap();
        assert_eq!(hercules.position, Vector3::new(-4.0, 0.5, -4.0));
        assert_eq!(hercules.description, "A famous Roman copy of a Greek original.");

        let mosaic = registry.get(3).unwrap();
        assert_eq!(mosaic.scale, Vector3::new(1.5, 1.5, 0.2));
        assert!(registry.iter().all(|e| !e.scanned));
    }

    #[test]
    fn test_reset_scans_keeps_poses() {
        let mut registry = ExhibitRegistry::museum(cube());
        let before: Vec<_> = registry.iter().map(|e| e.position).collect();

        registry.get_mut(1).unwrap().scanned = true;
        registry.get_mut(4).unwrap().scanned = true;
        assert!(registry.is_scanned(1));

        registry.reset_scans();
        assert!(!registry.is_scanned(1));
        assert!(!registry.is_scanned(4));
        let after: Vec<_> = registry.iter().map(|e| e.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_out_of_range_lookups() {
        let mut registry = ExhibitRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(0).is_none());
        assert!(!registry.is_scanned(7));
        assert!(registry.get_mut(0).is_none());
    }

    #[test]
    fn test_museum_colors_and_scales() {
        let registry = ExhibitRegistry::museum(cube());
        let vase = registry.get(1).unwrap();
        assert_eq!(vase.scale, Vector3::new(0.5, 1.0, 0.5));
        assert_eq!(vase.color, Vector3::new(0.8, 0.5, 0.2));

        let hoard = registry.get(4).unwrap();
        assert_eq!(hoard.position, Vector3::new(0.0, 0.25, -6.0));
        assert_eq!(hoard.color, Vector3::new(0.9, 0.8, 0.2));
    }
}
