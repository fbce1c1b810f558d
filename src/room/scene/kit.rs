//! Spawning helpers shared by the scene builders.

use bevy::prelude::*;

use crate::room::palette::{hex, Finish};

/// Mesh and material factory for one spawning pass. Materials are shared
/// between parts with the same finish.
pub struct Kit<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    finishes: Vec<(Finish, Handle<StandardMaterial>)>,
}

impl<'a> Kit<'a> {
    pub fn new(meshes: &'a mut Assets<Mesh>, materials: &'a mut Assets<StandardMaterial>) -> Self {
        Self {
            meshes,
            materials,
            finishes: Vec::new(),
        }
    }

    pub fn mesh(&mut self, mesh: impl Into<Mesh>) -> Handle<Mesh> {
        self.meshes.add(mesh)
    }

    pub fn finish(&mut self, finish: Finish) -> Handle<StandardMaterial> {
        if let Some((_, handle)) = self.finishes.iter().find(|(f, _)| *f == finish) {
            return handle.clone();
        }
        let handle = self.materials.add(finish.material());
        self.finishes.push((finish, handle.clone()));
        handle
    }

    pub fn material(&mut self, material: StandardMaterial) -> Handle<StandardMaterial> {
        self.materials.add(material)
    }

    /// Mesh and material components for a single visible part.
    pub fn part(
        &mut self,
        mesh: impl Into<Mesh>,
        finish: Finish,
    ) -> (Mesh3d, MeshMaterial3d<StandardMaterial>) {
        (Mesh3d(self.mesh(mesh)), MeshMaterial3d(self.finish(finish)))
    }
}

/// Small shadowless point light for decorative fixtures.
pub fn accent_light(color: &str, level: f32, range: f32, lumens_per_unit: f32) -> PointLight {
    PointLight {
        color: hex(color),
        intensity: level * lumens_per_unit,
        range,
        shadows_enabled: false,
        ..default()
    }
}

pub fn ball(radius: f32) -> Mesh {
    Sphere::new(radius).mesh().uv(16, 12)
}

/// A cylinder that may narrow toward one end.
pub fn taper(radius_top: f32, radius_bottom: f32, height: f32) -> Mesh {
    if (radius_top - radius_bottom).abs() < f32::EPSILON {
        Cylinder::new(radius_top, height).into()
    } else {
        ConicalFrustum {
            radius_top,
            radius_bottom,
            height,
        }
        .into()
    }
}

/// Flat square facing +Z.
pub fn panel(width: f32, height: f32) -> Mesh {
    Rectangle::new(width, height).into()
}

/// Rotation laying a +Z facing panel flat, facing up.
pub fn face_up() -> Quat {
    Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

/// Point on a circle of `radius` in the XZ plane at `degrees`.
pub fn around(radius: f32, degrees: f32, y: f32) -> Vec3 {
    let rad = degrees.to_radians();
    Vec3::new(rad.cos() * radius, y, rad.sin() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_shares_materials_per_finish() {
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();
        let mut kit = Kit::new(&mut meshes, &mut materials);

        let gold = Finish::metal("#ffd700", 0.9, 0.2);
        let a = kit.finish(gold);
        let b = kit.finish(gold);
        let c = kit.finish(Finish::matte("#ffffff", 0.5));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(materials.len(), 2);
    }

    #[test]
    fn test_around_uses_degrees() {
        let p = around(2.0, 90.0, 1.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.z - 2.0).abs() < 1e-5);
        assert_eq!(p.y, 1.0);
    }
}
