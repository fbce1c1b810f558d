//! Photo frames
//!
//! Frames are built from unit meshes and sized through their transforms, so a
//! frame can be refitted to its photo's aspect ratio once the image arrives.
//! Until then the default dimensions are shown.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::kit::*;
use crate::room::palette::Finish;

/// Aspect ratios between these bounds count as nearly square.
pub const PORTRAIT_BELOW: f32 = 0.8;
pub const LANDSCAPE_ABOVE: f32 = 1.2;

const PICKABLE_DEPTHS: (f32, f32, f32) = (0.04, 0.03, 0.02);
const GALLERY_DEPTH: f32 = 0.08;

/// Photo size for an image of `aspect` (width / height).
///
/// Landscape and portrait photos get `max` on their long side; nearly square
/// ones are shrunk by `square_factor` so they do not look oversized.
pub fn fit_photo(aspect: f32, max: f32, square_factor: f32) -> Vec2 {
    if aspect > LANDSCAPE_ABOVE {
        Vec2::new(max, max / aspect)
    } else if aspect < PORTRAIT_BELOW {
        Vec2::new(max * aspect, max)
    } else {
        let side = max * square_factor;
        if aspect >= 1.0 {
            Vec2::new(side, side / aspect)
        } else {
            Vec2::new(side * aspect, side)
        }
    }
}

/// Aspect ratio of a `width` x `height` image; zero sizes count as one pixel.
pub fn image_aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStyle {
    /// Layered table frame with glass, corners, crown and stand.
    Table,
    /// Flat wall frame: a single box and the photo.
    Gallery,
}

/// Sizing rule for one kind of frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoFit {
    pub max: f32,
    pub square_factor: f32,
    pub padding: f32,
}

impl PhotoFit {
    pub const TABLE: PhotoFit = PhotoFit {
        max: 0.35,
        square_factor: 0.9,
        padding: 0.05,
    };

    pub const GALLERY: PhotoFit = PhotoFit {
        max: 0.9,
        square_factor: 0.85,
        padding: 0.08,
    };

    pub fn with_max(self, max: f32) -> Self {
        Self { max, ..self }
    }

    pub fn dimensions(&self, aspect: f32) -> FrameDimensions {
        FrameDimensions::from_photo(fit_photo(aspect, self.max, self.square_factor), self.padding)
    }
}

/// Width and height of each layer of a frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FrameDimensions {
    pub photo: Vec2,
    pub outer: Vec2,
    pub mid: Vec2,
    pub inner: Vec2,
    pub glass: Vec2,
}

impl FrameDimensions {
    /// Shown on table frames before their photo has loaded.
    pub const DEFAULT: FrameDimensions = FrameDimensions {
        photo: Vec2::new(0.22, 0.32),
        outer: Vec2::new(0.32, 0.42),
        mid: Vec2::new(0.295, 0.395),
        inner: Vec2::new(0.27, 0.37),
        glass: Vec2::new(0.26, 0.36),
    };

    pub fn from_photo(photo: Vec2, padding: f32) -> Self {
        Self {
            photo,
            outer: photo + Vec2::splat(padding * 2.0),
            mid: photo + Vec2::splat(padding * 1.5),
            inner: photo + Vec2::splat(padding),
            glass: photo + Vec2::splat(padding * 0.8),
        }
    }
}

/// Which piece of a frame an entity is. Corner signs pick the quadrant.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum FramePart {
    Outer,
    Mid,
    Inner,
    Photo,
    Glass,
    Corner { x: f32, y: f32 },
    CornerGem { x: f32, y: f32 },
    Crown,
    Stand,
    StandBase,
}

const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];

/// Local transform of `part` for a frame of `dims`.
pub fn part_transform(style: FrameStyle, part: FramePart, dims: &FrameDimensions) -> Transform {
    let sized = |size: Vec2, z: f32| {
        Transform::from_xyz(0.0, 0.0, z).with_scale(Vec3::new(size.x, size.y, 1.0))
    };
    let half = dims.outer / 2.0;

    match (style, part) {
        (_, FramePart::Outer) => sized(dims.outer, 0.0),
        (FrameStyle::Gallery, FramePart::Photo) => sized(dims.photo, GALLERY_DEPTH / 2.0 + 0.01),
        (FrameStyle::Gallery, _) => Transform::default(),
        (FrameStyle::Table, FramePart::Mid) => sized(dims.mid, 0.035),
        (FrameStyle::Table, FramePart::Inner) => sized(dims.inner, 0.05),
        (FrameStyle::Table, FramePart::Photo) => sized(dims.photo, 0.065),
        (FrameStyle::Table, FramePart::Glass) => sized(dims.glass, 0.07),
        (FrameStyle::Table, FramePart::Corner { x, y }) => {
            Transform::from_xyz(x * (half.x - 0.02), y * (half.y - 0.02), 0.04)
        }
        (FrameStyle::Table, FramePart::CornerGem { x, y }) => {
            Transform::from_xyz(x * (half.x - 0.02), y * (half.y - 0.02), 0.05)
        }
        (FrameStyle::Table, FramePart::Crown) => Transform::from_xyz(0.0, half.y + 0.01, 0.02),
        (FrameStyle::Table, FramePart::Stand) => Transform::from_xyz(0.0, -half.y - 0.03, -0.03),
        (FrameStyle::Table, FramePart::StandBase) => {
            Transform::from_xyz(0.0, -half.y - 0.045, -0.03)
        }
    }
}

/// Sensor volume covering a table frame.
pub fn frame_collider(dims: &FrameDimensions) -> Collider {
    Collider::cuboid(dims.outer.x / 2.0, dims.outer.y / 2.0, 0.05)
}

/// Frame waiting for its photo to load before it is refitted.
#[derive(Component, Debug, Clone)]
pub struct PendingFit {
    pub photo: Handle<Image>,
    pub style: FrameStyle,
    pub fit: PhotoFit,
}

/// Materials a frame is built from.
pub struct FrameLook {
    pub frame: Finish,
    pub photo: Handle<StandardMaterial>,
    /// Gallery frames only.
    pub backing: Option<Handle<StandardMaterial>>,
}

/// Spawn the pieces of a frame under `parent`, sized to `dims`.
pub fn spawn_frame_parts(
    parent: &mut ChildSpawnerCommands,
    kit: &mut Kit,
    style: FrameStyle,
    dims: &FrameDimensions,
    look: FrameLook,
) {
    let photo_mesh = kit.mesh(panel(1.0, 1.0));
    let spawn = |parent: &mut ChildSpawnerCommands, mesh, material, part| {
        spawn_part(parent, mesh, material, part_transform(style, part, dims), part);
    };

    if style == FrameStyle::Gallery {
        let material = match look.backing {
            Some(backing) => backing,
            None => kit.finish(look.frame),
        };
        spawn(parent, kit.mesh(Cuboid::new(1.0, 1.0, GALLERY_DEPTH)), material, FramePart::Outer);
        spawn(parent, photo_mesh, look.photo, FramePart::Photo);
        return;
    }

    let (outer_depth, mid_depth, inner_depth) = PICKABLE_DEPTHS;
    for (depth, finish, part) in [
        (outer_depth, look.frame, FramePart::Outer),
        (mid_depth, Finish::metal("#8b7355", 0.5, 0.6), FramePart::Mid),
        (inner_depth, Finish::metal("#cd7f32", 0.8, 0.3), FramePart::Inner),
    ] {
        let mesh = kit.mesh(Cuboid::new(1.0, 1.0, depth));
        let material = kit.finish(finish);
        spawn(parent, mesh, material, part);
    }
    spawn(parent, photo_mesh.clone(), look.photo, FramePart::Photo);
    let glass = kit.finish(Finish::metal("#f5f5dc", 0.1, 0.05).translucent(0.15));
    spawn(parent, photo_mesh, glass, FramePart::Glass);

    let corner_mesh = kit.mesh(Cuboid::new(0.025, 0.025, 0.015));
    let corner_mat = kit.finish(Finish::metal("#daa520", 0.9, 0.2));
    let gem_mesh = kit.mesh(ball(0.012));
    let gem_mat = kit.finish(Finish::metal("#ffd700", 0.9, 0.1));
    for (x, y) in CORNERS {
        spawn(parent, corner_mesh.clone(), corner_mat.clone(), FramePart::Corner { x, y });
        spawn(parent, gem_mesh.clone(), gem_mat.clone(), FramePart::CornerGem { x, y });
    }

    let crown_mesh = kit.mesh(Cuboid::new(0.08, 0.03, 0.02));
    let crown_mat = kit.finish(Finish::metal("#b8860b", 0.8, 0.3));
    spawn(parent, crown_mesh, crown_mat, FramePart::Crown);
    let stand_mesh = kit.mesh(taper(0.04, 0.05, 0.02));
    let stand_mat = kit.finish(Finish::metal("#8b7355", 0.5, 0.6));
    spawn(parent, stand_mesh, stand_mat, FramePart::Stand);
    let base_mesh = kit.mesh(Cuboid::new(0.12, 0.015, 0.12));
    let base_mat = kit.finish(Finish::matte("#654321", 0.7));
    spawn(parent, base_mesh, base_mat, FramePart::StandBase);
}

fn spawn_part(
    parent: &mut ChildSpawnerCommands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    transform: Transform,
    part: FramePart,
) {
    parent.spawn((Mesh3d(mesh), MeshMaterial3d(material), transform, part));
}

/// Material showing `photo` on a frame.
pub fn photo_material(photo: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(photo),
        perceptual_roughness: 0.8,
        ..default()
    }
}

/// Refit frames whose photo has finished loading.
pub fn fit_frames_to_photos(
    mut commands: Commands,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
    frames: Query<(Entity, &PendingFit, &Children)>,
    mut parts: Query<(&FramePart, &mut Transform)>,
) {
    for (entity, pending, children) in frames.iter() {
        let Some(image) = images.get(&pending.photo) else {
            if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&pending.photo) {
                warn!("Photo failed to load, keeping default frame size: {}", err);
                commands.entity(entity).remove::<PendingFit>();
            }
            continue;
        };

        let aspect = image_aspect(image.width(), image.height());
        let dims = pending.fit.dimensions(aspect);
        for child in children.iter() {
            if let Ok((part, mut transform)) = parts.get_mut(child) {
                *transform = part_transform(pending.style, *part, &dims);
            }
        }

        let mut root = commands.entity(entity);
        root.remove::<PendingFit>().insert(dims);
        if pending.style == FrameStyle::Table {
            root.insert(frame_collider(&dims));
        }
        debug!(
            "Fitted frame to {}x{} photo: {:.3}x{:.3}",
            image.width(),
            image.height(),
            dims.photo.x,
            dims.photo.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_fit_landscape_and_portrait() {
        assert!(close(fit_photo(2.0, 0.35, 0.9), Vec2::new(0.35, 0.175)));
        assert!(close(fit_photo(0.5, 0.35, 0.9), Vec2::new(0.175, 0.35)));
    }

    #[test]
    fn test_fit_nearly_square_shrinks() {
        let square = fit_photo(1.0, 0.9, 0.85);
        assert!(close(square, Vec2::splat(0.765)));

        let tall = fit_photo(0.9, 0.35, 0.9);
        assert!((tall.y - 0.315).abs() < 1e-5);
        assert!((tall.x - 0.2835).abs() < 1e-5);
    }

    #[test]
    fn test_fit_boundaries_are_square() {
        // 1.2 and 0.8 themselves are still nearly square.
        let wide = fit_photo(1.2, 1.0, 0.5);
        assert!((wide.x - 0.5).abs() < 1e-5);
        let narrow = fit_photo(0.8, 1.0, 0.5);
        assert!((narrow.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_layers_pad_outward() {
        let dims = FrameDimensions::from_photo(Vec2::new(0.2, 0.3), 0.05);
        assert!(close(dims.outer, Vec2::new(0.3, 0.4)));
        assert!(close(dims.mid, Vec2::new(0.275, 0.375)));
        assert!(close(dims.inner, Vec2::new(0.25, 0.35)));
        assert!(close(dims.glass, Vec2::new(0.24, 0.34)));
    }

    #[test]
    fn test_default_dimensions_match_default_photo() {
        let derived = FrameDimensions::from_photo(FrameDimensions::DEFAULT.photo, 0.05);
        assert!(close(derived.outer, FrameDimensions::DEFAULT.outer));
        assert!(close(derived.glass, FrameDimensions::DEFAULT.glass));
    }

    #[test]
    fn test_parts_follow_outer_size() {
        let dims = PhotoFit::TABLE.dimensions(2.0);
        let crown = part_transform(FrameStyle::Table, FramePart::Crown, &dims);
        assert!((crown.translation.y - (dims.outer.y / 2.0 + 0.01)).abs() < 1e-5);

        let corner = part_transform(FrameStyle::Table, FramePart::Corner { x: 1.0, y: -1.0 }, &dims);
        assert!(corner.translation.x > 0.0 && corner.translation.y < 0.0);

        let glass = part_transform(FrameStyle::Table, FramePart::Glass, &dims);
        let photo = part_transform(FrameStyle::Table, FramePart::Photo, &dims);
        assert!(glass.translation.z > photo.translation.z);
        assert!((photo.scale.x - dims.photo.x).abs() < 1e-5);
    }

    #[test]
    fn test_image_aspect_ignores_zero_sizes() {
        assert_eq!(image_aspect(0, 0), 1.0);
        assert_eq!(image_aspect(400, 200), 2.0);
    }
}
