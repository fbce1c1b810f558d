//! Wall galleries
//!
//! Two rows of photos on the back wall and one row on each side wall. Every
//! row has its own frame color; the frame boxes carry the backing texture.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::frames::*;
use super::kit::Kit;
use crate::room::assets::RoomAssets;
use crate::room::palette::Finish;

/// Wall plane offset, just in front of the wall surface.
const WALL_INSET: f32 = 9.9;

pub struct GalleryRow {
    /// Frame centers along the row.
    pub slots: [Vec3; 3],
    pub yaw: f32,
    pub max: f32,
    pub finish: Finish,
    /// 1-based photo numbers, in slot order.
    pub photos: [usize; 3],
}

pub fn gallery_rows() -> [GalleryRow; 4] {
    let along_back = |y: f32| [-6.0, 0.0, 6.0].map(|x| Vec3::new(x, y, -WALL_INSET));
    let along_side = |x: f32| [-6.0, 0.0, 6.0].map(|z| Vec3::new(x, 3.0, z));
    [
        GalleryRow {
            slots: along_back(3.5),
            yaw: 0.0,
            max: 1.0,
            finish: Finish::metal("#ffd700", 0.8, 0.2),
            photos: [1, 3, 5],
        },
        GalleryRow {
            slots: along_back(2.0),
            yaw: 0.0,
            max: 0.9,
            finish: Finish::metal("#ffc0cb", 0.7, 0.3),
            photos: [6, 2, 4],
        },
        GalleryRow {
            slots: along_side(-WALL_INSET),
            yaw: FRAC_PI_2,
            max: 0.9,
            finish: Finish::metal("#daa520", 0.8, 0.3),
            photos: [3, 5, 1],
        },
        GalleryRow {
            slots: along_side(WALL_INSET),
            yaw: -FRAC_PI_2,
            max: 0.9,
            finish: Finish::metal("#c0c0c0", 0.9, 0.2),
            photos: [2, 4, 6],
        },
    ]
}

pub fn spawn_galleries(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<RoomAssets>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let mut count = 0;

    for row in gallery_rows() {
        let fit = PhotoFit::GALLERY.with_max(row.max);
        let dims = fit.dimensions(1.0);
        let backing = kit.material(StandardMaterial {
            base_color_texture: Some(assets.gallery_backing.clone()),
            ..row.finish.material()
        });

        for (slot, number) in row.slots.into_iter().zip(row.photos) {
            let photo = assets.photo(number - 1);
            let look = FrameLook {
                frame: row.finish,
                photo: kit.material(photo_material(photo.clone())),
                backing: Some(backing.clone()),
            };

            commands
                .spawn((
                    Transform::from_translation(slot).with_rotation(Quat::from_rotation_y(row.yaw)),
                    Visibility::default(),
                    PendingFit {
                        photo,
                        style: FrameStyle::Gallery,
                        fit,
                    },
                    dims,
                ))
                .with_children(|frame| {
                    spawn_frame_parts(frame, &mut kit, FrameStyle::Gallery, &dims, look);
                });
            count += 1;
        }
    }

    debug!("Hung {} gallery frames", count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_photo_hangs_on_each_wall() {
        let rows = gallery_rows();
        let mut back: Vec<usize> = rows[0].photos.iter().chain(rows[1].photos.iter()).copied().collect();
        back.sort_unstable();
        assert_eq!(back, vec![1, 2, 3, 4, 5, 6]);
        for row in &rows[2..] {
            assert!(row.photos.iter().all(|n| (1..=6).contains(n)));
        }
    }

    #[test]
    fn test_side_frames_face_the_room() {
        for row in &gallery_rows()[2..] {
            let facing = Quat::from_rotation_y(row.yaw) * Vec3::Z;
            // Facing away from the wall, toward the room center.
            assert!(facing.x * row.slots[0].x < 0.0);
        }
    }
}
