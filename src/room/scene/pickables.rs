//! Photo frames on the table and the flower bouquet

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::frames::*;
use super::kit::Kit;
use crate::room::assets::RoomAssets;
use crate::room::palette::Finish;
use crate::room::types::{PickableObject, PickableId};

/// (frame number, position, yaw, scale) of the frames standing on the table.
pub const TABLE_FRAMES: [(u8, Vec3, f32, f32); 6] = [
    (1, Vec3::new(-1.1, 1.35, -2.3), 0.3, 0.6),
    (2, Vec3::new(-0.5, 1.35, -2.1), 0.1, 0.55),
    (3, Vec3::new(0.5, 1.35, -2.1), -0.1, 0.55),
    (4, Vec3::new(1.1, 1.35, -2.3), -0.3, 0.6),
    (5, Vec3::new(-0.7, 1.35, -3.7), 0.2, 0.5),
    (6, Vec3::new(0.7, 1.35, -3.7), -0.2, 0.5),
];

pub const BOUQUET_POSITION: Vec3 = Vec3::new(1.2, 1.1, -3.2);
const BOUQUET_MODEL_SCALE: f32 = 2.0;
const BOUQUET_HALF_EXTENTS: Vec3 = Vec3::new(0.15, 0.35, 0.15);

const FRAME_GOLD: Finish = Finish::metal("#b8860b", 0.7, 0.4).glowing("#7a5a1f", 0.2);

pub fn bouquet_home() -> Transform {
    Transform::from_translation(BOUQUET_POSITION)
        .with_rotation(Quat::from_euler(EulerRot::XYZ, PI / 3.0, 0.0, PI / 6.0))
}

pub fn spawn_pickable_frames(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<RoomAssets>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let dims = FrameDimensions::DEFAULT;

    for (number, position, yaw, scale) in TABLE_FRAMES {
        let photo = assets.photo(number as usize - 1);
        let home = Transform::from_translation(position)
            .with_rotation(Quat::from_rotation_y(yaw))
            .with_scale(Vec3::splat(scale));
        let look = FrameLook {
            frame: FRAME_GOLD,
            photo: kit.material(photo_material(photo.clone())),
            backing: None,
        };

        commands
            .spawn((
                home,
                Visibility::default(),
                PickableObject {
                    id: PickableId::Frame(number),
                    home,
                },
                frame_collider(&dims),
                Sensor,
                PendingFit {
                    photo,
                    style: FrameStyle::Table,
                    fit: PhotoFit::TABLE,
                },
                dims,
            ))
            .with_children(|frame| {
                spawn_frame_parts(frame, &mut kit, FrameStyle::Table, &dims, look);
            });
    }

    info!("Placed {} photo frames on the table", TABLE_FRAMES.len());
}

pub fn spawn_bouquet(mut commands: Commands, assets: Res<RoomAssets>) {
    let home = bouquet_home();
    commands
        .spawn((
            home,
            Visibility::default(),
            PickableObject {
                id: PickableId::Bouquet,
                home,
            },
            Collider::cuboid(
                BOUQUET_HALF_EXTENTS.x,
                BOUQUET_HALF_EXTENTS.y,
                BOUQUET_HALF_EXTENTS.z,
            ),
            Sensor,
        ))
        .with_children(|bouquet| {
            bouquet.spawn((
                SceneRoot(assets.bouquet.clone()),
                Transform::from_scale(Vec3::splat(BOUQUET_MODEL_SCALE)),
            ));
        });

    info!("Placed bouquet at {:?}", BOUQUET_POSITION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::types::PICKABLE_FRAME_COUNT;

    #[test]
    fn test_table_frames_cover_every_id() {
        let mut numbers: Vec<u8> = TABLE_FRAMES.iter().map(|f| f.0).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=PICKABLE_FRAME_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_frames_stand_on_the_table() {
        for (_, position, _, _) in TABLE_FRAMES {
            assert!(position.x.abs() < 1.6);
            assert!(position.z > -4.1 && position.z < -1.9);
        }
    }

    #[test]
    fn test_bouquet_home_is_tilted() {
        let home = bouquet_home();
        assert_eq!(home.translation, BOUQUET_POSITION);
        assert!(home.rotation.angle_between(Quat::IDENTITY) > 0.5);
    }
}
