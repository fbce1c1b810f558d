//! Handles to the room's external media, loaded once through the asset server.

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::room::types::RoomConfig;

#[derive(Resource, Clone)]
pub struct RoomAssets {
    pub photos: Vec<Handle<Image>>,
    pub gallery_backing: Handle<Image>,
    pub bouquet: Handle<Scene>,
    /// The bouquet's source file. A corrupt or label-less file only ever
    /// reports on this handle, never on `bouquet`.
    pub bouquet_model: Handle<Gltf>,
    pub font: Handle<Font>,
    pub music: Handle<AudioSource>,
}

impl RoomAssets {
    /// Photo for slot `index`, cycling when fewer photos are configured.
    pub fn photo(&self, index: usize) -> Handle<Image> {
        if self.photos.is_empty() {
            return Handle::default();
        }
        self.photos[index % self.photos.len()].clone()
    }

    /// Everything the loading screen waits on.
    pub fn tracked(&self) -> Vec<TrackedAsset> {
        let mut tracked: Vec<TrackedAsset> =
            self.photos.iter().map(|h| TrackedAsset::new(h.id())).collect();
        tracked.push(TrackedAsset::new(self.gallery_backing.id()));
        tracked.push(TrackedAsset::labeled(self.bouquet.id(), self.bouquet_model.id()));
        tracked.push(TrackedAsset::new(self.font.id()));
        tracked.push(TrackedAsset::new(self.music.id()));
        tracked
    }
}

/// An asset the loading screen waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedAsset {
    pub id: UntypedAssetId,
    /// Source file of a labeled sub-asset. Once the file itself has loaded
    /// or failed, the label will not change state any more.
    pub source: Option<UntypedAssetId>,
}

impl TrackedAsset {
    pub fn new(id: impl Into<UntypedAssetId>) -> Self {
        Self {
            id: id.into(),
            source: None,
        }
    }

    pub fn labeled(id: impl Into<UntypedAssetId>, source: impl Into<UntypedAssetId>) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
        }
    }

    pub fn is_settled(&self, state_of: impl Fn(UntypedAssetId) -> Option<LoadState>) -> bool {
        is_settled(state_of(self.id)) || self.source.is_some_and(|source| is_settled(state_of(source)))
    }
}

/// Loaded or failed; either way the loading screen stops waiting for it.
pub fn is_settled(state: Option<LoadState>) -> bool {
    matches!(state, Some(LoadState::Loaded) | Some(LoadState::Failed(_)))
}

pub fn count_settled(
    tracked: &[TrackedAsset],
    state_of: impl Fn(UntypedAssetId) -> Option<LoadState>,
) -> usize {
    tracked.iter().filter(|asset| asset.is_settled(&state_of)).count()
}

pub fn load_room_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<RoomConfig>,
) {
    let assets = &config.assets;
    let handles = RoomAssets {
        photos: assets.photos.iter().map(|path| asset_server.load(path)).collect(),
        gallery_backing: asset_server.load(&assets.gallery_backing),
        bouquet: asset_server
            .load(GltfAssetLabel::Scene(0).from_asset(assets.bouquet_model.clone())),
        bouquet_model: asset_server.load(&assets.bouquet_model),
        font: asset_server.load(&assets.font),
        music: asset_server.load(&config.audio.music),
    };

    info!(
        "Loading {} photos, bouquet '{}', font '{}', music '{}'",
        handles.photos.len(),
        assets.bouquet_model,
        assets.font,
        config.audio.music
    );
    commands.insert_resource(handles);
}
