//! Messages exchanged between the room's systems

use bevy::prelude::*;

use super::pickable::{PickableId, PickableKind};

/// Ask the wish dialog to open.
#[derive(Message, Clone, Debug, Default)]
pub struct OpenWishDialog;

/// The wish dialog became visible.
#[derive(Message, Clone, Debug, Default)]
pub struct WishDialogOpened;

/// The wish dialog was dismissed or finished submitting.
#[derive(Message, Clone, Debug, Default)]
pub struct WishDialogClosed;

#[derive(Message, Clone, Debug, Default)]
pub struct WishSubmitted {
    pub wish: String,
}

/// Start blowing the candles out (and the breath effect).
#[derive(Message, Clone, Debug, Default)]
pub struct BlowCandles;

/// Every flame has gone out.
#[derive(Message, Clone, Debug, Default)]
pub struct CandlesExtinguished;

/// The pickable under the crosshair changed.
#[derive(Message, Clone, Debug, Default)]
pub struct HoverChanged {
    pub target: Option<(PickableId, PickableKind)>,
}

#[derive(Message, Clone, Debug)]
pub struct PickupChanged {
    pub id: PickableId,
    pub kind: PickableKind,
    pub held: bool,
}

/// Release whatever is held.
#[derive(Message, Clone, Debug, Default)]
pub struct DropHeld;
