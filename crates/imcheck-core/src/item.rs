//! Per-frame item registry entries.
//!
//! Widgets describe themselves here as they are laid out. The registry is
//! rebuilt every frame and is what scripted drivers query to locate widgets.

use crate::{id::Id, Rect};

/// What kind of widget produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Window,
    Button,
    Checkbox,
    Slider,
    InputText,
    Combo,
    Selectable,
    ListBox,
    Menu,
    MenuItem,
    Tab,
    Header,
}

bitflags::bitflags! {
    /// Observable widget status at the time the item was submitted.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ItemStatus: u8 {
        const CHECKABLE = 1 << 0;
        const CHECKED   = 1 << 1;
        const OPENED    = 1 << 2;
        const FOCUSED   = 1 << 3;
        const SELECTED  = 1 << 4;
    }
}

/// One widget as seen during the last frame.
#[derive(Debug, Clone)]
pub struct ItemInfo {
    pub id:     Id,
    /// Interactive rect, already clipped to the enclosing scroll region.
    pub rect:   Rect,
    pub label:  String,
    pub kind:   ItemKind,
    pub status: ItemStatus,
}

impl ItemInfo {
    /// An item scrolled out of its region has no clickable area.
    pub fn is_visible(&self) -> bool { !self.rect.is_empty() }

    pub fn is_checked(&self) -> bool { self.status.contains(ItemStatus::CHECKED) }
}
