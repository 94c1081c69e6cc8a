//! Host-side capabilities a background depends on
//!
//! The host element is composed in rather than inherited from: it provides
//! the instance uid, the initial viewport intersection, a place to put the
//! surface, and a target for notifications. Geometry for non-fitted layouts
//! comes from a separate [`CoverResize`] collaborator.

use crate::embed::EmbedSurface;
use vbg_common::events::Notification;

/// Element hosting a background
pub trait Host {
    /// Unique id of this instance; used as the surface id
    fn uid(&self) -> &str;

    /// Whether the element intersects the viewport right now
    fn is_intersecting(&self) -> bool {
        false
    }

    /// Append the surface as a child
    fn append_surface(&self, surface: &EmbedSurface);

    /// Re-apply attributes and styles of an already appended surface
    fn update_surface(&self, surface: &EmbedSurface);

    /// Remove the surface with this id
    fn remove_surface(&self, surface_id: &str);

    /// Dispatch a bubbling notification on the element
    fn dispatch(&self, notification: &Notification);
}

/// Geometry helper that sizes a surface to cover its parent
///
/// `resolution_mod` is the video's width / height ratio; `offset` is the
/// number of extra pixels to overflow the parent by.
pub trait CoverResize {
    fn cover(&self, surface: &mut EmbedSurface, resolution_mod: f64, offset: f64);
}
