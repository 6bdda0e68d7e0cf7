use crate::data::AreaId;
use crate::render::RenderSurface;
use crate::sync::IdentityMap;

/// Hover state driven from the ranked list. At most one area is highlighted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverSync {
    hovered: Option<AreaId>,
}

impl HoverSync {
    pub fn new() -> Self { Self::default() }

    /// Area currently hovered from the list, if any.
    #[inline] pub fn hovered(&self) -> Option<&AreaId> { self.hovered.as_ref() }

    /// Hover `area`, first clearing the flag of whichever area was hovered before.
    pub fn enter(&mut self, area: &AreaId, identities: &IdentityMap, surface: &mut dyn RenderSurface) {
        if let Some(previous) = self.hovered.take() {
            if &previous != area {
                set_hover_state(&previous, false, identities, surface);
            }
        }
        set_hover_state(area, true, identities, surface);
        self.hovered = Some(area.clone());
    }

    /// Clear the flag of `area` explicitly.
    pub fn leave(&mut self, area: &AreaId, identities: &IdentityMap, surface: &mut dyn RenderSurface) {
        set_hover_state(area, false, identities, surface);
        if self.hovered.as_ref() == Some(area) {
            self.hovered = None;
        }
    }

    /// Forget the hovered area without touching the surface (used on remount).
    pub fn reset(&mut self) { self.hovered = None; }
}

/// Toggle the hover flag of `area` on the surface. An area without a known
/// feature id yet is a silent no-op.
pub fn set_hover_state(area: &AreaId, active: bool, identities: &IdentityMap, surface: &mut dyn RenderSurface) {
    match identities.resolve(area) {
        Some(id) => surface.set_feature_hover(id, active),
        None => tracing::trace!(area_id = %area, active, "hover target not materialized yet"),
    }
}
