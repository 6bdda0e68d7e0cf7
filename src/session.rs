use crate::anim::{GrowthAnimator, StepToken};
use crate::camera::{CameraDirective, Orbit};
use crate::config::RenderConfig;
use crate::data::{AreaId, Dataset};
use crate::io::{cells_to_geojson, parcels_to_geojson};
use crate::render::{FeatureId, RenderSurface};
use crate::stats::{compute_field_statistics, compute_step_distribution, FieldStatistics, StepDistribution};
use crate::story::{Story, StoryStep};
use crate::surface::{build_extrusion_surface, build_parcel_surface, ParcelFeature, RenderCell};
use crate::sync::{HoverSync, IdentityMap};

/// Events the UI forwards to the core.
pub trait StoryObserver {
    fn on_step_change(&mut self, index: usize);
    fn on_hover_enter(&mut self, area: &AreaId);
    fn on_hover_leave(&mut self, area: &AreaId);
}

/// All mutable state of one map session: the active step and its token,
/// the growth animation in flight, identity and hover tracking, and the
/// render surface they write to.
///
/// Everything runs on the caller's thread. The only deferred work is the
/// growth animation, advanced by calling [`Session::tick`] once per frame.
pub struct Session<S: RenderSurface> {
    dataset: Dataset,
    stats: FieldStatistics,
    parcels: Vec<ParcelFeature>,
    story: Story,
    config: RenderConfig,

    step: usize,
    token: StepToken,
    distribution: Option<StepDistribution>,
    animator: GrowthAnimator,

    identities: IdentityMap,
    hover: HoverSync,
    orbit: Orbit,

    surface: S,
}

impl<S: RenderSurface> Session<S> {
    /// Compute dataset statistics and the parcel layer. Nothing is sent to
    /// the surface until [`Session::mount`].
    pub fn new(dataset: Dataset, story: Story, config: RenderConfig, surface: S) -> Self {
        let stats = compute_field_statistics(dataset.records());
        let parcels = build_parcel_surface(dataset.records());
        tracing::debug!(
            records = dataset.len(),
            parcels = parcels.len(),
            fields = stats.len(),
            steps = story.len(),
            "session created"
        );
        Self {
            animator: GrowthAnimator::new(config.growth_frames),
            dataset,
            stats,
            parcels,
            story,
            config,
            step: 0,
            token: StepToken::default(),
            distribution: None,
            identities: IdentityMap::new(),
            hover: HoverSync::new(),
            orbit: Orbit::default(),
            surface,
        }
    }

    /// Send the parcel layer and activate the current step.
    pub fn mount(&mut self) {
        self.surface.set_parcel_data(parcels_to_geojson(&self.parcels));
        self.activate(self.step);
    }

    /// Full remount: engine feature ids are reassigned, so every identity,
    /// hover and animation is forgotten before mounting again.
    pub fn remount(&mut self) {
        self.animator.cancel();
        self.identities.clear();
        self.hover.reset();
        self.orbit = Orbit::default();
        self.mount();
    }

    /// Make `index` (clamped) the active step and start growing its cells.
    fn activate(&mut self, index: usize) {
        let index = self.story.clamp(index);
        self.animator.cancel();
        self.token = self.token.next();
        self.step = index;

        let step = self.story.step(index);
        let records = self.dataset.records();
        self.distribution = step.field().and_then(|field| compute_step_distribution(records, field));
        let target = build_extrusion_surface(records, &self.stats, step, &self.config);

        tracing::info!(
            step = index,
            field = step.field().unwrap_or("-"),
            cells = target.len(),
            token = %self.token,
            "step activated"
        );

        self.surface.set_extrusion_visible(step.field().is_some());
        let first = self.animator.start(target, self.token);
        self.surface.set_extrusion_data(cells_to_geojson(&first.cells));

        let camera = CameraDirective::for_step(index, &self.config);
        self.orbit.set_active(camera.orbit);
        self.surface.apply_camera(&camera);
    }

    /// Advance one frame. Returns whether another frame should be scheduled.
    pub fn tick(&mut self) -> bool {
        if let Some(frame) = self.animator.tick(self.token) {
            tracing::trace!(token = %frame.token, frame = frame.frame, progress = frame.progress, "growth frame");
            self.surface.set_extrusion_data(cells_to_geojson(&frame.cells));
        }
        if let Some(degrees) = self.orbit.advance(self.config.orbit_degrees_per_frame) {
            self.surface.rotate_bearing(degrees);
        }
        self.needs_frame()
    }

    /// Whether a frame callback should be pending.
    #[inline]
    pub fn needs_frame(&self) -> bool { self.animator.is_animating() || self.orbit.is_active() }

    /// The surface has finished loading. The first call that sees
    /// materialized parcels fills the identity map; later calls do nothing.
    /// Returns how many identities were recorded.
    pub fn on_surface_idle(&mut self) -> usize {
        if !self.identities.is_empty() {
            return 0;
        }
        let features = self.surface.query_parcel_features();
        let added = self.identities.populate(&features);
        if added > 0 {
            tracing::debug!(added, reported = features.len(), "identity map populated");
        }
        added
    }

    /// A pointer hover that started on the map: the area whose list row should highlight.
    pub fn on_map_hover(&self, id: Option<FeatureId>) -> Option<&AreaId> {
        id.and_then(|id| self.identities.area_of(id))
    }

    pub fn on_pointer_down(&mut self) { self.orbit.set_dragging(true); }

    pub fn on_pointer_up(&mut self) { self.orbit.set_dragging(false); }

    /// Cells of any step at full height, without touching the surface.
    pub fn extrusion_surface(&self, index: usize) -> Vec<RenderCell> {
        build_extrusion_surface(self.dataset.records(), &self.stats, self.story.step(index), &self.config)
    }

    #[inline] pub fn step(&self) -> usize { self.step }

    #[inline] pub fn active_step(&self) -> &StoryStep { self.story.step(self.step) }

    #[inline] pub fn token(&self) -> StepToken { self.token }

    #[inline] pub fn story(&self) -> &Story { &self.story }

    #[inline] pub fn dataset(&self) -> &Dataset { &self.dataset }

    #[inline] pub fn config(&self) -> &RenderConfig { &self.config }

    #[inline] pub fn field_statistics(&self) -> &FieldStatistics { &self.stats }

    #[inline] pub fn distribution(&self) -> Option<&StepDistribution> { self.distribution.as_ref() }

    #[inline] pub fn parcels(&self) -> &[ParcelFeature] { &self.parcels }

    #[inline] pub fn identities(&self) -> &IdentityMap { &self.identities }

    #[inline] pub fn hovered(&self) -> Option<&AreaId> { self.hover.hovered() }

    #[inline] pub fn is_animating(&self) -> bool { self.animator.is_animating() }

    #[inline] pub fn surface(&self) -> &S { &self.surface }

    #[inline] pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
}

impl<S: RenderSurface> StoryObserver for Session<S> {
    fn on_step_change(&mut self, index: usize) {
        self.activate(index);
    }

    fn on_hover_enter(&mut self, area: &AreaId) {
        self.hover.enter(area, &self.identities, &mut self.surface);
    }

    fn on_hover_leave(&mut self, area: &AreaId) {
        self.hover.leave(area, &self.identities, &mut self.surface);
    }
}
