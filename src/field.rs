//! The neuron field.
//!
//! A [`Field`] owns every [`Emitter`]. It stays empty until resources are
//! ready, then places all neurons in one go and adds a bounding box helper.
//! After that, [`Field::update`] (or [`Field::advance_frame`] with a clock)
//! runs once per rendered frame.
//!
//! # Example
//!
//! ```
//! use neurofield::prelude::*;
//!
//! let config = FieldConfig::new().with_neuron_count(120).with_seed(7);
//! let resources = Resources::with_defaults();
//! let mut scene = Scene::new();
//! let mut rng = SmallRandom::from_seed_option(config.seed);
//!
//! let mut field = Field::new(config);
//! field.on_ready(&resources, &mut scene, &mut rng)?;
//! assert_eq!(field.emitters().len(), 120);
//!
//! // One frame at ~60 fps
//! field.update(16.0, &mut rng, &mut scene);
//! # Ok::<(), neurofield::ResourceError>(())
//! ```

use tracing::{info, trace, warn};

use crate::color;
use crate::config::FieldConfig;
use crate::emitter::Emitter;
use crate::error::ResourceError;
use crate::random::RandomSource;
use crate::resources::Resources;
use crate::scene::{LineSegments, Material, Node, NodeId, SceneContainer};
use crate::spawn::GridLayout;
use crate::time::FrameClock;

/// What happened during one [`Field::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Flashes started (or restarted) this frame.
    pub triggered: usize,
    /// Emitters still flashing after the frame.
    pub flashing: usize,
    /// Visual objects whose color was rewritten.
    pub repainted: usize,
}

/// A jittered grid of flashing neurons.
#[derive(Debug, Clone)]
pub struct Field {
    config: FieldConfig,
    layout: GridLayout,
    emitters: Vec<Emitter>,
    bounds_helper: Option<NodeId>,
    placed: bool,
}

impl Field {
    /// Create an empty field. Nothing is placed until
    /// [`on_ready`](Self::on_ready).
    pub fn new(config: FieldConfig) -> Self {
        let layout = GridLayout::for_count(config.neuron_count, config.length, config.width);
        Self {
            config,
            layout,
            emitters: Vec::new(),
            bounds_helper: None,
            placed: false,
        }
    }

    /// Readiness hook: place every neuron and add the bounds helper.
    ///
    /// Runs once. Later calls log a warning and change nothing. Fails,
    /// without touching the scene, if the configured template cannot be
    /// fetched.
    pub fn on_ready<S, R>(
        &mut self,
        resources: &Resources,
        scene: &mut S,
        rng: &mut R,
    ) -> Result<(), ResourceError>
    where
        S: SceneContainer + ?Sized,
        R: RandomSource + ?Sized,
    {
        if self.placed {
            warn!("Field already placed, ignoring repeated ready signal");
            return Ok(());
        }

        let template = resources.template(&self.config.template)?;
        self.create_random_placement(template, scene, rng);
        self.bounds_helper = Some(self.add_bounds_helper(scene));

        info!(
            neurons = self.emitters.len(),
            rows = self.layout.rows,
            columns = self.layout.columns,
            template = %self.config.template,
            "Field placed"
        );
        Ok(())
    }

    /// Instantiate `template` once per grid cell with a random pose.
    ///
    /// Each instance gets its own transparent material in the base color, so
    /// a neuron rests dark until its first flash rather than starting at the
    /// flash color. Returns how many emitters were created; zero if the field
    /// was already placed.
    pub fn create_random_placement<S, R>(&mut self, template: &Node, scene: &mut S, rng: &mut R) -> usize
    where
        S: SceneContainer + ?Sized,
        R: RandomSource + ?Sized,
    {
        if self.placed {
            return 0;
        }

        let neuron = &self.config.neuron;
        let material = Material::basic(neuron.base_rgb(), neuron.opacity);
        let poses = self.layout.scatter(self.config.depth, neuron, rng);

        self.emitters.reserve_exact(poses.len());
        for pose in poses {
            let node = scene.add(template.instantiate(pose, material));
            self.emitters.push(Emitter::new(pose, neuron).with_node(node));
        }
        self.placed = true;
        self.emitters.len()
    }

    fn add_bounds_helper<S: SceneContainer + ?Sized>(&self, scene: &mut S) -> NodeId {
        let lines = LineSegments::box_helper(
            self.config.bounds_size(),
            color::from_hex(self.config.bounds_color),
        );
        scene.add(Node::lines("bounds", lines))
    }

    /// Advance one frame.
    ///
    /// Every emitter independently starts a flash with the configured
    /// probability, then all emitters advance by `delta_ms * delta_scale`.
    /// Emitters whose color changed are repainted in `scene`.
    pub fn update<R, S>(&mut self, delta_ms: f32, rng: &mut R, scene: &mut S) -> FrameStats
    where
        R: RandomSource + ?Sized,
        S: SceneContainer + ?Sized,
    {
        let mut stats = FrameStats::default();
        if self.emitters.is_empty() {
            return stats;
        }

        let dt = delta_ms * self.config.delta_scale;
        let p = self.config.flash_probability;

        for emitter in &mut self.emitters {
            let mut changed = false;
            if rng.chance(p) {
                emitter.trigger();
                stats.triggered += 1;
                changed = true;
            }
            changed |= emitter.advance(dt);

            if emitter.is_flashing() {
                stats.flashing += 1;
            }
            if changed {
                if let Some(node) = emitter.node() {
                    if scene.paint(node, emitter.color()) {
                        stats.repainted += 1;
                    }
                }
            }
        }

        trace!(
            dt,
            triggered = stats.triggered,
            flashing = stats.flashing,
            repainted = stats.repainted,
            "Field update"
        );
        stats
    }

    /// Advance one frame as timed by `clock`.
    ///
    /// A paused clock freezes the field: nothing triggers, nothing fades and
    /// the scene is left untouched.
    pub fn advance_frame<C, R, S>(&mut self, clock: &C, rng: &mut R, scene: &mut S) -> FrameStats
    where
        C: FrameClock + ?Sized,
        R: RandomSource + ?Sized,
        S: SceneContainer + ?Sized,
    {
        if clock.is_paused() {
            return FrameStats::default();
        }
        self.update(clock.delta_ms(), rng, scene)
    }

    /// Emitters in placement order.
    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// Number of emitters currently flashing.
    pub fn flashing_count(&self) -> usize {
        self.emitters.iter().filter(|e| e.is_flashing()).count()
    }

    /// Whether placement has happened.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Grid used for placement.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Configuration the field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Handle of the bounds helper, once placed.
    pub fn bounds_helper(&self) -> Option<NodeId> {
        self.bounds_helper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, SmallRandom};
    use crate::scene::{template, Scene};
    use crate::time::ManualClock;

    fn placed(config: FieldConfig) -> (Field, Scene) {
        let mut scene = Scene::new();
        let mut field = Field::new(config);
        field
            .on_ready(&Resources::with_defaults(), &mut scene, &mut SmallRandom::seeded(3))
            .unwrap();
        (field, scene)
    }

    #[test]
    fn test_nothing_before_ready() {
        let mut field = Field::new(FieldConfig::default());
        let mut scene = Scene::new();
        let stats = field.update(16.0, &mut SequenceRandom::constant(0.0), &mut scene);
        assert_eq!(stats, FrameStats::default());
        assert!(!field.is_placed());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_placement_adds_neurons_and_helper() {
        let (field, scene) = placed(FieldConfig::new().with_neuron_count(120));
        assert_eq!(field.emitters().len(), 120);
        assert_eq!(scene.len(), 121);

        let helper = field.bounds_helper().unwrap();
        assert_eq!(helper.index(), 120);
        assert_eq!(scene.node(helper).unwrap().paintable_count(), 0);

        for (i, e) in field.emitters().iter().enumerate() {
            assert_eq!(e.node().unwrap().index(), i);
        }
    }

    #[test]
    fn test_instances_start_in_base_color() {
        let (field, scene) = placed(FieldConfig::new().with_neuron_count(9));
        let base = field.config().neuron.base_rgb();
        let opacity = field.config().neuron.opacity;
        for e in field.emitters() {
            let node = scene.node(e.node().unwrap()).unwrap();
            assert_eq!(node.transform, *e.pose());
            node.visit_paintable(|m| {
                assert_eq!(m.color, base);
                assert_eq!(m.opacity, opacity);
                assert!(m.transparent);
            });
        }
    }

    #[test]
    fn test_second_ready_is_ignored() {
        let (mut field, mut scene) = placed(FieldConfig::new().with_neuron_count(5));
        field
            .on_ready(&Resources::with_defaults(), &mut scene, &mut SmallRandom::seeded(4))
            .unwrap();
        assert_eq!(field.emitters().len(), 5);
        assert_eq!(scene.len(), 6);
    }

    #[test]
    fn test_missing_template_propagates() {
        let mut field = Field::new(FieldConfig::new().with_template("mouse"));
        let mut scene = Scene::new();
        let err = field
            .on_ready(&Resources::with_defaults(), &mut scene, &mut SmallRandom::seeded(1))
            .unwrap_err();
        assert_eq!(err, ResourceError::Missing("mouse".into()));
        assert!(scene.is_empty());
        assert!(!field.is_placed());
    }

    #[test]
    fn test_not_ready_resources() {
        let mut resources = Resources::new();
        resources.insert(template::NEURON, template::neuron());
        let mut field = Field::new(FieldConfig::default());
        let err = field
            .on_ready(&resources, &mut Scene::new(), &mut SmallRandom::seeded(1))
            .unwrap_err();
        assert_eq!(err, ResourceError::NotReady);
    }

    #[test]
    fn test_zero_probability_never_flashes() {
        let (mut field, mut scene) =
            placed(FieldConfig::new().with_neuron_count(50).with_flash_probability(0.0));
        let mut rng = SmallRandom::seeded(99);
        for _ in 0..500 {
            let stats = field.update(16.0, &mut rng, &mut scene);
            assert_eq!(stats.triggered, 0);
            assert_eq!(stats.repainted, 0);
        }
        assert_eq!(field.flashing_count(), 0);
    }

    #[test]
    fn test_certain_trigger_repaints_everything() {
        let (mut field, mut scene) =
            placed(FieldConfig::new().with_neuron_count(10).with_flash_probability(1.0));
        let stats = field.update(0.0, &mut SequenceRandom::constant(0.5), &mut scene);
        assert_eq!(stats.triggered, 10);
        assert_eq!(stats.flashing, 10);
        assert_eq!(stats.repainted, 10);

        let flash = field.config().neuron.flash_rgb();
        for e in field.emitters() {
            assert_eq!(e.color(), flash);
            scene
                .node(e.node().unwrap())
                .unwrap()
                .visit_paintable(|m| assert_eq!(m.color, flash));
        }
    }

    #[test]
    fn test_flash_fades_back_to_base() {
        // Trigger everything on frame one, then never again
        let config = FieldConfig::new()
            .with_neuron_count(4)
            .with_flash_probability(0.5);
        let (mut field, mut scene) = placed(config);
        field.update(16.0, &mut SequenceRandom::constant(0.0), &mut scene);
        assert_eq!(field.flashing_count(), 4);

        // 16 ms * 0.00015 = 0.0024 per frame; 0.05 needs 21 frames
        let mut quiet = SequenceRandom::constant(0.9);
        for _ in 0..30 {
            field.update(16.0, &mut quiet, &mut scene);
        }
        assert_eq!(field.flashing_count(), 0);

        let base = field.config().neuron.base_rgb();
        for e in field.emitters() {
            scene
                .node(e.node().unwrap())
                .unwrap()
                .visit_paintable(|m| assert_eq!(m.color, base));
        }
    }

    #[test]
    fn test_paused_clock_freezes_field() {
        let (mut field, mut scene) = placed(
            FieldConfig::new()
                .with_neuron_count(20)
                .with_flash_probability(1.0),
        );
        let mut clock = ManualClock::new(16.0);
        clock.tick();
        let stats = field.advance_frame(&clock, &mut SequenceRandom::constant(0.5), &mut scene);
        assert_eq!(stats.triggered, 20);

        clock.pause();
        let before: Vec<_> = field.emitters().iter().map(|e| e.color()).collect();
        let mut rng = SmallRandom::seeded(11);
        for _ in 0..50 {
            clock.tick();
            let stats = field.advance_frame(&clock, &mut rng, &mut scene);
            assert_eq!(stats.triggered, 0);
            assert_eq!(stats.repainted, 0);
        }
        let after: Vec<_> = field.emitters().iter().map(|e| e.color()).collect();
        assert_eq!(before, after);
        assert_eq!(field.flashing_count(), 20);
    }

    #[test]
    fn test_zero_neurons() {
        let (mut field, mut scene) = placed(FieldConfig::new().with_neuron_count(0));
        assert!(field.emitters().is_empty());
        assert!(field.is_placed());
        assert_eq!(scene.len(), 1);
        let stats = field.update(16.0, &mut SmallRandom::seeded(1), &mut scene);
        assert_eq!(stats, FrameStats::default());
    }
}
