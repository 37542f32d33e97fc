//! A single flashing neuron.
//!
//! Each emitter is a two-state machine:
//!
//! | From | Event | To | Effect |
//! |------|-------|----|--------|
//! | Idle | `trigger()` | Flashing | elapsed = 0, color = flash |
//! | Flashing | `trigger()` | Flashing | restart: elapsed = 0, color = flash |
//! | Flashing | `advance(dt)`, elapsed + dt < duration | Flashing | color eased toward base |
//! | Flashing | `advance(dt)`, elapsed + dt >= duration | Idle | color = base |
//! | Idle | `advance(dt)` | Idle | nothing |
//!
//! While flashing, the displayed color is
//! `lerp(base, flash, (1 - elapsed / duration) ^ easing_exponent)`.
//!
//! ```
//! use neurofield::{Emitter, NeuronConfig, Pose};
//!
//! let mut e = Emitter::new(Pose::IDENTITY, &NeuronConfig::default());
//! e.trigger();
//! assert!(e.is_flashing());
//! e.advance(1.0);
//! assert!(!e.is_flashing());
//! assert_eq!(e.color(), e.base_color());
//! ```

use glam::Vec3;

use crate::color;
use crate::config::NeuronConfig;
use crate::pose::Pose;
use crate::scene::NodeId;

/// Animation state of an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashState {
    /// Showing the base color.
    #[default]
    Idle,
    /// Fading from the flash color back to the base color.
    Flashing,
}

/// One neuron: a fixed pose plus its flash animation.
#[derive(Debug, Clone)]
pub struct Emitter {
    pose: Pose,
    /// Visual object in the scene, if one was created.
    node: Option<NodeId>,
    base_color: Vec3,
    flash_color: Vec3,
    flash_duration: f32,
    easing_exponent: f32,
    state: FlashState,
    elapsed: f32,
    color: Vec3,
}

impl Emitter {
    /// Create an idle emitter showing its base color.
    pub fn new(pose: Pose, config: &NeuronConfig) -> Self {
        Self::with_flash(
            pose,
            config.base_rgb(),
            config.flash_rgb(),
            config.flash_duration,
            config.easing_exponent,
        )
    }

    /// Create an idle emitter from explicit colors and timing.
    ///
    /// Duration and exponent are kept strictly positive.
    pub fn with_flash(
        pose: Pose,
        base_color: Vec3,
        flash_color: Vec3,
        flash_duration: f32,
        easing_exponent: f32,
    ) -> Self {
        Self {
            pose,
            node: None,
            base_color,
            flash_color,
            flash_duration: flash_duration.max(f32::MIN_POSITIVE),
            easing_exponent: easing_exponent.max(f32::MIN_POSITIVE),
            state: FlashState::Idle,
            elapsed: 0.0,
            color: base_color,
        }
    }

    /// Attach the handle of this emitter's visual object.
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Start (or restart) a flash.
    pub fn trigger(&mut self) {
        self.state = FlashState::Flashing;
        self.elapsed = 0.0;
        self.color = self.flash_color;
    }

    /// Move the animation forward by `dt` animation time units.
    ///
    /// Returns `true` if the displayed color changed. Idle emitters never
    /// change. Negative steps are treated as zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state == FlashState::Idle {
            return false;
        }

        self.elapsed += dt.max(0.0);
        let previous = self.color;
        if self.elapsed >= self.flash_duration {
            self.state = FlashState::Idle;
            self.color = self.base_color;
        } else {
            self.color = self.color_at(self.elapsed);
        }
        self.color != previous
    }

    /// Ease-out weight of the flash color after `elapsed` time units:
    /// 1 at the start of a flash, 0 at its end.
    pub fn eased_progress(&self, elapsed: f32) -> f32 {
        let progress = (elapsed / self.flash_duration).clamp(0.0, 1.0);
        (1.0 - progress).powf(self.easing_exponent)
    }

    /// Color shown `elapsed` time units into a flash.
    pub fn color_at(&self, elapsed: f32) -> Vec3 {
        color::lerp(self.base_color, self.flash_color, self.eased_progress(elapsed))
    }

    /// Fixed pose.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Handle of the visual object, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Current animation state.
    pub fn state(&self) -> FlashState {
        self.state
    }

    /// Whether a flash is in progress.
    pub fn is_flashing(&self) -> bool {
        self.state == FlashState::Flashing
    }

    /// Time since the last trigger.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Flash progress in 0.0-1.0; 0 when idle.
    pub fn progress(&self) -> f32 {
        match self.state {
            FlashState::Idle => 0.0,
            FlashState::Flashing => (self.elapsed / self.flash_duration).min(1.0),
        }
    }

    /// Currently displayed color.
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Resting color.
    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    /// Peak flash color.
    pub fn flash_color(&self) -> Vec3 {
        self.flash_color
    }

    /// Length of a flash.
    pub fn flash_duration(&self) -> f32 {
        self.flash_duration
    }

    /// Ease-out exponent.
    pub fn easing_exponent(&self) -> f32 {
        self.easing_exponent
    }
}
