//! # neurofield
//!
//! A rectangular slab of neurons placed on a jittered grid, each one flashing
//! at random and fading back to its resting color.
//!
//! The crate is split into a pure core and an optional viewer:
//!
//! - [`Field`] owns the neurons. It waits for [`Resources`] to become ready,
//!   places one template instance per grid cell in a [`Scene`], then
//!   animates them frame by frame.
//! - [`Emitter`] is the flash state machine of a single neuron.
//! - [`GridLayout`] computes the grid and scatters random poses over it.
//! - With the `viewer` feature, [`run`] opens a window and renders the field
//!   with wgpu.
//!
//! ## Quick Start
//!
//! ```
//! use neurofield::prelude::*;
//!
//! let config = FieldConfig::new()
//!     .with_neuron_count(200)
//!     .with_flash_probability(0.05)
//!     .with_seed(42);
//!
//! let resources = Resources::with_defaults();
//! let mut scene = Scene::new();
//! let mut rng = SmallRandom::from_seed_option(config.seed);
//! let mut clock = ManualClock::new(16.0);
//!
//! let mut field = Field::new(config);
//! field.on_ready(&resources, &mut scene, &mut rng)?;
//!
//! for _ in 0..60 {
//!     clock.tick();
//!     field.update(clock.delta_ms(), &mut rng, &mut scene);
//! }
//! # Ok::<(), neurofield::ResourceError>(())
//! ```
//!
//! ## Time units
//!
//! Clocks report milliseconds. The field multiplies each frame delta by
//! [`FieldConfig::delta_scale`] before advancing emitters, so
//! [`NeuronConfig::flash_duration`] is in those scaled units. With the
//! defaults a flash lasts roughly 330 ms of wall time.
//!
//! ## Logging
//!
//! Everything logs through [`tracing`]. Library code never installs a
//! subscriber; the `neurofield` binary does.

pub mod color;
pub mod config;
mod emitter;
pub mod error;
pub mod field;
mod pose;
pub mod random;
mod resources;
pub mod scene;
mod spawn;
pub mod time;

#[cfg(feature = "viewer")]
pub mod gpu;
#[cfg(feature = "viewer")]
mod window;

pub use config::{FieldConfig, NeuronConfig};
pub use emitter::{Emitter, FlashState};
pub use error::{ConfigError, ResourceError};
pub use field::{Field, FrameStats};
pub use glam::{Mat4, Quat, Vec3};
pub use pose::Pose;
pub use random::{RandomSource, SequenceRandom, SmallRandom};
pub use resources::Resources;
pub use scene::{Scene, SceneContainer};
pub use spawn::GridLayout;

#[cfg(feature = "viewer")]
pub use error::{GpuError, ViewerError};
#[cfg(feature = "viewer")]
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```
/// use neurofield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{FieldConfig, NeuronConfig};
    pub use crate::emitter::{Emitter, FlashState};
    pub use crate::field::{Field, FrameStats};
    pub use crate::pose::Pose;
    pub use crate::random::{RandomSource, SequenceRandom, SmallRandom};
    pub use crate::resources::Resources;
    pub use crate::scene::{Material, Node, NodeId, Scene, SceneContainer};
    pub use crate::spawn::GridLayout;
    pub use crate::time::{FrameClock, ManualClock, Time};
    pub use crate::Vec3;
}
