//! Built-in templates.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use glam::Vec3;

use super::{Geometry, Material, Node};
use crate::pose::Pose;

/// Name under which the neuron template is registered by default.
pub const NEURON: &str = "neuron";

/// Number of dendrite spikes around the soma.
const DENDRITES: usize = 6;

/// A stylized neuron: a round soma with spikes radiating from its equator and
/// one longer axon pointing down.
///
/// The template is roughly two units across so that the default placement
/// scale (about 0.25) gives neurons half a unit wide. Every part is a
/// separate mesh, all sharing two geometries.
pub fn neuron() -> Node {
    let soma = Arc::new(Geometry::icosphere(0.45, 2));
    let spike = Arc::new(Geometry::cone(0.08, 0.6, 8));
    let material = Material::opaque(Vec3::ONE);

    let mut root = Node::group(NEURON).with_child(Node::mesh("soma", soma, material));

    for i in 0..DENDRITES {
        let heading = i as f32 / DENDRITES as f32 * TAU;
        // Tip the +Y cone over onto the equator, then spin it around
        let tilt = Vec3::new(0.0, heading, -FRAC_PI_2 + 0.25 * (i % 2) as f32);
        let out = Vec3::new(heading.cos(), 0.0, -heading.sin()) * 0.35;
        root = root.with_child(
            Node::mesh(format!("dendrite{}", i), spike.clone(), material)
                .with_transform(Pose::new(out, tilt, Vec3::ONE)),
        );
    }

    root.with_child(
        Node::mesh("axon", spike, material).with_transform(Pose::new(
            Vec3::new(0.0, -0.35, 0.0),
            Vec3::new(std::f32::consts::PI, 0.0, 0.0),
            Vec3::new(1.0, 1.6, 1.0),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neuron_has_every_part_paintable() {
        let n = neuron();
        assert_eq!(n.name, NEURON);
        assert_eq!(n.paintable_count(), 1 + DENDRITES + 1);
    }
}
