//! Flatten a scene into instanced draws.
//!
//! Meshes sharing one [`Geometry`] become a single instanced batch; line
//! helpers are baked into world-space vertices. Nothing here touches the GPU.

use std::collections::HashMap;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::scene::{Geometry, Primitive, Scene};

/// Per-instance data for the mesh pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Vertex of the line pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// A run of instances drawn with one geometry.
#[derive(Debug, Clone)]
pub struct MeshBatch {
    pub geometry: Arc<Geometry>,
    pub first_instance: u32,
    pub instance_count: u32,
}

/// Everything needed to draw one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    pub instances: Vec<MeshInstance>,
    pub batches: Vec<MeshBatch>,
    pub lines: Vec<LineVertex>,
}

impl DrawList {
    /// Build the draw list for `scene`.
    ///
    /// With `linear_output` set, colors are converted from sRGB to linear
    /// for an sRGB render target.
    pub fn from_scene(scene: &Scene, linear_output: bool) -> Self {
        let mut groups: Vec<(Arc<Geometry>, Vec<MeshInstance>)> = Vec::new();
        let mut slots: HashMap<*const Geometry, usize> = HashMap::new();
        let mut lines = Vec::new();

        for primitive in scene.primitives() {
            match primitive {
                Primitive::Mesh { mesh, world } => {
                    if mesh.geometry.is_empty() {
                        continue;
                    }
                    let slot = *slots.entry(Arc::as_ptr(&mesh.geometry)).or_insert_with(|| {
                        groups.push((mesh.geometry.clone(), Vec::new()));
                        groups.len() - 1
                    });
                    let material = &mesh.material;
                    groups[slot].1.push(MeshInstance {
                        model: world.to_cols_array_2d(),
                        color: encode(material.color, material.effective_opacity(), linear_output),
                    });
                }
                Primitive::Lines { lines: segments, world } => {
                    let color = encode(segments.color, 1.0, linear_output);
                    for (a, b) in &segments.lines {
                        for p in [a, b] {
                            lines.push(LineVertex {
                                position: world.transform_point3(*p).to_array(),
                                color,
                            });
                        }
                    }
                }
            }
        }

        let mut list = DrawList {
            lines,
            ..Default::default()
        };
        for (geometry, instances) in groups {
            list.batches.push(MeshBatch {
                geometry,
                first_instance: list.instances.len() as u32,
                instance_count: instances.len() as u32,
            });
            list.instances.extend(instances);
        }
        list
    }
}

fn encode(color: Vec3, alpha: f32, linear_output: bool) -> [f32; 4] {
    let rgb = if linear_output { srgb_to_linear(color) } else { color };
    rgb.extend(alpha).to_array()
}

fn srgb_to_linear(c: Vec3) -> Vec3 {
    let f = |v: f32| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(f(c.x), f(c.y), f(c.z))
}
