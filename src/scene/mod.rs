//! Minimal scene graph.
//!
//! A [`Scene`] is an append-only arena of root [`Node`]s. Nodes form trees of
//! groups, meshes and line helpers. Meshes are the only *paintable*
//! primitives: the flash animation recolors them through
//! [`Node::visit_paintable_mut`] and leaves everything else alone.
//!
//! # Example
//!
//! ```
//! use neurofield::scene::{Geometry, Material, Node, Scene, SceneContainer};
//! use neurofield::{Pose, Vec3};
//! use std::sync::Arc;
//!
//! let sphere = Arc::new(Geometry::icosphere(0.5, 1));
//! let template = Node::mesh("soma", sphere, Material::basic(Vec3::ONE, 1.0));
//!
//! let mut scene = Scene::new();
//! let pose = Pose::upright(Vec3::new(1.0, 0.0, 0.0), 0.0, 0.25);
//! let id = scene.add(template.instantiate(pose, Material::basic(Vec3::ZERO, 0.3)));
//! assert!(scene.paint(id, Vec3::X));
//! ```

mod geometry;
pub mod template;

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::pose::Pose;

pub use geometry::{Geometry, LineSegments};

/// Unlit material: flat color with optional transparency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// RGB color, channels in 0.0-1.0.
    pub color: Vec3,
    /// Opacity in 0.0-1.0. Only honored when `transparent` is set.
    pub opacity: f32,
    /// Whether the material is alpha blended.
    pub transparent: bool,
}

impl Material {
    /// Opaque material.
    pub fn opaque(color: Vec3) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
        }
    }

    /// Basic material; transparent whenever `opacity < 1`.
    pub fn basic(color: Vec3, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            color,
            opacity,
            transparent: opacity < 1.0,
        }
    }

    /// Alpha actually used when drawing.
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity
        } else {
            1.0
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(Vec3::ONE)
    }
}

/// A triangle mesh with its own material.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Shared geometry.
    pub geometry: Arc<Geometry>,
    /// Per-instance material.
    pub material: Material,
}

/// What a node draws, if anything.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node.
    Group,
    /// Paintable triangle mesh.
    Mesh(Mesh),
    /// Colored lines, not paintable.
    Lines(LineSegments),
}

/// A node in the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Debug name.
    pub name: String,
    /// Transform relative to the parent.
    pub transform: Pose,
    /// Content of this node.
    pub kind: NodeKind,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// Empty group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Pose::IDENTITY,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    /// Mesh node.
    pub fn mesh(name: impl Into<String>, geometry: Arc<Geometry>, material: Material) -> Self {
        Self {
            kind: NodeKind::Mesh(Mesh { geometry, material }),
            ..Self::group(name)
        }
    }

    /// Line helper node.
    pub fn lines(name: impl Into<String>, lines: LineSegments) -> Self {
        Self {
            kind: NodeKind::Lines(lines),
            ..Self::group(name)
        }
    }

    /// Set the local transform.
    pub fn with_transform(mut self, transform: Pose) -> Self {
        self.transform = transform;
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Clone this subtree as a new instance.
    ///
    /// The root takes `pose` as its transform and every mesh in the subtree
    /// gets its own copy of `material`, so instances can be recolored
    /// independently. Geometry stays shared.
    pub fn instantiate(&self, pose: Pose, material: Material) -> Node {
        let mut instance = self.clone();
        instance.transform = pose;
        instance.visit_paintable_mut(|m| *m = material);
        instance
    }

    /// Visit the material of every mesh in this subtree, depth first.
    pub fn visit_paintable_mut<F: FnMut(&mut Material)>(&mut self, mut f: F) {
        self.walk_paintable_mut(&mut f);
    }

    fn walk_paintable_mut<F: FnMut(&mut Material)>(&mut self, f: &mut F) {
        if let NodeKind::Mesh(mesh) = &mut self.kind {
            f(&mut mesh.material);
        }
        for child in &mut self.children {
            child.walk_paintable_mut(f);
        }
    }

    /// Visit the material of every mesh in this subtree, depth first.
    pub fn visit_paintable<F: FnMut(&Material)>(&self, mut f: F) {
        self.walk_paintable(&mut f);
    }

    fn walk_paintable<F: FnMut(&Material)>(&self, f: &mut F) {
        if let NodeKind::Mesh(mesh) = &self.kind {
            f(&mesh.material);
        }
        for child in &self.children {
            child.walk_paintable(f);
        }
    }

    /// Set the color of every mesh in this subtree.
    pub fn paint(&mut self, color: Vec3) {
        self.visit_paintable_mut(|m| m.color = color);
    }

    /// Number of meshes in this subtree.
    pub fn paintable_count(&self) -> usize {
        let mut count = 0;
        self.visit_paintable(|_| count += 1);
        count
    }

    /// Flatten this subtree into drawable primitives with world transforms.
    pub fn primitives<'a>(&'a self, parent: Mat4, out: &mut Vec<Primitive<'a>>) {
        let world = parent * self.transform.matrix();
        match &self.kind {
            NodeKind::Group => {}
            NodeKind::Mesh(mesh) => out.push(Primitive::Mesh { mesh, world }),
            NodeKind::Lines(lines) => out.push(Primitive::Lines { lines, world }),
        }
        for child in &self.children {
            child.primitives(world, out);
        }
    }
}

/// A drawable leaf with its accumulated world transform.
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    /// Triangle mesh.
    Mesh {
        /// The mesh and its material.
        mesh: &'a Mesh,
        /// Local-to-world transform.
        world: Mat4,
    },
    /// Line helper.
    Lines {
        /// The segments and their color.
        lines: &'a LineSegments,
        /// Local-to-world transform.
        world: Mat4,
    },
}

/// Handle to a root node added to a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Anything objects can be added to and looked up in.
///
/// The field only ever appends; it never removes what it added.
pub trait SceneContainer {
    /// Add a root node, returning its handle.
    fn add(&mut self, node: Node) -> NodeId;

    /// Look up a root node.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Look up a root node for mutation.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node>;

    /// Recolor every mesh under `id`. Returns `false` for unknown handles.
    fn paint(&mut self, id: NodeId, color: Vec3) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.paint(color);
                true
            }
            None => false,
        }
    }
}

/// Append-only arena of root nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root nodes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Every drawable primitive in the scene with its world transform.
    pub fn primitives(&self) -> Vec<Primitive<'_>> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.primitives(Mat4::IDENTITY, &mut out);
        }
        out
    }
}

impl SceneContainer for Scene {
    fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }
}
