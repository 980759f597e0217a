//! SceneGraph - arena-backed node storage with parent links
//!
//! Parent references are generational handles, never owned pointers. A stale
//! handle (despawned or reused slot) degrades to "not found": mutation
//! operations return an error, per-frame queries return safe defaults.

use ember_core::{mat4_mul, EmberError, Mat4, Result, Transform, Vec3, MAT4_IDENTITY};
use std::fmt;

/// Handle to a node in a [`SceneGraph`].
///
/// The generation counter detects reuse of a freed slot, so a handle held
/// across a despawn can never reach the wrong node.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// A single node: name, local transform, optional parent handle.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<NodeId>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of transform nodes with non-owning parent links.
///
/// Invariants:
/// - the parent graph is acyclic (`set_parent` rejects cycles)
/// - no node ever holds a parent handle to a freed slot (`despawn` detaches
///   all children before freeing)
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Spawn a new root node with the identity transform
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        let node = Node {
            name: name.into(),
            transform: Transform::IDENTITY,
            parent: None,
        };

        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Despawn a node, detaching all of its children first.
    ///
    /// Children become root nodes; their world matrices collapse to their
    /// local matrices. Returns `NodeNotFound` for a stale handle.
    pub fn despawn(&mut self, id: NodeId) -> Result<()> {
        if !self.contains(id) {
            return Err(EmberError::NodeNotFound(id.to_string()));
        }

        // Orphan children so no parent handle ever dangles
        for slot in &mut self.slots {
            if let Some(node) = &mut slot.node {
                if node.parent == Some(id) {
                    node.parent = None;
                }
            }
        }

        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Ok(())
    }

    /// Returns true if the handle refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index as usize)
            .map(|s| s.generation == id.generation && s.node.is_some())
            .unwrap_or(false)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow a node, or None for a stale handle
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    /// Mutably borrow a node, or None for a stale handle
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// Re-parent a node, or make it a root with `None`.
    ///
    /// Fails with `NodeNotFound` if either handle is stale and with
    /// `ParentCycle` if `parent` is `child` or one of its descendants.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        if !self.contains(child) {
            return Err(EmberError::NodeNotFound(child.to_string()));
        }

        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(EmberError::NodeNotFound(parent.to_string()));
            }

            // Walk up from the proposed parent; hitting `child` means the
            // assignment would close a cycle.
            let mut cursor = Some(parent);
            while let Some(id) = cursor {
                if id == child {
                    return Err(EmberError::ParentCycle(child.to_string()));
                }
                cursor = self.node(id).and_then(|n| n.parent);
            }
        }

        if let Some(node) = self.node_mut(child) {
            node.parent = parent;
        }
        Ok(())
    }

    /// The node's parent handle, or None for roots and stale handles
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Handles of all direct children of `id`
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let node = slot.node.as_ref()?;
                (node.parent == Some(id)).then_some(NodeId {
                    index: index as u32,
                    generation: slot.generation,
                })
            })
            .collect()
    }

    // --- Hot-path accessors: total, never fail ---

    /// Local position, or `Vec3::ZERO` for a stale handle
    pub fn position(&self, id: NodeId) -> Vec3 {
        self.node(id).map(|n| n.transform.position).unwrap_or(Vec3::ZERO)
    }

    /// Local rotation in Euler degrees, or `Vec3::ZERO` for a stale handle
    pub fn rotation(&self, id: NodeId) -> Vec3 {
        self.node(id).map(|n| n.transform.rotation).unwrap_or(Vec3::ZERO)
    }

    /// Local scale, or `Vec3::ONE` for a stale handle
    pub fn scale(&self, id: NodeId) -> Vec3 {
        self.node(id).map(|n| n.transform.scale).unwrap_or(Vec3::ONE)
    }

    /// Set local position; no-op for a stale handle
    pub fn set_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(node) = self.node_mut(id) {
            node.transform.position = position;
        }
    }

    /// Set local rotation (Euler degrees); no-op for a stale handle
    pub fn set_rotation(&mut self, id: NodeId, rotation: Vec3) {
        if let Some(node) = self.node_mut(id) {
            node.transform.rotation = rotation;
        }
    }

    /// Set local scale; no-op for a stale handle
    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) {
        if let Some(node) = self.node_mut(id) {
            node.transform.scale = scale;
        }
    }

    /// World matrix of a node: the local matrix left-multiplied by every
    /// ancestor's, root-first.
    ///
    /// Recomputed on every call, so ancestor mutations are always visible in
    /// the next call while previously returned matrices keep their value.
    /// Returns the identity matrix for a stale handle.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let Some(node) = self.node(id) else {
            return MAT4_IDENTITY;
        };

        let mut world = node.transform.to_matrix();
        let mut cursor = node.parent;
        while let Some(parent_id) = cursor {
            // set_parent keeps the graph acyclic, so this walk terminates
            let Some(parent) = self.node(parent_id) else {
                break;
            };
            world = mat4_mul(&parent.transform.to_matrix(), &world);
            cursor = parent.parent;
        }
        world
    }
}
