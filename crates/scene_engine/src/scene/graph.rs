//! Node hierarchy storage
//!
//! Nodes live in a slot map owned by [`SceneGraph`]. A [`NodeId`] is a stable
//! handle that stays valid until the node's subtree is removed, after which
//! every lookup through it yields `None`.
//!
//! Ownership follows the child lists: a node owns its transform, its payload
//! and, through the arena, all of its descendants. Removing a node removes the
//! whole subtree. The parent link is a non-owning key written only by
//! [`SceneGraph::add_child`]; there is no way to re-parent a node, so a node
//! can never become its own ancestor.

use slotmap::SlotMap;

use super::transform::Transform;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

/// Renderable scene entity
///
/// `P` is the render payload (mesh or material reference), opaque to the graph.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(super) transform: Transform,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
    payload: P,
}

impl<P> Node<P> {
    fn new(payload: P, parent: Option<NodeId>) -> Self {
        Self {
            transform: Transform::new(),
            children: Vec::new(),
            parent,
            payload,
        }
    }

    /// Local transform and cached world matrix
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Render payload
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable render payload
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Parent handle, `None` for a root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Forest of node hierarchies
#[derive(Debug)]
pub struct SceneGraph<P> {
    pub(super) nodes: SlotMap<NodeId, Node<P>>,
    roots: Vec<NodeId>,
}

impl<P> Default for SceneGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SceneGraph<P> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Insert a parentless node
    pub fn create_root(&mut self, payload: P) -> NodeId {
        let id = self.nodes.insert(Node::new(payload, None));
        self.roots.push(id);
        log::debug!("Created root node {:?}", id);
        id
    }

    /// Append a new child to `parent`
    ///
    /// The child starts with an identity transform and no children. Returns
    /// `None` if `parent` has already been removed.
    pub fn add_child(&mut self, parent: NodeId, payload: P) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            log::warn!("add_child on removed node {:?}", parent);
            return None;
        }

        let id = self.nodes.insert(Node::new(payload, Some(parent)));
        self.nodes[parent].children.push(id);
        log::debug!("Added child {:?} to {:?}", id, parent);
        Some(id)
    }

    /// Child of `node` at `index`, or `None` when out of range
    pub fn get_child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(node)?.children.get(index).copied()
    }

    /// Remove `node` and all of its descendants
    ///
    /// Returns the number of nodes destroyed (0 if `node` was already gone).
    pub fn remove_subtree(&mut self, node: NodeId) -> usize {
        let Some(parent) = self.nodes.get(node).map(|n| n.parent) else {
            return 0;
        };

        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.retain(|&child| child != node);
                }
            }
            None => self.roots.retain(|&root| root != node),
        }

        let mut removed = 0;
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(dead) = self.nodes.remove(id) {
                pending.extend(dead.children);
                removed += 1;
            }
        }

        log::debug!("Removed subtree {:?} ({} nodes)", node, removed);
        removed
    }

    /// Node by handle
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id)
    }

    /// Mutable node by handle
    ///
    /// Exposes the transform and payload; hierarchy links stay private.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        self.nodes.get_mut(id)
    }

    /// Shortcut for the transform of a node
    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id).map(|node| &node.transform)
    }

    /// Shortcut for mutating the transform of a node
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id).map(|node| &mut node.transform)
    }

    /// Parent of a node; `None` for roots and removed nodes
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// Children of a node in insertion order (empty for removed nodes)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Root handles in creation order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Whether the handle still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes across all hierarchies
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, insertion-ordered iterator over a subtree
    pub fn depth_first(&self, root: NodeId) -> DepthFirst<'_, P> {
        let stack = if self.nodes.contains_key(root) { vec![root] } else { Vec::new() };
        DepthFirst { graph: self, stack }
    }
}

/// Pre-order iterator returned by [`SceneGraph::depth_first`]
pub struct DepthFirst<'a, P> {
    graph: &'a SceneGraph<P>,
    stack: Vec<NodeId>,
}

impl<P> Iterator for DepthFirst<'_, P> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reverse so the first child is visited first
        self.stack.extend(self.graph.children(id).iter().rev().copied());
        Some(id)
    }
}
