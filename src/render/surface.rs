use crate::{
    foundation::core::{Generation, Millis, Viewport},
    render::ease::Ease,
    scene::{
        model::{Defs, Element, ElementId, Layer, Scene, Shape},
        signature::Signature,
    },
};

/// Durations and easing of the live surface's transitions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionTiming {
    pub enter_ms: f64,
    pub exit_ms: f64,
    pub update_ms: f64,
    pub ease: Ease,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            enter_ms: 700.0,
            exit_ms: 280.0,
            update_ms: 450.0,
            ease: Ease::OutCubic,
        }
    }
}

/// Stable identity of a retained node. Never reused within one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodePhase {
    /// Inserted but not yet flipped visible.
    Hidden,
    /// Entrance transition started at `since`.
    Shown { since: Millis },
    /// Exit transition started at `since`; the node is gone once its removal runs.
    Exiting { since: Millis },
}

/// One retained drawing node.
#[derive(Clone, Debug)]
pub struct SurfaceNode {
    pub id: NodeId,
    /// Generation that created this node. In-place updates keep it.
    pub epoch: Generation,
    pub signature: Signature,
    /// Position within its layer in the scene it was last matched to.
    pub order: usize,
    /// Target state.
    pub element: Element,
    from: Option<Element>,
    changed_at: Millis,
    pub phase: NodePhase,
}

impl SurfaceNode {
    pub fn layer(&self) -> Layer {
        self.element.layer
    }

    pub fn is_live(&self) -> bool {
        !matches!(self.phase, NodePhase::Exiting { .. })
    }

    /// Geometry and paint at `now`, ignoring entrance and exit fades.
    fn shape_at(&self, now: Millis, timing: &TransitionTiming) -> Element {
        let Some(from) = &self.from else {
            return self.element.clone();
        };
        let t = timing
            .ease
            .progress(self.changed_at, Millis(timing.update_ms), now);
        if t >= 1.0 {
            return self.element.clone();
        }
        from.lerp(&self.element, t)
            .unwrap_or_else(|| self.element.clone())
    }

    /// Visible state at `now`, or `None` when nothing of the node is on screen.
    pub fn sample(&self, now: Millis, timing: &TransitionTiming) -> Option<Element> {
        let fade = match self.phase {
            NodePhase::Hidden => return None,
            NodePhase::Shown { since } => timing.ease.progress(since, Millis(timing.enter_ms), now),
            NodePhase::Exiting { since } => {
                1.0 - timing.ease.progress(since, Millis(timing.exit_ms), now)
            }
        };
        if fade <= 0.0 {
            return None;
        }
        let mut el = self.shape_at(now, timing);
        el.opacity *= fade;
        Some(el)
    }
}

/// What the surface currently hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SurfaceState {
    #[default]
    Empty,
    Placeholder(String),
    Drawing {
        viewport: Viewport,
        defs: Option<Defs>,
    },
}

/// Retained drawing surface that the renderer and reconciler mutate.
///
/// Nodes are kept in paint order. The surface itself has no notion of time beyond the instants
/// passed in by its callers.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    state: SurfaceState,
    layer_order: Vec<Layer>,
    nodes: Vec<SurfaceNode>,
    next_node: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SurfaceState::Drawing { .. })
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.state {
            SurfaceState::Placeholder(text) => Some(text),
            _ => None,
        }
    }

    /// Drop every node and the drawing root.
    pub fn clear(&mut self) {
        self.state = SurfaceState::Empty;
        self.nodes.clear();
    }

    pub fn show_placeholder(&mut self, text: impl Into<String>) {
        self.clear();
        self.state = SurfaceState::Placeholder(text.into());
    }

    /// Create the fixed-viewport drawing root. `layer_order` decides how layers stack.
    pub fn install_root(&mut self, defs: Option<Defs>, layer_order: &[Layer]) {
        self.state = SurfaceState::Drawing {
            viewport: Viewport::default(),
            defs,
        };
        self.layer_order = layer_order.to_vec();
    }

    pub fn set_defs(&mut self, next: Option<Defs>) {
        if let SurfaceState::Drawing { defs, .. } = &mut self.state {
            *defs = next;
        }
    }

    fn rank(&self, layer: Layer, order: usize) -> (usize, usize) {
        let layer_rank = self
            .layer_order
            .iter()
            .position(|l| *l == layer)
            .unwrap_or(self.layer_order.len());
        (layer_rank, order)
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Insert a hidden node at its paint position.
    pub fn insert(
        &mut self,
        epoch: Generation,
        element: Element,
        signature: Signature,
        order: usize,
        now: Millis,
    ) -> NodeId {
        self.next_node += 1;
        let id = NodeId(self.next_node);
        let key = self.rank(element.layer, order);
        let at = self
            .nodes
            .iter()
            .position(|n| self.rank(n.layer(), n.order) > key)
            .unwrap_or(self.nodes.len());
        self.nodes.insert(
            at,
            SurfaceNode {
                id,
                epoch,
                signature,
                order,
                element,
                from: None,
                changed_at: now,
                phase: NodePhase::Hidden,
            },
        );
        id
    }

    /// Flip a hidden node visible, starting its entrance. Returns whether anything changed.
    pub fn reveal(&mut self, id: NodeId, now: Millis) -> bool {
        match self.node_mut(id) {
            Some(n) if n.phase == NodePhase::Hidden => {
                n.phase = NodePhase::Shown { since: now };
                true
            }
            _ => false,
        }
    }

    /// Retarget a node in place. Transitions from whatever it shows at `now`; the entrance state
    /// and creation epoch are kept.
    pub fn update(
        &mut self,
        id: NodeId,
        element: Element,
        order: usize,
        now: Millis,
        timing: &TransitionTiming,
    ) -> bool {
        let Some(n) = self.node_mut(id) else {
            return false;
        };
        n.order = order;
        if n.element.same_content(&element) {
            n.element.id = element.id;
            return false;
        }
        let current = n.shape_at(now, timing);
        n.from = Some(current);
        n.element = element;
        n.changed_at = now;
        true
    }

    pub fn begin_exit(&mut self, id: NodeId, now: Millis) -> bool {
        match self.node_mut(id) {
            Some(n) if n.is_live() => {
                n.phase = NodePhase::Exiting { since: now };
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Option<SurfaceNode> {
        let at = self.index_of(id)?;
        Some(self.nodes.remove(at))
    }

    /// Nodes mid-exit, with the time their fade started.
    pub fn exiting(&self) -> impl Iterator<Item = (NodeId, Millis)> + '_ {
        self.nodes.iter().filter_map(|n| match n.phase {
            NodePhase::Exiting { since } => Some((n.id, since)),
            _ => None,
        })
    }

    /// Re-sort nodes into paint order after their `order` keys changed.
    pub fn restack(&mut self) {
        let mut nodes = std::mem::take(&mut self.nodes);
        nodes.sort_by_key(|n| self.rank(n.layer(), n.order));
        self.nodes = nodes;
    }

    pub fn node(&self, id: NodeId) -> Option<&SurfaceNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SurfaceNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// All nodes in paint order, exiting ones included.
    pub fn nodes(&self) -> &[SurfaceNode] {
        &self.nodes
    }

    pub fn live_nodes(&self) -> impl Iterator<Item = &SurfaceNode> {
        self.nodes.iter().filter(|n| n.is_live())
    }

    /// Snapshot of what is on screen at `now`, as a scene that can be exported.
    ///
    /// Identifiers are renumbered in paint order since nodes from different builds may share them.
    pub fn frame_at(&self, now: Millis, timing: &TransitionTiming) -> Option<Scene> {
        let SurfaceState::Drawing { defs, .. } = &self.state else {
            return None;
        };
        let mut elements = Vec::with_capacity(self.nodes.len() + 1);
        if let Some(d) = defs {
            elements.push(Element {
                id: ElementId(0),
                layer: Layer::Defs,
                opacity: 1.0,
                shape: Shape::Defs(d.clone()),
            });
        }
        let mut next_id = 0u32;
        for node in &self.nodes {
            if let Some(mut el) = node.sample(now, timing) {
                next_id += 1;
                el.id = ElementId(next_id);
                elements.push(el);
            }
        }
        Some(Scene { elements })
    }
}

/// Deferred surface work, always on behalf of one generation.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceTask {
    Insert {
        generation: Generation,
        element: Element,
        signature: Signature,
        order: usize,
    },
    Reveal {
        generation: Generation,
        node: NodeId,
    },
    Remove {
        generation: Generation,
        node: NodeId,
    },
}

impl SurfaceTask {
    pub fn generation(&self) -> Generation {
        match self {
            Self::Insert { generation, .. }
            | Self::Reveal { generation, .. }
            | Self::Remove { generation, .. } => *generation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
