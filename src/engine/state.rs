//! Interaction controller: the whole engine as a value plus the transition
//! applied for each navigation input.

use std::collections::HashMap;

use tracing::debug;

use super::history::{Command, CommandKind, History};
use super::node::{Node, NodeId, Placement};
use super::scale::{self, Camera, ScaleRange, Viewport};
use super::{honeycomb, liminal, sphere};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    #[default]
    Sphere,
    LiminalFocus,
    Honeycomb,
}

impl LayoutMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::LiminalFocus => "liminal focus",
            Self::Honeycomb => "honeycomb",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
    pub sphere_radius: f64,
    pub hex_cell_size: f64,
    pub scale: ScaleRange,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            sphere_radius: 1000.0,
            hex_cell_size: 12.0,
            scale: ScaleRange::default(),
        }
    }
}

/// A navigation input from the command source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Select(NodeId),
    Escape,
    /// `matches` is the search provider's answer for `term`, best first.
    Search { term: String, matches: Vec<NodeId> },
    Undo,
    Redo,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineState {
    nodes: Vec<Node>,
    layout_mode: LayoutMode,
    centered_node: Option<NodeId>,
    history: History,
    settings: LayoutSettings,
}

impl EngineState {
    /// Engine over `nodes`, laid out on the un-rotated sphere.
    pub fn new(nodes: Vec<Node>, settings: LayoutSettings) -> Self {
        let mut state = Self {
            nodes,
            layout_mode: LayoutMode::Sphere,
            centered_node: None,
            history: History::new(),
            settings,
        };
        sphere::sphere_layout(&mut state.nodes, None, settings.sphere_radius);
        state
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn centered_node(&self) -> Option<&str> {
        self.centered_node.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Renderer triples for the current layout.
    pub fn placements(&self) -> Vec<Placement> {
        self.nodes
            .iter()
            .map(|node| Placement {
                id: node.id.clone(),
                position: node.position,
                scale: node.render_scale(),
            })
            .collect()
    }

    /// State after handling `input`.
    pub fn apply(&self, input: Input) -> Self {
        let mut next = self.clone();
        next.handle(input);
        next
    }

    /// View scales that changed for the current camera; see [`scale::tick`].
    pub fn tick(&self, camera: &Camera, viewport: &Viewport) -> HashMap<NodeId, f64> {
        scale::tick(&self.nodes, camera, viewport, &self.settings.scale)
    }

    /// Write per-frame view scales back. Only `view_scale_factor` of nodes in
    /// the sphere state is touched.
    pub fn commit_view_scales(&mut self, updates: &HashMap<NodeId, f64>) -> usize {
        scale::commit(&mut self.nodes, updates)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    fn handle(&mut self, input: Input) {
        match input {
            Input::Select(id) => self.select(id),
            Input::Escape => {
                let recenter = match self.layout_mode {
                    LayoutMode::LiminalFocus => self.centered_node.clone(),
                    // keep whatever rotation the sphere already has
                    LayoutMode::Sphere => self.sphere_recenter(),
                    LayoutMode::Honeycomb => None,
                };
                self.record(CommandKind::Escape { recenter });
            }
            Input::Search { term, matches } => self.record(CommandKind::Search { term, matches }),
            Input::Undo => {
                if let Some(Command { kind, timestamp }) = self.history.undo().cloned() {
                    debug!(timestamp, "undo");
                    self.run(&kind);
                }
            }
            Input::Redo => {
                if let Some(Command { kind, timestamp }) = self.history.redo().cloned() {
                    debug!(timestamp, "redo");
                    self.run(&kind);
                }
            }
        }
    }

    /// Node the current sphere is turned toward, read off the command that
    /// produced it.
    fn sphere_recenter(&self) -> Option<NodeId> {
        match self.history.entries().last().map(|command| &command.kind) {
            Some(CommandKind::Escape { recenter }) => recenter.clone(),
            _ => None,
        }
    }

    fn select(&mut self, id: NodeId) {
        let Some(index) = self.index_of(&id) else {
            debug!(%id, "ignoring selection of unknown node");
            return;
        };

        if self.centered_node.as_deref() == Some(id.as_str()) {
            let node = &mut self.nodes[index];
            node.is_flipped = !node.is_flipped;
            debug!(%id, flipped = node.is_flipped, "flipped centered node");
            return;
        }

        self.record(CommandKind::NodeSelect(id));
    }

    fn record(&mut self, kind: CommandKind) {
        self.run(&kind);
        self.history.record(kind);
    }

    /// Lay the node set out for `kind`. Never touches the history.
    fn run(&mut self, kind: &CommandKind) {
        let radius = self.settings.sphere_radius;
        match kind {
            CommandKind::NodeSelect(id) => {
                let Some(index) = self.index_of(id) else {
                    return;
                };
                let (related, unrelated) = liminal::liminal_layout(&mut self.nodes, index);
                debug!(%id, related, unrelated, "liminal layout");
                self.layout_mode = LayoutMode::LiminalFocus;
                self.centered_node = Some(id.clone());
            }
            CommandKind::Escape { recenter } => {
                let target = recenter.as_deref().and_then(|id| self.index_of(id));
                sphere::sphere_layout(&mut self.nodes, target, radius);
                debug!(recenter = ?recenter, "sphere layout");
                self.layout_mode = LayoutMode::Sphere;
                self.centered_node = None;
            }
            CommandKind::Search { term, matches } => {
                if term.trim().is_empty() {
                    sphere::sphere_layout(&mut self.nodes, None, radius);
                    debug!("blank search, sphere layout");
                    self.layout_mode = LayoutMode::Sphere;
                } else {
                    let summary = honeycomb::honeycomb_layout(
                        &mut self.nodes,
                        matches,
                        self.settings.hex_cell_size,
                        radius,
                    );
                    debug!(%term, matched = summary.matched, banished = summary.banished, "honeycomb layout");
                    self.layout_mode = LayoutMode::Honeycomb;
                }
                self.centered_node = None;
            }
        }
    }
}
