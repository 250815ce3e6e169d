//! Contract of the flat layout pass.
//!
//! A [`LayoutAdapter`] knows nothing about groups: it receives one flat list of entities and
//! edges plus the spacing hints, and writes a top/left position onto every entity it places.
//! Entities it leaves unpositioned are dropped by the caller.

use crate::ir::{Edge, EntityId, EntityKind, Spacing};
use crate::position::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub width: f32,
    pub height: f32,
    pub position: Option<Position>,
}

impl LayoutEntity {
    pub fn new(id: EntityId, kind: EntityKind, width: f32, height: f32) -> Self {
        Self {
            id,
            kind,
            width,
            height,
            position: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatGraph {
    pub nodes: Vec<LayoutEntity>,
    pub edges: Vec<Edge>,
}

impl FlatGraph {
    pub fn new(nodes: Vec<LayoutEntity>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn position_of(&self, id: &EntityId) -> Option<Position> {
        self.nodes
            .iter()
            .find(|node| &node.id == id)
            .and_then(|node| node.position)
    }
}

pub trait LayoutAdapter {
    /// Assign `position` to the entities of `graph`.
    ///
    /// Edges may reference ids that are not in `graph.nodes` and may be self-loops; how those
    /// are treated is up to the implementation.
    fn layout(&self, graph: &mut FlatGraph, spacing: Spacing);
}

impl<A: LayoutAdapter + ?Sized> LayoutAdapter for &A {
    fn layout(&self, graph: &mut FlatGraph, spacing: Spacing) {
        (**self).layout(graph, spacing)
    }
}

impl<A: LayoutAdapter + ?Sized> LayoutAdapter for Box<A> {
    fn layout(&self, graph: &mut FlatGraph, spacing: Spacing) {
        (**self).layout(graph, spacing)
    }
}
