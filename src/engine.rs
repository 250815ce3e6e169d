//! Recursive layout of nested groups.
//!
//! Every scope of the [`GroupTree`] is one flat layout problem: its direct child nodes and
//! child groups are laid out together by the adapter, with edges collapsed onto the child
//! groups that enclose their endpoints. Local positions are then shifted by the scope offset
//! (the container group's global position) and each child group is descended into in turn.

use std::collections::HashMap;

use log::{debug, trace};
use serde::Serialize;

use crate::adapter::{FlatGraph, LayoutAdapter, LayoutEntity};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::hierarchy::{GroupTree, Scope, ScopeId};
use crate::ir::{Edge, Entity, EntityId, EntityKind, GraphData, Spacing};
use crate::position::{Offset, Position};
use crate::projection::project_edges;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntity {
    pub id: EntityId,
    #[serde(flatten)]
    pub position: Position,
}

/// Global positions produced by one layout run, one list per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupPositions {
    pub nodes: Vec<PlacedEntity>,
    pub groups: Vec<PlacedEntity>,
}

impl GroupPositions {
    pub fn node(&self, id: &EntityId) -> Option<Position> {
        find(&self.nodes, id)
    }

    pub fn group(&self, id: &EntityId) -> Option<Position> {
        find(&self.groups, id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.groups.is_empty()
    }

    fn push(&mut self, kind: EntityKind, id: EntityId, position: Position) {
        let placed = PlacedEntity { id, position };
        match kind {
            EntityKind::Node => self.nodes.push(placed),
            EntityKind::Group => self.groups.push(placed),
        }
    }
}

fn find(placed: &[PlacedEntity], id: &EntityId) -> Option<Position> {
    placed
        .iter()
        .find(|entry| &entry.id == id)
        .map(|entry| entry.position)
}

pub struct GroupLayoutEngine<A> {
    adapter: A,
    spacing: Spacing,
    config: LayoutConfig,
}

impl<A: LayoutAdapter> GroupLayoutEngine<A> {
    pub fn new(adapter: A, spacing: Spacing) -> Self {
        Self {
            adapter,
            spacing,
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn layout(&self, data: &GraphData) -> Result<GroupPositions, LayoutError> {
        self.layout_group(data, Position::ORIGIN)
    }

    /// Lay out `data` with every resulting position shifted by `offset`.
    ///
    /// `data` is only read; the returned positions are the sole output.
    pub fn layout_group(
        &self,
        data: &GraphData,
        offset: Offset,
    ) -> Result<GroupPositions, LayoutError> {
        let tree = GroupTree::build(data, self.config.max_depth)?;
        let mut positions = GroupPositions::default();
        self.layout_scope(&tree, &data.edges, tree.root(), offset, &mut positions);
        Ok(positions)
    }

    fn layout_scope(
        &self,
        tree: &GroupTree<'_>,
        edges: &[Edge],
        scope_id: ScopeId,
        offset: Offset,
        out: &mut GroupPositions,
    ) {
        let scope = tree.scope(scope_id);
        let mut flat = FlatGraph::new(
            self.scope_entities(scope),
            scope_edges(tree, scope_id, edges),
        );

        let label = scope.container.map_or("<root>", |group| group.id.as_str());
        debug!(
            scope = label,
            depth = scope.depth,
            entities = flat.nodes.len(),
            edges = flat.edges.len();
            "Laying out scope"
        );
        self.adapter.layout(&mut flat, self.spacing);
        trace!(scope = label; "Flat layout pass finished");

        let mut group_positions: HashMap<&EntityId, Position> = HashMap::new();
        for entity in &flat.nodes {
            let Some(local) = entity.position else {
                debug!(id = entity.id.as_str(); "Entity left unpositioned; dropping");
                continue;
            };
            let global = local.compose(offset);
            if entity.kind == EntityKind::Group {
                group_positions.insert(&entity.id, global);
            }
            out.push(entity.kind, entity.id.clone(), global);
        }

        for (group, child_scope) in &scope.groups {
            let Some(&group_offset) = group_positions.get(&group.id) else {
                debug!(group = group.id.as_str(); "Group has no position; skipping its members");
                continue;
            };
            self.layout_scope(tree, edges, *child_scope, group_offset, out);
        }
    }

    fn scope_entities(&self, scope: &Scope<'_>) -> Vec<LayoutEntity> {
        let nodes = scope
            .nodes
            .iter()
            .map(|node| self.layout_entity(node, EntityKind::Node));
        let groups = scope
            .groups
            .iter()
            .map(|(group, _)| self.layout_entity(group, EntityKind::Group));
        nodes.chain(groups).collect()
    }

    fn layout_entity(&self, entity: &Entity, kind: EntityKind) -> LayoutEntity {
        let (width, height) = self.config.default_size(kind);
        LayoutEntity::new(
            entity.id.clone(),
            kind,
            entity.width.unwrap_or(width),
            entity.height.unwrap_or(height),
        )
    }
}

/// Edges for one scope, collapsed onto its child groups. Below the root only edges with both
/// projected endpoints inside the scope are kept.
fn scope_edges(tree: &GroupTree<'_>, scope_id: ScopeId, edges: &[Edge]) -> Vec<Edge> {
    let membership = tree.membership(scope_id);
    let mut projected = project_edges(edges, &membership);

    let scope = tree.scope(scope_id);
    if !scope.is_root() {
        let members = scope.member_ids();
        projected.retain(|edge| members.contains(&edge.source) && members.contains(&edge.target));
    }
    projected
}
