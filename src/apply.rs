use std::collections::HashMap;

use log::debug;

use crate::adapter::{FlatGraph, LayoutAdapter, LayoutEntity};
use crate::config::LayoutConfig;
use crate::engine::{GroupLayoutEngine, PlacedEntity};
use crate::error::LayoutError;
use crate::ir::{Entity, EntityId, EntityKind, LayoutRequest};
use crate::layout::adapter_for;
use crate::position::Position;

/// Lay out `request` in place with the adapter selected by `config`.
///
/// `top`/`left` are written onto the matching records of `request.data.nodes` and
/// `request.data.groups`. Records the layout could not place keep whatever they had.
pub fn apply_group_layout(
    request: &mut LayoutRequest,
    config: &LayoutConfig,
) -> Result<(), LayoutError> {
    apply_group_layout_with(request, config, adapter_for(config))
}

pub fn apply_group_layout_with<A: LayoutAdapter>(
    request: &mut LayoutRequest,
    config: &LayoutConfig,
    adapter: A,
) -> Result<(), LayoutError> {
    if request.data.groups.is_empty() {
        layout_flat(&adapter, request, config.default_size(EntityKind::Node));
        return Ok(());
    }

    let engine = GroupLayoutEngine::new(adapter, request.spacing()).with_config(config.clone());
    let positions = engine.layout(&request.data)?;

    let placed_nodes = write_back(&mut request.data.nodes, &positions.nodes);
    let placed_groups = write_back(&mut request.data.groups, &positions.groups);
    let records = request.data.nodes.len() + request.data.groups.len();
    debug!(
        nodes = placed_nodes,
        groups = placed_groups,
        unplaced = records - placed_nodes - placed_groups;
        "Applied group layout"
    );
    Ok(())
}

/// No groups: a single adapter pass over the caller's nodes and edges.
fn layout_flat<A: LayoutAdapter>(adapter: &A, request: &mut LayoutRequest, size: (f32, f32)) {
    let (width, height) = size;
    let entities = request
        .data
        .nodes
        .iter()
        .map(|node| {
            LayoutEntity::new(
                node.id.clone(),
                EntityKind::Node,
                node.width.unwrap_or(width),
                node.height.unwrap_or(height),
            )
        })
        .collect();
    let mut flat = FlatGraph::new(entities, request.data.edges.clone());
    adapter.layout(&mut flat, request.spacing());

    for (node, entity) in request.data.nodes.iter_mut().zip(&flat.nodes) {
        if let Some(position) = entity.position {
            set_position(node, position);
        }
    }
    debug!(nodes = flat.nodes.len(), edges = flat.edges.len(); "Applied flat layout");
}

fn write_back(records: &mut [Entity], placed: &[PlacedEntity]) -> usize {
    let by_id: HashMap<&EntityId, Position> = placed
        .iter()
        .map(|entry| (&entry.id, entry.position))
        .collect();

    let mut written = 0;
    for record in records.iter_mut() {
        if let Some(&position) = by_id.get(&record.id) {
            set_position(record, position);
            written += 1;
        }
    }
    written
}

fn set_position(record: &mut Entity, position: Position) {
    record.top = Some(position.top);
    record.left = Some(position.left);
}
