use dagre_rust::{
    GraphConfig as DagreConfig, GraphEdge as DagreEdge, GraphNode as DagreNode,
    layout as dagre_layout,
};
use graphlib_rust::{Graph as DagreGraph, GraphOption};
use log::trace;
use std::collections::HashSet;

use crate::adapter::{FlatGraph, LayoutAdapter};
use crate::config::{LayoutConfig, RankDir};
use crate::ir::Spacing;
use crate::position::Position;

/// Flat layout pass backed by dagre.
///
/// Entities are handed to dagre with their input index as `order`, so the caller's
/// declaration order seeds dagre's ordering within each rank.
#[derive(Debug, Clone)]
pub struct DagreAdapter {
    pub rankdir: RankDir,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl Default for DagreAdapter {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl DagreAdapter {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            rankdir: config.rankdir,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
        }
    }
}

impl LayoutAdapter for DagreAdapter {
    fn layout(&self, graph: &mut FlatGraph, spacing: Spacing) {
        if graph.nodes.is_empty() {
            return;
        }

        let mut dagre_graph: DagreGraph<DagreConfig, DagreNode, DagreEdge> =
            DagreGraph::new(Some(GraphOption {
                directed: Some(true),
                multigraph: Some(false),
                compound: Some(false),
            }));

        let mut graph_config = DagreConfig::default();
        graph_config.rankdir = Some(self.rankdir.as_dagre().to_string());
        graph_config.nodesep = Some(spacing.nodesep);
        graph_config.ranksep = Some(spacing.ranksep);
        graph_config.marginx = Some(self.margin_x);
        graph_config.marginy = Some(self.margin_y);
        dagre_graph.set_graph(graph_config);

        for (order, entity) in graph.nodes.iter().enumerate() {
            let mut node = DagreNode::default();
            node.width = entity.width;
            node.height = entity.height;
            node.order = Some(order);
            dagre_graph.set_node(entity.id.to_string(), Some(node));
        }

        let node_set: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut edge_set: HashSet<(String, String)> = HashSet::new();
        for edge in &graph.edges {
            let from = edge.source.to_string();
            let to = edge.target.to_string();
            if !node_set.contains(from.as_str()) || !node_set.contains(to.as_str()) {
                trace!(
                    source = from.as_str(),
                    target = to.as_str();
                    "Skipping edge with unknown endpoint"
                );
                continue;
            }
            if from == to {
                trace!(node = from.as_str(); "Skipping self-loop");
                continue;
            }
            if !edge_set.insert((from.clone(), to.clone())) {
                continue;
            }
            let edge_label = DagreEdge::default();
            let _ = dagre_graph.set_edge(&from, &to, Some(edge_label), None);
        }

        dagre_layout::run_layout(&mut dagre_graph);

        for entity in &mut graph.nodes {
            let Some(dagre_node) = dagre_graph.node(&entity.id.to_string()) else {
                continue;
            };
            entity.position = Some(Position::new(
                dagre_node.y - entity.height / 2.0,
                dagre_node.x - entity.width / 2.0,
            ));
        }
    }
}
