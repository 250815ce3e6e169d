use std::collections::{HashMap, VecDeque};

use crate::adapter::{FlatGraph, LayoutAdapter};
use crate::config::{LayoutConfig, RankDir};
use crate::ir::Spacing;
use crate::position::Position;

/// Deterministic longest-path layering.
///
/// Ranks are stacked along the rank direction `ranksep` apart; entities sharing a rank sit
/// side by side `nodesep` apart, in input order. Edges that close a cycle are ignored for
/// ranking.
#[derive(Debug, Clone, Default)]
pub struct RankedAdapter {
    pub rankdir: RankDir,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl RankedAdapter {
    pub fn new(rankdir: RankDir) -> Self {
        Self {
            rankdir,
            margin_x: 0.0,
            margin_y: 0.0,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            rankdir: config.rankdir,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
        }
    }

    pub fn with_margins(mut self, margin_x: f32, margin_y: f32) -> Self {
        self.margin_x = margin_x;
        self.margin_y = margin_y;
        self
    }
}

impl LayoutAdapter for RankedAdapter {
    fn layout(&self, graph: &mut FlatGraph, spacing: Spacing) {
        if graph.nodes.is_empty() {
            return;
        }

        let ranks = compute_ranks(graph);
        let max_rank = ranks.iter().copied().max().unwrap_or(0);
        let horizontal = self.rankdir.is_horizontal();

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
        for (idx, rank) in ranks.iter().enumerate() {
            buckets[*rank].push(idx);
        }
        if self.rankdir.is_reversed() {
            buckets.reverse();
        }

        let (main_margin, cross_margin) = if horizontal {
            (self.margin_x, self.margin_y)
        } else {
            (self.margin_y, self.margin_x)
        };

        let mut main_cursor = main_margin;
        for bucket in &buckets {
            let mut cross_cursor = cross_margin;
            let mut max_main: f32 = 0.0;
            for &idx in bucket {
                let node = &mut graph.nodes[idx];
                let (main_extent, cross_extent) = if horizontal {
                    (node.width, node.height)
                } else {
                    (node.height, node.width)
                };
                node.position = Some(if horizontal {
                    Position::new(cross_cursor, main_cursor)
                } else {
                    Position::new(main_cursor, cross_cursor)
                });
                cross_cursor += cross_extent + spacing.nodesep;
                max_main = max_main.max(main_extent);
            }
            main_cursor += max_main + spacing.ranksep;
        }
    }
}

/// Longest-path rank of every entity, indexed like `graph.nodes`.
fn compute_ranks(graph: &FlatGraph) -> Vec<usize> {
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.as_str(), idx))
        .collect();

    let mut indeg = vec![0usize; graph.nodes.len()];
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
    for edge in &graph.edges {
        let (Some(&from), Some(&to)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            continue;
        };
        if from == to {
            continue;
        }
        adj[from].push(to);
        indeg[to] += 1;
    }

    let mut queue: VecDeque<usize> = (0..graph.nodes.len()).filter(|&i| indeg[i] == 0).collect();
    let mut order = Vec::with_capacity(graph.nodes.len());
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in &adj[node] {
            indeg[next] -= 1;
            if indeg[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() < graph.nodes.len() {
        let mut placed = vec![false; graph.nodes.len()];
        for &idx in &order {
            placed[idx] = true;
        }
        order.extend((0..graph.nodes.len()).filter(|&idx| !placed[idx]));
    }

    let mut order_index = vec![0usize; graph.nodes.len()];
    for (pos, &idx) in order.iter().enumerate() {
        order_index[idx] = pos;
    }

    let mut ranks = vec![0usize; graph.nodes.len()];
    for &node in &order {
        for &next in &adj[node] {
            if order_index[next] > order_index[node] {
                ranks[next] = ranks[next].max(ranks[node] + 1);
            }
        }
    }
    ranks
}
