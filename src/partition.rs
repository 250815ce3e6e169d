use std::collections::HashMap;

use crate::ir::{Entity, EntityId};

/// Entities split by their `group` field.
///
/// `alone_*` hold the entities without a group; `node_children`/`group_children` hold direct
/// members of each group id, in input order. Membership is never followed transitively.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub alone_nodes: Vec<&'a Entity>,
    pub alone_groups: Vec<&'a Entity>,
    node_children: HashMap<&'a EntityId, Vec<&'a Entity>>,
    group_children: HashMap<&'a EntityId, Vec<&'a Entity>>,
}

impl<'a> Partition<'a> {
    /// Nodes whose `group` is exactly `group_id`.
    pub fn children_of(&self, group_id: &EntityId) -> &[&'a Entity] {
        self.node_children
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Groups whose parent `group` is exactly `group_id`.
    pub fn child_groups_of(&self, group_id: &EntityId) -> &[&'a Entity] {
        self.group_children
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub fn partition<'a>(nodes: &'a [Entity], groups: &'a [Entity]) -> Partition<'a> {
    let mut result = Partition::default();

    for node in nodes {
        let Some(group_id) = &node.group else {
            result.alone_nodes.push(node);
            continue;
        };
        let children = result.node_children.entry(group_id).or_default();
        children.push(node);
    }

    for group in groups {
        let Some(parent_id) = &group.group else {
            result.alone_groups.push(group);
            continue;
        };
        let children = result.group_children.entry(parent_id).or_default();
        children.push(group);
    }

    result
}
