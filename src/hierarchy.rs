//! Group containment tree.
//!
//! The tree is built once from the flat `nodes`/`groups` collections. Every group owns one
//! scope listing its direct child nodes and child groups; the root scope lists everything
//! without a `group`. The layout engine walks scopes by [`ScopeId`], so no relationship can be
//! visited twice.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::LayoutError;
use crate::ir::{Entity, EntityId, GraphData};
use crate::partition::{Partition, partition};
use crate::projection::Membership;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug)]
pub struct Scope<'a> {
    /// Group owning this scope; `None` for the root.
    pub container: Option<&'a Entity>,
    /// Nesting depth: 0 for the root, 1 for top-level groups.
    pub depth: usize,
    pub nodes: Vec<&'a Entity>,
    pub groups: Vec<(&'a Entity, ScopeId)>,
}

impl Scope<'_> {
    pub fn is_root(&self) -> bool {
        self.container.is_none()
    }

    pub fn member_ids(&self) -> HashSet<&EntityId> {
        self.nodes
            .iter()
            .map(|node| &node.id)
            .chain(self.groups.iter().map(|(group, _)| &group.id))
            .collect()
    }
}

#[derive(Debug)]
pub struct GroupTree<'a> {
    scopes: Vec<Scope<'a>>,
}

impl<'a> GroupTree<'a> {
    /// Build the containment tree.
    ///
    /// Fails when the `group` chain of some group loops back on itself or when a group is
    /// nested deeper than `max_depth`. Entities whose parent is not a known group are left out
    /// of the tree and therefore never positioned.
    pub fn build(data: &'a GraphData, max_depth: Option<usize>) -> Result<Self, LayoutError> {
        let parts = partition(&data.nodes, &data.groups);
        let mut tree = GroupTree {
            scopes: vec![Scope {
                container: None,
                depth: 0,
                nodes: parts.alone_nodes.clone(),
                groups: Vec::new(),
            }],
        };
        let mut reached: HashSet<&'a EntityId> = HashSet::new();

        for &group in &parts.alone_groups {
            if !reached.insert(&group.id) {
                continue;
            }
            let scope = tree.add_scope(&parts, group, 1, max_depth, &mut reached)?;
            tree.scopes[0].groups.push((group, scope));
        }

        if reached.len() < data.groups.len() {
            check_unreached_groups(data, &reached)?;
        }

        Ok(tree)
    }

    fn add_scope(
        &mut self,
        parts: &Partition<'a>,
        container: &'a Entity,
        depth: usize,
        max_depth: Option<usize>,
        reached: &mut HashSet<&'a EntityId>,
    ) -> Result<ScopeId, LayoutError> {
        if let Some(limit) = max_depth {
            if depth > limit {
                return Err(LayoutError::DepthLimit {
                    group: container.id.clone(),
                    depth,
                    limit,
                });
            }
        }

        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            container: Some(container),
            depth,
            nodes: parts.children_of(&container.id).to_vec(),
            groups: Vec::new(),
        });

        for &child in parts.child_groups_of(&container.id) {
            if !reached.insert(&child.id) {
                continue;
            }
            let child_scope = self.add_scope(parts, child, depth + 1, max_depth, reached)?;
            self.scopes[id.0].groups.push((child, child_scope));
        }

        Ok(id)
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope<'a> {
        &self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Membership used to project edges for `id`: every descendant of a member group is
    /// represented by that member group.
    pub fn membership(&self, id: ScopeId) -> Membership {
        let mut membership = Membership::new();
        for (group, group_scope) in &self.scope(id).groups {
            let mut stack = vec![*group_scope];
            while let Some(current) = stack.pop() {
                let scope = self.scope(current);
                for node in &scope.nodes {
                    membership.insert(node.id.clone(), group.id.clone());
                }
                for (inner, inner_scope) in &scope.groups {
                    membership.insert(inner.id.clone(), group.id.clone());
                    stack.push(*inner_scope);
                }
            }
        }
        membership
    }
}

fn check_unreached_groups(
    data: &GraphData,
    reached: &HashSet<&EntityId>,
) -> Result<(), LayoutError> {
    let groups_by_id: HashMap<&EntityId, &Entity> =
        data.groups.iter().map(|group| (&group.id, group)).collect();

    for group in &data.groups {
        if reached.contains(&group.id) {
            continue;
        }
        if let Some(looping) = find_cycle(group, &groups_by_id) {
            return Err(LayoutError::NestingCycle {
                group: looping.clone(),
            });
        }
        debug!(group = group.id.as_str(); "Group is not attached to the root; skipping");
    }

    Ok(())
}

fn find_cycle<'a>(
    start: &'a Entity,
    groups_by_id: &HashMap<&EntityId, &'a Entity>,
) -> Option<&'a EntityId> {
    let mut seen: HashSet<&EntityId> = HashSet::new();
    let mut current = start;
    while let Some(parent) = &current.group {
        if !seen.insert(&current.id) {
            return Some(&current.id);
        }
        match groups_by_id.get(parent) {
            Some(&next) => current = next,
            None => return None,
        }
    }
    None
}
