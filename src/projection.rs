use std::collections::{HashMap, HashSet};

use crate::ir::{Edge, EntityId};

/// Maps an entity id to the container that represents it at one level of the layout.
/// Ids without an entry represent themselves.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    owners: HashMap<EntityId, EntityId>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, member: EntityId, owner: EntityId) {
        self.owners.insert(member, owner);
    }

    pub fn resolve<'m>(&'m self, id: &'m EntityId) -> &'m EntityId {
        self.owners.get(id).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl FromIterator<(EntityId, EntityId)> for Membership {
    fn from_iter<I: IntoIterator<Item = (EntityId, EntityId)>>(iter: I) -> Self {
        Self {
            owners: iter.into_iter().collect(),
        }
    }
}

/// Rewrite every edge endpoint to the container that represents it, then drop repeated
/// `(source, target)` pairs. The first occurrence of a pair (and its payload) wins and the
/// original order is kept. Self-loops produced by the collapse are kept.
pub fn project_edges(edges: &[Edge], membership: &Membership) -> Vec<Edge> {
    let mut seen: HashSet<(&EntityId, &EntityId)> = HashSet::new();
    let mut projected = Vec::new();

    for edge in edges {
        let source = membership.resolve(&edge.source);
        let target = membership.resolve(&edge.target);
        if !seen.insert((source, target)) {
            continue;
        }
        projected.push(Edge {
            source: source.clone(),
            target: target.clone(),
            payload: edge.payload.clone(),
        });
    }

    projected
}
