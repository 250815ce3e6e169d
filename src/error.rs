use thiserror::Error;

use crate::ir::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("group nesting cycle detected at group `{group}`")]
    NestingCycle { group: EntityId },

    #[error("group `{group}` is nested {depth} levels deep, exceeding the limit of {limit}")]
    DepthLimit {
        group: EntityId,
        depth: usize,
        limit: usize,
    },
}
