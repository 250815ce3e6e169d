pub mod adapter;
pub mod apply;
pub mod config;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod partition;
pub mod position;
pub mod projection;

pub use adapter::{FlatGraph, LayoutAdapter, LayoutEntity};
pub use apply::{apply_group_layout, apply_group_layout_with};
pub use config::{LayoutConfig, LayoutEngine, RankDir, load_config, parse_config};
pub use engine::{GroupLayoutEngine, GroupPositions, PlacedEntity};
pub use error::LayoutError;
pub use ir::{
    Edge, Entity, EntityId, EntityKind, GraphData, LayoutRequest, Spacing, parse_request,
};
pub use position::{Offset, Position};
