use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ir::EntityKind;

/// Flat layout pass used for every scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    #[default]
    Dagre,
    Ranked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl RankDir {
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR | RankDir::RL)
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, RankDir::BT | RankDir::RL)
    }

    pub fn as_dagre(self) -> &'static str {
        match self {
            RankDir::TB => "tb",
            RankDir::BT => "bt",
            RankDir::LR => "lr",
            RankDir::RL => "rl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub engine: LayoutEngine,
    pub rankdir: RankDir,
    pub margin_x: f32,
    pub margin_y: f32,
    pub node_width: f32,
    pub node_height: f32,
    pub group_width: f32,
    pub group_height: f32,
    /// Deepest group nesting accepted before the layout fails; unlimited when `None`.
    pub max_depth: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::Dagre,
            rankdir: RankDir::TB,
            margin_x: 8.0,
            margin_y: 8.0,
            node_width: 120.0,
            node_height: 40.0,
            group_width: 240.0,
            group_height: 160.0,
            max_depth: Some(64),
        }
    }
}

impl LayoutConfig {
    /// Fallback size for entities that carry no `width`/`height`.
    pub fn default_size(&self, kind: EntityKind) -> (f32, f32) {
        match kind {
            EntityKind::Node => (self.node_width, self.node_height),
            EntityKind::Group => (self.group_width, self.group_height),
        }
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<LayoutConfig> {
    match serde_json::from_str::<LayoutConfig>(contents) {
        Ok(config) => Ok(config),
        Err(json_err) => json5::from_str::<LayoutConfig>(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid layout config: {json_err} (json5: {json5_err})")
        }),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}
