use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier shared by nodes and groups.
///
/// Ids arriving as JSON numbers are normalised to their string form, so `1` and `"1"`
/// address the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Int(value) => value.to_string(),
            RawId::UInt(value) => value.to_string(),
            RawId::Float(value) => value.to_string(),
        };
        Ok(Self(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Node,
    Group,
}

/// A caller-owned node or group record.
///
/// `group` names the enclosing group, `top`/`left` are written by the layout, and
/// `width`/`height` are handed to the layout adapter when present. Unknown fields are kept in
/// `extra` and round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            group: None,
            top: None,
            left: None,
            width: None,
            height: None,
            extra: Map::new(),
        }
    }

    pub fn in_group(mut self, group: impl Into<EntityId>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: EntityId,
    pub target: EntityId,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            payload: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Entity>,
    #[serde(default)]
    pub groups: Vec<Entity>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Spacing hints forwarded verbatim to the layout adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub ranksep: f32,
    pub nodesep: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            ranksep: DEFAULT_RANKSEP,
            nodesep: DEFAULT_NODESEP,
        }
    }
}

const DEFAULT_RANKSEP: f32 = 50.0;
const DEFAULT_NODESEP: f32 = 50.0;

fn default_ranksep() -> f32 {
    DEFAULT_RANKSEP
}

fn default_nodesep() -> f32 {
    DEFAULT_NODESEP
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub data: GraphData,
    #[serde(default = "default_ranksep")]
    pub ranksep: f32,
    #[serde(default = "default_nodesep")]
    pub nodesep: f32,
}

impl LayoutRequest {
    pub fn new(data: GraphData) -> Self {
        Self {
            data,
            ranksep: DEFAULT_RANKSEP,
            nodesep: DEFAULT_NODESEP,
        }
    }

    pub fn with_spacing(mut self, ranksep: f32, nodesep: f32) -> Self {
        self.ranksep = ranksep;
        self.nodesep = nodesep;
        self
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            ranksep: self.ranksep,
            nodesep: self.nodesep,
        }
    }
}

/// Parse a request from JSON, accepting JSON5 for hand-written input.
pub fn parse_request(input: &str) -> anyhow::Result<LayoutRequest> {
    match serde_json::from_str::<LayoutRequest>(input) {
        Ok(request) => Ok(request),
        Err(json_err) => json5::from_str::<LayoutRequest>(input).map_err(|json5_err| {
            anyhow::anyhow!("invalid layout request: {json_err} (json5: {json5_err})")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        let numeric: EntityId = serde_json::from_str("7").unwrap();
        let text: EntityId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric, EntityId::from(7));
    }

    #[test]
    fn parses_request_with_defaults_and_extra_fields() {
        let request = parse_request(
            r#"{
                "data": {
                    "nodes": [{"id": 1, "label": "Start"}, {"id": "b", "group": "g1"}],
                    "groups": [{"id": "g1", "width": 300, "height": 200}],
                    "edges": [{"source": 1, "target": "b", "kind": "flow"}]
                },
                "ranksep": 80
            }"#,
        )
        .unwrap();

        assert_eq!(request.ranksep, 80.0);
        assert_eq!(request.nodesep, 50.0);
        assert_eq!(request.data.nodes[0].id.as_str(), "1");
        assert_eq!(request.data.nodes[0].extra["label"], "Start");
        assert_eq!(request.data.nodes[1].group, Some(EntityId::from("g1")));
        assert_eq!(request.data.groups[0].width, Some(300.0));
        assert_eq!(request.data.edges[0].payload["kind"], "flow");
    }

    #[test]
    fn falls_back_to_json5() {
        let request = parse_request(
            "{ data: { nodes: [{ id: 'a' }], edges: [] }, nodesep: 10, // spacing\n }",
        )
        .unwrap();
        assert_eq!(request.data.nodes.len(), 1);
        assert_eq!(request.nodesep, 10.0);
        assert!(request.data.groups.is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_request("not a request").is_err());
    }

    #[test]
    fn unassigned_positions_are_not_serialized() {
        let entity = Entity::new("a");
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"id":"a"}"#);
    }
}
