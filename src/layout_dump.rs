use crate::ir::{Entity, EntityKind, LayoutRequest};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub ranksep: f32,
    pub nodesep: f32,
    pub entities: Vec<EntityDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct EntityDump {
    pub id: String,
    pub kind: EntityKind,
    pub group: Option<String>,
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub source: String,
    pub target: String,
}

impl EntityDump {
    fn from_entity(entity: &Entity, kind: EntityKind) -> Self {
        EntityDump {
            id: entity.id.to_string(),
            kind,
            group: entity.group.as_ref().map(|group| group.to_string()),
            top: entity.top,
            left: entity.left,
            width: entity.width,
            height: entity.height,
        }
    }
}

impl LayoutDump {
    pub fn from_request(request: &LayoutRequest) -> Self {
        let nodes = request
            .data
            .nodes
            .iter()
            .map(|node| EntityDump::from_entity(node, EntityKind::Node));
        let groups = request
            .data
            .groups
            .iter()
            .map(|group| EntityDump::from_entity(group, EntityKind::Group));

        let edges = request
            .data
            .edges
            .iter()
            .map(|edge| EdgeDump {
                source: edge.source.to_string(),
                target: edge.target.to_string(),
            })
            .collect();

        LayoutDump {
            ranksep: request.ranksep,
            nodesep: request.nodesep,
            entities: nodes.chain(groups).collect(),
            edges,
        }
    }

    pub fn unplaced(&self) -> impl Iterator<Item = &EntityDump> {
        self.entities
            .iter()
            .filter(|entity| entity.top.is_none() || entity.left.is_none())
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(path: &Path, request: &LayoutRequest) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_request(request);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
