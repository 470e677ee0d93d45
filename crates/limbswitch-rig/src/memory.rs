//! In-memory scene implementing every host capability.
//!
//! The scene is flat: parents only contribute to long names, and every
//! node's local transform is its world transform. Every trait call that
//! names a node is appended to a call log so tests can assert which nodes
//! an operation touched.

use std::cell::RefCell;
use std::collections::BTreeMap;

use limbswitch_core::{geometry::add, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::{
    AttributeStore, Channels, Keyer, NodeHandle, NodeResolver, Selection, TimelineReader,
    TransformProvider,
};

/// A transform node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryNode {
    /// World translation.
    #[serde(default)]
    pub translation: Vec3,
    /// World rotation, XYZ Euler degrees.
    #[serde(default)]
    pub rotation: Vec3,
    /// World rotate pivot.
    #[serde(default)]
    pub pivot: Vec3,
    /// Scalar attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, f64>,
    /// Parent node name, used for long names only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl MemoryNode {
    /// Node at a position with its pivot on the same point.
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            pivot: translation,
            ..Self::default()
        }
    }

    /// Sets the rotation.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Sets the parent.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// A committed keyframe with the values captured at key time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keyframe {
    /// Keyed node.
    pub node: String,
    /// Frame.
    pub time: f64,
    /// Translation value, when translate was keyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec3>,
    /// Rotation value, when rotate was keyed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
}

/// Playhead and selected range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timeline {
    /// Current frame.
    #[serde(default)]
    pub current: f64,
    /// Highlighted range `[start, end]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<[f64; 2]>,
}

/// Flat, serializable scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryScene {
    /// Nodes by full name.
    #[serde(default)]
    pub nodes: BTreeMap<String, MemoryNode>,
    /// Keys in commit order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<Keyframe>,
    /// Timeline state.
    #[serde(default)]
    pub timeline: Timeline,
    /// Selected node names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<String>,
    #[serde(skip)]
    calls: RefCell<Vec<String>>,
    #[serde(skip)]
    refreshes: usize,
}

impl MemoryScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a scene document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the scene (keys and timeline included).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Adds or replaces a node.
    pub fn insert(&mut self, name: impl Into<String>, node: MemoryNode) {
        self.nodes.insert(name.into(), node);
    }

    /// Adds a node, builder style.
    pub fn with_node(mut self, name: impl Into<String>, node: MemoryNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Sets the selected frame range.
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.timeline.selected = Some([start, end]);
        self
    }

    /// Node by name.
    pub fn node(&self, name: &str) -> Option<&MemoryNode> {
        self.nodes.get(name)
    }

    /// Mutable node by name.
    pub fn node_mut(&mut self, name: &str) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(name)
    }

    /// Every logged call, formatted `operation:node`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Clears the call log.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Whether any logged call referenced a node whose name contains `needle`.
    pub fn touched(&self, needle: &str) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|call| call.split_once(':').is_some_and(|(_, node)| node.contains(needle)))
    }

    /// Keys committed on a node.
    pub fn keys_for<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Keyframe> + 'a {
        self.keys.iter().filter(move |k| k.node == node)
    }

    /// Number of refresh requests received.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    fn log(&self, op: &str, node: &str) {
        self.calls.borrow_mut().push(format!("{}:{}", op, node));
    }

    fn get(&self, op: &str, node: &NodeHandle) -> Result<&MemoryNode, HostError> {
        self.log(op, node.name());
        self.nodes
            .get(node.name())
            .ok_or_else(|| HostError::node_not_found(node.name()))
    }

    fn get_mut(&mut self, op: &str, node: &NodeHandle) -> Result<&mut MemoryNode, HostError> {
        self.log(op, node.name());
        self.nodes
            .get_mut(node.name())
            .ok_or_else(|| HostError::node_not_found(node.name()))
    }
}

impl NodeResolver for MemoryScene {
    fn exists(&self, name: &str) -> bool {
        self.log("exists", name);
        self.nodes.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Option<NodeHandle> {
        self.log("resolve", name);
        self.nodes.contains_key(name).then(|| NodeHandle::new(name))
    }
}

impl TransformProvider for MemoryScene {
    fn world_translation(&self, node: &NodeHandle) -> Result<Vec3, HostError> {
        Ok(self.get("get_translation", node)?.translation)
    }

    fn world_rotation(&self, node: &NodeHandle) -> Result<Vec3, HostError> {
        Ok(self.get("get_rotation", node)?.rotation)
    }

    fn world_pivot(&self, node: &NodeHandle) -> Result<Vec3, HostError> {
        Ok(self.get("get_pivot", node)?.pivot)
    }

    fn set_world_translation(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError> {
        self.get_mut("set_translation", node)?.translation = value;
        Ok(())
    }

    fn set_world_rotation(
        &mut self,
        node: &NodeHandle,
        value: Vec3,
        relative: bool,
    ) -> Result<(), HostError> {
        let target = self.get_mut("set_rotation", node)?;
        target.rotation = if relative {
            add(target.rotation, value)
        } else {
            value
        };
        Ok(())
    }

    fn set_world_pivot(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError> {
        self.get_mut("set_pivot", node)?.pivot = value;
        Ok(())
    }

    fn set_local_translation(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError> {
        self.get_mut("set_local_translation", node)?.translation = value;
        Ok(())
    }

    fn set_local_rotation(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError> {
        self.get_mut("set_local_rotation", node)?.rotation = value;
        Ok(())
    }
}

impl Keyer for MemoryScene {
    fn set_keyframe(
        &mut self,
        node: &NodeHandle,
        channels: Channels,
        time: f64,
    ) -> Result<(), HostError> {
        let source = self.get("key", node)?;
        let key = Keyframe {
            node: node.name().to_string(),
            time,
            translation: channels.translate.then_some(source.translation),
            rotation: channels.rotate.then_some(source.rotation),
        };
        // One key per node and frame; re-keying replaces the values.
        self.keys.retain(|k| !(k.node == key.node && k.time == key.time));
        self.keys.push(key);
        Ok(())
    }
}

impl TimelineReader for MemoryScene {
    fn current_time(&self) -> f64 {
        self.timeline.current
    }

    fn set_current_time(&mut self, time: f64) {
        self.timeline.current = time;
    }

    fn selected_range(&self) -> Option<(f64, f64)> {
        self.timeline.selected.map(|[start, end]| (start, end))
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

impl AttributeStore for MemoryScene {
    fn get_attr(&self, node: &NodeHandle, attribute: &str) -> Option<f64> {
        self.log("get_attr", node.name());
        self.nodes
            .get(node.name())
            .and_then(|n| n.attributes.get(attribute).copied())
    }

    fn set_attr(
        &mut self,
        node: &NodeHandle,
        attribute: &str,
        value: f64,
    ) -> Result<(), HostError> {
        let target = self.get_mut("set_attr", node)?;
        match target.attributes.get_mut(attribute) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(HostError::attribute_not_found(node.name(), attribute)),
        }
    }
}

impl Selection for MemoryScene {
    fn selected(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn long_name(&self, name: &str) -> String {
        let mut parts = vec![name.to_string()];
        let mut current = self.nodes.get(name).and_then(|n| n.parent.clone());
        // Guard against parent cycles in hand-written documents.
        while let Some(parent) = current {
            if parts.contains(&parent) {
                break;
            }
            current = self.nodes.get(&parent).and_then(|n| n.parent.clone());
            parts.push(parent);
        }
        parts.reverse();
        format!("|{}", parts.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MatchChannels;
    use pretty_assertions::assert_eq;

    fn scene() -> MemoryScene {
        MemoryScene::new()
            .with_node("a", MemoryNode::at([1.0, 2.0, 3.0]).with_rotation([0.0, 45.0, 0.0]))
            .with_node("b", MemoryNode::default().with_attr("ikBlend", 1.0))
    }

    #[test]
    fn test_match_transform_copies_selected_channels() {
        let mut scene = scene();
        let a = NodeHandle::new("a");
        let b = NodeHandle::new("b");
        scene
            .match_transform(&b, &a, MatchChannels::POSITION_PIVOT)
            .unwrap();
        let node = scene.node("b").unwrap();
        assert_eq!(node.translation, [1.0, 2.0, 3.0]);
        assert_eq!(node.pivot, [1.0, 2.0, 3.0]);
        assert_eq!(node.rotation, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_relative_rotation_adds() {
        let mut scene = scene();
        let a = NodeHandle::new("a");
        scene.set_world_rotation(&a, [10.0, 0.0, 90.0], true).unwrap();
        assert_eq!(scene.node("a").unwrap().rotation, [10.0, 45.0, 90.0]);
    }

    #[test]
    fn test_missing_node_and_attribute() {
        let mut scene = scene();
        let ghost = NodeHandle::new("ghost");
        assert_eq!(
            scene.world_translation(&ghost),
            Err(HostError::node_not_found("ghost"))
        );
        let b = NodeHandle::new("b");
        assert!(scene.set_attr(&b, "nope", 1.0).is_err());
        assert_eq!(scene.get_attr(&b, "ikBlend"), Some(1.0));
    }

    #[test]
    fn test_keyframe_replaces_same_frame() {
        let mut scene = scene();
        let a = NodeHandle::new("a");
        scene.set_keyframe(&a, Channels::TRANSLATE, 3.0).unwrap();
        scene.set_world_translation(&a, [9.0, 9.0, 9.0]).unwrap();
        scene.set_keyframe(&a, Channels::TRANSFORM, 3.0).unwrap();
        let keys: Vec<_> = scene.keys_for("a").collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].translation, Some([9.0, 9.0, 9.0]));
        assert_eq!(keys[0].rotation, Some([0.0, 45.0, 0.0]));
    }

    #[test]
    fn test_call_log_and_long_name() {
        let scene = MemoryScene::new()
            .with_node("rig", MemoryNode::default())
            .with_node("L_Leg_null", MemoryNode::default().with_parent("rig"))
            .with_node("L_LegPV_CTRL", MemoryNode::default().with_parent("L_Leg_null"));
        assert!(scene.exists("L_LegPV_CTRL"));
        assert!(scene.touched("LegPV"));
        assert!(!scene.touched("toe"));
        assert_eq!(scene.long_name("L_LegPV_CTRL"), "|rig|L_Leg_null|L_LegPV_CTRL");
    }

    #[test]
    fn test_scene_json_round_trip() {
        let scene = scene().with_range(1.0, 24.0);
        let json = scene.to_json_pretty().unwrap();
        let parsed = MemoryScene::from_json(&json).unwrap();
        assert_eq!(parsed.nodes, scene.nodes);
        assert_eq!(parsed.selected_range(), Some((1.0, 24.0)));
    }
}
