//! Serialized form of the scene-description chunk.
//!
//! Field names follow the glTF 2.0 schema; everything optional is skipped when absent so the
//! emitted JSON stays minimal.

use serde::Serialize;

/// Component type code for 32-bit floats
pub const COMPONENT_F32: u32 = 5126;

/// Component type code for unsigned bytes
pub const COMPONENT_U8: u32 = 5121;

/// Component type code for unsigned 16-bit integers
pub const COMPONENT_U16: u32 = 5123;

/// Primitive mode code for triangle lists
pub const MODE_TRIANGLES: u32 = 4;

/// Root of the scene description
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: Asset,
    pub scene: usize,
    pub scenes: Vec<Scene>,
    pub nodes: Vec<Node>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub meshes: Vec<MeshDescription>,
}

/// Mandatory asset stanza
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Asset {
    pub version: &'static str,
}

/// A scene referencing its root nodes
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Scene {
    pub nodes: Vec<usize>,
}

/// A node referencing one mesh
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub name: &'static str,
    pub mesh: usize,
}

/// A buffer; GLB stores its bytes in the binary chunk, so there is no uri
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: usize,
}

/// A contiguous slice of the buffer
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
}

/// Typed view over a buffer view
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub buffer_view: usize,
    pub byte_offset: usize,
    pub component_type: u32,
    pub count: usize,
    #[serde(rename = "type")]
    pub element_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Bounds>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub normalized: bool,
}

/// Accessor bounds; float per component for positions, a single integer for indices
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Bounds {
    Float(Vec<f32>),
    Index(Vec<u32>),
}

/// A mesh made of primitives
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MeshDescription {
    pub primitives: Vec<Primitive>,
}

/// One triangle-list primitive
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Primitive {
    pub attributes: Attributes,
    pub mode: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<usize>,
}

/// Accessor slots for the attributes this writer can emit
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    #[serde(rename = "POSITION", skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(rename = "NORMAL", skip_serializing_if = "Option::is_none")]
    pub normal: Option<usize>,
    #[serde(rename = "TEXCOORD_0", skip_serializing_if = "Option::is_none")]
    pub tex_coord_0: Option<usize>,
    #[serde(rename = "COLOR_0", skip_serializing_if = "Option::is_none")]
    pub color_0: Option<usize>,
}
