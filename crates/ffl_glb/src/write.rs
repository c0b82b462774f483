//! Types for writing GLB containers
//!

use std::io::{Seek, Write};

use binrw::BinWrite;
use tracing::instrument;

use crate::document::{
    Accessor, Asset, Attributes, Bounds, Buffer, BufferView, Document, MeshDescription, Node,
    Primitive, Scene, COMPONENT_F32, COMPONENT_U16, COMPONENT_U8, MODE_TRIANGLES,
};
use crate::error::Result;
use crate::types::{ChunkHeader, FileHeader, CHUNK_BIN, CHUNK_JSON, CONTAINER_VERSION};

/// Bytes needed to reach the next four-byte boundary
const fn pad_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Single-mesh GLB container writer
///
/// Each `add_*` call appends the attribute's bytes to the buffer and declares a matching
/// buffer view and accessor, so the binary chunk ends up holding the attributes back to back
/// in call order. Calls with nothing to add leave no trace in the output.
///
/// ```
/// # fn doit() -> ffl_glb::error::Result<()>
/// # {
/// use ffl_glb::GlbWriter;
///
/// let mut glb = GlbWriter::new();
/// glb.add_positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
/// glb.add_triangles(&[[0, 1, 2]]);
///
/// let mut out = std::io::Cursor::new(Vec::new());
/// glb.finish(&mut out)?;
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct GlbWriter {
    buffer_views: Vec<BufferView>,
    accessors: Vec<Accessor>,
    attributes: Attributes,
    indices: Option<usize>,
    data: Vec<u8>,
}

impl GlbWriter {
    /// Creates a writer holding an empty mesh.
    pub fn new() -> GlbWriter {
        GlbWriter::default()
    }

    /// Vertex positions, with min/max bounds declared per component.
    pub fn add_positions(&mut self, positions: &[[f32; 3]]) {
        if positions.is_empty() {
            return;
        }

        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for position in positions {
            for (axis, value) in position.iter().enumerate() {
                min[axis] = min[axis].min(*value);
                max[axis] = max[axis].max(*value);
            }
        }

        let view = self.add_buffer_view(positions.len() * 12);
        let accessor = self.add_accessor(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_F32,
            count: positions.len(),
            element_type: "VEC3",
            min: Some(Bounds::Float(min.to_vec())),
            max: Some(Bounds::Float(max.to_vec())),
            normalized: false,
        });

        for position in positions {
            for value in position {
                self.data.extend_from_slice(&value.to_le_bytes());
            }
        }

        self.attributes.position = Some(accessor);
    }

    /// Vertex normals. Only called for the rare shape whose normals decoded.
    pub fn add_normals(&mut self, normals: &[[f32; 3]]) {
        if normals.is_empty() {
            return;
        }

        let view = self.add_buffer_view(normals.len() * 12);
        let accessor = self.add_accessor(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_F32,
            count: normals.len(),
            element_type: "VEC3",
            min: None,
            max: None,
            normalized: false,
        });

        for normal in normals {
            for value in normal {
                self.data.extend_from_slice(&value.to_le_bytes());
            }
        }

        self.attributes.normal = Some(accessor);
    }

    /// Texture coordinates.
    pub fn add_tex_coords(&mut self, tex_coords: &[[f32; 2]]) {
        if tex_coords.is_empty() {
            return;
        }

        let view = self.add_buffer_view(tex_coords.len() * 8);
        let accessor = self.add_accessor(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_F32,
            count: tex_coords.len(),
            element_type: "VEC2",
            min: None,
            max: None,
            normalized: false,
        });

        for uv in tex_coords {
            for value in uv {
                self.data.extend_from_slice(&value.to_le_bytes());
            }
        }

        self.attributes.tex_coord_0 = Some(accessor);
    }

    /// Per-vertex colors as normalized unsigned bytes.
    ///
    /// A single record is the packer's filler entry, not a real color set, so anything short
    /// of two records is omitted.
    pub fn add_vertex_colors(&mut self, colors: &[[u8; 4]]) {
        if colors.len() <= 1 {
            return;
        }

        let view = self.add_buffer_view(colors.len() * 4);
        let accessor = self.add_accessor(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_U8,
            count: colors.len(),
            element_type: "VEC4",
            min: None,
            max: None,
            normalized: true,
        });

        for color in colors {
            self.data.extend_from_slice(color);
        }

        self.attributes.color_0 = Some(accessor);
    }

    /// Triangle list, with min/max index bounds declared.
    pub fn add_triangles(&mut self, triangles: &[[u16; 3]]) {
        if triangles.is_empty() {
            return;
        }

        let mut min = u16::MAX;
        let mut max = u16::MIN;
        for triangle in triangles {
            for index in triangle {
                min = min.min(*index);
                max = max.max(*index);
            }
        }

        let view = self.add_buffer_view(triangles.len() * 6);
        let accessor = self.add_accessor(Accessor {
            buffer_view: view,
            byte_offset: 0,
            component_type: COMPONENT_U16,
            count: triangles.len() * 3,
            element_type: "SCALAR",
            min: Some(Bounds::Index(vec![u32::from(min)])),
            max: Some(Bounds::Index(vec![u32::from(max)])),
            normalized: false,
        });

        for triangle in triangles {
            for index in triangle {
                self.data.extend_from_slice(&index.to_le_bytes());
            }
        }

        self.indices = Some(accessor);
    }

    /// Serialize the scene description and write the finished container.
    #[instrument(skip_all, err)]
    pub fn finish<W: Write + Seek>(mut self, mut writer: W) -> Result<()> {
        let document = Document {
            asset: Asset { version: "2.0" },
            scene: 0,
            scenes: vec![Scene { nodes: vec![0] }],
            nodes: vec![Node {
                name: "shape",
                mesh: 0,
            }],
            buffers: vec![Buffer {
                byte_length: self.data.len(),
            }],
            buffer_views: self.buffer_views,
            accessors: self.accessors,
            meshes: vec![MeshDescription {
                primitives: vec![Primitive {
                    attributes: self.attributes,
                    mode: MODE_TRIANGLES,
                    indices: self.indices,
                }],
            }],
        };

        let mut json = serde_json::to_vec(&document)?;
        json.resize(json.len() + pad_len(json.len()), b' ');
        self.data.resize(self.data.len() + pad_len(self.data.len()), 0);

        let total = 12 + 8 + json.len() + 8 + self.data.len();

        FileHeader {
            version: CONTAINER_VERSION,
            length: total as u32,
        }
        .write(&mut writer)?;

        ChunkHeader {
            length: json.len() as u32,
            kind: CHUNK_JSON,
        }
        .write(&mut writer)?;
        writer.write_all(&json)?;

        ChunkHeader {
            length: self.data.len() as u32,
            kind: CHUNK_BIN,
        }
        .write(&mut writer)?;
        writer.write_all(&self.data)?;

        Ok(())
    }

    fn add_buffer_view(&mut self, byte_length: usize) -> usize {
        self.buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: self.data.len(),
            byte_length,
        });
        self.buffer_views.len() - 1
    }

    fn add_accessor(&mut self, accessor: Accessor) -> usize {
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }
}
