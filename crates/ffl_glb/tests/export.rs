use std::io::{Cursor, Read, Seek, SeekFrom};

use binrw::BinRead;
use pretty_assertions::assert_eq;

use ffl_glb::error::Result;
use ffl_glb::types::{ChunkHeader, FileHeader, CHUNK_BIN, CHUNK_JSON, CONTAINER_VERSION};
use ffl_glb::GlbWriter;

const POSITIONS: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, -2.5],
];

const TRIANGLES: [[u16; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

fn parse_container(bytes: &[u8]) -> Result<(FileHeader, serde_json::Value, Vec<u8>)> {
    let mut cursor = Cursor::new(bytes);

    let header = FileHeader::read(&mut cursor)?;

    let json_header = ChunkHeader::read(&mut cursor)?;
    assert_eq!(json_header.kind, CHUNK_JSON);
    let mut json_payload = vec![0u8; json_header.length as usize];
    cursor.read_exact(&mut json_payload)?;

    let bin_header = ChunkHeader::read(&mut cursor)?;
    assert_eq!(bin_header.kind, CHUNK_BIN);
    let mut bin_payload = vec![0u8; bin_header.length as usize];
    cursor.read_exact(&mut bin_payload)?;

    // nothing may follow the binary chunk
    assert_eq!(cursor.seek(SeekFrom::Current(0))?, bytes.len() as u64);

    let document = serde_json::from_slice(&json_payload)?;
    Ok((header, document, bin_payload))
}

#[test]
fn container_framing_is_consistent() -> Result<()> {
    let mut glb = GlbWriter::new();
    glb.add_positions(&POSITIONS);
    glb.add_triangles(&TRIANGLES);

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let bytes = out.into_inner();

    let (header, _, _) = parse_container(&bytes)?;
    assert_eq!(header.version, CONTAINER_VERSION);
    assert_eq!(header.length as usize, bytes.len());

    Ok(())
}

#[test]
fn chunks_are_padded_to_four_bytes() -> Result<()> {
    let mut glb = GlbWriter::new();
    // a single triangle leaves the buffer at 18 bytes, two short of alignment
    glb.add_positions(&[[0.0, 0.0, 0.0]]);
    glb.add_triangles(&[[0, 0, 0]]);

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let bytes = out.into_inner();

    let mut cursor = Cursor::new(bytes.as_slice());
    FileHeader::read(&mut cursor)?;
    let json_header = ChunkHeader::read(&mut cursor)?;
    assert_eq!(json_header.length % 4, 0);

    cursor.seek(SeekFrom::Current(i64::from(json_header.length)))?;
    let bin_header = ChunkHeader::read(&mut cursor)?;
    assert_eq!(bin_header.length % 4, 0);

    Ok(())
}

#[test]
fn json_chunk_pads_with_trailing_spaces() -> Result<()> {
    let mut glb = GlbWriter::new();
    glb.add_positions(&POSITIONS);
    glb.add_triangles(&TRIANGLES);

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let bytes = out.into_inner();

    let mut cursor = Cursor::new(bytes.as_slice());
    FileHeader::read(&mut cursor)?;
    let json_header = ChunkHeader::read(&mut cursor)?;
    let mut json_payload = vec![0u8; json_header.length as usize];
    cursor.read_exact(&mut json_payload)?;

    // the payload may end in padding spaces and must still be valid JSON either way
    assert!(json_payload.last().is_some_and(|b| *b == b'}' || *b == b' '));
    serde_json::from_slice::<serde_json::Value>(&json_payload)?;

    Ok(())
}

#[test]
fn round_trip_recovers_accessors_and_attributes() -> Result<()> {
    let mut glb = GlbWriter::new();
    glb.add_positions(&POSITIONS);
    glb.add_triangles(&TRIANGLES);
    glb.add_tex_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    glb.add_vertex_colors(&[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [9, 9, 9, 255]]);

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let (_, document, bin) = parse_container(out.get_ref())?;

    let accessors = document["accessors"].as_array().expect("accessors array");
    assert_eq!(accessors.len(), 4);
    assert_eq!(accessors[0]["count"], 4);
    assert_eq!(accessors[0]["type"], "VEC3");
    assert_eq!(accessors[1]["count"], 6);
    assert_eq!(accessors[1]["type"], "SCALAR");

    let attributes = &document["meshes"][0]["primitives"][0]["attributes"];
    assert_eq!(attributes["POSITION"], 0);
    assert_eq!(attributes["TEXCOORD_0"], 2);
    assert_eq!(attributes["COLOR_0"], 3);
    assert!(attributes.get("NORMAL").is_none());
    assert_eq!(document["meshes"][0]["primitives"][0]["indices"], 1);
    assert_eq!(document["meshes"][0]["primitives"][0]["mode"], 4);

    // positions 48 + indices 12 + tex coords 32 + colors 16
    assert_eq!(document["buffers"][0]["byteLength"], 108);
    assert_eq!(bin.len(), 108);

    Ok(())
}

#[test]
fn bounds_cover_the_actual_extents() -> Result<()> {
    let mut glb = GlbWriter::new();
    glb.add_positions(&POSITIONS);
    glb.add_triangles(&TRIANGLES);

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let (_, document, _) = parse_container(out.get_ref())?;

    assert_eq!(
        document["accessors"][0]["min"],
        serde_json::json!([0.0, 0.0, -2.5])
    );
    assert_eq!(
        document["accessors"][0]["max"],
        serde_json::json!([1.0, 1.0, 0.0])
    );
    assert_eq!(document["accessors"][1]["min"], serde_json::json!([0]));
    assert_eq!(document["accessors"][1]["max"], serde_json::json!([3]));

    Ok(())
}

#[test]
fn buffer_holds_little_endian_attribute_bytes() -> Result<()> {
    let mut glb = GlbWriter::new();
    glb.add_positions(&[[1.0, -2.0, 3.5]]);
    glb.add_triangles(&[[0, 0, 0]]);

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let (_, document, bin) = parse_container(out.get_ref())?;

    assert_eq!(&bin[0..4], &1.0f32.to_le_bytes());
    assert_eq!(&bin[4..8], &(-2.0f32).to_le_bytes());
    assert_eq!(&bin[8..12], &3.5f32.to_le_bytes());

    let views = document["bufferViews"].as_array().expect("buffer views");
    assert_eq!(views[0]["byteOffset"], 0);
    assert_eq!(views[0]["byteLength"], 12);
    assert_eq!(views[1]["byteOffset"], 12);
    assert_eq!(views[1]["byteLength"], 6);

    Ok(())
}

#[test]
fn empty_attributes_leave_no_trace() -> Result<()> {
    let mut glb = GlbWriter::new();
    glb.add_positions(&POSITIONS);
    glb.add_triangles(&TRIANGLES);
    glb.add_tex_coords(&[]);
    glb.add_normals(&[]);
    glb.add_vertex_colors(&[[128, 128, 128, 255]]); // a lone filler record

    let mut out = Cursor::new(Vec::new());
    glb.finish(&mut out)?;
    let (_, document, _) = parse_container(out.get_ref())?;

    assert_eq!(document["accessors"].as_array().map(Vec::len), Some(2));
    let attributes = &document["meshes"][0]["primitives"][0]["attributes"];
    assert!(attributes.get("TEXCOORD_0").is_none());
    assert!(attributes.get("NORMAL").is_none());
    assert!(attributes.get("COLOR_0").is_none());

    Ok(())
}
