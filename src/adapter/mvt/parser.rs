use crate::adapter::mvt::geometry::{GeometryDecoder, GeometryElement};
use crate::adapter::mvt::reader::PbfReader;
use crate::schema::geometry::vertex::VertexBuffer;
use crate::schema::tile::config::DecodeConfig;
use crate::schema::tile::error::DecodeError;
use crate::schema::tile::result::ParseSummary;
use crate::schema::tile::state::{LifecycleFlag, TileState};

use log::debug;

use std::result::Result;


pub const TILE_FIELD_LAYER: u64 = 3;
pub const LAYER_FIELD_NAME: u64 = 1;
pub const LAYER_FIELD_FEATURE: u64 = 2;
pub const FEATURE_FIELD_ID: u64 = 1;
pub const FEATURE_FIELD_TAGS: u64 = 2;
pub const FEATURE_FIELD_TYPE: u64 = 3;
pub const FEATURE_FIELD_GEOMETRY: u64 = 4;

/// Structural decoder for one tile message. Layers are gated against
/// the configured zoom ranges before their features are decoded, and
/// the lifecycle flag is polled between top level fields so an
/// obsolete tile stops decoding early.
pub struct TileParser<'c> {
    config: &'c DecodeConfig,
    zoom: u32,
}

impl<'c> TileParser<'c> {
    pub fn new(
        config: &'c DecodeConfig,
        zoom: u32,
    ) -> TileParser<'c> {
        TileParser {
            config,
            zoom,
        }
    }

    pub fn parse(
        &self,
        buffer: &[u8],
        flag: &LifecycleFlag,
        output: &mut VertexBuffer,
    ) -> Result<ParseSummary, DecodeError> {
        let mut summary = ParseSummary::new();
        let mut reader = PbfReader::new(buffer);
        loop {
            if flag.state() == TileState::Obsolete {
                return Err(DecodeError::Cancelled);
            }
            if !reader.advance()? {
                break;
            }
            if reader.tag() == TILE_FIELD_LAYER {
                let layer = reader.read_length_delimited()?;
                self.parse_layer(layer, output, &mut summary)?;
                reader.skip_bytes(layer.len())?;
            } else {
                reader.skip_field()?;
            }
        }
        return Ok(summary);
    }

    // The layer name can be encoded after the features it applies to,
    // so the buffer is walked twice. The first pass only resolves the
    // name, then the gated second pass decodes features.
    fn parse_layer(
        &self,
        buffer: &[u8],
        output: &mut VertexBuffer,
        summary: &mut ParseSummary,
    ) -> Result<(), DecodeError> {
        // A missing name field reads as an empty name, which decodes
        // under an empty config table but never matches a named entry.
        let name = match read_layer_name(buffer)? {
            Some(name) => name,
            None => String::new(),
        };
        if !(self.config.is_layer_wanted(name.as_str(), self.zoom)) {
            debug!("TileParser::parse_layer - skipping layer {} at zoom level {}", name, self.zoom);
            summary.layers_skipped += 1;
            return Ok(());
        }
        let mut reader = PbfReader::new(buffer);
        while reader.advance()? {
            if reader.tag() == LAYER_FIELD_FEATURE {
                let feature = reader.read_length_delimited()?;
                self.parse_feature(feature, output, summary)?;
                reader.skip_bytes(feature.len())?;
            } else {
                reader.skip_field()?;
            }
        }
        summary.layers += 1;
        return Ok(());
    }

    fn parse_feature(
        &self,
        buffer: &[u8],
        output: &mut VertexBuffer,
        summary: &mut ParseSummary,
    ) -> Result<(), DecodeError> {
        let mut reader = PbfReader::new(buffer);
        while reader.advance()? {
            match reader.tag() {
                FEATURE_FIELD_ID => {
                    reader.read_varint()?;
                },
                FEATURE_FIELD_TAGS => {
                    let tags = reader.read_length_delimited()?;
                    parse_tag_list(tags)?;
                    reader.skip_bytes(tags.len())?;
                },
                FEATURE_FIELD_TYPE => {
                    reader.read_varint()?;
                },
                FEATURE_FIELD_GEOMETRY => {
                    let geometry = reader.read_length_delimited()?;
                    decode_geometry(geometry, output, summary)?;
                    reader.skip_bytes(geometry.len())?;
                },
                _ => {
                    reader.skip_field()?;
                },
            }
        }
        summary.features += 1;
        return Ok(());
    }
}

fn read_layer_name(buffer: &[u8]) -> Result<Option<String>, DecodeError> {
    let mut reader = PbfReader::new(buffer);
    while reader.advance()? {
        if reader.tag() == LAYER_FIELD_NAME {
            return Ok(Some(reader.read_string()?));
        } else {
            reader.skip_field()?;
        }
    }
    return Ok(None);
}

// Tag lists pair a key index with a value index. The indices are not
// resolved here, but a list that ends mid pair is still malformed.
fn parse_tag_list(buffer: &[u8]) -> Result<(), DecodeError> {
    let mut reader = PbfReader::new(buffer);
    while reader.remaining() > 0 {
        reader.read_varint()?;
        reader.read_varint()?;
    }
    return Ok(());
}

fn decode_geometry(
    buffer: &[u8],
    output: &mut VertexBuffer,
    summary: &mut ParseSummary,
) -> Result<(), DecodeError> {
    let mut decoder = GeometryDecoder::new(buffer);
    while let Some(element) = decoder.next()? {
        match element {
            GeometryElement::MoveTo { x, y } => {
                output.add_path_break();
                output.add_vertex(x, y);
                summary.vertices += 1;
            },
            GeometryElement::LineTo { x, y } => {
                output.add_vertex(x, y);
                summary.vertices += 1;
            },
            GeometryElement::ClosePath => (),
        }
    }
    return Ok(());
}
