use crate::adapter::mvt::parser::TileParser;
use crate::schema::geometry::vertex::VertexBuffer;
use crate::schema::tile::config::DecodeConfig;
use crate::schema::tile::error::DecodeError;
use crate::schema::tile::identity::{TileId, TileLabel};
use crate::schema::tile::result::{ParseSummary, TileParseResult};
use crate::schema::tile::state::{LifecycleFlag, TileCancellation, TileState};
use crate::use_case::interface::TileParseObserver;

use chrono::Utc;
use log::{debug, error};
use thread_id;

use std::result::Result;
use std::vec::Vec;


/// One addressable tile and its decoded contents. The lifecycle flag
/// is shared with cancellation handles, so a tile that another thread
/// obsoletes mid parse finishes as cancelled instead of ready.
pub struct Tile {
    id: TileId,
    label: TileLabel,
    flag: LifecycleFlag,
    data: Option<Vec<u8>>,
    vertices: VertexBuffer,
}

impl Tile {
    pub fn new(id: TileId) -> Tile {
        Tile {
            id,
            label: id.label(),
            flag: LifecycleFlag::new(),
            data: None,
            vertices: VertexBuffer::new(),
        }
    }

    pub fn id(&self) -> &TileId {
        &self.id
    }

    pub fn label(&self) -> &str {
        self.label.to_str()
    }

    pub fn state(&self) -> TileState {
        self.flag.state()
    }

    /// Assigns the raw bytes to decode. The data belongs to the tile
    /// for its whole lifetime and cannot be replaced.
    pub fn set_data(&mut self, data: &[u8]) -> () {
        assert!(self.data.is_none(), "Tile data can only be assigned once");
        self.data = Some(data.to_vec());
    }

    /// Hands out a handle that can obsolete this tile from another
    /// thread without borrowing it.
    pub fn cancellation(&self) -> TileCancellation {
        self.flag.cancellation()
    }

    pub fn cancel(&self) -> () {
        self.cancellation().cancel();
    }

    /// Decoded vertices, available only while the tile is ready.
    pub fn vertices(&self) -> Option<&VertexBuffer> {
        if self.flag.state() == TileState::Ready {
            return Some(&self.vertices);
        } else {
            return None;
        }
    }

    pub fn parse(&mut self, config: &DecodeConfig) -> TileParseResult {
        let before_timestamp = Utc::now();
        let result = self.try_parse(config);
        let after_timestamp = Utc::now();
        if let Err(err) = &result {
            self.vertices.clear();
            self.flag.mark_obsolete();
            error!("Tile::parse - decoding tile {} failed: {}", self.label.to_str(), err);
        }
        return TileParseResult {
            before_timestamp,
            after_timestamp,
            result,
        };
    }

    pub fn parse_and_observe(
        &mut self,
        config: &DecodeConfig,
        observers: &mut [&mut dyn TileParseObserver],
    ) -> TileParseResult {
        let parse_result = self.parse(config);
        for observer in observers.iter_mut() {
            observer.on_parse(&self.id, &parse_result);
        }
        return parse_result;
    }

    fn try_parse(&mut self, config: &DecodeConfig) -> Result<ParseSummary, DecodeError> {
        match self.flag.state() {
            TileState::Obsolete => {
                return Err(DecodeError::Cancelled);
            },
            TileState::Ready => {
                debug!("Tile::parse - tile {} is already decoded", self.label.to_str());
                return Ok(ParseSummary::new());
            },
            TileState::Initial => (),
        }
        let data = match &self.data {
            Some(data) => data,
            None => {
                return Err(DecodeError::MissingData);
            },
        };
        debug!(
            "Tile::parse - start decoding tile {} on thread {}",
            self.label.to_str(),
            thread_id::get(),
        );
        let parser = TileParser::new(config, self.id.z);
        let summary = parser.parse(data.as_slice(), &self.flag, &mut self.vertices)?;
        if !(self.flag.mark_ready()) {
            return Err(DecodeError::Cancelled);
        }
        debug!(
            "Tile::parse - finish decoding tile {} with {} vertices on thread {}",
            self.label.to_str(),
            summary.vertices,
            thread_id::get(),
        );
        return Ok(summary);
    }
}
