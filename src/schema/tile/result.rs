use crate::schema::tile::error::DecodeError;

use chrono::{ DateTime, Utc, };


/// Counts accumulated over one successful traversal of a tile buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSummary {
    pub layers: u64,
    pub layers_skipped: u64,
    pub features: u64,
    pub vertices: u64,
}

impl ParseSummary {
    pub fn new() -> ParseSummary {
        ParseSummary {
            layers: 0,
            layers_skipped: 0,
            features: 0,
            vertices: 0,
        }
    }
}

pub struct TileParseResult {
    pub before_timestamp: DateTime<Utc>,
    pub after_timestamp: DateTime<Utc>,
    pub result: Result<ParseSummary, DecodeError>,
}

#[cfg(test)]
impl TileParseResult {
    pub fn expect_summary(self) -> ParseSummary {
        match self.result {
            Ok(summary) => summary,
            Err(reason) => panic!("Expected successful parse but failed: {}", reason),
        }
    }

    pub fn expect_error(self) -> DecodeError {
        match self.result {
            Ok(_) => panic!("Expected failed parse"),
            Err(reason) => reason,
        }
    }
}
