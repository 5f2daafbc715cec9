use crate::schema::tile::identity::MAX_ZOOM;

use serde::Serialize;

use std::vec::Vec;


/// Aggregated report over every observed parse. Durations are tallied
/// in microseconds.
#[derive(Debug, PartialEq, Serialize)]
pub struct ParseStatistics {
    pub number_parse_ready: u64,
    pub number_parse_obsolete: u64,
    pub number_parse_by_zoom: Vec<u64>,
    pub duration_parse_by_zoom: Vec<u64>,
    pub number_vertex_by_zoom: Vec<u64>,
    pub total_number_parse: u64,
    pub total_duration_parse: u64,
    pub total_number_vertex: u64,
}

impl ParseStatistics {
    pub fn new() -> ParseStatistics {
        ParseStatistics {
            number_parse_ready: 0,
            number_parse_obsolete: 0,
            number_parse_by_zoom: vec![0; (MAX_ZOOM + 1) as usize],
            duration_parse_by_zoom: vec![0; (MAX_ZOOM + 1) as usize],
            number_vertex_by_zoom: vec![0; (MAX_ZOOM + 1) as usize],
            total_number_parse: 0,
            total_duration_parse: 0,
            total_number_vertex: 0,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
