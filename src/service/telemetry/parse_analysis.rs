use crate::schema::tile::identity::{MAX_ZOOM, TileId};
use crate::schema::tile::result::{ParseSummary, TileParseResult};
use crate::schema::tile::state::TileState;
use crate::service::telemetry::interface::ParseMetrics;
use crate::use_case::interface::TileParseObserver;

use chrono::Duration;
use log::warn;

use std::collections::hash_map::HashMap;
use std::ops::Range;
use std::vec::Vec;


/// Accumulates per zoom level decoding measurements from observed
/// parse results and answers the metrics queries over them.
pub struct ParseAnalysis {
    parse_count_by_state_and_zoom: HashMap<TileState, Vec<u64>>,
    parse_duration_by_zoom: Vec<Duration>,
    vertex_count_by_zoom: Vec<u64>,
}

impl ParseAnalysis {
    pub fn new() -> ParseAnalysis {
        ParseAnalysis {
            parse_count_by_state_and_zoom: HashMap::new(),
            parse_duration_by_zoom: vec![Duration::zero(); (MAX_ZOOM + 1) as usize],
            vertex_count_by_zoom: vec![0; (MAX_ZOOM + 1) as usize],
        }
    }

    fn on_successful_parse(
        &mut self,
        id: &TileId,
        summary: &ParseSummary,
        parse_duration: &Duration,
    ) -> () {
        self.accrue_parse_duration(id, parse_duration);
        self.accrue_vertex_count(id, summary.vertices);
    }

    fn increment_parse_count(
        &mut self,
        state: &TileState,
        id: &TileId,
    ) -> () {
        if !(self.parse_count_by_state_and_zoom.contains_key(state)) {
            self.parse_count_by_state_and_zoom.insert(*state, vec![0; (MAX_ZOOM + 1) as usize]);
        }
        let count_by_zoom = self.parse_count_by_state_and_zoom.get_mut(state).unwrap();
        let zoom_level = id.z as usize;
        let zoom_limit = count_by_zoom.len();
        if zoom_level < zoom_limit {
            count_by_zoom[zoom_level] += 1;
        } else {
            warn!(
                "ParseAnalysis::increment_parse_count - tile zoom level {} exceeds limit {}",
                zoom_level, zoom_limit
            );
        }
    }

    fn accrue_parse_duration(
        &mut self,
        id: &TileId,
        parse_duration: &Duration,
    ) -> () {
        let zoom_level = id.z as usize;
        let zoom_limit = self.parse_duration_by_zoom.len();
        if zoom_level < zoom_limit {
            self.parse_duration_by_zoom[zoom_level] =
                self.parse_duration_by_zoom[zoom_level] + *parse_duration;
        } else {
            warn!(
                "ParseAnalysis::accrue_parse_duration - tile zoom level {} exceeds limit {}",
                zoom_level, zoom_limit
            );
        }
    }

    fn accrue_vertex_count(
        &mut self,
        id: &TileId,
        vertex_count: u64,
    ) -> () {
        let zoom_level = id.z as usize;
        let zoom_limit = self.vertex_count_by_zoom.len();
        if zoom_level < zoom_limit {
            self.vertex_count_by_zoom[zoom_level] += vertex_count;
        } else {
            warn!(
                "ParseAnalysis::accrue_vertex_count - tile zoom level {} exceeds limit {}",
                zoom_level, zoom_limit
            );
        }
    }
}

impl TileParseObserver for ParseAnalysis {
    fn on_parse(
        &mut self,
        id: &TileId,
        parse_result: &TileParseResult,
    ) -> () {
        match &parse_result.result {
            Ok(summary) => {
                let parse_duration = parse_result.after_timestamp - parse_result.before_timestamp;
                self.increment_parse_count(&TileState::Ready, id);
                self.on_successful_parse(id, summary, &parse_duration);
            },
            Err(_) => {
                self.increment_parse_count(&TileState::Obsolete, id);
            },
        }
    }
}

impl ParseMetrics for ParseAnalysis {
    fn iterate_final_states(&self) -> Vec<TileState> {
        self.parse_count_by_state_and_zoom.keys().cloned().collect()
    }

    fn iterate_valid_zoom_levels(&self) -> Range<u32> {
        Range {
            start: 0,
            end: MAX_ZOOM + 1,
        }
    }

    fn count_parse_by_state(&self, state: &TileState) -> u64 {
        if self.parse_count_by_state_and_zoom.contains_key(state) {
            self.parse_count_by_state_and_zoom[state].iter().sum()
        } else {
            0
        }
    }

    fn count_parse_by_zoom_level(&self, zoom: u32) -> u64 {
        let mut total = 0;
        for count_by_zoom in self.parse_count_by_state_and_zoom.values() {
            if count_by_zoom.len() > (zoom as usize) {
                total += count_by_zoom[zoom as usize];
            }
        }
        return total;
    }

    fn count_total_parse(&self) -> u64 {
        let mut total = 0;
        for count_by_zoom in self.parse_count_by_state_and_zoom.values() {
            total += count_by_zoom.iter().sum::<u64>();
        }
        return total;
    }

    fn tally_total_parse_duration(&self) -> u64 {
        let total_duration = self.parse_duration_by_zoom.iter().fold(
            Duration::zero(),
            |acc, duration| acc + *duration
        );
        return duration_as_microseconds(&total_duration);
    }

    fn tally_parse_duration_by_zoom_level(&self, zoom: u32) -> u64 {
        if self.parse_duration_by_zoom.len() > (zoom as usize) {
            duration_as_microseconds(&self.parse_duration_by_zoom[zoom as usize])
        } else {
            0
        }
    }

    fn count_total_vertex(&self) -> u64 {
        self.vertex_count_by_zoom.iter().sum()
    }

    fn count_vertex_by_zoom_level(&self, zoom: u32) -> u64 {
        if self.vertex_count_by_zoom.len() > (zoom as usize) {
            self.vertex_count_by_zoom[zoom as usize]
        } else {
            0
        }
    }
}

fn duration_as_microseconds(duration: &Duration) -> u64 {
    match duration.num_microseconds() {
        Some(microseconds) => microseconds as u64,
        None => u64::MAX,
    }
}
