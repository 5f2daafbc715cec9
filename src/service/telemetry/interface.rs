use crate::schema::tile::state::TileState;

#[cfg(test)]
use mockall::{automock, predicate::*};

use std::ops::Range;
use std::vec::Vec;


#[cfg_attr(test, automock)]
pub trait ParseMetrics {
    fn iterate_final_states(&self) -> Vec<TileState>;

    fn iterate_valid_zoom_levels(&self) -> Range<u32>;

    fn count_parse_by_state(&self, state: &TileState) -> u64;

    fn count_parse_by_zoom_level(&self, zoom: u32) -> u64;

    fn count_total_parse(&self) -> u64;

    fn tally_total_parse_duration(&self) -> u64;

    fn tally_parse_duration_by_zoom_level(&self, zoom: u32) -> u64;

    fn count_total_vertex(&self) -> u64;

    fn count_vertex_by_zoom_level(&self, zoom: u32) -> u64;
}
