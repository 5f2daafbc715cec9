use crate::schema::tile::state::TileState;
use crate::schema::tile::statistics::ParseStatistics;
use crate::service::telemetry::interface::ParseMetrics;


/// Builds the aggregated statistics report from whichever metrics
/// implementation is wired in.
pub struct StatisticsReporter<'r> {
    metrics: &'r dyn ParseMetrics,
}

impl<'r> StatisticsReporter<'r> {
    pub fn new(metrics: &'r dyn ParseMetrics) -> StatisticsReporter<'r> {
        StatisticsReporter {
            metrics,
        }
    }

    pub fn report(&self) -> ParseStatistics {
        let mut result = ParseStatistics::new();
        for state in self.metrics.iterate_final_states() {
            let count = self.metrics.count_parse_by_state(&state);
            match state {
                TileState::Ready => { result.number_parse_ready = count; },
                TileState::Obsolete => { result.number_parse_obsolete = count; },
                TileState::Initial => (),
            }
        }
        for zoom_level in self.metrics.iterate_valid_zoom_levels() {
            let parse_count = self.metrics.count_parse_by_zoom_level(zoom_level);
            result.number_parse_by_zoom[zoom_level as usize] = parse_count;
            let parse_duration = self.metrics.tally_parse_duration_by_zoom_level(zoom_level);
            result.duration_parse_by_zoom[zoom_level as usize] = parse_duration;
            let vertex_count = self.metrics.count_vertex_by_zoom_level(zoom_level);
            result.number_vertex_by_zoom[zoom_level as usize] = vertex_count;
        }
        result.total_number_parse = self.metrics.count_total_parse();
        result.total_duration_parse = self.metrics.tally_total_parse_duration();
        result.total_number_vertex = self.metrics.count_total_vertex();
        return result;
    }
}
