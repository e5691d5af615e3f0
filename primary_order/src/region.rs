use log::debug;

use std::fmt::Display;

use crate::config::*;

/// Fixed weighting applied to every score.
const SCORE_SCALAR: f64 = 10.0;

/// Width of the name column of the report.
pub(crate) const NAME_WIDTH: usize = 20;
/// Width of the score and delta columns of the report.
pub(crate) const NUMBER_WIDTH: usize = 8;

/// The state of the tally that a score depends on.
///
/// A tally hands out one snapshot per ranking, so that all the regions are
/// scored against the same methodology and the same total weight.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScoringContext {
    pub methodology: Methodology,
    pub total_electoral_weight: u64,
}

/// A state, with the result of its previous election.
#[derive(PartialEq, Debug, Clone)]
pub struct Region {
    name: String,
    dem: u64,
    rep: u64,
    ec: u64,
    // Invariant: in [0, 1]
    delta: f64,
}

impl Region {
    /// Builds a region out of the textual fields of a row.
    pub fn new(name: &str, dem: &str, rep: &str, ec: &str) -> Result<Region, RegionError> {
        let dem = parse_count("Dem", dem)?;
        let rep = parse_count("Rep", rep)?;
        let ec = parse_count("EC", ec)?;
        Region::from_counts(name, dem, rep, ec)
    }

    pub fn from_record(record: &RegionRecord) -> Result<Region, RegionError> {
        Region::new(&record.name, &record.dem, &record.rep, &record.ec)
    }

    pub fn from_counts(name: &str, dem: u64, rep: u64, ec: u64) -> Result<Region, RegionError> {
        if dem == 0 && rep == 0 {
            return Err(RegionError::DegenerateRegion {
                name: name.to_string(),
            });
        }
        // Computed in floating point: the sum of two counts may not fit in a u64.
        let delta = dem.abs_diff(rep) as f64 / (dem as f64 + rep as f64);
        debug!(
            "Region::from_counts: {:?} dem: {} rep: {} ec: {} delta: {}",
            name, dem, rep, ec, delta
        );
        Ok(Region {
            name: name.to_string(),
            dem,
            rep,
            ec,
            delta,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dem_votes(&self) -> u64 {
        self.dem
    }

    pub fn rep_votes(&self) -> u64 {
        self.rep
    }

    pub fn electoral_weight(&self) -> u64 {
        self.ec
    }

    /// The normalized gap between the two parties: 0 for a tie, close to 1 for
    /// a one-sided race.
    pub fn competitiveness_delta(&self) -> f64 {
        self.delta
    }

    /// The score of this region: higher scores should vote earlier.
    ///
    /// Under DeltaOnly, the score is in (0, 10]. Under DeltaAndEc, the share of
    /// the total electoral weight is added to the closeness of the race, which
    /// puts the score in (0, 20].
    pub fn compute_score(&self, ctx: &ScoringContext) -> f64 {
        let delta_strength = 1.0 - self.delta;
        match ctx.methodology {
            Methodology::DeltaOnly => SCORE_SCALAR * delta_strength,
            Methodology::DeltaAndEc => {
                // A region without weight never divides, even with an empty total.
                let ec_strength = if self.ec > 0 && ctx.total_electoral_weight > 0 {
                    self.ec as f64 / ctx.total_electoral_weight as f64
                } else {
                    0.0
                };
                SCORE_SCALAR * (ec_strength + delta_strength)
            }
        }
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u64, RegionError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| RegionError::InvalidInput {
            field,
            value: value.to_string(),
        })
}

/// A region with the score it received in a ranking.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RankedRegion<'a> {
    pub region: &'a Region,
    pub score: f64,
}

/// Formats the line of the report: the name and weight on 20 columns, then the
/// score and the delta (as a percentage) on 8 columns each.
impl Display for RankedRegion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fullname = format!("{} ({})", self.region.name, self.region.ec);
        let delta_percent = format!("{:.2}%", self.region.delta * 100.0);
        write!(
            f,
            "{:<nw$.nw$} {:>sw$.2} {:>sw$}",
            fullname,
            self.score,
            delta_percent,
            nw = NAME_WIDTH,
            sw = NUMBER_WIDTH
        )
    }
}
