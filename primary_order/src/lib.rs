/*!
Ranking of states for the order of the primary elections.

The states that had the closest race in the previous election are the best
indicators of the national mood, and should vote first. Optionally, the share of
each state in the electoral college can be added to the score.

```
use primary_order::{Methodology, RegionRecord, Tally};

let mut tally = Tally::new();
tally.load(&[
    RegionRecord::new("A", "60", "40", "10"),
    RegionRecord::new("B", "51", "49", "20"),
])?;
tally.set_methodology(Methodology::DeltaAndEc);

let ranking = tally.rank();
assert_eq!(ranking[0].region.name(), "B");
println!("{}", primary_order::render_report(&ranking));
# Ok::<(), primary_order::LoadError>(())
```

See the [manual] for the details of the scoring.
*/

mod config;
pub mod manual;
mod region;

use log::{debug, info};

pub use crate::config::*;
pub use crate::region::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TallyState {
    Empty,
    Loaded,
}

/// The collection of all the regions, with the methodology used to score them.
///
/// The methodology and the total electoral weight are read each time a score is
/// computed: changing the methodology after a load changes all the following
/// rankings, without reloading.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Tally {
    methodology: Methodology,
    total_electoral_weight: u64,
    // In the order of the input rows.
    regions: Vec<Region>,
    loaded: bool,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    /// Replaces the content of the tally with the given rows.
    ///
    /// The load is all or nothing: if any row fails, the error is returned and
    /// the tally is left as it was before the call.
    pub fn load(&mut self, rows: &[RegionRecord]) -> Result<(), LoadError> {
        info!("Loading {:?} regions", rows.len());
        let mut regions: Vec<Region> = Vec::with_capacity(rows.len());
        let mut total_electoral_weight: u64 = 0;
        for (row, record) in rows.iter().enumerate() {
            let region = Region::from_record(record).map_err(|cause| LoadError {
                row,
                name: record.name.clone(),
                cause,
            })?;
            total_electoral_weight = total_electoral_weight
                .checked_add(region.electoral_weight())
                .ok_or_else(|| LoadError {
                    row,
                    name: record.name.clone(),
                    cause: RegionError::InvalidInput {
                        field: "EC",
                        value: record.ec.clone(),
                    },
                })?;
            regions.push(region);
        }
        debug!(
            "load: {:?} regions, total electoral weight: {:?}",
            regions.len(),
            total_electoral_weight
        );
        self.regions = regions;
        self.total_electoral_weight = total_electoral_weight;
        self.loaded = true;
        Ok(())
    }

    pub fn set_methodology(&mut self, methodology: Methodology) {
        debug!("set_methodology: {:?}", methodology);
        self.methodology = methodology;
    }

    pub fn methodology(&self) -> Methodology {
        self.methodology
    }

    pub fn total_electoral_weight(&self) -> u64 {
        self.total_electoral_weight
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Loaded after any successful load, even one without rows.
    pub fn state(&self) -> TallyState {
        if self.loaded {
            TallyState::Loaded
        } else {
            TallyState::Empty
        }
    }

    /// A snapshot of the current scoring parameters.
    pub fn scoring_context(&self) -> ScoringContext {
        ScoringContext {
            methodology: self.methodology,
            total_electoral_weight: self.total_electoral_weight,
        }
    }

    pub fn score_of(&self, region: &Region) -> f64 {
        region.compute_score(&self.scoring_context())
    }

    /// All the regions, by decreasing score.
    ///
    /// Regions with the same score stay in the order of the input.
    pub fn rank(&self) -> Vec<RankedRegion<'_>> {
        let ctx = self.scoring_context();
        let mut ranking: Vec<RankedRegion> = self
            .regions
            .iter()
            .map(|region| RankedRegion {
                region,
                score: region.compute_score(&ctx),
            })
            .collect();
        // sort_by is stable.
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranking
    }
}

/// The header of the report, followed by the separator line.
pub fn report_header() -> String {
    let header = format!(
        "{:<nw$} {:>sw$} {:>sw$}",
        "NAME (EC)",
        "SCORE",
        "DELTA",
        nw = NAME_WIDTH,
        sw = NUMBER_WIDTH
    );
    let rule = "_".repeat(header.chars().count());
    format!("{}\n{}", header, rule)
}

/// The full text report for a ranking, one line per region.
pub fn render_report(ranking: &[RankedRegion]) -> String {
    let mut lines: Vec<String> = vec![report_header()];
    lines.extend(ranking.iter().map(|r| r.to_string()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn two_regions() -> Vec<RegionRecord> {
        vec![
            RegionRecord::new("A", "60", "40", "10"),
            RegionRecord::new("B", "51", "49", "20"),
        ]
    }

    fn names(ranking: &[RankedRegion]) -> Vec<String> {
        ranking
            .iter()
            .map(|r| r.region.name().to_string())
            .collect()
    }

    #[test]
    fn empty_tally() {
        init();
        let tally = Tally::new();
        assert_eq!(tally.state(), TallyState::Empty);
        assert_eq!(tally.total_electoral_weight(), 0);
        assert!(tally.rank().is_empty());
    }

    #[test]
    fn rank_delta_only() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        assert_eq!(tally.state(), TallyState::Loaded);
        assert_eq!(tally.total_electoral_weight(), 30);
        let ranking = tally.rank();
        assert_eq!(names(&ranking), vec!["B", "A"]);
        assert!((ranking[0].score - 9.8).abs() < 1e-9);
        assert!((ranking[1].score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn rank_delta_and_ec() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        let before = tally.rank();
        let margin_before = before[0].score - before[1].score;

        let mut tally2 = tally.clone();
        tally2.set_methodology(Methodology::DeltaAndEc);
        let after = tally2.rank();
        assert_eq!(names(&after), vec!["B", "A"]);
        assert!((after[0].score - 16.4666666667).abs() < 1e-6);
        assert!((after[1].score - 11.3333333333).abs() < 1e-6);
        assert!(after[0].score - after[1].score > margin_before);
    }

    #[test]
    fn methodology_is_read_live() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        let a = tally.regions()[0].clone();
        assert!((tally.score_of(&a) - 8.0).abs() < 1e-9);
        tally.set_methodology(Methodology::DeltaAndEc);
        assert!((tally.score_of(&a) - 11.3333333333).abs() < 1e-6);
    }

    #[test]
    fn weight_can_reorder() {
        init();
        let mut tally = Tally::new();
        tally
            .load(&[
                RegionRecord::new("Small", "50", "50", "1"),
                RegionRecord::new("Big", "55", "45", "99"),
            ])
            .unwrap();
        assert_eq!(names(&tally.rank()), vec!["Small", "Big"]);
        tally.set_methodology(Methodology::DeltaAndEc);
        assert_eq!(names(&tally.rank()), vec!["Big", "Small"]);
    }

    #[test]
    fn ties_keep_input_order() {
        init();
        let mut tally = Tally::new();
        tally
            .load(&[
                RegionRecord::new("First", "10", "20", "3"),
                RegionRecord::new("Second", "50", "50", "3"),
                RegionRecord::new("Third", "20", "10", "3"),
                RegionRecord::new("First", "10", "20", "3"),
            ])
            .unwrap();
        let ranking = tally.rank();
        assert_eq!(names(&ranking), vec!["Second", "First", "Third", "First"]);
        // The ranking is a permutation of the regions, by non-increasing score.
        assert_eq!(ranking.len(), tally.regions().len());
        assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
        // Ranking does not touch the tally.
        assert_eq!(ranking, tally.rank());
        assert_eq!(tally.regions()[0].name(), "First");
        assert_eq!(tally.regions()[1].name(), "Second");
    }

    #[test]
    fn reload_replaces() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        tally
            .load(&[RegionRecord::new("C", "1", "2", "7")])
            .unwrap();
        assert_eq!(tally.regions().len(), 1);
        assert_eq!(tally.total_electoral_weight(), 7);
    }

    #[test]
    fn failed_first_load_stays_empty() {
        init();
        let mut tally = Tally::new();
        let res = tally.load(&[
            RegionRecord::new("A", "60", "40", "10"),
            RegionRecord::new("Nowhere", "0", "0", "5"),
        ]);
        let err = res.unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(
            err.cause,
            RegionError::DegenerateRegion {
                name: "Nowhere".to_string()
            }
        );
        assert_eq!(tally.state(), TallyState::Empty);
        assert_eq!(tally.total_electoral_weight(), 0);
        assert!(tally.rank().is_empty());
    }

    #[test]
    fn failed_reload_keeps_previous() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        let before = tally.clone();
        let res = tally.load(&[
            RegionRecord::new("C", "1", "2", "7"),
            RegionRecord::new("D", "1", "two", "7"),
        ]);
        assert!(matches!(
            res,
            Err(LoadError {
                row: 1,
                cause: RegionError::InvalidInput { field: "Rep", .. },
                ..
            })
        ));
        assert_eq!(tally, before);
    }

    #[test]
    fn total_weight_overflow_fails_the_load() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        let before = tally.clone();
        let huge = u64::MAX.to_string();
        let res = tally.load(&[
            RegionRecord::new("A", "60", "40", &huge),
            RegionRecord::new("B", "51", "49", "20"),
        ]);
        match res {
            Err(LoadError { row, cause, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(
                    cause,
                    RegionError::InvalidInput {
                        field: "EC",
                        value: "20".to_string()
                    }
                );
            }
            x => panic!("unexpected result {:?}", x),
        }
        assert_eq!(tally, before);

        // A single maximal weight still fits.
        tally
            .load(&[RegionRecord::new("A", "60", "40", &huge)])
            .unwrap();
        assert_eq!(tally.total_electoral_weight(), u64::MAX);
    }

    #[test]
    fn load_without_rows() {
        init();
        let mut tally = Tally::new();
        tally.load(&[]).unwrap();
        assert_eq!(tally.state(), TallyState::Loaded);
        assert_eq!(tally.total_electoral_weight(), 0);
        assert!(tally.rank().is_empty());
    }

    #[test]
    fn report() {
        init();
        let mut tally = Tally::new();
        tally.load(&two_regions()).unwrap();
        let report = render_report(&tally.rank());
        let expected = [
            "NAME (EC)               SCORE    DELTA",
            "______________________________________",
            "B (20)                   9.80    2.00%",
            "A (10)                   8.00   20.00%",
        ]
        .join("\n");
        assert_eq!(report, expected);
    }

    #[test]
    fn empty_report() {
        let report = render_report(&[]);
        assert_eq!(report, report_header());
        assert_eq!(report.lines().nth(1).map(|l| l.len()), Some(38));
    }
}
