// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// One row of the region table, as handed over by the readers.
///
/// The numeric fields are kept as text: parsing them is part of building
/// a [crate::Region], so that a bad row is reported the same way whatever
/// the source format.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegionRecord {
    pub name: String,
    pub dem: String,
    pub rep: String,
    pub ec: String,
}

impl RegionRecord {
    pub fn new(name: &str, dem: &str, rep: &str, ec: &str) -> RegionRecord {
        RegionRecord {
            name: name.to_string(),
            dem: dem.to_string(),
            rep: rep.to_string(),
            ec: ec.to_string(),
        }
    }
}

// ********* Configuration **********

/// The scoring formula applied to every region of a tally.
///
/// - DeltaOnly only looks at how close the previous race was.
///
/// - DeltaAndEc adds the share of the electoral weight held by the region
/// to the closeness of the race. The two terms are summed as they are,
/// without any rescaling.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum Methodology {
    #[default]
    DeltaOnly,
    DeltaAndEc,
}

impl Methodology {
    pub const ALL: [Methodology; 2] = [Methodology::DeltaOnly, Methodology::DeltaAndEc];

    /// The name used on the command line and in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Methodology::DeltaOnly => "delta",
            Methodology::DeltaAndEc => "delta_ec",
        }
    }
}

impl Display for Methodology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Methodology {
    type Err = UnknownMethodology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Methodology::ALL
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| UnknownMethodology(s.to_string()))
    }
}

// ******** Errors *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnknownMethodology(pub String);

impl Error for UnknownMethodology {}

impl Display for UnknownMethodology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown methodology {:?} (expected one of: delta, delta_ec)",
            self.0
        )
    }
}

/// Errors that prevent a region from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RegionError {
    /// A numeric field is not a non-negative integer.
    InvalidInput { field: &'static str, value: String },
    /// Both parties received zero votes: the delta is undefined.
    DegenerateRegion { name: String },
}

impl Error for RegionError {}

impl Display for RegionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionError::InvalidInput { field, value } => {
                write!(f, "invalid value {:?} for field {}", value, field)
            }
            RegionError::DegenerateRegion { name } => {
                write!(f, "region {:?} has no votes for either party", name)
            }
        }
    }
}

/// A failure while loading rows into a tally. The whole load is aborted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LoadError {
    /// Position of the offending row, starting at 0.
    pub row: usize,
    pub name: String,
    pub cause: RegionError,
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to load row {} ({:?}): {}",
            self.row, self.name, self.cause
        )
    }
}
