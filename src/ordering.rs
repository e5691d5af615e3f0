mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

use log::{debug, info, warn};

use primary_order::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use crate::args::Args;
use crate::ordering::config_reader::*;

/// The table read when no input is given.
pub const DEFAULT_INPUT: &str = "election2016.csv";

#[derive(Debug, Snafu)]
pub enum OrderingError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The file {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Could not understand cell {cell} on row {lineno}"))]
    ExcelWrongCellType { cell: String, lineno: usize },
    #[snafu(display("Error opening CSV file {path}: {source}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file: {source}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} is missing some fields"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Column {column} not found in the header"))]
    MissingColumn { column: String },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    UnknownMethodology {
        source: primary_order::UnknownMethodology,
    },
    #[snafu(display("Unknown input type {input_type:?} (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("{path} doesn't seem to be a file"))]
    MissingSource { path: String },
    #[snafu(display("Could not find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Error loading {path}: {source}"))]
    Load { source: LoadError, path: String },
    #[snafu(display("Difference detected between the report and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type OrderingResult<T> = Result<T, OrderingError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    fn from_name(name: &str) -> OrderingResult<InputType> {
        match name {
            "csv" => Ok(InputType::Csv),
            "xlsx" => Ok(InputType::Xlsx),
            x => UnknownInputTypeSnafu { input_type: x }.fail(),
        }
    }

    fn from_path(path: &str) -> InputType {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => InputType::Xlsx,
            _ => InputType::Csv,
        }
    }
}

/// The options of a run, once the command line and the configuration file are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub input_type: InputType,
    pub worksheet_name: Option<String>,
    pub methodology: Methodology,
    pub out: Option<String>,
    pub reference: Option<String>,
}

// The command line takes precedence over the configuration file.
fn resolve_settings(args: &Args) -> OrderingResult<RunSettings> {
    let config: Option<OrderingConfig> = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    debug!("resolve_settings: config: {:?}", config);
    let source: Option<&FileSource> = config.as_ref().and_then(|c| c.source.as_ref());

    let input_path: String = match (&args.input, source, &args.config) {
        (Some(p), _, _) => p.clone(),
        (None, Some(src), Some(config_path)) => {
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?;
            let p: PathBuf = [root, Path::new(&src.file_path)].iter().collect();
            p.as_path().display().to_string()
        }
        _ => DEFAULT_INPUT.to_string(),
    };

    let input_type_name: Option<String> = args
        .input_type
        .clone()
        .or_else(|| source.and_then(|s| s.provider.clone()));
    let input_type = match input_type_name {
        Some(name) => InputType::from_name(&name)?,
        None => InputType::from_path(&input_path),
    };

    let worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or_else(|| source.and_then(|s| s.worksheet_name.clone()));

    let method_name: Option<String> = args
        .method
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.method.clone()));
    let methodology = match method_name {
        Some(name) => name
            .parse::<Methodology>()
            .context(UnknownMethodologySnafu {})?,
        None => Methodology::default(),
    };

    let out = args.out.clone().or_else(|| {
        config
            .as_ref()
            .and_then(|c| c.output_settings.as_ref())
            .and_then(|o| o.output_path.clone())
    });

    Ok(RunSettings {
        input_path,
        input_type,
        worksheet_name,
        methodology,
        out,
        reference: args.reference.clone(),
    })
}

fn check_source(path: &str) -> OrderingResult<()> {
    let p = Path::new(path);
    ensure!(p.is_file(), MissingSourceSnafu { path });
    Ok(())
}

fn read_region_data(settings: &RunSettings) -> OrderingResult<Vec<RegionRecord>> {
    info!(
        "Attempting to read region file {:?} ({:?})",
        settings.input_path, settings.input_type
    );
    match settings.input_type {
        InputType::Csv => io_csv::read_csv_regions(&settings.input_path),
        InputType::Xlsx => {
            io_xlsx::read_excel_regions(&settings.input_path, settings.worksheet_name.as_deref())
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub state: String,
    pub dem: u64,
    pub rep: u64,
    pub ec: u64,
    pub score: f64,
    pub delta: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankingSummary {
    pub source: String,
    pub methodology: String,
    #[serde(rename = "totalElectoralWeight")]
    pub total_electoral_weight: u64,
    pub results: Vec<RankedEntry>,
}

fn build_summary(source: &str, tally: &Tally, ranking: &[RankedRegion]) -> RankingSummary {
    RankingSummary {
        source: io_common::simplify_file_name(source),
        methodology: tally.methodology().to_string(),
        total_electoral_weight: tally.total_electoral_weight(),
        results: ranking
            .iter()
            .enumerate()
            .map(|(idx, r)| RankedEntry {
                rank: idx + 1,
                state: r.region.name().to_string(),
                dem: r.region.dem_votes(),
                rep: r.region.rep_votes(),
                ec: r.region.electoral_weight(),
                score: r.score,
                delta: r.region.competitiveness_delta(),
            })
            .collect(),
    }
}

/// Loads the regions and ranks them. Returns the text report and the summary.
pub fn compute_ranking(settings: &RunSettings) -> OrderingResult<(String, RankingSummary)> {
    check_source(&settings.input_path)?;
    let records = read_region_data(settings)?;
    debug!("compute_ranking: {:?} records", records.len());

    let mut tally = Tally::new();
    tally.set_methodology(settings.methodology);
    tally.load(&records).context(LoadSnafu {
        path: &settings.input_path,
    })?;
    info!(
        "Loaded {:?} regions, total electoral weight: {:?}, methodology: {}",
        tally.regions().len(),
        tally.total_electoral_weight(),
        tally.methodology()
    );

    let ranking = tally.rank();
    let report = render_report(&ranking);
    let summary = build_summary(&settings.input_path, &tally, &ranking);
    Ok((report, summary))
}

fn write_summary(out: &str, summary: &RankingSummary) -> OrderingResult<()> {
    let pretty_js = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })?;
    }
    Ok(())
}

fn check_reference(reference_path: &str, report: &str) -> OrderingResult<()> {
    let reference = read_reference(reference_path)?;
    if reference.trim_end() != report.trim_end() {
        warn!("Found differences with the reference report");
        print_diff(reference.trim_end(), report.trim_end(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    Ok(())
}

pub fn run_ordering(args: &Args) -> OrderingResult<()> {
    let settings = resolve_settings(args)?;
    info!("settings: {:?}", settings);

    let (report, summary) = compute_ranking(&settings)?;
    println!("{}", report);

    if let Some(out) = &settings.out {
        write_summary(out, &summary)?;
    }

    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &report)?;
    }
    Ok(())
}
