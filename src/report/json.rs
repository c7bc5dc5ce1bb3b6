use std::collections::BTreeMap;
use std::error::Error;

use serde::Serialize;

use crate::pipeline::BusFactorReport;
use crate::report_helpers;

pub fn print_report(report: &BusFactorReport) -> Result<(), Box<dyn Error>> {
    report_helpers::print_json_stdout(report)
}

pub fn print_graph(report: &BusFactorReport) -> Result<(), Box<dyn Error>> {
    report_helpers::print_json_stdout(&report.graph)
}

#[derive(Serialize)]
struct SharesJson<'a> {
    bus_factor: usize,
    key_contributors: &'a [String],
    files_per_contributor_with_percentages: &'a BTreeMap<String, BTreeMap<String, f64>>,
    key_file_sizes: &'a BTreeMap<String, BTreeMap<String, Option<usize>>>,
    all_files_with_sizes: &'a BTreeMap<String, usize>,
}

pub fn print_shares(report: &BusFactorReport) -> Result<(), Box<dyn Error>> {
    report_helpers::print_json_stdout(&SharesJson {
        bus_factor: report.bus_factor,
        key_contributors: &report.key_contributors,
        files_per_contributor_with_percentages: &report.files_per_contributor_with_percentages,
        key_file_sizes: &report.key_file_sizes,
        all_files_with_sizes: &report.all_files_with_sizes,
    })
}
