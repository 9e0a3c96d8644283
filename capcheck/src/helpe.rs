pub use std::{
    collections::HashSet,
    path::PathBuf,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use rayon::prelude::*;
pub use indexmap::IndexMap;
pub use clap::Parser;

pub use crate::{CapacityReport,
    check::*,
    variant::*,
};

/// The unit for measuring pool capacities. The tool prints kilobytes
/// as decimal floats with one digit after the point, and that is the
/// precision everything downstream renders with.
///
/// Double width on purpose: two of the checks are tolerance-sensitive,
/// and the values come from text anyway.
pub type Kilobytes = f64;

#[derive(Error, Debug)]
/// Appears while decoding a captured table into
/// [`CapacityReport`] rows. Structural problems only; a token that
/// fails to parse as a number is *not* one of these. It stays in the
/// row and surfaces later, at lookup.
pub enum TableError {
    /// The capture contained nothing at all, not even a header.
    #[error("empty capture: no header line found")]
    Empty,
    /// A header came through but no data lines followed it.
    #[error("header present but no data rows follow it")]
    NoRows,
    /// A data line disagrees with the header about its own width.
    #[error("row {row} carries {got} values, header declares {expect} columns")]
    RaggedRow {
        row:    usize,
        expect: usize,
        got:    usize,
    },
}

//---START EXTERNAL INTERFACES
// The types listed below implement interfaces to the sources a
// capacity table may come from.
//
// To write your own source, simply make sure that it satisfies the
// `ReportGen` trait.

/// Defines the interface for obtaining capacity reports.
///
/// For example: one type reads a previously captured table back from
/// a file, another decodes the raw stdout of a live tool run. Sources
/// differ in where their bytes come from, so construction is inherent
/// per type; decoding is what the trait pins down.
pub trait ReportGen<T> {
    /// Either every row of the table is successfully returned, or
    /// some arbitrary type that implements [std::error::Error].
    ///
    /// The exit status travels out-of-band from the table text and is
    /// stamped onto every row, since one process produced them all.
    fn read_reports(&self, exit_status: i32) -> Result<Vec<CapacityReport>, Box<dyn std::error::Error>>;
    /// Uses some available data to spawn one [CapacityReport]. We do
    /// not put any limitations on what that data may look like.
    fn gen_single(&self, d: T, exit_status: i32) -> CapacityReport;
}

/// The raw stdout of a tool run, held in memory: one line of
/// whitespace-separated column names, then one or more lines of
/// whitespace-separated value tokens in the same column order.
pub struct CapturedTable {
    pub raw: String,
}

impl ReportGen<(&[String], &[&str])> for CapturedTable {
    fn read_reports(&self, exit_status: i32) -> Result<Vec<CapacityReport>, Box<dyn std::error::Error>> {
        let mut lines = self.raw.lines()
            .filter(|l| !l.trim().is_empty());
        let header: Vec<String> = match lines.next() {
            Some(l) => {
                l.split_whitespace()
                    .map(String::from)
                    .collect()
            },
            None    => { return Err(Box::new(TableError::Empty)); }
        };
        let mut res = vec![];
        for (row, line) in lines.enumerate() {
            let toks: Vec<&str> = line.split_whitespace().collect();
            if toks.len() != header.len() {
                return Err(Box::new(TableError::RaggedRow {
                    row,
                    expect: header.len(),
                    got:    toks.len(),
                }));
            }
            res.push(self.gen_single((&header, &toks), exit_status));
        }
        if res.is_empty() {
            return Err(Box::new(TableError::NoRows));
        }

        Ok(res)
    }

    fn gen_single(&self, (names, toks): (&[String], &[&str]), exit_status: i32) -> CapacityReport {
        // Widths were matched against the header above, hence zip_eq.
        let values: IndexMap<String, String> = names.iter()
            .cloned()
            .zip_eq(toks.iter().map(|t| t.to_string()))
            .collect();

        CapacityReport::new(values, exit_status)
    }
}

/// Reads a previously captured table back from disk. Decoding is
/// delegated to [CapturedTable] so that there is exactly one parsing
/// core to get wrong.
pub struct TableFileParser {
    pub path: PathBuf,
}

impl ReportGen<(&[String], &[&str])> for TableFileParser {
    fn read_reports(&self, exit_status: i32) -> Result<Vec<CapacityReport>, Box<dyn std::error::Error>> {
        let path = self.path.as_path();
        match std::fs::metadata(path) {
            Ok(_)   => {
                let raw = std::fs::read_to_string(path)?;
                CapturedTable { raw }.read_reports(exit_status)
            },
            Err(e)  => { Err(Box::new(e)) }
        }
    }

    fn gen_single(&self, d: (&[String], &[&str]), exit_status: i32) -> CapacityReport {
        CapturedTable { raw: String::new() }.gen_single(d, exit_status)
    }
}
//---END EXTERNAL INTERFACES

pub fn read_from_path(file_path: PathBuf, exit_status: i32) -> Result<Vec<CapacityReport>, Box<dyn std::error::Error>> {
    let parser = TableFileParser { path: file_path };
    let reports = parser.read_reports(exit_status)?;

    Ok(reports)
}
