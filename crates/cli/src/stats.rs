//! Count-form statistics over path data files.
//!
//! Inputs are either CSV rows `x, y, path` (the apex where a search found
//! the path) or plain text with one path per line. Paths are cleaned of
//! stray characters, reduced to their count form, and tallied per form;
//! every non-minimal form also credits its minimal ancestor.

use anyhow::{bail, Context, Result};
use billiards::api::{counts_for_edge_path, EdgePath, PathCountForm};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::Path;

/// Tally of one count form.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStats {
    pub form: PathCountForm,
    /// Slot of the minimal ancestor when this form is not minimal itself.
    pub ancestor: Option<usize>,
    pub data_points: usize,
    pub descendant_data_points: usize,
    pub coords: Vec<(f64, f64)>,
    /// Cyclically adjacent entries with opposite signs.
    pub flip_count: usize,
}

impl PathStats {
    fn new(form: PathCountForm, ancestor: Option<usize>) -> Self {
        let counts = form.counts();
        let n = counts.len();
        let flip_count = (0..n)
            .filter(|&i| counts[i] * counts[(i + 1) % n] < 0)
            .count();
        Self {
            form,
            ancestor,
            data_points: 0,
            descendant_data_points: 0,
            coords: Vec::new(),
            flip_count,
        }
    }

    pub fn key(&self) -> String {
        self.form.to_string()
    }
}

/// Stats keyed by count form, in first-seen order.
#[derive(Debug, Default)]
pub struct PathStatsTable {
    entries: Vec<PathStats>,
    index: HashMap<PathCountForm, usize>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FormCount {
    pub form: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub data_points: usize,
    pub skipped_rows: usize,
    pub all_forms: Vec<FormCount>,
    pub minimal_forms: Vec<FormCount>,
}

impl PathStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PathStats] {
        &self.entries
    }

    pub fn get(&self, form: &PathCountForm) -> Option<&PathStats> {
        self.index.get(form).map(|&i| &self.entries[i])
    }

    /// Slot for `form`, creating it (and its ancestor's) on first sight.
    fn slot(&mut self, form: &PathCountForm) -> usize {
        if let Some(&i) = self.index.get(form) {
            return i;
        }
        let minimal = form.minimal_ancestor();
        let ancestor = (minimal != *form).then(|| self.slot(&minimal));
        let i = self.entries.len();
        self.entries.push(PathStats::new(form.clone(), ancestor));
        self.index.insert(form.clone(), i);
        i
    }

    /// Count one occurrence of `path`, optionally at apex `coords`.
    pub fn record(&mut self, path: &EdgePath, coords: Option<(f64, f64)>) -> &PathStats {
        let form = counts_for_edge_path(path);
        let i = self.slot(&form);
        let stats = &mut self.entries[i];
        stats.data_points += 1;
        stats.coords.extend(coords);
        if let Some(a) = stats.ancestor {
            self.entries[a].descendant_data_points += 1;
        }
        &self.entries[i]
    }

    /// Forms by data points, most frequent first.
    pub fn all_forms(&self) -> Vec<FormCount> {
        let mut sorted: Vec<&PathStats> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.data_points.cmp(&a.data_points));
        sorted
            .into_iter()
            .map(|s| FormCount {
                form: s.key(),
                count: s.data_points,
            })
            .collect()
    }

    /// Forms with descendants, by own plus descendant data points.
    pub fn minimal_forms(&self) -> Vec<FormCount> {
        let mut minimal: Vec<&PathStats> = self
            .entries
            .iter()
            .filter(|s| s.descendant_data_points > 0)
            .collect();
        minimal.sort_by_key(|s| std::cmp::Reverse(s.data_points + s.descendant_data_points));
        minimal
            .into_iter()
            .map(|s| FormCount {
                form: s.key(),
                count: s.data_points + s.descendant_data_points,
            })
            .collect()
    }

    /// One row per recorded coordinate: `x, y, path, fan_count, flip_count`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut paths = Vec::new();
        let mut fan_counts: Vec<u32> = Vec::new();
        let mut flip_counts: Vec<u32> = Vec::new();
        for stats in &self.entries {
            let key = stats.key();
            for &(x, y) in &stats.coords {
                xs.push(x);
                ys.push(y);
                paths.push(key.clone());
                fan_counts.push(stats.form.len() as u32);
                flip_counts.push(stats.flip_count as u32);
            }
        }
        df!(
            "x" => xs,
            "y" => ys,
            "path" => paths,
            "fan_count" => fan_counts,
            "flip_count" => flip_counts
        )
    }
}

/// Parse a data-file path, dropping everything but `L`/`R`.
fn clean_path(raw: &str) -> Option<EdgePath> {
    match EdgePath::parse_lenient(raw) {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::debug!(raw, %err, "skipping row without a path");
            None
        }
    }
}

/// Load `input` into `table`; returns `(data_points, skipped_rows)`.
pub fn load(table: &mut PathStatsTable, input: &Path) -> Result<(usize, usize)> {
    let is_csv = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_csv(table, input)
    } else {
        load_text(table, input)
    }
}

fn load_text(table: &mut PathStatsTable, input: &Path) -> Result<(usize, usize)> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let (mut used, mut skipped) = (0, 0);
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match clean_path(line) {
            Some(path) => {
                table.record(&path, None);
                used += 1;
            }
            None => skipped += 1,
        }
    }
    Ok((used, skipped))
}

fn load_csv(table: &mut PathStatsTable, input: &Path) -> Result<(usize, usize)> {
    // Every column as text: coordinates are validated per row below.
    let df = LazyCsvReader::new(input)
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", input.display()))?;
    if df.width() < 3 {
        bail!(
            "{}: expected at least 3 columns (x, y, path), found {}",
            input.display(),
            df.width()
        );
    }
    let columns = df.get_columns();
    let (xs, ys, paths) = (columns[0].str()?, columns[1].str()?, columns[2].str()?);
    let (mut used, mut skipped) = (0, 0);
    for ((x, y), raw) in xs.into_iter().zip(ys.into_iter()).zip(paths.into_iter()) {
        let coords = match (x.map(str::trim), y.map(str::trim)) {
            (Some(x), Some(y)) => x.parse::<f64>().ok().zip(y.parse::<f64>().ok()),
            _ => None,
        };
        let path = raw.and_then(clean_path);
        match (coords, path) {
            (Some(coords), Some(path)) => {
                table.record(&path, Some(coords));
                used += 1;
            }
            _ => skipped += 1,
        }
    }
    tracing::info!(rows = df.height(), used, skipped, "csv loaded");
    Ok((used, skipped))
}

/// Write the per-coordinate frame as CSV or (for `.parquet`) Parquet.
pub fn write_frame(table: &PathStatsTable, out: &Path) -> Result<()> {
    let mut df = table.to_frame()?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let is_parquet = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    }
    tracing::info!(out = %out.display(), rows = df.height(), "stats frame written");
    Ok(())
}

pub fn report(table: &PathStatsTable, data_points: usize, skipped_rows: usize) -> StatsReport {
    StatsReport {
        data_points,
        skipped_rows,
        all_forms: table.all_forms(),
        minimal_forms: table.minimal_forms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn path(s: &str) -> EdgePath {
        s.parse().unwrap()
    }

    #[test]
    fn descendants_credit_their_minimal_ancestor() {
        let mut table = PathStatsTable::new();
        table.record(&path("RRRLRRRLLLRLLL"), Some((0.5, 0.6)));
        table.record(&path("RRRLRRRLLLRLLL"), Some((0.5, 0.7)));
        table.record(&path("RLRLRL"), None);

        let top = table.get(&"-2 -2 2 2".parse().unwrap()).unwrap();
        assert_eq!(top.data_points, 2);
        assert_eq!(top.flip_count, 2);
        assert_eq!(top.coords, vec![(0.5, 0.6), (0.5, 0.7)]);
        let base = table.get(&"-1 -1 1 1".parse().unwrap()).unwrap();
        assert_eq!(base.data_points, 1);
        assert_eq!(base.descendant_data_points, 2);
        assert_eq!(base.ancestor, None);
        // The ancestor slot was created before its descendant.
        assert_eq!(table.entries()[0].key(), "-1 -1 1 1");

        assert_eq!(
            table.all_forms(),
            vec![
                FormCount { form: "-2 -2 2 2".into(), count: 2 },
                FormCount { form: "-1 -1 1 1".into(), count: 1 },
            ]
        );
        assert_eq!(
            table.minimal_forms(),
            vec![FormCount { form: "-1 -1 1 1".into(), count: 3 }]
        );
    }

    #[test]
    fn csv_rows_with_bad_coordinates_are_skipped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("paths.csv");
        let mut f = File::create(&input).unwrap();
        writeln!(f, "0.25,0.5,RRRLRRRLLLRLLL)").unwrap();
        writeln!(f, "x,y,path").unwrap();
        writeln!(f, "0.3,0.4,RLRLRL").unwrap();
        drop(f);

        let mut table = PathStatsTable::new();
        let (used, skipped) = load(&mut table, &input).unwrap();
        assert_eq!((used, skipped), (2, 1));

        let out = dir.path().join("out").join("stats.csv");
        write_frame(&table, &out).unwrap();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(out.clone()))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names().iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            vec!["x", "y", "path", "fan_count", "flip_count"]
        );
    }

    #[test]
    fn text_input_and_parquet_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("paths.txt");
        fs::write(&input, "RLRLRL\n\n???\n(RLRLRL)\n").unwrap();
        let mut table = PathStatsTable::new();
        assert_eq!(load(&mut table, &input).unwrap(), (2, 1));
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0].data_points, 2);

        let out = dir.path().join("stats.parquet");
        write_frame(&table, &out).unwrap();
        assert!(out.exists());
    }
}
