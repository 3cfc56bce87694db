// src/tabulate/mod.rs
use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

mod line;

pub use line::CommentLine;

/// Single-pass tabularizer for benchmark logs: comment lines carry either a
/// `# name: value` sticky assignment or a `# col1, col2, …` header, and every
/// plain line is a data row bound to the most recent header. All fields ever
/// seen become columns of one rectangular CSV table, blank where a record has
/// no value.
pub struct Tabularizer {
    /// Columns declared by the most recent plain header line.
    current_header: Option<Vec<String>>,

    /// Every field name encountered, in first-seen order. This becomes the
    /// output column order.
    field_list: Vec<String>,

    /// Same names as `field_list`, for O(1) membership checks.
    field_set: HashSet<String>,

    /// Sticky assignments accumulated so far. Overwritten by later sticky
    /// lines of the same name, never cleared.
    sticky: HashMap<String, String>,

    /// Merged records, one per data row, in input order.
    records: Vec<HashMap<String, String>>,
}

impl Tabularizer {
    pub fn new() -> Self {
        Self {
            current_header: None,
            field_list: Vec::new(),
            field_set: HashSet::new(),
            sticky: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Consume one input line, updating header/sticky state or appending a
    /// record. Blank lines are ignored.
    pub fn process_line(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }

        if let Some(body) = trimmed.strip_prefix('#') {
            match line::classify_comment(body.trim()) {
                CommentLine::Sticky { name, value } => {
                    self.register_field(&name);
                    self.sticky.insert(name, value);
                }
                CommentLine::Header(fields) => {
                    for field in &fields {
                        self.register_field(field);
                    }
                    self.current_header = Some(fields);
                }
            }
            return;
        }

        // Data row: sticky snapshot overlaid with header-zipped values. The
        // zip truncates to the shorter side, so surplus row values are
        // dropped and short rows simply leave fields absent.
        let values = line::split_fields(trimmed);
        let mut record = self.sticky.clone();
        match &self.current_header {
            Some(header) => {
                if header.len() != values.len() {
                    debug!(
                        header_fields = header.len(),
                        row_fields = values.len(),
                        "field count mismatch, zipping to the shorter side"
                    );
                }
                for (name, value) in header.iter().zip(values) {
                    record.insert(name.clone(), value);
                }
            }
            None => {
                warn!("data row before any header line, keeping sticky fields only");
            }
        }
        self.records.push(record);
    }

    /// Read every line from `reader` through `process_line`.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("reading input line")?;
            self.process_line(&line);
        }
        Ok(())
    }

    /// Emit the rectangular table: one `# …` line naming every field in
    /// first-seen order, then one row per record with blanks for absent
    /// fields.
    pub fn write_table<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "# {}", self.field_list.join(", ")).context("writing header line")?;
        for record in &self.records {
            let cells: Vec<&str> = self
                .field_list
                .iter()
                .map(|field| record.get(field).map(String::as_str).unwrap_or(""))
                .collect();
            writeln!(out, "{}", cells.join(", ")).context("writing data row")?;
        }
        Ok(())
    }

    /// Every field name seen so far, in output column order.
    pub fn fields(&self) -> &[String] {
        &self.field_list
    }

    /// The merged records accumulated so far, in input order.
    pub fn records(&self) -> &[HashMap<String, String>] {
        &self.records
    }

    fn register_field(&mut self, name: &str) {
        if self.field_set.insert(name.to_string()) {
            self.field_list.push(name.to_string());
        }
    }
}

impl Default for Tabularizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a whole stream through a fresh `Tabularizer` and write the table.
pub fn tabularize<R: BufRead, W: Write>(reader: R, writer: W) -> Result<()> {
    let mut tab = Tabularizer::new();
    tab.read_from(reader)?;
    tab.write_table(writer)
}
