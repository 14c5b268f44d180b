//! Paged display of raw trip rows

use crate::{
    core::{
        filters::weekday_name,
        table::{TripRecord, TripTable},
    },
    error::Result,
    utils::console::Console,
};
use std::io::{BufRead, Write};
use tracing::debug;

/// Walks a table `page_size` rows at a time from offset 0
#[derive(Debug, Clone)]
pub struct Pager {
    offset: usize,
    page_size: usize,
}

impl Pager {
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size,
        }
    }

    /// Offset of the next page
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Return the next page and advance; past the end this is short or empty
    pub fn next_page<'t>(&mut self, table: &'t TripTable) -> &'t [TripRecord] {
        let page = table.slice(self.offset, self.page_size);
        self.offset = self.offset.saturating_add(self.page_size);
        page
    }

    /// Keep printing pages while the user answers "yes"
    pub fn browse<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        table: &TripTable,
    ) -> Result<()> {
        let prompt = format!(
            "\nWould you like to view {} rows of individual trip data? Enter yes or no.\n",
            self.page_size
        );
        while console.confirm(&prompt)? {
            debug!("Showing rows from offset {}", self.offset);
            let page = self.next_page(table);
            if !page.is_empty() {
                console.write(render_rows(table, page))?;
            }
        }
        Ok(())
    }
}

/// Render rows as an aligned text table with the derived columns appended
pub fn render_rows(table: &TripTable, rows: &[TripRecord]) -> String {
    let mut header: Vec<&str> = vec![""];
    header.extend(table.columns().iter().map(String::as_str));
    header.extend(["month", "day_of_week"]);

    let lines: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut line = vec![row.index.to_string()];
            line.extend(row.cells.iter().cloned());
            line.push(row.month().to_string());
            line.push(weekday_name(row.day_of_week()).to_string());
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header.iter().copied(), &widths);
    for line in &lines {
        push_line(&mut out, line.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
