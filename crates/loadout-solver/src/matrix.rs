//! Dense candidate × group score matrix.
//!
//! Rows are candidate units, columns are demand groups. Absent edges are
//! stored as [`NO_EDGE`] so the matrix can be handed to `pathfinding`'s
//! Kuhn–Munkres routine unchanged.

use std::fmt::Write;

use loadout_core::{DemandGroup, EdgeScore, InventoryItem, LoadoutError, Result, NO_EDGE};
use loadout_scoring::DirectScorer;
use pathfinding::kuhn_munkres::Weights;

/// Row-major matrix of edge cells, optionally viewed transposed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<i64>,
    transposed: bool,
}

impl ScoreMatrix {
    /// Scores every candidate against every group.
    pub fn build(
        candidates: &[InventoryItem],
        groups: &[DemandGroup],
        scorer: &DirectScorer,
    ) -> Self {
        let mut cells = Vec::with_capacity(candidates.len() * groups.len());
        for candidate in candidates {
            for group in groups {
                cells.push(EdgeScore::to_cell(scorer.score(candidate, group)));
            }
        }
        Self {
            rows: candidates.len(),
            columns: groups.len(),
            cells,
            transposed: false,
        }
    }

    /// Builds a matrix from explicit rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != columns) {
            return Err(LoadoutError::Matching(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                columns
            )));
        }
        Ok(Self {
            rows: rows.len(),
            columns,
            cells: rows.into_iter().flatten().collect(),
            transposed: false,
        })
    }

    /// The same cells seen with rows and columns swapped.
    pub fn transposed(&self) -> Self {
        Self {
            transposed: !self.transposed,
            ..self.clone()
        }
    }

    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    pub fn is_degenerate(&self) -> bool {
        Weights::<i64>::rows(self) == 0 || Weights::<i64>::columns(self) == 0
    }

    /// Raw cell in the current orientation.
    pub fn cell(&self, row: usize, column: usize) -> i64 {
        let (r, c) = if self.transposed {
            (column, row)
        } else {
            (row, column)
        };
        self.cells[r * self.columns + c]
    }

    /// The edge in the current orientation, `None` for [`NO_EDGE`].
    pub fn edge(&self, row: usize, column: usize) -> Option<EdgeScore> {
        EdgeScore::from_cell(self.cell(row, column))
    }

    /// Renders the matrix as a table, `-` for absent edges.
    ///
    /// Labels are matched to the stored (untransposed) orientation; missing
    /// labels fall back to indices.
    pub fn render_labelled(&self, row_labels: &[String], column_labels: &[String]) -> String {
        let label = |labels: &[String], i: usize, prefix: char| {
            labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("{}{}", prefix, i))
        };
        let cell_text = |v: i64| {
            if v <= NO_EDGE {
                "-".to_string()
            } else {
                v.to_string()
            }
        };

        let headers: Vec<String> = (0..self.columns).map(|c| label(column_labels, c, 'g')).collect();
        let names: Vec<String> = (0..self.rows).map(|r| label(row_labels, r, 'u')).collect();
        let name_width = names.iter().map(String::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..self.columns)
            .map(|c| {
                (0..self.rows)
                    .map(|r| cell_text(self.cells[r * self.columns + c]).len())
                    .chain(std::iter::once(headers[c].len()))
                    .max()
                    .unwrap_or(1)
            })
            .collect();

        let mut out = String::new();
        let _ = write!(out, "{:name_width$}", "");
        for (header, width) in headers.iter().zip(&widths) {
            let _ = write!(out, " | {:>width$}", header);
        }
        for (r, name) in names.iter().enumerate() {
            let _ = write!(out, "\n{:name_width$}", name);
            for (c, width) in widths.iter().enumerate() {
                let _ = write!(out, " | {:>width$}", cell_text(self.cells[r * self.columns + c]));
            }
        }
        out
    }
}

impl Weights<i64> for ScoreMatrix {
    fn rows(&self) -> usize {
        if self.transposed {
            self.columns
        } else {
            self.rows
        }
    }

    fn columns(&self) -> usize {
        if self.transposed {
            self.rows
        } else {
            self.columns
        }
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.cell(row, col)
    }

    fn neg(&self) -> Self {
        Self {
            cells: self.cells.iter().map(|&v| -v).collect(),
            ..self.clone()
        }
    }
}
