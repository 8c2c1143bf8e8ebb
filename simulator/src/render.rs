//! Turning logged states into glyph grids.

use crate::history::HistoryLog;
use crate::projection::{RenderConfig, Slope};

use euclid::default::Point2D;
use std::fmt;

const EMPTY: char = '.';

/// A grid of glyphs. Row 0 of `cells` is the top of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    columns: u32,
    rows: u32,
    cells: Vec<char>,
}

impl Frame {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cells: vec![EMPTY; columns as usize * rows as usize],
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Put `glyph` at `point`, where `point.y` counts up from the bottom row.
    /// Off-grid points are dropped. An occupied cell keeps what it has.
    /// Returns whether the glyph went down.
    pub fn plot(&mut self, point: Point2D<i64>, glyph: char) -> bool {
        let index = match self.index(point) {
            Some(index) => index,
            None => return false,
        };
        if self.cells[index] != EMPTY {
            return false;
        }
        self.cells[index] = glyph;
        true
    }

    /// Glyph at `point`, same coordinates as `plot`.
    pub fn get(&self, point: Point2D<i64>) -> Option<char> {
        self.index(point).map(|i| self.cells[i])
    }

    fn index(&self, point: Point2D<i64>) -> Option<usize> {
        if point.x < 0 || point.y < 0 || point.x >= i64::from(self.columns) || point.y >= i64::from(self.rows) {
            return None;
        }
        let row = (i64::from(self.rows) - 1 - point.y) as usize;
        Some(row * self.columns as usize + point.x as usize)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns as usize) {
            for glyph in row {
                write!(f, " {} ", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Draw the sample for `time`, or `None` if the log has nothing there.
///
/// Bodies are drawn first so trail markers never hide them.
pub fn render_frame(log: &HistoryLog, time: f64, config: &RenderConfig) -> Option<Frame> {
    let shown = log.index_of(time)?;
    let block = log.sample_at(shown)?;
    let mut frame = Frame::new(config.columns(), config.rows());

    for oer in block {
        frame.plot(config.project(oer.pos()), oer.symbol());
    }

    if config.trajectory() {
        for (_, past) in log.samples().take(shown) {
            for oer in past {
                let glyph = Slope::classify(oer.vel(), config.plane()).glyph();
                frame.plot(config.project(oer.pos()), glyph);
            }
        }
    }

    Some(frame)
}

/// Times a frame should be rendered at: every `render_step` seconds from 0
/// up to the newest sample in the log.
pub fn frame_times(log: &HistoryLog, render_step: f64) -> impl Iterator<Item = f64> {
    let last = log.latest_time().unwrap_or(-1.0);
    let count = if last < 0.0 {
        0
    } else {
        (last / render_step + 1e-9).floor() as u64 + 1
    };
    (0..count).map(move |k| k as f64 * render_step)
}
