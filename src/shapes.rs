//! Living shapes the move generator builds before it starts scoring moves.
//!
//! Each template is a small rectangle of stones enclosing two eye points, so
//! a completed template is a group that cannot be captured. Templates are
//! written as rows of text:
//! - `X`: stone to play
//! - `.`: eye point, kept empty
//!
//! Templates are tried in order; a later one is only used when the earlier
//! ones can no longer be built on the current board.

use std::sync::OnceLock;

use crate::board::Point;

const TEMPLATE_SRC: &[&[&str]] = &[
    // Two eyes side by side
    &["XXXXX", "X.X.X", "XXXXX"],
    // Same shape, standing
    &["XXX", "X.X", "XXX", "X.X", "XXX"],
    // Diagonal eyes in a 4x4 block
    &["XXXX", "X.XX", "XX.X", "XXXX"],
];

static TEMPLATES: OnceLock<Vec<ShapeTemplate>> = OnceLock::new();

/// Stone and eye offsets of one template, relative to its top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeTemplate {
    width: usize,
    height: usize,
    stones: Vec<Point>,
    eyes: Vec<Point>,
}

/// A template positioned on a particular board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedShape {
    pub stones: Vec<Point>,
    pub eyes: Vec<Point>,
}

impl ShapeTemplate {
    fn parse(rows: &[&str]) -> Self {
        let mut stones = Vec::new();
        let mut eyes = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    'X' => stones.push((x, y)),
                    '.' => eyes.push((x, y)),
                    _ => {}
                }
            }
        }
        Self {
            width: rows.iter().map(|r| r.chars().count()).max().unwrap_or(0),
            height: rows.len(),
            stones,
            eyes,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Center the template on a `board_size` board. `None` if it does not fit.
    pub fn place(&self, board_size: usize) -> Option<PlacedShape> {
        if self.width > board_size || self.height > board_size {
            return None;
        }
        let dx = (board_size - self.width) / 2;
        let dy = (board_size - self.height) / 2;
        let shift = |&(x, y): &Point| (x + dx, y + dy);
        Some(PlacedShape {
            stones: self.stones.iter().map(shift).collect(),
            eyes: self.eyes.iter().map(shift).collect(),
        })
    }
}

/// The built-in templates, in order of preference.
pub fn templates() -> &'static [ShapeTemplate] {
    TEMPLATES.get_or_init(|| TEMPLATE_SRC.iter().map(|rows| ShapeTemplate::parse(rows)).collect())
}
