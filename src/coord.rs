//! Conversion between GTP text and board points.
//!
//! Columns are letters `A`–`Z` without `I`; rows count up from 1 at the
//! bottom edge, so row `r` is `y = size - r`.

use crate::board::{Color, Point};
use crate::constants::{COLUMN_LETTERS, PASS_TOKEN};
use crate::error::ParseError;

/// A move as written in GTP: a point or a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Vertex {
    Pass,
    Point(Point),
}

/// Parse a GTP color token (`b`, `black`, `w`, `white`, any case).
pub fn parse_color(text: &str) -> Result<Color, ParseError> {
    match text.to_ascii_lowercase().as_str() {
        "b" | "black" => Ok(Color::Black),
        "w" | "white" => Ok(Color::White),
        _ => Err(ParseError::InvalidColor(text.to_string())),
    }
}

/// Parse a GTP vertex such as `D4` or `pass` for a board of `size`.
pub fn parse_vertex(text: &str, size: usize) -> Result<Vertex, ParseError> {
    if text.eq_ignore_ascii_case(PASS_TOKEN) {
        return Ok(Vertex::Pass);
    }

    let invalid = || ParseError::InvalidVertex(text.to_string());

    let mut chars = text.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let digits = chars.as_str();

    let x = COLUMN_LETTERS
        .iter()
        .position(|&c| c as char == letter)
        .ok_or_else(invalid)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: usize = digits.parse().map_err(|_| invalid())?;

    if x >= size || row == 0 || row > size {
        return Err(ParseError::OffBoard(text.to_string()));
    }
    Ok(Vertex::Point((x, size - row)))
}

/// Format a point as GTP text, e.g. `(3, 5)` on 9×9 is `D4`.
pub fn format_point((x, y): Point, size: usize) -> String {
    format!("{}{}", COLUMN_LETTERS[x] as char, size - y)
}

pub fn format_vertex(vertex: Vertex, size: usize) -> String {
    match vertex {
        Vertex::Pass => PASS_TOKEN.to_string(),
        Vertex::Point(p) => format_point(p, size),
    }
}
