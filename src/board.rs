//! The rules engine: stones, groups, liberties, captures, ko and area scoring.
//!
//! Groups are not stored. They are recovered by flood fill from any of their
//! stones whenever a placement or a query needs them, which keeps the only
//! mutable state the grid itself plus the ko point.

use std::fmt;

use crate::constants::{
    BLACK_CHAR, COLUMN_LETTERS, EMPTY_CHAR, MAX_BOARD_SIZE, MIN_BOARD_SIZE, WHITE_CHAR,
};
use crate::error::{BoardSizeError, MoveError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// State of a single point on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Intersection {
    #[default]
    Empty,
    Black,
    White,
}

impl Intersection {
    pub fn color(self) -> Option<Color> {
        match self {
            Intersection::Empty => None,
            Intersection::Black => Some(Color::Black),
            Intersection::White => Some(Color::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Intersection::Empty
    }
}

impl From<Color> for Intersection {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Intersection::Black,
            Color::White => Intersection::White,
        }
    }
}

/// `(x, y)`, 0-indexed, with row 0 at the top.
pub type Point = (usize, usize);

/// A point that `forbidden` may not play on its next move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ko {
    pub point: Point,
    pub forbidden: Color,
}

/// Everything needed to take a placement back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub point: Point,
    pub color: Color,
    /// Opposing stones removed by this placement
    pub captured: Vec<Point>,
    /// Ko point in force before the placement
    pub prior_ko: Option<Ko>,
}

/// Area score: stones on the board plus empty regions bordered by one color only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn add(&mut self, color: Color, amount: u32) {
        match color {
            Color::Black => self.black += amount,
            Color::White => self.white += amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Intersection>,
    ko: Option<Ko>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Result<Self, BoardSizeError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardSizeError(size));
        }
        Ok(Self {
            size,
            cells: vec![Intersection::Empty; size * size],
            ko: None,
        })
    }

    /// Remove every stone and the ko point, keeping the size.
    pub fn clear(&mut self) {
        self.cells.fill(Intersection::Empty);
        self.ko = None;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ko(&self) -> Option<Ko> {
        self.ko
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    fn idx(&self, (x, y): Point) -> usize {
        y * self.size + x
    }

    /// State of `point`. Points off the board read as empty.
    pub fn get(&self, point: Point) -> Intersection {
        if !self.on_board(point) {
            return Intersection::Empty;
        }
        self.cells[self.idx(point)]
    }

    fn set(&mut self, point: Point, value: Intersection) {
        let i = self.idx(point);
        self.cells[i] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// All points in row-major order, top row first.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| (x, y)))
    }

    fn neighbors(&self, (x, y): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Place a stone of `color` at `point`, resolving captures and ko.
    ///
    /// Checks run in a fixed order: bounds, occupancy, ko, then (after
    /// opposing groups without liberties are removed) suicide. On any error
    /// the board is left exactly as it was.
    pub fn place_stone(&mut self, point: Point, color: Color) -> Result<Placement, MoveError> {
        if !self.on_board(point) {
            return Err(MoveError::OutOfBounds);
        }
        if !self.get(point).is_empty() {
            return Err(MoveError::Occupied);
        }
        if self.ko == Some(Ko { point, forbidden: color }) {
            return Err(MoveError::Ko);
        }

        self.set(point, color.into());

        let opp: Intersection = color.opponent().into();
        let mut captured: Vec<Point> = Vec::new();
        for n in self.neighbors(point) {
            if self.get(n) == opp && !captured.contains(&n) && self.group_liberties(n) == Some(0) {
                self.collect_group(n, &mut captured);
            }
        }
        for &p in &captured {
            self.set(p, Intersection::Empty);
        }

        let liberties = self.group_liberties(point).unwrap_or(0);
        if captured.is_empty() && liberties == 0 {
            self.set(point, Intersection::Empty);
            return Err(MoveError::Suicide);
        }

        let own: Intersection = color.into();
        let prior_ko = self.ko.take();
        let lone_stone = self.neighbors(point).all(|n| self.get(n) != own);
        if captured.len() == 1 && lone_stone && liberties == 1 {
            self.ko = Some(Ko {
                point: captured[0],
                forbidden: color.opponent(),
            });
        }

        Ok(Placement {
            point,
            color,
            captured,
            prior_ko,
        })
    }

    /// Take back `placement`. Must be the most recent placement still on the
    /// board; placements are undone in reverse order.
    pub fn undo_placement(&mut self, placement: &Placement) {
        self.set(placement.point, Intersection::Empty);
        let restored: Intersection = placement.color.opponent().into();
        for &p in &placement.captured {
            self.set(p, restored);
        }
        self.ko = placement.prior_ko;
    }

    /// Drop the ko point, returning it so it can be restored later.
    pub fn clear_ko(&mut self) -> Option<Ko> {
        self.ko.take()
    }

    pub fn restore_ko(&mut self, ko: Option<Ko>) {
        self.ko = ko;
    }

    /// Append every stone of the group containing `start` to `out`.
    fn collect_group(&self, start: Point, out: &mut Vec<Point>) -> usize {
        let color = self.get(start);
        let mut stack = vec![start];
        let mut visited = vec![false; self.size * self.size];
        let mut count = 0;
        while let Some(p) = stack.pop() {
            let i = self.idx(p);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            out.push(p);
            count += 1;
            for n in self.neighbors(p) {
                if !visited[self.idx(n)] && self.get(n) == color {
                    stack.push(n);
                }
            }
        }
        count
    }

    /// Stones of the group containing `point`; empty if there is no stone.
    pub fn group(&self, point: Point) -> Vec<Point> {
        let mut stones = Vec::new();
        if !self.get(point).is_empty() {
            self.collect_group(point, &mut stones);
        }
        stones
    }

    /// Number of distinct liberties of the group at `point`, or `None` when
    /// `point` holds no stone.
    pub fn group_liberties(&self, point: Point) -> Option<usize> {
        let color = self.get(point);
        if color.is_empty() {
            return None;
        }
        let mut stack = vec![point];
        let mut visited = vec![false; self.size * self.size];
        let mut liberty_seen = vec![false; self.size * self.size];
        let mut liberties = 0;
        while let Some(p) = stack.pop() {
            let i = self.idx(p);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                match self.get(n) {
                    Intersection::Empty => {
                        if !liberty_seen[ni] {
                            liberty_seen[ni] = true;
                            liberties += 1;
                        }
                    }
                    c if c == color && !visited[ni] => stack.push(n),
                    _ => {}
                }
            }
        }
        Some(liberties)
    }

    /// Area score of the current position.
    ///
    /// Each empty region is flood filled; it counts for a color only if every
    /// stone bordering it is that color. Regions touching both colors, or no
    /// stones at all, are neutral.
    pub fn score(&self) -> Score {
        let mut score = Score::default();
        let mut seen = vec![false; self.size * self.size];

        for start in self.points() {
            match self.get(start).color() {
                Some(color) => score.add(color, 1),
                None if !seen[self.idx(start)] => {
                    let mut region = 0u32;
                    let mut borders_black = false;
                    let mut borders_white = false;
                    let mut stack = vec![start];
                    seen[self.idx(start)] = true;
                    while let Some(p) = stack.pop() {
                        region += 1;
                        for n in self.neighbors(p) {
                            match self.get(n) {
                                Intersection::Empty => {
                                    let ni = self.idx(n);
                                    if !seen[ni] {
                                        seen[ni] = true;
                                        stack.push(n);
                                    }
                                }
                                Intersection::Black => borders_black = true,
                                Intersection::White => borders_white = true,
                            }
                        }
                    }
                    match (borders_black, borders_white) {
                        (true, false) => score.add(Color::Black, region),
                        (false, true) => score.add(Color::White, region),
                        _ => {}
                    }
                }
                None => {}
            }
        }
        score
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            write!(f, "{:>2}", self.size - y)?;
            for x in 0..self.size {
                let ch = match self.get((x, y)) {
                    Intersection::Black => BLACK_CHAR,
                    Intersection::White => WHITE_CHAR,
                    Intersection::Empty => EMPTY_CHAR,
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for &letter in &COLUMN_LETTERS[..self.size] {
            write!(f, " {}", letter as char)?;
        }
        writeln!(f)
    }
}
