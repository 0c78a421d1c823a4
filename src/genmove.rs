//! Move generation.
//!
//! Two phases, both driven through the public [`Game`] API:
//!
//! 1. **Shape building** - play the stones of a two-eye template (see
//!    [`crate::shapes`]) one per call, so the engine owns a living group
//!    before anything else happens.
//! 2. **Greedy search** - try every empty point that is not one of our
//!    reserved eyes, score the position with the area counter, undo, and
//!    keep the best. Ties go to the point nearest the center.
//!
//! In random mode phase 2 picks any of the scored candidates instead of the
//! best one, which makes a weak sparring partner for tests.
//!
//! Generator state belongs to one game. It remembers the [`SessionId`] it
//! was built for and starts over when it is handed a different game. Within
//! a game each color has its own shape progress, and neither color plays on
//! points the other has claimed for its shape (pending stones and eyes).

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::board::{Color, Point};
use crate::game::{Game, SessionId};
use crate::shapes::templates;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GeneratorMode {
    /// Commit the best scored candidate
    #[default]
    Heuristic,
    /// Commit a uniformly random scored candidate
    Random,
}

/// The move the generator committed to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneratedMove {
    Play(Point),
    Pass,
}

/// A candidate after tentative play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub point: Point,
    /// Area score of the mover after the candidate is played
    pub score: u32,
    /// Squared distance from the board center, in half-point units
    pub dist2: usize,
}

/// Shape-building progress of one color in the bound game.
#[derive(Clone, Debug, Default)]
struct ShapeProgress {
    /// Index of the template to load next
    next_template: usize,
    /// Stones of the current template not yet played
    pending: Vec<Point>,
    /// Eye points of the current template
    eyes: Vec<Point>,
    /// Eyes of every template we have put a stone into
    reserved: HashSet<Point>,
    built: bool,
}

impl ShapeProgress {
    /// Points this color means to fill or keep empty for its own shape.
    fn claims(&self) -> HashSet<Point> {
        self.pending
            .iter()
            .chain(&self.reserved)
            .copied()
            .collect()
    }
}

fn slot(color: Color) -> usize {
    match color {
        Color::Black => 0,
        Color::White => 1,
    }
}

pub struct MoveGenerator {
    mode: GeneratorMode,
    rng: fastrand::Rng,
    session: Option<SessionId>,
    /// Indexed by [`slot`]
    progress: [ShapeProgress; 2],
}

impl MoveGenerator {
    pub fn new(mode: GeneratorMode) -> Self {
        Self::with_rng(mode, fastrand::Rng::new())
    }

    /// Generator with a reproducible random sequence.
    pub fn with_seed(mode: GeneratorMode, seed: u64) -> Self {
        Self::with_rng(mode, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(mode: GeneratorMode, rng: fastrand::Rng) -> Self {
        Self {
            mode,
            rng,
            session: None,
            progress: Default::default(),
        }
    }

    pub fn mode(&self) -> GeneratorMode {
        self.mode
    }

    /// Forget all per-game progress.
    pub fn reset(&mut self) {
        self.session = None;
        self.progress = Default::default();
    }

    /// True once `color` has finished shape building, successfully or not.
    pub fn shape_built(&self, color: Color) -> bool {
        self.progress[slot(color)].built
    }

    /// Eye points `color` will never play on in phase 2.
    pub fn reserved_eyes(&self, color: Color) -> &HashSet<Point> {
        &self.progress[slot(color)].reserved
    }

    /// Choose a move for the player to move in `game` and play it.
    ///
    /// Each color builds its own shape. Points the other color has claimed
    /// for its shape are left alone in both phases.
    pub fn generate(&mut self, game: &mut Game) -> GeneratedMove {
        self.bind(game.id());

        let me = game.current_player();
        let blocked = self.progress[slot(me.opponent())].claims();
        let progress = &mut self.progress[slot(me)];

        if !progress.built {
            if let Some(point) = build_shape(progress, game, &blocked) {
                debug!(?point, color = %me, "shape stone");
                return GeneratedMove::Play(point);
            }
        }
        let excluded: HashSet<Point> = blocked.union(&progress.reserved).copied().collect();
        self.greedy(game, &excluded)
    }

    fn bind(&mut self, id: SessionId) {
        if self.session != Some(id) {
            if self.session.is_some() {
                debug!(?id, "new game, generator state reset");
            }
            self.progress = Default::default();
            self.session = Some(id);
        }
    }

    fn greedy(&mut self, game: &mut Game, excluded: &HashSet<Point>) -> GeneratedMove {
        let mut candidates: Vec<Point> = game
            .board()
            .points()
            .filter(|&p| game.intersection_at(p).is_empty() && !excluded.contains(&p))
            .collect();
        if candidates.is_empty() {
            debug!("no candidates, passing");
            game.pass();
            return GeneratedMove::Pass;
        }

        self.rng.shuffle(&mut candidates);
        let mut scored = evaluate(game, &candidates);
        if scored.is_empty() {
            debug!("no legal candidates, passing");
            game.pass();
            return GeneratedMove::Pass;
        }
        scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.dist2.cmp(&b.dist2)));

        let choice = match self.mode {
            GeneratorMode::Heuristic => scored[0],
            GeneratorMode::Random => scored[self.rng.usize(..scored.len())],
        };
        debug!(
            point = ?choice.point,
            score = choice.score,
            candidates = scored.len(),
            mode = ?self.mode,
            "scored move"
        );

        match game.play(choice.point) {
            Ok(()) => GeneratedMove::Play(choice.point),
            Err(err) => {
                warn!(point = ?choice.point, %err, "chosen move rejected, passing");
                game.pass();
                GeneratedMove::Pass
            }
        }
    }
}

/// Play the next stone of the current template. Returns `None` once no
/// template can be continued, after marking shape building finished.
///
/// Templates are alternatives: completing any one of them ends shape
/// building. An empty pending list only loads the next template when the
/// current one could not be finished.
fn build_shape(
    progress: &mut ShapeProgress,
    game: &mut Game,
    blocked: &HashSet<Point>,
) -> Option<Point> {
    let templates = templates();
    let mut loaded = 0;
    loop {
        if progress.pending.is_empty() {
            if loaded >= templates.len() {
                debug!("no template can be built, switching to scored search");
                progress.built = true;
                return None;
            }
            load_next_template(progress, game.size(), blocked);
            loaded += 1;
            continue;
        }

        if let Some(point) = play_pending(progress, game) {
            let eyes = progress.eyes.iter().copied();
            progress.reserved.extend(eyes);
            if progress.pending.is_empty() {
                debug!("shape complete");
                progress.built = true;
            }
            return Some(point);
        }
        progress.pending.clear();
    }
}

/// Load the next template in cyclic order. A template that does not fit,
/// or that touches a point in `blocked`, leaves the pending list empty.
fn load_next_template(progress: &mut ShapeProgress, board_size: usize, blocked: &HashSet<Point>) {
    let templates = templates();
    let index = progress.next_template % templates.len();
    progress.next_template = index + 1;
    progress.pending.clear();
    progress.eyes.clear();

    let Some(shape) = templates[index].place(board_size) else {
        trace!(index, board_size, "shape template does not fit");
        return;
    };
    if shape.stones.iter().chain(&shape.eyes).any(|p| blocked.contains(p)) {
        trace!(index, "shape template overlaps the opponent's shape");
        return;
    }
    trace!(index, "loading shape template");
    progress.pending = shape.stones;
    progress.eyes = shape.eyes;
}

/// Commit the first pending stone that plays legally. Pending points that
/// are occupied or already reserved as eyes are dropped.
fn play_pending(progress: &mut ShapeProgress, game: &mut Game) -> Option<Point> {
    let reserved = &progress.reserved;
    let pending = &mut progress.pending;
    pending.retain(|&p| game.intersection_at(p).is_empty() && !reserved.contains(&p));
    let index = pending.iter().position(|&p| game.play(p).is_ok())?;
    Some(pending.remove(index))
}

/// Score each candidate for the player to move by playing it, reading the
/// area score and undoing. Candidates that cannot be played are left out.
/// `game` is unchanged on return.
pub fn evaluate(game: &mut Game, candidates: &[Point]) -> Vec<ScoredMove> {
    let me: Color = game.current_player();
    let size = game.size();
    let mut scored = Vec::with_capacity(candidates.len());

    for &point in candidates {
        if let Err(err) = game.play(point) {
            trace!(?point, %err, "candidate rejected");
            continue;
        }
        let score = game.score().get(me);
        if let Err(err) = game.undo() {
            warn!(?point, %err, "tentative move not taken back, stopping evaluation");
            break;
        }

        let dist2 = center_distance2(point, size);
        trace!(?point, score, dist2, "candidate");
        scored.push(ScoredMove {
            point,
            score,
            dist2,
        });
    }
    scored
}

/// Squared distance from the center, doubled on each axis so the center of
/// an even board stays on integer coordinates.
fn center_distance2((x, y): Point, size: usize) -> usize {
    let dx = (2 * x).abs_diff(size - 1);
    let dy = (2 * y).abs_diff(size - 1);
    dx * dx + dy * dy
}
