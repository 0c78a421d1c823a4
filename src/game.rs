//! A game in progress: the board plus turn order, history and pass counting.
//!
//! The session enforces strict alternation. A caller that wants a specific
//! color to move next must issue a real [`Game::pass`] for the other side.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{info, trace};

use crate::board::{Board, Color, Intersection, Ko, Placement, Point, Score};
use crate::constants::PASSES_TO_END;
use crate::error::{BoardSizeError, EmptyHistory, MoveError};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one game. A fresh id is issued whenever a game is created or
/// cleared, so per-game state held elsewhere can tell that it is stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Play(Placement),
    Pass { prior_ko: Option<Ko> },
}

/// One move of the history, with what is needed to take it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub player: Color,
    pub action: Action,
    /// Consecutive pass count before this move
    pub prior_passes: u32,
}

#[derive(Clone, Debug)]
pub struct Game {
    id: SessionId,
    board: Board,
    current_player: Color,
    history: Vec<HistoryEntry>,
    consecutive_passes: u32,
}

impl Game {
    /// Start a new game on an empty `size`×`size` board with Black to play.
    pub fn new(size: usize) -> Result<Self, BoardSizeError> {
        let board = Board::new(size)?;
        let id = SessionId::next();
        info!(?id, size, "new game");
        Ok(Self {
            id,
            board,
            current_player: Color::Black,
            history: Vec::new(),
            consecutive_passes: 0,
        })
    }

    /// Reset to an empty board of the same size. The game gets a new id.
    pub fn clear(&mut self) {
        self.board.clear();
        self.id = SessionId::next();
        self.current_player = Color::Black;
        self.history.clear();
        self.consecutive_passes = 0;
        info!(id = ?self.id, size = self.size(), "board cleared");
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn intersection_at(&self, point: Point) -> Intersection {
        self.board.get(point)
    }

    pub fn group_liberties(&self, point: Point) -> Option<usize> {
        self.board.group_liberties(point)
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    /// True once both players have passed in a row.
    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= PASSES_TO_END
    }

    /// Place a stone for the player to move.
    pub fn play(&mut self, point: Point) -> Result<(), MoveError> {
        let player = self.current_player;
        let placement = self.board.place_stone(point, player)?;
        trace!(?player, ?point, captured = placement.captured.len(), "play");
        self.history.push(HistoryEntry {
            player,
            action: Action::Play(placement),
            prior_passes: self.consecutive_passes,
        });
        self.consecutive_passes = 0;
        self.current_player = player.opponent();
        Ok(())
    }

    /// Pass for the player to move. A pass lifts any ko.
    pub fn pass(&mut self) {
        let player = self.current_player;
        let prior_ko = self.board.clear_ko();
        self.history.push(HistoryEntry {
            player,
            action: Action::Pass { prior_ko },
            prior_passes: self.consecutive_passes,
        });
        self.consecutive_passes += 1;
        self.current_player = player.opponent();
        trace!(?player, passes = self.consecutive_passes, "pass");
        if self.is_over() {
            info!(id = ?self.id, "both players passed");
        }
    }

    /// Take back the last move, whether a play or a pass.
    pub fn undo(&mut self) -> Result<(), EmptyHistory> {
        let entry = self.history.pop().ok_or(EmptyHistory)?;
        match &entry.action {
            Action::Play(placement) => self.board.undo_placement(placement),
            Action::Pass { prior_ko } => self.board.restore_ko(*prior_ko),
        }
        self.consecutive_passes = entry.prior_passes;
        self.current_player = entry.player;
        trace!(player = ?entry.player, "undo");
        Ok(())
    }
}
