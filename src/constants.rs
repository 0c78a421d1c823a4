//! Constants for board limits, protocol identity, and generator parameters.
//!
//! The board size is chosen at run time (`boardsize` command or the
//! `--size` flag), so everything here is a bound or a default rather than
//! the size itself.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest board accepted by `boardsize`.
pub const MIN_BOARD_SIZE: usize = 1;

/// Largest board accepted by `boardsize` (one column per letter in
/// [`COLUMN_LETTERS`]).
pub const MAX_BOARD_SIZE: usize = 25;

/// Board size used until the controller asks for another one.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Column letters in GTP notation. `I` is skipped to avoid confusion with `J`.
pub const COLUMN_LETTERS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Game Flow
// =============================================================================

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u32 = 2;

/// Literal token used for a pass in vertex position.
pub const PASS_TOKEN: &str = "pass";

/// Self-play stops after this many moves per board point (allows for captures
/// and refills).
pub const GAME_LENGTH_FACTOR: usize = 3;

// =============================================================================
// GTP Identity
// =============================================================================

/// Name reported by the `name` command.
pub const ENGINE_NAME: &str = "shapego";

/// GTP protocol version reported by `protocol_version`.
pub const PROTOCOL_VERSION: &str = "2";

// =============================================================================
// Board Rendering
// =============================================================================

/// Black stone in `showboard` output.
pub const BLACK_CHAR: char = 'X';

/// White stone in `showboard` output.
pub const WHITE_CHAR: char = 'O';

/// Empty point in `showboard` output.
pub const EMPTY_CHAR: char = '.';
