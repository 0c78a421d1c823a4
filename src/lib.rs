//! shapego: a Go engine for the Go Text Protocol with a shape-building,
//! one-ply greedy move generator.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, protocol identity and rendering symbols
//! - [`error`] - Error kinds for every layer
//! - [`board`] - Rules engine (captures, suicide, ko, area scoring)
//! - [`game`] - Turn order, history, pass and undo
//! - [`coord`] - GTP vertex and color text
//! - [`shapes`] - Two-eye templates built at the start of a game
//! - [`genmove`] - Move generation
//! - [`gtp`] - GTP command loop
//!
//! ## Example
//!
//! ```
//! use shapego::game::Game;
//! use shapego::genmove::{GeneratedMove, GeneratorMode, MoveGenerator};
//!
//! let mut game = Game::new(9).unwrap();
//! game.play((4, 4)).unwrap();
//!
//! let mut generator = MoveGenerator::new(GeneratorMode::Heuristic);
//! match generator.generate(&mut game) {
//!     GeneratedMove::Play(point) => println!("White plays {point:?}"),
//!     GeneratedMove::Pass => println!("White passes"),
//! }
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod error;
pub mod game;
pub mod genmove;
pub mod gtp;
pub mod shapes;
