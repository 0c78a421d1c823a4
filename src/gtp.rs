//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 a controller needs to
//! play a full game against the engine.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - engine identity
//! - `list_commands`, `known_command <cmd>` - command discovery
//! - `quit` - exit the command loop
//! - `boardsize <size>` - start a new game on a `size`×`size` board (1-25)
//! - `clear_board` - start a new game on the current board size
//! - `komi <value>` - accepted; scoring is area counting without komi
//! - `play <color> <vertex>` - play a move or `pass`
//! - `genmove <color>` - generate and play a move
//! - `undo` - take back the last move
//! - `showboard` - draw the board
//! - `final_score` - area score of the current position
//!
//! `play` and `genmove` keep strict alternation: when the color given is not
//! the player to move, the other side passes first.
//!
//! ## Example
//!
//! ```no_run
//! use shapego::gtp::{EngineConfig, GtpEngine};
//! let mut engine = GtpEngine::with_config(EngineConfig::default()).unwrap();
//! engine.run(std::io::stdin().lock(), std::io::stdout()).unwrap();
//! ```

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, warn};

use crate::board::Color;
use crate::constants::{DEFAULT_BOARD_SIZE, ENGINE_NAME, PROTOCOL_VERSION};
use crate::coord::{Vertex, format_vertex, parse_color, parse_vertex};
use crate::error::{BoardSizeError, GtpError};
use crate::game::Game;
use crate::genmove::{GeneratedMove, GeneratorMode, MoveGenerator};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// Run-time settings, filled from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub board_size: usize,
    pub mode: GeneratorMode,
    /// Seed for the generator's random choices; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            mode: GeneratorMode::Heuristic,
            seed: None,
        }
    }
}

/// GTP engine state: one game and the generator bound to it.
pub struct GtpEngine {
    game: Game,
    generator: MoveGenerator,
}

impl GtpEngine {
    pub fn with_config(config: EngineConfig) -> Result<Self, BoardSizeError> {
        let game = Game::new(config.board_size)?;
        let generator = match config.seed {
            Some(seed) => MoveGenerator::with_seed(config.mode, seed),
            None => MoveGenerator::new(config.mode),
        };
        Ok(Self { game, generator })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading GTP command")?;

            // Everything after '#' is a comment
            let line = match line.find('#') {
                Some(i) => &line[..i],
                None => &line[..],
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "gtp command");
            let response = self.execute(&command, args);

            let (prefix, message) = match response {
                Ok(message) => ('=', message),
                Err(err) => {
                    warn!(%command, %err, "command failed");
                    ('?', err.to_string())
                }
            };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("writing GTP response")?;
            output.flush().context("flushing GTP response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command, returning the response text.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, GtpError> {
        match command {
            "name" => Ok(ENGINE_NAME.to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok(PROTOCOL_VERSION.to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let name = args.first().ok_or(GtpError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let arg = args.first().ok_or(GtpError::MissingArgument)?;
                let size = arg
                    .parse::<usize>()
                    .map_err(|_| GtpError::Syntax(format!("boardsize not an integer: {arg}")))?;
                self.game = Game::new(size)?;
                self.generator.reset();
                Ok(String::new())
            }

            "clear_board" => {
                self.game.clear();
                self.generator.reset();
                Ok(String::new())
            }

            "komi" => {
                let arg = args.first().ok_or(GtpError::MissingArgument)?;
                let komi = arg
                    .parse::<f32>()
                    .map_err(|_| GtpError::Syntax(format!("komi not a float: {arg}")))?;
                debug!(komi, "komi ignored by area scoring");
                Ok(String::new())
            }

            "play" => {
                let (color, vertex) = match args {
                    [color, vertex, ..] => (*color, *vertex),
                    _ => return Err(GtpError::MissingArgument),
                };
                let color = parse_color(color)?;
                let vertex = parse_vertex(vertex, self.game.size())?;

                let synced = self.sync_turn(color);
                match vertex {
                    Vertex::Pass => self.game.pass(),
                    Vertex::Point(point) => {
                        if let Err(err) = self.game.play(point) {
                            // Take back the pass inserted for turn order
                            if synced {
                                if let Err(undo_err) = self.game.undo() {
                                    warn!(%undo_err, "turn-order pass not taken back");
                                }
                            }
                            return Err(err.into());
                        }
                    }
                }
                Ok(String::new())
            }

            "genmove" => {
                let color = parse_color(args.first().ok_or(GtpError::MissingArgument)?)?;
                self.sync_turn(color);
                let vertex = match self.generator.generate(&mut self.game) {
                    GeneratedMove::Play(point) => Vertex::Point(point),
                    GeneratedMove::Pass => Vertex::Pass,
                };
                Ok(format_vertex(vertex, self.game.size()))
            }

            "undo" => {
                self.game.undo()?;
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.game.board()).trim_end().to_string()),

            "final_score" => {
                let score = self.game.score();
                let result = match score.black.cmp(&score.white) {
                    std::cmp::Ordering::Greater => format!("B+{}", score.black - score.white),
                    std::cmp::Ordering::Less => format!("W+{}", score.white - score.black),
                    std::cmp::Ordering::Equal => "0".to_string(),
                };
                Ok(result)
            }

            _ => Err(GtpError::UnknownCommand(command.to_string())),
        }
    }

    /// Make `color` the player to move by passing for the other side.
    /// Returns whether a pass was played.
    fn sync_turn(&mut self, color: Color) -> bool {
        if self.game.current_player() == color {
            return false;
        }
        debug!(%color, "out of turn, passing for the opponent");
        self.game.pass();
        true
    }
}
