//! Headless game runner implementation.
//!
//! Reads one [`Command`] per line, applies it to the current game and
//! writes exactly one [`Response`] line back. Rules errors and malformed
//! lines are answered with an `error` line; only IO failures stop the loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use dsr_core::input::{TapOutcome, TapTarget};
use dsr_core::player::Player;
use dsr_core::state::GameState;
use dsr_core::UnitId;

use crate::ascii_visualizer::{render_board, AsciiConfig};
use crate::protocol::{resolve_cell, Command, Response};
use crate::scenario::{Scenario, ScenarioError};

/// Headless runner configuration.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Scenario file to load on startup. The standard game when `None`.
    pub scenario_path: Option<PathBuf>,
}

/// Headless runner for scripted or AI-controlled play.
#[derive(Debug, Clone)]
pub struct HeadlessRunner {
    game: GameState,
    render: AsciiConfig,
    finished: bool,
}

impl HeadlessRunner {
    /// Create a runner on the standard game.
    pub fn new() -> Self {
        Self::with_game(GameState::new_game())
    }

    /// Create a runner on an existing game.
    pub fn with_game(game: GameState) -> Self {
        Self {
            game,
            render: AsciiConfig::default(),
            finished: false,
        }
    }

    /// Create a runner from configuration, loading the scenario if any.
    pub fn with_config(config: &HeadlessConfig) -> Result<Self, ScenarioError> {
        let game = match &config.scenario_path {
            Some(path) => Scenario::load(path)?.start()?,
            None => GameState::new_game(),
        };
        Ok(Self::with_game(game))
    }

    /// The game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Whether a `quit` command has been handled.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run the session loop until `quit` or end of input.
    ///
    /// Writes a `ready` line first and flushes after every response.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write_response(
            &mut output,
            &Response::ready(self.game.turn(), self.game.active_player()),
        )?;

        for line in input.lines() {
            let line = line?;
            let response = self.handle_line(&line);
            if let Some(response) = response {
                write_response(&mut output, &response)?;
            }
            if self.finished {
                break;
            }
        }

        tracing::info!(turn = self.game.turn(), "Session finished");
        Ok(())
    }

    /// Handle one raw input line. Blank lines produce no response.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match Command::from_json(line) {
            Ok(command) => Some(self.handle(command)),
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable command");
                Some(Response::error(format!("Parse error: {e}"), None))
            }
        }
    }

    /// Apply one command.
    pub fn handle(&mut self, command: Command) -> Response {
        let name = command.name();
        tracing::debug!(cmd = name, "Handling command");

        match command {
            Command::NewGame => {
                self.game = GameState::new_game();
                self.ready()
            }
            Command::LoadScenario { path } => match Scenario::load(&path).and_then(|s| s.start()) {
                Ok(game) => {
                    self.game = game;
                    self.ready()
                }
                Err(e) => Response::error(e.to_string(), Some(name)),
            },
            Command::Select { x, y, world } => Response::Selected {
                result: self.game.select(resolve_cell(x, y, world)),
            },
            Command::Tap { x, y, world } => {
                let outcome = self.game.tap(TapTarget::Cell(resolve_cell(x, y, world)));
                self.tap_response(outcome, name)
            }
            Command::Control { control } => {
                let outcome = self.game.tap(TapTarget::Control(control));
                self.tap_response(outcome, name)
            }
            Command::Move { x, y, world } => {
                match self.game.move_selected(resolve_cell(x, y, world)) {
                    Ok(outcome) => Response::Moved { outcome },
                    Err(e) => Response::rejected(e, name),
                }
            }
            Command::Attack { x, y, world } => match self.game.attack(resolve_cell(x, y, world)) {
                Ok(outcome) => Response::Attacked { outcome },
                Err(e) => Response::rejected(e, name),
            },
            Command::Capture => match self.game.capture_base() {
                Ok(outcome) => Response::Captured { outcome },
                Err(e) => Response::rejected(e, name),
            },
            Command::Build => match self.game.build_unit() {
                Ok(unit) => self.built(unit),
                Err(e) => Response::rejected(e, name),
            },
            Command::EndTurn => Response::TurnEnded {
                report: self.game.end_turn(),
            },
            Command::Query => self.state(),
            Command::Render => Response::Board {
                turn: self.game.turn(),
                lines: render_board(&self.game, &self.render),
            },
            Command::Quit => {
                self.finished = true;
                Response::Bye
            }
        }
    }

    fn tap_response(&self, outcome: TapOutcome, name: &str) -> Response {
        match outcome {
            TapOutcome::Selected(result) => Response::Selected { result },
            TapOutcome::Deselected => Response::Selected {
                result: self.game.selection_result(),
            },
            TapOutcome::Moved(outcome) => Response::Moved { outcome },
            TapOutcome::Attacked(outcome) => Response::Attacked { outcome },
            TapOutcome::Captured(outcome) => Response::Captured { outcome },
            TapOutcome::Built(unit) => self.built(unit),
            TapOutcome::TurnEnded(report) => Response::TurnEnded { report },
            TapOutcome::Rejected(e) => Response::rejected(e, name),
        }
    }

    fn built(&self, unit: UnitId) -> Response {
        match self.game.unit(unit) {
            Some(u) => Response::Built { unit, cell: u.cell },
            None => Response::error(format!("{unit} vanished after being built"), Some("build")),
        }
    }

    fn ready(&self) -> Response {
        Response::ready(self.game.turn(), self.game.active_player())
    }

    fn state(&self) -> Response {
        Response::State {
            snapshot: self.game.snapshot(),
            summaries: Player::ALL
                .iter()
                .map(|&player| self.game.summary(player))
                .collect(),
        }
    }
}

impl Default for HeadlessRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn write_response<W: Write>(output: &mut W, response: &Response) -> io::Result<()> {
    output.write_all(response.to_json_line().as_bytes())?;
    output.flush()
}
