//! Scenario loading.
//!
//! A scenario names a starting position: the rules constants, where every
//! base and tank starts, and who moves first. Scenarios are RON files:
//!
//! ```ron
//! Scenario(
//!     name: "Base rush",
//!     description: "One neutral base between two tanks",
//!     config: GameConfig(
//!         layout: Layout(
//!             bases: [BasePlacement(cell: (x: 0, y: 0))],
//!             units: [
//!                 UnitPlacement(owner: red, cell: (x: 0, y: -3)),
//!                 UnitPlacement(owner: blue, cell: (x: 0, y: 3)),
//!             ],
//!         ),
//!     ),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dsr_core::config::GameConfig;
use dsr_core::error::GameError;
use dsr_core::state::GameState;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Parsed, but the game it describes is not playable.
    #[error("Invalid scenario: {0}")]
    InvalidConfig(#[from] GameError),
    /// Failed to write RON.
    #[error("Failed to serialize scenario: {0}")]
    WriteError(#[from] ron::Error),
}

/// A named starting position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Rules and layout.
    #[serde(default)]
    pub config: GameConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "Standard".to_string(),
            description: "Nine neutral bases, five tanks a side".to_string(),
            config: GameConfig::default(),
        }
    }
}

impl Scenario {
    /// Load and validate a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario = Self::from_ron_str(&contents)?;
        tracing::debug!(path = %path.display(), name = %scenario.name, "Loaded scenario");
        Ok(scenario)
    }

    /// Parse and validate a scenario from RON text.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Serialize as pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ScenarioError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Write to a RON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ScenarioError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Start a game from this scenario.
    pub fn start(&self) -> Result<GameState, ScenarioError> {
        Ok(GameState::from_config(self.config.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsr_core::player::Player;

    #[test]
    fn test_default_is_standard_game() {
        let game = Scenario::default().start().unwrap();
        assert_eq!(game.units().count(), 10);
        assert_eq!(game.bases().count(), 9);
    }

    #[test]
    fn test_parse_minimal() {
        let scenario = Scenario::from_ron_str(r#"Scenario(name: "Empty")"#).unwrap();
        assert_eq!(scenario.name, "Empty");
        assert_eq!(scenario.config, GameConfig::default());
    }

    #[test]
    fn test_parse_layout() {
        let text = r#"
            Scenario(
                name: "Duel",
                config: GameConfig(
                    layout: Layout(
                        units: [
                            UnitPlacement(owner: red, cell: (x: 0, y: 0)),
                            UnitPlacement(owner: blue, cell: (x: 0, y: 2)),
                        ],
                    ),
                    first_player: blue,
                ),
            )
        "#;
        let scenario = Scenario::from_ron_str(text).unwrap();
        let game = scenario.start().unwrap();
        assert_eq!(game.active_player(), Player::Blue);
        assert_eq!(game.units().count(), 2);
        assert_eq!(game.bases().count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let text = r#"Scenario(name: "Broken", config: GameConfig(rules: Rules(move_radius: 0), layout: Layout(bases: [])))"#;
        assert!(matches!(
            Scenario::from_ron_str(text),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_edge_of_grid_rejected() {
        let text = r#"
            Scenario(
                name: "Edge",
                config: GameConfig(
                    layout: Layout(
                        units: [UnitPlacement(owner: red, cell: (x: 2147483646, y: 0))],
                    ),
                ),
            )
        "#;
        assert!(matches!(
            Scenario::from_ron_str(text),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Scenario::from_ron_str("Scenario(name: "),
            Err(ScenarioError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scenario::load("/nonexistent/scenario.ron"),
            Err(ScenarioError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_ron_round_trip() {
        let scenario = Scenario::default();
        let text = scenario.to_ron_string().unwrap();
        assert_eq!(Scenario::from_ron_str(&text).unwrap(), scenario);
    }
}
