use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest board side, in tiles. Keeps tile coordinates well inside `i32`
/// and the board inside a terminal buffer.
pub const MAX_TILE_COUNT: usize = 1_000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, in pixels
    pub board_pixels: u32,
    /// Side length of one tile, in pixels
    pub grid_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded for eating food
    pub food_reward: u32,
    /// Time between two ticks, in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_pixels: 400,
            grid_size: 20,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board geometry
    pub fn new(board_pixels: u32, grid_size: u32) -> Self {
        Self {
            board_pixels,
            grid_size,
            ..Default::default()
        }
    }

    /// A 10x10 board for tests
    pub fn small() -> Self {
        Self::new(200, 20)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        Ok(config)
    }

    /// Number of tiles along each side of the board
    pub fn tile_count(&self) -> usize {
        if self.grid_size == 0 {
            return 0;
        }
        (self.board_pixels / self.grid_size) as usize
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject geometries the engine cannot start a game on
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            bail!("grid size must be positive");
        }
        if self.board_pixels == 0 || self.board_pixels % self.grid_size != 0 {
            bail!(
                "board size {} is not a positive multiple of grid size {}",
                self.board_pixels,
                self.grid_size
            );
        }
        if self.tile_count() > MAX_TILE_COUNT {
            bail!(
                "a {}x{} board is larger than the {}x{} limit",
                self.tile_count(),
                self.tile_count(),
                MAX_TILE_COUNT,
                MAX_TILE_COUNT
            );
        }
        if self.initial_snake_length == 0 {
            bail!("initial snake length must be at least 1");
        }
        // The starting snake runs left from the centre tile.
        if self.initial_snake_length > self.tile_count() / 2 + 1 {
            bail!(
                "a {}x{} board cannot hold a snake of length {}",
                self.tile_count(),
                self.tile_count(),
                self.initial_snake_length
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tile_count(), 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 15);
        assert_eq!(config.tile_count(), 20);
        assert_eq!(GameConfig::small().tile_count(), 10);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(GameConfig::new(400, 0).validate().is_err());
        assert!(GameConfig::new(410, 20).validate().is_err());
        assert!(GameConfig::new(60, 20).validate().is_err());

        // Tile coordinates must stay representable
        assert!(GameConfig::new(u32::MAX, 1).validate().is_err());
        assert!(GameConfig::new(1_001, 1).validate().is_err());
        assert!(GameConfig::new(1_000, 1).validate().is_ok());

        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"grid_size": 10, "tick_interval_ms": 80}"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.board_pixels, 400);
        assert_eq!(config.tile_count(), 40);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GameConfig::from_file(&temp_dir.path().join("nope.json")).is_err());
    }
}
