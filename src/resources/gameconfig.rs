//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 704
//! height = 480
//! gravity = 400
//!
//! [simulation]
//! tick_rate = 60
//! players = 2
//!
//! [cat]
//! speed = 200
//! jump_strength = 320
//!
//! [player1]
//! left = A
//! right = D
//! jump = W
//! sleep = S
//! paw = E
//!
//! [player2]
//! left = Left
//! right = Right
//! jump = Up
//! sleep = Down
//! paw = Enter
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::character::KeyBindings;
use crate::resources::input::KeyCode;

/// Default safe values for startup
const DEFAULT_WORLD_WIDTH: f32 = 704.0;
const DEFAULT_WORLD_HEIGHT: f32 = 480.0;
const DEFAULT_GRAVITY: f32 = 400.0;
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_PLAYERS: usize = 2;
const DEFAULT_CAT_SPEED: f32 = 200.0;
const DEFAULT_CAT_JUMP_STRENGTH: f32 = 320.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const BINDING_KEYS: [&str; 5] = ["left", "right", "jump", "sleep", "paw"];

/// Game configuration resource.
///
/// Stores world dimensions, physics tuning, the cat's movement parameters and
/// one key binding table per player.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// World width in pixels.
    pub world_width: f32,
    /// World height in pixels.
    pub world_height: f32,
    /// Downward acceleration in pixels per second squared.
    pub gravity: f32,
    /// Fixed simulation ticks per second.
    pub tick_rate: u32,
    /// Number of cats to spawn.
    pub players: usize,
    pub cat_speed: f32,
    pub cat_jump_strength: f32,
    /// Key bindings, one table per player.
    pub bindings: Vec<KeyBindings>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            tick_rate: DEFAULT_TICK_RATE,
            players: DEFAULT_PLAYERS,
            cat_speed: DEFAULT_CAT_SPEED,
            cat_jump_strength: DEFAULT_CAT_JUMP_STRENGTH,
            bindings: vec![KeyBindings::wasd(), KeyBindings::arrows()],
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per simulation tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Key bindings for player `index` (zero-based).
    pub fn player_bindings(&self, index: usize) -> Option<&KeyBindings> {
        self.bindings.get(index)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [world] section
        if let Some(width) = config.getfloat("world", "width").ok().flatten() {
            self.world_width = width as f32;
        }
        if let Some(height) = config.getfloat("world", "height").ok().flatten() {
            self.world_height = height as f32;
        }
        if let Some(gravity) = config.getfloat("world", "gravity").ok().flatten() {
            self.gravity = gravity as f32;
        }

        // [simulation] section
        if let Some(rate) = config.getuint("simulation", "tick_rate").ok().flatten() {
            self.tick_rate = rate as u32;
        }
        if let Some(players) = config.getuint("simulation", "players").ok().flatten() {
            self.players = players as usize;
        }

        // [cat] section
        if let Some(speed) = config.getfloat("cat", "speed").ok().flatten() {
            self.cat_speed = speed as f32;
        }
        if let Some(jump) = config.getfloat("cat", "jump_strength").ok().flatten() {
            self.cat_jump_strength = jump as f32;
        }

        // [playerN] sections
        for index in 0..self.players {
            let section = format!("player{}", index + 1);
            let mut keys: Vec<Option<KeyCode>> = match self.bindings.get(index) {
                Some(b) => vec![
                    Some(b.move_left),
                    Some(b.move_right),
                    Some(b.jump),
                    Some(b.sleep),
                    Some(b.paw),
                ],
                None => vec![None; BINDING_KEYS.len()],
            };
            for (slot, name) in keys.iter_mut().zip(BINDING_KEYS) {
                if let Some(value) = config.get(&section, name) {
                    let key = value
                        .parse::<KeyCode>()
                        .map_err(|e| format!("[{section}] {name}: {e}"))?;
                    *slot = Some(key);
                }
            }
            let keys = keys
                .into_iter()
                .zip(BINDING_KEYS)
                .map(|(key, name)| key.ok_or_else(|| format!("[{section}] is missing '{name}'")))
                .collect::<Result<Vec<_>, String>>()?;
            let bindings = KeyBindings::new(keys[0], keys[1], keys[2], keys[3], keys[4])
                .map_err(|e| format!("[{section}] {e}"))?;
            if index < self.bindings.len() {
                self.bindings[index] = bindings;
            } else {
                self.bindings.push(bindings);
            }
        }

        self.validate()?;

        info!(
            "Loaded config: world {}x{}, gravity={}, tick_rate={}, players={}, speed={}, jump={}",
            self.world_width,
            self.world_height,
            self.gravity,
            self.tick_rate,
            self.players,
            self.cat_speed,
            self.cat_jump_strength
        );

        Ok(())
    }

    /// Check that every value is usable by the simulation.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            ));
        }
        if self.tick_rate == 0 {
            return Err("tick_rate must be at least 1".to_string());
        }
        if !self.gravity.is_finite() {
            return Err(format!("gravity must be finite, got {}", self.gravity));
        }
        if !(self.cat_speed.is_finite() && self.cat_speed > 0.0) {
            return Err(format!("cat speed must be positive, got {}", self.cat_speed));
        }
        if !(self.cat_jump_strength.is_finite() && self.cat_jump_strength > 0.0) {
            return Err(format!(
                "cat jump_strength must be positive, got {}",
                self.cat_jump_strength
            ));
        }
        if self.players > self.bindings.len() {
            return Err(format!(
                "{} players configured but only {} key binding tables",
                self.players,
                self.bindings.len()
            ));
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [world] section
        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));
        config.set("world", "gravity", Some(self.gravity.to_string()));

        // [simulation] section
        config.set("simulation", "tick_rate", Some(self.tick_rate.to_string()));
        config.set("simulation", "players", Some(self.players.to_string()));

        // [cat] section
        config.set("cat", "speed", Some(self.cat_speed.to_string()));
        config.set(
            "cat",
            "jump_strength",
            Some(self.cat_jump_strength.to_string()),
        );

        for (index, b) in self.bindings.iter().enumerate() {
            let section = format!("player{}", index + 1);
            let keys = [b.move_left, b.move_right, b.jump, b.sleep, b.paw];
            for (name, key) in BINDING_KEYS.iter().zip(keys) {
                config.set(&section, name, Some(key.to_string()));
            }
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
