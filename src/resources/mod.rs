//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – definitions for sprite animations reused across entities
//! - `gameconfig` – INI-backed settings: world, physics, cat tuning, key bindings
//! - `input` – keys held this tick and the `KeySource` query
//! - `inputscript` – scripted key holds for headless runs
//! - `tilemapstore` – loaded tile maps and layers
//! - `worldbounds` – playable area
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod gameconfig;
pub mod input;
pub mod inputscript;
pub mod tilemapstore;
pub mod worldbounds;
pub mod worldtime;
