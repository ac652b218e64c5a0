use serde::{Deserialize, Serialize};
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_engine::GameSettings;

use crate::autopilot::parse_turn;

pub const CONFIG_FILE: &str = "snake_simulator.yaml";

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, SimulatorConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SimulatorConfig {
    pub game: GameSettings,
    pub tick_interval_ms: u32,
    pub max_ticks: u64,
    pub realtime: bool,
    pub autopilot: AutopilotConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AutopilotConfig {
    /// Never steers; the snake runs straight into the wall and respawns.
    Idle,
    /// Turns at fixed ticks, written as `"<tick>:<heading>"`; the first tick is 1.
    Scripted { turns: Vec<String> },
    /// Picks a random safe quarter turn with the given probability each tick.
    Random { turn_probability: f64 },
    /// Steers towards the apple, avoiding cells that would end the run.
    Greedy,
}

impl Validate for SimulatorConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.tick_interval_ms < 10 {
            return Err("tick_interval_ms must be at least 10".to_string());
        }
        if self.tick_interval_ms > 5000 {
            return Err("tick_interval_ms must not exceed 5000".to_string());
        }
        if self.max_ticks == 0 {
            return Err("max_ticks must be greater than 0".to_string());
        }
        self.autopilot.validate()?;
        Ok(())
    }
}

impl Validate for AutopilotConfig {
    fn validate(&self) -> Result<(), String> {
        match self {
            AutopilotConfig::Idle | AutopilotConfig::Greedy => Ok(()),
            AutopilotConfig::Scripted { turns } => {
                for turn in turns {
                    parse_turn(turn)?;
                }
                Ok(())
            }
            AutopilotConfig::Random { turn_probability } => {
                if !(0.0..=1.0).contains(turn_probability) {
                    return Err("turn_probability must be between 0 and 1".to_string());
                }
                Ok(())
            }
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            tick_interval_ms: 500,
            max_ticks: 1000,
            realtime: false,
            autopilot: AutopilotConfig::Greedy,
        }
    }
}
