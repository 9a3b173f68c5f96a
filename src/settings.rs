//! Game settings and difficulty tuning
//!
//! Two rule sets exist: the classic single-jump game and an arcade mode
//! with double jumps, score-scaled speed and tall hazard obstacles. Pages can
//! pick one (or supply a custom tuning) through an inline JSON block.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Extent;

/// Difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreset {
    /// Single jump, constant speed, no hazards
    #[default]
    Classic,
    /// Double jump, speed scales with score, hazards after score 5
    Arcade,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Classic => "Classic",
            DifficultyPreset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "easy" => Some(DifficultyPreset::Classic),
            "arcade" | "hard" => Some(DifficultyPreset::Arcade),
            _ => None,
        }
    }

    /// Tuning values for this preset
    pub fn difficulty(&self) -> Difficulty {
        match self {
            DifficultyPreset::Classic => Difficulty::default(),
            DifficultyPreset::Arcade => Difficulty {
                max_jumps: 2,
                base_speed: 7.0,
                speed_per_point: 0.05,
                hazards: true,
                ..Difficulty::default()
            },
        }
    }
}

/// Gameplay tuning. Speeds and accelerations are per simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    /// Jumps allowed before landing (1 = single jump, 2 = double jump)
    pub max_jumps: u8,
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    pub spawn_interval_ms: f64,
    /// Obstacle speed at score 0
    pub base_speed: f32,
    /// Extra obstacle speed per point, applied at spawn time
    pub speed_per_point: f32,
    /// Whether tall hazard obstacles can spawn
    pub hazards: bool,
    pub hazard_chance: f64,
    /// Hazards only roll once the score is strictly above this
    pub hazard_min_score: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            max_jumps: 1,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            base_speed: 5.0,
            speed_per_point: 0.0,
            hazards: false,
            hazard_chance: HAZARD_CHANCE,
            hazard_min_score: HAZARD_MIN_SCORE,
        }
    }
}

impl Difficulty {
    /// Obstacle speed for an obstacle spawned at the given score
    pub fn obstacle_speed(&self, score: u32) -> f32 {
        self.base_speed + score as f32 * self.speed_per_point
    }

    /// What makes this tuning unplayable, if anything.
    ///
    /// Obstacles must keep moving left at every score, the player must fall
    /// back to the floor and be able to jump at least once.
    pub fn problem(&self) -> Option<&'static str> {
        if self.max_jumps == 0 {
            return Some("max_jumps must be at least 1");
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Some("gravity must be positive");
        }
        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Some("jump_impulse must be negative");
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Some("spawn_interval_ms must be positive");
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Some("base_speed must be positive");
        }
        if !(self.speed_per_point.is_finite() && self.speed_per_point >= 0.0) {
            return Some("speed_per_point must not be negative");
        }
        if !self.hazard_chance.is_finite() {
            return Some("hazard_chance must be a number");
        }
        None
    }
}

/// Page-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: DifficultyPreset,
    /// Custom tuning, overrides the preset when present
    pub difficulty: Option<Difficulty>,
    /// Fixed RNG seed (defaults to the page load time)
    pub seed: Option<u64>,
    /// Player sprite image path
    pub sprite_path: String,
    /// Size the canvas to the viewport instead of the fixed size
    pub fit_viewport: bool,
    pub width: f32,
    pub height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: DifficultyPreset::Classic,
            difficulty: None,
            seed: None,
            sprite_path: "player.png".to_string(),
            fit_viewport: false,
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective tuning. A playable custom override wins over the preset.
    pub fn difficulty(&self) -> Difficulty {
        let Some(custom) = self.difficulty else {
            return self.preset.difficulty();
        };
        match custom.problem() {
            None => custom,
            Some(problem) => {
                log::warn!(
                    "Ignoring custom difficulty ({}), using {} preset",
                    problem,
                    self.preset.as_str()
                );
                self.preset.difficulty()
            }
        }
    }

    /// Surface size, falling back to the fixed default when the configured
    /// one is empty or not a number
    pub fn extent(&self) -> Extent {
        let extent = Extent::new(self.width, self.height);
        if extent.is_positive() {
            return extent;
        }
        log::warn!(
            "Ignoring surface size {}x{}, using {}x{}",
            self.width,
            self.height,
            SURFACE_WIDTH,
            SURFACE_HEIGHT
        );
        Extent::default()
    }

    /// Element id of the inline JSON config block
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    /// Load settings from the page's inline config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings ({} mode)", settings.preset.as_str());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid #{}: {}", Self::CONFIG_ELEMENT_ID, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} on native, using defaults", Self::CONFIG_ELEMENT_ID);
        Self::default()
    }
}
