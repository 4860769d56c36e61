//! Host settings
//!
//! Viewport, physics tuning and the chosen characters. Loaded from JSON by
//! the native binary; the web host builds them from the canvas size.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Selectable character sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CharacterId {
    #[default]
    #[serde(rename = "male_1")]
    Male1,
    #[serde(rename = "male_2")]
    Male2,
    #[serde(rename = "female_1")]
    Female1,
    #[serde(rename = "female_2")]
    Female2,
    #[serde(rename = "female_3")]
    Female3,
    /// Female 1 body with a custom head
    #[serde(rename = "sofia")]
    Sofia,
}

impl CharacterId {
    pub const ALL: [CharacterId; 6] = [
        CharacterId::Male1,
        CharacterId::Male2,
        CharacterId::Female1,
        CharacterId::Female2,
        CharacterId::Female3,
        CharacterId::Sofia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Male1 => "male_1",
            CharacterId::Male2 => "male_2",
            CharacterId::Female1 => "female_1",
            CharacterId::Female2 => "female_2",
            CharacterId::Female3 => "female_3",
            CharacterId::Sofia => "sofia",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male_1" => Some(CharacterId::Male1),
            "male_2" => Some(CharacterId::Male2),
            "female_1" => Some(CharacterId::Female1),
            "female_2" => Some(CharacterId::Female2),
            "female_3" => Some(CharacterId::Female3),
            "sofia" => Some(CharacterId::Sofia),
            _ => None,
        }
    }

    /// Display name for menus
    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterId::Male1 => "Male 1",
            CharacterId::Male2 => "Male 2",
            CharacterId::Female1 => "Female 1",
            CharacterId::Female2 => "Female 2",
            CharacterId::Female3 => "Female 3",
            CharacterId::Sofia => "Sofia",
        }
    }

    /// Body sprite path the presentation layer loads
    pub fn sprite_body_url(&self) -> String {
        let body = match self {
            CharacterId::Sofia => CharacterId::Female1,
            other => *other,
        };
        format!("/sprites/players/bodies/{}.png", body.as_str())
    }

    /// Head overlay, for characters that have one
    pub fn sprite_head_url(&self) -> Option<String> {
        match self {
            CharacterId::Sofia => Some(format!("/sprites/players/heads/{}.png", self.as_str())),
            _ => None,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Simulation ===
    /// RNG seed for serves and opponent decisions
    pub seed: u64,
    /// Arcade gravity (pixels/s²)
    pub gravity: f32,
    /// How far past the midline a shuttle still counts as reachable
    pub swipe_side_tolerance: f32,

    // === Characters (presentation only) ===
    pub player_character: CharacterId,
    pub opponent_character: CharacterId,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,

            seed: 0,
            gravity: DEFAULT_GRAVITY,
            swipe_side_tolerance: SWIPE_SIDE_TOLERANCE,

            player_character: CharacterId::Male1,
            opponent_character: CharacterId::Female1,
        }
    }
}

impl Settings {
    /// Settings for a viewport, everything else default
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Copy with degenerate values replaced by usable ones
    pub fn sanitized(&self) -> Self {
        let mut settings = self.clone();

        if !settings.viewport_width.is_finite() || settings.viewport_width < MIN_VIEWPORT_WIDTH {
            log::warn!(
                "Unusable viewport width {}, using {}",
                settings.viewport_width,
                MIN_VIEWPORT_WIDTH
            );
            settings.viewport_width = MIN_VIEWPORT_WIDTH;
        }
        if !settings.viewport_height.is_finite() || settings.viewport_height < MIN_VIEWPORT_HEIGHT {
            log::warn!(
                "Unusable viewport height {}, using {}",
                settings.viewport_height,
                MIN_VIEWPORT_HEIGHT
            );
            settings.viewport_height = MIN_VIEWPORT_HEIGHT;
        }
        if !settings.gravity.is_finite() || settings.gravity <= 0.0 {
            log::warn!("Invalid gravity {}, using default", settings.gravity);
            settings.gravity = DEFAULT_GRAVITY;
        }
        if !settings.swipe_side_tolerance.is_finite() || settings.swipe_side_tolerance < 0.0 {
            settings.swipe_side_tolerance = SWIPE_SIDE_TOLERANCE;
        }

        settings
    }
}
