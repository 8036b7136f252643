//! Presentation preferences
//!
//! Nothing here touches the simulation. Settings are read once at startup
//! (from the canvas `data-settings` attribute in the browser) and changed at
//! runtime only through the mute toggle.

use serde::{Deserialize, Serialize};

/// Player-facing presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visuals ===
    /// Scroll the dashed lane dividers with the car's speed
    pub animate_lane_markers: bool,

    // === Accessibility ===
    /// Reduced motion (static banner, still lane markers)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            animate_lane_markers: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse a partial JSON object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Gain applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective lane-marker scrolling (respects reduced_motion)
    pub fn effective_lane_markers(&self) -> bool {
        self.animate_lane_markers && !self.reduced_motion
    }

    /// Effective banner zoom (respects reduced_motion)
    pub fn effective_banner_zoom(&self) -> bool {
        !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"muted": true, "sfx_volume": 3.0}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.animate_lane_markers);
    }

    #[test]
    fn test_bad_json() {
        assert!(Settings::from_json("{muted").is_err());
    }

    #[test]
    fn test_mute_silences() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        assert!(settings.toggle_mute());
        assert_eq!(settings.effective_volume(), 0.0);
        assert!(!settings.toggle_mute());
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_lane_markers());
        assert!(!settings.effective_banner_zoom());
    }
}
