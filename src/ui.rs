//! HUD text
//!
//! Formatting for everything the DOM overlay shows. The driver writes these
//! strings into the page; keeping them here lets them be tested natively.

/// Kilometres shown on the level banner per level
const BANNER_KM_PER_LEVEL: u32 = 15;

/// Running distance, one decimal place
pub fn distance_text(distance_km: f64) -> String {
    format!("{distance_km:.1}")
}

pub fn level_text(level: u32) -> String {
    format!("{level}")
}

/// Speedometer reading: ten km/h per pixel-per-tick
pub fn speed_text(velocity: f32) -> String {
    format!("{} km/h", (velocity * 10.0).round() as i32)
}

/// Headline and subtitle for the level-up banner
pub fn level_banner(level: u32) -> (String, String) {
    (
        format!("LEVEL {level}!"),
        format!("{} km", level * BANNER_KM_PER_LEVEL),
    )
}

/// Final distance for the game-over overlay, whole kilometres
pub fn game_over_text(score: f64, score_scale: f64) -> String {
    format!("{} km", (score / score_scale).floor() as u64)
}

/// CSS transform for the banner at a given scale
pub fn banner_transform(scale: f32) -> String {
    format!("translate(-50%, -50%) scale({scale:.3})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_one_decimal() {
        assert_eq!(distance_text(0.0), "0.0");
        assert_eq!(distance_text(9.6), "9.6");
        assert_eq!(distance_text(12.34), "12.3");
    }

    #[test]
    fn test_speed() {
        assert_eq!(speed_text(2.0), "20 km/h");
        assert_eq!(speed_text(12.0), "120 km/h");
        assert_eq!(speed_text(6.5), "65 km/h");
    }

    #[test]
    fn test_banner() {
        let (title, subtitle) = level_banner(3);
        assert_eq!(title, "LEVEL 3!");
        assert_eq!(subtitle, "45 km");
    }

    #[test]
    fn test_game_over_floors() {
        assert_eq!(game_over_text(96.0, 10.0), "9 km");
        assert_eq!(game_over_text(9.9, 10.0), "0 km");
        assert_eq!(level_text(4), "4");
    }

    #[test]
    fn test_banner_transform() {
        assert_eq!(banner_transform(0.5), "translate(-50%, -50%) scale(0.500)");
    }
}
