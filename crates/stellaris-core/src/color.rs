//! Spectral class to display color mapping.

use crate::defaults;

/// Color used for spectral classes outside the O–M sequence.
pub const FALLBACK_COLOR: &str = "#ffffff";

/// Map a spectral classification to a hex display color.
///
/// Only the first character matters, case-insensitively. A missing or
/// empty class is treated as `"G"`.
pub fn spectral_color(spectral_class: Option<&str>) -> &'static str {
    let class = spectral_class
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(defaults::SPECTRAL_CLASS);

    match class.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('O') => "#9bb0ff",
        Some('B') => "#aabfff",
        Some('A') => "#cad7ff",
        Some('F') => "#f8f7ff",
        Some('G') => "#fff4ea",
        Some('K') => "#ffd2a1",
        Some('M') => "#ffcc6f",
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_sequence_colors() {
        let expected = [
            ("O5", "#9bb0ff"),
            ("B8Ia", "#aabfff"),
            ("A1V", "#cad7ff"),
            ("F0", "#f8f7ff"),
            ("G2V", "#fff4ea"),
            ("K5III", "#ffd2a1"),
            ("M1-2Ia-Iab", "#ffcc6f"),
        ];
        for (class, color) in expected {
            assert_eq!(spectral_color(Some(class)), color, "class {}", class);
        }
    }

    #[test]
    fn test_lowercase_first_character() {
        assert_eq!(spectral_color(Some("a")), "#cad7ff");
        assert_eq!(spectral_color(Some("m3")), "#ffcc6f");
    }

    #[test]
    fn test_missing_class_defaults_to_g() {
        assert_eq!(spectral_color(None), "#fff4ea");
        assert_eq!(spectral_color(Some("")), "#fff4ea");
    }

    #[test]
    fn test_unknown_class_is_white() {
        assert_eq!(spectral_color(Some("DA2")), FALLBACK_COLOR);
        assert_eq!(spectral_color(Some("WR")), FALLBACK_COLOR);
    }
}
