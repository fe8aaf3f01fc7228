//! Demo catalogue used to seed an empty store at start-up.

use super::Raqueta;

/// Returns the demo rackets as unsaved entities, in insertion order.
pub fn demo_raquetas() -> Vec<Raqueta> {
    vec![
        Raqueta::unsaved(
            "Babolat",
            "Pure Aero",
            249.95,
            Some("https://www.babolat.com/pure-aero.png".to_string()),
        ),
        Raqueta::unsaved(
            "Babolat",
            "Pure Drive",
            229.95,
            Some("https://www.babolat.com/pure-drive.png".to_string()),
        ),
        Raqueta::unsaved(
            "Head",
            "Speed MP",
            239.00,
            Some("https://www.head.com/speed-mp.png".to_string()),
        ),
        Raqueta::unsaved(
            "Wilson",
            "Pro Staff 97",
            269.00,
            Some("https://www.wilson.com/pro-staff-97.png".to_string()),
        ),
        Raqueta::unsaved(
            "Wilson",
            "Blade 98",
            259.00,
            Some("https://www.wilson.com/blade-98.png".to_string()),
        ),
        Raqueta::unsaved("Yonex", "EZONE 98", 245.50, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalogue_is_valid() {
        let demo = demo_raquetas();
        assert!(!demo.is_empty());
        for raqueta in &demo {
            assert!(!raqueta.brand.trim().is_empty());
            assert!(!raqueta.model.trim().is_empty());
            assert!(raqueta.price >= 0.0);
            assert_eq!(raqueta.id, 0);
        }
    }
}
