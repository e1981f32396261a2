use serde::{Deserialize, Serialize};

/// Normalized viewport coordinates. `y` may leave 0..1 slightly after the lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Center of `rect` as a viewport fraction, raised by `lift` viewport heights
pub fn confetti_origin(rect: &Rect, viewport: &Viewport, lift: f64) -> Origin {
    let (x, y) = rect.center();
    Origin {
        x: x / viewport.width,
        y: y / viewport.height - lift,
    }
}

/// Arguments for one particle burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiConfig {
    pub particle_count: u32,
    pub spread: u32,
    pub origin: Origin,
    pub z_index: i32,
    pub colors: Vec<String>,
}

/// `#rrggbb` to an RGB triple
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Tunables for the burst, everything except where it starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiSettings {
    pub particle_count: u32,
    pub spread: u32,
    pub z_index: i32,
    pub colors: Vec<String>,
    pub origin_lift: f64,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            particle_count: 150,
            spread: 90,
            z_index: 1002,
            colors: vec![
                "#ffdd00".to_string(),
                "#ff0000".to_string(),
                "#00ff00".to_string(),
                "#0000ff".to_string(),
            ],
            origin_lift: 0.1,
        }
    }
}

impl ConfettiSettings {
    pub fn burst_at(&self, rect: &Rect, viewport: &Viewport) -> ConfettiConfig {
        ConfettiConfig {
            particle_count: self.particle_count,
            spread: self.spread,
            origin: confetti_origin(rect, viewport, self.origin_lift),
            z_index: self.z_index,
            colors: self.colors.clone(),
        }
    }
}

/// Fire-and-forget celebration effect
pub trait ParticleEffect {
    fn fire(&self, config: &ConfettiConfig);
}

/// Where the boxes sit on screen
pub trait BoxLayout {
    fn box_rect(&self, index: usize) -> Rect;
    fn viewport(&self) -> Viewport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_lifted_center() {
        let viewport = Viewport {
            width: 1000.0,
            height: 500.0,
        };
        let rect = Rect::new(100.0, 200.0, 200.0, 100.0);

        let origin = confetti_origin(&rect, &viewport, 0.1);
        assert!((origin.x - 0.2).abs() < 1e-9);
        assert!((origin.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_origin_may_leave_viewport() {
        let viewport = Viewport {
            width: 100.0,
            height: 100.0,
        };
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let origin = confetti_origin(&rect, &viewport, 0.1);
        assert!(origin.y < 0.0);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffdd00"), Some((255, 221, 0)));
        assert_eq!(parse_hex_color("#0000ff"), Some((0, 0, 255)));
        assert_eq!(parse_hex_color("ffdd00"), None);
        assert_eq!(parse_hex_color("#ggg000"), None);
        // six bytes, but not six hex digits
        assert_eq!(parse_hex_color("#a\u{e9}123"), None);
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let settings = ConfettiSettings::default();
        let config = settings.burst_at(
            &Rect::new(0.0, 0.0, 100.0, 100.0),
            &Viewport {
                width: 100.0,
                height: 100.0,
            },
        );

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["particleCount"], 150);
        assert_eq!(json["spread"], 90);
        assert_eq!(json["zIndex"], 1002);
        assert_eq!(json["colors"].as_array().unwrap().len(), 4);
    }
}
