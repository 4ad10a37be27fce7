use serde::{Deserialize, Deserializer, Serialize, de};
use std::hash::{Hash, Hasher};

/// A device color in one of the two models the content stream understands.
/// Components are normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    Rgb { r: f32, g: f32, b: f32 },
    Cmyk { c: f32, m: f32, y: f32, k: f32 },
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Color::Rgb { r, g, b } => {
                0u8.hash(state);
                r.to_bits().hash(state);
                g.to_bits().hash(state);
                b.to_bits().hash(state);
            }
            Color::Cmyk { c, m, y, k } => {
                1u8.hash(state);
                c.to_bits().hash(state);
                m.to_bits().hash(state);
                y.to_bits().hash(state);
                k.to_bits().hash(state);
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color::Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::Rgb { r, g, b }
    }

    pub fn cmyk(c: f32, m: f32, y: f32, k: f32) -> Self {
        Color::Cmyk { c, m, y, k }
    }

    pub fn gray(value: f32) -> Self {
        Color::Rgb {
            r: value,
            g: value,
            b: value,
        }
    }

    /// Parse a hex color string (#RGB or #RRGGBB format).
    fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        if !s.starts_with('#') {
            return Err(format!("Color must start with #, got: {}", s));
        }
        let hex = &s[1..];

        let component = |digits: &str| -> Result<f32, String> {
            u8::from_str_radix(digits, 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| format!("Invalid color component: {}", e))
        };

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = component(&hex[0..1].repeat(2))?;
                let g = component(&hex[1..2].repeat(2))?;
                let b = component(&hex[2..3].repeat(2))?;
                Ok(Color::Rgb { r, g, b })
            }
            6 => {
                // #RRGGBB format
                let r = component(&hex[0..2])?;
                let g = component(&hex[2..4])?;
                let b = component(&hex[4..6])?;
                Ok(Color::Rgb { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Rgb { r: f32, g: f32, b: f32 },
            Cmyk { c: f32, m: f32, y: f32, k: f32 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Rgb { r, g, b } => Ok(Color::Rgb { r, g, b }),
            ColorDef::Cmyk { c, m, y, k } => Ok(Color::Cmyk { c, m, y, k }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::parse_hex("#ff0000").unwrap(),
            Color::rgb(1.0, 0.0, 0.0)
        );
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("123456").is_err());
    }

    #[test]
    fn gray_replicates_channels() {
        let g = Color::gray(0.5);
        assert_eq!(g, Color::rgb(0.5, 0.5, 0.5));
    }
}
