use std::{fmt, str::FromStr};

/// ABGR color packed as u32 value (most of the platforms are little-endian)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RGBA(u32);

impl RGBA {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32))
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xff) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Override alpha component of the color
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00ff_ffff) | ((alpha as u32) << 24))
    }

    pub const fn is_opaque(self) -> bool {
        self.alpha() == 255
    }

    /// Convert color to sRGBA list
    pub fn to_rgba(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Convert color to sRGB list (alpha is discarded)
    pub fn to_rgb(self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba();
        [r, g, b]
    }

    /// Composite this color on top of `background`.
    ///
    /// Opaque colors replace the background. Translucent colors are linearly
    /// interpolated with integer truncation `(bg * (255 - a) + fg * a) / 255`.
    /// Background alpha is ignored and the result is always opaque.
    pub fn blend_over(self, background: Self) -> Self {
        if self.is_opaque() {
            return self;
        }
        let alpha = self.alpha() as u32;
        let [bg_r, bg_g, bg_b] = background.to_rgb();
        let [fg_r, fg_g, fg_b] = self.to_rgb();
        let mix = |bg: u8, fg: u8| ((bg as u32 * (255 - alpha) + fg as u32 * alpha) / 255) as u8;
        Self::rgb(mix(bg_r, fg_r), mix(bg_g, fg_g), mix(bg_b, fg_b))
    }
}

impl From<[u8; 4]> for RGBA {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        RGBA::new(r, g, b, a)
    }
}

impl From<[u8; 3]> for RGBA {
    fn from([r, g, b]: [u8; 3]) -> Self {
        RGBA::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for RGBA {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        RGBA::new(r, g, b, a)
    }
}

impl From<(u8, u8, u8)> for RGBA {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        RGBA::rgb(r, g, b)
    }
}

impl fmt::Debug for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({})", self)
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for RGBA {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && (color.len() == 7 || color.len() == 9) {
            // #RRGGBB(AA)
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok((digit(pair[0])? << 4) | digit(pair[1])?));
            Ok(RGBA::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(255))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RGBA {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RGBA {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = <String as serde::Deserialize>::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexidemical format")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_u8() {
        let c = RGBA::new(1, 2, 3, 4);
        assert_eq!([1, 2, 3, 4], c.to_rgba());
        assert_eq!(1, c.red());
        assert_eq!(2, c.green());
        assert_eq!(3, c.blue());
        assert_eq!(4, c.alpha());
        assert_eq!(RGBA::new(1, 2, 3, 200), c.with_alpha(200));
        assert_eq!(RGBA::new(1, 2, 3, 255), RGBA::from((1, 2, 3)));
    }

    #[test]
    fn test_color_u8_parse() -> Result<(), ColorError> {
        assert_eq!(RGBA::new(1, 2, 3, 4), "#01020304".parse::<RGBA>()?);
        assert_eq!(RGBA::new(170, 187, 204, 255), "#aabbcc".parse::<RGBA>()?);
        assert_eq!(RGBA::new(0, 0, 0, 255), "#000000".parse::<RGBA>()?);
        assert!("6750a4".parse::<RGBA>().is_err());
        assert!("#6750g4".parse::<RGBA>().is_err());
        Ok(())
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: RGBA = "#6750a450".parse()?;
        assert_eq!(c, RGBA::new(103, 80, 164, 80));
        assert_eq!(c.to_string(), "#6750a450");

        let c: RGBA = "#010203".parse()?;
        assert_eq!(c, RGBA::new(1, 2, 3, 255));
        assert_eq!(c.to_string(), "#010203");

        Ok(())
    }

    #[test]
    fn test_blend_half() {
        let white = RGBA::rgb(255, 255, 255);
        let black = RGBA::new(0, 0, 0, 128);
        assert_eq!(black.blend_over(white), RGBA::rgb(127, 127, 127));
    }

    #[test]
    fn test_blend_opaque_and_transparent_bg() {
        let bg = RGBA::new(10, 20, 30, 0);
        let fg = RGBA::rgb(200, 100, 50);
        assert!(fg.is_opaque());
        assert_eq!(fg.blend_over(bg), fg);

        // background alpha does not participate, result is opaque
        let accent = RGBA::new(103, 80, 164, 80);
        let out = accent.blend_over(RGBA::default());
        assert_eq!(out, RGBA::rgb(32, 25, 51));

        // zero alpha keeps background channels but makes them opaque
        assert_eq!(RGBA::new(1, 2, 3, 0).blend_over(bg), RGBA::rgb(10, 20, 30));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let c = RGBA::new(103, 80, 164, 80);
        let json = serde_json::to_string(&c)?;
        assert_eq!(json, "\"#6750a450\"");
        assert_eq!(serde_json::from_str::<RGBA>(&json)?, c);
        Ok(())
    }
}
