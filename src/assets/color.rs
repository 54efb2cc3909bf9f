/// Opaque overlay color. Transparency is applied only when the overlay is filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct OverlayColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl OverlayColor {
    /// Substituted for unparsable hex strings.
    pub const DEFAULT: Self = Self::rgb(0, 0, 0);

    /// Construct from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `hex`, falling back to [`OverlayColor::DEFAULT`] when it is malformed.
    pub fn from_hex_or_default(hex: &str) -> Self {
        match parse_hex_color(hex) {
            Some(c) => c,
            None => {
                tracing::warn!(hex, "malformed hex color, using black");
                Self::DEFAULT
            }
        }
    }

    /// Channels with alpha forced to 255.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Parse `#RRGGBB` / `#RRGGBBAA` (`#` optional, any case, surrounding whitespace ignored).
///
/// The leading run of hex digits is read as a packed integer: six digits are RGB,
/// eight digits are RGBA with the alpha pair dropped, and shorter runs land in the
/// low channels (`"FF"` is pure blue). Returns `None` when there are no leading hex
/// digits or more than sixteen of them.
///
/// Eight digits are treated as `RRGGBBAA`, not masked to their low 24 bits:
/// `#FF000080` is red here, where a plain integer scan would give `(0, 0, 128)`.
pub fn parse_hex_color(hex: &str) -> Option<OverlayColor> {
    let s = hex.trim().replace('#', "");
    let digits_len = s.bytes().take_while(u8::is_ascii_hexdigit).count();
    if digits_len == 0 || digits_len > 16 {
        return None;
    }

    let value = u64::from_str_radix(&s[..digits_len], 16).ok()?;
    let rgb = if digits_len == 8 { value >> 8 } else { value };

    Some(OverlayColor::rgb(
        ((rgb & 0xFF_0000) >> 16) as u8,
        ((rgb & 0x00_FF00) >> 8) as u8,
        (rgb & 0x00_00FF) as u8,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
