use crate::random::RandomSource;

/// Upper limit for the channel sum of a randomly sampled color. Brighter samples are halved.
const MAX_RANDOM_CHANNEL_SUM: u32 = 510;

/// Opaque RGB color of a feature fill or stroke.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Constructs a color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Samples a color with three independent uniform channels.
    ///
    /// If the sum of the channels exceeds 510 all three are halved, so generated defaults are never
    /// washed-out near-white colors.
    pub fn random(source: &dyn RandomSource) -> Self {
        let r = source.next_channel();
        let g = source.next_channel();
        let b = source.next_channel();

        if r as u32 + g as u32 + b as u32 > MAX_RANDOM_CHANNEL_SUM {
            Self::rgb(r / 2, g / 2, b / 2)
        } else {
            Self::rgb(r, g, b)
        }
    }

    /// Converts the color into HEX8 string: `#RRGGBBFF`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}FF", self.r, self.g, self.b)
    }

    /// Red component.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component.
    pub fn b(&self) -> u8 {
        self.b
    }
}
