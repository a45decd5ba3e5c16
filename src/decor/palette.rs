// decor/palette.rs

use crate::game::Mode;

/// 8-bit sRGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Channels as 0..1 floats
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

pub const WHITE: Rgb = Rgb(255, 255, 255);

/// Confetti colours
pub const CONFETTI: [Rgb; 12] = [
    Rgb::from_hex(0xff69b4),
    Rgb::from_hex(0xff1493),
    Rgb::from_hex(0xffd700),
    Rgb::from_hex(0xff4500),
    Rgb::from_hex(0x00ced1),
    Rgb::from_hex(0x9370db),
    Rgb::from_hex(0xff6347),
    Rgb::from_hex(0xffffff),
    Rgb::from_hex(0xff00ff),
    Rgb::from_hex(0x7fff00),
    Rgb::from_hex(0x00ffff),
    Rgb::from_hex(0xffa500),
];

const PETALS_SWEET: [Rgb; 3] = [
    Rgb::from_hex(0xff8fa3),
    Rgb::from_hex(0xffb7c5),
    Rgb::from_hex(0xee9ca7),
];

const PETALS_MAGIC: [Rgb; 3] = [
    Rgb::from_hex(0xffde59),
    Rgb::from_hex(0xfbbf24),
    Rgb::from_hex(0xf59e0b),
];

/// Three petal tints per mode, indexed by `Petal::color_index`
pub fn petal_colors(mode: Mode) -> &'static [Rgb; 3] {
    match mode {
        Mode::Sweet => &PETALS_SWEET,
        Mode::Magic => &PETALS_MAGIC,
    }
}

pub fn sparkle_color(mode: Mode) -> Rgb {
    match mode {
        Mode::Sweet => WHITE,
        Mode::Magic => Rgb::from_hex(0xfde68a),
    }
}

/// Lantern body colour and opacity
pub fn lantern_color(mode: Mode) -> (Rgb, f32) {
    match mode {
        Mode::Sweet => (Rgb(255, 200, 100), 0.4),
        Mode::Magic => (Rgb(251, 191, 36), 0.5),
    }
}

/// Page background
pub fn background(mode: Mode) -> Rgb {
    match mode {
        Mode::Sweet => Rgb::from_hex(0xffe4e6),
        Mode::Magic => Rgb::from_hex(0x1e1b4b),
    }
}

/// Heart and YES-button accent
pub fn accent(mode: Mode) -> Rgb {
    match mode {
        Mode::Sweet => Rgb::from_hex(0xf43f5e),
        Mode::Magic => Rgb::from_hex(0xfbbf24),
    }
}

/// Title text
pub fn title(mode: Mode) -> Rgb {
    match mode {
        Mode::Sweet => Rgb::from_hex(0xe11d48),
        Mode::Magic => Rgb::from_hex(0xfef3c7),
    }
}

/// NO button fill, label and border
pub fn declinable(mode: Mode) -> (Rgb, Rgb, Rgb) {
    match mode {
        Mode::Sweet => (
            Rgb::from_hex(0xffffff),
            Rgb::from_hex(0xfda4af),
            Rgb::from_hex(0xffe4e6),
        ),
        Mode::Magic => (
            Rgb::from_hex(0xfffbeb),
            Rgb::from_hex(0xf59e0b),
            Rgb::from_hex(0xfde68a),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex(0xff1493), Rgb(255, 20, 147));
        assert_eq!(Rgb::from_hex(0x000000), Rgb(0, 0, 0));
    }

    #[test]
    fn test_modes_use_different_petals() {
        assert_ne!(petal_colors(Mode::Sweet), petal_colors(Mode::Magic));
    }
}
