use super::style::Color;

/// Named colours shared by the plates.
///
/// Each plate fills every role; roles a plate never uses fall back to its
/// closest neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub cream: Color,
    pub ink: Color,
    pub ink_mid: Color,
    pub ink_light: Color,
    pub ink_faint: Color,
    pub wash: Color,
    pub accent: Color,
    pub gold: Color,
    pub gold_light: Color,
    pub border: Color,
    pub shadow: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
}

impl Palette {
    /// Contracted toward graphite.
    pub fn laboratory() -> Self {
        let bg = Color::hex(0xF5F0E8);
        let wash = Color::hex(0xC8C4BC);
        Self {
            bg,
            cream: bg,
            ink: Color::hex(0x1A1815),
            ink_mid: Color::hex(0x3A3530),
            ink_light: Color::hex(0x5A5550),
            ink_faint: Color::hex(0x8A8578),
            wash,
            accent: Color::hex(0x4A5A5A),
            gold: Color::hex(0x3A3530),
            gold_light: wash,
            border: wash,
            shadow: wash,
            green: Color::hex(0x4A5A5A),
            yellow: wash,
            red: Color::hex(0x5A5550),
        }
    }

    /// Warmed toward gold.
    pub fn illuminated() -> Self {
        let gold_light = Color::hex(0xC4A86A);
        Self {
            bg: Color::hex(0xFAF8F2),
            cream: Color::hex(0xFFFCF5),
            ink: Color::hex(0x2A2520),
            ink_mid: Color::hex(0x5A5550),
            ink_light: Color::hex(0x5A5550),
            ink_faint: Color::hex(0x8A8580),
            wash: Color::hex(0xE8E4DC),
            accent: Color::hex(0x5A7B7B),
            gold: Color::hex(0x9A7B35),
            gold_light,
            border: Color::hex(0xB8A888),
            shadow: Color::hex(0xE8E4DC),
            green: Color::hex(0x5A7B7B),
            yellow: gold_light,
            red: Color::hex(0x9A7B35),
        }
    }

    /// Between graphite and gold.
    pub fn blended() -> Self {
        Self {
            bg: Color::hex(0xF6F2EA),
            cream: Color::hex(0xFDFAF5),
            ink: Color::hex(0x2A2520),
            ink_mid: Color::hex(0x4A4540),
            ink_light: Color::hex(0x6A6560),
            ink_faint: Color::hex(0x9A9590),
            wash: Color::hex(0xD4D0C8),
            accent: Color::hex(0x5A7B7B),
            gold: Color::hex(0x9A7B35),
            gold_light: Color::hex(0xC4A86A),
            border: Color::hex(0xD4D0C8),
            shadow: Color::hex(0xD4D0C8),
            green: Color::hex(0x6B8B6B),
            yellow: Color::hex(0xC4A86A),
            red: Color::hex(0xA87070),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backgrounds_differ() {
        let backgrounds = [
            Palette::laboratory().bg,
            Palette::illuminated().bg,
            Palette::blended().bg,
        ];
        assert_ne!(backgrounds[0], backgrounds[1]);
        assert_ne!(backgrounds[1], backgrounds[2]);
        assert_ne!(backgrounds[0], backgrounds[2]);
    }

    #[test]
    fn test_gold() {
        assert_eq!(Palette::illuminated().gold, Color::new(0x9A, 0x7B, 0x35));
        assert_eq!(Palette::blended().gold, Palette::illuminated().gold);
    }
}
