use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// CSS-style `hsla()` colour. Saturation and lightness are percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.1}, {}%, {}%, {:.3})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// CSS-style `rgba()` colour, used for explosion ring borders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

/// Fill and glow for one particle under the active theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePaint {
    pub fill: Hsla,
    pub glow: Hsla,
    pub size: f32,
    pub glow_radius: f32,
}

impl ParticlePaint {
    pub fn for_particle(hue: f32, size: f32, theme: Theme) -> Self {
        let (saturation, lightness, fill_alpha, glow_alpha) = match theme {
            Theme::Dark => (80.0, 70.0, 0.5, 0.4),
            Theme::Light => (70.0, 50.0, 0.6, 0.5),
        };
        Self {
            fill: Hsla::new(hue, saturation, lightness, fill_alpha),
            glow: Hsla::new(hue, saturation, lightness, glow_alpha),
            size,
            glow_radius: size * crate::constants::GLOW_RADIUS_PER_SIZE,
        }
    }
}
