//! Contrast-aware highlight selection.
//!
//! A fixed highlight color would be invisible or illegible against arbitrary
//! NLP-assigned text colors, so the highlight is chosen from the relative
//! luminance of the element's current text color: dark highlight for light
//! text, warm light for mid-tones, bright warm for dark text.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::focus::{NORMAL_HIGHLIGHT_ALPHA, STRONG_ALPHA_BOOST};

/// Luminance above this is "light text": use the dark highlight.
pub const LIGHT_TEXT_LUMINANCE: f64 = 0.4;

/// Luminance at or below this is "dark text": use the bright warm highlight.
pub const DARK_TEXT_LUMINANCE: f64 = 0.15;

/// Dark, semi-transparent highlight for light text.
const DARK_HIGHLIGHT: Rgb = Rgb::new(26, 32, 44);

/// Warm light highlight for mid-tone text.
const WARM_LIGHT_HIGHLIGHT: Rgb = Rgb::new(255, 236, 179);

/// Bright warm highlight for dark text (the classic gentle reading yellow).
const WARM_BRIGHT_HIGHLIGHT: Rgb = Rgb::new(255, 249, 196);

/// An sRGB color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgba()` form at the given alpha.
    pub fn css_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
    }
}

/// The highlight chosen for one element, in normal and strong variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub color: Rgb,
    pub normal_alpha: f64,
    pub strong_alpha: f64,
}

impl Highlight {
    fn of(color: Rgb) -> Self {
        Self {
            color,
            normal_alpha: NORMAL_HIGHLIGHT_ALPHA,
            strong_alpha: NORMAL_HIGHLIGHT_ALPHA + STRONG_ALPHA_BOOST,
        }
    }
}

/// WCAG relative luminance: standard coefficients over linearized sRGB.
pub fn relative_luminance(color: &Rgb) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Pick the highlight for an element's current text color. With no inline
/// color set, no contrast adjustment is needed and the mid-tone warm light
/// highlight applies.
pub fn highlight_for(text_color: Option<&Rgb>) -> Highlight {
    let color = match text_color {
        Some(color) => color,
        None => return Highlight::of(WARM_LIGHT_HIGHLIGHT),
    };

    let luminance = relative_luminance(color);
    if luminance > LIGHT_TEXT_LUMINANCE {
        Highlight::of(DARK_HIGHLIGHT)
    } else if luminance > DARK_TEXT_LUMINANCE {
        Highlight::of(WARM_LIGHT_HIGHLIGHT)
    } else {
        Highlight::of(WARM_BRIGHT_HIGHLIGHT)
    }
}

// =============================================================================
// ColorParser
// =============================================================================

/// Parser for the CSS color forms the colorizer emits: `rgb()`, `rgba()`,
/// and 3/6-digit hex. Regexes are compiled once at construction.
pub struct ColorParser {
    rgb_re: Regex,
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorParser {
    pub fn new() -> Self {
        Self {
            rgb_re: Regex::new(
                r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)$",
            )
            .unwrap(),
        }
    }

    pub fn parse(&self, css: &str) -> Option<Rgb> {
        let css = css.trim();
        if css.is_empty() {
            return None;
        }
        if let Some(hex) = css.strip_prefix('#') {
            return parse_hex(hex);
        }

        let caps = self.rgb_re.captures(css)?;
        let channel = |i: usize| -> Option<u8> { caps.get(i)?.as_str().parse().ok() };
        Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let mut next = || -> Option<u8> {
                let d = chars.next()?.to_digit(16)? as u8;
                Some(d * 17)
            };
            Some(Rgb::new(next()?, next()?, next()?))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}
