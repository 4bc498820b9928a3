//! Renderer configuration: intensity presets and derived radii.

use serde::{Deserialize, Serialize};

/// Focus-zone radius at medium intensity, in viewport pixels.
pub const BASE_FOCUS_RADIUS: f64 = 90.0;

/// Transition-zone outer radius at medium intensity. Always greater than the
/// focus radius.
pub const BASE_TRANSITION_RADIUS: f64 = 180.0;

/// Highlight background alpha for focus-zone elements.
pub const NORMAL_HIGHLIGHT_ALPHA: f64 = 0.35;

/// Fixed increment the primary element's highlight gains over normal.
pub const STRONG_ALPHA_BOOST: f64 = 0.2;

/// Crowding-reduction spacing boosts, in em, at 1.0x intensity.
pub const LETTER_SPACING_BOOST_EM: f64 = 0.05;
pub const WORD_SPACING_BOOST_EM: f64 = 0.12;

/// Periphery overlay tint alpha at 1.0x intensity, and its cap.
pub const OVERLAY_BASE_ALPHA: f64 = 0.22;
pub const OVERLAY_MAX_ALPHA: f64 = 0.4;

/// Dwell adaptation: how far the focus radius tightens (and the transition
/// radius widens) at full dwell, and the dwell time considered "full".
const DWELL_RADIUS_SHIFT_PX: f64 = 20.0;
const DWELL_FULL_MS: f64 = 500.0;

/// Zone radii for one frame, already scaled by intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Radii {
    pub focus: f64,
    pub transition: f64,
}

/// Three-level crowding-reduction intensity preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Multiplier applied to both radii and the overlay alpha.
    pub fn multiplier(self) -> f64 {
        match self {
            Intensity::Low => 0.5,
            Intensity::Medium => 1.0,
            Intensity::High => 1.5,
        }
    }

    /// Only the three recognized names are accepted; anything else is an
    /// error, not a silent default.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            other => Err(format!(
                "unknown intensity '{}' (expected low|medium|high)",
                other
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

/// Full renderer configuration, settable across the JS boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusConfig {
    pub intensity: Intensity,
    /// Tighten the focus radius as a fixation dwells (off by default so the
    /// fixed-radius contract holds).
    pub adaptive_dwell: bool,
    /// Moving-average smoothing of the sample stream. Off for pointer input;
    /// the external gaze producer benefits from it.
    pub smoothing: bool,
    /// Restore margin beyond the transition radius, as a multiple of it.
    /// Heuristic, not a correctness knob.
    pub restore_margin: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            intensity: Intensity::Medium,
            adaptive_dwell: false,
            smoothing: false,
            restore_margin: 1.0,
        }
    }
}

impl FocusConfig {
    pub fn radii(&self) -> Radii {
        let mult = self.intensity.multiplier();
        Radii {
            focus: BASE_FOCUS_RADIUS * mult,
            transition: BASE_TRANSITION_RADIUS * mult,
        }
    }

    /// Radii adjusted for fixation dwell: the focus circle tightens toward
    /// the fixated word while the transition annulus widens.
    pub fn radii_with_dwell(&self, fixation_ms: f64) -> Radii {
        let base = self.radii();
        if !self.adaptive_dwell {
            return base;
        }
        let mult = self.intensity.multiplier();
        let factor = (fixation_ms / DWELL_FULL_MS).clamp(0.0, 1.0);
        let shift = DWELL_RADIUS_SHIFT_PX * mult * factor;
        Radii {
            focus: base.focus - shift,
            transition: base.transition + shift,
        }
    }

    pub fn overlay_alpha(&self) -> f64 {
        (OVERLAY_BASE_ALPHA * self.intensity.multiplier()).min(OVERLAY_MAX_ALPHA)
    }

    pub fn letter_spacing_em(&self) -> f64 {
        LETTER_SPACING_BOOST_EM * self.intensity.multiplier()
    }

    pub fn word_spacing_em(&self) -> f64 {
        WORD_SPACING_BOOST_EM * self.intensity.multiplier()
    }
}
