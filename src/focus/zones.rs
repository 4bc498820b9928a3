//! Per-frame zone classification.
//!
//! Every cached word center is partitioned against the current sample point
//! into focus (inside the focus radius), transition (the annulus out to the
//! transition radius), or periphery. Derived fresh each frame; nothing here
//! persists.

use crate::focus::Radii;

/// Zone membership for one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Focus,
    /// `fraction` is the normalized distance through the annulus:
    /// 0.0 at the focus radius, 1.0 at the transition radius.
    Transition { fraction: f64 },
    Periphery,
}

/// One frame's classification over the whole cache, index-aligned with the
/// input centers.
#[derive(Debug, Clone)]
pub struct ZoneSet {
    pub zones: Vec<Zone>,
    /// Minimum-distance region inside the focus zone. Ties break to the
    /// first-encountered cache index.
    pub primary: Option<usize>,
}

impl ZoneSet {
    pub fn focus_count(&self) -> usize {
        self.zones.iter().filter(|z| matches!(z, Zone::Focus)).count()
    }

    pub fn transition_count(&self) -> usize {
        self.zones
            .iter()
            .filter(|z| matches!(z, Zone::Transition { .. }))
            .count()
    }
}

/// Classify `centers` against the sample point `(x, y)`.
pub fn classify(x: f64, y: f64, centers: &[(f64, f64)], radii: &Radii) -> ZoneSet {
    let mut zones = Vec::with_capacity(centers.len());
    let mut primary: Option<usize> = None;
    let mut primary_dist = f64::INFINITY;
    let annulus = (radii.transition - radii.focus).max(f64::EPSILON);

    for (i, (cx, cy)) in centers.iter().enumerate() {
        let dx = cx - x;
        let dy = cy - y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist <= radii.focus {
            if dist < primary_dist {
                primary = Some(i);
                primary_dist = dist;
            }
            zones.push(Zone::Focus);
        } else if dist <= radii.transition {
            zones.push(Zone::Transition {
                fraction: (dist - radii.focus) / annulus,
            });
        } else {
            zones.push(Zone::Periphery);
        }
    }

    ZoneSet { zones, primary }
}

/// Eased falloff for spacing boosts across the transition annulus:
/// full strength at the inner edge, zero at the outer edge, shallow at first.
/// With s = 1 - t this is 1 - (1 - s)^2.
pub fn eased_falloff(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let s = 1.0 - t;
    1.0 - (1.0 - s) * (1.0 - s)
}

/// Plain linear falloff for the highlight opacity fade.
pub fn linear_falloff(t: f64) -> f64 {
    1.0 - t.clamp(0.0, 1.0)
}
