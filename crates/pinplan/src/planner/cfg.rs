//! Planner tuning constants.
//!
//! Policy
//! - Defaults reproduce the values the planning rules were tuned with. They
//!   carry no documented clinical derivation, so keep them as named values and
//!   change them only deliberately.

/// Planner configuration (tunables).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanCfg {
    /// Fraction of the entry→target length added past each end.
    pub extension_ratio: f64,
    /// Cross target sits this many pixels above the fossa top.
    pub cross_target_lift: f64,
    /// Lower bound for the vertical spacing between target levels.
    pub min_level_spacing: f64,
    /// Level spacing as a fraction of the fossa height.
    pub level_spacing_frac: f64,
    /// Horizontal nudge between one-sided entry points, in pixels.
    pub entry_jitter_px: f64,
    /// Below this fossa confidence the plan carries `LowFossaConfidence`.
    pub low_fossa_confidence: f64,
    /// Below this divergence (degrees) the plan carries `LowDivergenceAngle`.
    pub low_divergence_deg: f64,
}

impl Default for PlanCfg {
    fn default() -> Self {
        Self {
            extension_ratio: 0.30,
            cross_target_lift: 5.0,
            min_level_spacing: 12.0,
            level_spacing_frac: 0.6,
            entry_jitter_px: 1.0,
            low_fossa_confidence: 0.5,
            low_divergence_deg: 30.0,
        }
    }
}

impl PlanCfg {
    /// Vertical spacing between target levels: `max(min_level_spacing, frac * fossa_height)`.
    #[inline]
    pub fn level_spacing(&self, fossa_height: f64) -> f64 {
        self.min_level_spacing
            .max(self.level_spacing_frac * fossa_height)
    }
}
