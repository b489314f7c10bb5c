//! Planner inputs and outputs.
//!
//! Kept small and explicit so `cross`, `one_sided` and `metrics` read easily.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom2::Point2;

/// Entry side for one-sided fixation, selected by centroid x only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Largest-x epicondyle.
    Lateral,
    /// Smallest-x epicondyle.
    Medial,
}

/// Which side contributes the third wire of a three-pin cross.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraSide {
    #[default]
    Left,
    Right,
}

/// Fixation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formation {
    /// Wires from both sides crossing above the fossa. `extra_side` only
    /// matters with three pins.
    Cross { extra_side: ExtraSide },
    /// All wires from one epicondyle, fanned over fossa levels.
    OneSided { side: Side },
}

impl Formation {
    pub fn is_cross(&self) -> bool {
        matches!(self, Formation::Cross { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Formation::Cross { .. } => "Cross",
            Formation::OneSided {
                side: Side::Lateral,
            } => "Lateral",
            Formation::OneSided { side: Side::Medial } => "Medial",
        }
    }
}

/// Number of wires in a formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PinCount {
    Two,
    Three,
}

impl PinCount {
    #[inline]
    pub fn get(self) -> usize {
        match self {
            PinCount::Two => 2,
            PinCount::Three => 3,
        }
    }
}

/// Raised when raw values fall outside the closed configuration set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedPinCount(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedPinCount(n) => {
                write!(f, "unsupported pin count {n} (expected 2 or 3)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl TryFrom<u8> for PinCount {
    type Error = ConfigError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(PinCount::Two),
            3 => Ok(PinCount::Three),
            other => Err(ConfigError::UnsupportedPinCount(other)),
        }
    }
}

impl From<PinCount> for u8 {
    fn from(p: PinCount) -> Self {
        p.get() as u8
    }
}

/// One planning request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormationConfig {
    pub formation: Formation,
    pub pin_count: PinCount,
    /// Vertical entry offset in pixels, added to the epicondyle centroid y.
    #[serde(default)]
    pub entry_offset: i32,
}

impl FormationConfig {
    pub fn cross(pin_count: PinCount, entry_offset: i32, extra_side: ExtraSide) -> Self {
        Self {
            formation: Formation::Cross { extra_side },
            pin_count,
            entry_offset,
        }
    }

    pub fn one_sided(side: Side, pin_count: PinCount, entry_offset: i32) -> Self {
        Self {
            formation: Formation::OneSided { side },
            pin_count,
            entry_offset,
        }
    }
}

/// Role of a wire inside its formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireRole {
    CrossLeft,
    CrossRight,
    CrossExtraLeft,
    CrossExtraRight,
    /// Targets the fossa top.
    OneSidedLow,
    /// Middle level of a three-pin fan.
    OneSidedMid,
    /// Highest target level.
    OneSidedTop,
}

impl WireRole {
    pub fn tag(self) -> &'static str {
        match self {
            WireRole::CrossLeft => "cross_left",
            WireRole::CrossRight => "cross_right",
            WireRole::CrossExtraLeft => "cross_extra_left",
            WireRole::CrossExtraRight => "cross_extra_right",
            WireRole::OneSidedLow => "one_sided_low",
            WireRole::OneSidedMid => "one_sided_mid",
            WireRole::OneSidedTop => "one_sided_top",
        }
    }
}

impl fmt::Display for WireRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Planned K-wire from entry point to cortex exit (or extended target).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub start: Point2,
    pub end: Point2,
    pub role: WireRole,
}

/// Non-fatal findings attached to a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    NoEpicondyle,
    NoFossa,
    InsufficientEpicondylesForCross,
    /// Informational: wires end at the extended target, not at the cortex.
    NoHumerusBoundary,
    LowFossaConfidence,
    LowDivergenceAngle,
}

impl WarningCode {
    /// Stable snake_case code, identical to the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            WarningCode::NoEpicondyle => "no_epicondyle",
            WarningCode::NoFossa => "no_fossa",
            WarningCode::InsufficientEpicondylesForCross => "insufficient_epicondyles_for_cross",
            WarningCode::NoHumerusBoundary => "no_humerus_boundary",
            WarningCode::LowFossaConfidence => "low_fossa_confidence",
            WarningCode::LowDivergenceAngle => "low_divergence_angle",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            WarningCode::NoEpicondyle => "No epicondyle detected",
            WarningCode::NoFossa => "No olecranon fossa detected",
            WarningCode::InsufficientEpicondylesForCross => {
                "Cross formation needs two epicondyles"
            }
            WarningCode::NoHumerusBoundary => {
                "No humerus outline; wires are not extended to the cortex"
            }
            WarningCode::LowFossaConfidence => "Low fossa detection confidence",
            WarningCode::LowDivergenceAngle => "Low divergence angle between wires",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Derived quality metrics plus warnings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    pub divergence_angle_deg: Option<f64>,
    pub crossing_height_ratio: Option<f64>,
    pub entry_spread_ratio: Option<f64>,
    pub warnings: BTreeSet<WarningCode>,
}

/// Stages of one planning call.
///
/// `Idle → Validating → (Rejected | Planning) → ExtendingToBoundary → Scoring → Done`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStage {
    Idle,
    Validating,
    Rejected,
    Planning,
    ExtendingToBoundary,
    Scoring,
    Done,
}

impl PlanStage {
    /// Legal successor stages.
    pub fn successors(self) -> &'static [PlanStage] {
        use PlanStage::*;
        match self {
            Idle => &[Validating],
            Validating => &[Rejected, Planning],
            Planning => &[ExtendingToBoundary],
            ExtendingToBoundary => &[Scoring],
            Scoring => &[Done],
            Rejected | Done => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

/// Output of one planning call. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub wires: Vec<Wire>,
    pub metrics: PlanMetrics,
    pub info_message: String,
    /// Terminal stage: `Rejected` or `Done`.
    pub stage: PlanStage,
}

impl PlanResult {
    pub(crate) fn rejected(warning: WarningCode) -> Self {
        let mut metrics = PlanMetrics::default();
        metrics.warnings.insert(warning);
        Self {
            wires: Vec::new(),
            metrics,
            info_message: warning.message().to_string(),
            stage: PlanStage::Rejected,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.stage == PlanStage::Rejected
    }

    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.metrics.warnings.contains(&code)
    }
}
