//! Pin planner: anatomical snapshot + formation config → wires and warnings.
//!
//! Purpose
//! - Turn one `AnatomicalSnapshot` and one `FormationConfig` into a fresh,
//!   immutable `PlanResult`. Same inputs always give the same output.
//! - Never fail on missing landmarks: missing data becomes a `WarningCode`.
//!
//! Flow (one call, no state kept across calls)
//! - `Validating`: epicondyles, fossa and (for cross) two epicondyles must be
//!   present, otherwise the call ends in `Rejected` with an empty wire list.
//! - `Planning`: `cross::plan_cross` or `one_sided::plan_one_sided` produce
//!   wires whose ends are the extended targets.
//! - `ExtendingToBoundary`: with a humerus outline, wire ends are pushed to the
//!   cortex; otherwise a pass-through that flags `NoHumerusBoundary`.
//! - `Scoring`: `metrics::measure` plus threshold warnings.

mod cfg;
mod cross;
mod one_sided;
mod types;

pub use cfg::PlanCfg;
pub use types::{
    ConfigError, ExtraSide, Formation, FormationConfig, PinCount, PlanMetrics, PlanResult,
    PlanStage, Side, WarningCode, Wire, WireRole,
};

use crate::geom2::{extend_to_polygon_boundary, Polygon};
use crate::metrics;
use crate::snapshot::{AnatomicalSnapshot, EpicondyleCandidate};

/// Landmarks that passed validation.
pub(crate) struct Anatomy<'a> {
    pub epicondyles: &'a [EpicondyleCandidate],
    pub fossa: &'a Polygon,
    pub humerus: Option<&'a Polygon>,
}

/// Tracks the current stage and checks each transition against `PlanStage::successors`.
struct StageCursor {
    stage: PlanStage,
}

impl StageCursor {
    fn new() -> Self {
        Self {
            stage: PlanStage::Idle,
        }
    }

    fn advance(&mut self, next: PlanStage) {
        debug_assert!(
            self.stage.successors().contains(&next),
            "illegal plan stage transition {:?} -> {:?}",
            self.stage,
            next
        );
        tracing::trace!(from = ?self.stage, to = ?next, "plan stage");
        self.stage = next;
    }
}

/// Plan with default tunables.
pub fn plan(snapshot: &AnatomicalSnapshot, config: &FormationConfig) -> PlanResult {
    plan_with_cfg(snapshot, config, &PlanCfg::default())
}

/// Plan with explicit tunables.
pub fn plan_with_cfg(
    snapshot: &AnatomicalSnapshot,
    config: &FormationConfig,
    cfg: &PlanCfg,
) -> PlanResult {
    let mut cursor = StageCursor::new();
    cursor.advance(PlanStage::Validating);
    let anatomy = match validate(snapshot, &config.formation) {
        Ok(a) => a,
        Err(code) => {
            cursor.advance(PlanStage::Rejected);
            debug_assert!(cursor.stage.is_terminal());
            tracing::debug!(?code, formation = config.formation.label(), "plan rejected");
            return PlanResult::rejected(code);
        }
    };

    cursor.advance(PlanStage::Planning);
    let (mut wires, info_message) = match config.formation {
        Formation::Cross { extra_side } => cross::plan_cross(
            &anatomy,
            config.pin_count,
            config.entry_offset,
            extra_side,
            cfg,
        ),
        Formation::OneSided { side } => one_sided::plan_one_sided(
            &anatomy,
            side,
            config.pin_count,
            config.entry_offset,
            cfg,
        ),
    };
    debug_assert_eq!(wires.len(), config.pin_count.get());

    cursor.advance(PlanStage::ExtendingToBoundary);
    if let Some(humerus) = anatomy.humerus {
        for w in &mut wires {
            w.end = extend_to_polygon_boundary(w.start, w.end, humerus);
        }
    }

    cursor.advance(PlanStage::Scoring);
    let mut m = metrics::measure(&wires, &config.formation, anatomy.humerus);
    if anatomy.humerus.is_none() {
        m.warnings.insert(WarningCode::NoHumerusBoundary);
    }
    if snapshot.fossa_confidence < cfg.low_fossa_confidence {
        m.warnings.insert(WarningCode::LowFossaConfidence);
    }
    if m
        .divergence_angle_deg
        .is_some_and(|deg| deg < cfg.low_divergence_deg)
    {
        m.warnings.insert(WarningCode::LowDivergenceAngle);
    }

    cursor.advance(PlanStage::Done);
    debug_assert!(cursor.stage.is_terminal());
    tracing::debug!(
        formation = config.formation.label(),
        pins = wires.len(),
        divergence = ?m.divergence_angle_deg,
        warnings = m.warnings.len(),
        "plan done"
    );
    PlanResult {
        wires,
        metrics: m,
        info_message,
        stage: cursor.stage,
    }
}

fn validate<'a>(
    snapshot: &'a AnatomicalSnapshot,
    formation: &Formation,
) -> Result<Anatomy<'a>, WarningCode> {
    if snapshot.epicondyles.is_empty() {
        return Err(WarningCode::NoEpicondyle);
    }
    let fossa = snapshot.fossa.as_ref().ok_or(WarningCode::NoFossa)?;
    if formation.is_cross() && snapshot.epicondyles.len() < 2 {
        return Err(WarningCode::InsufficientEpicondylesForCross);
    }
    Ok(Anatomy {
        epicondyles: &snapshot.epicondyles,
        fossa,
        humerus: snapshot.humerus.as_ref(),
    })
}
