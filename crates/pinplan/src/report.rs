//! Comparative report over the six canonical formations.
//!
//! Purpose
//! - Run the planner for Cross/2, Cross/3, Lateral/2, Lateral/3, Medial/2 and
//!   Medial/3 on one snapshot and attach a short pros/cons assessment to each.
//! - Hand overlay rendering to an `OverlaySink` collaborator; the returned
//!   handle travels with its scenario. Drawing and PDF layout live elsewhere.
//!
//! Assembly cannot fail: every scenario yields a bundle, possibly with zero
//! wires and warnings. Order is fixed and independent of evaluation order.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::planner::{
    plan_with_cfg, ExtraSide, FormationConfig, PinCount, PlanCfg, PlanResult, Side,
};
use crate::snapshot::AnatomicalSnapshot;

/// Thresholds for the pros/cons classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReportCfg {
    /// Divergence (degrees) at or above which the construct counts as well spread.
    pub good_divergence_deg: f64,
    /// Entry spread ratio at or above which entries count as adequately apart.
    pub adequate_spread_ratio: f64,
}

impl Default for ReportCfg {
    fn default() -> Self {
        Self {
            good_divergence_deg: 30.0,
            adequate_spread_ratio: 0.25,
        }
    }
}

/// Canonical scenario table: `(display name, file slug, config)`.
pub fn canonical_configs(
    base_entry_offset: i32,
    extra_side: ExtraSide,
) -> [(&'static str, &'static str, FormationConfig); 6] {
    let o = base_entry_offset;
    [
        (
            "Cross (2 pins)",
            "cross_2",
            FormationConfig::cross(PinCount::Two, o, extra_side),
        ),
        (
            "Cross (3 pins)",
            "cross_3",
            FormationConfig::cross(PinCount::Three, o, extra_side),
        ),
        (
            "Lateral (2 pins)",
            "lateral_2",
            FormationConfig::one_sided(Side::Lateral, PinCount::Two, o),
        ),
        (
            "Lateral (3 pins)",
            "lateral_3",
            FormationConfig::one_sided(Side::Lateral, PinCount::Three, o),
        ),
        (
            "Medial (2 pins)",
            "medial_2",
            FormationConfig::one_sided(Side::Medial, PinCount::Two, o),
        ),
        (
            "Medial (3 pins)",
            "medial_3",
            FormationConfig::one_sided(Side::Medial, PinCount::Three, o),
        ),
    ]
}

/// Pros and cons derived from plan metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl Assessment {
    pub fn classify(result: &PlanResult, cfg: &ReportCfg) -> Self {
        let mut a = Self::default();
        let m = &result.metrics;
        // An unmeasurable metric counts as failing its threshold.
        match m.divergence_angle_deg {
            Some(deg) if deg >= cfg.good_divergence_deg => a.pros.push("good divergence".into()),
            _ => a.cons.push("low divergence".into()),
        }
        match m.entry_spread_ratio {
            Some(r) if r >= cfg.adequate_spread_ratio => a.pros.push("adequate spread".into()),
            _ => a.cons.push("narrow spread".into()),
        }
        a
    }

    /// `Pros:` / `Cons:` sections, one `• <statement>.` line per entry.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Pros:\n");
        out.push_str(&bullets(&self.pros));
        out.push_str("Cons:\n");
        out.push_str(&bullets(&self.cons));
        out
    }
}

/// One statement per line as `• <statement>.`.
pub fn bullets(statements: &[String]) -> String {
    let mut out = String::new();
    for s in statements {
        let _ = writeln!(out, "• {s}.");
    }
    out
}

/// Render collaborator for per-scenario overlays.
pub trait OverlaySink {
    type Handle;

    fn render(
        &mut self,
        snapshot: &AnatomicalSnapshot,
        name: &str,
        result: &PlanResult,
    ) -> Self::Handle;
}

/// Opaque overlay handle: the scenario's position in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlaySlot(pub usize);

/// Sink that renders nothing and hands out slots in call order.
#[derive(Debug, Default)]
pub struct SlotSink {
    next: usize,
}

impl OverlaySink for SlotSink {
    type Handle = OverlaySlot;

    fn render(&mut self, _: &AnatomicalSnapshot, _: &str, _: &PlanResult) -> OverlaySlot {
        let slot = OverlaySlot(self.next);
        self.next += 1;
        slot
    }
}

/// One row of the comparative report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBundle<H = OverlaySlot> {
    pub name: String,
    pub slug: String,
    pub config: FormationConfig,
    pub result: PlanResult,
    pub overlay: H,
    pub assessment: Assessment,
}

impl<H> ScenarioBundle<H> {
    /// One-line metric summary, e.g. `Cross (2 pins): divergence 118.2°, ...`.
    pub fn summary(&self) -> String {
        let m = &self.result.metrics;
        let fmt = |v: Option<f64>, unit: &str| match v {
            Some(x) => format!("{x:.2}{unit}"),
            None => "n/a".to_string(),
        };
        format!(
            "{}: {} wires, divergence {}, crossing height {}, entry spread {}",
            self.name,
            self.result.wires.len(),
            fmt(m.divergence_angle_deg, "°"),
            fmt(m.crossing_height_ratio, ""),
            fmt(m.entry_spread_ratio, ""),
        )
    }
}

/// Assemble with default thresholds and no overlay rendering.
pub fn assemble(
    snapshot: &AnatomicalSnapshot,
    base_entry_offset: i32,
    extra_side: ExtraSide,
) -> Vec<ScenarioBundle> {
    assemble_with(
        snapshot,
        base_entry_offset,
        extra_side,
        &PlanCfg::default(),
        &ReportCfg::default(),
        &mut SlotSink::default(),
    )
}

/// Assemble with explicit tunables and render collaborator.
pub fn assemble_with<S: OverlaySink>(
    snapshot: &AnatomicalSnapshot,
    base_entry_offset: i32,
    extra_side: ExtraSide,
    plan_cfg: &PlanCfg,
    report_cfg: &ReportCfg,
    sink: &mut S,
) -> Vec<ScenarioBundle<S::Handle>> {
    canonical_configs(base_entry_offset, extra_side)
        .into_iter()
        .map(|(name, slug, config)| {
            let result = plan_with_cfg(snapshot, &config, plan_cfg);
            let assessment = Assessment::classify(&result, report_cfg);
            let overlay = sink.render(snapshot, name, &result);
            tracing::debug!(scenario = slug, wires = result.wires.len(), "scenario planned");
            ScenarioBundle {
                name: name.to_string(),
                slug: slug.to_string(),
                config,
                result,
                overlay,
                assessment,
            }
        })
        .collect()
}
