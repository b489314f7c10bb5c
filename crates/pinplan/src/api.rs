//! Flat re-export surface for tools and bindings.
//!
//! Groups the kernel, planner and report entry points under one path so
//! callers outside the crate do not depend on the module layout.

// Geometry kernel
pub use crate::geom2::{
    angle_between, extend_line, extend_to_polygon_boundary, infinite_line_intersection,
    segment_intersection, Bounds2, LineHit, Point2, Polygon, PolygonError,
};
// Snapshot and segmentation seam
pub use crate::snapshot::{
    snapshot_from_provider, AnatomicalSnapshot, Detection, EpicondyleCandidate,
    SegmentationProvider, CLASS_EPICONDYLE, CLASS_FOSSA, CLASS_HUMERUS,
};
// Planner and metrics
pub use crate::metrics::measure as measure_plan;
pub use crate::planner::{
    plan, plan_with_cfg, ConfigError, ExtraSide, Formation, FormationConfig, PinCount, PlanCfg,
    PlanMetrics, PlanResult, PlanStage, Side, WarningCode, Wire, WireRole,
};
// Report
pub use crate::report::{
    assemble, assemble_with, bullets, canonical_configs, Assessment, OverlaySink, OverlaySlot,
    ReportCfg, ScenarioBundle, SlotSink,
};
// Synthetic data
pub use crate::synth::{draw_snapshot, ReplayToken as SynthReplay, SynthCfg};
