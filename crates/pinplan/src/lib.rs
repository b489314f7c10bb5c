//! K-wire pin-placement planning for supracondylar humerus fixation.
//!
//! Pipeline
//! - `snapshot`: typed landmarks for one frame (epicondyles, fossa, humerus),
//!   reduced from raw segmentation detections.
//! - `planner`: snapshot + formation config → wires and warnings.
//! - `metrics`: divergence, crossing height and entry spread of a plan.
//! - `report`: the six canonical formations side by side with pros/cons.
//! - `geom2`: the image-space line/polygon kernel underneath.
//!
//! Everything here is a pure function of its inputs. Segmentation, frame
//! pacing, overlay drawing and document layout belong to callers.

pub mod api;
pub mod geom2;
pub mod metrics;
pub mod planner;
pub mod report;
pub mod snapshot;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{Point2, Polygon};
pub use planner::{plan, plan_with_cfg, FormationConfig, PlanResult};
pub use report::{assemble, ScenarioBundle};
pub use snapshot::AnatomicalSnapshot;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{Bounds2, Point2, Polygon};
    pub use crate::planner::{
        plan, plan_with_cfg, ExtraSide, Formation, FormationConfig, PinCount, PlanCfg,
        PlanMetrics, PlanResult, Side, WarningCode, Wire, WireRole,
    };
    pub use crate::report::{assemble, assemble_with, Assessment, ReportCfg, ScenarioBundle};
    pub use crate::snapshot::{AnatomicalSnapshot, Detection, EpicondyleCandidate};
}
