//! Anatomical snapshot: typed landmarks for one analyzed frame.
//!
//! Purpose
//! - Hold the epicondyle candidates, the olecranon fossa outline and the humerus
//!   outline the planner works from, as one immutable value.
//! - Reduce raw per-instance segmentation output (`Detection`) into that value.
//!
//! The segmentation model itself is an injected `SegmentationProvider`; this
//! crate never runs inference.

use serde::{Deserialize, Serialize};

use crate::geom2::{Point2, Polygon};

/// Class id of an epicondyle instance in segmentation output.
pub const CLASS_EPICONDYLE: u32 = 0;
/// Class id of the olecranon fossa.
pub const CLASS_FOSSA: u32 = 1;
/// Class id of the humerus.
pub const CLASS_HUMERUS: u32 = 2;

/// One epicondyle detection reduced to its centroid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpicondyleCandidate {
    pub centroid: Point2,
    pub confidence: f64,
}

impl EpicondyleCandidate {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            centroid: Point2::new(x, y),
            confidence,
        }
    }
}

/// Landmarks of one frame. Built once, never mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnatomicalSnapshot {
    pub epicondyles: Vec<EpicondyleCandidate>,
    pub fossa: Option<Polygon>,
    /// Confidence of the retained fossa instance; 0 when no fossa was found.
    #[serde(default)]
    pub fossa_confidence: f64,
    pub humerus: Option<Polygon>,
}

impl AnatomicalSnapshot {
    pub fn new(
        epicondyles: Vec<EpicondyleCandidate>,
        fossa: Option<Polygon>,
        fossa_confidence: f64,
        humerus: Option<Polygon>,
    ) -> Self {
        Self {
            epicondyles,
            fossa,
            fossa_confidence,
            humerus,
        }
    }

    /// Reduce raw detections.
    ///
    /// - Every epicondyle instance with at least one vertex is kept, in input order,
    ///   with the centroid of its outline.
    /// - The highest-confidence fossa with a valid outline is kept.
    /// - The first humerus with a valid outline is kept.
    /// - Unknown class ids and invalid outlines are skipped.
    pub fn from_detections(detections: &[Detection]) -> Self {
        let mut snap = Self::default();
        for (idx, det) in detections.iter().enumerate() {
            match det.class_id {
                CLASS_EPICONDYLE => match outline_centroid(&det.vertices) {
                    Some(centroid) => snap.epicondyles.push(EpicondyleCandidate {
                        centroid,
                        confidence: det.confidence,
                    }),
                    None => tracing::debug!(idx, "epicondyle detection without vertices"),
                },
                CLASS_FOSSA => {
                    let better = snap.fossa.is_none() || det.confidence > snap.fossa_confidence;
                    if !better {
                        continue;
                    }
                    match Polygon::new(det.vertices.clone()) {
                        Ok(poly) => {
                            snap.fossa = Some(poly);
                            snap.fossa_confidence = det.confidence;
                        }
                        Err(err) => tracing::debug!(idx, %err, "skipping fossa outline"),
                    }
                }
                CLASS_HUMERUS => {
                    if snap.humerus.is_some() {
                        continue;
                    }
                    match Polygon::new(det.vertices.clone()) {
                        Ok(poly) => snap.humerus = Some(poly),
                        Err(err) => tracing::debug!(idx, %err, "skipping humerus outline"),
                    }
                }
                other => tracing::debug!(idx, class_id = other, "unknown class id"),
            }
        }
        snap
    }
}

fn outline_centroid(vertices: &[Point2]) -> Option<Point2> {
    if let Ok(poly) = Polygon::new(vertices.to_vec()) {
        return Some(poly.centroid());
    }
    let finite: Vec<Point2> = vertices
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    if finite.is_empty() {
        return None;
    }
    let sum = finite.iter().fold(Point2::zeros(), |acc, p| acc + p);
    Some(sum / finite.len() as f64)
}

/// One instance of raw segmentation output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_id: u32,
    pub vertices: Vec<Point2>,
    pub confidence: f64,
}

/// Segmentation capability injected by the caller.
pub trait SegmentationProvider {
    type Frame;
    type Error;

    fn segment(&self, frame: &Self::Frame) -> Result<Vec<Detection>, Self::Error>;
}

/// Run the provider on one frame and reduce its output.
pub fn snapshot_from_provider<P: SegmentationProvider>(
    provider: &P,
    frame: &P::Frame,
) -> Result<AnatomicalSnapshot, P::Error> {
    let detections = provider.segment(frame)?;
    tracing::debug!(count = detections.len(), "segmentation output");
    Ok(AnatomicalSnapshot::from_detections(&detections))
}
