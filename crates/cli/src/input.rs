//! Snapshot input files.
//!
//! Accepts either raw segmentation output `{"detections": [...]}` or an
//! already reduced `AnatomicalSnapshot`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pinplan::snapshot::{snapshot_from_provider, Detection, SegmentationProvider};
use pinplan::AnatomicalSnapshot;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Detections { detections: Vec<Detection> },
    Snapshot(AnatomicalSnapshot),
}

/// Segmentation "provider" that replays detections stored as JSON.
pub struct DetectionFile;

impl SegmentationProvider for DetectionFile {
    type Frame = PathBuf;
    type Error = anyhow::Error;

    fn segment(&self, frame: &PathBuf) -> Result<Vec<Detection>> {
        match read(frame)? {
            SnapshotFile::Detections { detections } => Ok(detections),
            SnapshotFile::Snapshot(_) => {
                anyhow::bail!("{} holds a snapshot, not detections", frame.display())
            }
        }
    }
}

fn read(path: &Path) -> Result<SnapshotFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_snapshot(path: &Path) -> Result<AnatomicalSnapshot> {
    let snapshot = match read(path)? {
        SnapshotFile::Detections { .. } => {
            snapshot_from_provider(&DetectionFile, &path.to_path_buf())?
        }
        SnapshotFile::Snapshot(s) => s,
    };
    tracing::info!(
        epicondyles = snapshot.epicondyles.len(),
        fossa = snapshot.fossa.is_some(),
        humerus = snapshot.humerus.is_some(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_detections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("det.json");
        std::fs::write(
            &path,
            r#"{"detections": [
                {"class_id": 0, "vertices": [[90,190],[110,190],[110,210],[90,210]], "confidence": 0.9},
                {"class_id": 1, "vertices": [[150,150],[250,150],[250,250],[150,250]], "confidence": 0.7}
            ]}"#,
        )
        .unwrap();
        let snap = load_snapshot(&path).unwrap();
        assert_eq!(snap.epicondyles.len(), 1);
        assert!((snap.epicondyles[0].centroid.x - 100.0).abs() < 1e-9);
        assert!(snap.fossa.is_some());
        assert!((snap.fossa_confidence - 0.7).abs() < 1e-12);
        assert!(snap.humerus.is_none());
    }

    #[test]
    fn loads_reduced_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snap.json");
        std::fs::write(
            &path,
            r#"{"epicondyles": [{"centroid": [100, 200], "confidence": 0.9}],
                "fossa": [[150,150],[250,150],[250,250],[150,250]],
                "fossa_confidence": 0.9,
                "humerus": null}"#,
        )
        .unwrap();
        let snap = load_snapshot(&path).unwrap();
        assert_eq!(snap.epicondyles.len(), 1);
        assert!(snap.fossa.is_some());
        assert!(DetectionFile.segment(&path).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"foo": 1}"#).unwrap();
        assert!(load_snapshot(&path).is_err());
        assert!(load_snapshot(&dir.path().join("missing.json")).is_err());
    }
}
