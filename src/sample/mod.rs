//! Timeline sampling.
//!
//! For every segment of a built skeleton, every frame of the export range
//! is read once, converted to HTR axis convention, and stored in the
//! segment's [`Timeline`]. Deltas against the base pose are derived from
//! the stored raw frames when the file is written.

mod frame;
mod timeline;

pub use frame::{Frame, RawSample};
pub use timeline::Timeline;

use tracing::debug;

use crate::core::FrameRange;
use crate::scene::{Attribute, Scene};
use crate::skeleton::Skeleton;
use crate::util::{DVec3, Error, Result};

/// Fill every segment's timeline over `range`.
///
/// `sample_fn` is called with the segment's scene handle and the scene
/// frame number, pre-order over segments, frames in ascending order. The
/// first error aborts sampling and leaves every timeline untouched.
#[tracing::instrument(skip_all, fields(segments = skeleton.len(), frames = range.len()))]
pub fn sample<H, F>(skeleton: &mut Skeleton<H>, range: FrameRange, mut sample_fn: F) -> Result<()>
where
    F: FnMut(&H, i64) -> Result<RawSample>,
{
    let mut sampled = Vec::with_capacity(skeleton.len());
    for segment in skeleton.pre_order() {
        debug!(segment = segment.name(), "sampling");
        let mut timeline = Timeline::with_capacity(range.len());
        for index in range.indices() {
            let raw = sample_fn(segment.handle(), range.scene_frame(index))?;
            timeline.push(Frame::from_raw(raw));
        }
        sampled.push((segment.id(), timeline));
    }

    for (id, timeline) in sampled {
        skeleton.set_timeline(id, timeline);
    }
    Ok(())
}

/// Sampling function reading the seven transform attributes from a scene.
///
/// An attribute the scene cannot resolve is [`Error::AttributeUnavailable`].
pub fn scene_sampler<S: Scene>(scene: &S) -> impl FnMut(&S::Handle, i64) -> Result<RawSample> + '_ {
    move |handle: &S::Handle, frame: i64| -> Result<RawSample> {
        let read = |attribute: Attribute| {
            scene
                .attribute_at_frame(handle, attribute, frame)
                .ok_or_else(|| Error::AttributeUnavailable {
                    segment: scene.display_name(handle),
                    frame,
                    attribute: attribute.as_str(),
                })
        };
        Ok(RawSample {
            translate: DVec3::new(
                read(Attribute::TranslateX)?,
                read(Attribute::TranslateY)?,
                read(Attribute::TranslateZ)?,
            ),
            rotate: DVec3::new(
                read(Attribute::RotateX)?,
                read(Attribute::RotateY)?,
                read(Attribute::RotateZ)?,
            ),
            scale: read(Attribute::ScaleX)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use crate::skeleton::build_root;

    const SCENE: &str = r#"{
        "playback": { "min": 10, "max": 12 },
        "objects": [
            { "name": "root", "type": "joint",
              "channels": { "translateX": [[10, 1], [11, 2], [12, 3]], "rotateY": 45 } },
            { "name": "tip", "type": "joint", "parent": "root",
              "channels": { "scaleX": [[10, 1], [11, 1.5], [12, 2]] } }
        ]
    }"#;

    #[test]
    fn test_sample_scene() {
        let scene = MemoryScene::from_json_str(SCENE).unwrap();
        let mut skeleton = build_root(&scene, &scene.find("root").unwrap()).unwrap();
        let range = FrameRange::from_playback(10.0, 12.0).unwrap();

        sample(&mut skeleton, range, scene_sampler(&scene)).unwrap();

        let root = skeleton.root();
        assert_eq!(root.timeline().len(), 3);
        // translateX lands on Y, rotateY lands on X
        assert_eq!(root.timeline().frames()[2].translation, DVec3::new(0.0, 3.0, 0.0));
        assert_eq!(root.timeline().frames()[0].rotation, DVec3::new(45.0, 0.0, 0.0));

        let tip = skeleton.find_by_name("tip").unwrap();
        let scales: Vec<f64> = tip.timeline().frames().iter().map(|f| f.scale).collect();
        assert_eq!(scales, [1.0, 1.5, 2.0]);
        let deltas: Vec<f64> = tip.timeline().deltas().map(|f| f.scale).collect();
        assert_eq!(deltas, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_sample_calls_scene_frames() {
        let scene = MemoryScene::from_json_str(SCENE).unwrap();
        let mut skeleton = build_root(&scene, &scene.find("root").unwrap()).unwrap();
        let range = FrameRange::from_playback(10.0, 12.0).unwrap();

        let mut calls = Vec::new();
        sample(&mut skeleton, range, |handle: &usize, frame| {
            calls.push((*handle, frame));
            Ok(RawSample::new(DVec3::ZERO, DVec3::ZERO, 1.0))
        })
        .unwrap();
        assert_eq!(calls, [(0, 10), (0, 11), (0, 12), (1, 10), (1, 11), (1, 12)]);
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let scene = MemoryScene::from_json_str(SCENE).unwrap();
        let mut skeleton = build_root(&scene, &scene.find("root").unwrap()).unwrap();
        // Frame 13 has no translateX key on root
        let range = FrameRange::from_playback(10.0, 13.0).unwrap();

        let err = sample(&mut skeleton, range, scene_sampler(&scene)).unwrap_err();
        match err {
            Error::AttributeUnavailable { segment, frame, attribute } => {
                assert_eq!(segment, "root");
                assert_eq!(frame, 13);
                assert_eq!(attribute, "translateX");
            }
            other => panic!("unexpected error: {other}"),
        }
        // No partial timelines
        assert!(skeleton.iter().all(|s| s.timeline().is_empty()));
    }
}
