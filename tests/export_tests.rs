//! Integration tests for exporting scenes to HTR files.

use std::fs;

use htr::prelude::*;
use htr::skeleton::GLOBAL_PARENT;

use tempfile::tempdir;

/// Two-joint chain; the child moves 5 units along Z on frame 1.
const CHAIN_SCENE: &str = r#"{
    "playback": { "min": 0, "max": 1 },
    "time_unit": "ntsc",
    "length_unit": "cm",
    "selection": ["root"],
    "objects": [
        { "name": "root", "type": "joint" },
        { "name": "child", "type": "joint", "parent": "root",
          "channels": { "translateX": 1, "translateZ": [[0, 0], [1, 5]] } }
    ]
}"#;

/// Mixed hierarchy with a non-joint control between joints.
const RIG_SCENE: &str = r#"{
    "playback": { "min": 1, "max": 5 },
    "time_unit": "29.97fps",
    "length_unit": "mm",
    "selection": ["hips", "spine"],
    "objects": [
        { "name": "hips", "type": "joint",
          "channels": { "translateY": [[1, 90], [2, 91], [3, 92.5], [4, 91], [5, 90]],
                        "rotateY": [[1, 0], [2, 15], [3, 30], [4, 45], [5, 60]] } },
        { "name": "spine", "type": "joint", "parent": "hips",
          "channels": { "rotateX": [[1, -10.25], [2, -8], [3, -6], [4, -4], [5, -2]] } },
        { "name": "neck", "type": "joint", "parent": "spine" },
        { "name": "ikHandle", "type": "ikHandle", "parent": "hips" },
        { "name": "ikJoint", "type": "joint", "parent": "ikHandle" },
        { "name": "legL", "type": "joint", "parent": "hips",
          "channels": { "scaleX": [[1, 1], [2, 1.25], [3, 1.5], [4, 1.25], [5, 1]] } },
        { "name": "legR", "type": "joint", "parent": "hips" }
    ]
}"#;

/// Lines of one `[section]` up to the next section header.
fn section<'a>(text: &'a str, header: &str) -> Vec<&'a str> {
    text.lines()
        .skip_while(|l| *l != header)
        .skip(1)
        .take_while(|l| !l.starts_with('['))
        .collect()
}

fn header_value<'a>(text: &'a str, key: &str) -> &'a str {
    section(text, "[Header]")
        .into_iter()
        .find_map(|l| l.strip_prefix(key).and_then(|v| v.strip_prefix(' ')))
        .unwrap_or_else(|| panic!("missing header key {key}"))
}

fn parse_row(line: &str) -> Vec<f64> {
    line.split('\t').skip(1).map(|v| v.parse().unwrap()).collect()
}

#[test]
fn test_two_joint_chain() {
    let scene = MemoryScene::from_json_str(CHAIN_SCENE).unwrap();
    let text = Exporter::new(&scene).render(Some(&scene.find("root").unwrap())).unwrap();

    let expected = "\
[Header]
FileType htr
DataType HTRS
FileVersion 1
NumSegments 2
NumFrames 2
DataFrameRate 30
EulerRotationOrder ZYX
CalibrationUnits cm
RotationUnits Degrees
GlobalAxisofGravity Y
BoneLengthAxis X
ScaleFactor 1.00
[SegmentNames&Hierarchy]
root\tGLOBAL
child\troot
[BasePosition]
root\t0\t0\t0\t0\t0\t0\t1
child\t0\t1\t0\t0\t0\t0\t1
[root]
#Fr\tTx\tTy\tTz\tRx\tRy\tRz\tSF
0\t0\t0\t0\t0\t0\t0\t0
1\t0\t0\t0\t0\t0\t0\t0
[child]
#Fr\tTx\tTy\tTz\tRx\tRy\tRz\tSF
0\t0\t0\t0\t0\t0\t0\t0
1\t0\t0\t5\t0\t0\t0\t0
[EndOfFile]";
    assert_eq!(text, expected);
}

#[test]
fn test_segment_counts_and_parents() {
    let scene = MemoryScene::from_json_str(RIG_SCENE).unwrap();
    let exporter = Exporter::new(&scene);
    let root = exporter.selected_root().unwrap();
    let doc = exporter.document(Some(&root)).unwrap();
    let text = serialize(&doc);

    // ikHandle is not a joint, so ikJoint below it is dropped too
    let skeleton = doc.skeleton();
    assert_eq!(skeleton.len(), 5);
    assert!(skeleton.find_by_name("ikJoint").is_none());
    assert_eq!(header_value(&text, "NumSegments"), "5");

    let hierarchy = section(&text, "[SegmentNames&Hierarchy]");
    assert_eq!(
        hierarchy,
        [
            "hips\tGLOBAL",
            "spine\thips",
            "neck\tspine",
            "legL\thips",
            "legR\thips",
        ]
    );
    for segment in skeleton.iter() {
        let line = format!("{}\t{}", segment.name(), skeleton.parent_name(segment.id()));
        assert!(hierarchy.contains(&line.as_str()));
        if segment.is_root() {
            assert!(line.ends_with(GLOBAL_PARENT));
        }
    }
    assert_eq!(section(&text, "[BasePosition]").len(), 5);
}

#[test]
fn test_frame_blocks() {
    let scene = MemoryScene::from_json_str(RIG_SCENE).unwrap();
    let text = Exporter::new(&scene).render(Some(&scene.find("hips").unwrap())).unwrap();

    assert_eq!(header_value(&text, "NumFrames"), "5");
    assert_eq!(header_value(&text, "DataFrameRate"), "29.97");
    assert_eq!(header_value(&text, "CalibrationUnits"), "mm");

    for name in ["hips", "spine", "neck", "legL", "legR"] {
        let block = section(&text, &format!("[{name}]"));
        assert_eq!(block[0], "#Fr\tTx\tTy\tTz\tRx\tRy\tRz\tSF");
        let rows = &block[1..];
        assert_eq!(rows.len(), 5, "{name}");
        for (i, row) in rows.iter().enumerate() {
            assert!(row.starts_with(&format!("{i}\t")), "{name}: {row}");
        }
        assert!(parse_row(rows[0]).iter().all(|v| *v == 0.0), "{name}");
    }

    // hips: translateY lands on X, rotateY lands on X
    let hips = section(&text, "[hips]");
    assert_eq!(parse_row(hips[3]), [2.5, 0.0, 0.0, 30.0, 0.0, 0.0, 0.0]);
    // legL scale delta
    let leg = section(&text, "[legL]");
    assert_eq!(parse_row(leg[2])[6], 0.25);
}

#[test]
fn test_deltas_reconstruct_raw_frames() {
    let scene = MemoryScene::from_json_str(RIG_SCENE).unwrap();
    let doc = Exporter::new(&scene).document(Some(&0)).unwrap();
    let text = serialize(&doc);

    let base_lines = section(&text, "[BasePosition]");
    for (segment, base_line) in doc.skeleton().pre_order().zip(base_lines) {
        let base = parse_row(base_line);
        let rows = section(&text, &format!("[{}]", segment.name()));
        for (i, row) in rows[1..].iter().enumerate() {
            let delta = parse_row(row);
            let raw = segment.timeline().frames()[i].components();
            let rebuilt: Vec<f64> = delta.iter().zip(&base).map(|(d, b)| d + b).collect();
            assert_eq!(rebuilt, raw, "{} frame {}", segment.name(), i);
        }
    }
}

#[test]
fn test_playback_offset_maps_to_index_zero() {
    let scene = MemoryScene::from_json_str(RIG_SCENE).unwrap();
    let doc = Exporter::new(&scene).document(Some(&0)).unwrap();
    // Scene frame 1 is timeline index 0
    let hips = doc.skeleton().root();
    assert_eq!(hips.timeline().base().unwrap().translation, DVec3::new(90.0, 0.0, 0.0));
}

#[test]
fn test_export_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chain.htr");
    let scene = MemoryScene::from_json_str(CHAIN_SCENE).unwrap();
    let exporter = Exporter::new(&scene);

    let summary = exporter.export_selection(&path).unwrap();
    assert_eq!(summary.path, path);
    assert_eq!(summary.num_segments, 2);
    assert_eq!(summary.num_frames, 2);

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(summary.bytes, written.len());
    assert_eq!(written, exporter.render(Some(&0)).unwrap());
    assert!(written.ends_with("[EndOfFile]"));

    // Only the output file is left behind
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_failed_export_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.htr");
    fs::write(&path, "previous").unwrap();

    // Frame 2 has no translateZ key on child
    let scene = MemoryScene::from_json_str(&CHAIN_SCENE.replace(r#""max": 1"#, r#""max": 2"#)).unwrap();
    let err = Exporter::new(&scene).export_selection(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::AttributeUnavailable { frame: 2, attribute: "translateZ", .. }
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");

    // Non-joint root: nothing created
    let missing = dir.path().join("never.htr");
    let scene = MemoryScene::from_json_str(
        r#"{ "playback": { "min": 0, "max": 1 }, "selection": ["grp"],
             "objects": [ { "name": "grp" } ] }"#,
    )
    .unwrap();
    let err = Exporter::new(&scene).export_selection(&missing).unwrap_err();
    assert!(matches!(err, Error::NotAJoint(_)));
    assert!(!missing.exists());
}

#[test]
fn test_empty_selection_and_bad_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.htr");

    let scene = MemoryScene::from_json_str(&CHAIN_SCENE.replace(r#"["root"]"#, "[]")).unwrap();
    assert!(matches!(
        Exporter::new(&scene).export_selection(&path),
        Err(Error::EmptySelection)
    ));

    let scene = MemoryScene::from_json_str(
        &CHAIN_SCENE.replace(r#""min": 0, "max": 1"#, r#""min": 5, "max": 1"#),
    )
    .unwrap();
    assert!(matches!(
        Exporter::new(&scene).export_selection(&path),
        Err(Error::InvalidFrameRange { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn test_scene_file_roundtrip() {
    let dir = tempdir().unwrap();
    let scene_path = dir.path().join("rig.json");
    fs::write(&scene_path, RIG_SCENE).unwrap();

    let scene = MemoryScene::open(&scene_path).unwrap();
    let skeleton = build_root(&scene, &scene.find("hips").unwrap()).unwrap();
    assert_eq!(skeleton.to_hierarchy_string(), "hips\n  spine\n    neck\n  legL\n  legR");
}

#[test]
fn test_demo_scene() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/walk.json");
    let scene = MemoryScene::open(path).unwrap();
    let exporter = Exporter::new(&scene);
    let root = exporter.selected_root().unwrap();
    let text = exporter.render(Some(&root)).unwrap();

    assert_eq!(header_value(&text, "NumSegments"), "7");
    assert_eq!(header_value(&text, "NumFrames"), "4");
    assert_eq!(header_value(&text, "DataFrameRate"), "24");
    assert!(!text.contains("hips_ctrl"));
    assert_eq!(
        section(&text, "[SegmentNames&Hierarchy]"),
        [
            "hips\tGLOBAL",
            "spine\thips",
            "head\tspine",
            "thighL\thips",
            "shinL\tthighL",
            "thighR\thips",
            "shinR\tthighR",
        ]
    );
}
