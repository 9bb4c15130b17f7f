//! HTR text writer.
//!
//! The document is assembled as a list of lines and joined with single
//! newlines, so sections follow each other without blank lines and the
//! closing `[EndOfFile]` marker carries no trailing newline. Numbers use
//! the default `f64` formatting (shortest text that reads back exactly).

use std::fmt::Display;
use std::io::Write;

use super::constants::*;
use super::document::ExportDocument;
use crate::util::Result;

/// Append-only line buffer.
#[derive(Default)]
struct Lines {
    lines: Vec<String>,
}

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn key_value(&mut self, key: &str, value: impl Display) {
        self.lines.push(format!("{key} {value}"));
    }

    /// `<first>\t<Tx>\t<Ty>\t<Tz>\t<Rx>\t<Ry>\t<Rz>\t<SF>`
    fn row(&mut self, first: impl Display, values: [f64; 7]) {
        let mut line = first.to_string();
        for v in values {
            line.push('\t');
            line.push_str(&v.to_string());
        }
        self.lines.push(line);
    }

    fn join(self) -> String {
        self.lines.join("\n")
    }
}

/// Render the whole document.
pub fn serialize<H>(doc: &ExportDocument<H>) -> String {
    let mut out = Lines::default();
    write_header(&mut out, doc);
    write_hierarchy(&mut out, doc);
    write_base_position(&mut out, doc);
    write_frame_blocks(&mut out, doc);
    out.push(END_OF_FILE);
    out.join()
}

/// Render the document and write it to `sink` in one call.
pub fn write_to<H, W: Write>(doc: &ExportDocument<H>, mut sink: W) -> Result<()> {
    sink.write_all(serialize(doc).as_bytes())?;
    sink.flush()?;
    Ok(())
}

fn write_header<H>(out: &mut Lines, doc: &ExportDocument<H>) {
    out.push(HEADER_SECTION);
    out.key_value("FileType", FILE_TYPE);
    out.key_value("DataType", DATA_TYPE);
    out.key_value("FileVersion", FILE_VERSION);
    out.key_value("NumSegments", doc.num_segments());
    out.key_value("NumFrames", doc.num_frames());
    out.key_value("DataFrameRate", doc.frame_rate());
    out.key_value("EulerRotationOrder", EULER_ROTATION_ORDER);
    out.key_value("CalibrationUnits", doc.length_unit());
    out.key_value("RotationUnits", ROTATION_UNITS);
    out.key_value("GlobalAxisofGravity", GRAVITY_AXIS);
    out.key_value("BoneLengthAxis", BONE_LENGTH_AXIS);
    out.key_value("ScaleFactor", GLOBAL_SCALE_FACTOR);
}

fn write_hierarchy<H>(out: &mut Lines, doc: &ExportDocument<H>) {
    let skeleton = doc.skeleton();
    out.push(HIERARCHY_SECTION);
    for segment in skeleton.pre_order() {
        out.push(format!("{}\t{}", segment.name(), skeleton.parent_name(segment.id())));
    }
}

fn write_base_position<H>(out: &mut Lines, doc: &ExportDocument<H>) {
    out.push(BASE_POSITION_SECTION);
    for segment in doc.skeleton().pre_order() {
        let base = segment.timeline().base().copied().unwrap_or_default();
        out.row(segment.name(), base.components());
    }
}

fn write_frame_blocks<H>(out: &mut Lines, doc: &ExportDocument<H>) {
    for segment in doc.skeleton().pre_order() {
        out.push(format!("[{}]", segment.name()));
        out.push(FRAME_BLOCK_COMMENT);
        for (index, delta) in segment.timeline().deltas().enumerate() {
            out.row(index, delta.components());
        }
    }
}
