//! HTR format constants.
//!
//! Fixed header values and section markers. Readers match these literally.

pub(crate) const FILE_TYPE: &str = "htr";
pub(crate) const DATA_TYPE: &str = "HTRS";
pub(crate) const FILE_VERSION: u32 = 1;
pub(crate) const EULER_ROTATION_ORDER: &str = "ZYX";
pub(crate) const ROTATION_UNITS: &str = "Degrees";
pub(crate) const GRAVITY_AXIS: &str = "Y";
pub(crate) const BONE_LENGTH_AXIS: &str = "X";
/// Written verbatim, not as a formatted float.
pub(crate) const GLOBAL_SCALE_FACTOR: &str = "1.00";

pub(crate) const HEADER_SECTION: &str = "[Header]";
pub(crate) const HIERARCHY_SECTION: &str = "[SegmentNames&Hierarchy]";
pub(crate) const BASE_POSITION_SECTION: &str = "[BasePosition]";
pub(crate) const END_OF_FILE: &str = "[EndOfFile]";

/// Column legend opening every per-segment frame block.
pub(crate) const FRAME_BLOCK_COMMENT: &str = "#Fr\tTx\tTy\tTz\tRx\tRy\tRz\tSF";
