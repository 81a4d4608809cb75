/// Constants and marker classification shared by the decoder and encoder

/// Leading big-endian magic of every .tri file (`00 01 E1 BA`)
pub const TRI_MAGIC: u32 = 0x0001_E1BA;

/// Marker that opens a mesh object block
pub const FLOAT_START: f32 = 99999.0;

/// Marker that is followed by a trailing name string
pub const FLOAT_END: f32 = -99999.0;

/// Relative tolerance used when matching sentinel markers
pub const MARKER_TOLERANCE: f32 = 1e-4;

/// Longest name or texture string written before the NUL terminator
pub const MAX_NAME_LEN: usize = 254;

/// Floats per vertex record: normal(3) + position(3) + color(3) + u + v
pub const RECORD_FLOATS: usize = 11;

/// Bytes per vertex record
pub const RECORD_SIZE: usize = RECORD_FLOATS * 4;

/// Bytes per triangle (three vertex records)
pub const TRIANGLE_SIZE: usize = 3 * RECORD_SIZE;

/// Default sanity ceiling for a single object's triangle count
pub const DEFAULT_MAX_TRIANGLES: u32 = 200_000;

/// Label written after the final END marker
pub const END_OF_FILE_NAME: &str = "EndOfFile";

/// Label written after the END marker of an archive with no objects
pub const EMPTY_ARCHIVE_NAME: &str = "NoObjectsExported";

/// Sentinel marker kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    pub fn value(self) -> f32 {
        match self {
            Marker::Start => FLOAT_START,
            Marker::End => FLOAT_END,
        }
    }

    /// Match a marker float against the sentinels within [`MARKER_TOLERANCE`]
    pub fn classify(value: f32) -> Option<Marker> {
        if is_close(value, FLOAT_END) {
            Some(Marker::End)
        } else if is_close(value, FLOAT_START) {
            Some(Marker::Start)
        } else {
            None
        }
    }
}

fn is_close(a: f32, b: f32) -> bool {
    a.is_finite() && (a - b).abs() <= MARKER_TOLERANCE * a.abs().max(b.abs())
}

/// Size in bytes of one object block: START marker, name, count, texture and triangles
pub fn object_block_size(name_len: usize, texture_len: usize, triangle_count: usize) -> usize {
    let texture = if triangle_count > 0 { texture_len + 1 } else { 0 };
    4 + name_len + 1 + 4 + texture + triangle_count * TRIANGLE_SIZE
}
