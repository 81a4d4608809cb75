/// TRI Core Library - Alias/Quake .tri triangle file codec
///
/// Byte-exact reader and writer for `.tri` files: a big-endian magic
/// followed by START/END float sentinels delimiting named triangle groups.
/// Export and import helpers sit on either side of the codec and never
/// reach into a live scene.
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod export;
pub mod format;
pub mod geometry;
pub mod import;
pub mod transform;

// Re-export commonly used types
pub use config::{CodecConfig, SelectionMode};
pub use decode::{decode, decode_document, load_tri, read_tri};
pub use encode::{encode, encode_document, save_tri, write_tri};
pub use error::{FormatError, FormatErrorKind, Result, TriError};
pub use export::{export_document, prepare_objects, ExportCorner, ExportMesh};
pub use geometry::{AliasPoint, MeshObject, TriDocument, Triangle};
pub use import::{import_objects, IndexedMesh, MeshSink};
pub use transform::CoordinateConversion;
