/// .tri encoder: the exact inverse of the decoder's block layout
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::CodecConfig;
use crate::error::Result;
use crate::format::{
    Marker, EMPTY_ARCHIVE_NAME, END_OF_FILE_NAME, MAX_NAME_LEN, TRIANGLE_SIZE, TRI_MAGIC,
};
use crate::geometry::{MeshObject, TriDocument, Triangle};

/// Write a document to any byte sink
pub fn write_tri<W: Write>(
    writer: &mut W,
    document: &TriDocument,
    config: &CodecConfig,
) -> Result<()> {
    writer.write_all(&TRI_MAGIC.to_be_bytes())?;

    for object in &document.objects {
        write_object(writer, object)?;
    }

    let closing = closing_name(document, config);
    writer.write_all(&Marker::End.value().to_be_bytes())?;
    write_name(writer, closing)?;

    log::info!(
        "Encoded {} object(s), {} triangle(s)",
        document.objects.len(),
        document.triangle_count()
    );
    Ok(())
}

/// Encode a document into a fresh buffer
pub fn encode_document(document: &TriDocument, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(estimated_size(document));
    write_tri(&mut buf, document, config)?;
    Ok(buf)
}

/// Encode a list of objects with the default closing label
pub fn encode(objects: &[MeshObject], config: &CodecConfig) -> Result<Vec<u8>> {
    encode_document(&TriDocument::new(objects.to_vec()), config)
}

/// Create (or overwrite) a .tri file, appending the extension when missing
pub fn save_tri(
    path: impl AsRef<Path>,
    document: &TriDocument,
    config: &CodecConfig,
) -> Result<PathBuf> {
    let path = with_tri_extension(path.as_ref());
    log::info!("Saving {}", path.display());
    let mut writer = BufWriter::new(File::create(&path)?);
    write_tri(&mut writer, document, config)?;
    writer.flush()?;
    Ok(path)
}

fn with_tri_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("tri"))
        .unwrap_or(false);
    if has_ext {
        path.to_path_buf()
    } else {
        let mut os = path.as_os_str().to_owned();
        os.push(".tri");
        PathBuf::from(os)
    }
}

/// Label after the final END: document, then config, then the built-in default
fn closing_name<'a>(document: &'a TriDocument, config: &'a CodecConfig) -> &'a str {
    if let Some(name) = document.closing_name.as_deref() {
        return name;
    }
    if let Some(name) = config.closing_name.as_deref() {
        return name;
    }
    if document.objects.is_empty() {
        EMPTY_ARCHIVE_NAME
    } else {
        END_OF_FILE_NAME
    }
}

fn write_object<W: Write>(writer: &mut W, object: &MeshObject) -> Result<()> {
    writer.write_all(&Marker::Start.value().to_be_bytes())?;
    write_name(writer, &object.name)?;

    let count = i32::try_from(object.triangle_count()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("object '{}' has too many triangles", object.name),
        )
    })?;
    writer.write_all(&count.to_be_bytes())?;

    if count > 0 {
        write_name(writer, &object.texture)?;
        for triangle in &object.triangles {
            write_triangle(writer, triangle)?;
        }
    }
    log::debug!("Wrote object '{}' ({} triangle(s))", object.name, count);
    Ok(())
}

fn write_triangle<W: Write>(writer: &mut W, triangle: &Triangle) -> Result<()> {
    let mut buf = [0u8; TRIANGLE_SIZE];
    let floats = triangle.corners.iter().flat_map(|corner| corner.to_floats());
    for (chunk, value) in buf.chunks_exact_mut(4).zip(floats) {
        chunk.copy_from_slice(&value.to_be_bytes());
    }
    writer.write_all(&buf)?;
    Ok(())
}

fn write_name<W: Write>(writer: &mut W, name: &str) -> Result<()> {
    writer.write_all(&ascii_name(name))?;
    writer.write_all(&[0])?;
    Ok(())
}

/// ASCII bytes for a name: at most [`MAX_NAME_LEN`] characters, with
/// non-ASCII characters and embedded NULs replaced by `?`
pub fn ascii_name(name: &str) -> Vec<u8> {
    let char_count = name.chars().count();
    if char_count > MAX_NAME_LEN {
        log::warn!(
            "Name '{}' is {} characters, truncating to {}",
            name,
            char_count,
            MAX_NAME_LEN
        );
    }
    let mut replaced = false;
    let bytes = name
        .chars()
        .take(MAX_NAME_LEN)
        .map(|c| {
            if c.is_ascii() && c != '\0' {
                c as u8
            } else {
                replaced = true;
                b'?'
            }
        })
        .collect();
    if replaced {
        log::warn!("Name '{}' has characters outside ASCII, replaced with '?'", name);
    }
    bytes
}

fn estimated_size(document: &TriDocument) -> usize {
    let objects: usize = document
        .objects
        .iter()
        .map(|o| {
            4 + o.name.len() + 1 + 4 + o.texture.len() + 1 + o.triangle_count() * TRIANGLE_SIZE
        })
        .sum();
    4 + objects + 4 + EMPTY_ARCHIVE_NAME.len() + 1
}
