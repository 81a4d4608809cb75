/// .tri decoder: magic, then START/END sentinel-delimited object blocks
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use nom::{
    bytes::complete::{tag, take_till},
    combinator::{map, opt},
    multi::fill,
    number::complete::{be_f32, be_i32, be_u32},
    sequence::{terminated, tuple},
    IResult,
};

use crate::config::CodecConfig;
use crate::error::{FormatError, FormatErrorKind, Result};
use crate::format::{Marker, RECORD_FLOATS, TRIANGLE_SIZE, TRI_MAGIC};
use crate::geometry::{AliasPoint, MeshObject, TriDocument, Triangle};

/// Decode a complete .tri byte buffer into its objects and closing label
pub fn decode_document(data: &[u8], config: &CodecConfig) -> Result<TriDocument> {
    let document = Decoder::new(data, config.max_triangles).run()?;
    log::info!(
        "Decoded {} object(s), {} triangle(s) from {} bytes",
        document.objects.len(),
        document.triangle_count(),
        data.len()
    );
    Ok(document)
}

/// Decode a complete .tri byte buffer into its objects
pub fn decode(data: &[u8], config: &CodecConfig) -> Result<Vec<MeshObject>> {
    decode_document(data, config).map(|document| document.objects)
}

/// Read a .tri stream to the end and decode it
pub fn read_tri<R: Read>(mut reader: R, config: &CodecConfig) -> Result<TriDocument> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_document(&data, config)
}

/// Open and decode a .tri file
pub fn load_tri(path: impl AsRef<Path>, config: &CodecConfig) -> Result<TriDocument> {
    let path = path.as_ref();
    log::info!("Loading {}", path.display());
    let file = File::open(path)?;
    read_tri(BufReader::new(file), config)
}

struct Decoder<'a> {
    data: &'a [u8],
    max_triangles: u32,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], max_triangles: u32) -> Self {
        Self {
            data,
            max_triangles,
        }
    }

    fn offset(&self, rest: &[u8]) -> usize {
        self.data.len() - rest.len()
    }

    fn error(&self, kind: FormatErrorKind, at: &[u8]) -> FormatError {
        FormatError::new(kind, self.offset(at))
    }

    /// Run a field parser, mapping any short read to `Truncated` at the field start
    fn field<T>(
        &self,
        input: &'a [u8],
        mut parser: impl FnMut(&'a [u8]) -> IResult<&'a [u8], T>,
    ) -> std::result::Result<(&'a [u8], T), FormatError> {
        parser(input).map_err(|_| self.error(FormatErrorKind::Truncated, input))
    }

    fn run(&self) -> std::result::Result<TriDocument, FormatError> {
        let (mut input, magic) = self.field(self.data, be_u32)?;
        if magic != TRI_MAGIC {
            return Err(self.error(FormatErrorKind::BadMagic(magic), self.data));
        }

        let mut document = TriDocument::default();
        while !input.is_empty() {
            let marker_at = input;
            if input.len() < 4 {
                log::warn!(
                    "Partial marker at byte {} ({} trailing byte(s)), possible truncation",
                    self.offset(marker_at),
                    input.len()
                );
                break;
            }
            let (rest, value) = self.field(input, be_f32)?;
            input = match Marker::classify(value) {
                Some(Marker::End) => {
                    let (rest, name) = self.field(rest, nul_string)?;
                    if rest.is_empty() {
                        log::debug!(
                            "END marker at byte {}, closing name '{}'",
                            self.offset(marker_at),
                            name
                        );
                    } else {
                        log::warn!(
                            "Intermediate END marker at byte {} (name '{}'), continuing",
                            self.offset(marker_at),
                            name
                        );
                    }
                    document.closing_name = Some(name);
                    rest
                }
                Some(Marker::Start) => {
                    log::debug!("START marker at byte {}", self.offset(marker_at));
                    let (rest, object) = self.object(rest)?;
                    document.objects.push(object);
                    rest
                }
                None => {
                    return Err(self.error(FormatErrorKind::UnexpectedMarker(value), marker_at));
                }
            };
        }
        Ok(document)
    }

    fn object(
        &self,
        input: &'a [u8],
    ) -> std::result::Result<(&'a [u8], MeshObject), FormatError> {
        let (input, name) = self.field(input, nul_string)?;
        let count_at = input;
        let (input, count) = self.field(input, be_i32)?;
        if count < 0 {
            return Err(self.error(FormatErrorKind::NegativeTriangleCount(count), count_at));
        }
        if count as u32 > self.max_triangles {
            return Err(self.error(
                FormatErrorKind::TriangleCountTooLarge {
                    count,
                    max: self.max_triangles,
                },
                count_at,
            ));
        }
        if count == 0 {
            log::debug!("Object '{}' has no triangles", name);
            return Ok((input, MeshObject::new(name, String::new())));
        }

        let (mut input, texture) = self.field(input, nul_string)?;
        let count = count as usize;
        let capacity = count.min(input.len() / TRIANGLE_SIZE);
        let mut object = MeshObject::with_capacity(name, texture, capacity);
        for _ in 0..count {
            let (rest, parsed) = self.field(input, triangle)?;
            object.add_triangle(parsed);
            input = rest;
        }
        log::debug!(
            "Object '{}': {} triangle(s), texture '{}'",
            object.name,
            count,
            object.texture
        );
        Ok((input, object))
    }
}

/// NUL-terminated string; end of input also terminates it. Non-ASCII bytes are dropped.
fn nul_string(input: &[u8]) -> IResult<&[u8], String> {
    map(
        terminated(take_till(|b| b == 0), opt(tag(&b"\0"[..]))),
        |bytes: &[u8]| bytes.iter().filter(|b| b.is_ascii()).map(|&b| b as char).collect(),
    )(input)
}

fn alias_point(input: &[u8]) -> IResult<&[u8], AliasPoint> {
    let mut floats = [0.0f32; RECORD_FLOATS];
    let filled: IResult<&[u8], ()> = fill(be_f32, &mut floats)(input);
    let (input, ()) = filled?;
    Ok((input, AliasPoint::from_floats(floats)))
}

fn triangle(input: &[u8]) -> IResult<&[u8], Triangle> {
    map(tuple((alias_point, alias_point, alias_point)), |(a, b, c)| {
        Triangle::new(a, b, c)
    })(input)
}
