use std::fs;
use std::path::Path;

use flate2::Crc;

use crate::error::{Error, Result};

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

pub const COLOR_GRAY: u8 = 0;
pub const COLOR_RGB: u8 = 2;

fn crc32(kind: &[u8], data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    crc.sum()
}

// Header fields plus the concatenated, still zlib-compressed, IDAT payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub interlaced: bool,
    pub idat: Vec<u8>,
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

pub fn parse(bytes: &[u8]) -> Result<PngImage> {
    if bytes.len() < SIGNATURE.len() || bytes[..8] != SIGNATURE {
        return Err(Error::InvalidPng("missing signature"));
    }
    let mut header: Option<PngImage> = None;
    let mut rest = &bytes[8..];
    loop {
        if rest.len() < 12 {
            return Err(Error::InvalidPng("truncated chunk"));
        }
        let len = be_u32(rest) as usize;
        if rest.len() < 12 + len {
            return Err(Error::InvalidPng("truncated chunk"));
        }
        let kind = &rest[4..8];
        let data = &rest[8..8 + len];
        if be_u32(&rest[8 + len..]) != crc32(kind, data) {
            return Err(Error::InvalidPng("chunk CRC mismatch"));
        }
        if kind == b"IHDR" {
            if header.is_some() {
                return Err(Error::InvalidPng("duplicate IHDR"));
            }
            if len != 13 {
                return Err(Error::InvalidPng("bad IHDR length"));
            }
            header = Some(PngImage {
                width: be_u32(data),
                height: be_u32(&data[4..]),
                bit_depth: data[8],
                color_type: data[9],
                interlaced: data[12] != 0,
                idat: Vec::new(),
            });
        } else {
            let Some(image) = header.as_mut() else {
                return Err(Error::InvalidPng("first chunk is not IHDR"));
            };
            if kind == b"IDAT" {
                image.idat.extend_from_slice(data);
            } else if kind == b"IEND" {
                break;
            }
        }
        rest = &rest[12 + len..];
    }
    match header {
        Some(image) if !image.idat.is_empty() => Ok(image),
        _ => Err(Error::InvalidPng("no image data")),
    }
}

pub fn read_png(path: &Path) -> Result<PngImage> {
    let bytes = fs::read(path).map_err(|e| Error::read(path, e))?;
    parse(&bytes)
}

// Hand-assembled files for the parser and PDF tests: unfiltered rows of
// `channels` bytes per pixel, every sample set to `fill`.
#[cfg(test)]
pub(crate) fn fixture(width: u32, height: u32, color_type: u8, fill: u8) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn chunk(out: &mut Vec<u8>, kind: &[u8], data: &[u8]) {
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        out.extend_from_slice(&crc32(kind, data).to_be_bytes());
    }

    let channels = match color_type {
        COLOR_GRAY | 3 => 1,
        4 => 2,
        6 => 4,
        _ => 3,
    };
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);

    let mut zlib = ZlibEncoder::new(Vec::new(), Compression::default());
    for _ in 0..height {
        zlib.write_all(&[0]).unwrap();
        zlib.write_all(&vec![fill; width as usize * channels]).unwrap();
    }
    let idat = zlib.finish().unwrap();

    let mut out = SIGNATURE.to_vec();
    chunk(&mut out, b"IHDR", &ihdr);
    chunk(&mut out, b"IDAT", &idat);
    chunk(&mut out, b"IEND", &[]);
    out
}
