use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::png::{PngImage, COLOR_GRAY, COLOR_RGB};
use crate::error::{Error, Result};

pub const INCH: f32 = 72.0;
// US Letter, in points
pub const LETTER: (f32, f32) = (8.5 * INCH, 11.0 * INCH);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl Font {
    const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::Courier,
    ];

    fn resource(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::Courier => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::Courier => "Courier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageId(usize);

#[derive(Debug, Clone)]
struct ImageXObject {
    width: u32,
    height: u32,
    colors: u8,
    data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PdfDocument {
    width: f32,
    height: f32,
    pages: Vec<String>,
    current: String,
    font: (Font, f32),
    images: Vec<ImageXObject>,
}

fn num(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

// WinAnsiEncoding literal string body; anything outside it becomes `?`.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let byte = match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
                continue;
            }
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            _ => b'?',
        };
        if byte.is_ascii() {
            out.push(byte as char);
        } else {
            let _ = write!(out, "\\{byte:03o}");
        }
    }
    out
}

impl PdfDocument {
    pub fn new(page_size: (f32, f32)) -> Self {
        PdfDocument {
            width: page_size.0,
            height: page_size.1,
            pages: Vec::new(),
            current: String::new(),
            font: (Font::Helvetica, 12.0),
            images: Vec::new(),
        }
    }

    pub fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = (font, size);
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        let (font, size) = self.font;
        let _ = writeln!(
            self.current,
            "BT /{} {} Tf {} {} Td ({}) Tj ET",
            font.resource(),
            num(size),
            num(x),
            num(y),
            encode_text(text)
        );
    }

    // The IDAT stream is copied as-is and decoded by the reader through the
    // PNG predictor, so only non-interlaced 8-bit gray or RGB is accepted.
    pub fn embed_png(&mut self, png: &PngImage) -> Result<ImageId> {
        let colors = match png.color_type {
            COLOR_GRAY => 1,
            COLOR_RGB => 3,
            other => {
                return Err(Error::UnsupportedPng(format!("color type {other}")));
            }
        };
        if png.bit_depth != 8 {
            return Err(Error::UnsupportedPng(format!("bit depth {}", png.bit_depth)));
        }
        if png.interlaced {
            return Err(Error::UnsupportedPng("interlaced".to_string()));
        }
        self.images.push(ImageXObject {
            width: png.width,
            height: png.height,
            colors,
            data: png.idat.clone(),
        });
        Ok(ImageId(self.images.len() - 1))
    }

    pub fn image_size(&self, id: ImageId) -> (u32, u32) {
        let image = &self.images[id.0];
        (image.width, image.height)
    }

    pub fn draw_image(&mut self, id: ImageId, x: f32, y: f32, width: f32, height: f32) {
        let _ = writeln!(
            self.current,
            "q {} 0 0 {} {} {} cm /Im{} Do Q",
            num(width),
            num(height),
            num(x),
            num(y),
            id.0 + 1
        );
    }

    pub fn show_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
    }

    // A trailing empty page is not emitted unless it is the only one.
    pub fn page_count(&self) -> usize {
        self.finished_pages().len()
    }

    fn finished_pages(&self) -> Vec<&str> {
        let mut pages: Vec<&str> = self.pages.iter().map(String::as_str).collect();
        if !self.current.is_empty() || pages.is_empty() {
            pages.push(&self.current);
        }
        pages
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let pages = self.finished_pages();
        let first_font = 3;
        let first_image = first_font + Font::ALL.len();
        let first_page = first_image + self.images.len();
        let object_count = first_page + 2 * pages.len() - 1;

        let mut out: Vec<u8> = Vec::new();
        let mut offsets = vec![0usize; object_count + 1];
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut begin = |out: &mut Vec<u8>, id: usize| {
            offsets[id] = out.len();
            out.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        };

        begin(&mut out, 1);
        out.extend_from_slice(b"<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", first_page + 2 * i))
            .collect();
        begin(&mut out, 2);
        out.extend_from_slice(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
                kids.join(" "),
                pages.len()
            )
            .as_bytes(),
        );

        for (i, font) in Font::ALL.iter().enumerate() {
            begin(&mut out, first_font + i);
            out.extend_from_slice(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                    font.base_font()
                )
                .as_bytes(),
            );
        }

        for (i, image) in self.images.iter().enumerate() {
            begin(&mut out, first_image + i);
            let color_space = if image.colors == 1 { "DeviceGray" } else { "DeviceRGB" };
            out.extend_from_slice(
                format!(
                    "<< /Type /XObject /Subtype /Image /Width {w} /Height {h} /ColorSpace /{color_space} \
                     /BitsPerComponent 8 /Filter /FlateDecode \
                     /DecodeParms << /Predictor 15 /Colors {c} /BitsPerComponent 8 /Columns {w} >> \
                     /Length {len} >>\nstream\n",
                    w = image.width,
                    h = image.height,
                    c = image.colors,
                    len = image.data.len()
                )
                .as_bytes(),
            );
            out.extend_from_slice(&image.data);
            out.extend_from_slice(b"\nendstream\nendobj\n");
        }

        let fonts: String = Font::ALL
            .iter()
            .enumerate()
            .map(|(i, font)| format!("/{} {} 0 R ", font.resource(), first_font + i))
            .collect();
        let xobjects: String = (0..self.images.len())
            .map(|i| format!("/Im{} {} 0 R ", i + 1, first_image + i))
            .collect();
        for (i, content) in pages.iter().enumerate() {
            let page_id = first_page + 2 * i;
            begin(&mut out, page_id);
            out.extend_from_slice(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << {fonts}>> /XObject << {xobjects}>> >> \
                     /Contents {} 0 R >>\nendobj\n",
                    num(self.width),
                    num(self.height),
                    page_id + 1
                )
                .as_bytes(),
            );
            begin(&mut out, page_id + 1);
            out.extend_from_slice(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes());
            out.extend_from_slice(content.as_bytes());
            out.extend_from_slice(b"endstream\nendobj\n");
        }

        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", object_count + 1).as_bytes());
        for offset in &offsets[1..] {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                object_count + 1
            )
            .as_bytes(),
        );
        out
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_bytes()).map_err(|e| Error::write(path, e))
    }
}
