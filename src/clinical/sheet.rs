//! Discharge sheet ("foaie de externare") composition and PDF output.
//!
//! The sheet is laid out as absolutely positioned text on A4 pages and
//! written as a minimal PDF using the standard Helvetica fonts, so every
//! string is reduced to ASCII first.

use std::fmt::Write as _;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::HospitalConfig;
use crate::models::{DischargeSheetRequest, DoctorPublic};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const WRAP_WIDTH: usize = 100;

const TITLE: &str = "FOAIE DE EXTERNARE – AMBULATORIU";
const BOTTOM_MARGIN: f32 = 60.0;
const SIGNATURE_TOP: f32 = 210.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        text: String,
    },
    Rule {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DischargeSheet {
    pub pages: Vec<Vec<Mark>>,
}

impl DischargeSheet {
    /// All text on the sheet, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flatten().filter_map(|m| match m {
            Mark::Text { text, .. } => Some(text.as_str()),
            Mark::Rule { .. } => None,
        })
    }
}

/// Drop diacritics (canonical decomposition, combining marks removed) and
/// replace typographic punctuation with ASCII.
pub fn strip_accents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            '–' | '—' => out.push('-'),
            '„' | '”' | '“' => out.push('"'),
            '’' | '‘' => out.push('\''),
            '≤' => out.push_str("<="),
            '≥' => out.push_str(">="),
            other => out.push(other),
        }
    }
    out
}

/// Break text into lines of at most `max_len` characters. Each input line is
/// a paragraph; blank paragraphs become empty lines. Long paragraphs break at
/// the last space before the limit, or hard at the limit.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut parts = Vec::new();

    for paragraph in text.split('\n') {
        let mut rest: Vec<char> = paragraph.trim().chars().collect();
        if rest.is_empty() {
            parts.push(String::new());
            continue;
        }
        while rest.len() > max_len {
            let cut = rest[..max_len]
                .iter()
                .rposition(|c| *c == ' ')
                .filter(|&i| i > 0)
                .unwrap_or(max_len);
            parts.push(rest[..cut].iter().collect());
            let tail: String = rest[cut..].iter().collect();
            rest = tail.trim_start().chars().collect();
        }
        if !rest.is_empty() {
            parts.push(rest.into_iter().collect());
        }
    }
    parts
}

struct Layout {
    pages: Vec<Vec<Mark>>,
    y: f32,
}

impl Layout {
    fn new(start_y: f32) -> Self {
        Self {
            pages: vec![Vec::new()],
            y: start_y,
        }
    }

    fn current(&mut self) -> &mut Vec<Mark> {
        // `pages` always holds at least one page.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page_below(&mut self, limit: f32) {
        if self.y < limit {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - 60.0;
        }
    }

    fn text_at(&mut self, x: f32, y: f32, font: Font, size: f32, text: &str) {
        self.current().push(Mark::Text {
            x,
            y,
            font,
            size,
            text: strip_accents(text),
        });
    }

    fn line(&mut self, x: f32, font: Font, size: f32, text: &str, advance: f32) {
        self.break_page_below(BOTTOM_MARGIN);
        let y = self.y;
        self.text_at(x, y, font, size, text);
        self.y -= advance;
    }

    fn section(&mut self, heading: &str, body: &str) {
        self.line(40.0, Font::Bold, 11.0, heading, 15.0);
        for row in split_text(&strip_accents(body), WRAP_WIDTH) {
            self.line(55.0, Font::Regular, 10.0, &row, 14.0);
        }
        self.y -= 10.0;
    }
}

/// Helvetica averages roughly half an em per glyph.
fn approx_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

/// Lay out the sheet. `attachments` are the stored upload names that exist
/// on disk and will be listed on the sheet.
pub fn compose(
    request: &DischargeSheetRequest,
    doctor: &DoctorPublic,
    hospital: &HospitalConfig,
    attachments: &[String],
) -> DischargeSheet {
    let top = PAGE_HEIGHT - 40.0;
    let mut layout = Layout::new(PAGE_HEIGHT - 150.0);

    // Header
    layout.text_at(130.0, top, Font::Bold, 16.0, &hospital.name);
    layout.text_at(130.0, top - 20.0, Font::Regular, 10.0, &hospital.address);
    let title = strip_accents(TITLE);
    let title_x = (PAGE_WIDTH - approx_width(&title, 14.0)) / 2.0;
    layout.text_at(title_x, top - 70.0, Font::Bold, 14.0, &title);
    layout.current().push(Mark::Rule {
        from: (40.0, top - 85.0),
        to: (PAGE_WIDTH - 40.0, top - 85.0),
        width: 1.2,
    });

    // Patient
    let name = if request.patient_name.is_empty() {
        "-"
    } else {
        request.patient_name.as_str()
    };
    layout.line(40.0, Font::Regular, 11.0, &format!("Pacient: {name}"), 15.0);
    if let Some(cnp) = request.cnp.as_deref().filter(|c| !c.is_empty()) {
        layout.line(40.0, Font::Regular, 11.0, &format!("CNP: {cnp}"), 15.0);
    }
    let sex = request.sex.as_deref().filter(|s| !s.is_empty());
    if request.age.is_some() || sex.is_some() {
        let age = request.age.map_or_else(|| "-".to_string(), |a| a.to_string());
        layout.line(
            40.0,
            Font::Regular,
            11.0,
            &format!("Varsta/Sex: {age} / {}", sex.unwrap_or("-")),
            15.0,
        );
    }
    if let Some(level) = request.triage_level.filter(|l| *l != 0) {
        layout.line(40.0, Font::Regular, 11.0, &format!("Nivel triaj: {level}"), 25.0);
    }

    layout.section("Diagnostic:", &request.diagnosis);
    layout.section("Evolutie:", &request.evolution);
    layout.section("Recomandari:", &request.recommendations);

    if !attachments.is_empty() {
        layout.line(40.0, Font::Bold, 11.0, "Investigatii atasate:", 15.0);
        for name in attachments {
            layout.line(55.0, Font::Regular, 10.0, &format!("- {name}"), 14.0);
        }
    }

    // Signature block sits at a fixed height on the last page.
    layout.break_page_below(SIGNATURE_TOP);
    let base_y = 150.0;
    layout.text_at(70.0, base_y + 50.0, Font::Regular, 10.0, "Medic curant:");
    layout.text_at(70.0, base_y + 35.0, Font::Bold, 11.0, &doctor.full_name);
    layout.text_at(70.0, base_y + 22.0, Font::Regular, 9.0, &doctor.specialty);

    DischargeSheet {
        pages: layout.pages,
    }
}

/// Escape a string for a PDF literal; anything outside printable ASCII
/// becomes `?`.
fn pdf_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn content_stream(marks: &[Mark]) -> String {
    let mut stream = String::new();
    for mark in marks {
        // Writing to a String cannot fail.
        let _ = match mark {
            Mark::Text { x, y, font, size, text } => writeln!(
                stream,
                "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
                font.resource(),
                size,
                x,
                y,
                pdf_literal(text)
            ),
            Mark::Rule { from, to, width } => writeln!(
                stream,
                "{} w {:.2} {:.2} m {:.2} {:.2} l S",
                width, from.0, from.1, to.0, to.1
            ),
        };
    }
    stream
}

/// Serialise the sheet as a PDF 1.4 document.
pub fn render_pdf(sheet: &DischargeSheet) -> Vec<u8> {
    let page_count = sheet.pages.len().max(1);
    let empty: Vec<Mark> = Vec::new();
    let page_marks = |i: usize| sheet.pages.get(i).unwrap_or(&empty);

    // 1 catalog, 2 page tree, 3-4 fonts, then a (page, contents) pair per page.
    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");
    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_vec(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    ];
    for i in 0..page_count {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                6 + 2 * i
            )
            .into_bytes(),
        );
        let content = content_stream(page_marks(i));
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"endstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = writeln!(xref, "{offset:010} 00000 n ");
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    );
    out.extend_from_slice(xref.as_bytes());
    out
}
