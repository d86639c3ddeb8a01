//! PDF and Excel export of table rows.

use crate::error::Result;
use crate::models::Employee;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Column headers, in export order.
pub const EXPORT_HEADERS: [&str; 7] = ["Name", "Designation", "DOJ", "DOB", "Salary", "Gender", "State"];

/// One exported record, cells in `EXPORT_HEADERS` order.
pub type ExportRow = [String; 7];

/// Output document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Xlsx,
}

impl ExportFormat {
    /// Fixed file name offered in the save dialog.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "employees.pdf",
            ExportFormat::Xlsx => "employees.xlsx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "Excel",
        }
    }

    fn filter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ExportFormat::Pdf => ("PDF Files", &["pdf"]),
            ExportFormat::Xlsx => ("Excel Files", &["xlsx"]),
        }
    }
}

/// Build export rows from employees, one row each.
pub fn export_rows<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> Vec<ExportRow> {
    employees
        .into_iter()
        .map(|emp| {
            [
                emp.name.clone(),
                emp.designation.clone(),
                emp.date_of_join.to_string(),
                emp.date_of_birth.to_string(),
                emp.salary_display(),
                emp.gender.as_str().to_string(),
                emp.state_name.clone(),
            ]
        })
        .collect()
}

/// Write rows in the requested format.
pub fn export_to_file(format: ExportFormat, rows: &[ExportRow], path: &Path) -> Result<()> {
    match format {
        ExportFormat::Pdf => export_to_pdf(rows, path),
        ExportFormat::Xlsx => export_to_excel(rows, path),
    }
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(format: ExportFormat) -> Option<PathBuf> {
    let (name, extensions) = format.filter();
    rfd::FileDialog::new()
        .set_file_name(format.default_file_name())
        .add_filter(name, extensions)
        .save_file()
}

// A4 landscape, in points.
const PAGE_WIDTH: i64 = 842;
const PAGE_HEIGHT: i64 = 595;
const MARGIN: i64 = 40;
const LINE_HEIGHT: i64 = 14;
const FONT_SIZE: i64 = 9;
const LINES_PER_PAGE: usize = 32;

/// Widest a column may grow, in characters. Longer cells wrap onto extra lines.
const PDF_MAX_WIDTHS: [usize; 7] = [30, 26, 10, 10, 12, 6, 22];

/// Export rows to a PDF table.
pub fn export_to_pdf(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut doc = build_pdf(rows)?;
    doc.save(path)?;
    Ok(())
}

/// Render rows to PDF bytes.
pub fn render_pdf(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut doc = build_pdf(rows)?;
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn build_pdf(rows: &[ExportRow]) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let widths = column_widths(rows);
    let header: Vec<String> = EXPORT_HEADERS.iter().map(|h| h.to_string()).collect();
    let header_line = layout_row(&header, &widths).concat();
    let pages = paginate(rows.iter().map(|row| layout_row(row, &widths)).collect());

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for (idx, lines) in pages.iter().enumerate() {
        let content = page_content(&header_line, lines, idx == 0);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = add_page(&mut doc, pages_id, content_id);
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    Ok(doc)
}

fn add_page(doc: &mut Document, pages_id: ObjectId, content_id: ObjectId) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    })
}

fn page_content(header_line: &str, lines: &[String], with_title: bool) -> Content {
    let mut operations = Vec::new();
    let mut top = PAGE_HEIGHT - MARGIN;

    if with_title {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F2".into(), Object::Integer(14)]),
            Operation::new("Td", vec![MARGIN.into(), top.into()]),
            Operation::new("Tj", vec![Object::string_literal(pdf_text("Employees"))]),
            Operation::new("ET", vec![]),
        ]);
        top -= LINE_HEIGHT * 2;
    }

    operations.extend([
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![LINE_HEIGHT.into()]),
        Operation::new("Td", vec![MARGIN.into(), top.into()]),
        Operation::new("Tf", vec!["F2".into(), FONT_SIZE.into()]),
        Operation::new("Tj", vec![Object::string_literal(pdf_text(header_line))]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
    ]);
    for line in lines {
        operations.push(Operation::new("T*", vec![]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(pdf_text(line))]));
    }
    operations.push(Operation::new("ET", vec![]));

    Content { operations }
}

/// Column widths sized to the longest cell, capped at `PDF_MAX_WIDTHS`.
fn column_widths(rows: &[ExportRow]) -> [usize; 7] {
    let mut widths = EXPORT_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for (width, max) in widths.iter_mut().zip(PDF_MAX_WIDTHS) {
        *width = (*width).min(max);
    }
    widths
}

/// Lay out one record as one or more text lines; cells wider than their column wrap.
fn layout_row(cells: &[String], widths: &[usize; 7]) -> Vec<String> {
    let wrapped: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| wrap_cell(cell, width))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

    (0..height)
        .map(|line| {
            wrapped
                .iter()
                .zip(widths)
                .map(|(parts, &width)| {
                    let part = parts.get(line).map(String::as_str).unwrap_or("");
                    format!("{part:<width$}")
                })
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Word-wrap a cell to `width` characters. Words longer than a line are split.
fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }

        let used = current.chars().count();
        if used > 0 && used + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Group laid-out records into pages without splitting a record across pages.
/// An empty export still gets one page with the header row.
fn paginate(records: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut pages = vec![Vec::new()];
    for record in records {
        let page_len = pages.last().map(Vec::len).unwrap_or(0);
        if page_len > 0 && page_len + record.len() > LINES_PER_PAGE {
            pages.push(Vec::new());
        }
        if let Some(page) = pages.last_mut() {
            page.extend(record);
        }
    }
    pages
}

/// Encode text for a WinAnsiEncoding font. Unmappable characters become `?`.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x00..=0x7F | 0xA0..=0xFF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}

/// Export rows to an Excel file.
pub fn export_to_excel(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Employees")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 30)?; // Name
    worksheet.set_column_width(1, 22)?; // Designation
    worksheet.set_column_width(2, 12)?; // DOJ
    worksheet.set_column_width(3, 12)?; // DOB
    worksheet.set_column_width(4, 12)?; // Salary
    worksheet.set_column_width(5, 10)?; // Gender
    worksheet.set_column_width(6, 20)?; // State

    // Data rows
    for (idx, row) in rows.iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            // Salary goes in as a number so sums work.
            if col == 4
                && let Ok(amount) = cell.parse::<f64>()
            {
                worksheet.write_number(excel_row, col as u16, amount)?;
            } else {
                worksheet.write_string(excel_row, col as u16, cell)?;
            }
        }
    }

    // Autofilter
    if !rows.is_empty() {
        let last_row = rows.len() as u32;
        worksheet.autofilter(0, 0, last_row, 6)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
