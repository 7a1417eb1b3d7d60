//! Spreadsheet output for converted rows.

use std::{io, path::Path};

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::domain::{AlarmRow, Config};

const HEADER_HEIGHT: f64 = 22.0;
const HEADER_FILL: u32 = 0x33_3F_48;
const HEADER_RULE: u32 = 0x22_28_30;
const BAND_FILL: u32 = 0xF4_F6_F8;
const GRID: u32 = 0xC7_D0_D8;
const FRAME: u32 = 0x99_A4_AD;

/// Writes rows to an `.xlsx` workbook at `path`, replacing any existing file.
///
/// The sheet has a frozen `Tag | Description` header followed by one row per
/// alarm, in the order given. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created, the
/// worksheet name is not valid, or the workbook cannot be written.
pub fn write_workbook(path: &Path, rows: &[AlarmRow], config: &Config) -> Result<(), WorkbookError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut workbook = build_workbook(rows, config)?;
    workbook.save(path)?;

    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Renders rows to an in-memory `.xlsx` file.
///
/// # Errors
///
/// Returns an error if the worksheet name is not valid or the workbook cannot
/// be assembled.
pub fn workbook_bytes(rows: &[AlarmRow], config: &Config) -> Result<Vec<u8>, WorkbookError> {
    let mut workbook = build_workbook(rows, config)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(rows: &[AlarmRow], config: &Config) -> Result<Workbook, WorkbookError> {
    let last_row = u32::try_from(rows.len()).map_err(|_| WorkbookError::TooManyRows(rows.len()))?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(config.worksheet_name())?;

    worksheet.write_string_with_format(0, 0, "Tag", &cell_format(0, 0, last_row))?;
    worksheet.write_string_with_format(0, 1, "Description", &cell_format(0, 1, last_row))?;
    worksheet.set_row_height(0, HEADER_HEIGHT)?;

    for (line, row) in (1..=last_row).zip(rows) {
        worksheet.write_string_with_format(line, 0, row.tag(), &cell_format(line, 0, last_row))?;
        worksheet.write_string_with_format(
            line,
            1,
            row.description(),
            &cell_format(line, 1, last_row),
        )?;
    }

    worksheet.set_column_width(0, config.tag_column_width())?;
    worksheet.set_column_width(1, config.description_column_width())?;
    worksheet.set_freeze_panes(1, 0)?;

    Ok(workbook)
}

/// The format for the cell at `row` and `column` of a sheet whose last used
/// row is `last_row`.
///
/// The used range is framed with a medium border and ruled with thin lines
/// inside. The header has a heavier rule beneath it, and even worksheet
/// rows (2, 4, ...) are banded.
fn cell_format(row: u32, column: u16, last_row: u32) -> Format {
    let mut format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(GRID));

    if row == 0 {
        format = format
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::VerticalCenter)
            .set_border_top(FormatBorder::Medium)
            .set_border_top_color(Color::RGB(FRAME));
        if last_row > 0 {
            format = format
                .set_border_bottom(FormatBorder::Thick)
                .set_border_bottom_color(Color::RGB(HEADER_RULE));
        }
    } else if row % 2 == 1 {
        format = format.set_background_color(Color::RGB(BAND_FILL));
    }

    if row == last_row {
        format = format
            .set_border_bottom(FormatBorder::Medium)
            .set_border_bottom_color(Color::RGB(FRAME));
    }

    if column == 0 {
        format
            .set_border_left(FormatBorder::Medium)
            .set_border_left_color(Color::RGB(FRAME))
    } else {
        format
            .set_border_right(FormatBorder::Medium)
            .set_border_right_color(Color::RGB(FRAME))
    }
}

/// Errors that can occur while writing a workbook.
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    /// The spreadsheet writer rejected the content or could not save.
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),

    /// The output directory could not be created.
    #[error("failed to create output directory: {0}")]
    Io(#[from] io::Error),

    /// More rows than a worksheet can hold.
    #[error("{0} rows do not fit in a single worksheet")]
    TooManyRows(usize),
}
