//! Conversion from [`Row`]s into the request structures of the Sheets API.

use std::collections::{BTreeMap, HashSet};

use google_sheets4::api::{
    AddSheetRequest, AppendCellsRequest, AutoResizeDimensionsRequest, CellData, CellFormat,
    Color as ApiColor, DimensionRange, ExtendedValue, GridData, GridProperties, Request, RowData,
    Sheet, SheetProperties, Spreadsheet, TextFormat,
};

use crate::row::{Cell, Color, Row, SheetData};

/// Sheet title -> converted rows. Only titles that had rows are present.
pub type SheetRowData = BTreeMap<String, Vec<RowData>>;

pub(crate) const COLUMNS: &str = "COLUMNS";

impl From<Color> for ApiColor {
    fn from(color: Color) -> Self {
        ApiColor {
            red: Some(f32::from(color.red) / 255.0),
            green: Some(f32::from(color.green) / 255.0),
            blue: Some(f32::from(color.blue) / 255.0),
            ..Default::default()
        }
    }
}

/// Builds the API cell for `cell`, formatted with the row's bold flag and
/// background color. Hyperlinked cells are written as a `HYPERLINK` formula.
pub fn cell_data(row: &Row, cell: &Cell) -> CellData {
    let format = CellFormat {
        text_format: Some(TextFormat {
            bold: Some(row.bold_text),
            ..Default::default()
        }),
        background_color: row.color.map(ApiColor::from),
        ..Default::default()
    };

    let value = match cell.hyperlink_formula() {
        Some(formula) => ExtendedValue {
            formula_value: Some(formula),
            ..Default::default()
        },
        None => ExtendedValue {
            string_value: Some(cell.text.clone()),
            ..Default::default()
        },
    };

    CellData {
        user_entered_format: Some(format),
        user_entered_value: Some(value),
        ..Default::default()
    }
}

pub fn row_data(rows: &[Row]) -> Vec<RowData> {
    rows.iter()
        .map(|row| RowData {
            values: Some(row.cells.iter().map(|cell| cell_data(row, cell)).collect()),
        })
        .collect()
}

/// Converts every non-empty sheet in `data`. Titles without rows are skipped.
pub fn sheet_row_data(data: &SheetData) -> SheetRowData {
    data.iter()
        .filter(|(_, rows)| !rows.is_empty())
        .map(|(title, rows)| (title.clone(), row_data(rows)))
        .collect()
}

// The first row is treated as a header and stays visible while scrolling.
fn sheet_properties(title: &str) -> SheetProperties {
    SheetProperties {
        title: Some(title.to_string()),
        grid_properties: Some(GridProperties {
            frozen_row_count: Some(1),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Sheets carrying their data, for creating a spreadsheet in one call.
pub fn new_sheets(row_data: &SheetRowData) -> Vec<Sheet> {
    row_data
        .iter()
        .map(|(title, rows)| Sheet {
            properties: Some(sheet_properties(title)),
            data: Some(vec![GridData {
                row_data: Some(rows.clone()),
                ..Default::default()
            }]),
            ..Default::default()
        })
        .collect()
}

pub fn add_sheet_requests<'a, I>(titles: I) -> Vec<Request>
where
    I: IntoIterator<Item = &'a str>,
{
    titles
        .into_iter()
        .map(|title| Request {
            add_sheet: Some(AddSheetRequest {
                properties: Some(sheet_properties(title)),
            }),
            ..Default::default()
        })
        .collect()
}

/// One `AppendCells` per sheet of `spreadsheet` that has rows in `row_data`.
pub fn append_cells_requests(spreadsheet: &Spreadsheet, row_data: &SheetRowData) -> Vec<Request> {
    sheet_properties_of(spreadsheet)
        .filter_map(|props| {
            let rows = row_data.get(props.title.as_deref()?)?;
            Some(Request {
                append_cells: Some(AppendCellsRequest {
                    sheet_id: props.sheet_id,
                    rows: Some(rows.clone()),
                    fields: "*".parse().ok(),
                }),
                ..Default::default()
            })
        })
        .collect()
}

pub fn auto_resize_requests(spreadsheet: &Spreadsheet) -> Vec<Request> {
    sheet_properties_of(spreadsheet)
        .map(|props| Request {
            auto_resize_dimensions: Some(AutoResizeDimensionsRequest {
                dimensions: Some(DimensionRange {
                    dimension: Some(COLUMNS.to_string()),
                    sheet_id: props.sheet_id,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}

/// Titles in `row_data` without a sheet in `metadata`. Every title is missing
/// when no metadata is known.
pub fn missing_titles<'a>(
    metadata: Option<&Spreadsheet>,
    row_data: &'a SheetRowData,
) -> Vec<&'a str> {
    let known: HashSet<&str> = metadata.into_iter().flat_map(sheet_titles).collect();
    row_data
        .keys()
        .map(String::as_str)
        .filter(|title| !known.contains(title))
        .collect()
}

/// Titles of the sheets already present in `spreadsheet`.
pub fn sheet_titles(spreadsheet: &Spreadsheet) -> impl Iterator<Item = &str> {
    sheet_properties_of(spreadsheet).filter_map(|props| props.title.as_deref())
}

fn sheet_properties_of(spreadsheet: &Spreadsheet) -> impl Iterator<Item = &SheetProperties> {
    spreadsheet
        .sheets
        .iter()
        .flatten()
        .filter_map(|sheet| sheet.properties.as_ref())
}
