use std::path::PathBuf;

use google_sheets4::api::{
    BatchUpdateSpreadsheetRequest, BatchUpdateSpreadsheetResponse, Request,
    Spreadsheet as ApiSpreadsheet, SpreadsheetProperties,
};
use log::{debug, info};
use serde_json::Value;

use crate::auth::{self, Hub, SPREADSHEETS_SCOPE};
use crate::config::Config;
use crate::convert;
use crate::error::{Error, Result};
use crate::export;
use crate::row::SheetData;
use crate::url;

/// A Google Spreadsheet, which can contain multiple sheets, each with
/// structured information contained in cells. A spreadsheet has a unique ID
/// which can be found in its URL, see
/// <https://developers.google.com/sheets/api/guides/concepts>.
pub struct Spreadsheet {
    id: String,
    metadata: Option<ApiSpreadsheet>,
    hub: Hub,
    csv_dir: Option<PathBuf>,
}

impl Spreadsheet {
    /// Opens an existing spreadsheet. Authorizes first, prompting for an
    /// authorization code if no token is cached yet.
    pub async fn open(config: &Config, id: &str) -> Result<Spreadsheet> {
        let hub = auth::hub(config).await?;
        Ok(Spreadsheet::from_hub(hub, id))
    }

    /// Like [`Spreadsheet::open`], taking the spreadsheet's URL instead of its ID.
    pub async fn open_url(config: &Config, url: &str) -> Result<Spreadsheet> {
        let id = url::spreadsheet_id(url)?;
        Spreadsheet::open(config, &id).await
    }

    /// Wraps an already authenticated hub.
    pub fn from_hub(hub: Hub, id: &str) -> Spreadsheet {
        Spreadsheet {
            id: id.to_string(),
            metadata: None,
            hub,
            csv_dir: None,
        }
    }

    /// Creates a new spreadsheet named `title`, with one sheet per non-empty
    /// entry of `data`. An empty `data` creates a blank spreadsheet.
    pub async fn create(config: &Config, title: &str, data: &SheetData) -> Result<Spreadsheet> {
        let hub = auth::hub(config).await?;
        let row_data = convert::sheet_row_data(data);

        let request = ApiSpreadsheet {
            properties: Some(SpreadsheetProperties {
                title: Some(title.to_string()),
                ..Default::default()
            }),
            sheets: if row_data.is_empty() {
                None
            } else {
                Some(convert::new_sheets(&row_data))
            },
            ..Default::default()
        };
        let (_, created) = hub
            .spreadsheets()
            .create(request)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await?;

        let id = created
            .spreadsheet_id
            .clone()
            .ok_or(Error::MissingField("spreadsheetId"))?;
        info!("Created spreadsheet {:?} with id {}", title, id);

        let mut spreadsheet = Spreadsheet::from_hub(hub, &id);
        spreadsheet.metadata = Some(created);
        Ok(spreadsheet)
    }

    /// Also write every appended sheet as `<title>.csv` into `dir`.
    pub fn with_csv_export<P: Into<PathBuf>>(mut self, dir: P) -> Spreadsheet {
        self.csv_dir = Some(dir.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last known server-side state, if it has been fetched or returned by a write.
    pub fn metadata(&self) -> Option<&ApiSpreadsheet> {
        self.metadata.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.spreadsheet_url.as_deref())
    }

    /// Fetches the spreadsheet's properties and sheets.
    pub async fn refresh(&mut self) -> Result<&ApiSpreadsheet> {
        let (_, metadata) = self
            .hub
            .spreadsheets()
            .get(&self.id)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await?;
        let metadata: &ApiSpreadsheet = self.metadata.insert(metadata);
        Ok(metadata)
    }

    /// Reads `range` (A1 notation, e.g. `Class Data!A2:E`) row by row. Trailing
    /// empty cells and rows are not returned by the API.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<Value>>> {
        let (_, values) = self
            .hub
            .spreadsheets()
            .values_get(&self.id, range)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await?;
        Ok(values.values.unwrap_or_default())
    }

    /// Appends `data` to the spreadsheet, one sheet per title.
    ///
    /// Sheets missing from the last known metadata are added in one batch
    /// update, then the rows are appended to each sheet in a second one. Titles
    /// without rows are ignored, and when nothing is left no request is sent.
    /// Returns the updated metadata.
    pub async fn append(&mut self, data: &SheetData) -> Result<Option<&ApiSpreadsheet>> {
        if let Some(dir) = &self.csv_dir {
            export::write_csv(dir, data)?;
        }

        let row_data = convert::sheet_row_data(data);
        if row_data.is_empty() {
            debug!("Nothing to append to {}", self.id);
            return Ok(self.metadata.as_ref());
        }

        let missing = convert::missing_titles(self.metadata.as_ref(), &row_data);

        if !missing.is_empty() {
            info!("Adding sheets {:?} to {}", missing, self.id);
            let response = self
                .batch_update(convert::add_sheet_requests(missing), true)
                .await?;
            self.metadata = Some(updated_spreadsheet(response)?);
        }

        let metadata = self
            .metadata
            .as_ref()
            .ok_or(Error::MissingField("spreadsheet metadata"))?;
        let requests = convert::append_cells_requests(metadata, &row_data);
        debug!("Appending to {} sheet(s) of {}", requests.len(), self.id);

        let response = self.batch_update(requests, true).await?;
        self.metadata = Some(updated_spreadsheet(response)?);
        Ok(self.metadata.as_ref())
    }

    /// Auto-resizes the columns of every sheet to fit their contents.
    pub async fn resize_columns(&mut self) -> Result<()> {
        if self.metadata.is_none() {
            self.refresh().await?;
        }
        let metadata = self
            .metadata
            .as_ref()
            .ok_or(Error::MissingField("spreadsheet metadata"))?;
        let requests = convert::auto_resize_requests(metadata);
        if requests.is_empty() {
            return Ok(());
        }
        debug!("Resizing columns of {} sheet(s) of {}", requests.len(), self.id);
        self.batch_update(requests, false).await?;
        Ok(())
    }

    async fn batch_update(
        &self,
        requests: Vec<Request>,
        include_spreadsheet: bool,
    ) -> Result<BatchUpdateSpreadsheetResponse> {
        let request = BatchUpdateSpreadsheetRequest {
            include_spreadsheet_in_response: Some(include_spreadsheet),
            requests: Some(requests),
            ..Default::default()
        };
        let (_, response) = self
            .hub
            .spreadsheets()
            .batch_update(request, &self.id)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await?;
        Ok(response)
    }
}

fn updated_spreadsheet(response: BatchUpdateSpreadsheetResponse) -> Result<ApiSpreadsheet> {
    response
        .updated_spreadsheet
        .ok_or(Error::MissingField("updatedSpreadsheet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_updated_spreadsheet() {
        let response = BatchUpdateSpreadsheetResponse::default();
        assert!(matches!(
            updated_spreadsheet(response),
            Err(Error::MissingField("updatedSpreadsheet"))
        ));
    }

    #[test]
    fn updated_spreadsheet_from_response() {
        let response: BatchUpdateSpreadsheetResponse = serde_json::from_value(serde_json::json!({
            "spreadsheetId": "abc",
            "updatedSpreadsheet": {
                "spreadsheetId": "abc",
                "sheets": [{"properties": {"sheetId": 3, "title": "Issues"}}]
            }
        }))
        .unwrap();

        let spreadsheet = updated_spreadsheet(response).unwrap();
        assert_eq!(
            convert::sheet_titles(&spreadsheet).collect::<Vec<_>>(),
            vec!["Issues"]
        );
    }
}
