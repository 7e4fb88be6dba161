//! Planning exports for reporting.

use serde::{Deserialize, Serialize};

use crate::{EngineError, PlanningView, ResultEngine, calendar::format_date};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl TryFrom<&str> for ExportFormat {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(EngineError::Export(format!("unknown format: {other}"))),
        }
    }
}

/// One exported planning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub date: String,
    pub task: String,
    pub status: String,
    pub assignees: String,
    pub notes: String,
}

impl From<&PlanningView> for ExportRow {
    fn from(view: &PlanningView) -> Self {
        Self {
            date: format_date(view.planning.date),
            task: view.planning.task.clone(),
            status: view.planning.status.label().to_string(),
            assignees: view
                .assignments
                .iter()
                .map(|a| a.display_name())
                .collect::<Vec<_>>()
                .join("; "),
            notes: view.planning.notes.clone().unwrap_or_default(),
        }
    }
}

/// Renders plannings, most recent date first.
pub fn render(plannings: &[PlanningView], format: ExportFormat) -> ResultEngine<String> {
    let mut rows: Vec<ExportRow> = plannings.iter().map(ExportRow::from).collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            if rows.is_empty() {
                writer.write_record(["date", "task", "status", "assignees", "notes"])?;
            }
            for row in &rows {
                writer.serialize(row)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|err| EngineError::Render(err.to_string()))?;
            String::from_utf8(bytes).map_err(|err| EngineError::Render(err.to_string()))
        }
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}
