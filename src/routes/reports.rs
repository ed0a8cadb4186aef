use axum::{
    extract::State,
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{CompanyRecord, YearRow},
    services::{
        excel::export::XLSX_CONTENT_TYPE,
        file_processor::{self, FileInfo},
        probe::{CollectingReporter, ErrorReporter, FileError, TracingReporter},
        three_year::{self, ChartData},
    },
};
use tower_http::cors::{Any, CorsLayer};

pub const SUMMARY_FILE_NAME: &str = "financial_summary_output.xlsx";
pub const THREE_YEAR_FILE_NAME: &str = "processed_financials.xlsx";

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/reports/summary", post(summarize_reports))
        .route("/reports/three-year", post(three_year_report))
        .layer(cors)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Xlsx,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    files: Vec<FileInfo>,
    #[serde(default)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    columns: Vec<&'static str>,
    rows: Vec<CompanyRecord>,
    errors: Vec<FileError>,
}

#[derive(Debug, Deserialize)]
pub struct ThreeYearRequest {
    file: FileInfo,
    #[serde(default)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct ThreeYearResponse {
    columns: Vec<&'static str>,
    rows: Vec<YearRow>,
    chart: ChartData,
}

fn xlsx_attachment(bytes: Vec<u8>, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
        ],
        bytes,
    )
        .into_response()
}

async fn summarize_reports(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummaryRequest>,
) -> Result<Response, AppError> {
    let start = std::time::Instant::now();
    if request.files.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }
    tracing::info!("Summary requested for {} files", request.files.len());

    let reporter = CollectingReporter::default();
    let inputs = file_processor::fetch_inputs(&request.files, state.config.max_file_size, &reporter).await;

    let extractor = state.extractor();
    let (table, reporter) = tokio::task::spawn_blocking(move || {
        let table = extractor.process_batch(&inputs, &reporter);
        (table, reporter)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Summary task failed: {}", e)))?;

    let errors = reporter.into_errors();
    tracing::info!(
        "Summary finished: {} rows, {} errors, took {:?}",
        table.len(),
        errors.len(),
        start.elapsed()
    );

    match request.format {
        OutputFormat::Json => Ok(Json(SummaryResponse {
            columns: table.columns().to_vec(),
            rows: table.records,
            errors,
        })
        .into_response()),
        OutputFormat::Xlsx => Ok(xlsx_attachment(table.to_xlsx_bytes()?, SUMMARY_FILE_NAME)),
    }
}

async fn three_year_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ThreeYearRequest>,
) -> Result<Response, AppError> {
    let start = std::time::Instant::now();
    let file = request.file;

    let client = reqwest::Client::new();
    let input = file_processor::fetch_input(&client, &file, state.config.max_file_size)
        .await
        .map_err(|e| {
            TracingReporter.report(FileError::new(file.name.clone(), e.to_string()));
            AppError::from(e)
        })?;

    let report = tokio::task::spawn_blocking(move || three_year::process_three_years(&input))
        .await
        .map_err(|e| AppError::Internal(format!("Three-year task failed: {}", e)))?
        .map_err(|e| {
            TracingReporter.report(FileError::new(file.name.clone(), e.to_string()));
            AppError::from(e)
        })?;

    tracing::info!("Three-year report for {} took {:?}", file.name, start.elapsed());

    match request.format {
        OutputFormat::Json => {
            let columns = report.table.columns().to_vec();
            Ok(Json(ThreeYearResponse {
                columns,
                rows: report.table.rows,
                chart: report.chart,
            })
            .into_response())
        }
        OutputFormat::Xlsx => Ok(xlsx_attachment(report.table.to_xlsx_bytes()?, THREE_YEAR_FILE_NAME)),
    }
}
