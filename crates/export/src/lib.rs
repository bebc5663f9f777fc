mod csv_list;
mod filename;
mod pdf_plan;

pub use csv_list::render_shopping_list_csv;
pub use filename::export_filename;
pub use pdf_plan::render_plan_pdf;

/// Surfaced verbatim in CSV metadata and in the PDF footer.
pub const ESTIMATE_DISCLAIMER: &str =
    "Estimates are based on category price baselines and may vary from actual store prices.";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("export buffer error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timestamp formatting failed: {0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("plan has no days to export")]
    EmptyPlan,
}
