//! Export renderers for the sales tracker.
//!
//! Three independent serializers consume an assembled [`ReportData`] and
//! produce a self-contained artifact: a delimited-text document, a structured
//! JSON document, and a printable HTML document. The service also orchestrates
//! report assembly for the UI's export requests and can write the csv/json
//! artifacts straight to disk; the printable document is always handed back
//! as content for the UI to open in a window.

use anyhow::{Context, Result};
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use shared::{
    ExportDataRequest, ExportDataResponse, ExportFormat, ExportToPathRequest,
    ExportToPathResponse, PrintableReportRequest, PrintableReportResponse,
};

use crate::domain::commands::reports::GenerateReportCommand;
use crate::domain::models::report::ReportData;
use crate::domain::report_service::ReportService;
use crate::storage::traits::Connection;

/// Embedded styling for the printable report document.
const REPORT_STYLES: &str = r#"body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
.header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #3b82f6; padding-bottom: 20px; }
.header h1 { color: #3b82f6; margin: 0; }
.header p { margin: 5px 0; color: #666; }
.section { margin: 30px 0; }
.section h2 { color: #3b82f6; border-bottom: 1px solid #e5e7eb; padding-bottom: 10px; }
.summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 20px 0; }
.summary-card { border: 1px solid #e5e7eb; padding: 15px; border-radius: 8px; }
.summary-card h3 { margin: 0 0 10px 0; color: #374151; font-size: 14px; }
.summary-card .value { font-size: 24px; font-weight: bold; color: #3b82f6; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th, td { border: 1px solid #e5e7eb; padding: 8px; text-align: left; }
th { background-color: #f9fafb; font-weight: bold; }
.text-right { text-align: right; }
.text-green { color: #10b981; }
button { background: #3b82f6; color: white; border: none; padding: 10px 20px; border-radius: 5px; cursor: pointer; }
button.close { background: #6b7280; margin-left: 10px; }
@media print {
  body { margin: 0; }
  .no-print { display: none; }
}"#;

/// Escape a value for a quoted CSV cell.
fn csv_escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Escape a value for HTML text content.
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Export service that renders report documents and writes export files.
#[derive(Clone)]
pub struct ExportService {
    // No internal state needed for now
}

impl ExportService {
    /// Create a new ExportService instance.
    pub fn new() -> Self {
        Self {}
    }

    /// Assemble a report for the requested window and render it in the
    /// requested file format.
    pub fn export_report_data<C: Connection>(
        &self,
        request: ExportDataRequest,
        report_service: &ReportService<C>,
    ) -> Result<ExportDataResponse> {
        info!(
            "📄 EXPORT: Rendering {:?} report for {} ({} to {})",
            request.format, request.business_name, request.start_date, request.end_date
        );

        let report = report_service.generate_report(GenerateReportCommand {
            business_name: request.business_name,
            start_date: request.start_date,
            end_date: request.end_date,
            report_date: None,
        })?;

        let content = match request.format {
            ExportFormat::Csv => self.render_csv(&report),
            ExportFormat::Json => self.render_json(&report)?,
        };
        let filename = format!(
            "sales-report-{}.{}",
            report.report_date,
            request.format.extension()
        );

        info!(
            "✅ EXPORT: Rendered {} ({} bytes, {} sales)",
            filename,
            content.len(),
            report.sales_data.len()
        );

        Ok(ExportDataResponse {
            content,
            filename,
            sale_count: report.sales_data.len(),
            business_name: report.business_name,
        })
    }

    /// Assemble a report and render the printable document for the UI to
    /// open in a new window.
    pub fn printable_report<C: Connection>(
        &self,
        request: PrintableReportRequest,
        report_service: &ReportService<C>,
    ) -> Result<PrintableReportResponse> {
        info!(
            "📄 EXPORT: Rendering printable report for {} ({} to {})",
            request.business_name, request.start_date, request.end_date
        );

        let report = report_service.generate_report(GenerateReportCommand {
            business_name: request.business_name,
            start_date: request.start_date,
            end_date: request.end_date,
            report_date: None,
        })?;

        Ok(PrintableReportResponse {
            html: self.render_html(&report),
            business_name: report.business_name,
        })
    }

    /// Render a report to disk at the requested location, falling back to
    /// the user's Documents directory and then their home directory.
    ///
    /// I/O problems are reported through the response's `success`/`message`
    /// fields rather than as errors.
    pub fn export_to_path<C: Connection>(
        &self,
        request: ExportToPathRequest,
        report_service: &ReportService<C>,
    ) -> Result<ExportToPathResponse> {
        info!("📁 EXPORT: Exporting to path - custom_path: {:?}", request.custom_path);

        let export_response = self.export_report_data(
            ExportDataRequest {
                format: request.format,
                business_name: request.business_name,
                start_date: request.start_date,
                end_date: request.end_date,
            },
            report_service,
        )?;

        let export_dir = match request.custom_path {
            Some(ref custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(self.sanitize_path(custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("❌ EXPORT: Could not determine default export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        sale_count: 0,
                        business_name: String::new(),
                    });
                }
            },
        };

        let file_path = export_dir.join(&export_response.filename);

        if let Some(parent_dir) = file_path.parent() {
            if let Err(e) = fs::create_dir_all(parent_dir) {
                error!("❌ EXPORT: Failed to create export directory {:?}: {}", parent_dir, e);
                return Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to create export directory: {}", e),
                    file_path: parent_dir.to_string_lossy().to_string(),
                    sale_count: 0,
                    business_name: String::new(),
                });
            }
        }

        match fs::write(&file_path, &export_response.content) {
            Ok(_) => {
                let file_path_str = file_path.to_string_lossy().to_string();
                info!(
                    "✅ EXPORT: Exported {} sales for {} to: {}",
                    export_response.sale_count, export_response.business_name, file_path_str
                );

                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path_str),
                    file_path: file_path_str,
                    sale_count: export_response.sale_count,
                    business_name: export_response.business_name,
                })
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write export file to {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    sale_count: 0,
                    business_name: String::new(),
                })
            }
        }
    }

    /// Render the delimited-text report document.
    ///
    /// Five sections in fixed order — header block, SUMMARY, DAILY
    /// BREAKDOWN, PRODUCT PERFORMANCE, SALES TRANSACTIONS — separated by
    /// blank lines, each table preceded by its column-header row. Dollar
    /// amounts carry a literal `$` prefix and percentages a `%` suffix.
    pub fn render_csv(&self, report: &ReportData) -> String {
        let mut content = String::new();

        content.push_str(&format!("Business Report - {}\n", report.business_name));
        content.push_str(&format!("Report Date: {}\n", report.report_date));
        content.push_str(&format!("Date Range: {}\n", report.date_range));
        content.push('\n');

        content.push_str("SUMMARY\n");
        content.push_str(&format!("Total Revenue,${:.2}\n", report.summary.total_revenue));
        content.push_str(&format!("Total Profit,${:.2}\n", report.summary.total_profit));
        content.push_str(&format!("Total Sales,{}\n", report.summary.total_sales));
        content.push_str(&format!("Total Items Sold,{}\n", report.summary.total_items_sold));
        content.push_str(&format!("Profit Margin,{:.2}%\n", report.summary.profit_margin));
        content.push('\n');

        content.push_str("DAILY BREAKDOWN\n");
        content.push_str("Date,Sales Count,Revenue,Profit,Items Sold\n");
        for day in &report.daily_breakdown {
            content.push_str(&format!(
                "{},{},${:.2},${:.2},{}\n",
                day.date, day.sales, day.revenue, day.profit, day.items_sold
            ));
        }
        content.push('\n');

        content.push_str("PRODUCT PERFORMANCE\n");
        content.push_str("Product,Category,Units Sold,Revenue,Profit,Profit Margin\n");
        for product in &report.product_performance {
            content.push_str(&format!(
                "\"{}\",\"{}\",{},${:.2},${:.2},{:.2}%\n",
                csv_escape(&product.name),
                csv_escape(&product.category),
                product.sold,
                product.revenue,
                product.profit,
                product.profit_margin
            ));
        }
        content.push('\n');

        content.push_str("SALES TRANSACTIONS\n");
        content.push_str("Date,Product,Quantity,Unit Price,Total Amount\n");
        for sale in &report.sales_data {
            content.push_str(&format!(
                "{},\"{}\",{},${:.2},${:.2}\n",
                sale.date,
                csv_escape(&sale.item_name),
                sale.quantity_sold,
                sale.unit_price,
                sale.total_amount
            ));
        }

        content
    }

    /// Render the report verbatim as a structured JSON document.
    ///
    /// The output re-parses to a value equal to the input report.
    pub fn render_json(&self, report: &ReportData) -> Result<String> {
        serde_json::to_string_pretty(report).context("Failed to serialize report")
    }

    /// Render the printable report document: a self-contained HTML page with
    /// embedded styling and no external resources.
    ///
    /// Sections in order: header, Executive Summary (five metric cards), Top
    /// Performing Products (first ten entries, existing sort order), Daily
    /// Performance (only days with at least one sale), and the print/close
    /// controls as the final block.
    pub fn render_html(&self, report: &ReportData) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str(&format!(
            "<title>Sales Report - {}</title>\n",
            html_escape(&report.business_name)
        ));
        html.push_str("<style>\n");
        html.push_str(REPORT_STYLES);
        html.push_str("\n</style>\n</head>\n<body>\n");

        html.push_str("<div class=\"header\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.business_name)));
        html.push_str("<p>Sales &amp; Revenue Report</p>\n");
        html.push_str(&format!("<p>Report Date: {}</p>\n", report.report_date));
        html.push_str(&format!("<p>Period: {}</p>\n", html_escape(&report.date_range)));
        html.push_str("</div>\n");

        html.push_str("<div class=\"section\">\n<h2>Executive Summary</h2>\n");
        html.push_str("<div class=\"summary-grid\">\n");
        html.push_str(&format!(
            "<div class=\"summary-card\"><h3>Total Revenue</h3><div class=\"value\">${:.2}</div></div>\n",
            report.summary.total_revenue
        ));
        html.push_str(&format!(
            "<div class=\"summary-card\"><h3>Total Profit</h3><div class=\"value text-green\">${:.2}</div></div>\n",
            report.summary.total_profit
        ));
        html.push_str(&format!(
            "<div class=\"summary-card\"><h3>Total Sales</h3><div class=\"value\">{}</div></div>\n",
            report.summary.total_sales
        ));
        html.push_str(&format!(
            "<div class=\"summary-card\"><h3>Items Sold</h3><div class=\"value\">{}</div></div>\n",
            report.summary.total_items_sold
        ));
        html.push_str(&format!(
            "<div class=\"summary-card\"><h3>Profit Margin</h3><div class=\"value\">{:.2}%</div></div>\n",
            report.summary.profit_margin
        ));
        html.push_str("</div>\n</div>\n");

        html.push_str("<div class=\"section\">\n<h2>Top Performing Products</h2>\n<table>\n");
        html.push_str("<thead><tr><th>Product</th><th>Category</th><th class=\"text-right\">Units Sold</th><th class=\"text-right\">Revenue</th><th class=\"text-right\">Profit</th><th class=\"text-right\">Margin</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for product in report.product_performance.iter().take(10) {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"text-right\">{}</td><td class=\"text-right\">${:.2}</td><td class=\"text-right text-green\">${:.2}</td><td class=\"text-right\">{:.1}%</td></tr>\n",
                html_escape(&product.name),
                html_escape(&product.category),
                product.sold,
                product.revenue,
                product.profit,
                product.profit_margin
            ));
        }
        html.push_str("</tbody>\n</table>\n</div>\n");

        html.push_str("<div class=\"section\">\n<h2>Daily Performance</h2>\n<table>\n");
        html.push_str("<thead><tr><th>Date</th><th class=\"text-right\">Sales</th><th class=\"text-right\">Revenue</th><th class=\"text-right\">Profit</th><th class=\"text-right\">Items Sold</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for day in report.daily_breakdown.iter().filter(|day| day.sales > 0) {
            html.push_str(&format!(
                "<tr><td>{}</td><td class=\"text-right\">{}</td><td class=\"text-right\">${:.2}</td><td class=\"text-right text-green\">${:.2}</td><td class=\"text-right\">{}</td></tr>\n",
                day.date, day.sales, day.revenue, day.profit, day.items_sold
            ));
        }
        html.push_str("</tbody>\n</table>\n</div>\n");

        html.push_str("<div class=\"no-print\" style=\"text-align: center; margin: 30px 0;\">\n");
        html.push_str("<button onclick=\"window.print()\">Print Report</button>\n");
        html.push_str("<button class=\"close\" onclick=\"window.close()\">Close</button>\n");
        html.push_str("</div>\n</body>\n</html>\n");

        html
    }

    /// Basic path sanitization to handle common user input issues.
    fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        // Remove surrounding quotes (single or double)
        if (cleaned.starts_with('"') && cleaned.ends_with('"') && cleaned.len() >= 2)
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'') && cleaned.len() >= 2)
        {
            cleaned = cleaned[1..cleaned.len() - 1].to_string();
        }

        cleaned = cleaned.trim().to_string();

        // Handle escaped spaces (common on some systems)
        cleaned = cleaned.replace("\\ ", " ");

        // Remove any trailing slashes/backslashes
        while cleaned.ends_with('/') || cleaned.ends_with('\\') {
            cleaned.pop();
        }

        // Handle tilde expansion for home directory
        if cleaned.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                if cleaned == "~" {
                    cleaned = home.to_string_lossy().to_string();
                } else if cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
                    cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
                }
            }
        }

        cleaned
    }

    /// Create an export service together with the report service it renders
    /// from, for UI shells that want a single entry point for exports.
    pub fn with_report_service<C: Connection>(connection: Arc<C>) -> (Self, ReportService<C>) {
        (Self::new(), ReportService::new(connection))
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
