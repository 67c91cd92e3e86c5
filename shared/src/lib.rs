use serde::{Deserialize, Serialize};

/// Placement of a currency symbol relative to the formatted amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CurrencyPosition {
    Before,
    After,
}

/// A display currency used by the UI layer when presenting monetary values.
///
/// The tracker core itself is currency-agnostic: every stored and computed
/// amount is a raw number, and symbol placement happens strictly at
/// presentation time via [`Currency::format`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
    pub position: CurrencyPosition,
}

impl Currency {
    fn new(code: &str, symbol: &str, name: &str, position: CurrencyPosition) -> Self {
        Self {
            code: code.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            position,
        }
    }

    /// All currencies the tracker offers for selection.
    pub fn supported() -> Vec<Currency> {
        vec![
            Currency::new("USD", "$", "US Dollar", CurrencyPosition::Before),
            Currency::new("NGN", "₦", "Nigerian Naira", CurrencyPosition::Before),
            Currency::new("EUR", "€", "Euro", CurrencyPosition::Before),
            Currency::new("GBP", "£", "British Pound", CurrencyPosition::Before),
            Currency::new("JPY", "¥", "Japanese Yen", CurrencyPosition::Before),
            Currency::new("CAD", "C$", "Canadian Dollar", CurrencyPosition::Before),
            Currency::new("AUD", "A$", "Australian Dollar", CurrencyPosition::Before),
            Currency::new("INR", "₹", "Indian Rupee", CurrencyPosition::Before),
            Currency::new("ZAR", "R", "South African Rand", CurrencyPosition::Before),
            Currency::new("KES", "KSh", "Kenyan Shilling", CurrencyPosition::Before),
        ]
    }

    /// Look up a supported currency by its code.
    pub fn find(code: &str) -> Option<Currency> {
        Currency::supported().into_iter().find(|c| c.code == code)
    }

    /// Format an amount with this currency's symbol in its configured
    /// position, rounded to two decimal places.
    pub fn format(&self, amount: f64) -> String {
        match self.position {
            CurrencyPosition::Before => format!("{}{:.2}", self.symbol, amount),
            CurrencyPosition::After => format!("{:.2}{}", amount, self.symbol),
        }
    }

    /// Decorate an input label with the currency symbol, e.g. "Cost Price ($)".
    pub fn input_label(&self, label: &str) -> String {
        format!("{} ({})", label, self.symbol)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::new("USD", "$", "US Dollar", CurrencyPosition::Before)
    }
}

/// File format for a downloadable report artifact.
///
/// The printable report is not listed here: it is handed to the UI as a
/// document to open in a window, never written as a file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Request for generating a report artifact in memory.
///
/// Dates are calendar days in `YYYY-MM-DD` form, already parsed from raw
/// form input by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataRequest {
    pub format: ExportFormat,
    pub business_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Response containing a rendered report artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub content: String,
    pub filename: String,
    pub sale_count: usize,
    pub business_name: String,
}

/// Request for exporting a report artifact directly to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    pub format: ExportFormat,
    pub business_name: String,
    pub start_date: String,
    pub end_date: String,
    /// Target directory; the default export location is used when absent.
    pub custom_path: Option<String>,
}

/// Response after exporting to disk. Write failures are reported through
/// `success`/`message` rather than as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub sale_count: usize,
    pub business_name: String,
}

/// Request for the printable report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableReportRequest {
    pub business_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Response carrying the self-contained printable document. The UI opens it
/// in a new window; the core never writes it to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableReportResponse {
    pub html: String,
    pub business_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_symbol_before() {
        let usd = Currency::default();
        assert_eq!(usd.format(1234.5), "$1234.50");
        assert_eq!(usd.format(0.0), "$0.00");
    }

    #[test]
    fn test_format_symbol_after() {
        let krona = Currency::new("SEK", "kr", "Swedish Krona", CurrencyPosition::After);
        assert_eq!(krona.format(99.999), "100.00kr");
    }

    #[test]
    fn test_find_supported_currency() {
        let ngn = Currency::find("NGN").unwrap();
        assert_eq!(ngn.symbol, "₦");
        assert_eq!(ngn.position, CurrencyPosition::Before);

        assert!(Currency::find("XXX").is_none());
    }

    #[test]
    fn test_supported_codes_are_unique() {
        let currencies = Currency::supported();
        let mut codes: Vec<_> = currencies.iter().map(|c| c.code.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), currencies.len());
    }

    #[test]
    fn test_input_label() {
        let usd = Currency::default();
        assert_eq!(usd.input_label("Selling Price"), "Selling Price ($)");
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }

    #[test]
    fn test_export_request_round_trip() {
        let request = ExportDataRequest {
            format: ExportFormat::Json,
            business_name: "Corner Shop".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
        };

        let serialized = serde_json::to_string(&request).unwrap();
        let parsed: ExportDataRequest = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, request);
    }
}
