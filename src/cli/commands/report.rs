use crate::cli::api_client::ApiClient;
use crate::cli::commands::item::{Item, format_table};
use crate::cli::error::CliResult;
use crate::cli::utils::format_money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub total_value: f64,
    pub low_stock: Vec<Item>,
    pub expired: Vec<Item>,
    pub expiring_soon: Vec<Item>,
}

/// Fetch the stock report
pub async fn show_report(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let response = api_client.get("/api/v1/report").send().await?;
    let report: Report = ApiClient::handle_response(response, None).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&report)?),
        _ => Ok(format_report(&report)),
    }
}

pub(crate) fn format_report(report: &Report) -> String {
    let sections = [
        ("Low stock", &report.low_stock),
        ("Expired or expiring today", &report.expired),
        ("Expiring within 7 days", &report.expiring_soon),
    ];

    let mut out = String::new();
    for (title, items) in sections {
        out.push_str(title);
        out.push('\n');
        out.push_str(&format_table(items));
        out.push_str("\n\n");
    }
    out.push_str(&format!("Total value: {}", format_money(report.total_value)));
    out
}
