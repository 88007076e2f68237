use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_money, format_optional, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

#[derive(Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub expiry_date: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Tabled)]
pub(crate) struct ItemDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Qty")]
    pub(crate) quantity: i64,
    #[tabled(rename = "Unit")]
    pub(crate) unit: String,
    #[tabled(rename = "Price")]
    pub(crate) price: String,
    #[tabled(rename = "Expiry")]
    pub(crate) expiry: String,
}

impl From<&Item> for ItemDisplay {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: truncate_with_ellipsis(&item.name, 40),
            quantity: item.quantity,
            unit: format_optional(item.unit.as_deref()),
            price: format_money(item.price),
            expiry: format_optional(item.expiry_date.as_deref()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemListResponse {
    items: Vec<Item>,
    total_value: f64,
}

/// List items, optionally filtered by a name substring
pub async fn list_items(
    api_client: &ApiClient,
    search: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/api/v1/items");
    if let Some(s) = search {
        request = request.query(&[("search", s)]);
    }

    let response: ItemListResponse =
        ApiClient::handle_response(request.send().await?, None).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&response.items)?),
        _ => {
            if response.items.is_empty() {
                return Ok("No items found.".to_string());
            }
            Ok(format!(
                "{}\nTotal value: {}",
                format_table(&response.items),
                format_money(response.total_value)
            ))
        }
    }
}

pub(crate) fn format_table(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }

    let display: Vec<ItemDisplay> = items.iter().map(|i| i.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create a new item
pub async fn add_item(api_client: &ApiClient, request: CreateItemRequest) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/items")
        .json(&request)
        .send()
        .await?;

    let item: Item = ApiClient::handle_response(response, None).await?;
    Ok(format!("✓ Added item: {} ({})", item.name, item.id))
}

/// Sell one unit of an item
pub async fn sell_item(api_client: &ApiClient, id: i64) -> CliResult<String> {
    let response = api_client
        .post(&format!("/api/v1/items/{}/sell", id))
        .send()
        .await?;

    let item: Item = ApiClient::handle_response(response, Some(id)).await?;
    Ok(format!("✓ Sold one {}: {} left", item.name, item.quantity))
}

/// Delete an item
pub async fn delete_item(api_client: &ApiClient, id: i64) -> CliResult<String> {
    let response = api_client
        .delete(&format!("/api/v1/items/{}", id))
        .send()
        .await?;

    // 204 carries no body, so handle_response does not apply
    if response.status().is_success() {
        Ok(format!("✓ Deleted item: {}", id))
    } else {
        Err(ApiClient::error_from(response, Some(id)).await)
    }
}
