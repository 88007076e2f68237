//! CLI errors, one variant per way an inventory request can fail.

use miette::Diagnostic;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Cannot reach the stockroom server at {url}")]
    #[diagnostic(
        code(stockroom::cli::unreachable),
        help(
            "Start it with `stockroom-api`, or point the CLI elsewhere with --api-url or STOCKROOM_API_URL."
        )
    )]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Item {id} does not exist")]
    #[diagnostic(
        code(stockroom::cli::item_not_found),
        help("Run `stockroom list` to see the current item IDs.")
    )]
    ItemNotFound { id: i64 },

    #[error("Item {id} is out of stock")]
    #[diagnostic(
        code(stockroom::cli::out_of_stock),
        help("Nothing was sold. Restock the item from the web UI before selling again.")
    )]
    OutOfStock { id: i64 },

    #[error("Item rejected: {reason}")]
    #[diagnostic(
        code(stockroom::cli::item_rejected),
        help("Quantity must be zero or more, price non-negative, expiry given as YYYY-MM-DD.")
    )]
    ItemRejected { reason: String },

    #[error("Server replied {status}: {message}")]
    #[diagnostic(code(stockroom::cli::server))]
    Server { status: u16, message: String },

    #[error("Unreadable reply from the stockroom server: {message}")]
    #[diagnostic(
        code(stockroom::cli::unreadable_reply),
        help("The server and CLI versions may differ.")
    )]
    UnreadableReply { message: String },
}

impl CliError {
    /// Classify a non-success reply. `item` names the item the request
    /// targeted, so 404 and 409 can say which one.
    pub fn from_reply(status: StatusCode, message: String, item: Option<i64>) -> Self {
        match (status, item) {
            (StatusCode::NOT_FOUND, Some(id)) => CliError::ItemNotFound { id },
            (StatusCode::CONFLICT, Some(id)) => CliError::OutOfStock { id },
            (StatusCode::BAD_REQUEST, _) => CliError::ItemRejected {
                reason: message
                    .strip_prefix("Validation error: ")
                    .map(str::to_string)
                    .unwrap_or(message),
            },
            _ => CliError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            CliError::Unreachable {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                source: e,
            }
        } else {
            CliError::UnreadableReply {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::UnreadableReply {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
