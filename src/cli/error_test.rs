use crate::cli::error::CliError;
use miette::Diagnostic;
use reqwest::StatusCode;

fn help(err: &CliError) -> String {
    err.help().map(|h| h.to_string()).unwrap_or_default()
}

#[test]
fn test_conflict_on_item_is_out_of_stock() {
    let err = CliError::from_reply(StatusCode::CONFLICT, "Item '3' is out of stock".into(), Some(3));
    assert!(matches!(err, CliError::OutOfStock { id: 3 }));
    assert_eq!(err.to_string(), "Item 3 is out of stock");
    assert!(help(&err).contains("Nothing was sold"));
}

#[test]
fn test_not_found_on_item_names_the_id() {
    let err = CliError::from_reply(StatusCode::NOT_FOUND, "Item '8' not found".into(), Some(8));
    assert!(matches!(err, CliError::ItemNotFound { id: 8 }));
    assert!(help(&err).contains("stockroom list"));
}

#[test]
fn test_not_found_without_item_stays_generic() {
    let err = CliError::from_reply(StatusCode::NOT_FOUND, "no route".into(), None);
    match err {
        CliError::Server { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no route");
        }
        other => panic!("expected Server, got {:?}", other),
    }
}

#[test]
fn test_bad_request_drops_validation_prefix() {
    let err = CliError::from_reply(
        StatusCode::BAD_REQUEST,
        "Validation error: name cannot be empty".into(),
        None,
    );
    assert_eq!(err.to_string(), "Item rejected: name cannot be empty");
}

#[test]
fn test_server_failure_keeps_status_and_message() {
    let err = CliError::from_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Database error: disk I/O error".into(),
        Some(1),
    );
    assert_eq!(
        err.to_string(),
        "Server replied 500: Database error: disk I/O error"
    );
}

#[test]
fn test_bad_json_is_unreadable_reply() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = CliError::from(json_err);
    assert!(matches!(err, CliError::UnreadableReply { .. }));
}
