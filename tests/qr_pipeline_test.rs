//! End-to-end tests for the request pipeline, minus the Telegram transport:
//! validate -> encode -> record
//!
//! Run with: cargo test --test qr_pipeline_test

use std::sync::Arc;

use pretty_assertions::assert_eq;
use qurl::storage::db::{count_history, get_history};
use qurl::storage::{create_pool, get_connection, HistoryStore};
use qurl::telegram::handlers::convert::INVALID_URL_REPLY;
use qurl::{is_valid_url, ColorScheme, HandlerDeps, QrEncoder};
use teloxide::types::ChatId;
use tempfile::TempDir;

#[tokio::test]
async fn test_accepted_request_produces_photo_bytes_and_one_row() {
    let dir = TempDir::new().unwrap();
    let pool = Arc::new(create_pool(dir.path().join("bot.db").to_str().unwrap()).unwrap());
    let store = HistoryStore::new(Arc::clone(&pool));

    let input = "https://example.com/page";

    // Validator accepts.
    assert!(is_valid_url(input));

    // Encoder returns non-empty PNG bytes.
    let png = QrEncoder::default().encode(input).unwrap();
    assert!(!png.is_empty());
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    // The controller would send the photo here, then record.
    store.record(123, None, input.to_string()).await.unwrap();

    let conn = get_connection(&pool).unwrap();
    let entries = get_history(&conn, 123, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].input, input);
}

#[tokio::test]
async fn test_rejected_request_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let pool = Arc::new(create_pool(dir.path().join("bot.db").to_str().unwrap()).unwrap());

    let input = "not a url";

    // Validator rejects, so the controller replies with the fixed error
    // and never reaches the encoder or the store.
    assert!(!is_valid_url(input));
    assert_eq!(INVALID_URL_REPLY, "Invalid URL. Please enter a valid URL.");

    let conn = get_connection(&pool).unwrap();
    assert_eq!(count_history(&conn, 123).unwrap(), 0);
}

#[tokio::test]
async fn test_armed_request_flows_through_conversational_state() {
    let dir = TempDir::new().unwrap();
    let pool = Arc::new(create_pool(dir.path().join("bot.db").to_str().unwrap()).unwrap());
    let store = HistoryStore::new(Arc::clone(&pool));
    let deps = HandlerDeps::new(Arc::clone(&pool), store);

    let chat = ChatId(123);
    let input = "https://example.com/page";

    // /qr_code arms the chat; the color callback may overwrite the palette.
    deps.arm(chat, ColorScheme::BlueWhite);

    // The next message consumes the entry and runs the convert routine.
    let scheme = deps.take(chat).expect("armed chat must yield its palette");
    assert!(is_valid_url(input));
    let png = QrEncoder::with_scheme(scheme).encode(input).unwrap();
    assert!(!png.is_empty());
    deps.history.record(123, None, input.to_string()).await.unwrap();

    // Exactly one row, and the chat is back to idle: a second message
    // without re-issuing /qr_code finds no armed entry.
    let conn = get_connection(&pool).unwrap();
    assert_eq!(count_history(&conn, 123).unwrap(), 1);
    assert_eq!(deps.take(chat), None);
}

#[test]
fn test_both_palettes_encode_the_same_payload() {
    let input = "https://example.com/page";

    let bw = QrEncoder::with_scheme(ColorScheme::BlackWhite).encode(input).unwrap();
    let blue = QrEncoder::with_scheme(ColorScheme::BlueWhite).encode(input).unwrap();

    // Same symbol geometry, different palette.
    let bw_img = image::load_from_memory(&bw).unwrap();
    let blue_img = image::load_from_memory(&blue).unwrap();
    assert_eq!(bw_img.width(), blue_img.width());
    assert_ne!(bw, blue);
}
