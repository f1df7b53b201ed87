//! Document loader tests against a local HTTP origin

use axum::{routing::get, Router};
use rust_xlsxwriter::Workbook;
use vitrina::config::CatalogConfig;
use vitrina::loader::{fetch_document, load_catalog, CatalogSource};
use vitrina::CatalogError;

fn workbook_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("IMOU").unwrap();
    sheet.write_string(0, 0, "MODELO").unwrap();
    sheet.write_string(0, 1, "PESOS").unwrap();
    sheet.write_string(1, 0, "IM-1").unwrap();
    sheet.write_string(1, 1, "1.234.567,89").unwrap();
    workbook.save_to_buffer().unwrap()
}

/// Serve `bytes` at `/catalogo.xlsx` and return the origin URL
async fn serve(bytes: Vec<u8>) -> String {
    let app = Router::new().route(
        "/catalogo.xlsx",
        get(move || {
            let body = bytes.clone();
            async move { body }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config_for(source: String) -> CatalogConfig {
    CatalogConfig {
        source,
        ..CatalogConfig::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HTTP FETCH
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_load_catalog_over_http() {
    let origin = serve(workbook_bytes()).await;
    let catalog = load_catalog(&config_for(format!("{}/catalogo.xlsx", origin)))
        .await
        .unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.products[0].id, "imou-im-1-1");
    assert_eq!(catalog.products[0].price_ars, Some(1234567.89));
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let origin = serve(workbook_bytes()).await;
    let url = format!("{}/otro.xlsx", origin);
    let err = fetch_document(&CatalogSource::parse(&url)).await.unwrap_err();
    match err {
        CatalogError::HttpStatus { url: failed, status } => {
            assert_eq!(status, 404);
            assert_eq!(failed, url);
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_origin_is_fetch_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = load_catalog(&config_for(format!("http://{}/catalogo.xlsx", addr)))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Fetch { .. }));
}
