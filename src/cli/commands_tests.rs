use super::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn fixture(dir: &TempDir) -> CatalogConfig {
    let path = dir.path().join("catalogo.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("CERCO ELECTRICO").unwrap();
    sheet.write_string(0, 0, "MODELO").unwrap();
    sheet.write_string(0, 1, "DESCRIPCION").unwrap();
    sheet.write_string(0, 2, "PESOS").unwrap();
    sheet.write_string(1, 0, "AX100").unwrap();
    sheet.write_string(1, 1, "Sensor").unwrap();
    sheet.write_number(1, 2, 12500.0).unwrap();
    workbook.save(&path).unwrap();

    let mut config = CatalogConfig::default();
    config.source = path.display().to_string();
    config.cart.storage_path = dir.path().join("storage.json");
    config
}

// =========================================================================
// preview Tests
// =========================================================================

#[test]
fn test_preview_short_text_unchanged() {
    assert_eq!(preview("Cámara domo"), "Cámara domo");
}

#[test]
fn test_preview_truncates_long_text() {
    let long = "a".repeat(DESCRIPTION_PREVIEW + 20);
    let short = preview(&long);
    assert!(short.ends_with('…'));
    assert_eq!(short.chars().count(), DESCRIPTION_PREVIEW + 1);
}

// =========================================================================
// parse_sort Tests
// =========================================================================

#[test]
fn test_parse_sort_flags() {
    assert_eq!(parse_sort("price-asc").unwrap(), SortMode::PriceAsc);
    assert_eq!(parse_sort("excel").unwrap(), SortMode::Excel);
    assert!(matches!(parse_sort("cheapest"), Err(CatalogError::Config(_))));
}

// =========================================================================
// Command Tests
// =========================================================================

#[test]
fn test_load_and_list_fixture() {
    let dir = TempDir::new().unwrap();
    let config = fixture(&dir);
    assert!(load(&config, false, true).is_ok());
    assert!(load(&config, true, false).is_ok());
    let query = ViewQuery::new("ax", "", SortMode::Relevance);
    assert!(list(&config, &query, true).is_ok());
}

#[test]
fn test_cart_update_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    let config = fixture(&dir);
    let id = "cerco-electrico-ax100-1";

    cart_update(&config, CartAction::Add, id).unwrap();
    cart_update(&config, CartAction::Increment, id).unwrap();

    let app = CatalogApp::open_blocking(config.clone()).unwrap();
    assert_eq!(app.cart().quantity(id), 2);
    assert!(order(&config, true).is_ok());

    cart_update(&config, CartAction::Remove, id).unwrap();
    let app = CatalogApp::open_blocking(config).unwrap();
    assert!(app.cart().is_empty());
}

#[test]
fn test_cart_add_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let config = fixture(&dir);
    let result = cart_update(&config, CartAction::Add, "missing-1");
    assert!(matches!(result, Err(CatalogError::UnknownProduct(_))));
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = CatalogConfig::default();
    config.source = dir.path().join("nope.xlsx").display().to_string();
    assert!(matches!(
        load(&config, false, false),
        Err(CatalogError::Fetch { .. })
    ));
}

#[test]
fn test_watch_rejects_url_source() {
    let mut config = CatalogConfig::default();
    config.source = "https://example.com/catalogo.xlsx".to_string();
    assert!(matches!(watch(&config), Err(CatalogError::Watch(_))));
}

#[test]
fn test_watch_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut config = CatalogConfig::default();
    config.source = dir.path().join("missing.xlsx").display().to_string();
    assert!(matches!(watch(&config), Err(CatalogError::Watch(_))));
}

#[test]
fn test_is_same_file_by_name() {
    let dir = TempDir::new().unwrap();
    let watched = dir.path().join("catalogo.xlsx");
    assert!(is_same_file(&watched, &watched));
    assert!(!is_same_file(&dir.path().join("other.xlsx"), &watched));
}
