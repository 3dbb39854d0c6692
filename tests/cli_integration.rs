//! Integration tests for the `stock` CLI.
//!
//! Each test runs `stock` as a subprocess in a temp directory, against the
//! built-in demo catalog unless it is testing configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `stock` binary.
fn stock_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("stock");
    path
}

/// Run `stock` with the given args in `dir`, return (stdout, stderr, success).
fn run_stock(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(stock_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run stock");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `stock` expecting success, return stdout.
fn run_stock_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_stock(dir, args);
    if !success {
        panic!(
            "stock {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[test]
fn test_suppliers_filtered() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(tmp.path(), &["--demo", "suppliers", "tech"]);
    assert!(out.contains("Tashkent Tech"));
    assert!(!out.contains("Acme Trading"));
}

#[test]
fn test_suppliers_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(tmp.path(), &["--demo", "suppliers", "ac", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Acme Trading"));
    assert!(names.iter().all(|n| n.to_lowercase().contains("ac")));
}

#[test]
fn test_products_without_query_lists_all() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(tmp.path(), &["--demo", "products"]);
    assert!(out.contains("Receipt printer"));
    assert!(out.contains("Card reader"));
}

#[test]
fn test_products_no_match_prints_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(tmp.path(), &["--demo", "products", "zzz"]);
    assert_eq!(out, "");
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[test]
fn test_add_reports_every_missing_field() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, success) = run_stock(tmp.path(), &["--demo", "add", "--quantity", "x"]);
    assert!(!success);
    assert_eq!(stdout, "");
    assert!(stderr.contains("Product: Product name is required."));
    assert!(stderr.contains("Quantity: Quantity must be a whole number."));
    assert!(stderr.contains("Purchase price: Enter the purchase price."));
    assert!(stderr.contains("Currency: Choose a currency."));
    assert!(stderr.contains("Supplier: Choose a supplier."));
    assert!(stderr.contains("error: 5 field(s) need attention"));
}

#[test]
fn test_add_errors_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (stdout, _, success) = run_stock(
        tmp.path(),
        &["--demo", "add", "--name", "Cash drawer", "--json"],
    );
    assert!(!success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["errors"]["supplier"], "Choose a supplier.");
    assert!(parsed["errors"].get("name").is_none());
}

#[test]
fn test_add_success() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(
        tmp.path(),
        &[
            "--demo",
            "add",
            "--name",
            "Card reader",
            "--price",
            "18",
            "--currency",
            "uzs",
            "--supplier",
            "Bukhara Electronics",
            "--quantity",
            "4",
        ],
    );
    assert_eq!(
        out,
        "added 4 x Card reader from Bukhara Electronics at 18.00 UZS\n"
    );
}

#[test]
fn test_add_unknown_supplier_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_stock(
        tmp.path(),
        &[
            "--demo",
            "add",
            "--name",
            "Card reader",
            "--price",
            "18",
            "--currency",
            "USD",
            "--supplier",
            "Nobody Ltd",
        ],
    );
    assert!(!success);
    assert!(stderr.contains("unknown supplier 'Nobody Ltd'"));
}

#[test]
fn test_add_rejects_bad_currency() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, _, success) = run_stock(tmp.path(), &["--demo", "add", "--currency", "EUR"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[test]
fn test_edit_overlays_flags_on_stored_item() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(
        tmp.path(),
        &["--demo", "edit", "1", "--status", "sold", "--price", "50"],
    );
    assert_eq!(
        out,
        "updated #1: Barcode scanner from Tashkent Tech at 50.00 USD [SOLD]\n"
    );
}

#[test]
fn test_edit_json_keeps_unchanged_values() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(
        tmp.path(),
        &["--demo", "edit", "2", "--status", "REFUND", "--json"],
    );
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], 2);
    assert_eq!(parsed["updated"]["status_key"], "REFUND");
    assert_eq!(parsed["updated"]["name"], "Thermal paper roll");
    assert_eq!(parsed["updated"]["currency_key"], "UZS");
    assert_eq!(parsed["updated"]["supplier"], "Samarkand Paper");
}

#[test]
fn test_edit_reports_invalid_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, success) = run_stock(
        tmp.path(),
        &["--demo", "edit", "1", "--price", "abc", "--supplier", ""],
    );
    assert!(!success);
    assert_eq!(stdout, "");
    assert!(stderr.contains("Purchase price: Price must be a non-negative number."));
    assert!(stderr.contains("Supplier: Choose a supplier."));
    assert!(stderr.contains("error: 2 field(s) need attention"));
}

#[test]
fn test_edit_unknown_item_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_stock(tmp.path(), &["--demo", "edit", "99", "--status", "sold"]);
    assert!(!success);
    assert!(stderr.contains("no warehouse item #99"));
}

#[test]
fn test_edit_rejects_bad_status() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, _, success) = run_stock(tmp.path(), &["--demo", "edit", "1", "--status", "lost"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_defaults() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_stock_ok(tmp.path(), &["config", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["api"]["base_url"], "http://localhost:8080");
    assert_eq!(parsed["autocomplete"]["debounce_ms"], 300);
    assert_eq!(parsed["autocomplete"]["placeholder"], "Select...");
}

#[test]
fn test_config_discovered_from_subdirectory() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("stockroom.toml"),
        "[api]\nbase_url = \"http://backoffice.local\"\n",
    )
    .unwrap();
    let sub = tmp.path().join("a/b");
    fs::create_dir_all(&sub).unwrap();

    let out = run_stock_ok(&sub, &["config"]);
    assert!(out.contains("stockroom.toml"));
    assert!(out.contains("base_url = \"http://backoffice.local\""));
}

#[test]
fn test_explicit_config_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("other.toml");
    fs::write(&path, "[autocomplete]\nmax_visible = 4\n").unwrap();

    let out = run_stock_ok(
        tmp.path(),
        &["--config", path.to_str().unwrap(), "config", "--json"],
    );
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["autocomplete"]["max_visible"], 4);
}

#[test]
fn test_broken_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("stockroom.toml"), "[api\n").unwrap();
    let (_, stderr, success) = run_stock(tmp.path(), &["config"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
}
