// Small dev utility: run the bulk import/export engine against a local SQLite file.
//
// Usage:
//   cargo run --bin inventory_io -- import <group_id> <file>
//   cargo run --bin inventory_io -- export <group_id> [out_file]
//   cargo run --bin inventory_io -- bom <group_id> [out_file]
//   cargo run --bin inventory_io -- ensure-asset-ids <group_id>
//   cargo run --bin inventory_io -- ensure-import-refs <group_id>
//
// DB path: HOUSEHOLD_INVENTORY_DB_PATH, falling back to the user data directory.
// Set HOUSEHOLD_INVENTORY_LOG_JSON to emit JSON log lines on stderr.

use anyhow::{bail, Context, Result};
use household_inventory::api::ItemIoApi;
use household_inventory::db::get_default_db_path;
use household_inventory::logging;
use std::path::Path;

fn main() -> Result<()> {
    if std::env::var_os("HOUSEHOLD_INVENTORY_LOG_JSON").is_some() {
        logging::init_json();
    } else {
        logging::init();
    }

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_default();
    let group_id = match args.next() {
        Some(g) if !g.trim().is_empty() => g,
        _ => bail!(
            "inventory_io {}\nusage: inventory_io <import|export|bom|ensure-asset-ids|ensure-import-refs> <group_id> [file]",
            household_inventory::VERSION
        ),
    };
    let file = args.next();

    let db_path = get_default_db_path();
    let api = ItemIoApi::new(&db_path).with_context(|| format!("failed to open {}", db_path))?;

    match command.as_str() {
        "import" => {
            let Some(file) = file else {
                bail!("import requires a file path");
            };
            let response = api.import_file(&group_id, Path::new(&file))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "export" => write_output(file.as_deref(), &api.export_items(&group_id)?)?,
        "bom" => write_output(file.as_deref(), &api.export_bill_of_materials(&group_id)?)?,
        "ensure-asset-ids" => {
            let response = api.ensure_asset_ids(&group_id)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "ensure-import-refs" => {
            let response = api.ensure_import_refs(&group_id)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        other => bail!("unknown command: {:?}", other),
    }

    Ok(())
}

fn write_output(file: Option<&str>, bytes: &[u8]) -> Result<()> {
    match file {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path))?;
            eprintln!("wrote {} bytes to {}", bytes.len(), path);
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(bytes)?;
        }
    }
    Ok(())
}
