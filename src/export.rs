//! CSV export of the history

use crate::history::HistoryEntry;

/// Header row of the exported file
pub const CSV_HEADER: &str = "Tijdstip;Getal1;Operatie;Getal2;Resultaat";

const DELIMITER: &str = ";";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One CSV row; colons in the timestamp become hyphens
pub fn csv_row(entry: &HistoryEntry) -> String {
    [
        entry.timestamp.replace(':', "-"),
        entry.operand_a.to_string(),
        entry.operation_symbol.clone(),
        entry.operand_b.to_string(),
        entry.result.to_string(),
    ]
    .iter()
    .map(|f| quote(f))
    .collect::<Vec<_>>()
    .join(DELIMITER)
}

/// Header plus one row per entry, in history order
pub fn history_to_csv(entries: &[HistoryEntry]) -> String {
    let rows = entries.iter().map(csv_row).collect::<Vec<_>>().join("\n");
    format!("{}\n{}", CSV_HEADER, rows)
}

/// Trigger a browser download of `content` (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn download_file(
    content: &str,
    filename: &str,
    mime_type: &str,
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)?;
    log::info!("Exported {} ({} bytes)", filename, content.len());
    Ok(())
}

/// Write the CSV into `dir` (native only)
#[cfg(not(target_arch = "wasm32"))]
pub fn write_csv(
    dir: &std::path::Path,
    entries: &[HistoryEntry],
) -> std::io::Result<std::path::PathBuf> {
    let path = dir.join(crate::consts::EXPORT_FILENAME);
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, history_to_csv(entries))?;
    log::info!("Exported {} entries to {}", entries.len(), path.display());
    Ok(path)
}
