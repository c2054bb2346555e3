//! Picked files into upload payloads

use crm_client::models::Attachment;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

pub async fn read_attachment(file: &File) -> Result<Attachment, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("cannot read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(Attachment {
        file_name: file.name(),
        content_type,
        bytes,
    })
}
