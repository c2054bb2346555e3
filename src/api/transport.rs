//! Browser Transport
//!
//! `fetch` through gloo-net. Multipart bodies go out as `FormData` so the
//! browser writes the boundary header.

use async_trait::async_trait;
use crm_client::gateway::{HttpMethod, HttpRequest, HttpResponse, MultipartField, RequestBody, Transport};
use crm_client::TransportError;
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            RequestBody::Empty => builder.send().await,
            RequestBody::Json(body) => {
                let request = builder.body(body).map_err(build_error)?;
                request.send().await
            }
            RequestBody::Multipart(fields) => send_multipart(builder, &fields).await?,
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

async fn send_multipart(
    builder: RequestBuilder,
    fields: &[MultipartField],
) -> Result<Result<gloo_net::http::Response, gloo_net::Error>, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for field in fields {
        match field {
            MultipartField::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_error)?;
            }
            MultipartField::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let blob = to_blob(bytes, content_type)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }
    let request = builder.body(form).map_err(build_error)?;
    Ok(request.send().await)
}

fn to_blob(bytes: &[u8], content_type: &str) -> Result<Blob, TransportError> {
    let data = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&data);
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

fn build_error(err: gloo_net::Error) -> TransportError {
    TransportError::Request(err.to_string())
}

fn js_error(err: JsValue) -> TransportError {
    TransportError::Request(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
