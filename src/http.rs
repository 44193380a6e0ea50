//! Prediction requests via `fetch`.

use pictag_core::{AnalysisOutcome, ClientConfig, ClientError};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

/// POST the file as a single-field multipart form and classify the reply.
///
/// There is no timeout: the request waits for a response or a network error.
pub async fn submit(config: &ClientConfig, file: &File) -> AnalysisOutcome {
    AnalysisOutcome::from_body(post_file(config, file).await)
}

async fn post_file(config: &ClientConfig, file: &File) -> Result<String, ClientError> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename(&config.upload_field, file, &file.name())
        .map_err(transport)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);

    let request = Request::new_with_str_and_init(&config.endpoint, &init).map_err(transport)?;
    let window = web_sys::window().ok_or_else(|| ClientError::transport("no window"))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    log::debug!("{} answered {}", config.endpoint, response.status());

    let body = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    body.as_string()
        .ok_or_else(|| ClientError::transport("response body is not text"))
}

fn transport(e: JsValue) -> ClientError {
    ClientError::transport(format!("{:?}", e))
}
