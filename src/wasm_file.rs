//! Reading picked or dropped files in the browser.

use std::cell::RefCell;
use std::rc::Rc;

use pictag_core::FileInfo;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, File, FileReader, HtmlInputElement};

/// Describe a browser file for the controller.
pub fn file_info(file: File) -> FileInfo<File> {
    let name = file.name();
    let mime = file.type_();
    FileInfo::new(file, name, mime)
}

/// First file selected in a file input, if any.
pub fn picked_file(input: &HtmlInputElement) -> Option<FileInfo<File>> {
    input.files()?.get(0).map(file_info)
}

/// First file carried by a drop event, if any.
pub fn dropped_file(event: &Event) -> Option<FileInfo<File>> {
    let event = event.dyn_ref::<DragEvent>()?;
    event.data_transfer()?.files()?.get(0).map(file_info)
}

/// Decode a file into a `data:` URL in the background.
///
/// `on_done` runs exactly once, with the URL or a description of the failure.
pub fn read_as_data_url<F>(file: &File, on_done: F) -> Result<(), JsValue>
where
    F: FnOnce(Result<String, String>) + 'static,
{
    let reader = FileReader::new()?;
    let on_done = Rc::new(RefCell::new(Some(on_done)));

    let load_reader = reader.clone();
    let load_done = on_done.clone();
    let onload = Closure::wrap(Box::new(move |_event: Event| {
        let result = match load_reader.result() {
            Ok(value) => value
                .as_string()
                .ok_or_else(|| "reader result is not a string".to_string()),
            Err(e) => Err(format!("{:?}", e)),
        };
        if let Some(done) = load_done.borrow_mut().take() {
            done(result);
        }
    }) as Box<dyn FnMut(Event)>);

    let error_reader = reader.clone();
    let onerror = Closure::wrap(Box::new(move |_event: Event| {
        let message = error_reader
            .error()
            .map(|e| e.message())
            .unwrap_or_else(|| "unknown read error".to_string());
        if let Some(done) = on_done.borrow_mut().take() {
            done(Err(message));
        }
    }) as Box<dyn FnMut(Event)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    // The reader owns the callbacks for the rest of its life.
    onload.forget();
    onerror.forget();

    reader.read_as_data_url(file)
}
