//! Browser entry point and message dispatch.
//!
//! The controller lives in a thread-local. DOM callbacks call [`dispatch`],
//! which updates the controller and then applies the resulting effects with
//! the borrow released, so async completions can dispatch again freely.

use std::cell::RefCell;

use pictag_core::{
    ClientConfig, Controller, Effect, FileInfo, Message, PreferenceStore,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::dom::DomSurface;
use crate::storage::LocalStorage;
use crate::styles::NOTIFICATION_CSS;
use crate::{http, wasm_file};

struct WebApp {
    controller: Controller<File>,
    surface: DomSurface,
    config: ClientConfig,
}

thread_local! {
    static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = ClientConfig::load_from_store(&LocalStorage::open()).unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }
    log::info!("Pictag starting, endpoint {}", config.endpoint);

    let surface = DomSurface::attach()?;
    if let Err(e) = surface.inject_stylesheet(NOTIFICATION_CSS) {
        log::warn!("Failed to inject notification styles: {:?}", e);
    }
    bind_events(&surface)?;

    let mut controller = Controller::new(PreferenceStore::new(Box::new(LocalStorage::open())));
    let effects = controller.start();

    APP.with(|app| {
        *app.borrow_mut() = Some(WebApp {
            controller,
            surface,
            config,
        });
    });
    apply(effects);

    Ok(())
}

/// Feed a message to the controller and apply what it asks for.
pub fn dispatch(message: Message<File>) {
    let effects = APP.with(|app| {
        app.borrow_mut()
            .as_mut()
            .map(|app| app.controller.update(message))
    });
    match effects {
        Some(effects) => apply(effects),
        None => log::warn!("Message dispatched before startup finished"),
    }
}

fn apply(effects: Vec<Effect<File>>) {
    let Some((surface, config)) = APP.with(|app| {
        app.borrow()
            .as_ref()
            .map(|app| (app.surface.clone(), app.config.clone()))
    }) else {
        return;
    };

    for effect in effects {
        if let Err(e) = apply_one(&surface, &config, effect) {
            log::warn!("Failed to apply effect: {:?}", e);
        }
    }
}

fn apply_one(
    surface: &DomSurface,
    config: &ClientConfig,
    effect: Effect<File>,
) -> Result<(), JsValue> {
    match effect {
        Effect::OpenPicker => surface.open_picker(),
        Effect::ClearPicker => surface.clear_picker(),
        Effect::SetDragOver(active) => surface.set_drag_over(active)?,
        Effect::ReadFile { token, file } => {
            wasm_file::read_as_data_url(&file.handle, move |result| {
                dispatch(Message::FileDecoded { token, result });
            })?;
        }
        Effect::ShowPreview { data_url } => surface.show_preview(&data_url),
        Effect::Submit { token, file } => {
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = http::submit(&config, &file.handle).await;
                dispatch(Message::AnalysisResolved { token, outcome });
            });
        }
        Effect::RenderCards(cards) => surface.render_cards(&cards)?,
        Effect::ShowView(visibility) => surface.apply_visibility(&visibility)?,
        Effect::SetDarkMode(dark) => surface.set_dark_mode(dark)?,
        Effect::Notify(notification) => {
            let id = notification.id;
            surface.show_notification(&notification, move || {
                dispatch(Message::NotificationExpired(id));
            })?;
        }
        Effect::DismissNotification(id) => surface.dismiss_notification(id)?,
    }
    Ok(())
}

fn bind_events(surface: &DomSurface) -> Result<(), JsValue> {
    on(&surface.dark_mode_toggle, "click", |_| {
        dispatch(Message::DarkModeToggled);
    })?;

    on(&surface.browse_btn, "click", |event| {
        event.stop_propagation();
        dispatch(Message::BrowseClicked);
    })?;

    on(&surface.drop_zone, "click", |_| {
        dispatch(Message::DropZoneClicked);
    })?;

    on(&surface.file_input, "change", |event| {
        let file = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| wasm_file::picked_file(&input));
        if let Some(file) = file {
            dispatch(Message::FilePicked(file));
        }
    })?;

    on(&surface.drop_zone, "dragover", |event| {
        event.prevent_default();
        event.stop_propagation();
        dispatch(Message::DragOver);
    })?;

    on(&surface.drop_zone, "dragleave", |event| {
        event.prevent_default();
        event.stop_propagation();
        dispatch(Message::DragLeave);
    })?;

    on(&surface.drop_zone, "drop", |event| {
        event.prevent_default();
        event.stop_propagation();
        let file: Option<FileInfo<File>> = wasm_file::dropped_file(&event);
        dispatch(Message::FileDropped(file));
    })?;

    on(&surface.remove_btn, "click", |event| {
        event.stop_propagation();
        dispatch(Message::RemoveClicked);
    })?;

    on(&surface.analyze_btn, "click", |_| {
        dispatch(Message::AnalyzeClicked);
    })?;

    Ok(())
}

fn on<H>(target: &web_sys::EventTarget, name: &str, handler: H) -> Result<(), JsValue>
where
    H: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Listeners live as long as the page
    Ok(())
}
