//! Document surface: applies controller effects to the page.
//!
//! The page markup provides fixed element ids; everything else (cards,
//! notifications) is created here. User-supplied text is always set as text
//! content, never parsed as markup.

use std::time::Duration;

use pictag_core::{CardDescriptor, Notification, Visibility};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement, Window,
};

/// Handles to every element the page logic touches.
#[derive(Clone)]
pub struct DomSurface {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub drop_zone: HtmlElement,
    pub drop_zone_content: HtmlElement,
    pub file_input: HtmlInputElement,
    pub browse_btn: HtmlElement,
    pub analyze_btn: HtmlButtonElement,
    pub remove_btn: HtmlElement,
    pub preview_container: HtmlElement,
    pub image_preview: HtmlImageElement,
    pub results_section: HtmlElement,
    pub predictions_container: HtmlElement,
    pub loading_container: HtmlElement,
    pub empty_state: HtmlElement,
    pub dark_mode_toggle: HtmlElement,
}

impl DomSurface {
    /// Look up all page elements. Fails if the markup is missing any of them.
    pub fn attach() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;

        let drop_zone_content = document
            .query_selector(".drop-zone-content")?
            .ok_or("missing .drop-zone-content")?
            .dyn_into::<HtmlElement>()?;

        Ok(Self {
            drop_zone: by_id(&document, "dropZone")?,
            drop_zone_content,
            file_input: by_id(&document, "fileInput")?,
            browse_btn: by_id(&document, "browseBtn")?,
            analyze_btn: by_id(&document, "analyzeBtn")?,
            remove_btn: by_id(&document, "removeBtn")?,
            preview_container: by_id(&document, "previewContainer")?,
            image_preview: by_id(&document, "imagePreview")?,
            results_section: by_id(&document, "resultsSection")?,
            predictions_container: by_id(&document, "predictionsContainer")?,
            loading_container: by_id(&document, "loadingContainer")?,
            empty_state: by_id(&document, "emptyState")?,
            dark_mode_toggle: by_id(&document, "darkModeToggle")?,
            window,
            document,
            body,
        })
    }

    /// Add a `<style>` element to the document head.
    pub fn inject_stylesheet(&self, css: &str) -> Result<(), JsValue> {
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(css));
        let head = self.document.head().ok_or("no head")?;
        head.append_child(&style)?;
        Ok(())
    }

    pub fn apply_visibility(&self, v: &Visibility) -> Result<(), JsValue> {
        set_display(&self.drop_zone_content, v.drop_zone_content, "block")?;
        set_display(&self.preview_container, v.preview, "flex")?;
        set_display(&self.loading_container, v.loading, "block")?;
        set_display(&self.results_section, v.results, "block")?;
        set_display(&self.empty_state, v.empty_state, "block")?;
        self.analyze_btn.set_disabled(!v.analyze_enabled);
        Ok(())
    }

    pub fn set_drag_over(&self, active: bool) -> Result<(), JsValue> {
        self.drop_zone
            .class_list()
            .toggle_with_force("drag-over", active)?;
        Ok(())
    }

    pub fn set_dark_mode(&self, dark: bool) -> Result<(), JsValue> {
        self.body.class_list().toggle_with_force("dark-mode", dark)?;
        Ok(())
    }

    pub fn show_preview(&self, data_url: &str) {
        self.image_preview.set_src(data_url);
    }

    pub fn open_picker(&self) {
        self.file_input.click();
    }

    /// Clear the input so choosing the same file again still fires `change`.
    pub fn clear_picker(&self) {
        self.file_input.set_value("");
    }

    /// Replace the prediction cards and schedule each bar's reveal.
    pub fn render_cards(&self, cards: &[CardDescriptor]) -> Result<(), JsValue> {
        self.predictions_container.set_inner_html("");

        for card in cards {
            let (element, bar) = self.build_card(card)?;
            self.predictions_container.append_child(&element)?;

            let target = card.target_width();
            set_timeout(&self.window, card.reveal_delay, move || {
                if let Err(e) = bar.style().set_property("width", &target) {
                    log::warn!("Failed to animate confidence bar: {:?}", e);
                }
            })?;
        }
        Ok(())
    }

    fn build_card(&self, card: &CardDescriptor) -> Result<(Element, HtmlElement), JsValue> {
        let root = self.div("prediction-card", None)?;

        let emoji = self.div("prediction-emoji", Some(&card.emoji))?;
        let info = self.div("prediction-info", None)?;
        let label = self.div("prediction-label", Some(&card.label))?;
        let bar_container = self.div("confidence-bar-container", None)?;
        let bar = self
            .div("confidence-bar", None)?
            .dyn_into::<HtmlElement>()?;
        bar.style().set_property("width", card.initial_width())?;
        let text = self.div("confidence-text", Some(&card.confidence_text))?;

        bar_container.append_child(&bar)?;
        bar_container.append_child(&text)?;
        info.append_child(&label)?;
        info.append_child(&bar_container)?;
        root.append_child(&emoji)?;
        root.append_child(&info)?;

        Ok((root, bar))
    }

    fn div(&self, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(class);
        if text.is_some() {
            element.set_text_content(text);
        }
        Ok(element)
    }

    /// Replace any visible notification with this one and slide it in.
    /// `on_expired` runs once the notification's lifetime is over.
    pub fn show_notification<F>(&self, notification: &Notification, on_expired: F) -> Result<(), JsValue>
    where
        F: FnOnce() + 'static,
    {
        self.remove_notifications(".notification")?;

        let element = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        element.set_class_name(&notification.kind.class_name());
        element.set_attribute("data-id", &notification.id.to_string())?;

        let icon = self.document.create_element("span")?;
        icon.set_class_name("notification-emoji");
        icon.set_text_content(Some(notification.kind.icon()));
        let text = self.document.create_element("span")?;
        text.set_class_name("notification-text");
        text.set_text_content(Some(&notification.message));
        element.append_child(&icon)?;
        element.append_child(&text)?;
        self.body.append_child(&element)?;

        let shown = element.clone();
        request_animation_frame(&self.window, move || {
            let _ = shown.class_list().add_1("show");
        })?;

        let hidden = element;
        set_timeout(&self.window, notification.dwell(), move || {
            let _ = hidden.class_list().remove_1("show");
        })?;
        set_timeout(&self.window, notification.lifetime(), on_expired)?;
        Ok(())
    }

    pub fn dismiss_notification(&self, id: u64) -> Result<(), JsValue> {
        self.remove_notifications(&format!(".notification[data-id=\"{}\"]", id))
    }

    fn remove_notifications(&self, selector: &str) -> Result<(), JsValue> {
        let existing = self.document.query_selector_all(selector)?;
        for i in 0..existing.length() {
            if let Some(element) = existing.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                element.remove();
            }
        }
        Ok(())
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has an unexpected element type", id)))
}

fn set_display(element: &HtmlElement, visible: bool, shown: &str) -> Result<(), JsValue> {
    element
        .style()
        .set_property("display", if visible { shown } else { "none" })
}

/// Run `f` once after `delay`.
pub fn set_timeout<F>(window: &Window, delay: Duration, f: F) -> Result<i32, JsValue>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay.as_millis() as i32,
    )
}

fn request_animation_frame<F>(window: &Window, f: F) -> Result<i32, JsValue>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    window.request_animation_frame(callback.unchecked_ref())
}
