use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlInputElement, Url};

use crate::api::{self, GenerationResponse};
use crate::dom;
use crate::toast::ToastNotifier;

/// Trimmed submission URL; `None` when nothing useful was typed.
pub(crate) fn normalized_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Provenance line under the results, from whatever the backend echoed back.
pub(crate) fn result_meta_text(response: &GenerationResponse) -> Option<String> {
    let mut parts = Vec::new();
    if !response.url.trim().is_empty() {
        parts.push(response.url.trim().to_string());
    }
    if !response.timestamp.trim().is_empty() {
        parts.push(response.timestamp.trim().to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

#[derive(Clone)]
struct GeneratorView {
    input: HtmlInputElement,
    loading: Element,
    results: Element,
    keywords: Element,
    content: Element,
    meta: Option<Element>,
}

impl GeneratorView {
    fn new(doc: &Document) -> Option<Self> {
        Some(Self {
            input: dom::element_by_id(doc, "urlInput")?,
            loading: doc.get_element_by_id("loadingAnimation")?,
            results: doc.get_element_by_id("resultsContainer")?,
            keywords: doc.get_element_by_id("keywordsList")?,
            content: doc.get_element_by_id("generatedContent")?,
            meta: doc.get_element_by_id("resultMeta"),
        })
    }

    fn begin_request(&self) {
        dom::show(&self.loading);
        dom::hide(&self.results);
    }

    fn finish_request(&self) {
        dom::hide(&self.loading);
    }

    fn render(&self, response: &GenerationResponse) {
        let Some(doc) = self.keywords.owner_document() else {
            return;
        };

        self.keywords.set_inner_html("");
        for keyword in &response.keywords {
            let Ok(tag) = doc.create_element("span") else {
                continue;
            };
            tag.set_class_name("keyword-tag");
            tag.set_text_content(Some(keyword));
            let _ = self.keywords.append_child(&tag);
        }

        // Literal text only; generated output is never interpreted as markup.
        self.content
            .set_text_content(Some(&response.generated_content));

        if let Some(meta) = &self.meta {
            meta.set_text_content(result_meta_text(response).as_deref());
        }

        dom::show(&self.results);
    }

    fn content_text(&self) -> String {
        self.content.text_content().unwrap_or_default()
    }
}

pub fn init(doc: &Document, toast: Rc<ToastNotifier>) {
    let Some(view) = GeneratorView::new(doc) else {
        log::warn!("generator elements missing; generation disabled");
        return;
    };
    let Some(button) = doc.get_element_by_id("generateBtn") else {
        log::warn!("generate button missing; generation disabled");
        return;
    };

    {
        let view = view.clone();
        let toast = toast.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Some(url) = normalized_url(&view.input.value()) else {
                toast.error("Please enter a valid URL");
                return;
            };

            view.begin_request();
            let view = view.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match api::generate(&url).await {
                    Ok(response) => {
                        view.render(&response);
                        toast.success("Content generated successfully");
                    }
                    Err(err) => {
                        toast.error(&err.to_string());
                    }
                }
                // Loading always clears, success or not.
                view.finish_request();
            });
        });
        let _ = button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        callback.forget();
    }

    init_copy_button(doc, &view, &toast);
    init_download_button(doc, &view, &toast);
}

fn init_copy_button(doc: &Document, view: &GeneratorView, toast: &Rc<ToastNotifier>) {
    let Some(button) = doc.get_element_by_id("copyContent") else {
        return;
    };

    let view = view.clone();
    let toast = toast.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        let text = view.content_text();
        let toast = toast.clone();
        spawn_local(async move {
            match JsFuture::from(clipboard.write_text(&text)).await {
                Ok(_) => toast.success("Content copied to clipboard"),
                Err(_) => toast.error("Failed to copy content"),
            }
        });
    });
    let _ = button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    callback.forget();
}

fn init_download_button(doc: &Document, view: &GeneratorView, toast: &Rc<ToastNotifier>) {
    let Some(button) = doc.get_element_by_id("downloadContent") else {
        return;
    };

    let view = view.clone();
    let toast = toast.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        if let Err(err) = download_content(&view.content_text()) {
            log::warn!("download failed: {err:?}");
            toast.error("Failed to download content");
        }
    });
    let _ = button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    callback.forget();
}

fn download_content(text: &str) -> Result<(), JsValue> {
    let doc = dom::web_document().ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let parts = Array::new();
    parts.push(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let href = Url::create_object_url_with_blob(&blob)?;

    let anchor = doc
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&href);
    anchor.set_download("generated-content.txt");
    anchor.click();
    Url::revoke_object_url(&href)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalized_url, result_meta_text};
    use crate::api::GenerationResponse;

    #[test]
    fn whitespace_only_urls_are_rejected() {
        assert_eq!(normalized_url(""), None);
        assert_eq!(normalized_url("   \t  "), None);
    }

    #[test]
    fn urls_are_trimmed_before_submission() {
        assert_eq!(
            normalized_url("  http://example.com \n"),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn result_meta_joins_url_and_timestamp() {
        let response: GenerationResponse = serde_json::from_str(
            r#"{"url": "http://x", "timestamp": "2026-08-01T10:00:00", "generated_content": "t"}"#,
        )
        .expect("decode");

        assert_eq!(
            result_meta_text(&response).as_deref(),
            Some("http://x | 2026-08-01T10:00:00")
        );

        let bare: GenerationResponse =
            serde_json::from_str(r#"{"generated_content": "t"}"#).expect("decode");
        assert_eq!(result_meta_text(&bare), None);
    }
}
