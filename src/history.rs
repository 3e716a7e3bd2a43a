use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::api::{self, HistoryEntry};
use crate::dom;
use crate::toast::ToastNotifier;

thread_local! {
    static HISTORY_LOAD_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Case-insensitive substring match of the filter query against an entry url.
pub(crate) fn matches_filter(url: &str, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    url.to_lowercase().contains(&needle)
}

/// Meta line for entries that carry the backend's optional bookkeeping.
pub(crate) fn entry_meta_text(entry: &HistoryEntry) -> Option<String> {
    let mut parts = Vec::new();
    if !entry.timestamp.trim().is_empty() {
        parts.push(entry.timestamp.trim().to_string());
    }
    if let Some(metadata) = &entry.metadata {
        parts.push(format!("{} words", metadata.word_count));
        parts.push(format!("{} keywords", metadata.keyword_count));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

#[derive(Clone)]
pub struct HistoryView {
    list: Element,
    toast: Rc<ToastNotifier>,
}

impl HistoryView {
    pub fn new(doc: &Document, toast: Rc<ToastNotifier>) -> Option<Self> {
        Some(Self {
            list: doc.get_element_by_id("historyList")?,
            toast,
        })
    }

    /// Fetches and re-renders the list. A load superseded by a newer one
    /// drops its response unrendered.
    pub fn load(&self) {
        let token = HISTORY_LOAD_SEQ.with(|seq| {
            let next = seq.get().wrapping_add(1);
            seq.set(next);
            next
        });

        let view = self.clone();
        spawn_local(async move {
            let result = api::fetch_history().await;
            let still_latest = HISTORY_LOAD_SEQ.with(|seq| seq.get() == token);
            if !still_latest {
                return;
            }

            match result {
                Ok(entries) => view.render(&entries),
                Err(err) => {
                    log::warn!("history load failed: {err}");
                    view.toast.error("Error loading history");
                }
            }
        });
    }

    fn render(&self, entries: &[HistoryEntry]) {
        let Some(doc) = self.list.owner_document() else {
            return;
        };

        self.list.set_inner_html("");

        if entries.is_empty() {
            if let Ok(empty) = doc.create_element("p") {
                empty.set_text_content(Some("No history available."));
                let _ = self.list.append_child(&empty);
            }
            return;
        }

        for entry in entries {
            let Some(item) = render_entry(&doc, entry) else {
                continue;
            };
            let _ = self.list.append_child(&item);
        }
    }

    /// Visual filter over the rendered items; never re-fetches.
    pub fn filter(&self, query: &str) {
        let Ok(items) = self.list.query_selector_all(".history-item") else {
            return;
        };

        for idx in 0..items.length() {
            let Some(item) = items
                .item(idx)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let url = item.get_attribute("data-url").unwrap_or_default();
            let display = if matches_filter(&url, query) {
                "block"
            } else {
                "none"
            };
            let _ = item.style().set_property("display", display);
        }
    }
}

fn render_entry(doc: &Document, entry: &HistoryEntry) -> Option<Element> {
    let item = doc.create_element("div").ok()?;
    item.set_class_name("history-item");
    let _ = item.set_attribute("data-url", &entry.url);

    let url_line = doc.create_element("p").ok()?;
    let url_label = doc.create_element("strong").ok()?;
    url_label.set_text_content(Some("URL:"));
    let _ = url_line.append_child(&url_label);
    let _ = url_line.append_child(&doc.create_text_node(&format!(" {}", entry.url)));
    let _ = item.append_child(&url_line);

    let content_heading = doc.create_element("p").ok()?;
    let content_label = doc.create_element("strong").ok()?;
    content_label.set_text_content(Some("Generated Content:"));
    let _ = content_heading.append_child(&content_label);
    let _ = item.append_child(&content_heading);

    let content_line = doc.create_element("p").ok()?;
    content_line.set_text_content(Some(&entry.generated_content));
    let _ = item.append_child(&content_line);

    if !entry.keywords.is_empty() {
        let keyword_row = doc.create_element("div").ok()?;
        keyword_row.set_class_name("history-keywords");
        for keyword in &entry.keywords {
            let Ok(tag) = doc.create_element("span") else {
                continue;
            };
            tag.set_class_name("keyword-tag");
            tag.set_text_content(Some(keyword));
            let _ = keyword_row.append_child(&tag);
        }
        let _ = item.append_child(&keyword_row);
    }

    if let Some(meta) = entry_meta_text(entry) {
        let meta_line = doc.create_element("p").ok()?;
        meta_line.set_class_name("history-meta");
        meta_line.set_text_content(Some(&meta));
        let _ = item.append_child(&meta_line);
    }

    Some(item)
}

pub fn init_controls(doc: &Document, view: Rc<HistoryView>) {
    if let Some(search) = dom::element_by_id::<HtmlInputElement>(doc, "historySearch") {
        let view = view.clone();
        let input = search.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            view.filter(&input.value());
        });
        let _ = search.add_event_listener_with_callback("input", callback.as_ref().unchecked_ref());
        callback.forget();
    }

    if let Some(sort) = doc.get_element_by_id("historySort") {
        // TODO: pick an ordering for the sort control; entries currently stay
        // in the order the backend returns them (newest first).
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            log::debug!("history sort requested; keeping backend order");
        });
        let _ = sort.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        callback.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::{entry_meta_text, matches_filter};
    use crate::api::{EntryMetadata, HistoryEntry};

    fn entry(url: &str) -> HistoryEntry {
        HistoryEntry {
            url: url.to_string(),
            generated_content: "body".to_string(),
            keywords: Vec::new(),
            timestamp: String::new(),
            metadata: None,
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        assert!(matches_filter("http://Example.com/Page", "example"));
        assert!(matches_filter("http://x", "X"));
        assert!(!matches_filter("http://y", "x"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_filter("http://x", ""));
        assert!(matches_filter("http://x", "   "));
    }

    #[test]
    fn meta_line_absent_without_bookkeeping() {
        assert_eq!(entry_meta_text(&entry("http://x")), None);
    }

    #[test]
    fn meta_line_joins_timestamp_and_counts() {
        let mut with_meta = entry("http://x");
        with_meta.timestamp = "2026-08-01T10:00:00".to_string();
        with_meta.metadata = Some(EntryMetadata {
            word_count: 480,
            keyword_count: 10,
        });

        assert_eq!(
            entry_meta_text(&with_meta).as_deref(),
            Some("2026-08-01T10:00:00 | 480 words | 10 keywords")
        );
    }
}
