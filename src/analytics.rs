use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlCanvasElement};

use crate::api::{self, AnalyticsSummary};
use crate::chart;
use crate::dom;
use crate::toast::ToastNotifier;

thread_local! {
    static ANALYTICS_LOAD_SEQ: Cell<u64> = const { Cell::new(0) };
}

pub(crate) fn average_words_text(average: f64) -> String {
    format!("{average:.1} words on average")
}

#[derive(Clone)]
pub struct AnalyticsView {
    total: Element,
    keywords: Element,
    canvas: HtmlCanvasElement,
    toast: Rc<ToastNotifier>,
}

impl AnalyticsView {
    pub fn new(doc: &Document, toast: Rc<ToastNotifier>) -> Option<Self> {
        Some(Self {
            total: doc.get_element_by_id("totalGenerations")?,
            keywords: doc.get_element_by_id("popularKeywords")?,
            canvas: dom::element_by_id(doc, "generationChart")?,
            toast,
        })
    }

    /// Fetches and re-renders the analytics panel, dropping superseded
    /// responses the same way the history view does.
    pub fn load(&self) {
        let token = ANALYTICS_LOAD_SEQ.with(|seq| {
            let next = seq.get().wrapping_add(1);
            seq.set(next);
            next
        });

        let view = self.clone();
        spawn_local(async move {
            let result = api::fetch_analytics().await;
            let still_latest = ANALYTICS_LOAD_SEQ.with(|seq| seq.get() == token);
            if !still_latest {
                return;
            }

            match result {
                Ok(summary) => view.render(&summary),
                Err(err) => {
                    log::warn!("analytics load failed: {err}");
                    view.toast.error("Error loading analytics");
                }
            }
        });
    }

    fn render(&self, summary: &AnalyticsSummary) {
        dom::set_text(&self.total, summary.total_generations.to_string());

        let doc = self.total.owner_document();
        if let (Some(average), Some(doc)) = (summary.average_word_count, doc.as_ref()) {
            if let Some(slot) = doc.get_element_by_id("averageWordCount") {
                dom::set_text(&slot, average_words_text(average));
            }
        }

        if let Some(doc) = doc.as_ref() {
            self.keywords.set_inner_html("");
            for keyword in &summary.popular_keywords {
                let Ok(item) = doc.create_element("li") else {
                    continue;
                };
                item.set_text_content(Some(keyword));
                let _ = self.keywords.append_child(&item);
            }
        }

        chart::draw_timeline(&self.canvas, &summary.generation_timeline);
    }
}
