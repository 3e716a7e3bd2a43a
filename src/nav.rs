use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::analytics::AnalyticsView;
use crate::history::HistoryView;

const HISTORY_SECTION: &str = "history";
const ANALYTICS_SECTION: &str = "analytics";

pub fn init(
    doc: &Document,
    history: Option<Rc<HistoryView>>,
    analytics: Option<Rc<AnalyticsView>>,
) {
    let Ok(links) = doc.query_selector_all(".nav-links li") else {
        return;
    };

    for idx in 0..links.length() {
        let Some(link) = links
            .item(idx)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        let doc = doc.clone();
        let link_ref = link.clone();
        let history = history.clone();
        let analytics = analytics.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            activate(&doc, &link_ref, history.as_deref(), analytics.as_deref());
        });
        let _ = link.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        callback.forget();
    }
}

fn activate(
    doc: &Document,
    link: &Element,
    history: Option<&HistoryView>,
    analytics: Option<&AnalyticsView>,
) {
    if let Ok(Some(current)) = doc.query_selector(".nav-links li.active") {
        let _ = current.class_list().remove_1("active");
    }
    let _ = link.class_list().add_1("active");

    let target = link.get_attribute("data-section").unwrap_or_default();

    let Ok(sections) = doc.query_selector_all(".section") else {
        return;
    };
    for idx in 0..sections.length() {
        let Some(section) = sections
            .item(idx)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let _ = section.class_list().remove_1("active");
        if section.id() == target {
            let _ = section.class_list().add_1("active");
        }
    }

    // Every activation re-fetches; the views drop stale responses themselves.
    match target.as_str() {
        HISTORY_SECTION => {
            if let Some(history) = history {
                history.load();
            }
        }
        ANALYTICS_SECTION => {
            if let Some(analytics) = analytics {
                analytics.load();
            }
        }
        _ => {}
    }
}
