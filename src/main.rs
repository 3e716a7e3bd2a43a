mod analytics;
mod api;
mod chart;
mod dom;
mod generator;
mod history;
mod nav;
mod theme;
mod toast;

use std::rc::Rc;

use leptos::*;

use crate::analytics::AnalyticsView;
use crate::history::HistoryView;
use crate::toast::ToastNotifier;

#[component]
fn App() -> impl IntoView {
    view! {
        <div
            id="runtime-marker"
            data-runtime="contentgen-frontend"
            style="display:none;"
        ></div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    mount_to_body(|| view! { <App /> });

    let Some(doc) = dom::web_document() else {
        log::warn!("document unavailable; ui left inert");
        return;
    };

    let Some(toast) = ToastNotifier::mount(&doc) else {
        log::warn!("toast container could not be created; ui left inert");
        return;
    };
    let toast = Rc::new(toast);

    theme::init(&doc);
    generator::init(&doc, toast.clone());

    let history = HistoryView::new(&doc, toast.clone()).map(Rc::new);
    if history.is_none() {
        log::warn!("history elements missing; history view disabled");
    }
    let analytics = AnalyticsView::new(&doc, toast.clone()).map(Rc::new);
    if analytics.is_none() {
        log::warn!("analytics elements missing; analytics view disabled");
    }

    nav::init(&doc, history.clone(), analytics.clone());

    if let Some(history) = &history {
        history::init_controls(&doc, history.clone());
        // The landing page seeds the history list before the tab is opened.
        history.load();
    }
}
