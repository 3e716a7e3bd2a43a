use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};

pub const TOAST_TTL_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub(crate) fn class_name(self) -> &'static str {
        match self {
            Self::Success => "toast success",
            Self::Error => "toast error",
        }
    }
}

#[derive(Clone)]
pub struct ToastNotifier {
    container: Element,
}

impl ToastNotifier {
    /// Attaches to the page's toast container, creating one under `<body>`
    /// when the markup lacks it.
    pub fn mount(doc: &Document) -> Option<Self> {
        if let Some(container) = doc.get_element_by_id("toastContainer") {
            return Some(Self { container });
        }

        let container = doc.create_element("div").ok()?;
        container.set_id("toastContainer");
        doc.body()?.append_child(&container).ok()?;
        Some(Self { container })
    }

    /// Appends a toast and schedules its removal. Concurrent toasts stack in
    /// creation order; there is no dedup or queue limit.
    pub fn show(&self, message: &str, kind: ToastKind) {
        let Some(doc) = self.container.owner_document() else {
            return;
        };
        let Ok(toast) = doc.create_element("div") else {
            return;
        };
        toast.set_class_name(kind.class_name());
        toast.set_text_content(Some(message));
        if self.container.append_child(&toast).is_err() {
            return;
        }

        Timeout::new(TOAST_TTL_MS, move || {
            toast.remove();
        })
        .forget();
    }

    pub fn success(&self, message: &str) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&self, message: &str) {
        self.show(message, ToastKind::Error);
    }
}
