use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub fn web_document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

pub fn element_by_id<T>(doc: &Document, id: &str) -> Option<T>
where
    T: JsCast,
{
    doc.get_element_by_id(id)
        .and_then(|node| node.dyn_into::<T>().ok())
}

pub fn set_text(element: &Element, value: impl AsRef<str>) {
    let next = value.as_ref();
    if element.text_content().as_deref() == Some(next) {
        return;
    }
    element.set_text_content(Some(next));
}

pub fn show(element: &Element) {
    let _ = element.class_list().remove_1("hidden");
}

pub fn hide(element: &Element) {
    let _ = element.class_list().add_1("hidden");
}
