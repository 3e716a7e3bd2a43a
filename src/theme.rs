use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

const THEME_ATTR: &str = "data-theme";
const DARK: &str = "dark";

/// Next value for the body theme attribute; `None` clears it.
pub(crate) fn next_theme(current: Option<&str>) -> Option<&'static str> {
    match current {
        Some(DARK) => None,
        _ => Some(DARK),
    }
}

pub fn init(doc: &Document) {
    let Some(toggle) = doc.get_element_by_id("themeToggle") else {
        log::warn!("theme toggle missing; dark mode disabled");
        return;
    };

    let doc = doc.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let Some(body) = doc.body() else {
            return;
        };
        match next_theme(body.get_attribute(THEME_ATTR).as_deref()) {
            Some(value) => {
                let _ = body.set_attribute(THEME_ATTR, value);
            }
            None => {
                let _ = body.remove_attribute(THEME_ATTR);
            }
        }
    });
    let _ = toggle.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    callback.forget();
}

#[cfg(test)]
mod tests {
    use super::next_theme;

    #[test]
    fn toggles_between_default_and_dark() {
        assert_eq!(next_theme(None), Some("dark"));
        assert_eq!(next_theme(Some("dark")), None);
    }

    #[test]
    fn unknown_values_reset_to_dark() {
        assert_eq!(next_theme(Some("sepia")), Some("dark"));
    }
}
