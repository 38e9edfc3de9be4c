use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Document, Element, Window};

use crate::{
    error::ToggleError,
    toggle::{BackToTop, ClassList, SELECTOR},
};

impl From<ToggleError> for JsValue {
    fn from(err: ToggleError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl ClassList for Element {
    type Error = JsValue;

    fn add_class(&self, class: &str) -> Result<(), JsValue> {
        self.class_list().add_1(class)
    }

    fn remove_class(&self, class: &str) -> Result<(), JsValue> {
        self.class_list().remove_1(class)
    }
}

/// Runs on module load. Listeners stay registered for the life of the page.
#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn install() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(ToggleError::NoWindow)?;
    let document = window.document().ok_or(ToggleError::NoDocument)?;
    bind(&window, document)?;
    debug!(selector = SELECTOR, "back-to-top listeners installed");
    Ok(())
}

fn bind(window: &Window, document: Document) -> Result<Rc<BackToTop<Element>>, JsValue> {
    let element = document
        .query_selector(SELECTOR)?
        .ok_or(ToggleError::ElementNotFound { selector: SELECTOR })?;
    let toggle = Rc::new(BackToTop::new(element));

    let on_scroll = {
        let toggle = toggle.clone();
        let window = window.clone();
        Closure::<dyn FnMut() -> Result<(), JsValue>>::new(move || {
            let scrolled = window.page_y_offset()?;
            let position = document
                .document_element()
                .ok_or(ToggleError::NoDocumentElement)?
                .client_height();
            toggle.on_scroll(scrolled, f64::from(position))?;
            Ok(())
        })
    };
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    let on_click = {
        let toggle = toggle.clone();
        Closure::<dyn FnMut() -> Result<(), JsValue>>::new(move || toggle.on_click())
    };
    toggle
        .target()
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(toggle)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;
    use web_sys::Event;

    use super::*;
    use crate::toggle::ACTIVE_CLASS;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> (Window, Document) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        (window, document)
    }

    #[wasm_bindgen_test]
    fn missing_link_is_an_error() {
        let (window, _) = page();
        let empty = Document::new().unwrap();

        let err = match bind(&window, empty) {
            Ok(_) => panic!("bound without a link"),
            Err(err) => err,
        };
        assert_eq!(
            err.as_string(),
            Some(ToggleError::ElementNotFound { selector: SELECTOR }.to_string()),
        );
    }

    #[wasm_bindgen_test]
    fn click_and_short_scroll_clear_active() {
        let (window, document) = page();
        let link = document.create_element("a").unwrap();
        link.set_class_name("back-to-the-top");
        document.body().unwrap().append_child(&link).unwrap();

        bind(&window, document).unwrap();

        link.class_list().add_1(ACTIVE_CLASS).unwrap();
        link.dispatch_event(&Event::new("click").unwrap()).unwrap();
        assert!(!link.class_list().contains(ACTIVE_CLASS));

        // the test page never scrolls past one viewport
        link.class_list().add_1(ACTIVE_CLASS).unwrap();
        window.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
        assert!(!link.class_list().contains(ACTIVE_CLASS));

        link.remove();
    }

    #[wasm_bindgen_test]
    fn element_class_list_toggles_active() {
        let (_, document) = page();
        let element = document.create_element("a").unwrap();

        element.add_class(ACTIVE_CLASS).unwrap();
        assert!(element.class_list().contains(ACTIVE_CLASS));

        element.remove_class(ACTIVE_CLASS).unwrap();
        assert!(!element.class_list().contains(ACTIVE_CLASS));
    }
}
