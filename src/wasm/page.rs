use web_sys::{Element, HtmlElement};

use crate::fallback::Page;

/// The background's DOM elements. Either may be missing from the page.
pub struct DomPage {
    pub canvas: Option<HtmlElement>,
    pub fallback: Option<Element>,
    pub fallback_class: String,
}

impl Page for DomPage {
    fn activate_fallback(&self) {
        match &self.fallback {
            Some(fallback) => {
                if let Err(err) = fallback.class_list().add_1(&self.fallback_class) {
                    log::error!("failed to activate fallback background: {err:?}");
                }
            }
            None => log::error!("no fallback background element on the page"),
        }
    }

    fn hide_canvas(&self) {
        if let Some(canvas) = &self.canvas {
            if let Err(err) = canvas.style().set_property("display", "none") {
                log::error!("failed to hide background canvas: {err:?}");
            }
        }
    }
}
