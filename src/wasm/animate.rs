//! Page animations through the page's global `gsap` object.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, Window};

use crate::animations::{
    wire, AnimationEngine, Hover, PageAnimations, Reveal, ScrollTrigger, TriggerTarget, Tween,
    WireReport,
};
use crate::error::AnimationError;

fn js_err(err: JsValue) -> AnimationError {
    AnimationError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Look up a global, treating `undefined` and `null` as absent.
fn global(window: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn set(target: &Object, key: &str, value: impl Into<JsValue>) -> Result<(), AnimationError> {
    Reflect::set(target, &JsValue::from_str(key), &value.into())
        .map(|_| ())
        .map_err(js_err)
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, AnimationError> {
    let list = document.query_selector_all(selector).map_err(js_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub struct Gsap {
    gsap: JsValue,
    document: Document,
    scroll_trigger: bool,
}

impl Gsap {
    /// `None` when the page did not load the animation library.
    pub fn detect(window: &Window) -> Option<Self> {
        let gsap = global(window, "gsap")?;
        let document = window.document()?;

        let scroll_trigger = match global(window, "ScrollTrigger") {
            Some(plugin) => {
                let registered = Self::method(&gsap, "registerPlugin")
                    .and_then(|register| register.call1(&gsap, &plugin).map_err(js_err));
                if let Err(err) = &registered {
                    log::warn!("ScrollTrigger not registered: {err}");
                }
                registered.is_ok()
            }
            None => {
                log::warn!("ScrollTrigger plugin not loaded; scroll reveals play immediately");
                false
            }
        };

        Some(Self {
            gsap,
            document,
            scroll_trigger,
        })
    }

    fn method(gsap: &JsValue, name: &str) -> Result<Function, AnimationError> {
        Reflect::get(gsap, &JsValue::from_str(name))
            .map_err(js_err)?
            .dyn_into::<Function>()
            .map_err(|_| AnimationError::Js(format!("gsap.{name} is not a function")))
    }

    /// Build the engine's vars object for `tween`. `trigger` overrides the
    /// scroll trigger element for per-element reveals.
    fn vars(&self, tween: &Tween, trigger: Option<&Element>) -> Result<Object, AnimationError> {
        let vars = Object::new();
        for (key, value) in [
            ("opacity", tween.opacity),
            ("x", tween.x),
            ("y", tween.y),
            ("scale", tween.scale),
        ] {
            if let Some(value) = value {
                set(&vars, key, value)?;
            }
        }
        set(&vars, "duration", tween.duration)?;
        set(&vars, "delay", tween.delay)?;
        if tween.stagger > 0.0 {
            set(&vars, "stagger", tween.stagger)?;
        }
        set(&vars, "ease", tween.ease.name())?;

        if let (Some(scroll), true) = (&tween.scroll_trigger, self.scroll_trigger) {
            set(&vars, "scrollTrigger", self.scroll_vars(scroll, trigger)?)?;
        }
        Ok(vars)
    }

    fn scroll_vars(
        &self,
        scroll: &ScrollTrigger,
        element: Option<&Element>,
    ) -> Result<Object, AnimationError> {
        let vars = Object::new();
        match (&scroll.target, element) {
            (TriggerTarget::Selector(selector), _) => set(&vars, "trigger", selector.as_str())?,
            (TriggerTarget::Each, Some(element)) => set(&vars, "trigger", element.clone())?,
            (TriggerTarget::Each, None) => {}
        }
        set(&vars, "start", scroll.start.as_str())?;
        set(&vars, "toggleActions", scroll.toggle_actions.as_str())?;
        Ok(vars)
    }

    fn call(&self, name: &str, target: &JsValue, vars: &Object) -> Result<(), AnimationError> {
        Self::method(&self.gsap, name)?
            .call2(&self.gsap, target, vars)
            .map(|_| ())
            .map_err(js_err)
    }
}

impl AnimationEngine for Gsap {
    fn reveal(&self, reveal: &Reveal) -> Result<(), AnimationError> {
        let per_element = matches!(
            reveal.from.scroll_trigger,
            Some(ScrollTrigger {
                target: TriggerTarget::Each,
                ..
            })
        );
        if !per_element {
            let vars = self.vars(&reveal.from, None)?;
            return self.call("from", &JsValue::from_str(&reveal.selector), &vars);
        }

        let targets = elements(&self.document, &reveal.selector)?;
        if targets.is_empty() {
            return Err(AnimationError::NoTargets(reveal.selector.clone()));
        }
        for element in &targets {
            let vars = self.vars(&reveal.from, Some(element))?;
            self.call("from", element, &vars)?;
        }
        Ok(())
    }

    fn hover(&self, hover: &Hover) -> Result<(), AnimationError> {
        let targets = elements(&self.document, &hover.selector)?;
        if targets.is_empty() {
            return Err(AnimationError::NoTargets(hover.selector.clone()));
        }
        let to = Self::method(&self.gsap, "to")?;

        for element in targets {
            for (event, tween) in [("mouseenter", &hover.enter), ("mouseleave", &hover.leave)] {
                let vars = self.vars(tween, None)?;
                let (to, gsap, target) = (to.clone(), self.gsap.clone(), element.clone());
                let listener = Closure::wrap(Box::new(move || {
                    if let Err(err) = to.call2(&gsap, &target, &vars) {
                        log::debug!("hover tween failed: {err:?}");
                    }
                }) as Box<dyn FnMut()>);
                element
                    .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                    .map_err(js_err)?;
                listener.forget();
            }
        }
        Ok(())
    }

    fn smooth_scroll(&self, anchors: &str) -> Result<(), AnimationError> {
        for link in elements(&self.document, anchors)? {
            let Some(href) = link.get_attribute("href") else {
                continue;
            };
            // a bare "#" has no target
            if href.len() < 2 {
                continue;
            }
            let document = self.document.clone();
            let listener = Closure::wrap(Box::new(move |event: Event| {
                if let Ok(Some(target)) = document.query_selector(&href) {
                    event.prevent_default();
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }) as Box<dyn FnMut(Event)>);
            link.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
                .map_err(js_err)?;
            listener.forget();
        }
        Ok(())
    }
}

/// Wire `animations` once the document has been parsed.
pub fn on_ready(window: &Window, animations: PageAnimations) -> Result<(), JsValue> {
    let document = window.document().ok_or("no document")?;
    if document.ready_state() != "loading" {
        run(window, &animations);
        return Ok(());
    }

    let listener = Closure::wrap(Box::new(move || {
        if let Some(window) = web_sys::window() {
            run(&window, &animations);
        }
    }) as Box<dyn FnMut()>);
    document
        .add_event_listener_with_callback("DOMContentLoaded", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn run(window: &Window, animations: &PageAnimations) -> WireReport {
    let engine = Gsap::detect(window);
    wire(engine.as_ref(), animations)
}
