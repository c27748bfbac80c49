//! Browser bindings.
//!
//! `WebSurface` turns virtual nodes into real elements and routes their
//! events back into the shared `OverlayController`. Closures only hold a
//! `Weak` to the controller; the strong reference lives in `APP` for the
//! lifetime of the page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::{debug, error, info, warn};
use url::Url;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, KeyboardEvent, Window};

use crate::config::SiteConfig;
use crate::dom::{Element, Node};
use crate::loader::{self, HttpFetcher};
use crate::logging;
use crate::models::{Certificate, Project, Record};
use crate::overlay::{OverlayController, OverlayId, ViewerSettings};
use crate::page::{self, Section, SectionKind};
use crate::render::{Card, RenderContext};
use crate::scroll::{is_revealed, HeaderState, HeaderTracker, HEADER_HIDDEN_CLASS, REVEALED_CLASS};
use crate::surface::{Surface, SurfaceError};

type Listener = Closure<dyn FnMut(Event)>;
type Controller = OverlayController<WebSurface>;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<Controller>>>> = const { RefCell::new(None) };
}

fn js_error(err: JsValue) -> SurfaceError {
    SurfaceError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Run `f` against the controller if it is still alive and not already
/// borrowed by the code that raised the event.
fn with_controller(link: &Weak<RefCell<Controller>>, f: impl FnOnce(&mut Controller)) {
    let Some(controller) = link.upgrade() else {
        return;
    };
    let Ok(mut controller) = controller.try_borrow_mut() else {
        warn!("Event arrived while the page was busy; ignored");
        return;
    };
    f(&mut controller);
}

struct MountedOverlay {
    element: web_sys::Element,
    listeners: Vec<Listener>,
}

pub struct WebSurface {
    window: Window,
    document: Document,
    controller: Weak<RefCell<Controller>>,
    containers: HashMap<String, Vec<Listener>>,
    overlays: HashMap<OverlayId, MountedOverlay>,
    escape: HashMap<OverlayId, Listener>,
    /// Listeners of torn-down overlays. The event that tore them down may
    /// still be running one of them, so they are dropped on the next mount.
    retired: Vec<Listener>,
}

impl WebSurface {
    fn new(window: Window, document: Document) -> Self {
        WebSurface {
            window,
            document,
            controller: Weak::new(),
            containers: HashMap::new(),
            overlays: HashMap::new(),
            escape: HashMap::new(),
            retired: Vec::new(),
        }
    }

    fn bind(&mut self, controller: Weak<RefCell<Controller>>) {
        self.controller = controller;
    }

    fn body(&self) -> Result<web_sys::HtmlElement, SurfaceError> {
        self.document
            .body()
            .ok_or_else(|| SurfaceError::Dom("document has no body".to_string()))
    }

    fn build(&self, node: &Node, listeners: &mut Vec<Listener>) -> Result<web_sys::Node, SurfaceError> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(el) => self.build_element(el, listeners).map(Into::into),
        }
    }

    fn build_element(
        &self,
        el: &Element,
        listeners: &mut Vec<Listener>,
    ) -> Result<web_sys::Element, SurfaceError> {
        let element = self.document.create_element(el.tag).map_err(js_error)?;
        for (name, value) in &el.attrs {
            element.set_attribute(name, value).map_err(js_error)?;
        }
        for child in &el.children {
            let child = self.build(child, listeners)?;
            element.append_child(&child).map_err(js_error)?;
        }

        if let Some(action) = &el.on_click {
            let action = action.clone();
            let link = self.controller.clone();
            let listener = Closure::wrap(Box::new(move |event: Event| {
                event.stop_propagation();
                with_controller(&link, |c| {
                    if let Err(e) = c.dispatch(&action) {
                        error!("Click action failed: {}", e);
                    }
                });
            }) as Box<dyn FnMut(Event)>);
            element
                .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
                .map_err(js_error)?;
            listeners.push(listener);
        }

        if let Some(fallback) = &el.fallback_src {
            let fallback = fallback.clone();
            let img = element.clone();
            let listener = Closure::wrap(Box::new(move |_: Event| {
                // Only once: a broken placeholder must not loop.
                if img.get_attribute("src").as_deref() != Some(fallback.as_str()) {
                    if let Err(e) = img.set_attribute("src", &fallback) {
                        debug!("Could not swap in fallback image: {:?}", e);
                    }
                }
            }) as Box<dyn FnMut(Event)>);
            element
                .add_event_listener_with_callback("error", listener.as_ref().unchecked_ref())
                .map_err(js_error)?;
            listeners.push(listener);
        }

        Ok(element)
    }
}

impl Surface for WebSurface {
    fn replace_contents(&mut self, container: &str, nodes: Vec<Node>) -> Result<(), SurfaceError> {
        let target = self
            .document
            .get_element_by_id(container)
            .ok_or_else(|| SurfaceError::MissingContainer(container.to_string()))?;

        let mut listeners = Vec::new();
        let fragment = self.document.create_document_fragment();
        for node in &nodes {
            let built = self.build(node, &mut listeners)?;
            fragment.append_child(&built).map_err(js_error)?;
        }
        target.set_inner_html("");
        target.append_child(&fragment).map_err(js_error)?;
        self.containers.insert(container.to_string(), listeners);
        Ok(())
    }

    fn mount_overlay(&mut self, id: OverlayId, view: Element) -> Result<(), SurfaceError> {
        self.retired.clear();
        let mut listeners = Vec::new();
        let element = self.build_element(&view, &mut listeners)?;
        self.body()?.append_child(&element).map_err(js_error)?;
        self.overlays.insert(id, MountedOverlay { element, listeners });
        Ok(())
    }

    fn unmount_overlay(&mut self, id: OverlayId) {
        if let Some(mounted) = self.overlays.remove(&id) {
            mounted.element.remove();
            self.retired.extend(mounted.listeners);
        }
    }

    fn listen_escape(&mut self, id: OverlayId) -> Result<(), SurfaceError> {
        let link = self.controller.clone();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            with_controller(&link, |c| {
                c.handle_key(id, &key);
            });
        }) as Box<dyn FnMut(Event)>);
        self.document
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            .map_err(js_error)?;
        self.escape.insert(id, listener);
        Ok(())
    }

    fn unlisten_escape(&mut self, id: OverlayId) {
        if let Some(listener) = self.escape.remove(&id) {
            if let Err(e) = self
                .document
                .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            {
                debug!("Could not remove Escape listener of {}: {:?}", id, e);
            }
            self.retired.push(listener);
        }
    }

    fn open_external(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.window
            .open_with_url_and_target(url, "_blank")
            .map_err(js_error)?;
        Ok(())
    }

    fn lock_scroll(&mut self, locked: bool) {
        let Ok(body) = self.body() else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = result {
            warn!("Could not toggle scroll lock: {:?}", e);
        }
    }
}

/// Add the revealed class to every reveal target that is on screen.
fn reveal(window: &Window, document: &Document, selector: &str, offset: f64) {
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let Ok(targets) = document.query_selector_all(selector) else {
        return;
    };
    for i in 0..targets.length() {
        let Some(el) = targets
            .item(i)
            .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        if is_revealed(el.get_bounding_client_rect().top(), height, offset) {
            if let Err(e) = el.class_list().add_1(REVEALED_CLASS) {
                debug!("Could not reveal element: {:?}", e);
            }
        }
    }
}

fn install_scroll_effects(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
) -> Result<(), JsValue> {
    let header = document.query_selector("header")?;
    let selector = format!(".{}", config.reveal_class);
    let offset = config.reveal_offset;
    let mut tracker = HeaderTracker::new(config.header_hide_after);

    reveal(window, document, &selector, offset);

    let (win, doc) = (window.clone(), document.clone());
    let listener = Closure::wrap(Box::new(move |_: Event| {
        let y = win.scroll_y().unwrap_or(0.0);
        if let Some(header) = &header {
            let classes = header.class_list();
            let toggled = match tracker.update(y) {
                HeaderState::Hidden => classes.add_1(HEADER_HIDDEN_CLASS),
                HeaderState::Shown => classes.remove_1(HEADER_HIDDEN_CLASS),
            };
            if let Err(e) = toggled {
                debug!("Could not toggle header class: {:?}", e);
            }
        }
        reveal(&win, &doc, &selector, offset);
    }) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref())?;
    // Lives as long as the page.
    listener.forget();
    Ok(())
}

async fn load_section<T: Record + Card>(
    controller: Rc<RefCell<Controller>>,
    fetcher: Rc<HttpFetcher>,
    config: Rc<SiteConfig>,
    kind: SectionKind,
) {
    let section = Section::of(kind, &config);
    let outcome = loader::load::<T, _>(&*fetcher, section.url).await;
    let ctx = RenderContext::from_config(&config);
    let Ok(mut controller) = controller.try_borrow_mut() else {
        error!("Could not render {}: page busy", T::KIND);
        return;
    };
    if let Err(e) = page::present(controller.surface_mut(), &section, outcome, &ctx) {
        error!("Could not render {} into #{}: {}", T::KIND, section.container, e);
    }
}

fn boot(window: Window, document: Document, config: Rc<SiteConfig>) -> Result<(), JsValue> {
    let base = window
        .location()
        .href()
        .ok()
        .and_then(|href| Url::parse(&href).ok());
    let settings = ViewerSettings::from_config(&config, base.clone())
        .map_err(|e| JsValue::from_str(&format!("bad document_viewer URL: {}", e)))?;

    let controller = Rc::new(RefCell::new(OverlayController::new(
        WebSurface::new(window.clone(), document.clone()),
        settings,
    )));
    controller
        .borrow_mut()
        .surface_mut()
        .bind(Rc::downgrade(&controller));
    APP.with(|app| *app.borrow_mut() = Some(controller.clone()));

    if let Err(e) = install_scroll_effects(&window, &document, &config) {
        warn!("Scroll effects disabled: {:?}", e);
    }

    // Independent loads; whichever finishes first renders first.
    let fetcher = Rc::new(HttpFetcher::new(base));
    spawn_local(load_section::<Project>(
        controller.clone(),
        fetcher.clone(),
        config.clone(),
        SectionKind::Projects,
    ));
    spawn_local(load_section::<Certificate>(
        controller,
        fetcher,
        config,
        SectionKind::Certificates,
    ));
    info!("Portfolio page started");
    Ok(())
}

/// Entry point called by the page. `config` may be `undefined`, `null`, or a
/// partial `SiteConfig` object.
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config: SiteConfig = if config.is_undefined() || config.is_null() {
        SiteConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    logging::init(config.log_level());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = Rc::new(config);

    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        let ready = Closure::once_into_js(move |_: Event| {
            if let Err(e) = boot(w, d, config) {
                error!("Startup failed: {:?}", e);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
        Ok(())
    } else {
        boot(window, document, config)
    }
}
