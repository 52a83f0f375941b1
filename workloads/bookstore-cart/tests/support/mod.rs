//! In-memory page for driving the widget in tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use bookcart_cache::MemoryStorage;
use bookcart_observability::{LogLevel, MemorySink};
use bookstore_cart::{Callback, KeyCallback, UiPort, Widget, WidgetConfig};

pub type El = usize;

/// Origin the fake page is served from.
pub const PAGE_ORIGIN: &str = "https://books.example";
pub type TestWidget = Rc<Widget<FakeUi, MemoryStorage>>;

#[derive(Default)]
struct Node {
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    html: String,
    parent: Option<El>,
    children: Vec<El>,
    alive: bool,
    listeners: Vec<(String, Callback)>,
}

#[derive(Default)]
struct State {
    nodes: Vec<Node>,
    key_listeners: Vec<KeyCallback>,
    active: Option<El>,
    alerts: Vec<String>,
    navigations: Vec<String>,
    timers: Vec<(Duration, Box<dyn FnOnce()>)>,
    modal_library: bool,
    modal_calls: Vec<String>,
}

/// A fake page. Clones share state.
#[derive(Clone, Default)]
pub struct FakeUi {
    state: Rc<RefCell<State>>,
}

fn parse_selector(selector: &str) -> (String, Option<String>) {
    let body = selector.trim_start_matches('.');
    match body.split_once('[') {
        Some((class, attr)) => (class.to_string(), Some(attr.trim_end_matches(']').to_string())),
        None => (body.to_string(), None),
    }
}

/// Attributes of every start tag in `html` that carries an id or class.
fn scan_tags(html: &str) -> Vec<BTreeMap<String, String>> {
    let mut tags = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        let Some(end) = rest.find('>') else { break };
        let tag = &rest[..end];
        rest = &rest[end + 1..];
        if tag.starts_with('/') {
            continue;
        }

        let mut attrs = BTreeMap::new();
        let mut body = tag;
        while let Some(eq) = body.find("=\"") {
            let name = body[..eq].rsplit(' ').next().unwrap_or_default().to_string();
            let after = &body[eq + 2..];
            let Some(close) = after.find('"') else { break };
            attrs.insert(name, after[..close].to_string());
            body = &after[close + 1..];
        }
        if attrs.contains_key("id") || attrs.contains_key("class") {
            tags.push(attrs);
        }
    }
    tags
}

impl FakeUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `bootstrap.Modal` available.
    pub fn with_modal_library(self) -> Self {
        self.state.borrow_mut().modal_library = true;
        self
    }

    /// Append an element.
    pub fn add(&self, parent: Option<El>, id: Option<&str>, classes: &[&str], attrs: &[(&str, &str)]) -> El {
        let mut state = self.state.borrow_mut();
        let el = state.nodes.len();
        state.nodes.push(Node {
            id: id.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent,
            alive: true,
            ..Default::default()
        });
        if let Some(p) = parent {
            state.nodes[p].children.push(el);
        }
        el
    }

    pub fn by_id(&self, id: &str) -> Option<El> {
        self.element_by_id(id)
    }

    pub fn text(&self, el: El) -> String {
        self.state.borrow().nodes[el].text.clone()
    }

    pub fn html(&self, el: El) -> String {
        self.state.borrow().nodes[el].html.clone()
    }

    pub fn attr(&self, el: El, name: &str) -> Option<String> {
        self.attribute(&el, name)
    }

    pub fn style(&self, el: El, property: &str) -> Option<String> {
        self.state.borrow().nodes[el].style.get(property).cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }

    pub fn modal_calls(&self) -> Vec<String> {
        self.state.borrow().modal_calls.clone()
    }

    pub fn pending_timers(&self) -> Vec<Duration> {
        self.state.borrow().timers.iter().map(|(d, _)| *d).collect()
    }

    pub fn listener_count(&self, el: El, event: &str) -> usize {
        self.state.borrow().nodes[el]
            .listeners
            .iter()
            .filter(|(e, _)| e == event)
            .count()
    }

    pub fn focus(&self, el: El) {
        self.state.borrow_mut().active = Some(el);
    }

    pub fn fire(&self, el: El, event: &str) {
        let callbacks: Vec<Callback> = {
            let state = self.state.borrow();
            let node = &state.nodes[el];
            if !node.alive {
                return;
            }
            node.listeners
                .iter()
                .filter(|(e, _)| e == event)
                .map(|(_, cb)| Rc::clone(cb))
                .collect()
        };
        for cb in callbacks {
            cb();
        }
    }

    pub fn click(&self, el: El) {
        self.fire(el, "click");
    }

    pub fn press_key(&self, key: &str) {
        let callbacks: Vec<KeyCallback> = self.state.borrow().key_listeners.clone();
        for cb in callbacks {
            cb(key);
        }
    }

    /// Run every pending timer, in scheduling order.
    pub fn run_timers(&self) {
        let timers = std::mem::take(&mut self.state.borrow_mut().timers);
        for (_, task) in timers {
            task();
        }
    }

    /// Elements created by the last `set_inner_html` on `root` with `class`.
    pub fn rendered(&self, root: El, class: &str) -> Vec<El> {
        self.query_all_in(&root, &format!(".{}", class))
    }

    fn matches(node: &Node, class: &str, attr: &Option<String>) -> bool {
        node.alive
            && node.classes.iter().any(|c| c == class)
            && attr.as_ref().map_or(true, |a| node.attrs.contains_key(a))
    }

    fn descendants(state: &State, root: El, out: &mut Vec<El>) {
        for &child in &state.nodes[root].children {
            out.push(child);
            Self::descendants(state, child, out);
        }
    }

    fn kill_children(state: &mut State, root: El) {
        let mut doomed = Vec::new();
        Self::descendants(state, root, &mut doomed);
        for el in doomed {
            state.nodes[el].alive = false;
        }
        state.nodes[root].children.clear();
    }
}

impl UiPort for FakeUi {
    type Element = El;

    fn element_by_id(&self, id: &str) -> Option<El> {
        let state = self.state.borrow();
        state
            .nodes
            .iter()
            .position(|n| n.alive && n.id.as_deref() == Some(id))
    }

    fn query_all(&self, selector: &str) -> Vec<El> {
        let (class, attr) = parse_selector(selector);
        let state = self.state.borrow();
        (0..state.nodes.len())
            .filter(|&i| Self::matches(&state.nodes[i], &class, &attr))
            .collect()
    }

    fn query_in(&self, root: &El, selector: &str) -> Option<El> {
        self.query_all_in(root, selector).into_iter().next()
    }

    fn query_all_in(&self, root: &El, selector: &str) -> Vec<El> {
        let (class, attr) = parse_selector(selector);
        let state = self.state.borrow();
        let mut all = Vec::new();
        Self::descendants(&state, *root, &mut all);
        all.into_iter()
            .filter(|&i| Self::matches(&state.nodes[i], &class, &attr))
            .collect()
    }

    fn attribute(&self, el: &El, name: &str) -> Option<String> {
        let state = self.state.borrow();
        let node = &state.nodes[*el];
        match name {
            "id" => node.id.clone(),
            _ => node.attrs.get(name).cloned(),
        }
    }

    fn image_source(&self, el: &El) -> Option<String> {
        let src = self.attribute(el, "src").filter(|s| !s.is_empty())?;
        if src.contains("://") {
            Some(src)
        } else {
            Some(format!("{}/{}", PAGE_ORIGIN, src.trim_start_matches('/')))
        }
    }

    fn set_attribute(&self, el: &El, name: &str, value: &str) {
        self.state.borrow_mut().nodes[*el]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn has_class(&self, el: &El, class: &str) -> bool {
        self.state.borrow().nodes[*el]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn set_text(&self, el: &El, text: &str) {
        self.state.borrow_mut().nodes[*el].text = text.to_string();
    }

    fn set_inner_html(&self, el: &El, html: &str) {
        let tags = scan_tags(html);
        {
            let mut state = self.state.borrow_mut();
            Self::kill_children(&mut state, *el);
            state.nodes[*el].html = html.to_string();
        }
        for mut attrs in tags {
            let id = attrs.remove("id");
            let classes = attrs.remove("class").unwrap_or_default();
            let classes: Vec<&str> = classes.split_whitespace().collect();
            let pairs: Vec<(&str, &str)> = attrs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            self.add(Some(*el), id.as_deref(), &classes, &pairs);
        }
    }

    fn set_style(&self, el: &El, property: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let style = &mut state.nodes[*el].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn on(&self, el: &El, event: &str, callback: Callback) {
        self.state.borrow_mut().nodes[*el]
            .listeners
            .push((event.to_string(), callback));
    }

    fn on_document_key(&self, callback: KeyCallback) {
        self.state.borrow_mut().key_listeners.push(callback);
    }

    fn active_element(&self) -> Option<El> {
        self.state.borrow().active
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }

    fn navigate(&self, path: &str) {
        self.state.borrow_mut().navigations.push(path.to_string());
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        self.state.borrow_mut().timers.push((delay, callback));
    }

    fn show_modal(&self, _el: &El) -> bool {
        let mut state = self.state.borrow_mut();
        if state.modal_library {
            state.modal_calls.push("show".to_string());
        }
        state.modal_library
    }

    fn hide_modal(&self, _el: &El) -> bool {
        let mut state = self.state.borrow_mut();
        if state.modal_library {
            state.modal_calls.push("hide".to_string());
        }
        state.modal_library
    }
}

/// A catalog card and its buttons.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub card: El,
    pub add: El,
    pub details: El,
    pub cover: El,
}

/// The detail modal and its fields.
#[derive(Debug, Clone, Copy)]
pub struct Modal {
    pub root: El,
    pub title: El,
    pub author: El,
    pub price: El,
    pub cover: El,
    pub add: El,
}

impl FakeUi {
    pub fn badge(&self) -> El {
        self.add(None, Some("cart-badge"), &[], &[])
    }

    pub fn order_complete(&self) -> El {
        self.add(None, Some("order-complete"), &[], &[])
    }

    pub fn cart_root(&self) -> El {
        self.add(None, Some("cart-root"), &[], &[])
    }

    pub fn price_span(&self, kobo: &str) -> El {
        self.add(None, None, &["price-value"], &[("data-kobo", kobo)])
    }

    pub fn book_card(&self, id: &str, title: &str, price_kobo: &str, author: Option<&str>, cover: Option<&str>) -> Card {
        let mut attrs = vec![("data-id", id), ("data-title", title), ("data-price-kobo", price_kobo)];
        if let Some(author) = author {
            attrs.push(("data-author", author));
        }
        let card = self.add(None, None, &["book-card"], &attrs);
        let cover_attrs: Vec<(&str, &str)> = cover.map(|src| vec![("src", src)]).unwrap_or_default();
        let cover = self.add(Some(card), None, &["cover"], &cover_attrs);
        let add = self.add(Some(card), None, &["btn", "add-to-cart"], &[]);
        let details = self.add(Some(card), None, &["btn", "view-details"], &[]);
        Card { card, add, details, cover }
    }

    pub fn modal(&self) -> Modal {
        let root = self.add(None, Some("product-modal"), &["modal"], &[]);
        Modal {
            root,
            title: self.add(Some(root), Some("modal-title"), &[], &[]),
            author: self.add(Some(root), Some("modal-author"), &[], &[]),
            price: self.add(Some(root), Some("modal-price"), &[], &[]),
            cover: self.add(Some(root), Some("modal-cover-img"), &[], &[]),
            add: self.add(Some(root), Some("modal-add"), &[], &[]),
        }
    }
}

/// Widget over `ui` and `storage` with logs captured at debug level.
pub fn widget(ui: &FakeUi, storage: &MemoryStorage) -> (TestWidget, MemorySink) {
    let sink = MemorySink::new();
    let config = WidgetConfig::default();
    let logger = config
        .logger(sink.clone())
        .with_min_level(LogLevel::Debug);
    let widget = Widget::new(ui.clone(), storage.clone(), config, logger);
    (widget, sink)
}

pub const CART_KEY: &str = bookcart_commerce::cart::DEFAULT_CART_KEY;
