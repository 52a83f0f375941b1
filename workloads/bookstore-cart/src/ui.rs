//! The display surface the widget drives.
//!
//! [`UiPort`] is the narrow slice of the DOM the cart needs. The browser
//! implementation lives in `dom`; tests drive the widget through an
//! in-memory implementation.

use std::rc::Rc;
use std::time::Duration;

/// Handler for a plain event (click, modal hidden).
pub type Callback = Rc<dyn Fn()>;

/// Handler for a document-level key press; receives the key name
/// (e.g. `"Enter"`).
pub type KeyCallback = Rc<dyn Fn(&str)>;

/// Abstract UI surface.
///
/// Lookups return `None`/empty when elements are missing; that is an
/// expected state on pages without the corresponding region. Mutations on
/// an element the page has since dropped are silently ignored.
pub trait UiPort {
    /// Handle to a displayed element.
    type Element: Clone + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All elements matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// First descendant of `root` matching a selector.
    fn query_in(&self, root: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// All descendants of `root` matching a selector.
    fn query_all_in(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    /// Resolved URL of an image, as the page would load it; `None` when the
    /// image has no source.
    fn image_source(&self, el: &Self::Element) -> Option<String>;

    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;

    fn set_text(&self, el: &Self::Element, text: &str);

    /// Replace the element's children with parsed markup.
    fn set_inner_html(&self, el: &Self::Element, html: &str);

    /// Set an inline style property; an empty value clears it.
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);

    /// Run `callback` whenever `event` fires on `el`.
    fn on(&self, el: &Self::Element, event: &str, callback: Callback);

    /// Run `callback` for every key press on the document.
    fn on_document_key(&self, callback: KeyCallback);

    /// The focused element, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Blocking notice the user must acknowledge.
    fn alert(&self, message: &str);

    /// Navigate the page to `path`.
    fn navigate(&self, path: &str);

    /// Run `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);

    /// Show `el` through the page's modal library.
    ///
    /// Returns `false` when no modal library is loaded, leaving the caller
    /// to fall back to plain styling.
    fn show_modal(&self, el: &Self::Element) -> bool;

    /// Hide `el` through the page's modal library; `false` if unavailable.
    fn hide_modal(&self, el: &Self::Element) -> bool;
}
