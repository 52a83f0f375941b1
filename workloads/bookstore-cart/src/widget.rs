//! Page wiring: store calls, rendering and event handlers.

use std::rc::Rc;
use std::time::Duration;

use bookcart_cache::{CacheError, MemoryStorage, Storage};
use bookcart_commerce::catalog::{self, BookListing, ListingAttributes};
use bookcart_commerce::{BookId, CartStore, CommerceError, NewCartItem};
use bookcart_observability::StructuredLogger;

use crate::config::{class_selector, WidgetConfig};
use crate::render;
use crate::ui::UiPort;

/// Storage for the widget: the opened backend, or an in-memory map for
/// this page view when the browser refuses storage. The page keeps working;
/// the cart just does not outlive it.
pub fn storage_or_memory<S: Storage + 'static>(
    opened: Result<S, CacheError>,
    logger: &StructuredLogger,
) -> Rc<dyn Storage> {
    match opened {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            logger
                .error_builder("local storage unavailable; cart will not persist")
                .error(&e)
                .emit();
            Rc::new(MemoryStorage::new())
        }
    }
}

/// The cart widget for one page.
///
/// Owns the store and the UI port. Handlers registered on the port hold
/// clones of the `Rc`, so the widget lives as long as the page's listeners.
pub struct Widget<U, S> {
    pub(crate) ui: U,
    pub(crate) store: CartStore<S>,
    pub(crate) config: WidgetConfig,
    pub(crate) logger: StructuredLogger,
}

impl<U, S> Widget<U, S>
where
    U: UiPort + 'static,
    S: Storage + 'static,
{
    /// Create a widget; call [`Widget::init`] once the page has loaded.
    pub fn new(ui: U, storage: S, config: WidgetConfig, logger: StructuredLogger) -> Rc<Self> {
        let store = CartStore::new(storage, logger.for_component("cart"))
            .with_key(config.storage_key.clone());
        Rc::new(Self {
            ui,
            store,
            config,
            logger,
        })
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Page-load initialization. Every step is a no-op on pages without
    /// its elements, so this runs unconditionally everywhere.
    pub fn init(self: &Rc<Self>) {
        self.complete_order();
        self.render_cart_badge();
        self.render_prices_on_page();
        self.attach_add_to_cart_buttons();
        self.render_cart_page();
        self.attach_modal();
        self.logger.debug("cart widget initialized");
    }

    /// Add a book, notifying the user if it is already in the cart.
    ///
    /// Returns whether the cart changed.
    pub fn add_to_cart(&self, item: NewCartItem) -> bool {
        match self.store.add_to_cart(item) {
            Ok(_) => {
                self.render_cart_badge();
                true
            }
            Err(CommerceError::AlreadyInCart(_)) => {
                self.ui.alert(&self.config.text.duplicate_notice);
                false
            }
            Err(e) => {
                self.logger
                    .error_builder("failed to save cart")
                    .error(&e)
                    .emit();
                false
            }
        }
    }

    /// Remove a book; removing an absent id is a no-op.
    pub fn remove_from_cart(&self, id: BookId) {
        match self.store.remove_from_cart(id) {
            Ok(_) => self.render_cart_badge(),
            Err(e) => self
                .logger
                .error_builder("failed to save cart")
                .field_u64("id", id.get())
                .error(&e)
                .emit(),
        }
    }

    /// On the order confirmation page the purchase is done: empty the cart.
    pub fn complete_order(&self) {
        if self
            .ui
            .element_by_id(&self.config.dom.order_complete_id)
            .is_none()
        {
            return;
        }

        match self.store.clear_cart() {
            Ok(()) => {
                self.logger.info("order complete; cart cleared");
                self.render_cart_badge();
            }
            Err(e) => self
                .logger
                .error_builder("failed to clear cart")
                .error(&e)
                .emit(),
        }
    }

    /// Write the item count into the badge, if the page has one.
    pub fn render_cart_badge(&self) {
        if let Some(badge) = self.ui.element_by_id(&self.config.dom.badge_id) {
            let count = self.store.item_count();
            self.ui.set_text(&badge, &count.to_string());
        }
    }

    /// Format every kobo-priced element on the page.
    pub fn render_prices_on_page(&self) {
        let dom = &self.config.dom;
        for el in self.ui.query_all(&dom.price_selector()) {
            let raw = self.ui.attribute(&el, &dom.price_attribute);
            let price = catalog::display_price(raw.as_deref());
            self.ui.set_text(&el, &price.display_amount());
        }
    }

    /// Render the cart table into the cart root, then bind its buttons.
    pub fn render_cart_page(self: &Rc<Self>) {
        let dom = &self.config.dom;
        let Some(root) = self.ui.element_by_id(&dom.cart_root_id) else {
            return;
        };

        let cart = self.store.get_cart();
        if cart.is_empty() {
            self.ui
                .set_inner_html(&root, &render::empty_cart_html(&self.config));
            return;
        }

        let total = match cart.total() {
            Ok(total) => total,
            Err(e) => {
                self.logger
                    .error_builder("cannot total cart")
                    .error(&e)
                    .emit();
                return;
            }
        };
        self.ui
            .set_inner_html(&root, &render::cart_table_html(&cart, total, &self.config));

        for button in self
            .ui
            .query_all_in(&root, &class_selector(&dom.remove_button_class))
        {
            let raw = self.ui.attribute(&button, "data-id").unwrap_or_default();
            let Ok(id) = raw.parse::<BookId>() else {
                self.logger
                    .warn_builder("remove button without a book id")
                    .field("data-id", raw)
                    .emit();
                continue;
            };

            let this = Rc::clone(self);
            self.ui.on(
                &button,
                "click",
                Rc::new(move || {
                    this.remove_from_cart(id);
                    this.render_cart_page();
                }),
            );
        }

        if let Some(checkout) = self.ui.element_by_id(&dom.checkout_button_id) {
            let this = Rc::clone(self);
            self.ui.on(
                &checkout,
                "click",
                Rc::new(move || this.ui.navigate(&this.config.checkout_path)),
            );
        }
    }

    /// Bind the add-to-cart button inside every catalog card.
    pub fn attach_add_to_cart_buttons(self: &Rc<Self>) {
        let dom = &self.config.dom;
        for card in self.ui.query_all(&class_selector(&dom.card_class)) {
            let Some(button) = self
                .ui
                .query_in(&card, &class_selector(&dom.add_button_class))
            else {
                continue;
            };

            let this = Rc::clone(self);
            let target = button.clone();
            self.ui.on(
                &button,
                "click",
                Rc::new(move || this.on_add_clicked(&card, &target)),
            );
        }
    }

    fn on_add_clicked(self: &Rc<Self>, card: &U::Element, button: &U::Element) {
        if let Some(listing) = self.read_listing(card) {
            self.add_to_cart(listing.into());
        }

        // Feedback is shown whether or not the add went through.
        let text = &self.config.text;
        self.ui.set_text(button, &text.added_label);

        let this = Rc::clone(self);
        let button = button.clone();
        self.ui.set_timeout(
            Duration::from_millis(self.config.feedback_ms),
            Box::new(move || this.ui.set_text(&button, &this.config.text.add_label)),
        );
    }

    /// Read and validate a catalog card's data attributes.
    ///
    /// Invalid cards are logged and yield `None`.
    pub(crate) fn read_listing(&self, card: &U::Element) -> Option<BookListing> {
        let id = self.ui.attribute(card, "data-id");
        let title = self.ui.attribute(card, "data-title");
        let price = self.ui.attribute(card, "data-price-kobo");
        let author = self.ui.attribute(card, "data-author");
        let cover = self
            .ui
            .query_in(card, &class_selector(&self.config.dom.cover_class))
            .and_then(|img| self.ui.image_source(&img));

        let attrs = ListingAttributes {
            id: id.as_deref(),
            title: title.as_deref(),
            price_kobo: price.as_deref(),
            author: author.as_deref(),
            cover: cover.as_deref(),
        };
        self.validated(attrs)
    }

    pub(crate) fn validated(&self, attrs: ListingAttributes<'_>) -> Option<BookListing> {
        match BookListing::from_attributes(attrs) {
            Ok(listing) => Some(listing),
            Err(e) => {
                self.logger
                    .warn_builder("ignoring book with invalid data")
                    .error(&e)
                    .emit();
                None
            }
        }
    }
}
