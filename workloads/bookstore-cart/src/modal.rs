//! Product detail modal.

use std::rc::Rc;

use bookcart_cache::Storage;
use bookcart_commerce::catalog::{BookListing, ListingAttributes};

use crate::config::class_selector;
use crate::ui::UiPort;
use crate::widget::Widget;

const KEY_ENTER: &str = "Enter";

impl<U, S> Widget<U, S>
where
    U: UiPort + 'static,
    S: Storage + 'static,
{
    /// Bind "view details", Enter on a focused card, the modal's own add
    /// button and its hidden event.
    pub fn attach_modal(self: &Rc<Self>) {
        let dom = &self.config.dom;
        let Some(modal) = self.ui.element_by_id(&dom.modal_id) else {
            self.logger
                .for_component("modal")
                .warn_builder("modal element not found")
                .field("id", dom.modal_id.as_str())
                .emit();
            return;
        };

        for card in self.ui.query_all(&class_selector(&dom.card_class)) {
            let Some(button) = self
                .ui
                .query_in(&card, &class_selector(&dom.details_button_class))
            else {
                continue;
            };

            let this = Rc::clone(self);
            self.ui
                .on(&button, "click", Rc::new(move || this.open_details(&card)));
        }

        let this = Rc::clone(self);
        self.ui.on_document_key(Rc::new(move |key: &str| {
            if key != KEY_ENTER {
                return;
            }
            if let Some(active) = this.ui.active_element() {
                if this.ui.has_class(&active, &this.config.dom.card_class) {
                    this.open_details(&active);
                }
            }
        }));

        if let Some(add) = self.ui.element_by_id(&dom.modal_add_id) {
            let this = Rc::clone(self);
            self.ui.on(&add, "click", Rc::new(move || this.modal_add()));
        }

        let this = Rc::clone(self);
        self.ui.on(
            &modal,
            &dom.modal_hidden_event,
            Rc::new(move || this.clear_modal_cover()),
        );
    }

    /// Populate the modal from a catalog card and open it.
    pub fn open_details(&self, card: &U::Element) {
        let Some(listing) = self.read_listing(card) else {
            return;
        };
        let Some(modal) = self.ui.element_by_id(&self.config.dom.modal_id) else {
            return;
        };

        self.populate_modal(&listing);
        if !self.ui.show_modal(&modal) {
            self.ui.set_style(&modal, "display", "block");
        }
    }

    /// Fill the modal's fields and stash the book on its add button.
    pub fn populate_modal(&self, listing: &BookListing) {
        let dom = &self.config.dom;

        if let Some(title) = self.ui.element_by_id(&dom.modal_title_id) {
            self.ui.set_text(&title, &listing.title);
        }
        if let Some(author) = self.ui.element_by_id(&dom.modal_author_id) {
            self.ui.set_text(&author, &listing.byline());
        }
        if let Some(price) = self.ui.element_by_id(&dom.modal_price_id) {
            self.ui.set_text(&price, &listing.price_kobo.display());
        }
        if let Some(cover) = self.ui.element_by_id(&dom.modal_cover_id) {
            match &listing.cover {
                Some(src) => {
                    let alt = if listing.title.is_empty() {
                        "cover"
                    } else {
                        listing.title.as_str()
                    };
                    self.ui.set_attribute(&cover, "src", src);
                    self.ui.set_attribute(&cover, "alt", alt);
                    self.ui.set_style(&cover, "display", "");
                }
                None => {
                    self.ui.set_attribute(&cover, "src", "");
                    self.ui.set_style(&cover, "display", "none");
                }
            }
        }
        if let Some(add) = self.ui.element_by_id(&dom.modal_add_id) {
            self.ui
                .set_attribute(&add, "data-book-id", &listing.id.to_string());
            self.ui.set_attribute(&add, "data-title", &listing.title);
            self.ui.set_attribute(
                &add,
                "data-price-kobo",
                &listing.price_kobo.get().to_string(),
            );
        }

        self.logger
            .for_component("modal")
            .debug_builder("modal populated")
            .field_u64("id", listing.id.get())
            .field("price", listing.price_kobo.display())
            .emit();
    }

    /// Add the book stashed on the modal's add button, then close the modal.
    pub fn modal_add(&self) {
        let dom = &self.config.dom;
        let Some(add) = self.ui.element_by_id(&dom.modal_add_id) else {
            return;
        };

        let id = self.ui.attribute(&add, "data-book-id");
        let title = self.ui.attribute(&add, "data-title");
        let price = self.ui.attribute(&add, "data-price-kobo");
        let attrs = ListingAttributes {
            id: id.as_deref(),
            title: title.as_deref(),
            price_kobo: price.as_deref(),
            ..Default::default()
        };

        if let Some(listing) = self.validated(attrs) {
            self.add_to_cart(listing.into());
        }
        self.close_modal();
    }

    /// Close the modal. Without the modal library no hidden event will
    /// fire, so the cover is cleared directly.
    pub fn close_modal(&self) {
        let Some(modal) = self.ui.element_by_id(&self.config.dom.modal_id) else {
            return;
        };
        if !self.ui.hide_modal(&modal) {
            self.ui.set_style(&modal, "display", "none");
            self.clear_modal_cover();
        }
    }

    /// Drop the cover image so the next open does not flash a stale one.
    pub fn clear_modal_cover(&self) {
        if let Some(cover) = self.ui.element_by_id(&self.config.dom.modal_cover_id) {
            self.ui.set_attribute(&cover, "src", "");
        }
    }
}
