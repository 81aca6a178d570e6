//! The cart page: a totals panel next to a shipping method dropdown.
//!
//! The page owns the state both components report into. It keeps the voucher
//! code the panel displays, recomputes totals when a discount is applied or a
//! shipping method is chosen, and routes input to the widgets the same way a
//! browser would: page-wide listeners first, then whichever widget is under
//! an open popup, then everything else.

use std::collections::BTreeMap;
use std::rc::Rc;

use storefront_ui::constants::{line_height, BODY_FONT_SIZE, PADDING_COMFORTABLE};
use storefront_ui::{text, Bounds, Color, Document, Event, Renderer, Widget};
use web_time::Instant;

use crate::cart_totals::{TotalsPanel, PANEL_WIDTH};
use crate::config::{PageConfig, ScriptTarget};
use crate::dropdown::SearchableDropdown;
use crate::model::{DropdownOption, Totals};

/// Outer margin of the page
const PAGE_MARGIN: f32 = 24.0;

/// Horizontal gap between the panel and the shipping column
const COLUMN_GAP: f32 = 40.0;

const SHIPPING_LABEL: &str = "Shipping method";

/// Everything the page's components can report
#[derive(Debug, Clone, PartialEq)]
pub enum CartMessage {
    CodeChanged(String),
    ApplyDiscount,
    ProceedToCheckout,
    ShippingSelected(Rc<DropdownOption>),
}

/// A cart page composed of a [`TotalsPanel`] and a shipping [`SearchableDropdown`]
pub struct CartPage {
    document: Document,
    panel: TotalsPanel<CartMessage>,
    shipping: SearchableDropdown<CartMessage>,
    shipping_width: f32,
    input_code: String,
    totals: Totals,
    discount_codes: BTreeMap<String, f64>,
    shipping_fees: Vec<(Rc<DropdownOption>, f64)>,
    applied_code: Option<String>,
    checked_out: bool,
}

impl CartPage {
    /// Build the page described by `config` and mount it on a fresh document
    pub fn from_config(config: &PageConfig) -> Self {
        let shipping_fees: Vec<(Rc<DropdownOption>, f64)> = config
            .shipping_methods
            .iter()
            .map(|method| (DropdownOption::shared(&method.label, &method.value), method.fee))
            .collect();
        let options: Vec<Rc<DropdownOption>> = shipping_fees.iter().map(|(option, _)| Rc::clone(option)).collect();

        let preselected = config.preselected_shipping.as_ref().and_then(|value| {
            shipping_fees
                .iter()
                .find(|(option, _)| &option.value == value)
                .map(|(option, _)| Rc::clone(option))
        });

        let panel = TotalsPanel::new(config.input_code.clone(), config.totals)
            .on_input_change(CartMessage::CodeChanged)
            .on_apply_discount(|| CartMessage::ApplyDiscount)
            .on_proceed_to_checkout(|| CartMessage::ProceedToCheckout);

        let mut shipping = SearchableDropdown::new(options)
            .placeholder("Choose shipping")
            .size(config.dropdown_size)
            .searchable(config.searchable)
            .initial_value(preselected)
            .on_select(CartMessage::ShippingSelected);

        let document = Document::new();
        shipping.mount(&document);

        log::info!(
            "Cart page ready: {} shipping methods, {} discount codes",
            shipping_fees.len(),
            config.discount_codes.len()
        );

        Self {
            document,
            panel,
            shipping,
            shipping_width: config.dropdown_size.width(),
            input_code: config.input_code.clone(),
            totals: config.totals,
            discount_codes: config.discount_codes.clone(),
            shipping_fees,
            applied_code: None,
            checked_out: false,
        }
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn input_code(&self) -> &str {
        &self.input_code
    }

    pub fn applied_code(&self) -> Option<&str> {
        self.applied_code.as_deref()
    }

    pub fn checked_out(&self) -> bool {
        self.checked_out
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shipping(&self) -> &SearchableDropdown<CartMessage> {
        &self.shipping
    }

    pub fn panel(&self) -> &TotalsPanel<CartMessage> {
        &self.panel
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    fn panel_bounds(&self) -> Bounds {
        Bounds::new(PAGE_MARGIN, PAGE_MARGIN, PANEL_WIDTH, f32::INFINITY)
    }

    fn shipping_label_bounds(&self) -> Bounds {
        Bounds::new(
            PAGE_MARGIN + PANEL_WIDTH + COLUMN_GAP,
            PAGE_MARGIN,
            self.shipping_width,
            line_height(BODY_FONT_SIZE),
        )
    }

    fn shipping_bounds(&self) -> Bounds {
        let label = self.shipping_label_bounds();
        Bounds::new(label.x, label.bottom() + PADDING_COMFORTABLE / 2.0, label.width, 0.0)
    }

    /// Page coordinates of a named target, if it is currently on screen
    pub fn target_point(&self, target: &ScriptTarget) -> Option<(f32, f32)> {
        let center = |b: Bounds| (b.x + b.width / 2.0, b.y + b.height / 2.0);
        match target {
            ScriptTarget::CodeInput => {
                let input = self.panel.code_input_area(self.panel_bounds());
                Some((input.x + PADDING_COMFORTABLE, input.y + input.height / 2.0))
            }
            ScriptTarget::ApplyDiscount => {
                let input = self.panel.code_input_area(self.panel_bounds());
                Some((input.right() - input.height / 2.0, input.y + input.height / 2.0))
            }
            ScriptTarget::Checkout => Some(center(self.panel.checkout_area(self.panel_bounds()))),
            ScriptTarget::ShippingTrigger => Some(center(self.shipping.trigger_area(self.shipping_bounds()))),
            ScriptTarget::ShippingSearch => self.shipping.search_area(self.shipping_bounds()).map(center),
            ScriptTarget::ShippingOption { label } => {
                self.shipping.option_area(self.shipping_bounds(), label).map(center)
            }
            ScriptTarget::Background => {
                let panel = self.panel.checkout_area(self.panel_bounds());
                Some((PAGE_MARGIN / 2.0, panel.bottom() + PAGE_MARGIN))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route an input event and apply whatever message it produced.
    ///
    /// Returns the message so callers can log or assert on it.
    pub fn dispatch(&mut self, event: &Event) -> Option<CartMessage> {
        let message = self.route(event);
        if let Some(message) = &message {
            self.update(message.clone());
        }
        message
    }

    fn route(&mut self, event: &Event) -> Option<CartMessage> {
        if let Event::MousePress { position, .. } = event {
            self.document.dispatch_pointer_down(*position);
        }

        let shipping_bounds = self.shipping_bounds();
        let panel_bounds = self.panel_bounds();

        // An open popup takes pointer input over its area before anything below it
        if self.shipping.has_active_overlay() {
            let captured = event.position().is_some_and(|(x, y)| {
                self.shipping
                    .capture_bounds(shipping_bounds)
                    .is_some_and(|area| area.contains(x, y))
            });
            if captured {
                return self.shipping.on_event(event, shipping_bounds);
            }
        }

        let from_shipping = self.shipping.on_event(event, shipping_bounds);
        let from_panel = self.panel.on_event(event, panel_bounds);
        from_shipping.or(from_panel)
    }

    /// Apply a message to the page state and push the result back into the widgets
    pub fn update(&mut self, message: CartMessage) {
        match message {
            CartMessage::CodeChanged(code) => {
                self.input_code = code;
                self.panel.set_input_code(self.input_code.clone());
            }
            CartMessage::ApplyDiscount => self.apply_discount(),
            CartMessage::ProceedToCheckout => {
                log::info!("Proceeding to checkout with total {}", self.totals.total);
                self.checked_out = true;
            }
            CartMessage::ShippingSelected(option) => {
                let fee = self
                    .shipping_fees
                    .iter()
                    .find(|(known, _)| Rc::ptr_eq(known, &option))
                    .map(|(_, fee)| *fee);
                match fee {
                    Some(fee) => {
                        log::info!("Shipping method '{}' selected, fee {}", option.label, fee);
                        self.totals.shipping_fee = fee;
                        self.recompute_total();
                    }
                    None => log::warn!("Unknown shipping method '{}'", option.label),
                }
            }
        }
    }

    fn apply_discount(&mut self) {
        let code = self.input_code.trim().to_uppercase();
        let found = self
            .discount_codes
            .iter()
            .find(|(known, _)| known.to_uppercase() == code)
            .map(|(_, amount)| *amount);

        match found {
            Some(amount) => {
                log::info!("Discount code '{}' applied: {}", code, amount);
                self.totals.discount = amount;
                self.applied_code = Some(code);
            }
            None => {
                log::warn!("Discount code '{}' is not valid", code);
                self.totals.discount = 0.0;
                self.applied_code = None;
            }
        }
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        let t = &mut self.totals;
        t.total = t.sub_total - t.discount + t.shipping_fee;
        self.panel.set_totals(self.totals);
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Paint the page as of `now`
    pub fn render(&self, renderer: &mut Renderer, now: Instant) {
        renderer.clear();
        renderer.fill_rect(renderer.viewport(), Color::WHITE);
        self.panel.draw(renderer, self.panel_bounds());
        Widget::<()>::draw(
            &text(SHIPPING_LABEL).size(BODY_FONT_SIZE).bold(true),
            renderer,
            self.shipping_label_bounds(),
        );
        self.shipping.draw_at(renderer, self.shipping_bounds(), now);
    }
}
