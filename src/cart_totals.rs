//! Cart totals panel: order summary, discount code entry and checkout.
//!
//! The panel is fully controlled. It shows the `input_code` and `totals` its
//! owner last supplied and turns every interaction into one of the owner's
//! messages; the owner feeds changes back with [`TotalsPanel::set_input_code`]
//! and [`TotalsPanel::set_totals`].

use storefront_ui::constants::{
    line_height, BODY_FONT_SIZE, HEADING_FONT_SIZE, PADDING_COMPACT,
};
use storefront_ui::{
    button, text, text_input, Alignment, Bounds, Button, ButtonStyle, Callback, Callback0, Color, Event, Padding,
    Renderer, Size, TextInput, Widget,
};

use crate::model::{dollar_label, Totals};

/// Fixed panel width
pub const PANEL_WIDTH: f32 = 439.0;

/// Vertical gap between the panel sections
const SECTION_GAP: f32 = 20.0;

const HEADING: &str = "CART TOTALS";
const CODE_PLACEHOLDER: &str = "Input voucher discount code";
const CHECKOUT_LABEL: &str = "Proceed To Checkout";

/// Row labels, top to bottom
pub const ROW_LABELS: [&str; 4] = ["Subtotal", "Discount", "Shipping fee", "Total"];

fn row_height() -> f32 {
    line_height(BODY_FONT_SIZE) + 2.0 * PADDING_COMPACT
}

/// What the panel's own children report before it is mapped to the owner's message
#[derive(Debug, Clone, PartialEq)]
enum PanelEvent {
    InputChanged(String),
    ApplyDiscount,
    ProceedToCheckout,
}

/// Bounds of every section for a given panel position
#[derive(Debug, Clone, Copy)]
struct PanelLayout {
    heading: Bounds,
    separator: Bounds,
    input: Bounds,
    rows: [Bounds; 4],
    checkout: Bounds,
}

/// Order summary with a discount code input and a checkout button
pub struct TotalsPanel<M> {
    totals: Totals,
    input: TextInput<PanelEvent>,
    checkout: Button<PanelEvent>,
    /// Natural size of the checkout button, measured once
    checkout_size: Size,
    input_height: f32,
    on_input_change: Callback<String, M>,
    on_apply_discount: Callback0<M>,
    on_proceed_to_checkout: Callback0<M>,
}

impl<M> TotalsPanel<M> {
    pub fn new(input_code: impl Into<String>, totals: Totals) -> Self {
        let mut input = text_input()
            .value(input_code)
            .placeholder(CODE_PLACEHOLDER)
            .submit_button(true)
            .on_change(PanelEvent::InputChanged)
            .on_submit(|| PanelEvent::ApplyDiscount);
        let mut checkout = button(CHECKOUT_LABEL)
            .style(ButtonStyle::Primary)
            .bold(true)
            .on_click(PanelEvent::ProceedToCheckout);

        let available = Size::new(PANEL_WIDTH, f32::INFINITY);
        let checkout_size = checkout.layout(available);
        let input_height = input.layout(available).height;

        Self {
            totals,
            input,
            checkout,
            checkout_size,
            input_height,
            on_input_change: Callback::none(),
            on_apply_discount: Callback::none(),
            on_proceed_to_checkout: Callback::none(),
        }
    }

    storefront_ui::callback_setter!(on_input_change, String);
    storefront_ui::callback_setter!(on_apply_discount);
    storefront_ui::callback_setter!(on_proceed_to_checkout);

    /// Owner re-render with a new code
    pub fn set_input_code(&mut self, input_code: impl Into<String>) {
        self.input.set_value(input_code);
    }

    /// Owner re-render with new totals
    pub fn set_totals(&mut self, totals: Totals) {
        self.totals = totals;
    }

    /// The code currently shown in the input
    pub fn input_code(&self) -> &str {
        self.input.current_value()
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Label and formatted amount for each row
    pub fn rows(&self) -> [(&'static str, String); 4] {
        let t = &self.totals;
        [
            (ROW_LABELS[0], dollar_label(t.sub_total)),
            (ROW_LABELS[1], dollar_label(t.discount)),
            (ROW_LABELS[2], dollar_label(t.shipping_fee)),
            (ROW_LABELS[3], dollar_label(t.total)),
        ]
    }

    /// Screen area of the discount code input, submit affordance included
    pub fn code_input_area(&self, bounds: Bounds) -> Bounds {
        self.panel_layout(bounds).input
    }

    /// Screen area of the checkout button
    pub fn checkout_area(&self, bounds: Bounds) -> Bounds {
        self.panel_layout(bounds).checkout
    }

    fn panel_layout(&self, bounds: Bounds) -> PanelLayout {
        let x = bounds.x;
        let width = PANEL_WIDTH;
        let mut y = bounds.y;

        let heading = Bounds::new(x, y, width, line_height(HEADING_FONT_SIZE));
        y = heading.bottom() + SECTION_GAP;
        let separator = Bounds::new(x, y, width, 2.0);
        y = separator.bottom() + SECTION_GAP;
        let input = Bounds::new(x, y, width, self.input_height);
        y = input.bottom() + SECTION_GAP;

        let rh = row_height();
        let rows = [0, 1, 2, 3].map(|i| Bounds::new(x, y + i as f32 * rh, width, rh));
        y += 4.0 * rh + SECTION_GAP;

        // ml-auto: the button hugs the right edge
        let checkout = Bounds::new(
            x + width - self.checkout_size.width,
            y,
            self.checkout_size.width,
            self.checkout_size.height,
        );

        PanelLayout {
            heading,
            separator,
            input,
            rows,
            checkout,
        }
    }

    fn map_event(&self, event: PanelEvent) -> Option<M> {
        match event {
            PanelEvent::InputChanged(value) => {
                log::debug!("TotalsPanel: input changed to '{}'", value);
                self.on_input_change.call(value)
            }
            PanelEvent::ApplyDiscount => {
                log::debug!("TotalsPanel: apply discount requested");
                self.on_apply_discount.emit()
            }
            PanelEvent::ProceedToCheckout => {
                log::debug!("TotalsPanel: proceed to checkout requested");
                self.on_proceed_to_checkout.emit()
            }
        }
    }
}

impl<M> Widget<M> for TotalsPanel<M> {
    fn layout(&mut self, available: Size) -> Size {
        let available = Size::new(PANEL_WIDTH, available.height);
        self.checkout_size = self.checkout.layout(available);
        self.input_height = self.input.layout(available).height;
        let layout = self.panel_layout(Bounds::ZERO);
        Size::new(PANEL_WIDTH, layout.checkout.bottom())
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        let layout = self.panel_layout(bounds);

        Widget::<()>::draw(
            &text(HEADING).size(HEADING_FONT_SIZE).bold(true),
            renderer,
            layout.heading,
        );
        renderer.line(
            (layout.separator.x, layout.separator.y + 1.0),
            (layout.separator.right(), layout.separator.y + 1.0),
            Color::BORDER_LIGHT,
            1.0,
        );

        self.input.draw(renderer, layout.input);

        let cell_padding = Padding::symmetric(PADDING_COMPACT, 0.0);
        for (i, ((label, amount), row)) in self.rows().into_iter().zip(layout.rows).enumerate() {
            let is_total = i == ROW_LABELS.len() - 1;
            let cell = row.shrink(cell_padding);
            Widget::<()>::draw(
                &text(label).size(BODY_FONT_SIZE).bold(is_total),
                renderer,
                cell,
            );
            Widget::<()>::draw(
                &text(amount)
                    .size(BODY_FONT_SIZE)
                    .bold(is_total)
                    .align(Alignment::End),
                renderer,
                cell,
            );
            renderer.line((row.x, row.bottom()), (row.right(), row.bottom()), Color::BORDER_LIGHT, 1.0);
        }

        self.checkout.draw(renderer, layout.checkout);
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        let layout = self.panel_layout(bounds);

        // Both children see every event: presses outside the input blur it
        let from_input = self.input.on_event(event, layout.input);
        let from_checkout = self.checkout.on_event(event, layout.checkout);

        from_input
            .or(from_checkout)
            .and_then(|panel_event| self.map_event(panel_event))
    }
}

/// Create a totals panel
pub fn totals_panel<M>(input_code: impl Into<String>, totals: Totals) -> TotalsPanel<M> {
    TotalsPanel::new(input_code, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_ui::{DrawCommand, KeyCode};

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        CodeChanged(String),
        Apply,
        Checkout,
    }

    const AT: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: PANEL_WIDTH,
        height: 600.0,
    };

    fn panel(code: &str, totals: Totals) -> TotalsPanel<Msg> {
        totals_panel(code, totals)
            .on_input_change(Msg::CodeChanged)
            .on_apply_discount(|| Msg::Apply)
            .on_proceed_to_checkout(|| Msg::Checkout)
    }

    fn render(p: &TotalsPanel<Msg>) -> Renderer {
        let mut r = Renderer::new(800.0, 800.0);
        p.draw(&mut r, AT);
        r
    }

    fn center(b: Bounds) -> (f32, f32) {
        (b.x + b.width / 2.0, b.y + b.height / 2.0)
    }

    fn focus_input(p: &mut TotalsPanel<Msg>) {
        let input = p.panel_layout(AT).input;
        p.on_event(&Event::left_press(input.x + 20.0, input.y + 10.0), AT);
        p.on_event(&Event::key(KeyCode::End), AT);
    }

    #[test]
    fn test_renders_raw_amounts_with_dollar_prefix() {
        let p = panel("", Totals::new(100.0, 10.0, 5.0, 95.0));
        let r = render(&p);
        let texts = r.texts();
        for expected in ["$100", "$10", "$5", "$95"] {
            assert!(texts.contains(&expected), "missing {expected} in {texts:?}");
        }
    }

    #[test]
    fn test_renders_rows_in_order() {
        let p = panel("", Totals::new(100.0, 10.0, 5.0, 95.0));
        let r = render(&p);
        let texts = r.texts();
        let expected = [
            "CART TOTALS",
            CODE_PLACEHOLDER,
            "Subtotal",
            "$100",
            "Discount",
            "$10",
            "Shipping fee",
            "$5",
            "Total",
            "$95",
            CHECKOUT_LABEL,
        ];
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_no_rounding_and_negative_values() {
        let p = panel("", Totals::new(19.999, -2.5, 0.0, 17.499));
        let texts = render(&p).texts().into_iter().map(String::from).collect::<Vec<_>>();
        assert!(texts.contains(&"$19.999".to_string()));
        assert!(texts.contains(&"$-2.5".to_string()));
        assert!(texts.contains(&"$0".to_string()));
        assert!(texts.contains(&"$17.499".to_string()));
    }

    #[test]
    fn test_total_row_is_bold() {
        let p = panel("", Totals::new(1.0, 0.0, 0.0, 1.0));
        let r = render(&p);
        assert!(matches!(r.find_text("Total"), Some(DrawCommand::Text { bold: true, .. })));
        assert!(matches!(r.find_text("Subtotal"), Some(DrawCommand::Text { bold: false, .. })));
    }

    #[test]
    fn test_typing_reports_change_but_display_follows_prop() {
        let mut p = panel("SAVE", Totals::default());
        focus_input(&mut p);

        let msg = p.on_event(&Event::text("1"), AT);
        assert_eq!(msg, Some(Msg::CodeChanged("SAVE1".into())));
        assert_eq!(p.input_code(), "SAVE");
        assert!(render(&p).texts().contains(&"SAVE"));

        // Owner accepts the change
        p.set_input_code("SAVE1");
        assert_eq!(p.input_code(), "SAVE1");
        assert!(render(&p).texts().contains(&"SAVE1"));
    }

    #[test]
    fn test_owner_may_reject_edits() {
        let mut p = panel("", Totals::default());
        focus_input(&mut p);
        p.on_event(&Event::text("x"), AT);
        p.on_event(&Event::text("y"), AT);
        // The owner never fed anything back, so every edit starts from ""
        assert_eq!(p.on_event(&Event::text("z"), AT), Some(Msg::CodeChanged("z".into())));
        assert_eq!(p.input_code(), "");
    }

    #[test]
    fn test_enter_applies_discount() {
        let mut p = panel("SAVE10", Totals::default());
        focus_input(&mut p);
        assert_eq!(p.on_event(&Event::key(KeyCode::Enter), AT), Some(Msg::Apply));
    }

    #[test]
    fn test_submit_affordance_applies_discount() {
        let mut p = panel("SAVE10", Totals::default());
        let input = p.panel_layout(AT).input;
        let msg = p.on_event(&Event::left_press(input.right() - 10.0, input.y + input.height / 2.0), AT);
        assert_eq!(msg, Some(Msg::Apply));
    }

    #[test]
    fn test_checkout_button() {
        let mut p = panel("", Totals::default());
        let checkout = p.panel_layout(AT).checkout;
        assert_eq!(checkout.right(), PANEL_WIDTH);
        let (x, y) = center(checkout);
        assert_eq!(p.on_event(&Event::left_press(x, y), AT), Some(Msg::Checkout));
    }

    #[test]
    fn test_click_elsewhere_produces_nothing() {
        let mut p = panel("", Totals::default());
        let row = p.panel_layout(AT).rows[0];
        let (x, y) = center(row);
        assert_eq!(p.on_event(&Event::left_press(x, y), AT), None);
    }

    #[test]
    fn test_set_totals_rerenders() {
        let mut p = panel("", Totals::new(1.0, 0.0, 0.0, 1.0));
        p.set_totals(Totals::new(50.0, 5.0, 2.0, 47.0));
        let r = render(&p);
        assert!(r.texts().contains(&"$47"));
        assert!(!r.texts().contains(&"$1"));
    }

    #[test]
    fn test_layout_height_covers_checkout() {
        let mut p = panel("", Totals::default());
        let size = p.layout(Size::new(1000.0, 1000.0));
        assert_eq!(size.width, PANEL_WIDTH);
        assert!(size.height >= p.panel_layout(Bounds::ZERO).checkout.bottom());
    }
}
