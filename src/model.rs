//! Data model shared by the storefront components.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use storefront_ui::constants::{DROPDOWN_WIDTH_LARGE, DROPDOWN_WIDTH_MEDIUM, DROPDOWN_WIDTH_SMALL};

/// Order summary shown by the totals panel.
///
/// The panel displays these values as given; nothing checks that `total`
/// equals `sub_total - discount + shipping_fee`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub sub_total: f64,
    pub discount: f64,
    pub shipping_fee: f64,
    pub total: f64,
}

impl Totals {
    pub fn new(sub_total: f64, discount: f64, shipping_fee: f64, total: f64) -> Self {
        Self {
            sub_total,
            discount,
            shipping_fee,
            total,
        }
    }
}

/// Render an amount as `$` followed by the raw number.
///
/// No rounding and no grouping: the shortest decimal that round-trips is used,
/// so `95.0` shows as `$95` and `0.1 + 0.2` as `$0.30000000000000004`.
/// Magnitudes from `1e21` up and below `1e-6` switch to exponent form
/// (`$1e+21`, `$1.5e-7`), the way browsers print numbers.
pub fn dollar_label(amount: f64) -> String {
    if amount == 0.0 {
        // Collapse -0 to 0
        "$0".to_string()
    } else if amount.is_infinite() {
        if amount > 0.0 {
            "$Infinity".to_string()
        } else {
            "$-Infinity".to_string()
        }
    } else if amount.abs() >= 1e21 || amount.abs() < 1e-6 {
        let exponent_form = format!("{amount:e}");
        match exponent_form.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("${mantissa}e+{exponent}"),
            _ => format!("${exponent_form}"),
        }
    } else {
        format!("${amount}")
    }
}

/// One selectable choice in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Wrap in an `Rc`, the form dropdowns work with.
    ///
    /// Two options are "the same" for selection purposes only when they are
    /// the same `Rc` allocation, never because their fields match.
    pub fn shared(label: impl Into<String>, value: impl Into<String>) -> Rc<Self> {
        Rc::new(Self::new(label, value))
    }
}

/// Size variant of a dropdown; each maps to a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropdownSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl DropdownSize {
    pub fn width(&self) -> f32 {
        match self {
            DropdownSize::Small => DROPDOWN_WIDTH_SMALL,
            DropdownSize::Medium => DROPDOWN_WIDTH_MEDIUM,
            DropdownSize::Large => DROPDOWN_WIDTH_LARGE,
        }
    }
}
