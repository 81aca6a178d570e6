//! Storefront - cart page components
//!
//! A totals panel with voucher entry and checkout, and a searchable
//! single-select dropdown, built on the `storefront_ui` widget toolkit.

pub mod cart_totals;
pub mod config;
pub mod dropdown;
pub mod model;
mod page;

pub use cart_totals::{totals_panel, TotalsPanel};
pub use config::{ConfigError, LogLevel, PageConfig, ScriptStep, ScriptTarget};
pub use dropdown::{searchable_dropdown, SearchableDropdown};
pub use model::{dollar_label, DropdownOption, DropdownSize, Totals};
pub use page::{CartMessage, CartPage};
