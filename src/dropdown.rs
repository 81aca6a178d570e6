//! Searchable single-select dropdown.
//!
//! The dropdown owns its open/closed state, the current selection and the
//! search text. The only thing it tells its owner is which option the user
//! picked, through `on_select`. The owner can still force the selection by
//! handing in a different initial value.
//!
//! Clicks outside the widget close the popup. That is detected through a
//! page-wide pointer-down listener registered on [`SearchableDropdown::mount`]
//! and released on [`SearchableDropdown::unmount`] or when the widget is
//! dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use storefront_ui::constants::{
    line_height, DEFAULT_FONT_SIZE, DISABLED_OPACITY, DROPDOWN_EXTENT_PER_OPTION, DROPDOWN_LIST_MAX_HEIGHT,
    DROPDOWN_LIST_PADDING, DROPDOWN_MAX_POPUP_EXTENT, DROPDOWN_OPTION_HEIGHT, DROPDOWN_POPUP_GAP,
    DROPDOWN_SEARCH_HEIGHT, DROPDOWN_TRIGGER_PADDING, ICON_SIZE,
};
use storefront_ui::widgets::TextInputConfig;
use storefront_ui::{
    text_input, Bounds, Callback, Color, Document, Event, Icon, KeyCode, MouseButton, OverlayCloseHelper,
    Padding, Renderer, RevealTransition, Size, Subscription, TextInput, Widget,
};
use web_time::Instant;

use crate::model::{DropdownOption, DropdownSize};

/// Placeholder shown while nothing is selected
pub const DEFAULT_PLACEHOLDER: &str = "Select an option";

/// Placeholder of the search field
const SEARCH_PLACEHOLDER: &str = "Search...";

/// Height of the trigger button
fn trigger_height() -> f32 {
    line_height(DEFAULT_FONT_SIZE) + DROPDOWN_TRIGGER_PADDING.vertical()
}

/// How far the popup may expand for a list of `option_count` options.
///
/// Proportional to the number of options, capped at
/// [`DROPDOWN_MAX_POPUP_EXTENT`].
pub fn expansion_extent(option_count: usize) -> f32 {
    (option_count as f32 * DROPDOWN_EXTENT_PER_OPTION).min(DROPDOWN_MAX_POPUP_EXTENT)
}

/// Options whose label contains `term`, ignoring case, in their original order.
///
/// Only contiguous substrings match; an empty term matches everything.
pub fn filter_options<'a>(options: &'a [Rc<DropdownOption>], term: &str) -> Vec<&'a Rc<DropdownOption>> {
    let needle = term.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .collect()
}

/// Interaction state owned by a dropdown
#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    /// Whether the popup is open
    pub is_open: bool,
    /// Current selection
    pub selected: Option<Rc<DropdownOption>>,
    /// Filter text (only used when searchable)
    pub search_term: String,
    /// Index into the filtered list under the pointer or keyboard highlight
    pub hovered: Option<usize>,
    /// First visible row of the filtered list
    pub scroll_offset: usize,
    /// Popup reveal animation
    pub reveal: RevealTransition,
}

impl DropdownState {
    /// Scroll the list by `delta` rows, keeping at least one page visible
    pub fn scroll_by(&mut self, delta: isize, total: usize, visible: usize) {
        if total <= visible {
            self.scroll_offset = 0;
            return;
        }
        let max_scroll = total - visible;
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max_scroll);
    }

    /// Scroll so the highlighted row is inside the visible window
    pub fn ensure_hovered_visible(&mut self, visible: usize) {
        if let Some(hovered) = self.hovered {
            if hovered < self.scroll_offset {
                self.scroll_offset = hovered;
            } else if visible > 0 && hovered >= self.scroll_offset + visible {
                self.scroll_offset = hovered + 1 - visible;
            }
        }
    }
}

/// Everything the outside-click listener needs to see
struct Shared {
    state: DropdownState,
    search_input: TextInput<String>,
    /// Root bounds from the last layout pass
    anchor: Option<Bounds>,
    /// Trigger area, from `anchor`
    trigger: Option<Bounds>,
    /// Area counted as "inside" the widget; `None` until laid out
    region: Option<Bounds>,
}

impl Shared {
    fn set_search(&mut self, term: String) {
        self.search_input.set_value(term.clone());
        self.state.search_term = term;
        self.state.hovered = None;
        self.state.scroll_offset = 0;
    }

    fn open(&mut self, now: Instant) {
        self.state.is_open = true;
        self.state.hovered = None;
        self.state.scroll_offset = 0;
        self.state.reveal.open(now);
    }

    /// Close, keeping the search text
    fn collapse(&mut self, now: Instant) {
        self.state.is_open = false;
        self.state.hovered = None;
        self.state.reveal.close(now);
        self.search_input.blur();
    }

    /// Close and clear the search text
    fn dismiss(&mut self, now: Instant) {
        self.collapse(now);
        self.set_search(String::new());
        self.region = self.trigger;
    }
}

/// Resolved geometry of the open popup
#[derive(Debug, Clone, Copy)]
struct PopupLayout {
    popup: Bounds,
    search: Option<Bounds>,
    list: Bounds,
    visible_rows: usize,
}

/// A single-select dropdown with optional search
pub struct SearchableDropdown<M> {
    options: Vec<Rc<DropdownOption>>,
    placeholder: String,
    size: DropdownSize,
    disabled: bool,
    searchable: bool,
    initial_value: Option<Rc<DropdownOption>>,
    on_select: Callback<Rc<DropdownOption>, M>,
    trigger_hovered: bool,
    shared: Rc<RefCell<Shared>>,
    subscription: Option<Subscription>,
}

impl<M> SearchableDropdown<M> {
    /// Create a dropdown over `options`
    pub fn new(options: Vec<Rc<DropdownOption>>) -> Self {
        let search_input = text_input()
            .placeholder(SEARCH_PLACEHOLDER)
            .padding(Padding::symmetric(8.0, 16.0))
            .config(TextInputConfig {
                border: Color::BORDER_LIGHT,
                border_focused: Color::BORDER_LIGHT,
                underline_only: true,
                ..TextInputConfig::default()
            })
            .on_change(|term: String| term);

        Self {
            options,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            size: DropdownSize::default(),
            disabled: false,
            searchable: false,
            initial_value: None,
            on_select: Callback::none(),
            trigger_hovered: false,
            shared: Rc::new(RefCell::new(Shared {
                state: DropdownState::default(),
                search_input,
                anchor: None,
                trigger: None,
                region: None,
            })),
            subscription: None,
        }
    }

    storefront_ui::callback_setter!(on_select, Rc<DropdownOption>);
    storefront_ui::builder_field!(size, DropdownSize);
    storefront_ui::builder_field!(disabled, bool);
    storefront_ui::builder_field!(searchable, bool);

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Preselect an option
    pub fn initial_value(mut self, value: Option<Rc<DropdownOption>>) -> Self {
        self.set_initial_value(value);
        self
    }

    // -------------------------------------------------------------------------
    // Owner re-render
    // -------------------------------------------------------------------------

    /// Hand in a (possibly new) initial value.
    ///
    /// When it is a different option than last time, and not `None`, it
    /// replaces the current selection, whatever the user picked before.
    pub fn set_initial_value(&mut self, value: Option<Rc<DropdownOption>>) {
        let changed = match (&self.initial_value, &value) {
            (Some(old), Some(new)) => !Rc::ptr_eq(old, new),
            (None, None) => false,
            _ => true,
        };
        self.initial_value = value;

        if changed {
            if let Some(value) = &self.initial_value {
                log::debug!("Dropdown: initial value changed, selecting '{}'", value.label);
                self.shared.borrow_mut().state.selected = Some(Rc::clone(value));
            }
        }
    }

    /// Replace the option list. The selection is left alone.
    pub fn set_options(&mut self, options: Vec<Rc<DropdownOption>>) {
        self.options = options;
        {
            let mut shared = self.shared.borrow_mut();
            shared.state.hovered = None;
            shared.state.scroll_offset = 0;
        }
        self.refresh_region();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn set_size(&mut self, size: DropdownSize) {
        self.size = size;
        self.refresh_region();
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.searchable = searchable;
        self.refresh_region();
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start listening for pointer-downs anywhere on the page.
    ///
    /// Mounting twice keeps the existing listener.
    pub fn mount(&mut self, document: &Document) {
        if self.subscription.is_some() {
            return;
        }
        let shared: Weak<RefCell<Shared>> = Rc::downgrade(&self.shared);
        self.subscription = Some(document.on_pointer_down(move |position| {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut shared = shared.borrow_mut();
            let has_state = shared.state.is_open || !shared.state.search_term.is_empty();
            // Never laid out: the widget covers no area, so every press is outside
            let outside = shared
                .region
                .is_none_or(|region| OverlayCloseHelper::is_outside(position, region));
            if has_state && outside {
                log::debug!("Dropdown: pointer-down outside at {:?}, closing", position);
                shared.dismiss(Instant::now());
            }
        }));
    }

    /// Stop listening for outside clicks
    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.shared.borrow().state.is_open
    }

    pub fn selected(&self) -> Option<Rc<DropdownOption>> {
        self.shared.borrow().state.selected.clone()
    }

    pub fn search_term(&self) -> String {
        self.shared.borrow().state.search_term.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn options(&self) -> &[Rc<DropdownOption>] {
        &self.options
    }

    /// Options currently shown in the popup
    pub fn visible_options(&self) -> Vec<Rc<DropdownOption>> {
        let shared = self.shared.borrow();
        filter_options(&self.options, &shared.state.search_term)
            .into_iter()
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Open when closed, close when open. No-op while disabled.
    pub fn toggle(&mut self) {
        if self.disabled {
            log::debug!("Dropdown: toggle ignored, disabled");
            return;
        }
        let now = Instant::now();
        {
            let mut shared = self.shared.borrow_mut();
            if shared.state.is_open {
                shared.collapse(now);
            } else {
                shared.open(now);
            }
            log::debug!("Dropdown: toggled, open = {}", shared.state.is_open);
        }
        self.refresh_region();
    }

    /// Pick the option at `index` of the filtered list.
    ///
    /// Returns the `on_select` message. No-op while disabled.
    pub fn select_visible(&mut self, index: usize) -> Option<M> {
        if self.disabled {
            log::debug!("Dropdown: selection ignored, disabled");
            return None;
        }
        let option = self.visible_options().get(index).cloned()?;
        self.select(option)
    }

    fn select(&mut self, option: Rc<DropdownOption>) -> Option<M> {
        {
            let mut shared = self.shared.borrow_mut();
            shared.state.selected = Some(Rc::clone(&option));
            shared.dismiss(Instant::now());
        }
        self.refresh_region();
        log::debug!("Dropdown: selected '{}' ({})", option.label, option.value);
        self.on_select.call(option)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    fn trigger_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new(bounds.x, bounds.y, self.size.width(), trigger_height())
    }

    fn popup_layout(&self, trigger: Bounds, filtered_len: usize) -> PopupLayout {
        let search_height = if self.searchable { DROPDOWN_SEARCH_HEIGHT } else { 0.0 };
        let list_content = filtered_len as f32 * DROPDOWN_OPTION_HEIGHT + 2.0 * DROPDOWN_LIST_PADDING;
        let list_height = list_content.min(DROPDOWN_LIST_MAX_HEIGHT);
        let popup_height = expansion_extent(self.options.len()).min(search_height + list_height);

        let popup = Bounds::new(trigger.x, trigger.bottom() + DROPDOWN_POPUP_GAP, trigger.width, popup_height);
        let search = self
            .searchable
            .then(|| Bounds::new(popup.x, popup.y, popup.width, search_height.min(popup_height)));
        let list = Bounds::new(
            popup.x,
            popup.y + search_height,
            popup.width,
            (popup_height - search_height).max(0.0),
        );
        let rows_height = (list.height - 2.0 * DROPDOWN_LIST_PADDING).max(0.0);
        let visible_rows = ((rows_height / DROPDOWN_OPTION_HEIGHT).floor() as usize).min(filtered_len);

        PopupLayout {
            popup,
            search,
            list,
            visible_rows,
        }
    }

    /// Bounds of the row showing filtered item `index`, if scrolled into view
    fn row_bounds(&self, layout: &PopupLayout, scroll_offset: usize, index: usize) -> Option<Bounds> {
        if index < scroll_offset || index >= scroll_offset + layout.visible_rows {
            return None;
        }
        let row = (index - scroll_offset) as f32;
        Some(Bounds::new(
            layout.list.x + DROPDOWN_LIST_PADDING,
            layout.list.y + DROPDOWN_LIST_PADDING + row * DROPDOWN_OPTION_HEIGHT,
            layout.list.width - 2.0 * DROPDOWN_LIST_PADDING,
            DROPDOWN_OPTION_HEIGHT,
        ))
    }

    /// Screen area of the trigger button
    pub fn trigger_area(&self, bounds: Bounds) -> Bounds {
        self.trigger_bounds(bounds)
    }

    /// Screen area of the search field, while open and searchable
    pub fn search_area(&self, bounds: Bounds) -> Option<Bounds> {
        if !self.is_open() {
            return None;
        }
        let filtered_len = self.visible_options().len();
        self.popup_layout(self.trigger_bounds(bounds), filtered_len).search
    }

    /// Screen area of the row labelled `label`, while open and scrolled into view
    pub fn option_area(&self, bounds: Bounds, label: &str) -> Option<Bounds> {
        if !self.is_open() {
            return None;
        }
        let visible = self.visible_options();
        let index = visible.iter().position(|option| option.label == label)?;
        let layout = self.popup_layout(self.trigger_bounds(bounds), visible.len());
        let offset = self.shared.borrow().state.scroll_offset;
        self.row_bounds(&layout, offset, index)
    }

    fn row_at(&self, layout: &PopupLayout, scroll_offset: usize, position: (f32, f32)) -> Option<usize> {
        (scroll_offset..scroll_offset + layout.visible_rows).find(|&index| {
            self.row_bounds(layout, scroll_offset, index)
                .is_some_and(|row| row.contains(position.0, position.1))
        })
    }

    /// Record the root bounds of a layout pass and refresh the "inside" area
    fn sync_region(&self, bounds: Bounds) {
        self.shared.borrow_mut().anchor = Some(bounds);
        self.refresh_region();
    }

    /// Recompute the "inside" area from the last root bounds and current state
    fn refresh_region(&self) {
        let Some(anchor) = self.shared.borrow().anchor else {
            return;
        };
        let trigger = self.trigger_bounds(anchor);
        let filtered_len = self.visible_options().len();
        let layout = self.popup_layout(trigger, filtered_len);
        let mut shared = self.shared.borrow_mut();
        shared.trigger = Some(trigger);
        shared.region = Some(if shared.state.is_open {
            trigger.union(&layout.popup)
        } else {
            trigger
        });
    }

    /// Draw as of a given instant (the reveal animation depends on time)
    pub fn draw_at(&self, renderer: &mut Renderer, bounds: Bounds, now: Instant) {
        self.sync_region(bounds);
        let trigger = self.trigger_bounds(bounds);
        let fade = |color: Color| {
            if self.disabled {
                color.faded(DISABLED_OPACITY)
            } else {
                color
            }
        };

        let background = if self.trigger_hovered && !self.disabled {
            Color::INPUT_HOVER
        } else {
            Color::INPUT_BG
        };
        renderer.fill_rect(trigger, fade(background));
        renderer.stroke_rect(trigger, fade(Color::BORDER), 1.0);

        let shared = self.shared.borrow();
        let (label, label_color) = match &shared.state.selected {
            Some(option) => (option.label.as_str(), Color::TEXT_PRIMARY),
            None => (self.placeholder.as_str(), Color::TEXT_MUTED),
        };
        let content = trigger.shrink(DROPDOWN_TRIGGER_PADDING);
        let text_y = trigger.y + (trigger.height - DEFAULT_FONT_SIZE) / 2.0;
        renderer.push_clip(Bounds::new(content.x, trigger.y, (content.width - ICON_SIZE).max(0.0), trigger.height));
        renderer.text(label, content.x, text_y, DEFAULT_FONT_SIZE, fade(label_color));
        renderer.pop_clip();
        renderer.icon(
            Icon::ChevronDown,
            Bounds::new(
                content.right() - ICON_SIZE,
                trigger.y + (trigger.height - ICON_SIZE) / 2.0,
                ICON_SIZE,
                ICON_SIZE,
            ),
            fade(Color::TEXT_PRIMARY),
        );

        if !shared.state.reveal.is_visible(now) {
            return;
        }

        let filtered = filter_options(&self.options, &shared.state.search_term);
        let layout = self.popup_layout(trigger, filtered.len());
        let opacity = shared.state.reveal.progress(now);
        let revealed = layout.popup.with_height(shared.state.reveal.extent(layout.popup.height, now));

        renderer.begin_overlay();
        renderer.push_clip(revealed);
        renderer.fill_rect(layout.popup, Color::WHITE.faded(opacity));
        renderer.stroke_rect(layout.popup, Color::BORDER_LIGHT.faded(opacity), 1.0);

        if let Some(search) = layout.search {
            shared.search_input.draw(renderer, search);
        }

        for (index, option) in filtered.iter().enumerate() {
            let Some(row) = self.row_bounds(&layout, shared.state.scroll_offset, index) else {
                continue;
            };
            if shared.state.hovered == Some(index) {
                renderer.fill_rect(row, Color::ITEM_HOVER.faded(opacity));
            }
            let y = row.y + (row.height - DEFAULT_FONT_SIZE) / 2.0;
            renderer.text(&option.label, row.x + 12.0, y, DEFAULT_FONT_SIZE, Color::TEXT_PRIMARY.faded(opacity));
        }

        renderer.pop_clip();
        renderer.end_overlay();
    }
}

impl<M> Widget<M> for SearchableDropdown<M> {
    fn layout(&mut self, _available: Size) -> Size {
        Size::new(self.size.width(), trigger_height())
    }

    fn draw(&self, renderer: &mut Renderer, bounds: Bounds) {
        self.draw_at(renderer, bounds, Instant::now());
    }

    fn on_event(&mut self, event: &Event, bounds: Bounds) -> Option<M> {
        self.sync_region(bounds);
        let trigger = self.trigger_bounds(bounds);
        let is_open = self.is_open();

        if is_open && OverlayCloseHelper::should_close_on_event(event) {
            self.shared.borrow_mut().dismiss(Instant::now());
            self.sync_region(bounds);
            return None;
        }

        let filtered_len = self.visible_options().len();
        let layout = self.popup_layout(trigger, filtered_len);

        let message = match event {
            Event::MouseMove { position } => {
                self.trigger_hovered = trigger.contains(position.0, position.1);
                if is_open {
                    let mut shared = self.shared.borrow_mut();
                    let offset = shared.state.scroll_offset;
                    shared.state.hovered = self.row_at(&layout, offset, *position);
                }
                None
            }

            Event::MousePress {
                button: MouseButton::Left,
                position,
                ..
            } => {
                if is_open {
                    if let Some(search) = layout.search {
                        let mut shared = self.shared.borrow_mut();
                        shared.search_input.on_event(event, search);
                    }
                }

                if trigger.contains(position.0, position.1) {
                    self.toggle();
                    None
                } else if is_open {
                    let offset = self.shared.borrow().state.scroll_offset;
                    match self.row_at(&layout, offset, *position) {
                        Some(index) => self.select_visible(index),
                        None => None,
                    }
                } else {
                    None
                }
            }

            Event::MouseScroll { delta, position } if is_open => {
                if layout.list.contains(position.0, position.1) {
                    let step: isize = if *delta > 0.0 { 1 } else { -1 };
                    self.shared
                        .borrow_mut()
                        .state
                        .scroll_by(step, filtered_len, layout.visible_rows);
                }
                None
            }

            Event::KeyPress { key, .. } if is_open => match key {
                KeyCode::Down | KeyCode::Up => {
                    if filtered_len > 0 {
                        let mut shared = self.shared.borrow_mut();
                        let next = match (key, shared.state.hovered) {
                            (KeyCode::Down, None) => 0,
                            (KeyCode::Down, Some(i)) => (i + 1).min(filtered_len - 1),
                            (_, None) => filtered_len - 1,
                            (_, Some(i)) => i.saturating_sub(1),
                        };
                        shared.state.hovered = Some(next);
                        shared.state.ensure_hovered_visible(layout.visible_rows);
                    }
                    None
                }
                KeyCode::Enter => {
                    let hovered = self.shared.borrow().state.hovered;
                    match hovered {
                        Some(index) => self.select_visible(index),
                        None => None,
                    }
                }
                _ => self.forward_to_search(event, layout.search),
            },

            Event::TextInput { .. } if is_open => self.forward_to_search(event, layout.search),

            _ => None,
        };

        self.sync_region(bounds);
        message
    }

    fn has_active_overlay(&self) -> bool {
        self.is_open()
    }

    fn capture_bounds(&self, _layout_bounds: Bounds) -> Option<Bounds> {
        self.shared.borrow().region
    }
}

impl<M> SearchableDropdown<M> {
    /// Let the search field handle typing; apply any new search text
    fn forward_to_search(&mut self, event: &Event, search: Option<Bounds>) -> Option<M> {
        let search = search?;
        let mut shared = self.shared.borrow_mut();
        if let Some(term) = shared.search_input.on_event(event, search) {
            log::debug!("Dropdown: search term '{}'", term);
            shared.set_search(term);
        }
        None
    }
}

/// Create a dropdown over `options`
pub fn searchable_dropdown<M>(options: Vec<Rc<DropdownOption>>) -> SearchableDropdown<M> {
    SearchableDropdown::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Selected(Rc<DropdownOption>),
    }

    const AT: Bounds = Bounds {
        x: 10.0,
        y: 10.0,
        width: 192.0,
        height: 43.6,
    };

    fn colors() -> Vec<Rc<DropdownOption>> {
        vec![DropdownOption::shared("Red", "r"), DropdownOption::shared("Blue", "b")]
    }

    fn dropdown(options: Vec<Rc<DropdownOption>>) -> SearchableDropdown<Msg> {
        searchable_dropdown(options).on_select(Msg::Selected)
    }

    fn trigger_center() -> (f32, f32) {
        (AT.x + 50.0, AT.y + 20.0)
    }

    /// Center of filtered row `index` for a dropdown laid out at `AT`
    fn row_center<M>(d: &SearchableDropdown<M>, index: usize) -> (f32, f32) {
        let layout = d.popup_layout(d.trigger_bounds(AT), d.visible_options().len());
        let row = d.row_bounds(&layout, 0, index).expect("row visible");
        (row.x + row.width / 2.0, row.y + row.height / 2.0)
    }

    fn click(d: &mut SearchableDropdown<Msg>, (x, y): (f32, f32)) -> Option<Msg> {
        d.on_event(&Event::left_press(x, y), AT)
    }

    fn labels(options: &[Rc<DropdownOption>]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    fn type_search(d: &mut SearchableDropdown<Msg>, text: &str) {
        let layout = d.popup_layout(d.trigger_bounds(AT), d.visible_options().len());
        let search = layout.search.expect("searchable");
        d.on_event(&Event::left_press(search.x + 20.0, search.y + 10.0), AT);
        d.on_event(&Event::text(text), AT);
    }

    #[test]
    fn test_starts_closed_with_placeholder() {
        let d = dropdown(colors());
        assert!(!d.is_open());
        assert!(d.selected().is_none());

        let mut r = Renderer::new(800.0, 600.0);
        d.draw(&mut r, AT);
        assert_eq!(r.texts(), vec![DEFAULT_PLACEHOLDER]);
    }

    #[test]
    fn test_open_lists_all_options_in_order() {
        let mut d = dropdown(colors());
        click(&mut d, trigger_center());
        assert!(d.is_open());
        assert_eq!(labels(&d.visible_options()), vec!["Red", "Blue"]);

        let mut r = Renderer::new(800.0, 600.0);
        d.draw_at(&mut r, AT, Instant::now() + Duration::from_millis(400));
        assert_eq!(r.overlay_texts(), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let options = colors();
        assert_eq!(labels(&filter_options(&options, "re").into_iter().cloned().collect::<Vec<_>>()), vec!["Red"]);
        assert_eq!(labels(&filter_options(&options, "RE").into_iter().cloned().collect::<Vec<_>>()), vec!["Red"]);
        assert!(filter_options(&options, "z").is_empty());
        assert_eq!(filter_options(&options, "").len(), 2);
    }

    #[test]
    fn test_search_requires_contiguous_match() {
        let options = vec![DropdownOption::shared("Standard", "std")];
        assert!(filter_options(&options, "sd").is_empty());
        assert_eq!(filter_options(&options, "AND").len(), 1);
    }

    #[test]
    fn test_typing_in_search_filters_without_touching_options() {
        let mut d = dropdown(colors()).searchable(true);
        click(&mut d, trigger_center());
        type_search(&mut d, "rE");

        assert_eq!(d.search_term(), "rE");
        assert_eq!(labels(&d.visible_options()), vec!["Red"]);
        assert_eq!(d.options().len(), 2);

        d.on_event(&Event::key(KeyCode::Backspace), AT);
        d.on_event(&Event::key(KeyCode::Backspace), AT);
        d.on_event(&Event::text("z"), AT);
        assert!(d.visible_options().is_empty());
    }

    #[test]
    fn test_select_emits_once_closes_and_clears_search() {
        let mut d = dropdown(colors()).searchable(true);
        click(&mut d, trigger_center());
        type_search(&mut d, "bl");
        let blue = Rc::clone(&d.visible_options()[0]);

        let pos = row_center(&d, 0);
        let msg = click(&mut d, pos);
        match msg {
            Some(Msg::Selected(option)) => assert!(Rc::ptr_eq(&option, &blue)),
            None => panic!("expected a selection message"),
        }
        assert!(!d.is_open());
        assert_eq!(d.search_term(), "");
        assert!(Rc::ptr_eq(&d.selected().expect("selected"), &blue));

        // Reopening starts unfiltered
        click(&mut d, trigger_center());
        assert_eq!(labels(&d.visible_options()), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_selected_label_replaces_placeholder() {
        let mut d = dropdown(colors());
        click(&mut d, trigger_center());
        let pos = row_center(&d, 1);
        click(&mut d, pos);

        let mut r = Renderer::new(800.0, 600.0);
        d.draw_at(&mut r, AT, Instant::now() + Duration::from_millis(400));
        assert_eq!(r.texts(), vec!["Blue"]);
    }

    #[test]
    fn test_outside_pointer_down_closes_without_selecting() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        let red = Rc::clone(&d.options()[0]);
        d.set_initial_value(Some(Rc::clone(&red)));

        click(&mut d, trigger_center());
        assert!(d.is_open());

        doc.dispatch_pointer_down((700.0, 500.0));
        assert!(!d.is_open());
        assert!(Rc::ptr_eq(&d.selected().expect("selected"), &red));
    }

    #[test]
    fn test_toggle_before_layout_closes_on_any_pointer_down() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        d.toggle();
        assert!(d.is_open());

        doc.dispatch_pointer_down((700.0, 500.0));
        assert!(!d.is_open());
    }

    #[test]
    fn test_toggle_after_closed_layout_tracks_popup_area() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        // Laid out once while closed
        d.on_event(&Event::MouseMove { position: (0.0, 0.0) }, AT);
        d.toggle();

        let row = row_center(&d, 0);
        doc.dispatch_pointer_down(row);
        assert!(d.is_open());
        let msg = click(&mut d, row);
        assert!(matches!(msg, Some(Msg::Selected(ref o)) if o.label == "Red"));

        d.toggle();
        doc.dispatch_pointer_down((700.0, 500.0));
        assert!(!d.is_open());
    }

    #[test]
    fn test_resize_while_open_moves_inside_area() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        click(&mut d, trigger_center());
        d.set_size(DropdownSize::Large);

        // Only inside the widget once it is Large
        let (_, y) = row_center(&d, 0);
        let x = AT.x + DropdownSize::Medium.width() + 20.0;
        doc.dispatch_pointer_down((x, y));
        assert!(d.is_open());
    }

    #[test]
    fn test_pointer_down_inside_popup_keeps_it_open() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        click(&mut d, trigger_center());

        let inside = row_center(&d, 1);
        doc.dispatch_pointer_down(inside);
        assert!(d.is_open());
        let msg = click(&mut d, inside);
        assert!(matches!(msg, Some(Msg::Selected(ref o)) if o.label == "Blue"));
    }

    #[test]
    fn test_outside_click_clears_search() {
        let doc = Document::new();
        let mut d = dropdown(colors()).searchable(true);
        d.mount(&doc);
        click(&mut d, trigger_center());
        type_search(&mut d, "re");

        doc.dispatch_pointer_down((700.0, 500.0));
        assert_eq!(d.search_term(), "");
    }

    #[test]
    fn test_disabled_ignores_toggle_and_select() {
        let mut d = dropdown(colors()).disabled(true);
        assert_eq!(click(&mut d, trigger_center()), None);
        assert!(!d.is_open());
        assert_eq!(d.select_visible(0), None);
        assert!(d.selected().is_none());
    }

    #[test]
    fn test_disabled_while_open_blocks_item_clicks() {
        let mut d = dropdown(colors());
        click(&mut d, trigger_center());
        d.set_disabled(true);

        let pos = row_center(&d, 0);
        assert_eq!(click(&mut d, pos), None);
        assert!(d.selected().is_none());
        assert!(d.is_open());

        click(&mut d, trigger_center());
        assert!(d.is_open());
    }

    #[test]
    fn test_disabled_trigger_is_faded() {
        let d = dropdown(colors()).disabled(true);
        let mut r = Renderer::new(800.0, 600.0);
        d.draw(&mut r, AT);
        let faded = r.commands().any(|c| {
            matches!(c, storefront_ui::DrawCommand::Text { color, .. } if (color.a - DISABLED_OPACITY).abs() < 1e-6)
        });
        assert!(faded);
    }

    #[test]
    fn test_new_initial_value_overrides_manual_selection() {
        let mut d = dropdown(colors());
        click(&mut d, trigger_center());
        let pos = row_center(&d, 0);
        click(&mut d, pos);
        assert_eq!(d.selected().expect("selected").label, "Red");

        let blue = Rc::clone(&d.options()[1]);
        d.set_initial_value(Some(Rc::clone(&blue)));
        assert!(Rc::ptr_eq(&d.selected().expect("selected"), &blue));
    }

    #[test]
    fn test_same_initial_value_does_not_override() {
        let options = colors();
        let red = Rc::clone(&options[0]);
        let mut d = dropdown(options).initial_value(Some(Rc::clone(&red)));
        assert!(Rc::ptr_eq(&d.selected().expect("selected"), &red));

        click(&mut d, trigger_center());
        let pos = row_center(&d, 1);
        click(&mut d, pos);

        // Re-render with the very same initial value
        d.set_initial_value(Some(Rc::clone(&red)));
        assert_eq!(d.selected().expect("selected").label, "Blue");
    }

    #[test]
    fn test_clearing_initial_value_keeps_selection() {
        let options = colors();
        let red = Rc::clone(&options[0]);
        let mut d = dropdown(options).initial_value(Some(red));
        d.set_initial_value(None);
        assert_eq!(d.selected().expect("selected").label, "Red");
    }

    #[test]
    fn test_identity_not_value_decides_change() {
        let mut d = dropdown(colors()).initial_value(Some(DropdownOption::shared("Red", "r")));
        click(&mut d, trigger_center());
        let pos = row_center(&d, 1);
        click(&mut d, pos);

        // Equal fields, different allocation: counts as a new value
        d.set_initial_value(Some(DropdownOption::shared("Red", "r")));
        assert_eq!(d.selected().expect("selected").label, "Red");
    }

    #[test]
    fn test_drop_releases_listener() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        d.mount(&doc);
        assert_eq!(doc.listener_count(), 1);
        drop(d);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn test_unmount_releases_listener() {
        let doc = Document::new();
        let mut d = dropdown(colors());
        d.mount(&doc);
        d.unmount();
        assert!(!d.is_mounted());
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn test_toggle_closes_and_keeps_search() {
        let mut d = dropdown(colors()).searchable(true);
        click(&mut d, trigger_center());
        type_search(&mut d, "bl");
        click(&mut d, trigger_center());
        assert!(!d.is_open());
        assert_eq!(d.search_term(), "bl");
    }

    #[test]
    fn test_escape_dismisses() {
        let mut d = dropdown(colors());
        click(&mut d, trigger_center());
        d.on_event(&Event::key(KeyCode::Escape), AT);
        assert!(!d.is_open());
    }

    #[test]
    fn test_keyboard_selection() {
        let mut d = dropdown(colors());
        click(&mut d, trigger_center());
        d.on_event(&Event::key(KeyCode::Down), AT);
        d.on_event(&Event::key(KeyCode::Down), AT);
        let msg = d.on_event(&Event::key(KeyCode::Enter), AT);
        assert!(matches!(msg, Some(Msg::Selected(ref o)) if o.label == "Blue"));
    }

    #[test]
    fn test_empty_options_open_to_empty_popup() {
        let mut d = dropdown(Vec::new());
        click(&mut d, trigger_center());
        assert!(d.is_open());
        let mut r = Renderer::new(800.0, 600.0);
        d.draw_at(&mut r, AT, Instant::now() + Duration::from_millis(400));
        assert!(r.overlay_texts().is_empty());
    }

    #[test]
    fn test_expansion_extent_is_capped() {
        assert_eq!(expansion_extent(0), 0.0);
        assert_eq!(expansion_extent(1), DROPDOWN_EXTENT_PER_OPTION);
        assert_eq!(expansion_extent(50), DROPDOWN_MAX_POPUP_EXTENT);
    }

    #[test]
    fn test_long_list_scrolls() {
        let options: Vec<_> = (0..20)
            .map(|i| DropdownOption::shared(format!("Item {i}"), i.to_string()))
            .collect();
        let mut d = dropdown(options);
        click(&mut d, trigger_center());
        let (x, y) = row_center(&d, 0);
        d.on_event(&Event::MouseScroll { delta: 1.0, position: (x, y) }, AT);

        let msg = click(&mut d, (x, y));
        assert!(matches!(msg, Some(Msg::Selected(ref o)) if o.label == "Item 1"));
    }

    #[test]
    fn test_width_follows_size() {
        let mut d = dropdown(colors()).size(DropdownSize::Large);
        assert_eq!(d.layout(Size::new(1000.0, 1000.0)).width, 256.0);
        d.set_size(DropdownSize::Small);
        assert_eq!(d.layout(Size::new(1000.0, 1000.0)).width, 128.0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut s = DropdownState::default();
        s.scroll_by(5, 10, 6);
        assert_eq!(s.scroll_offset, 4);
        s.scroll_by(-10, 10, 6);
        assert_eq!(s.scroll_offset, 0);
        s.scroll_by(3, 4, 6);
        assert_eq!(s.scroll_offset, 0);
    }
}
