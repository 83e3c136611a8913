//! `InputField` widget: a labeled text entry with decorations.
//!
//! The field does not own its value. Typing and the clear action emit
//! [`TextChanged`] with the proposed value and invoke the `on_change`
//! callback; the caller decides whether to apply it with
//! [`InputField::set_value`]. The only state the field keeps for itself is
//! whether a password is currently revealed, plus focus.

use crate::icon::Icon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use trellis_core::{
    AccessibleRole, Canvas, Color, Constraints, Event, FontWeight, Key, LayoutResult, Message,
    Point, Rect, Size, TextStyle, TypeId, Widget,
};

const LABEL_FONT_SIZE: f32 = 14.0;
const LABEL_GAP: f32 = 4.0;
const MESSAGE_FONT_SIZE: f32 = 14.0;
const MESSAGE_GAP: f32 = 4.0;
const LINE_HEIGHT: f32 = 1.5;
const ICON_SIZE: f32 = 20.0;
const ICON_SPACING: f32 = 8.0;
const ICON_TRAY_PADDING: f32 = 12.0;
const PREFERRED_WIDTH: f32 = 320.0;
const MASK_CHAR: char = '•';

/// Semantic type of the entered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Plain text
    #[default]
    Text,
    /// Masked secret
    Password,
    /// Email address
    Email,
    /// Numeric text
    Number,
}

impl InputType {
    /// Whether `c` may be typed into a field of this type.
    #[must_use]
    pub const fn accepts(self, c: char) -> bool {
        match self {
            Self::Number => matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E'),
            Self::Text | Self::Password | Self::Email => true,
        }
    }
}

/// Visual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Gray background, no visible border
    Filled,
    /// White background with a gray border
    #[default]
    Outlined,
    /// Transparent until focused
    Ghost,
}

impl Variant {
    /// Every variant.
    pub const ALL: [Self; 3] = [Self::Filled, Self::Outlined, Self::Ghost];

    fn colors(self, focused: bool) -> (Color, Color) {
        match (self, focused) {
            (Self::Outlined, false) => (Color::WHITE, Color::GRAY_300),
            (Self::Filled, false) => (Color::GRAY_100, Color::TRANSPARENT),
            (Self::Ghost, false) => (Color::TRANSPARENT, Color::TRANSPARENT),
            (Self::Outlined | Self::Filled | Self::Ghost, true) => {
                (Color::WHITE, Color::INDIGO_500)
            }
        }
    }
}

/// Size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSize {
    /// Small
    Sm,
    /// Medium
    #[default]
    Md,
    /// Large
    Lg,
}

impl InputSize {
    /// Every size.
    pub const ALL: [Self; 3] = [Self::Sm, Self::Md, Self::Lg];

    /// Horizontal and vertical padding inside the control.
    #[must_use]
    pub const fn padding(self) -> (f32, f32) {
        match self {
            Self::Sm => (8.0, 4.0),
            Self::Md => (12.0, 8.0),
            Self::Lg => (16.0, 12.0),
        }
    }

    /// Font size of the entered text.
    #[must_use]
    pub const fn font_size(self) -> f32 {
        match self {
            Self::Sm => 14.0,
            Self::Md => 16.0,
            Self::Lg => 18.0,
        }
    }

    /// Height of the control box.
    #[must_use]
    pub fn control_height(self) -> f32 {
        let (_, pad_y) = self.padding();
        self.font_size().mul_add(LINE_HEIGHT, 2.0 * pad_y)
    }
}

/// Text shown under the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMessage<'a> {
    /// Validation error (field is invalid)
    Error(&'a str),
    /// Guidance (field is valid)
    Helper(&'a str),
}

impl<'a> InputMessage<'a> {
    /// The message text.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        match *self {
            Self::Error(s) | Self::Helper(s) => s,
        }
    }
}

/// Message emitted with a proposed new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanged {
    /// The proposed value
    pub value: String,
}

/// Message emitted when Enter is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSubmitted {
    /// The current value
    pub value: String,
}

/// Callback receiving every proposed value.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Decorated text input.
#[derive(Default)]
pub struct InputField {
    value: String,
    label: Option<String>,
    placeholder: Option<String>,
    helper_text: Option<String>,
    error_message: Option<String>,
    disabled: bool,
    invalid: bool,
    loading: bool,
    input_type: InputType,
    variant: Variant,
    size: InputSize,
    revealed: bool,
    focused: bool,
    on_change: Option<ChangeHandler>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("label", &self.label)
            .field("input_type", &self.input_type)
            .field("variant", &self.variant)
            .field("size", &self.size)
            .field("disabled", &self.disabled)
            .field("invalid", &self.invalid)
            .field("loading", &self.loading)
            .field("revealed", &self.revealed)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl InputField {
    /// Create an empty outlined, medium text field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the label shown above the control.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Set the helper text.
    #[must_use]
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Set the error message, shown only while invalid.
    #[must_use]
    pub fn error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = Some(text.into());
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set invalid state.
    #[must_use]
    pub const fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Set loading state.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the input type.
    #[must_use]
    pub const fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Set the visual variant.
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size preset.
    #[must_use]
    pub const fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    /// Register the change callback.
    #[must_use]
    pub fn on_change(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Apply a value chosen by the caller.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Start or stop the busy state. Loading also disables the field.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.drop_focus_if_disabled();
    }

    /// Enable or disable the field.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.drop_focus_if_disabled();
    }

    /// Mark the value invalid. Password visibility is kept.
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Replace the error text shown while invalid.
    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    /// Replace the helper text shown while valid.
    pub fn set_helper_text(&mut self, text: Option<String>) {
        self.helper_text = text;
    }

    // A disabled field ignores events, FocusOut included.
    fn drop_focus_if_disabled(&mut self) {
        if self.is_disabled() {
            self.focused = false;
        }
    }

    // === Accessors ===

    /// Current value.
    #[must_use]
    pub fn get_value(&self) -> &str {
        &self.value
    }

    /// Label text.
    #[must_use]
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Placeholder text.
    #[must_use]
    pub fn get_placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Declared input type, unaffected by password reveal.
    #[must_use]
    pub const fn get_input_type(&self) -> InputType {
        self.input_type
    }

    /// Visual variant.
    #[must_use]
    pub const fn get_variant(&self) -> Variant {
        self.variant
    }

    /// Size preset.
    #[must_use]
    pub const fn get_size(&self) -> InputSize {
        self.size
    }

    /// Whether the field is marked invalid.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Whether the field shows the busy indicator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the field has keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether a password is currently revealed.
    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    // === Derived state ===

    /// Disabled explicitly or while loading.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled || self.loading
    }

    /// Type the control renders with: a revealed password renders as text.
    #[must_use]
    pub const fn effective_type(&self) -> InputType {
        match self.input_type {
            InputType::Password if self.revealed => InputType::Text,
            other => other,
        }
    }

    /// Value as rendered, masked while the effective type is password.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.effective_type() == InputType::Password {
            std::iter::repeat(MASK_CHAR)
                .take(self.value.chars().count())
                .collect()
        } else {
            self.value.clone()
        }
    }

    /// Whether the clear action is offered.
    #[must_use]
    pub fn shows_clear(&self) -> bool {
        !self.loading && !self.value.is_empty() && !self.is_disabled()
    }

    /// Whether the password visibility toggle is offered.
    #[must_use]
    pub const fn shows_visibility_toggle(&self) -> bool {
        matches!(self.input_type, InputType::Password) && !self.is_disabled()
    }

    /// Whether the busy indicator is shown.
    #[must_use]
    pub const fn shows_spinner(&self) -> bool {
        self.loading
    }

    /// Error or helper text to show under the control, never both.
    #[must_use]
    pub fn message(&self) -> Option<InputMessage<'_>> {
        if self.invalid {
            self.error_message.as_deref().map(InputMessage::Error)
        } else {
            self.helper_text.as_deref().map(InputMessage::Helper)
        }
    }

    // === Actions ===

    /// Propose an empty value. The field's own value is left to the caller.
    pub fn clear(&self) -> TextChanged {
        tracing::debug!(label = ?self.label, "clear requested");
        self.propose(String::new())
    }

    /// Flip password visibility.
    pub fn toggle_visibility(&mut self) {
        self.revealed = !self.revealed;
        tracing::debug!(revealed = self.revealed, "password visibility toggled");
    }

    fn propose(&self, value: String) -> TextChanged {
        if let Some(handler) = &self.on_change {
            handler(&value);
        }
        TextChanged { value }
    }

    fn insert_text(&self, text: &str) -> Option<TextChanged> {
        let accepted: String = text
            .chars()
            .filter(|&c| self.input_type.accepts(c))
            .collect();
        if accepted.is_empty() {
            return None;
        }
        let mut value = self.value.clone();
        value.push_str(&accepted);
        Some(self.propose(value))
    }

    fn backspace(&self) -> Option<TextChanged> {
        let mut value = self.value.clone();
        value.pop()?;
        Some(self.propose(value))
    }

    // === Geometry ===

    fn label_height(&self) -> f32 {
        if self.label.is_some() {
            LABEL_FONT_SIZE.mul_add(LINE_HEIGHT, LABEL_GAP)
        } else {
            0.0
        }
    }

    fn message_height(&self) -> f32 {
        if self.message().is_some() {
            MESSAGE_FONT_SIZE.mul_add(LINE_HEIGHT, MESSAGE_GAP)
        } else {
            0.0
        }
    }

    /// The bordered control box.
    #[must_use]
    pub fn control_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y + self.label_height(),
            self.bounds.width,
            self.size.control_height(),
        )
    }

    /// Icons in the right-hand tray, left to right.
    fn tray(&self) -> Vec<Icon> {
        let mut icons = Vec::with_capacity(2);
        if self.shows_spinner() {
            icons.push(Icon::Spinner);
        }
        if self.shows_clear() {
            icons.push(Icon::Close);
        }
        if self.shows_visibility_toggle() {
            icons.push(if self.revealed {
                Icon::EyeOff
            } else {
                Icon::Eye
            });
        }
        icons
    }

    fn tray_rects(&self) -> Vec<(Icon, Rect)> {
        let control = self.control_rect();
        let icons = self.tray();
        let count = icons.len() as f32;
        let width = count.mul_add(ICON_SIZE, (count - 1.0).max(0.0) * ICON_SPACING);
        let mut x = control.right() - ICON_TRAY_PADDING - width;
        let y = control.center().y - ICON_SIZE / 2.0;
        icons
            .into_iter()
            .map(|icon| {
                let rect = Rect::new(x, y, ICON_SIZE, ICON_SIZE);
                x += ICON_SIZE + ICON_SPACING;
                (icon, rect)
            })
            .collect()
    }

    /// Hit area of the clear action, if offered.
    #[must_use]
    pub fn clear_icon_rect(&self) -> Option<Rect> {
        self.tray_rects()
            .into_iter()
            .find(|(icon, _)| *icon == Icon::Close)
            .map(|(_, rect)| rect)
    }

    /// Hit area of the visibility toggle, if offered.
    #[must_use]
    pub fn visibility_icon_rect(&self) -> Option<Rect> {
        self.tray_rects()
            .into_iter()
            .find(|(icon, _)| matches!(icon, Icon::Eye | Icon::EyeOff))
            .map(|(_, rect)| rect)
    }

    // === Painting ===

    fn opacity(&self) -> f32 {
        if self.is_disabled() {
            0.5
        } else {
            1.0
        }
    }

    fn paint_control(&self, canvas: &mut dyn Canvas) {
        let control = self.control_rect();
        let opacity = self.opacity();
        let (mut background, mut border) = self.variant.colors(self.focused);
        if self.is_disabled() {
            background = Color::GRAY_100;
        }
        if self.invalid {
            border = Color::RED_500;
        }
        canvas.fill_rect(control, background.faded(opacity));
        if border.a > 0.0 {
            canvas.stroke_rect(control, border.faded(opacity), 1.0);
        }

        let (pad_x, _) = self.size.padding();
        let baseline = Point::new(control.x + pad_x, control.center().y);
        let font_size = self.size.font_size();
        if self.value.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                let style = TextStyle::sized(font_size, Color::GRAY_500.faded(opacity));
                canvas.draw_text(placeholder, baseline, &style);
            }
        } else {
            let color = if self.invalid {
                Color::RED_600
            } else {
                Color::GRAY_900
            };
            let style = TextStyle::sized(font_size, color.faded(opacity));
            canvas.draw_text(&self.display_text(), baseline, &style);
        }

        for (icon, rect) in self.tray_rects() {
            icon.paint(canvas, rect, Color::GRAY_500);
        }
    }
}

impl Widget for InputField {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            PREFERRED_WIDTH
        };
        let height = self.label_height() + self.size.control_height() + self.message_height();
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(label) = &self.label {
            let style = TextStyle {
                size: LABEL_FONT_SIZE,
                color: Color::GRAY_700,
                weight: FontWeight::Medium,
            };
            let y = self.bounds.y + LABEL_FONT_SIZE * LINE_HEIGHT / 2.0;
            canvas.draw_text(label, Point::new(self.bounds.x, y), &style);
        }

        self.paint_control(canvas);

        if let Some(message) = self.message() {
            let color = match message {
                InputMessage::Error(_) => Color::RED_600,
                InputMessage::Helper(_) => Color::GRAY_500,
            };
            let top = self.control_rect().bottom() + MESSAGE_GAP;
            let y = MESSAGE_FONT_SIZE.mul_add(LINE_HEIGHT / 2.0, top);
            canvas.draw_text(
                message.text(),
                Point::new(self.bounds.x, y),
                &TextStyle::sized(MESSAGE_FONT_SIZE, color),
            );
        }
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        if self.is_disabled() {
            return None;
        }

        match event {
            Event::MouseDown { position, .. } => {
                if self
                    .clear_icon_rect()
                    .is_some_and(|r| r.contains_point(position))
                {
                    return Some(Box::new(self.clear()));
                }
                if self
                    .visibility_icon_rect()
                    .is_some_and(|r| r.contains_point(position))
                {
                    self.toggle_visibility();
                    return None;
                }
                self.focused = self.control_rect().contains_point(position);
            }
            Event::FocusIn => self.focused = true,
            Event::FocusOut => self.focused = false,
            Event::TextInput { text } if self.focused => {
                tracing::trace!(len = text.len(), "text input");
                return self.insert_text(text).map(|m| Box::new(m) as Message);
            }
            Event::KeyDown { key } if self.focused => match key {
                Key::Backspace => return self.backspace().map(|m| Box::new(m) as Message),
                Key::Enter => {
                    return Some(Box::new(TextSubmitted {
                        value: self.value.clone(),
                    }))
                }
                _ => {}
            },
            _ => {}
        }

        None
    }

    fn is_interactive(&self) -> bool {
        !self.is_disabled()
    }

    fn is_focusable(&self) -> bool {
        !self.is_disabled()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.label.as_deref().or(self.placeholder.as_deref())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use trellis_core::RecordingCanvas;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = Arc::clone(&seen);
        (seen, move |v: &str| sink.lock().unwrap().push(v.to_string()))
    }

    fn laid_out(mut field: InputField) -> InputField {
        let size = field.measure(Constraints::loose(Size::new(320.0, 400.0)));
        field.layout(Rect::from_size(size));
        field
    }

    fn texts(field: &InputField) -> Vec<String> {
        let mut canvas = RecordingCanvas::new();
        field.paint(&mut canvas);
        canvas.texts().into_iter().map(str::to_string).collect()
    }

    // ===== Defaults =====

    #[test]
    fn test_defaults() {
        let field = InputField::new();
        assert_eq!(field.get_input_type(), InputType::Text);
        assert_eq!(field.get_variant(), Variant::Outlined);
        assert_eq!(field.get_size(), InputSize::Md);
        assert!(!field.is_disabled());
        assert!(field.message().is_none());
    }

    #[test]
    fn test_enumerations_have_three_members() {
        assert_eq!(Variant::ALL.len(), 3);
        assert_eq!(InputSize::ALL.len(), 3);
    }

    #[test]
    fn test_size_metrics() {
        assert_eq!(InputSize::Sm.padding(), (8.0, 4.0));
        assert_eq!(InputSize::Md.padding(), (12.0, 8.0));
        assert_eq!(InputSize::Lg.padding(), (16.0, 12.0));
        assert_eq!(InputSize::Sm.font_size(), 14.0);
        assert_eq!(InputSize::Lg.font_size(), 18.0);
        assert_eq!(InputSize::Md.control_height(), 40.0);
    }

    #[test]
    fn test_enums_deserialize_lowercase() {
        let t: InputType = serde_json::from_str("\"password\"").unwrap();
        let v: Variant = serde_json::from_str("\"ghost\"").unwrap();
        let s: InputSize = serde_json::from_str("\"lg\"").unwrap();
        assert_eq!((t, v, s), (InputType::Password, Variant::Ghost, InputSize::Lg));
    }

    // ===== Clear =====

    #[test]
    fn test_clear_hidden_for_empty_value() {
        assert!(!InputField::new().shows_clear());
        assert!(InputField::new().value("x").shows_clear());
    }

    #[test]
    fn test_clear_hidden_when_disabled_or_loading() {
        assert!(!InputField::new().value("x").disabled(true).shows_clear());
        assert!(!InputField::new().value("x").loading(true).shows_clear());
    }

    #[test]
    fn test_clear_proposes_empty_without_mutating() {
        let (seen, handler) = recorder();
        let field = InputField::new().value("abc").on_change(handler);
        assert_eq!(field.clear().value, "");
        assert_eq!(field.get_value(), "abc");
        assert_eq!(*seen.lock().unwrap(), [""]);
    }

    // ===== Password =====

    #[test]
    fn test_password_reveal_cycle() {
        let mut field = InputField::new()
            .input_type(InputType::Password)
            .value("hunter2");
        assert_eq!(field.effective_type(), InputType::Password);
        assert_eq!(field.display_text(), "•••••••");

        field.toggle_visibility();
        assert_eq!(field.effective_type(), InputType::Text);
        assert_eq!(field.get_input_type(), InputType::Password);
        assert_eq!(field.display_text(), "hunter2");

        field.toggle_visibility();
        assert_eq!(field.effective_type(), InputType::Password);
    }

    #[test]
    fn test_visibility_toggle_only_for_enabled_password() {
        assert!(InputField::new()
            .input_type(InputType::Password)
            .shows_visibility_toggle());
        assert!(!InputField::new().shows_visibility_toggle());
        assert!(!InputField::new()
            .input_type(InputType::Password)
            .loading(true)
            .shows_visibility_toggle());
    }

    #[test]
    fn test_other_types_never_masked() {
        let field = InputField::new().input_type(InputType::Email).value("a@b.c");
        assert_eq!(field.display_text(), "a@b.c");
    }

    // ===== Messages =====

    #[test]
    fn test_error_wins_over_helper() {
        let field = InputField::new()
            .invalid(true)
            .error_message("bad")
            .helper_text("help");
        assert_eq!(field.message(), Some(InputMessage::Error("bad")));

        let field = laid_out(field);
        let texts = texts(&field);
        assert!(texts.contains(&"bad".to_string()));
        assert!(!texts.contains(&"help".to_string()));
    }

    #[test]
    fn test_invalid_without_error_shows_nothing() {
        let field = InputField::new().invalid(true).helper_text("help");
        assert_eq!(field.message(), None);
    }

    #[test]
    fn test_helper_when_valid() {
        let field = InputField::new().helper_text("help").error_message("bad");
        assert_eq!(field.message().map(|m| m.text()), Some("help"));
    }

    // ===== Events =====

    #[test]
    fn test_typing_proposes_appended_value() {
        let mut field = InputField::new().value("ab");
        field.event(&Event::FocusIn);
        let msg = field.event(&Event::TextInput { text: "c".into() }).unwrap();
        assert_eq!(msg.downcast_ref::<TextChanged>().unwrap().value, "abc");
        assert_eq!(field.get_value(), "ab");
    }

    #[test]
    fn test_typing_requires_focus() {
        let mut field = InputField::new();
        assert!(field.event(&Event::TextInput { text: "c".into() }).is_none());
    }

    #[test]
    fn test_number_rejects_letters() {
        let mut field = InputField::new().input_type(InputType::Number);
        field.event(&Event::FocusIn);
        assert!(field.event(&Event::TextInput { text: "x".into() }).is_none());
        let msg = field.event(&Event::TextInput { text: "1e".into() }).unwrap();
        assert_eq!(msg.downcast_ref::<TextChanged>().unwrap().value, "1e");
    }

    #[test]
    fn test_backspace_drops_last_char() {
        let mut field = InputField::new().value("héllo");
        field.event(&Event::FocusIn);
        let msg = field
            .event(&Event::KeyDown {
                key: Key::Backspace,
            })
            .unwrap();
        assert_eq!(msg.downcast_ref::<TextChanged>().unwrap().value, "héll");

        field.set_value("");
        assert!(field
            .event(&Event::KeyDown {
                key: Key::Backspace
            })
            .is_none());
    }

    #[test]
    fn test_enter_submits() {
        let mut field = InputField::new().value("go");
        field.event(&Event::FocusIn);
        let msg = field.event(&Event::KeyDown { key: Key::Enter }).unwrap();
        assert_eq!(msg.downcast_ref::<TextSubmitted>().unwrap().value, "go");
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut field = InputField::new().disabled(true);
        assert!(field.event(&Event::FocusIn).is_none());
        assert!(!field.is_focused());
        assert!(field.event(&Event::TextInput { text: "a".into() }).is_none());
    }

    // ===== Setters =====

    #[test]
    fn test_reveal_survives_validation_changes() {
        let mut field = InputField::new()
            .input_type(InputType::Password)
            .value("hunter2");
        field.toggle_visibility();

        field.set_invalid(true);
        field.set_error_message(Some("too short".into()));
        assert_eq!(field.effective_type(), InputType::Text);
        assert_eq!(field.display_text(), "hunter2");

        field.set_invalid(false);
        assert_eq!(field.effective_type(), InputType::Text);
    }

    #[test]
    fn test_disabling_drops_focus() {
        let mut field = InputField::new();
        field.event(&Event::FocusIn);
        assert!(field.is_focused());

        field.set_disabled(true);
        assert!(!field.is_focused());
        field.set_disabled(false);
        assert!(!field.is_focused());
        assert!(field.event(&Event::TextInput { text: "a".into() }).is_none());

        field.event(&Event::FocusIn);
        field.set_loading(true);
        assert!(!field.is_focused());
        assert!(field.shows_spinner());
        field.set_loading(false);
        assert!(!field.is_disabled());
    }

    #[test]
    fn test_invalid_and_enabled_keeps_focus() {
        let mut field = InputField::new();
        field.event(&Event::FocusIn);
        field.set_invalid(true);
        field.set_disabled(false);
        assert!(field.is_focused());
    }

    #[test]
    fn test_message_setters() {
        let mut field = InputField::new();
        field.set_helper_text(Some("help".into()));
        assert_eq!(field.message(), Some(InputMessage::Helper("help")));

        field.set_invalid(true);
        assert_eq!(field.message(), None);
        field.set_error_message(Some("bad".into()));
        assert_eq!(field.message(), Some(InputMessage::Error("bad")));

        field.set_error_message(None);
        field.set_invalid(false);
        field.set_helper_text(None);
        assert_eq!(field.message(), None);
    }

    // ===== Layout =====

    #[test]
    fn test_measure_includes_label_and_message() {
        let bare = InputField::new().measure(Constraints::unbounded());
        assert_eq!(bare, Size::new(PREFERRED_WIDTH, 40.0));

        let full = InputField::new()
            .label("Name")
            .helper_text("help")
            .measure(Constraints::unbounded());
        assert_eq!(full.height, 40.0 + 25.0 + 25.0);
    }

    #[test]
    fn test_tray_order_and_placement() {
        let field = laid_out(
            InputField::new()
                .input_type(InputType::Password)
                .value("secret"),
        );
        let clear = field.clear_icon_rect().unwrap();
        let eye = field.visibility_icon_rect().unwrap();
        assert!(clear.x < eye.x);
        assert_eq!(eye.right(), field.control_rect().right() - ICON_TRAY_PADDING);
    }

    #[test]
    fn test_loading_tray_shows_spinner_only() {
        let field = laid_out(
            InputField::new()
                .input_type(InputType::Password)
                .value("x")
                .loading(true),
        );
        assert!(field.shows_spinner());
        assert!(field.clear_icon_rect().is_none());
        assert!(field.visibility_icon_rect().is_none());
    }

    #[test]
    fn test_placeholder_painted_when_empty() {
        let field = laid_out(InputField::new().label("Email").placeholder("you@example.com"));
        assert_eq!(texts(&field), ["Email", "you@example.com"]);
    }

    #[test]
    fn test_accessibility() {
        let field = InputField::new().label("Email");
        assert_eq!(field.accessible_role(), AccessibleRole::TextInput);
        assert_eq!(Widget::accessible_name(&field), Some("Email"));
        assert!(field.is_focusable());
        assert!(!InputField::new().loading(true).is_focusable());
    }
}
