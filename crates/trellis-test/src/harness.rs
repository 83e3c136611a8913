//! Test harness for Trellis widgets.

use std::any::Any;
use std::collections::VecDeque;

use trellis_core::{
    Constraints, DrawCommand, Event, Key, Message, MouseButton, Point, RecordingCanvas, Rect,
    Widget,
};

/// Test harness for interacting with a single widget.
///
/// The widget is laid out to fill the viewport width at its measured
/// height. Every message returned from [`Widget::event`] is retained in
/// arrival order.
pub struct Harness<W: Widget> {
    root: W,
    event_queue: VecDeque<Event>,
    viewport: Rect,
    messages: Vec<Message>,
}

impl<W: Widget> Harness<W> {
    /// Create a new harness with a root widget in a 1280x720 viewport.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            messages: Vec::new(),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// The widget under test.
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// Mutate the widget, then lay it out again.
    pub fn update(&mut self, f: impl FnOnce(&mut W)) -> &mut Self {
        f(&mut self.root);
        self.relayout();
        self
    }

    /// Bounds assigned to the widget by the last layout.
    pub fn bounds(&self) -> Rect {
        self.root.bounds()
    }

    // === Event Simulation ===

    /// Simulate a left click at `position`.
    pub fn click(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::MouseMove { position });
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Focus the widget and type `text` one character at a time.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        self.event_queue.push_back(Event::FocusIn);
        for c in text.chars() {
            self.event_queue.push_back(Event::TextInput {
                text: c.to_string(),
            });
        }
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Deliver an arbitrary event.
    pub fn send(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    // === Messages ===

    /// Number of messages received so far.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// All received messages of type `T`, oldest first.
    pub fn messages_of<T: Any + Clone>(&self) -> Vec<T> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .cloned()
            .collect()
    }

    /// Most recent message of type `T`.
    pub fn last_message<T: Any>(&self) -> Option<&T> {
        self.messages.iter().rev().find_map(|m| m.downcast_ref::<T>())
    }

    /// Forget all received messages.
    pub fn clear_messages(&mut self) -> &mut Self {
        self.messages.clear();
        self
    }

    // === Painting ===

    /// Paint the widget into a fresh recording canvas.
    pub fn paint(&self) -> Painted {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        Painted { canvas }
    }

    // === Internal ===

    fn relayout(&mut self) {
        let constraints = Constraints::new(
            self.viewport.width,
            self.viewport.width,
            0.0,
            self.viewport.height,
        );
        let size = self.root.measure(constraints);
        self.root.layout(Rect::new(
            self.viewport.x,
            self.viewport.y,
            size.width,
            size.height,
        ));
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                self.messages.push(message);
            }
        }
    }
}

/// Paint output of a widget, with assertions over the drawn text.
#[derive(Debug)]
pub struct Painted {
    canvas: RecordingCanvas,
}

impl Painted {
    /// Recorded draw commands.
    pub fn commands(&self) -> &[DrawCommand] {
        self.canvas.commands()
    }

    /// Text runs in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.canvas.texts()
    }

    /// Number of text runs equal to `text`.
    pub fn text_count(&self, text: &str) -> usize {
        self.texts().iter().filter(|t| **t == text).count()
    }

    /// Assert that some text run equals `text`.
    ///
    /// # Panics
    ///
    /// Panics if no such text was painted.
    pub fn assert_text_drawn(&self, text: &str) -> &Self {
        assert!(
            self.canvas.has_text(text),
            "Expected text '{text}' to be painted, got {:?}",
            self.texts()
        );
        self
    }

    /// Assert that no text run equals `text`.
    ///
    /// # Panics
    ///
    /// Panics if the text was painted.
    pub fn assert_text_not_drawn(&self, text: &str) -> &Self {
        assert!(
            !self.canvas.has_text(text),
            "Expected text '{text}' not to be painted, got {:?}",
            self.texts()
        );
        self
    }

    /// Assert the relative order of text runs.
    ///
    /// # Panics
    ///
    /// Panics if any of `expected` is missing or they appear out of order.
    pub fn assert_text_order(&self, expected: &[&str]) -> &Self {
        let texts = self.texts();
        let mut last = None;
        for item in expected {
            let pos = texts.iter().position(|t| t == item);
            assert!(pos.is_some(), "Expected text '{item}' in {texts:?}");
            assert!(
                pos > last,
                "Expected {expected:?} in that order, got {texts:?}"
            );
            last = pos;
        }
        self
    }
}
