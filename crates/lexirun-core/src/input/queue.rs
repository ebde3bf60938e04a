/// Player commands forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    LaneLeft,
    LaneRight,
    Jump,
    /// Slam down while airborne.
    FastDrop,
    /// Trigger the owned ability (immortality).
    ActivateAbility,
}

impl InputEvent {
    /// Map a `KeyboardEvent.code` (or its lowercase key) to a command.
    pub fn from_key(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" | "a" => Some(InputEvent::LaneLeft),
            "ArrowRight" | "KeyD" | "d" => Some(InputEvent::LaneRight),
            "ArrowUp" | "KeyW" | "w" => Some(InputEvent::Jump),
            "ArrowDown" | "KeyS" | "s" => Some(InputEvent::FastDrop),
            "Space" | "Enter" | " " => Some(InputEvent::ActivateAbility),
            _ => None,
        }
    }
}

/// A queue of input events.
/// JS pushes commands as they arrive; the session drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Drop pending events without handling them.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
