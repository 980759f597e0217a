//! Input state with per-frame edge detection
//!
//! Every key and mouse button runs the same four-state machine:
//!
//! ```text
//!          os down              end_frame
//! None ──────────────► Pressed ──────────► Held
//!   ▲                     │    os up         │
//!   │     end_frame       ▼                  ▼
//!   └──────────────── Released ◄─────────────┘
//! ```
//!
//! OS callbacks only set `Pressed`/`Released`; the frame loop calls
//! [`InputState::end_frame`] once per frame (after rendering) to decay the
//! edges, so `Pressed` and `Released` are each observable for exactly one
//! frame no matter how often the state is polled.

use std::collections::HashMap;
use winit::keyboard::{KeyCode, ModifiersState};

/// Number of tracked mouse buttons (left, right, middle, back, forward)
pub const MOUSE_BUTTON_COUNT: usize = 5;

/// Edge-aware state of a single key or button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Up, and was up last frame
    #[default]
    None,
    /// Went down this frame
    Pressed,
    /// Down, and was down last frame
    Held,
    /// Went up this frame
    Released,
}

impl ButtonState {
    /// Transition for an OS "down" event. Repeated downs (OS auto-repeat,
    /// duplicate events) never regress a held key to a fresh press edge.
    fn on_down(self) -> Self {
        match self {
            ButtonState::None | ButtonState::Released => ButtonState::Pressed,
            ButtonState::Pressed | ButtonState::Held => self,
        }
    }

    /// Transition for an OS "up" event. An up without a prior down stays
    /// `None` rather than fabricating a release edge.
    fn on_up(self) -> Self {
        match self {
            ButtonState::Pressed | ButtonState::Held => ButtonState::Released,
            ButtonState::None | ButtonState::Released => self,
        }
    }

    /// End-of-frame decay: press and release edges last exactly one frame
    fn advance(self) -> Self {
        match self {
            ButtonState::Pressed => ButtonState::Held,
            ButtonState::Released => ButtonState::None,
            ButtonState::None | ButtonState::Held => self,
        }
    }

    fn is_down(self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Held)
    }
}

/// Tracks keyboard, mouse, and pointer state for one frame loop.
///
/// Confined to the loop thread: OS callbacks mutate it, user callbacks
/// query it, and the loop advances it once per frame.
pub struct InputState {
    /// Key state table; absent entries are `ButtonState::None`. Entries are
    /// created on first press and never removed.
    keys: HashMap<KeyCode, ButtonState>,
    /// Mouse button table, indexed 0..MOUSE_BUTTON_COUNT
    mouse_buttons: [ButtonState; MOUSE_BUTTON_COUNT],
    /// Active modifier keys
    modifiers: ModifiersState,

    /// Current pointer position in window pixels
    mouse_position: (f64, f64),
    /// Pointer position at the start of the current frame
    prev_mouse_position: (f64, f64),
    /// Raw accumulated pointer delta (device motion, for locked cursor)
    raw_mouse_delta: (f64, f64),

    /// Action map: action name -> key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
    /// Action map: action name -> mouse button indices
    mouse_button_map: HashMap<String, Vec<u32>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            mouse_buttons: [ButtonState::None; MOUSE_BUTTON_COUNT],
            modifiers: ModifiersState::empty(),
            mouse_position: (0.0, 0.0),
            prev_mouse_position: (0.0, 0.0),
            raw_mouse_delta: (0.0, 0.0),
            action_map: HashMap::new(),
            mouse_button_map: HashMap::new(),
        }
    }

    // --- OS event entry points ---

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        *state = state.on_down();
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        *state = state.on_up();
    }

    /// Process a mouse button press; out-of-range indices are ignored
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if let Some(state) = self.mouse_buttons.get_mut(button as usize) {
            *state = state.on_down();
        }
    }

    /// Process a mouse button release; out-of-range indices are ignored
    pub fn process_mouse_button_up(&mut self, button: u32) {
        if let Some(state) = self.mouse_buttons.get_mut(button as usize) {
            *state = state.on_up();
        }
    }

    /// Process a pointer move (cursor position mode)
    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
    }

    /// Process raw pointer delta (device motion, for locked cursor)
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_mouse_delta.0 += dx;
        self.raw_mouse_delta.1 += dy;
    }

    /// Update the active modifier mask
    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Advance all edges at the end of a frame. Call exactly once per
    /// frame, after rendering, so callbacks within the frame observe that
    /// frame's press/release edges.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            *state = state.advance();
        }
        for state in &mut self.mouse_buttons {
            *state = state.advance();
        }
        self.prev_mouse_position = self.mouse_position;
        self.raw_mouse_delta = (0.0, 0.0);
    }

    // --- Queries (pure, total) ---

    fn key_state(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    /// True only on the frame the key went down
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.key_state(key) == ButtonState::Pressed
    }

    /// True while the key is down (including the press frame)
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.key_state(key).is_down()
    }

    /// True only on the frame the key went up
    pub fn is_released(&self, key: KeyCode) -> bool {
        self.key_state(key) == ButtonState::Released
    }

    fn mouse_state(&self, button: u32) -> ButtonState {
        self.mouse_buttons
            .get(button as usize)
            .copied()
            .unwrap_or_default()
    }

    /// True only on the frame the button went down
    pub fn mouse_pressed(&self, button: u32) -> bool {
        self.mouse_state(button) == ButtonState::Pressed
    }

    /// True while the button is down
    pub fn mouse_held(&self, button: u32) -> bool {
        self.mouse_state(button).is_down()
    }

    /// True only on the frame the button went up
    pub fn mouse_released(&self, button: u32) -> bool {
        self.mouse_state(button) == ButtonState::Released
    }

    /// Active modifier mask
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// True if all modifiers in `mask` are currently active
    pub fn is_modified(&self, mask: ModifiersState) -> bool {
        self.modifiers.contains(mask)
    }

    /// Latest pointer position in window pixels
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_position
    }

    /// Pointer movement since the start of the current frame.
    ///
    /// The reference point advances once per frame in [`end_frame`], not
    /// per OS callback, so the delta is stable however often it is polled
    /// within a frame.
    ///
    /// [`end_frame`]: InputState::end_frame
    pub fn mouse_delta(&self) -> (f64, f64) {
        (
            self.mouse_position.0 - self.prev_mouse_position.0,
            self.mouse_position.1 - self.prev_mouse_position.1,
        )
    }

    /// Raw pointer delta accumulated this frame (device motion)
    pub fn raw_mouse_delta(&self) -> (f64, f64) {
        self.raw_mouse_delta
    }

    // --- Action bindings ---

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Bind an action to one or more mouse button indices
    pub fn bind_mouse_action(&mut self, action: impl Into<String>, buttons: Vec<u32>) {
        self.mouse_button_map.insert(action.into(), buttons);
    }

    /// Is any binding of this action currently down? Unknown actions are
    /// silently false.
    pub fn action_held(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.is_held(*k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_held(*b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// Did any binding of this action go down this frame?
    pub fn action_just_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.is_pressed(*k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_pressed(*b)))
            .unwrap_or(false);
        key_match || mouse_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_keys_are_false_forever() {
        let mut input = InputState::new();
        for _ in 0..3 {
            assert!(!input.is_pressed(KeyCode::KeyQ));
            assert!(!input.is_held(KeyCode::KeyQ));
            assert!(!input.is_released(KeyCode::KeyQ));
            input.end_frame();
        }
    }

    #[test]
    fn press_hold_release_sequence() {
        let mut input = InputState::new();

        // down, advance, advance, up, advance
        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_pressed(KeyCode::KeyW));
        assert!(input.is_held(KeyCode::KeyW));
        assert!(!input.is_released(KeyCode::KeyW));

        input.end_frame();
        assert!(!input.is_pressed(KeyCode::KeyW));
        assert!(input.is_held(KeyCode::KeyW));

        input.end_frame();
        assert!(input.is_held(KeyCode::KeyW));

        input.process_key_up(KeyCode::KeyW);
        assert!(input.is_released(KeyCode::KeyW));
        assert!(!input.is_held(KeyCode::KeyW));

        input.end_frame();
        assert!(!input.is_pressed(KeyCode::KeyW));
        assert!(!input.is_held(KeyCode::KeyW));
        assert!(!input.is_released(KeyCode::KeyW));
    }

    #[test]
    fn duplicate_down_keeps_press() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::Space);
        input.process_key_down(KeyCode::Space);
        assert!(input.is_pressed(KeyCode::Space));

        input.end_frame();
        // Auto-repeat down while held must not create a new press edge
        input.process_key_down(KeyCode::Space);
        assert!(!input.is_pressed(KeyCode::Space));
        assert!(input.is_held(KeyCode::Space));
    }

    #[test]
    fn up_without_down_is_silent() {
        let mut input = InputState::new();
        input.process_key_up(KeyCode::KeyA);
        assert!(!input.is_released(KeyCode::KeyA));
        assert!(!input.is_held(KeyCode::KeyA));
    }

    #[test]
    fn repress_after_release_same_frame() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyE);
        input.process_key_up(KeyCode::KeyE);
        // Down again before the frame ends: a fresh press edge
        input.process_key_down(KeyCode::KeyE);
        assert!(input.is_pressed(KeyCode::KeyE));
    }

    #[test]
    fn mouse_buttons_follow_same_machine() {
        let mut input = InputState::new();
        input.process_mouse_button_down(0);
        assert!(input.mouse_pressed(0));
        assert!(input.mouse_held(0));

        input.end_frame();
        assert!(!input.mouse_pressed(0));
        assert!(input.mouse_held(0));

        input.process_mouse_button_up(0);
        assert!(input.mouse_released(0));
        input.end_frame();
        assert!(!input.mouse_held(0));
    }

    #[test]
    fn out_of_range_mouse_button_is_silent() {
        let mut input = InputState::new();
        input.process_mouse_button_down(99);
        assert!(!input.mouse_pressed(99));
        assert!(!input.mouse_held(99));
        assert!(!input.mouse_released(99));
    }

    #[test]
    fn mouse_delta_is_per_frame() {
        let mut input = InputState::new();
        input.process_mouse_move(100.0, 200.0);
        input.end_frame();

        // Two moves within one frame: delta measures from the frame start
        input.process_mouse_move(110.0, 205.0);
        input.process_mouse_move(112.0, 206.0);
        assert_eq!(input.mouse_delta(), (12.0, 6.0));
        assert_eq!(input.mouse_position(), (112.0, 206.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn raw_delta_accumulates_and_clears() {
        let mut input = InputState::new();
        input.process_mouse_raw_delta(1.0, -2.0);
        input.process_mouse_raw_delta(0.5, 0.5);
        assert_eq!(input.raw_mouse_delta(), (1.5, -1.5));

        input.end_frame();
        assert_eq!(input.raw_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn modifier_mask() {
        let mut input = InputState::new();
        input.set_modifiers(ModifiersState::SHIFT | ModifiersState::CONTROL);
        assert!(input.is_modified(ModifiersState::SHIFT));
        assert!(input.is_modified(ModifiersState::SHIFT | ModifiersState::CONTROL));
        assert!(!input.is_modified(ModifiersState::ALT));
    }

    #[test]
    fn action_bindings() {
        let mut input = InputState::new();
        input.bind_action("jump", vec![KeyCode::Space, KeyCode::KeyJ]);
        input.bind_mouse_action("fire", vec![0]);

        assert!(!input.action_held("jump"));
        assert!(!input.action_held("unbound"));

        input.process_key_down(KeyCode::KeyJ);
        assert!(input.action_held("jump"));
        assert!(input.action_just_pressed("jump"));

        input.end_frame();
        assert!(input.action_held("jump"));
        assert!(!input.action_just_pressed("jump"));

        input.process_mouse_button_down(0);
        assert!(input.action_just_pressed("fire"));
    }
}
