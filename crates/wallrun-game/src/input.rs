//! Input system with action-based mapping
//!
//! Provides an abstraction layer between raw input events and the movement
//! controller. [`InputSource`] is all the controller sees; [`InputHandler`] is
//! the keyboard/mouse implementation of it.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-frame input consumed by the movement controller
pub trait InputSource {
    /// Movement axis in `[-1, 1]²` (`x` = right, `y` = forward)
    fn movement_axis(&self) -> Vec2;

    /// Look axis accumulated since the last frame
    fn look_axis(&self) -> Vec2;

    /// Whether jump was pressed since the last call; reading clears the edge
    fn take_jump_edge(&mut self) -> bool;

    /// Whether crouch/slide is held
    fn crouch_held(&self) -> bool;
}

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Crouch / slide (Left Ctrl or C by default)
    Crouch,
    /// Pause/unpause (Escape by default)
    Pause,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Mouse movement delta for this frame
    pub mouse_delta: Vec2,
    /// Analog stick movement, overrides keys while outside the dead zone
    pub analog_movement: Vec2,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Clear all input state
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.clear_frame();
        self.analog_movement = Vec2::ZERO;
    }

    fn press(&mut self, action: InputAction) {
        if !self.held.contains(&action) {
            self.just_pressed.insert(action);
        }
        self.held.insert(action);
    }

    fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
        self.just_released.insert(action);
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        // Actions
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ControlLeft, InputAction::Crouch);
        bindings.bind(KeyCode::KeyC, InputAction::Crouch);
        bindings.bind(KeyCode::Escape, InputAction::Pause);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to `action`
    pub fn keys_for(&self, action: InputAction) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
    /// Analog sticks below this length are ignored
    pub dead_zone: f32,
    /// Jump pressed and not yet taken by the controller
    jump_edge: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
            dead_zone: 0.15,
            jump_edge: false,
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                if action == InputAction::Jump && !self.state.is_held(action) {
                    self.jump_edge = true;
                }
                self.state.press(action);
            }
            ElementState::Released => self.state.release(action),
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        self.state.mouse_delta += Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity * y_mult,
        );
    }

    /// Set the analog stick position (`x` = right, `y` = forward)
    pub fn set_analog_movement(&mut self, stick: Vec2) {
        self.state.analog_movement = stick.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }

    /// Drop everything, including a pending jump
    pub fn clear(&mut self) {
        self.state.clear_all();
        self.jump_edge = false;
    }

    fn key_axis(&self) -> Vec2 {
        let axis = |positive, negative| {
            let mut value = 0.0;
            if self.state.is_held(positive) {
                value += 1.0;
            }
            if self.state.is_held(negative) {
                value -= 1.0;
            }
            value
        };
        Vec2::new(
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBackward),
        )
    }
}

impl InputSource for InputHandler {
    fn movement_axis(&self) -> Vec2 {
        let analog = self.state.analog_movement;
        let axis = if analog.length() > self.dead_zone {
            analog
        } else {
            self.key_axis()
        };
        // Diagonals must not be faster than straight lines
        axis.clamp_length_max(1.0)
    }

    fn look_axis(&self) -> Vec2 {
        self.state.mouse_delta
    }

    fn take_jump_edge(&mut self) -> bool {
        std::mem::take(&mut self.jump_edge)
    }

    fn crouch_held(&self) -> bool {
        self.state.is_held(InputAction::Crouch)
    }
}
