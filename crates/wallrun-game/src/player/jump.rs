//! Jump input buffering
//!
//! A jump press is remembered for a short window so that pressing slightly
//! before landing (or before touching a wall) still jumps on the first frame it
//! becomes possible.

/// Buffered jump request
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JumpBuffer {
    /// No jump requested
    #[default]
    Idle,
    /// A jump was requested and may be consumed for `remaining` more seconds
    Armed { remaining: f32 },
}

impl JumpBuffer {
    /// Arm the buffer for `duration` seconds, replacing any earlier request
    pub fn arm(&mut self, duration: f32) {
        *self = if duration > 0.0 {
            JumpBuffer::Armed { remaining: duration }
        } else {
            JumpBuffer::Idle
        };
    }

    /// Whether a buffered jump can be consumed right now
    pub fn is_available(&self) -> bool {
        matches!(self, JumpBuffer::Armed { .. })
    }

    /// Take the buffered jump, if any. Always leaves the buffer idle.
    pub fn consume(&mut self) -> bool {
        let available = self.is_available();
        *self = JumpBuffer::Idle;
        available
    }

    /// Count the window down, expiring the request once it runs out
    pub fn tick(&mut self, dt: f32) {
        if let JumpBuffer::Armed { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = JumpBuffer::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_once() {
        let mut buffer = JumpBuffer::default();
        assert!(!buffer.consume());

        buffer.arm(0.25);
        assert!(buffer.is_available());
        assert!(buffer.consume());
        assert!(!buffer.consume());
        assert_eq!(buffer, JumpBuffer::Idle);
    }

    #[test]
    fn test_expires_without_effect() {
        let mut buffer = JumpBuffer::default();
        buffer.arm(0.25);

        for _ in 0..14 {
            buffer.tick(1.0 / 60.0);
        }
        assert!(buffer.is_available());

        for _ in 0..2 {
            buffer.tick(1.0 / 60.0);
        }
        assert!(!buffer.is_available());
    }

    #[test]
    fn test_rearm_restarts_window() {
        let mut buffer = JumpBuffer::default();
        buffer.arm(0.1);
        buffer.tick(0.08);
        buffer.arm(0.1);
        buffer.tick(0.08);
        assert!(buffer.is_available());
    }

    #[test]
    fn test_zero_window_never_arms() {
        let mut buffer = JumpBuffer::default();
        buffer.arm(0.0);
        assert!(!buffer.is_available());
    }
}
