//=========================================================================
// Platform Event Mapper
//
// Converts winit input identifiers into the engine's byte-sized key
// codes and the pointer button bitmask.
//
// The engine key space is ASCII for printable characters plus a block of
// extended codes (0x80 + scan offset) for special keys. Keys outside the
// mapped set return `None` and are ignored by the platform layer.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

//=== Engine Key Codes ====================================================

/// Extended (non-ASCII) engine key codes.
pub(crate) mod keys {
    pub const RIGHT_ARROW: u8 = 0xAE;
    pub const LEFT_ARROW: u8 = 0xAC;
    pub const UP_ARROW: u8 = 0xAD;
    pub const DOWN_ARROW: u8 = 0xAF;

    pub const ESCAPE: u8 = 27;
    pub const ENTER: u8 = 13;
    pub const TAB: u8 = 9;
    pub const BACKSPACE: u8 = 127;

    /// Modifier keys report their right-hand variant; the engine does not
    /// distinguish sides.
    pub const CTRL: u8 = 0x80 + 0x1D;
    pub const ALT: u8 = 0x80 + 0x38;
    pub const SHIFT: u8 = 0x80 + 0x36;

    pub const F1: u8 = 0x80 + 0x3B;
    pub const F2: u8 = 0x80 + 0x3C;
    pub const F3: u8 = 0x80 + 0x3D;
    pub const F4: u8 = 0x80 + 0x3E;
    pub const F5: u8 = 0x80 + 0x3F;
    pub const F6: u8 = 0x80 + 0x40;
    pub const F7: u8 = 0x80 + 0x41;
    pub const F8: u8 = 0x80 + 0x42;
    pub const F9: u8 = 0x80 + 0x43;
    pub const F10: u8 = 0x80 + 0x44;
    pub const F11: u8 = 0x80 + 0x57;
    pub const F12: u8 = 0x80 + 0x58;
}

//=== Key Conversion ======================================================

/// Maps a winit physical key to an engine key code.
///
/// Coverage: arrows, common special keys, modifiers, F1-F12, and the
/// printable ASCII set (letters report lowercase; the engine is
/// case-insensitive). Unmapped keys (numpad, media keys, F13+) return
/// `None`.
pub(crate) fn map_physical_key(key: PhysicalKey) -> Option<u8> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };

    use KeyCode::*;
    let mapped = match code {
        //--- Arrows -------------------------------------------------------
        ArrowRight => keys::RIGHT_ARROW,
        ArrowLeft => keys::LEFT_ARROW,
        ArrowUp => keys::UP_ARROW,
        ArrowDown => keys::DOWN_ARROW,

        //--- Special ------------------------------------------------------
        Escape => keys::ESCAPE,
        Enter => keys::ENTER,
        Tab => keys::TAB,
        Backspace => keys::BACKSPACE,
        Space => b' ',

        //--- Modifiers ----------------------------------------------------
        ControlLeft | ControlRight => keys::CTRL,
        AltLeft | AltRight => keys::ALT,
        ShiftLeft | ShiftRight => keys::SHIFT,

        //--- Function Row -------------------------------------------------
        F1 => keys::F1,
        F2 => keys::F2,
        F3 => keys::F3,
        F4 => keys::F4,
        F5 => keys::F5,
        F6 => keys::F6,
        F7 => keys::F7,
        F8 => keys::F8,
        F9 => keys::F9,
        F10 => keys::F10,
        F11 => keys::F11,
        F12 => keys::F12,

        //--- Letters (lowercase ASCII) ------------------------------------
        KeyA => b'a', KeyB => b'b', KeyC => b'c', KeyD => b'd',
        KeyE => b'e', KeyF => b'f', KeyG => b'g', KeyH => b'h',
        KeyI => b'i', KeyJ => b'j', KeyK => b'k', KeyL => b'l',
        KeyM => b'm', KeyN => b'n', KeyO => b'o', KeyP => b'p',
        KeyQ => b'q', KeyR => b'r', KeyS => b's', KeyT => b't',
        KeyU => b'u', KeyV => b'v', KeyW => b'w', KeyX => b'x',
        KeyY => b'y', KeyZ => b'z',

        //--- Number Row ---------------------------------------------------
        Digit0 => b'0', Digit1 => b'1', Digit2 => b'2', Digit3 => b'3',
        Digit4 => b'4', Digit5 => b'5', Digit6 => b'6', Digit7 => b'7',
        Digit8 => b'8', Digit9 => b'9',

        //--- Punctuation used by the engine -------------------------------
        Comma => b',',
        Period => b'.',
        Minus => b'-',
        Equal => b'=',

        //--- Unmapped -----------------------------------------------------
        _ => return None,
    };

    Some(mapped)
}

//=== Button Conversion ===================================================

/// Maps a winit mouse button to its bit in the pointer button mask.
///
/// bit 0 = left (fire), bit 1 = right (strafe), bit 2 = middle (use).
/// Side and macro buttons are ignored.
pub(crate) fn button_bit(button: MouseButton) -> Option<u32> {
    match button {
        MouseButton::Left => Some(1 << 0),
        MouseButton::Right => Some(1 << 1),
        MouseButton::Middle => Some(1 << 2),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: KeyCode) -> Option<u8> {
        map_physical_key(PhysicalKey::Code(code))
    }

    #[test]
    fn arrows_map_to_extended_codes() {
        assert_eq!(map(KeyCode::ArrowRight), Some(0xAE));
        assert_eq!(map(KeyCode::ArrowLeft), Some(0xAC));
        assert_eq!(map(KeyCode::ArrowUp), Some(0xAD));
        assert_eq!(map(KeyCode::ArrowDown), Some(0xAF));
    }

    #[test]
    fn special_keys_map_to_control_codes() {
        assert_eq!(map(KeyCode::Escape), Some(27));
        assert_eq!(map(KeyCode::Enter), Some(13));
        assert_eq!(map(KeyCode::Backspace), Some(127));
        assert_eq!(map(KeyCode::Space), Some(32));
    }

    #[test]
    fn modifier_sides_collapse() {
        assert_eq!(map(KeyCode::ControlLeft), map(KeyCode::ControlRight));
        assert_eq!(map(KeyCode::ControlLeft), Some(0x9D));
        assert_eq!(map(KeyCode::AltLeft), Some(0xB8));
        assert_eq!(map(KeyCode::ShiftRight), Some(0xB6));
    }

    #[test]
    fn function_row_is_contiguous_through_f10() {
        let f1 = map(KeyCode::F1).unwrap();
        assert_eq!(f1, 0xBB);
        assert_eq!(map(KeyCode::F10), Some(f1 + 9));
        assert_eq!(map(KeyCode::F11), Some(0xD7));
        assert_eq!(map(KeyCode::F12), Some(0xD8));
    }

    #[test]
    fn letters_map_to_lowercase_ascii() {
        assert_eq!(map(KeyCode::KeyW), Some(b'w'));
        assert_eq!(map(KeyCode::KeyA), Some(b'a'));
        assert_eq!(map(KeyCode::KeyS), Some(b's'));
        assert_eq!(map(KeyCode::KeyD), Some(b'd'));
        assert_eq!(map(KeyCode::KeyZ), Some(b'z'));
    }

    #[test]
    fn digits_map_to_ascii() {
        assert_eq!(map(KeyCode::Digit0), Some(b'0'));
        assert_eq!(map(KeyCode::Digit9), Some(b'9'));
    }

    #[test]
    fn unmapped_keys_return_none() {
        assert_eq!(map(KeyCode::F13), None);
        assert_eq!(map(KeyCode::NumpadAdd), None);
        assert_eq!(map(KeyCode::CapsLock), None);
        assert_eq!(map_physical_key(PhysicalKey::Unidentified(
            winit::keyboard::NativeKeyCode::Unidentified,
        )), None);
    }

    #[test]
    fn button_bits_are_distinct() {
        assert_eq!(button_bit(MouseButton::Left), Some(0b001));
        assert_eq!(button_bit(MouseButton::Right), Some(0b010));
        assert_eq!(button_bit(MouseButton::Middle), Some(0b100));
        assert_eq!(button_bit(MouseButton::Back), None);
        assert_eq!(button_bit(MouseButton::Other(7)), None);
    }
}
