//! Key-to-character translation

use super::Key;

/// Unshifted and shifted text produced by a key, if any
pub fn key_text(key: Key) -> Option<(&'static str, &'static str)> {
    let pair = match key {
        Key::A => ("a", "A"),
        Key::B => ("b", "B"),
        Key::C => ("c", "C"),
        Key::D => ("d", "D"),
        Key::E => ("e", "E"),
        Key::F => ("f", "F"),
        Key::G => ("g", "G"),
        Key::H => ("h", "H"),
        Key::I => ("i", "I"),
        Key::J => ("j", "J"),
        Key::K => ("k", "K"),
        Key::L => ("l", "L"),
        Key::M => ("m", "M"),
        Key::N => ("n", "N"),
        Key::O => ("o", "O"),
        Key::P => ("p", "P"),
        Key::Q => ("q", "Q"),
        Key::R => ("r", "R"),
        Key::S => ("s", "S"),
        Key::T => ("t", "T"),
        Key::U => ("u", "U"),
        Key::V => ("v", "V"),
        Key::W => ("w", "W"),
        Key::X => ("x", "X"),
        Key::Y => ("y", "Y"),
        Key::Z => ("z", "Z"),
        Key::Num0 => ("0", ")"),
        Key::Num1 => ("1", "!"),
        Key::Num2 => ("2", "@"),
        Key::Num3 => ("3", "#"),
        Key::Num4 => ("4", "$"),
        Key::Num5 => ("5", "%"),
        Key::Num6 => ("6", "^"),
        Key::Num7 => ("7", "&"),
        Key::Num8 => ("8", "*"),
        Key::Num9 => ("9", "("),
        Key::Kp0 => ("0", "0"),
        Key::Kp1 => ("1", "1"),
        Key::Kp2 => ("2", "2"),
        Key::Kp3 => ("3", "3"),
        Key::Kp4 => ("4", "4"),
        Key::Kp5 => ("5", "5"),
        Key::Kp6 => ("6", "6"),
        Key::Kp7 => ("7", "7"),
        Key::Kp8 => ("8", "8"),
        Key::Kp9 => ("9", "9"),
        Key::KpDecimal => (".", "."),
        Key::KpDivide => ("/", "/"),
        Key::KpMultiply => ("*", "*"),
        Key::KpSubtract => ("-", "-"),
        Key::KpAdd => ("+", "+"),
        Key::Space => (" ", " "),
        Key::Apostrophe => ("'", "\""),
        Key::Comma => (",", "<"),
        Key::Minus => ("-", "_"),
        Key::Period => (".", ">"),
        Key::Slash => ("/", "?"),
        Key::Semicolon => (";", ":"),
        Key::Equal => ("=", "+"),
        Key::LeftBracket => ("[", "{"),
        Key::Backslash => ("\\", "|"),
        Key::RightBracket => ("]", "}"),
        Key::GraveAccent => ("`", "~"),
        _ => return None,
    };
    Some(pair)
}

/// Text typed by `key` with the given shift state
#[inline]
pub fn translate(key: Key, shift: bool) -> Option<&'static str> {
    key_text(key).map(|(plain, shifted)| if shift { shifted } else { plain })
}
