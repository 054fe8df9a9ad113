//! Terminal command parsing.

use tvguide_core::input::{Button, InputEvent};

pub const HELP: &str = "keys: h/j/k/l (or left/down/up/right) move, n/p page, \
                        <enter> select, m reminder, s <url> choose stream, \
                        x remove stream, b back, q quit";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(InputEvent),
    /// Use `url` as the focused channel's stream.
    ChooseStream(String),
    /// Forget the focused channel's chosen stream.
    RemoveStream,
}

/// Map one line typed at the prompt to a command.
///
/// An empty line is the Enter key.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if let Some((verb, url)) = line.split_once(char::is_whitespace)
        && verb.eq_ignore_ascii_case("s")
    {
        let url = url.trim();
        return (!url.is_empty()).then(|| Command::ChooseStream(url.to_string()));
    }
    let button = match line.to_ascii_lowercase().as_str() {
        "h" | "left" => Button::Left,
        "j" | "down" => Button::Down,
        "k" | "up" => Button::Up,
        "l" | "right" => Button::Right,
        "n" | "pgdn" => Button::PageDown,
        "p" | "pgup" => Button::PageUp,
        "" | "enter" => Button::Select,
        "m" | "menu" => Button::ContextMenu,
        "b" | "back" => Button::Back,
        "x" => return Some(Command::RemoveStream),
        "q" | "quit" | "exit" => return Some(Command::Input(InputEvent::Quit)),
        _ => return None,
    };
    Some(Command::Input(InputEvent::ButtonPress(button)))
}
