// ABOUTME: Key binding descriptions for the footer and the help overlay
// ABOUTME: Only lists actions the current view actually supports

use crate::list::FilterState;
use crate::menu::{Capabilities, InputState};
use crate::message::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: &'static str,
    pub action: &'static str,
}

const fn bind(keys: &'static str, action: &'static str) -> KeyBinding {
    KeyBinding { keys, action }
}

/// Every binding available in `view`, in help order
pub fn bindings(view: View, caps: Capabilities) -> Vec<KeyBinding> {
    let mut keys = vec![bind("↑/k ↓/j", "move"), bind("Home End PgUp PgDn", "jump")];

    match view {
        View::Boards => keys.extend([bind("enter", "open board"), bind("tab", "tags")]),
        View::Tags => keys.extend([bind("enter", "open tag"), bind("tab", "boards")]),
        View::ItemsByBoard | View::ItemsByTag => keys.extend([
            bind("tab", "next"),
            bind("shift+tab", "previous"),
            bind("esc/backspace", "back"),
        ]),
    }

    if caps.create {
        keys.push(bind("a", "add"));
    }
    if caps.rename {
        keys.push(bind("r", "rename"));
    }
    if caps.update_tags {
        keys.push(bind("t", "tags"));
    }
    if caps.toggle_complete {
        keys.push(bind("space", "toggle done"));
        keys.push(bind("h", "hide done"));
    }
    keys.push(bind("d", "delete"));
    keys.push(bind("y", "copy"));
    if caps.paste {
        keys.push(bind("p", "paste"));
    }
    keys.extend([
        bind("R", "refresh"),
        bind("/", "filter"),
        bind("?", "help"),
        bind("q", "quit"),
    ]);
    keys
}

/// The one-line hint shown under the list
pub fn short_help(view: View, input: InputState, filter: FilterState) -> String {
    let keys: Vec<KeyBinding> = match (input, filter) {
        (InputState::Default, FilterState::Filtering) => {
            vec![bind("enter", "apply filter"), bind("esc", "cancel")]
        }
        (InputState::Default, _) => match view {
            View::Boards => vec![
                bind("enter", "open"),
                bind("a", "add"),
                bind("tab", "tags"),
                bind("?", "help"),
            ],
            View::Tags => vec![bind("enter", "open"), bind("tab", "boards"), bind("?", "help")],
            View::ItemsByBoard => vec![
                bind("space", "toggle"),
                bind("a", "add"),
                bind("esc", "back"),
                bind("?", "help"),
            ],
            View::ItemsByTag => {
                vec![bind("space", "toggle"), bind("esc", "back"), bind("?", "help")]
            }
        },
        _ => vec![bind("enter", "submit"), bind("esc", "cancel")],
    };

    keys.iter()
        .map(|key| format!("{} {}", key.keys, key.action))
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(bindings: &[KeyBinding], keys: &str) -> bool {
        bindings.iter().any(|b| b.keys == keys)
    }

    #[test]
    fn test_bindings_follow_capabilities() {
        let tags = bindings(View::Tags, Capabilities::default());
        assert!(!has(&tags, "a"));
        assert!(!has(&tags, "p"));
        assert!(has(&tags, "d"));

        let items = bindings(
            View::ItemsByBoard,
            Capabilities {
                create: true,
                paste: true,
                toggle_complete: true,
                ..Capabilities::default()
            },
        );
        assert!(has(&items, "a"));
        assert!(has(&items, "p"));
        assert!(has(&items, "space"));
    }

    #[test]
    fn test_short_help_while_editing() {
        assert_eq!(
            short_help(View::Boards, InputState::CreateName, FilterState::Unfiltered),
            "enter submit • esc cancel"
        );
    }
}
