/// An action is identified by an unsigned integer
///
/// Actions read from a text log are the byte values of the input characters (`0..=255`).
/// Actions introduced by abstraction steps start at [`SYNTHETIC_ACTION_START`].
pub type Action = u32;

/// First identifier handed out to synthetic (abstracted) actions
///
/// All original actions are byte values, so synthetic actions never collide with them.
pub const SYNTHETIC_ACTION_START: Action = 256;

/// Returns `true` if the action was read from the input
/// (i.e., it is not the result of an abstraction)
pub fn is_original_action(action: Action) -> bool {
    action < SYNTHETIC_ACTION_START
}

/// Convert an original action back into the character it was read from
///
/// Returns `None` for synthetic actions.
pub fn action_as_char(action: Action) -> Option<char> {
    u8::try_from(action).ok().map(char::from)
}

///
/// Human-readable label of an action
///
/// ASCII letters are shown as the letter itself, every other action
/// (including all synthetic ones) by its number.
///
pub fn action_label(action: Action) -> String {
    match action_as_char(action) {
        Some(c) if c.is_ascii_alphabetic() => c.to_string(),
        _ => action.to_string(),
    }
}

/// Concatenated [`action_label`]s of a sequence of actions (e.g., `abc` or `a256`)
pub fn sequence_label(actions: &[Action]) -> String {
    actions.iter().map(|a| action_label(*a)).collect()
}
