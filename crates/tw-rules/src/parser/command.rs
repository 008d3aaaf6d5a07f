//! Minimal structure extraction from a command string.
//!
//! Matching is ASCII case-insensitive so byte offsets found in the
//! lowercased copy are valid in the original.

/// Split a directed command `"<name>: <command>"` into the addressed name
/// and the command proper.
pub fn split_directed(command: &str) -> (Option<&str>, &str) {
    match command.split_once(':') {
        Some((who, rest)) if !who.trim().is_empty() => (Some(who.trim()), rest.trim()),
        _ => (None, command.trim()),
    }
}

/// Split `"<object> <connective> <instrument>"` on the first whole-word
/// occurrence of the connective.
pub fn split_connective<'a>(command: &'a str, connective: &str) -> Option<(&'a str, &'a str)> {
    let connective = connective.trim().to_ascii_lowercase();
    if connective.is_empty() {
        return None;
    }
    let padded = format!(" {} ", command.to_ascii_lowercase());
    let needle = format!(" {connective} ");
    // The leading pad shifts every index by one, so `at` is where the
    // connective word itself starts in `command`.
    let at = padded.find(&needle)?;
    let end = (at + connective.len()).min(command.len());
    Some((command[..at].trim(), command[end..].trim()))
}

/// Strip a leading phrase matched on word boundaries, returning the rest.
pub fn strip_phrase<'a>(command: &'a str, phrase: &str) -> Option<&'a str> {
    let command = command.trim_start();
    let phrase = phrase.trim().to_ascii_lowercase();
    let lower = command.to_ascii_lowercase();
    if !lower.starts_with(&phrase) {
        return None;
    }
    let rest = &command[phrase.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_command() {
        assert_eq!(
            split_directed("Guard: open gate"),
            (Some("Guard"), "open gate")
        );
        assert_eq!(split_directed("  look  "), (None, "look"));
        assert_eq!(split_directed(": look"), (None, ": look"));
    }

    #[test]
    fn connective_split() {
        assert_eq!(
            split_connective("unlock door with key", "with"),
            Some(("unlock door", "key"))
        );
        assert_eq!(
            split_connective("Unlock Door WITH brass key", "with"),
            Some(("Unlock Door", "brass key"))
        );
        assert_eq!(split_connective("unlock door", "with"), None);
    }

    #[test]
    fn connective_needs_word_boundary() {
        assert_eq!(split_connective("walk without fear", "with"), None);
        assert_eq!(split_connective("unlock door with", "with"), Some(("unlock door", "")));
    }

    #[test]
    fn strip_leading_phrase() {
        assert_eq!(strip_phrase("light candle", "light"), Some("candle"));
        assert_eq!(strip_phrase("Sit On Throne", "sit on throne"), Some(""));
        assert_eq!(strip_phrase("lighthouse", "light"), None);
        assert_eq!(strip_phrase("wear crown", "sit"), None);
    }
}
