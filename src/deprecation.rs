//! @acp:module "Deprecation Notice"
//! @acp:summary "Fixed-width ASCII box prepended to deprecated command descriptions"
//! @acp:domain cli
//! @acp:layer output

/// Sentence used when a command is deprecated without a message
pub const DEFAULT_DEPRECATION_MESSAGE: &str =
    "This command is deprecated and will be removed in a later release.";

/// Render `message` as a fenced `CAUTION` box followed by a blank line.
pub fn deprecation_box(message: &str) -> String {
    let message = if message.is_empty() {
        DEFAULT_DEPRECATION_MESSAGE
    } else {
        message
    };
    let content = format!("CAUTION: {message}");
    let border = format!("+{}+", "-".repeat(content.chars().count() + 2));
    format!("```\n{border}\n| {content} |\n{border}\n```\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_message_when_empty() {
        let expected = "```\n\
            +-----------------------------------------------------------------------------+\n\
            | CAUTION: This command is deprecated and will be removed in a later release. |\n\
            +-----------------------------------------------------------------------------+\n\
            ```\n\n";
        assert_eq!(deprecation_box(""), expected);
    }

    #[test]
    fn test_custom_message() {
        let expected = "```\n\
            +-----------------------------------+\n\
            | CAUTION: Use the new API instead. |\n\
            +-----------------------------------+\n\
            ```\n\n";
        assert_eq!(deprecation_box("Use the new API instead."), expected);
    }

    #[test]
    fn test_border_width_tracks_content() {
        let rendered = deprecation_box("Removed.");
        let border = rendered.lines().nth(1).unwrap();
        assert_eq!(border.len(), "CAUTION: Removed.".len() + 4);
        assert_eq!(border, "+-------------------+");
    }
}
