//! @acp:module "Description Variants"
//! @acp:summary "Plain and terminal-highlighted renderings of markdown help text"
//! @acp:domain cli
//! @acp:layer parse

use std::sync::LazyLock;

use regex::Regex;

/// `[text](url)` links
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Fenced code blocks
static BLOCK_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([\s\S]+?)```").unwrap());

/// Inline code spans
static INLINE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// Strip links down to their text
pub fn plain(text: &str) -> String {
    LINK_PATTERN.replace_all(text, "$1").into_owned()
}

/// Render code blocks and inline code of already-plain text in bold
pub fn highlighted(plain_text: &str) -> String {
    let blocks = BLOCK_CODE_PATTERN.replace_all(plain_text, |caps: &regex::Captures| {
        let code = caps[0]
            .trim_matches('`')
            .trim_matches(' ')
            .trim_matches('\n');
        format!("{ANSI_BOLD}{code}{ANSI_RESET}")
    });
    INLINE_CODE_PATTERN
        .replace_all(&blocks, |caps: &regex::Captures| {
            format!("{ANSI_BOLD}{}{ANSI_RESET}", &caps[1])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strips_links() {
        assert_eq!(
            plain("See [the docs](https://example.com/docs) for more."),
            "See the docs for more."
        );
    }

    #[test]
    fn test_highlighted_bolds_code() {
        let text = "Run `app start` or:\n\n```\napp start --id x\n```";
        let out = highlighted(text);
        assert!(out.contains("\x1b[1mapp start\x1b[0m or:"));
        assert!(out.contains("\x1b[1mapp start --id x\x1b[0m"));
        assert!(!out.contains('`'));
    }
}
