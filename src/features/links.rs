//! # Link Rewriting
//!
//! Swaps social media links for mirrors that embed properly in Discord.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use anyhow::Result;
use regex::{Captures, Regex};

const LINK_PATTERN: &str = r"https?://(?:(?P<sub>www|vm)\.)?(?P<host>x\.com|twitter\.com|reddit\.com|instagram\.com|tiktok\.com)(?P<path>/[^\s]+)";

/// Appended to the reply when any rewritten link came from Twitter
pub const TWITTER_NOTE: &str = "\n-# Please stop using twitter!";

/// Links found in one message, rewritten to their mirrors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub links: Vec<String>,
    pub from_twitter: bool,
}

impl LinkRewrite {
    /// Reply content: one link per line, plus the Twitter note when due
    pub fn reply_content(&self) -> String {
        let mut content = self.links.join("\n");
        if self.from_twitter {
            content.push_str(TWITTER_NOTE);
        }
        content
    }
}

pub struct LinkRewriter {
    pattern: Regex,
}

impl LinkRewriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(LINK_PATTERN)?,
        })
    }

    /// Rewrite every supported link in `content`, None when there are none
    pub fn rewrite(&self, content: &str) -> Option<LinkRewrite> {
        let mut links = Vec::new();
        let mut from_twitter = false;

        for caps in self.pattern.captures_iter(content) {
            let host = &caps["host"];
            from_twitter |= matches!(host, "x.com" | "twitter.com");
            links.push(format!("https://{}{}", mirror_host(&caps), &caps["path"]));
        }

        (!links.is_empty()).then_some(LinkRewrite {
            links,
            from_twitter,
        })
    }
}

/// Mirror domain for a matched link; only TikTok short links keep their subdomain
fn mirror_host(caps: &Captures<'_>) -> &'static str {
    let short = caps.name("sub").is_some_and(|sub| sub.as_str() == "vm");
    match &caps["host"] {
        "x.com" => "girlcockx.com",
        "twitter.com" => "fxtwitter.com",
        "reddit.com" => "rxddit.com",
        "instagram.com" => "kkinstagram.com",
        "tiktok.com" if short => "vm.tnktok.com",
        _ => "tnktok.com",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> LinkRewriter {
        LinkRewriter::new().unwrap()
    }

    #[test]
    fn test_rewrites_each_site() {
        let cases = [
            ("https://x.com/a/status/1", "https://girlcockx.com/a/status/1"),
            ("https://twitter.com/a/status/1", "https://fxtwitter.com/a/status/1"),
            ("https://www.reddit.com/r/rust/comments/1", "https://rxddit.com/r/rust/comments/1"),
            ("https://reddit.com/r/rust", "https://rxddit.com/r/rust"),
            ("https://www.instagram.com/p/abc", "https://kkinstagram.com/p/abc"),
            ("https://instagram.com/reel/abc", "https://kkinstagram.com/reel/abc"),
            ("https://www.tiktok.com/@shark/video/1", "https://tnktok.com/@shark/video/1"),
            ("https://vm.tiktok.com/ZM123/", "https://vm.tnktok.com/ZM123/"),
            ("http://tiktok.com/@shark", "https://tnktok.com/@shark"),
        ];
        let rewriter = rewriter();
        for (input, expected) in cases {
            let rewrite = rewriter.rewrite(input).unwrap();
            assert_eq!(rewrite.links, vec![expected.to_string()], "{input}");
        }
    }

    #[test]
    fn test_multiple_links_keep_order() {
        let rewrite = rewriter()
            .rewrite("look https://reddit.com/r/a and https://instagram.com/p/b ok")
            .unwrap();
        assert_eq!(
            rewrite.links,
            vec!["https://rxddit.com/r/a", "https://kkinstagram.com/p/b"]
        );
        assert!(!rewrite.from_twitter);
        assert_eq!(
            rewrite.reply_content(),
            "https://rxddit.com/r/a\nhttps://kkinstagram.com/p/b"
        );
    }

    #[test]
    fn test_twitter_note() {
        let rewrite = rewriter()
            .rewrite("https://x.com/a/status/1 https://reddit.com/r/b")
            .unwrap();
        assert!(rewrite.from_twitter);
        assert!(rewrite.reply_content().ends_with(TWITTER_NOTE));
    }

    #[test]
    fn test_ignores_other_links() {
        let rewriter = rewriter();
        assert_eq!(rewriter.rewrite("no links here"), None);
        assert_eq!(rewriter.rewrite("https://github.com/rust-lang/rust"), None);
        // A bare domain without a path has nothing to mirror
        assert_eq!(rewriter.rewrite("https://x.com"), None);
        // Lookalike domains are not rewritten
        assert_eq!(rewriter.rewrite("https://fxtwitter.com/a/status/1"), None);
    }
}
