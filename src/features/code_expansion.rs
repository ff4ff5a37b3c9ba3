//! # Code Link Expansion
//!
//! Turns links to line ranges on GitHub, Gitea-style forges and Codeberg
//! into embeds showing the referenced code.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use anyhow::{anyhow, Result};
use log::{debug, warn};
use regex::Regex;
use serenity::builder::CreateEmbed;

use crate::core::brand_embed;

const CODE_LINK_PATTERN: &str = r"https?://(?P<host>git[^/\s]*|codeberg\.org)/(?P<repo>[\w-]+/[\w.-]+)/(?:blob|src/(?:commit|branch))/(?P<reference>[^\s/]+)/(?P<file>\S+?)#L(?P<start>\d+)(?:[~-]L?(?P<end>\d+))?";

/// Longest snippet placed in one embed
pub const SNIPPET_LIMIT: usize = 1950;
/// Discord accepts at most ten embeds per message
pub const MAX_EMBEDS: usize = 10;
/// Length of a full commit hash
const COMMIT_HASH_LEN: usize = 40;

/// A link to a line range of a file in a git forge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLink {
    pub host: String,
    pub repo: String,
    pub reference: String,
    pub file: String,
    pub start: usize,
    pub end: usize,
}

impl CodeLink {
    fn is_commit(&self) -> bool {
        self.reference.len() == COMMIT_HASH_LEN
    }

    /// Where the raw file contents can be downloaded
    pub fn raw_url(&self) -> String {
        let Self {
            host,
            repo,
            reference,
            file,
            ..
        } = self;
        if host == "github.com" {
            return format!("https://raw.githubusercontent.com/{repo}/{reference}/{file}");
        }
        let kind = if self.is_commit() { "commit" } else { "branch" };
        format!("https://{host}/{repo}/raw/{kind}/{reference}/{file}")
    }

    /// Code block language, taken from the file extension
    pub fn language(&self) -> &str {
        let name = self.file.rsplit('/').next().unwrap_or(&self.file);
        name.rsplit_once('.').map_or("", |(_, ext)| ext)
    }

    /// Embed title, naming the lines actually shown
    pub fn title(&self, shown_end: usize) -> String {
        let reference = match self.reference.get(..8) {
            Some(short) if self.is_commit() => short,
            _ => self.reference.as_str(),
        };
        let range = if shown_end > self.start {
            format!("{}-{shown_end}", self.start)
        } else {
            self.start.to_string()
        };
        format!("{}@{reference} {} L{range}", self.repo, self.file)
    }
}

/// Lines cut out of a file, trimmed to fit an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub content: String,
    pub hidden_lines: usize,
}

/// Take lines `start..=end` (1-based) of `text`, dropping trailing lines past `SNIPPET_LIMIT`
pub fn extract_snippet(text: &str, start: usize, end: usize) -> Snippet {
    let mut lines: Vec<&str> = text
        .lines()
        .skip(start.saturating_sub(1))
        .take(end.saturating_sub(start) + 1)
        .collect();

    let mut hidden_lines = 0;
    let mut content = lines.join("\n");
    while content.len() > SNIPPET_LIMIT {
        if lines.len() <= 1 {
            let mut cut = SNIPPET_LIMIT;
            while !content.is_char_boundary(cut) {
                cut -= 1;
            }
            content.truncate(cut);
            break;
        }
        lines.pop();
        hidden_lines += 1;
        content = lines.join("\n");
    }

    Snippet {
        content,
        hidden_lines,
    }
}

/// Embed showing one snippet
pub fn snippet_embed(link: &CodeLink, snippet: &Snippet) -> CreateEmbed {
    let shown_end = link.end - snippet.hidden_lines;
    let mut embed = brand_embed();
    embed.title(link.title(shown_end)).description(format!(
        "```{}\n{}\n```",
        link.language(),
        snippet.content
    ));
    if snippet.hidden_lines > 0 {
        let hidden = snippet.hidden_lines;
        embed.footer(|f| f.text(format!("... ({hidden} lines not displayed)")));
    }
    embed
}

pub struct CodeExpander {
    pattern: Regex,
    client: reqwest::Client,
}

impl CodeExpander {
    pub fn new(client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(CODE_LINK_PATTERN)?,
            client,
        })
    }

    /// Every code link in `content`, in order
    pub fn find_links(&self, content: &str) -> Vec<CodeLink> {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| {
                let start = caps["start"].parse::<usize>().ok()?.max(1);
                let end = caps
                    .name("end")
                    .and_then(|end| end.as_str().parse::<usize>().ok())
                    .unwrap_or(start)
                    .max(start);
                Some(CodeLink {
                    host: caps["host"].to_string(),
                    repo: caps["repo"].to_string(),
                    reference: caps["reference"].to_string(),
                    file: caps["file"].to_string(),
                    start,
                    end,
                })
            })
            .take(MAX_EMBEDS)
            .collect()
    }

    /// Fetch each linked file and build its embed; unreachable files are skipped
    pub async fn expand(&self, content: &str) -> Vec<CreateEmbed> {
        let mut embeds = Vec::new();
        for link in self.find_links(content) {
            let text = match self.fetch(&link).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Could not expand code link to {}: {e}", link.raw_url());
                    continue;
                }
            };
            let snippet = extract_snippet(&text, link.start, link.end);
            if snippet.content.trim().is_empty() {
                debug!("Code link to {} points at empty lines", link.raw_url());
                continue;
            }
            embeds.push(snippet_embed(&link, &snippet));
        }
        embeds
    }

    async fn fetch(&self, link: &CodeLink) -> Result<String> {
        let response = self.client.get(link.raw_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Server returned HTTP {status}"));
        }
        Ok(response.text().await?)
    }
}
