//! # Help Pager
//!
//! Five-page help embed with page buttons.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::component::ButtonStyle;

use crate::core::brand_embed;

const HELP_DESCRIPTION: &str = "This is a list of all the commands available to you.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpPage {
    Overview,
    Resources,
    Tools,
    Fun,
    Moderation,
}

impl HelpPage {
    pub const ALL: [HelpPage; 5] = [
        HelpPage::Overview,
        HelpPage::Resources,
        HelpPage::Tools,
        HelpPage::Fun,
        HelpPage::Moderation,
    ];

    /// Button custom id for this page
    pub fn custom_id(self) -> &'static str {
        match self {
            Self::Overview => "page1",
            Self::Resources => "page2",
            Self::Tools => "page3",
            Self::Fun => "page4",
            Self::Moderation => "page5",
        }
    }

    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.custom_id() == custom_id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Page 1",
            Self::Resources => "Page 2",
            Self::Tools => "Page 3",
            Self::Fun => "Page 4",
            Self::Moderation => "Page 5",
        }
    }

    /// (name, value) fields listed on the page
    pub fn fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Overview => &[
                ("Page 1", "Overview"),
                ("Page 2", "Help & Resources"),
                ("Page 3", "Tools"),
                ("Page 4", "Fun"),
                ("Page 5", "Moderation"),
            ],
            Self::Resources => &[
                ("/help", "Do /help for this page"),
                ("/ping", "Do /ping to get the bot's ping"),
                ("/invite", "Do /invite to get the bot's invite link"),
            ],
            Self::Tools => &[
                ("/whois", "Do /whois to get the user information of a given user"),
                ("/avatar", "Do /avatar to get the avatar of a given user"),
                ("/serverinfo", "Do /serverinfo to get the server information"),
                ("/botstatus", "Do /botstatus to get the bot information"),
                ("/embed", "Do /embed to help you make an embed"),
            ],
            Self::Fun => &[
                ("/roll", "Do /roll to roll a die with any number of sides"),
                ("/raffle", "Do /raffle to pick a random online member"),
                ("/kittysay", "Do /kittysay to make the kitty say something"),
                ("/bottomify", "Do /bottomify to translate text into bottom"),
                ("/topify", "Do /topify to translate bottom back into text"),
            ],
            Self::Moderation => &[
                ("/kick", "Do /kick to kick a user"),
                ("/ban", "Do /ban to ban a user"),
                ("/unban", "Do /unban to unban a user"),
                ("/timeout", "Do /timeout to timeout a user"),
                ("/untimeout", "Do /untimeout to untimeout a user"),
                ("/purge", "Do /purge to delete a given amount of messages"),
            ],
        }
    }
}

/// Build the embed for one help page
pub fn help_embed(page: HelpPage, thumbnail_url: Option<&str>) -> CreateEmbed {
    let mut embed = brand_embed();
    embed.title("Help").description(HELP_DESCRIPTION);
    if let Some(url) = thumbnail_url {
        embed.thumbnail(url);
    }
    for (name, value) in page.fields() {
        embed.field(name, value, false);
    }
    embed
}

/// One action row with a button per page
pub fn help_buttons() -> CreateComponents {
    CreateComponents::default()
        .create_action_row(|row| {
            for page in HelpPage::ALL {
                row.create_button(|button| {
                    button
                        .custom_id(page.custom_id())
                        .label(page.label())
                        .style(ButtonStyle::Primary)
                });
            }
            row
        })
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_custom_id_round_trip() {
        for page in HelpPage::ALL {
            assert_eq!(HelpPage::from_custom_id(page.custom_id()), Some(page));
        }
        assert_eq!(HelpPage::from_custom_id("page6"), None);
        assert_eq!(HelpPage::from_custom_id(""), None);
    }

    #[test]
    fn test_help_embed_contents() {
        let embed = help_embed(HelpPage::Moderation, Some("https://cdn.example.com/bot.png"));
        assert_eq!(embed.0.get("title").and_then(Value::as_str), Some("Help"));
        assert_eq!(
            embed.0.get("description").and_then(Value::as_str),
            Some(HELP_DESCRIPTION)
        );
        let fields = embed.0.get("fields").and_then(Value::as_array).unwrap();
        let names: Vec<&str> = fields
            .iter()
            .filter_map(|f| f.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(
            names,
            vec!["/kick", "/ban", "/unban", "/timeout", "/untimeout", "/purge"]
        );
        assert!(embed.0.get("thumbnail").is_some());
    }

    #[test]
    fn test_help_embed_without_thumbnail() {
        let embed = help_embed(HelpPage::Overview, None);
        assert!(embed.0.get("thumbnail").is_none());
    }

    #[test]
    fn test_every_documented_command_exists() {
        let defined: Vec<String> = crate::commands::slash::create_slash_commands()
            .iter()
            .filter_map(|c| c.0.get("name").and_then(Value::as_str).map(str::to_string))
            .collect();
        for page in HelpPage::ALL.into_iter().skip(1) {
            for (name, _) in page.fields() {
                let command = name.trim_start_matches('/');
                assert!(defined.iter().any(|d| d == command), "{name} is not defined");
            }
        }
    }

    #[test]
    fn test_overview_lists_every_page() {
        let labels: Vec<&str> = HelpPage::Overview.fields().iter().map(|(n, _)| *n).collect();
        let expected: Vec<&str> = HelpPage::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_help_buttons_one_per_page() {
        let components = help_buttons();
        assert_eq!(components.0.len(), 1);
        let row = &components.0[0];
        assert_eq!(row.get("type").and_then(Value::as_u64), Some(1));

        let buttons = row.get("components").and_then(Value::as_array).unwrap();
        assert_eq!(buttons.len(), HelpPage::ALL.len());
        for (button, page) in buttons.iter().zip(HelpPage::ALL) {
            assert_eq!(button.get("type").and_then(Value::as_u64), Some(2));
            assert_eq!(
                button.get("style").and_then(Value::as_u64),
                Some(ButtonStyle::Primary as u64)
            );
            assert_eq!(
                button.get("custom_id").and_then(Value::as_str),
                Some(page.custom_id())
            );
            assert_eq!(button.get("label").and_then(Value::as_str), Some(page.label()));
        }
        let ids: Vec<&str> = buttons
            .iter()
            .filter_map(|b| b.get("custom_id").and_then(Value::as_str))
            .collect();
        assert_eq!(ids, vec!["page1", "page2", "page3", "page4", "page5"]);
    }
}
