//! Shared embed builders for bot replies
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Brand embed, signatures and the user info embed used by /whois and "User Info"

use serenity::builder::CreateEmbed;
use serenity::model::Timestamp;

use crate::core::format::relative_timestamp;
use crate::core::response::FIELD_LIMIT;

/// Accent colour used on every embed the bot sends
pub const EMBED_COLOUR: u32 = 0xFFFFFF;

const ELLIPSIS: &str = " ...";

/// A name and icon pair shown in an embed's author or footer line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub icon_url: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_url: icon_url.into(),
        }
    }
}

/// Plain view of a user, decoupled from serenity's model for formatting
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: u64,
    pub tag: String,
    pub avatar_url: String,
    pub created_at: i64,
    pub bot: bool,
}

/// Guild-specific view of a user
#[derive(Debug, Clone, Default)]
pub struct MemberProfile {
    pub joined_at: Option<i64>,
    pub role_ids: Vec<u64>,
}

/// Empty embed with the bot's accent colour
pub fn brand_embed() -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.color(EMBED_COLOUR);
    embed
}

/// Apply author and footer signatures plus the current timestamp
pub fn sign(embed: &mut CreateEmbed, author: &Signature, footer: &Signature) {
    embed.author(|a| a.name(&author.name).icon_url(&author.icon_url));
    embed.footer(|f| f.text(&footer.name).icon_url(&footer.icon_url));
    embed.timestamp(Timestamp::now());
}

/// Render role ids as mentions separated by spaces
///
/// Mentions that would overflow the field are dropped whole and replaced
/// by " ...", so no mention is cut in half.
pub fn role_mentions(role_ids: &[u64]) -> String {
    if role_ids.is_empty() {
        return "None".to_string();
    }
    let budget = FIELD_LIMIT - ELLIPSIS.len();
    let mut rendered = String::new();
    for (index, id) in role_ids.iter().enumerate() {
        let mention = format!("<@&{id}>");
        let separator = usize::from(!rendered.is_empty());
        // The last mention may use the room reserved for the ellipsis
        let is_last = index + 1 == role_ids.len();
        let limit = if is_last { FIELD_LIMIT } else { budget };
        if rendered.len() + separator + mention.len() > limit {
            rendered.push_str(ELLIPSIS);
            return rendered;
        }
        if separator == 1 {
            rendered.push(' ');
        }
        rendered.push_str(&mention);
    }
    rendered
}

/// User info embed: identity, account age, guild join date, bot flag and roles
pub fn user_info_embed(
    user: &UserProfile,
    member: Option<&MemberProfile>,
    author: &Signature,
    footer: &Signature,
) -> CreateEmbed {
    let joined = member
        .and_then(|m| m.joined_at)
        .map(relative_timestamp)
        .unwrap_or_else(|| "Not a member".to_string());
    let roles = member
        .map(|m| role_mentions(&m.role_ids))
        .unwrap_or_else(|| "None".to_string());

    let mut embed = brand_embed();
    embed
        .title(&user.tag)
        .description(format!("ID: {}", user.id))
        .thumbnail(&user.avatar_url)
        .field("Created At", relative_timestamp(user.created_at), false)
        .field("Joined At", joined, true)
        .field("Bot", user.bot.to_string(), false)
        .field("Roles", roles, false);
    sign(&mut embed, author, footer);
    embed
}
