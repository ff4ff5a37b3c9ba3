//! Small formatting helpers shared by command handlers

use std::time::Duration;

/// Discord epoch (2015-01-01T00:00:00Z) in Unix milliseconds
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Unix milliseconds encoded in a Discord snowflake
pub fn snowflake_millis(id: u64) -> u64 {
    (id >> 22) + DISCORD_EPOCH_MS
}

/// Discord relative timestamp markup, e.g. `<t:1679000000:R>`
pub fn relative_timestamp(unix_secs: i64) -> String {
    format!("<t:{unix_secs}:R>")
}

/// Uptime as "{d} days, {h} hours, {m} minutes and {s} seconds"
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86400;
    let hours = (total % 86400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{days} days, {hours} hours, {minutes} minutes and {seconds} seconds")
}

/// OAuth2 URL that invites the bot with administrator permissions
pub fn invite_url(application_id: u64) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={application_id}&permissions=8&scope=bot%20applications.commands"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_millis() {
        // Example from the Discord developer docs
        assert_eq!(snowflake_millis(175928847299117063), 1462015105796);
        assert_eq!(snowflake_millis(0), DISCORD_EPOCH_MS);
    }

    #[test]
    fn test_relative_timestamp() {
        assert_eq!(relative_timestamp(1679000000), "<t:1679000000:R>");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(
            format_uptime(Duration::from_secs(0)),
            "0 days, 0 hours, 0 minutes and 0 seconds"
        );
        assert_eq!(
            format_uptime(Duration::from_secs(86400 + 3600 * 2 + 60 * 3 + 4)),
            "1 days, 2 hours, 3 minutes and 4 seconds"
        );
        // Sub-second precision is dropped
        assert_eq!(
            format_uptime(Duration::from_millis(59_999)),
            "0 days, 0 hours, 0 minutes and 59 seconds"
        );
    }

    #[test]
    fn test_invite_url() {
        assert_eq!(
            invite_url(1087418361283092510),
            "https://discord.com/api/oauth2/authorize?client_id=1087418361283092510&permissions=8&scope=bot%20applications.commands"
        );
    }
}
