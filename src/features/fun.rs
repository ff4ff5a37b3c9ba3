//! # Fun Commands
//!
//! Dice, raffles, kittysay and the bottom translator.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use kittysay::FormatOptions;
use rand::seq::IndexedRandom;
use rand::Rng;
use serenity::model::user::OnlineStatus;

use crate::core::{truncate, MESSAGE_LIMIT};

/// Sides used by /roll when none are given
pub const DEFAULT_SIDES: u32 = 6;
/// Column width of the kittysay speech bubble
pub const KITTY_WIDTH: usize = 45;

const CODE_FENCE: &str = "```";
/// Largest chunk that still fits in one message once fenced
pub const CODE_CHUNK_LIMIT: usize = MESSAGE_LIMIT - 2 * CODE_FENCE.len();

/// Roll a die with `sides` faces, counting from 1
pub fn roll_die<R: Rng + ?Sized>(sides: u32, rng: &mut R) -> u32 {
    rng.random_range(1..=sides.max(1))
}

/// Wrap text in a bare code fence
pub fn code_block(text: &str) -> String {
    format!("{CODE_FENCE}{text}{CODE_FENCE}")
}

/// Split text into pieces of at most `max` bytes, never inside a character
pub fn chunk_text(text: &str, max: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        if rest.len() <= max {
            chunks.push(rest);
            break;
        }
        let mut cut = max;
        while cut > 0 && !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            // A single character wider than `max` still goes out whole
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (head, tail) = rest.split_at(cut);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

/// Fenced messages that together carry all of `text`
pub fn code_block_messages(text: &str) -> Vec<String> {
    chunk_text(text, CODE_CHUNK_LIMIT)
        .into_iter()
        .map(code_block)
        .collect()
}

/// Draw the kitty saying (or thinking) `input`, fenced for Discord
pub fn kitty_say(input: &str, think: bool) -> String {
    let options = FormatOptions {
        think,
        width: KITTY_WIDTH as u16,
    };
    let art = kittysay::print(input, &options);
    code_block(&truncate(&art, CODE_CHUNK_LIMIT))
}

/// Encode text into bottom
pub fn bottomify(input: &str) -> String {
    ::bottomify::bottom::encode_string(&input)
}

/// Decode bottom back into text, None when the input is not valid bottom
pub fn topify(input: &str) -> Option<String> {
    ::bottomify::bottom::decode_string(&input)
        .ok()
        .filter(|text| !text.is_empty())
}

/// A guild member considered for /raffle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaffleEntrant {
    pub id: u64,
    pub bot: bool,
    pub status: Option<OnlineStatus>,
}

impl RaffleEntrant {
    /// Online or idle humans may win; members without a presence are offline
    fn eligible(&self, invoker: u64) -> bool {
        !self.bot
            && self.id != invoker
            && matches!(self.status, Some(OnlineStatus::Online | OnlineStatus::Idle))
    }
}

/// Members who may win a raffle started by `invoker`
pub fn raffle_candidates(entrants: &[RaffleEntrant], invoker: u64) -> Vec<u64> {
    entrants
        .iter()
        .filter(|entrant| entrant.eligible(invoker))
        .map(|entrant| entrant.id)
        .collect()
}

/// Pick the raffle winner, None when nobody is eligible
pub fn draw_winner<R: Rng + ?Sized>(
    entrants: &[RaffleEntrant],
    invoker: u64,
    rng: &mut R,
) -> Option<u64> {
    raffle_candidates(entrants, invoker).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entrant(id: u64, bot: bool, status: Option<OnlineStatus>) -> RaffleEntrant {
        RaffleEntrant { id, bot, status }
    }

    #[test]
    fn test_roll_die_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let roll = roll_die(DEFAULT_SIDES, &mut rng);
            assert!((1..=6).contains(&roll));
        }
        assert_eq!(roll_die(1, &mut rng), 1);
        // Zero sides behaves like a one-sided die instead of panicking
        assert_eq!(roll_die(0, &mut rng), 1);
    }

    #[test]
    fn test_roll_die_reaches_every_face() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[roll_die(4, &mut rng) as usize - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_chunk_text_respects_limit() {
        let text = "a".repeat(CODE_CHUNK_LIMIT * 2 + 10);
        let chunks = chunk_text(&text, CODE_CHUNK_LIMIT);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), CODE_CHUNK_LIMIT);
        assert_eq!(chunks[2].len(), 10);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunk_text_exact_multiple_has_no_empty_tail() {
        let text = "b".repeat(CODE_CHUNK_LIMIT * 2);
        assert_eq!(chunk_text(&text, CODE_CHUNK_LIMIT).len(), 2);
        assert!(chunk_text("", CODE_CHUNK_LIMIT).is_empty());
    }

    #[test]
    fn test_chunk_text_keeps_characters_whole() {
        let text = "🦈".repeat(10);
        let chunks = chunk_text(&text, 6);
        assert!(chunks.iter().all(|c| c.len() <= 6));
        assert_eq!(chunks.concat(), text);

        // Narrower than one character
        assert_eq!(chunk_text("🦈🦈", 2), vec!["🦈", "🦈"]);
    }

    #[test]
    fn test_code_block_messages_fit_discord() {
        let text = "x".repeat(5000);
        let messages = code_block_messages(&text);
        assert_eq!(messages.len(), 3);
        for message in &messages {
            assert!(message.len() <= MESSAGE_LIMIT);
            assert!(message.starts_with("```") && message.ends_with("```"));
        }
    }

    #[test]
    fn test_kitty_say_is_fenced_and_bounded() {
        let said = kitty_say("meow", false);
        assert!(said.starts_with("```") && said.ends_with("```"));
        assert!(said.contains("meow"));
        assert!(kitty_say(&"nya ".repeat(250), true).len() <= MESSAGE_LIMIT);
    }

    #[test]
    fn test_bottom_round_trip() {
        let encoded = bottomify("hi");
        assert_ne!(encoded, "hi");
        assert_eq!(topify(&encoded).as_deref(), Some("hi"));
    }

    #[test]
    fn test_topify_rejects_plain_text() {
        assert_eq!(topify("definitely not bottom"), None);
    }

    #[test]
    fn test_raffle_candidates() {
        let entrants = [
            entrant(1, false, Some(OnlineStatus::Online)),
            entrant(2, false, Some(OnlineStatus::Idle)),
            entrant(3, false, Some(OnlineStatus::DoNotDisturb)),
            entrant(4, false, Some(OnlineStatus::Offline)),
            entrant(5, true, Some(OnlineStatus::Online)),
            entrant(6, false, None),
            entrant(7, false, Some(OnlineStatus::Online)),
        ];
        assert_eq!(raffle_candidates(&entrants, 7), vec![1, 2]);
    }

    #[test]
    fn test_draw_winner() {
        let mut rng = StdRng::seed_from_u64(3);
        let entrants = [
            entrant(1, false, Some(OnlineStatus::Online)),
            entrant(2, false, Some(OnlineStatus::Idle)),
        ];
        for _ in 0..50 {
            let winner = draw_winner(&entrants, 99, &mut rng).unwrap();
            assert!(winner == 1 || winner == 2);
        }
        assert_eq!(draw_winner(&entrants[..1], 1, &mut rng), None);
        assert_eq!(draw_winner(&[], 1, &mut rng), None);
    }
}
