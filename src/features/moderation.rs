//! # Moderation Checks
//!
//! Permission and role-hierarchy rules applied before a moderation action.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use serenity::model::permissions::Permissions;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Ban,
    Kick,
    Timeout,
    Untimeout,
    Unban,
}

impl ModerationAction {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Kick => "kick",
            Self::Timeout => "timeout",
            Self::Untimeout => "untimeout",
            Self::Unban => "unban",
        }
    }

    pub fn past_participle(self) -> &'static str {
        match self {
            Self::Ban => "banned",
            Self::Kick => "kicked",
            Self::Timeout => "timed out",
            Self::Untimeout => "untimed out",
            Self::Unban => "unbanned",
        }
    }

    /// Permission the invoking member must hold
    pub fn required_permission(self) -> Permissions {
        match self {
            Self::Ban | Self::Unban => Permissions::BAN_MEMBERS,
            Self::Kick => Permissions::KICK_MEMBERS,
            Self::Timeout | Self::Untimeout => Permissions::MODERATE_MEMBERS,
        }
    }

    /// Whether the target has to be a current guild member
    pub fn targets_member(self) -> bool {
        !matches!(self, Self::Unban)
    }
}

/// Facts about the actor, the target and the bot gathered before acting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationCheck {
    pub actor_permissions: Permissions,
    pub target_is_member: bool,
    pub target_is_actor: bool,
    /// Target is an administrator or the guild owner
    pub target_is_privileged: bool,
    pub actor_is_owner: bool,
    pub actor_top_role: i64,
    pub target_top_role: i64,
    pub bot_top_role: i64,
}

impl Default for ModerationCheck {
    fn default() -> Self {
        Self {
            actor_permissions: Permissions::empty(),
            target_is_member: false,
            target_is_actor: false,
            target_is_privileged: false,
            actor_is_owner: false,
            actor_top_role: 0,
            target_top_role: 0,
            bot_top_role: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationDenial {
    #[error("You do not have permission to {} this user", .0.verb())]
    MissingPermission(ModerationAction),
    #[error("User {target} is not in this server")]
    NotAMember { target: String },
    #[error("You cannot {} yourself", .0.verb())]
    SelfTarget(ModerationAction),
    #[error("You cannot {} this user", .0.verb())]
    PrivilegedTarget(ModerationAction),
    #[error("You cannot {} someone with an equal or higher role", .0.verb())]
    ActorOutranked(ModerationAction),
    #[error("This user cannot be {}", .0.past_participle())]
    BotOutranked(ModerationAction),
}

/// Highest role position among `positions`; members without roles sit at 0 (@everyone)
pub fn top_role_position(positions: impl IntoIterator<Item = i64>) -> i64 {
    positions.into_iter().max().unwrap_or(0).max(0)
}

/// Whether `permissions` grant `required`, counting administrator as every permission
pub fn grants(permissions: Permissions, required: Permissions) -> bool {
    permissions.contains(Permissions::ADMINISTRATOR) || permissions.contains(required)
}

impl ModerationCheck {
    /// Apply the checks in order and return the first refusal
    pub fn evaluate(&self, action: ModerationAction, target_tag: &str) -> Result<(), ModerationDenial> {
        if !grants(self.actor_permissions, action.required_permission()) {
            return Err(ModerationDenial::MissingPermission(action));
        }
        if !action.targets_member() {
            return Ok(());
        }
        if !self.target_is_member {
            return Err(ModerationDenial::NotAMember {
                target: target_tag.to_string(),
            });
        }
        if self.target_is_actor {
            return Err(ModerationDenial::SelfTarget(action));
        }
        if self.target_is_privileged {
            return Err(ModerationDenial::PrivilegedTarget(action));
        }
        if !self.actor_is_owner && self.actor_top_role <= self.target_top_role {
            return Err(ModerationDenial::ActorOutranked(action));
        }
        if self.bot_top_role <= self.target_top_role {
            return Err(ModerationDenial::BotOutranked(action));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> ModerationCheck {
        ModerationCheck {
            actor_permissions: Permissions::BAN_MEMBERS
                | Permissions::KICK_MEMBERS
                | Permissions::MODERATE_MEMBERS,
            target_is_member: true,
            target_is_actor: false,
            target_is_privileged: false,
            actor_is_owner: false,
            actor_top_role: 5,
            target_top_role: 2,
            bot_top_role: 10,
        }
    }

    #[test]
    fn test_allowed() {
        for action in [
            ModerationAction::Ban,
            ModerationAction::Kick,
            ModerationAction::Timeout,
            ModerationAction::Untimeout,
            ModerationAction::Unban,
        ] {
            assert_eq!(allowed().evaluate(action, "shark#0001"), Ok(()));
        }
    }

    #[test]
    fn test_missing_permission_checked_first() {
        let check = ModerationCheck {
            actor_permissions: Permissions::KICK_MEMBERS,
            target_is_member: false,
            ..allowed()
        };
        let denial = check.evaluate(ModerationAction::Ban, "shark#0001").unwrap_err();
        assert_eq!(denial, ModerationDenial::MissingPermission(ModerationAction::Ban));
        assert_eq!(denial.to_string(), "You do not have permission to ban this user");
    }

    #[test]
    fn test_administrator_grants_everything() {
        let check = ModerationCheck {
            actor_permissions: Permissions::ADMINISTRATOR,
            ..allowed()
        };
        assert_eq!(check.evaluate(ModerationAction::Kick, "x"), Ok(()));
    }

    #[test]
    fn test_not_a_member() {
        let check = ModerationCheck {
            target_is_member: false,
            target_is_actor: true,
            ..allowed()
        };
        let denial = check.evaluate(ModerationAction::Kick, "shark#0001").unwrap_err();
        assert_eq!(denial.to_string(), "User shark#0001 is not in this server");
    }

    #[test]
    fn test_unban_skips_membership_checks() {
        let check = ModerationCheck {
            target_is_member: false,
            target_top_role: 100,
            ..allowed()
        };
        assert_eq!(check.evaluate(ModerationAction::Unban, "x"), Ok(()));
    }

    #[test]
    fn test_self_target() {
        let check = ModerationCheck {
            target_is_actor: true,
            target_is_privileged: true,
            ..allowed()
        };
        let denial = check.evaluate(ModerationAction::Timeout, "x").unwrap_err();
        assert_eq!(denial.to_string(), "You cannot timeout yourself");
    }

    #[test]
    fn test_privileged_target() {
        let check = ModerationCheck {
            target_is_privileged: true,
            ..allowed()
        };
        let denial = check.evaluate(ModerationAction::Ban, "x").unwrap_err();
        assert_eq!(denial.to_string(), "You cannot ban this user");
    }

    #[test]
    fn test_actor_must_outrank_target() {
        let check = ModerationCheck {
            actor_top_role: 2,
            target_top_role: 2,
            ..allowed()
        };
        let denial = check.evaluate(ModerationAction::Kick, "x").unwrap_err();
        assert_eq!(
            denial.to_string(),
            "You cannot kick someone with an equal or higher role"
        );
    }

    #[test]
    fn test_owner_bypasses_actor_hierarchy() {
        let check = ModerationCheck {
            actor_is_owner: true,
            actor_top_role: 0,
            target_top_role: 3,
            ..allowed()
        };
        assert_eq!(check.evaluate(ModerationAction::Kick, "x"), Ok(()));
    }

    #[test]
    fn test_bot_must_outrank_target() {
        let check = ModerationCheck {
            bot_top_role: 2,
            ..allowed()
        };
        let denial = check.evaluate(ModerationAction::Timeout, "x").unwrap_err();
        assert_eq!(denial.to_string(), "This user cannot be timed out");
    }

    #[test]
    fn test_top_role_position() {
        assert_eq!(top_role_position(vec![]), 0);
        assert_eq!(top_role_position(vec![3, 9, 1]), 9);
    }

    #[test]
    fn test_action_permissions() {
        assert_eq!(
            ModerationAction::Unban.required_permission(),
            Permissions::BAN_MEMBERS
        );
        assert_eq!(
            ModerationAction::Untimeout.required_permission(),
            Permissions::MODERATE_MEMBERS
        );
    }
}
