//! Mutation authorization.
//!
//! Staff and administrators may always mutate a league's ties. A club
//! official may only touch roster and score data for ties their own club
//! plays in, matched by club name case-insensitively. Everyone else is
//! read-only.

use std::str::FromStr;

/// Caller role as supplied by the surrounding identity context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Staff,
    ClubOfficial,
    Member,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "staff" => Ok(Role::Staff),
            "club_official" => Ok(Role::ClubOfficial),
            "member" => Ok(Role::Member),
            _ => Err(()),
        }
    }
}

/// The caller's identity as far as the engine cares: a role and, for
/// club officials, their club affiliation.
#[derive(Debug, Clone)]
pub struct Identity {
    pub role: Role,
    pub club: Option<String>,
}

impl Identity {
    pub fn new(role: Role) -> Self {
        Self { role, club: None }
    }

    pub fn with_club(mut self, club: String) -> Self {
        self.club = Some(club);
        self
    }

    fn club_matches(&self, team_name: &str) -> bool {
        self.club
            .as_deref()
            .map(|club| club.trim().eq_ignore_ascii_case(team_name.trim()))
            .unwrap_or(false)
    }
}

/// Whether the caller may perform league-level fixture administration
/// (generating fixtures or playoffs, editing tie schedules).
pub fn can_administer_league(identity: &Identity) -> bool {
    matches!(identity.role, Role::Administrator | Role::Staff)
}

/// Whether the caller may mutate roster or score data for a tie between
/// the two named teams.
pub fn can_score_tie(identity: &Identity, home_team_name: &str, away_team_name: &str) -> bool {
    match identity.role {
        Role::Administrator | Role::Staff => true,
        Role::ClubOfficial => {
            identity.club_matches(home_team_name) || identity.club_matches(away_team_name)
        }
        Role::Member => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("staff".parse::<Role>(), Ok(Role::Staff));
        assert_eq!("Administrator".parse::<Role>(), Ok(Role::Administrator));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Administrator));
        assert_eq!("club_official".parse::<Role>(), Ok(Role::ClubOfficial));
        assert_eq!("member".parse::<Role>(), Ok(Role::Member));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_staff_and_admin_always_allowed() {
        for role in [Role::Staff, Role::Administrator] {
            let identity = Identity::new(role);
            assert!(can_administer_league(&identity));
            assert!(can_score_tie(&identity, "Riverside LTC", "Park Road LTC"));
        }
    }

    #[test]
    fn test_club_official_matching_club() {
        let identity =
            Identity::new(Role::ClubOfficial).with_club("riverside ltc".to_string());
        assert!(can_score_tie(&identity, "Riverside LTC", "Park Road LTC"));
        assert!(can_score_tie(&identity, "Park Road LTC", "Riverside LTC"));
        assert!(!can_administer_league(&identity));
    }

    #[test]
    fn test_club_official_other_clubs_tie() {
        let identity =
            Identity::new(Role::ClubOfficial).with_club("Northfield LTC".to_string());
        assert!(!can_score_tie(&identity, "Riverside LTC", "Park Road LTC"));
    }

    #[test]
    fn test_club_official_without_club() {
        let identity = Identity::new(Role::ClubOfficial);
        assert!(!can_score_tie(&identity, "Riverside LTC", "Park Road LTC"));
    }

    #[test]
    fn test_member_never_mutates() {
        let identity = Identity::new(Role::Member).with_club("Riverside LTC".to_string());
        assert!(!can_score_tie(&identity, "Riverside LTC", "Park Road LTC"));
        assert!(!can_administer_league(&identity));
    }
}
