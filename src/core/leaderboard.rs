//! # Leaderboard
//!
//! A read-only view over the catalog roster. The row flagged `is_user`
//! shows the session's live points instead of its stored value; the roster
//! itself is never written to.

use crate::core::catalog::RosterEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing<'a> {
    pub rank: u32,
    pub name: &'a str,
    pub student_id: &'a str,
    pub points: u32,
    pub is_current_user: bool,
}

/// Project the roster in its stored order, substituting `live_points`
/// for the current user.
pub fn standings(roster: &[RosterEntry], live_points: u32) -> Vec<Standing<'_>> {
    roster
        .iter()
        .map(|entry| Standing {
            rank: entry.rank,
            name: &entry.name,
            student_id: &entry.id,
            points: if entry.is_user {
                live_points
            } else {
                entry.points
            },
            is_current_user: entry.is_user,
        })
        .collect()
}

/// The roster row representing whoever is playing.
pub fn current_user(roster: &[RosterEntry]) -> Option<&RosterEntry> {
    roster.iter().find(|entry| entry.is_user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_live_points_replace_user_row() {
        let catalog = Catalog::builtin().unwrap();
        let rows = standings(&catalog.leaderboard, 3140);

        let user_rows: Vec<_> = rows.iter().filter(|r| r.is_current_user).collect();
        assert_eq!(user_rows.len(), 1);
        assert_eq!(user_rows[0].name, "Alex Chen");
        assert_eq!(user_rows[0].points, 3140);

        // Stored roster is unchanged
        let stored = current_user(&catalog.leaderboard).unwrap();
        assert_eq!(stored.points, 2500);
    }

    #[test]
    fn test_other_rows_keep_roster_values() {
        let catalog = Catalog::builtin().unwrap();
        let rows = standings(&catalog.leaderboard, 0);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].points, 12500);
        assert_eq!(rows[5].student_id, "S-555");
    }

    #[test]
    fn test_empty_roster() {
        assert!(standings(&[], 100).is_empty());
        assert!(current_user(&[]).is_none());
    }
}
