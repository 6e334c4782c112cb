//! Per-teacher student lists (volatile, lives as long as the app).

use std::collections::HashMap;

use crate::catalog::{SeedAccount, Student};

#[derive(Debug, Default, Clone)]
pub struct Roster {
    // Insertion order per account is the listing order.
    accounts: HashMap<String, Vec<Student>>,
    // Highest id handed out or seeded; fresh ids always exceed it.
    last_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seeds: &[SeedAccount]) -> Self {
        let mut roster = Self::new();
        for account in seeds {
            let list = roster.accounts.entry(account.email.to_string()).or_default();
            for seed in account.students {
                roster.last_id = roster.last_id.max(seed.id);
                list.push(seed.to_student());
            }
        }
        roster
    }

    pub fn students(&self, account: &str) -> &[Student] {
        self.accounts.get(account).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, account: &str, id: u64) -> Option<&Student> {
        self.students(account).iter().find(|s| s.id == id)
    }

    /// Append a student named `name` (trimmed) to `account`'s list.
    ///
    /// No-op when nobody is logged in or the trimmed name is empty. The id is
    /// derived from `clock_ms` but never repeats: two adds within the same
    /// millisecond still get distinct ids.
    pub fn add_student(&mut self, account: Option<&str>, name: &str, clock_ms: f64) -> Option<&Student> {
        let account = account?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let stamp = if clock_ms.is_finite() && clock_ms > 0.0 { clock_ms as u64 } else { 0 };
        let id = stamp.max(self.last_id + 1);
        self.last_id = id;
        let list = self.accounts.entry(account.to_string()).or_default();
        list.push(Student::new(id, name));
        log::info!("roster: added student {id} to {account}");
        list.last()
    }

    /// Replace the student whose id matches `updated.id`, in place.
    ///
    /// Returns false, leaving the list untouched, when the account or id is
    /// unknown or the trimmed name is empty. A blank birth date is stored as
    /// absent.
    pub fn update_student(&mut self, account: Option<&str>, updated: Student) -> bool {
        let Some(list) = account.and_then(|a| self.accounts.get_mut(a)) else {
            return false;
        };
        let name = updated.name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(slot) = list.iter_mut().find(|s| s.id == updated.id) else {
            log::debug!("roster: update for unknown student {}", updated.id);
            return false;
        };
        *slot = Student {
            id: updated.id,
            name: name.to_string(),
            birth_date: updated.birth_date.filter(|d| !d.trim().is_empty()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeedStudent;

    const SEEDS: &[SeedAccount] = &[SeedAccount {
        email: "t@t",
        students: &[SeedStudent { id: 7, name: "Luna", birth_date: Some("2018-05-20") }],
    }];

    #[test]
    fn add_requires_account_and_name() {
        let mut r = Roster::seeded(SEEDS);
        assert!(r.add_student(None, "Leo", 100.0).is_none());
        assert!(r.add_student(Some("t@t"), "   ", 100.0).is_none());
        assert_eq!(r.students("t@t").len(), 1);
    }

    #[test]
    fn add_trims_and_never_reuses_ids() {
        let mut r = Roster::seeded(SEEDS);
        let a = r.add_student(Some("t@t"), "  Leo ", 3.0).map(|s| s.id);
        let b = r.add_student(Some("t@t"), "Mia", 3.0).map(|s| s.id);
        assert_eq!(a, Some(8));
        assert_eq!(b, Some(9));
        assert_eq!(r.students("t@t")[1].name, "Leo");
    }

    #[test]
    fn update_unknown_id_leaves_list_unchanged() {
        let mut r = Roster::seeded(SEEDS);
        let before = r.students("t@t").to_vec();
        assert!(!r.update_student(Some("t@t"), Student::new(99, "Ghost")));
        assert_eq!(r.students("t@t"), before.as_slice());
    }

    #[test]
    fn update_replaces_in_place() {
        let mut r = Roster::seeded(SEEDS);
        r.add_student(Some("t@t"), "Leo", 0.0);
        let updated = Student { id: 7, name: " Selene ".into(), birth_date: Some(String::new()) };
        assert!(r.update_student(Some("t@t"), updated));
        let list = r.students("t@t");
        assert_eq!(list[0], Student::new(7, "Selene"));
        assert_eq!(list[1].name, "Leo");
    }
}
