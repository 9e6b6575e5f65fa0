//! Error groups: the per-pass view of tickets sharing one error code.

use std::collections::BTreeSet;

use crate::types::Ticket;

/// All tickets sharing one error code, borrowed from the current ticket list.
///
/// Groups are derived on every pass and never stored.
#[derive(Clone, Debug)]
pub struct ErrorGroup<'a> {
    /// The shared error code.
    pub error: &'a str,
    /// Tickets in list order.
    pub tickets: Vec<&'a Ticket>,
}

impl<'a> ErrorGroup<'a> {
    /// Distinct merchants, sorted.
    pub fn distinct_merchants(&self) -> BTreeSet<&'a str> {
        self.tickets.iter().map(|t| t.merchant.as_str()).collect()
    }

    /// Distinct stages, sorted.
    pub fn distinct_stages(&self) -> BTreeSet<&'a str> {
        self.tickets.iter().map(|t| t.stage.as_str()).collect()
    }

    /// Number of tickets from merchants that completed migration.
    pub fn migrated_count(&self) -> usize {
        self.tickets.iter().filter(|t| t.migrated).count()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Group tickets by error code, ordered by first appearance.
pub fn group_by_error(tickets: &[Ticket]) -> Vec<ErrorGroup<'_>> {
    let mut groups: Vec<ErrorGroup<'_>> = Vec::new();
    for ticket in tickets {
        match groups.iter_mut().find(|g| g.error == ticket.error) {
            Some(group) => group.tickets.push(ticket),
            None => groups.push(ErrorGroup {
                error: &ticket.error,
                tickets: vec![ticket],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(merchant: &str, error: &str, migrated: bool, stage: &str) -> Ticket {
        Ticket::new(merchant, error, migrated, stage).unwrap()
    }

    #[test]
    fn groups_follow_first_appearance() {
        let tickets = vec![
            t("M1", "B", true, "s"),
            t("M2", "A", false, "s"),
            t("M3", "B", true, "s"),
        ];
        let groups = group_by_error(&tickets);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].error, "B");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].error, "A");
    }

    #[test]
    fn distinct_sets_ignore_duplicates() {
        let tickets = vec![
            t("M2", "E", true, "checkout"),
            t("M1", "E", false, "checkout"),
            t("M2", "E", true, "api"),
        ];
        let groups = group_by_error(&tickets);
        let group = &groups[0];
        assert_eq!(group.distinct_merchants().into_iter().collect::<Vec<_>>(), vec!["M1", "M2"]);
        assert_eq!(group.distinct_stages().into_iter().collect::<Vec<_>>(), vec!["api", "checkout"]);
        assert_eq!(group.migrated_count(), 2);
    }

    #[test]
    fn empty_list_has_no_groups() {
        assert!(group_by_error(&[]).is_empty());
    }
}
