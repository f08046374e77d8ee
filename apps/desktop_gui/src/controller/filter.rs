//! Name search over the fetched roster.

use shared::domain::Person;

/// Returns the students whose "first last" name contains `query`, ignoring case.
///
/// Roster order is preserved and an empty query keeps every entry.
pub fn filter_roster<'a>(roster: &'a [Person], query: &str) -> Vec<&'a Person> {
    if query.is_empty() {
        return roster.iter().collect();
    }
    let needle = query.to_lowercase();
    roster
        .iter()
        .filter(|person| matches_query(person, &needle))
        .collect()
}

fn matches_query(person: &Person, lowered_query: &str) -> bool {
    person.full_name().to_lowercase().contains(lowered_query)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
