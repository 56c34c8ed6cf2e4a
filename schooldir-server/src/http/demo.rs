//! Built-in listing served in read-only demo deployments

use crate::models::SchoolSummary;

/// Fixed demo schools, newest first.
pub fn schools() -> Vec<SchoolSummary> {
    [
        (3, "Green Valley Public School", "42 Park Street", "Kolkata"),
        (2, "St. Xavier's High School", "123 MG Road", "Bengaluru"),
        (1, "Sunrise International Academy", "7 Marine Drive", "Mumbai"),
    ]
    .into_iter()
    .map(|(id, name, address, city)| SchoolSummary {
        id,
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        image: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_list_is_newest_first() {
        let ids: Vec<i64> = schools().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
