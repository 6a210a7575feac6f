// ── Presence diff ──
//
// Host-side helper: the scanner reports raw lists (duplicates and all),
// the host decides who arrived and who left. Devices are keyed by their
// lowercase MAC.

use std::collections::HashSet;

use serde::Serialize;

use super::mac_address::MacAddress;

/// Devices that appeared or disappeared between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresenceDiff {
    pub arrived: Vec<MacAddress>,
    pub departed: Vec<MacAddress>,
}

impl PresenceDiff {
    /// Compare two snapshots. Order follows first appearance in the
    /// snapshot each device was found in; duplicates are collapsed.
    pub fn between(previous: &[MacAddress], current: &[MacAddress]) -> Self {
        let before: HashSet<String> = previous.iter().map(MacAddress::normalized).collect();
        let after: HashSet<String> = current.iter().map(MacAddress::normalized).collect();

        Self {
            arrived: only_in(current, &before),
            departed: only_in(previous, &after),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.arrived.is_empty() && self.departed.is_empty()
    }
}

fn only_in(list: &[MacAddress], other: &HashSet<String>) -> Vec<MacAddress> {
    let mut seen = HashSet::new();
    list.iter()
        .filter(|mac| {
            let key = mac.normalized();
            !other.contains(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn macs(list: &[&str]) -> Vec<MacAddress> {
        list.iter().copied().map(MacAddress::from).collect()
    }

    #[test]
    fn arrivals_and_departures() {
        let before = macs(&["00:11:22:33:44:55", "aa:bb:cc:dd:ee:ff"]);
        let after = macs(&["aa:bb:cc:dd:ee:ff", "66:77:88:99:aa:bb"]);

        let diff = PresenceDiff::between(&before, &after);

        assert_eq!(diff.arrived, macs(&["66:77:88:99:aa:bb"]));
        assert_eq!(diff.departed, macs(&["00:11:22:33:44:55"]));
    }

    #[test]
    fn case_changes_are_not_movement() {
        let before = macs(&["AA:BB:CC:DD:EE:FF"]);
        let after = macs(&["aa:bb:cc:dd:ee:ff"]);
        assert!(PresenceDiff::between(&before, &after).is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let after = macs(&["00:11:22:33:44:55", "00:11:22:33:44:55"]);
        let diff = PresenceDiff::between(&[], &after);
        assert_eq!(diff.arrived, macs(&["00:11:22:33:44:55"]));
    }

    #[test]
    fn everything_departs_on_empty() {
        let before = macs(&["00:11:22:33:44:55", "66:77:88:99:aa:bb"]);
        let diff = PresenceDiff::between(&before, &[]);
        assert_eq!(diff.departed, before);
        assert!(diff.arrived.is_empty());
    }
}
