use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Day of the week the plan and the UI operate against.
///
/// The week is enumerated Monday-first, matching the order the backend
/// serves plan entries in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday-first week, in display order.
    pub const ORDERED: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Lowercase name, as used in storage keys and wire payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// Parses a lowercase day name. Anything unknown coerces to
    /// [`Day::Monday`]; collaborators and wire data cannot select a day
    /// outside the enumeration.
    pub fn from_name(name: &str) -> Day {
        Day::ORDERED
            .iter()
            .find(|day| day.name() == name)
            .copied()
            .unwrap_or(Day::Monday)
    }

    /// Maps a Sunday-first day index (0 = Sunday, as the OS reports it)
    /// onto the Monday-first table.
    ///
    /// Indices that land outside the table fall back to [`Day::Monday`];
    /// with the `0 → 7` shift below both Sunday and Monday do.
    pub fn from_sunday_index(index: u32) -> Day {
        let shifted = i64::from(index) - 1;
        let shifted = if shifted == 0 { 7 } else { shifted };

        usize::try_from(shifted)
            .ok()
            .and_then(|position| Day::ORDERED.get(position))
            .copied()
            .unwrap_or(Day::Monday)
    }

    /// The current real-world day of week, in local time.
    pub fn today() -> Day {
        Day::from_sunday_index(chrono::Local::now().weekday().num_days_from_sunday())
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_index_remap_table() {
        // 0 = Sunday .. 6 = Saturday.
        assert_eq!(Day::from_sunday_index(0), Day::Monday);
        assert_eq!(Day::from_sunday_index(1), Day::Monday);
        assert_eq!(Day::from_sunday_index(2), Day::Tuesday);
        assert_eq!(Day::from_sunday_index(3), Day::Wednesday);
        assert_eq!(Day::from_sunday_index(4), Day::Thursday);
        assert_eq!(Day::from_sunday_index(5), Day::Friday);
        assert_eq!(Day::from_sunday_index(6), Day::Saturday);
    }

    #[test]
    fn out_of_range_index_falls_back_to_monday() {
        assert_eq!(Day::from_sunday_index(7), Day::Monday);
        assert_eq!(Day::from_sunday_index(42), Day::Monday);
    }

    #[test]
    fn from_name_parses_known_days() {
        assert_eq!(Day::from_name("wednesday"), Day::Wednesday);
        assert_eq!(Day::from_name("sunday"), Day::Sunday);
    }

    #[test]
    fn from_name_coerces_unknown_to_monday() {
        assert_eq!(Day::from_name("someday"), Day::Monday);
        assert_eq!(Day::from_name(""), Day::Monday);
        assert_eq!(Day::from_name("Friday"), Day::Monday);
    }
}
