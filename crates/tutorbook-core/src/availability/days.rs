use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Set of weekdays, encoded `0 = Sunday .. 6 = Saturday`.
///
/// Serializes as the ascending list of indices, e.g. `[1, 2, 3, 4, 5]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn weekdays() -> Self {
        Self::from_days([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(Self::empty(), |set, day| set.with(day))
    }

    pub fn from_indices(indices: &[u8]) -> Result<Self, DomainError> {
        indices.iter().try_fold(Self::empty(), |set, &idx| {
            ALL_DAYS
                .get(idx as usize)
                .map(|day| set.with(*day))
                .ok_or(DomainError::InvalidWeekday(idx))
        })
    }

    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | bit(day))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> {
        let set = *self;
        ALL_DAYS.into_iter().filter(move |day| set.contains(*day))
    }

    pub fn indices(&self) -> Vec<u8> {
        self.iter()
            .map(|day| day.num_days_from_sunday() as u8)
            .collect()
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.indices().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let indices = Vec::<u8>::deserialize(deserializer)?;
        DaySet::from_indices(&indices).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_is_index_zero() {
        let set = DaySet::from_indices(&[0]).unwrap();
        assert!(set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Mon));
    }

    #[test]
    fn weekdays_are_one_through_five() {
        assert_eq!(DaySet::weekdays().indices(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            DaySet::from_indices(&[5, 1, 3, 2, 4, 1]).unwrap(),
            DaySet::weekdays()
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(
            DaySet::from_indices(&[1, 7]),
            Err(DomainError::InvalidWeekday(7))
        );
    }

    #[test]
    fn serializes_as_index_list() {
        let json = serde_json::to_string(&DaySet::weekdays()).unwrap();
        assert_eq!(json, "[1,2,3,4,5]");
        let back: DaySet = serde_json::from_str("[0,6]").unwrap();
        assert_eq!(back, DaySet::from_days([Weekday::Sun, Weekday::Sat]));
    }

    #[test]
    fn deserializing_bad_index_fails() {
        assert!(serde_json::from_str::<DaySet>("[9]").is_err());
    }
}
