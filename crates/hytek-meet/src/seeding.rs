//! Heat and lane assignment.
//!
//! Entries arrive in seed order (fastest first). Heats are filled from the
//! slowest end, so heat 1 holds the slowest swimmers and the last heat the
//! fastest. Inside a heat the fastest swimmers are moved towards the middle
//! lanes, and heats of one or two swimmers start at lane 2.

use hytek_hy3::{Hy3Document, IndividualResult};

use crate::error::{MeetError, Result};
use crate::meet::{Entry, Event};

/// Default number of lanes.
pub const DEFAULT_LANES: u32 = 4;

/// Options for heat assignment.
#[derive(Debug, Clone)]
pub struct SeedingOptions {
    /// Lanes available per heat.
    pub lanes: u32,
}

impl Default for SeedingOptions {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
        }
    }
}

impl SeedingOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of lanes.
    #[must_use]
    pub fn with_lanes(mut self, lanes: u32) -> Self {
        self.lanes = lanes;
        self
    }
}

/// Heat and lane given to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub heat: u32,
    pub lane: u32,
}

/// Swimmers per heat, heat 1 first.
///
/// Every heat is full except the first, which takes the remainder. A
/// remainder of one borrows a swimmer from heat 2 so nobody swims alone.
pub fn heat_sizes(entries: usize, lanes: u32) -> Vec<usize> {
    let lanes = lanes as usize;
    if entries == 0 || lanes == 0 {
        return Vec::new();
    }
    let remainder = entries % lanes;
    let heats = entries.div_ceil(lanes);

    let mut sizes = vec![lanes; heats];
    if remainder != 0 {
        sizes[0] = remainder;
    }
    if remainder == 1 && entries > 1 {
        sizes[0] += 1;
        sizes[1] -= 1;
    }
    sizes
}

/// Reorder one heat, given slowest first, into lane order.
pub fn snake_order<T>(heat: &mut [T]) {
    match heat.len() {
        2 => heat.swap(0, 1),
        3 => heat.swap(1, 2),
        // [a, b, c, d] -> [b, d, c, a]
        4 => {
            heat.swap(0, 1);
            heat.swap(1, 3);
        }
        _ => {}
    }
}

/// Lane of the swimmer at `position` (0-based, after snaking) in a heat of
/// `size` swimmers.
pub fn lane_for(position: usize, size: usize) -> u32 {
    let offset = if size < 3 { 2 } else { 1 };
    position as u32 + offset
}

/// Compute heat and lane for each entry, in the order given.
pub fn plan_heats(entries: &[Entry], options: &SeedingOptions) -> Result<Vec<Seat>> {
    if options.lanes == 0 {
        return Err(MeetError::InvalidLaneCount {
            lanes: options.lanes,
        });
    }

    let mut seats = vec![Seat { heat: 0, lane: 0 }; entries.len()];
    let mut remaining = entries.len();
    for (heat, size) in (1u32..).zip(heat_sizes(entries.len(), options.lanes)) {
        // positions into `entries`, slowest first
        let mut members: Vec<usize> = (remaining - size..remaining).rev().collect();
        remaining -= size;
        snake_order(&mut members);
        for (position, &index) in members.iter().enumerate() {
            seats[index] = Seat {
                heat,
                lane: lane_for(position, size),
            };
        }
    }
    Ok(seats)
}

/// Seed an event: give every entry a result stub carrying its heat and
/// lane, replacing any result it had.
///
/// Entries must already be in seed order. An event without entries is
/// left alone.
pub fn assign_heats(event: &Event, doc: &mut Hy3Document, options: &SeedingOptions) -> Result<()> {
    if event.entries.is_empty() {
        return Ok(());
    }
    let seats = plan_heats(&event.entries, options)?;
    if let Some(entry) = event.entries.iter().find(|e| doc.entry(e.at).is_none()) {
        return Err(MeetError::StaleEntry { at: entry.at });
    }

    for (entry, seat) in event.entries.iter().zip(&seats) {
        if let Some(target) = doc.entry_mut(entry.at) {
            target.result = Some(IndividualResult::seeded(seat.heat, seat.lane));
        }
    }
    tracing::debug!(
        event = %event.number(),
        entries = event.entries.len(),
        heats = seats.last().map_or(0, |seat| seat.heat),
        "assigned heats"
    );
    Ok(())
}

/// Seed every event in turn.
pub fn assign_all_heats(events: &[Event], doc: &mut Hy3Document, options: &SeedingOptions) -> Result<()> {
    for event in events {
        assign_heats(event, doc, options)?;
    }
    Ok(())
}

/// Sort entries by heat, then lane, as read from their results in `doc`.
///
/// Entries without a result go last.
pub fn sort_by_heat_and_lane(entries: &mut [Entry], doc: &Hy3Document) {
    entries.sort_by_key(|entry| {
        doc.entry(entry.at)
            .and_then(|e| e.result.as_ref())
            .map_or((u32::MAX, u32::MAX), |result| (result.heat, result.lane))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use hytek_hy3::EntryRef;
    use hytek_model::Time;

    fn entries(count: usize) -> Vec<Entry> {
        (0..count)
            .map(|i| Entry {
                at: EntryRef {
                    team: 0,
                    swimmer: i,
                    entry: 0,
                },
                swimmer_id: format!("S{i}"),
                seed_time: Time::from_hundredths(3000 + 100 * i as u32),
                age: 12,
            })
            .collect()
    }

    fn seats(count: usize, lanes: u32) -> Vec<(u32, u32)> {
        plan_heats(&entries(count), &SeedingOptions::new().with_lanes(lanes))
            .unwrap()
            .into_iter()
            .map(|seat| (seat.heat, seat.lane))
            .collect()
    }

    #[test]
    fn test_heat_sizes() {
        assert_eq!(heat_sizes(0, 4), Vec::<usize>::new());
        assert_eq!(heat_sizes(1, 4), [1]);
        assert_eq!(heat_sizes(4, 4), [4]);
        assert_eq!(heat_sizes(5, 4), [2, 3]);
        assert_eq!(heat_sizes(7, 4), [3, 4]);
        assert_eq!(heat_sizes(8, 4), [4, 4]);
        assert_eq!(heat_sizes(9, 4), [2, 3, 4]);
        assert_eq!(heat_sizes(3, 1), [1, 1, 1]);
    }

    #[test]
    fn test_snake_order() {
        let mut two = ['a', 'b'];
        snake_order(&mut two);
        assert_eq!(two, ['b', 'a']);

        let mut three = ['a', 'b', 'c'];
        snake_order(&mut three);
        assert_eq!(three, ['a', 'c', 'b']);

        let mut four = ['a', 'b', 'c', 'd'];
        snake_order(&mut four);
        assert_eq!(four, ['b', 'd', 'c', 'a']);

        let mut five = ['a', 'b', 'c', 'd', 'e'];
        snake_order(&mut five);
        assert_eq!(five, ['a', 'b', 'c', 'd', 'e']);
    }

    #[test]
    fn test_seven_entries_four_lanes() {
        // entries 4-6 are the three slowest
        assert_eq!(
            seats(7, 4),
            [(2, 2), (2, 3), (2, 1), (2, 4), (1, 2), (1, 3), (1, 1)]
        );
    }

    #[test]
    fn test_single_entry_swims_in_lane_two() {
        assert_eq!(seats(1, 4), [(1, 2)]);
    }

    #[test]
    fn test_two_entries_fastest_in_lane_two() {
        assert_eq!(seats(2, 4), [(1, 2), (1, 3)]);
    }

    #[test]
    fn test_five_entries_avoid_lone_swimmer() {
        assert_eq!(seats(5, 4), [(2, 2), (2, 3), (2, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_zero_lanes_rejected() {
        let err = plan_heats(&entries(3), &SeedingOptions::new().with_lanes(0)).unwrap_err();
        assert!(matches!(err, MeetError::InvalidLaneCount { lanes: 0 }));
    }
}
