//! Collapsing route segments into distinct named streets.
//!
//! A street is keyed by the concept node identifier of its label, so labels
//! that differ only in case or punctuation are one street. The first time a
//! street shows up on the route it takes a place in the spine; every later
//! segment of the same street, adjacent or not, only adds its length and is
//! folded into it.

use hashbrown::{HashMap, hash_map::Entry};

use crate::model::{StreetLabel, StreetSegment};

/// Distinct street of a route with its lengths summed over the whole route
#[derive(Debug, Clone, PartialEq)]
pub struct Street {
    /// Label of the first segment of the street
    pub name: StreetLabel,
    /// Concept node identifier shared by every segment of the street
    pub identifier: String,
    pub total_length: u64,
    /// Segments with this name, in path order
    pub segments: Vec<StreetSegment>,
}

#[derive(Debug, Clone, Default)]
pub struct StreetAggregate {
    spine: Vec<Street>,
    lengths: HashMap<String, u64>,
}

impl StreetAggregate {
    /// Distinct streets in first-occurrence order
    pub fn spine(&self) -> &[Street] {
        &self.spine
    }

    pub fn names(&self) -> impl Iterator<Item = &StreetLabel> {
        self.spine.iter().map(|street| &street.name)
    }

    /// Total length per street identifier across the whole route
    pub fn lengths(&self) -> &HashMap<String, u64> {
        &self.lengths
    }

    pub fn total_length(&self, name: &StreetLabel) -> Option<u64> {
        self.lengths.get(&name.identifier()).copied()
    }

    pub fn len(&self) -> usize {
        self.spine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spine.is_empty()
    }
}

/// Groups path-ordered segments into distinct streets
pub fn aggregate_streets<'a, I>(segments: I) -> StreetAggregate
where
    I: IntoIterator<Item = &'a StreetSegment>,
{
    let mut spine: Vec<Street> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for segment in segments {
        match positions.entry(segment.name.identifier()) {
            Entry::Occupied(entry) => {
                let street = &mut spine[*entry.get()];
                street.total_length += u64::from(segment.length);
                street.segments.push(segment.clone());
            }
            Entry::Vacant(entry) => {
                let identifier = entry.key().clone();
                entry.insert(spine.len());
                spine.push(Street {
                    name: segment.name.clone(),
                    identifier,
                    total_length: u64::from(segment.length),
                    segments: vec![segment.clone()],
                });
            }
        }
    }

    let lengths = spine
        .iter()
        .map(|street| (street.identifier.clone(), street.total_length))
        .collect();

    log::debug!("Aggregated route into {} distinct streets", spine.len());

    StreetAggregate { spine, lengths }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_SPEED_KMH, model::RawEdge};

    fn segments(parts: &[(&str, u32)]) -> Vec<StreetSegment> {
        parts
            .iter()
            .map(|&(name, length)| {
                StreetSegment::from_raw(
                    RawEdge {
                        name: StreetLabel::from(name),
                        length,
                        speed_limit: None,
                        geometry: None,
                    },
                    DEFAULT_SPEED_KMH,
                )
            })
            .collect()
    }

    fn names(aggregate: &StreetAggregate) -> Vec<&str> {
        aggregate.names().map(StreetLabel::as_str).collect()
    }

    #[test]
    fn contiguous_repeats_collapse() {
        let aggregate = aggregate_streets(&segments(&[("A", 100), ("A", 50), ("B", 200)]));

        assert_eq!(names(&aggregate), ["A", "B"]);
        assert_eq!(aggregate.total_length(&"A".into()), Some(150));
        assert_eq!(aggregate.total_length(&"B".into()), Some(200));
        assert_eq!(aggregate.spine()[0].segments.len(), 2);
    }

    // Non-contiguous repeats have not been observed in real road data; the
    // rule is kept so a street that is left and re-entered sums to one length.
    #[test]
    fn non_contiguous_repeats_aggregate_globally() {
        let aggregate = aggregate_streets(&segments(&[
            ("A", 100),
            ("B", 30),
            ("A", 20),
            ("C", 5),
            ("B", 7),
        ]));

        assert_eq!(names(&aggregate), ["A", "B", "C"]);
        assert_eq!(aggregate.total_length(&"A".into()), Some(120));
        assert_eq!(aggregate.total_length(&"B".into()), Some(37));
        assert_eq!(aggregate.total_length(&"C".into()), Some(5));
    }

    #[test]
    fn totals_match_segment_sums() {
        let route = segments(&[("X", 3), ("Y", 4), ("X", 5), ("", 6), ("Y", 7), ("", 1)]);
        let aggregate = aggregate_streets(&route);

        for street in aggregate.spine() {
            let expected: u64 = route
                .iter()
                .filter(|segment| segment.name.identifier() == street.identifier)
                .map(|segment| u64::from(segment.length))
                .sum();
            assert_eq!(street.total_length, expected);
            assert_eq!(aggregate.total_length(&street.name), Some(expected));
        }
        assert_eq!(names(&aggregate), ["X", "Y", "unnamed"]);
    }

    #[test]
    fn a_street_called_unnamed_is_not_the_unnamed_marker() {
        let aggregate = aggregate_streets(&segments(&[("Unnamed", 10), ("", 20)]));

        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.total_length(&"Unnamed".into()), Some(10));
        assert_eq!(aggregate.total_length(&StreetLabel::Unnamed), Some(20));
    }

    #[test]
    fn labels_with_one_identifier_are_one_street() {
        let aggregate =
            aggregate_streets(&segments(&[("Main St.", 10), ("B", 5), ("main st", 20)]));

        assert_eq!(names(&aggregate), ["Main St.", "B"]);
        assert_eq!(aggregate.total_length(&"main st".into()), Some(30));
    }

    #[test]
    fn empty_route_has_empty_spine() {
        let aggregate = aggregate_streets(&Vec::<StreetSegment>::new());
        assert!(aggregate.is_empty());
        assert!(aggregate.lengths().is_empty());
    }
}
