//! Built-in SLA dataset: 10 facilitators, 6 time slots, 9 rooms, 11 activities.

use super::{Activity, DomainData, SchedulingRules};

const INTRO_PREFERRED: [&str; 3] = ["Glen", "Lock", "Banks"];
const INTRO_OTHER: [&str; 4] = ["Numen", "Richards", "Shaw", "Singer"];
const CORE_PREFERRED: [&str; 5] = ["Glen", "Banks", "Zeldin", "Lock", "Singer"];
const CORE_OTHER: [&str; 3] = ["Richards", "Uther", "Shaw"];

/// Raw data for the SLA timetable.
pub fn sla_data() -> DomainData {
    let facilitators = [
        "Lock", "Glen", "Banks", "Richards", "Shaw", "Singer", "Uther", "Tyler", "Numen", "Zeldin",
    ];
    let time_slots = [
        ("10 AM", 10),
        ("11 AM", 11),
        ("12 PM", 12),
        ("1 PM", 13),
        ("2 PM", 14),
        ("3 PM", 15),
    ];
    let rooms = [
        ("Beach 201", 18, "Beach"),
        ("Beach 301", 25, "Beach"),
        ("Frank 119", 95, "Frank"),
        ("Loft 206", 55, "Loft"),
        ("Loft 310", 48, "Loft"),
        ("James 325", 110, "James"),
        ("Roman 201", 40, "Roman"),
        ("Roman 216", 80, "Roman"),
        ("Slater 003", 32, "Slater"),
    ];

    let activities = vec![
        Activity::new("SLA101A", 40)
            .with_preferred(INTRO_PREFERRED)
            .with_other(INTRO_OTHER),
        Activity::new("SLA101B", 35)
            .with_preferred(INTRO_PREFERRED)
            .with_other(INTRO_OTHER),
        Activity::new("SLA191A", 45)
            .with_preferred(INTRO_PREFERRED)
            .with_other(INTRO_OTHER),
        Activity::new("SLA191B", 40)
            .with_preferred(INTRO_PREFERRED)
            .with_other(INTRO_OTHER),
        Activity::new("SLA201", 60)
            .with_preferred(CORE_PREFERRED)
            .with_other(CORE_OTHER),
        Activity::new("SLA291", 50)
            .with_preferred(CORE_PREFERRED)
            .with_other(CORE_OTHER),
        Activity::new("SLA303", 25)
            .with_preferred(["Glen", "Zeldin"])
            .with_other(["Banks"]),
        Activity::new("SLA304", 20)
            .with_preferred(["Singer", "Uther"])
            .with_other(["Richards"]),
        Activity::new("SLA394", 15)
            .with_preferred(["Tyler", "Singer"])
            .with_other(["Richards", "Zeldin"]),
        Activity::new("SLA449", 30)
            .with_preferred(["Tyler", "Zeldin", "Uther"])
            .with_other(["Zeldin", "Shaw"]),
        Activity::new("SLA451", 90)
            .with_preferred(["Lock", "Banks", "Zeldin"])
            .with_other(["Tyler", "Singer", "Shaw", "Glen"]),
    ];

    let mut data = DomainData::new();
    for name in facilitators {
        data = data.with_facilitator(name);
    }
    for (label, hour) in time_slots {
        data = data.with_time_slot(label, hour);
    }
    for (name, capacity, building) in rooms {
        data = data.with_room(name, capacity, building);
    }
    for activity in activities {
        data = data.with_activity(activity);
    }

    data.with_rules(
        SchedulingRules::default()
            .with_section_pair("SLA101A", "SLA101B")
            .with_section_pair("SLA191A", "SLA191B")
            .with_low_load_exemption("Tyler")
            .with_neighborhood_building("Roman")
            .with_neighborhood_building("Beach"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Domain, Suitability};

    #[test]
    fn test_builtin_is_valid() {
        let domain = Domain::sla().unwrap();
        assert_eq!(domain.facilitator_count(), 10);
        assert_eq!(domain.time_slot_count(), 6);
        assert_eq!(domain.room_count(), 9);
        assert_eq!(domain.activity_count(), 11);
    }

    #[test]
    fn test_builtin_rules_resolved() {
        let domain = Domain::sla().unwrap();
        let pairs = domain.section_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].sections(), [0, 1]);
        assert_eq!(pairs[1].sections(), [2, 3]);

        let tyler = domain.facilitator_index("Tyler").unwrap();
        assert!(domain.is_low_load_exempt(tyler));

        // Beach 201 and Roman 216 are in the neighborhood, Frank 119 is not.
        assert!(domain.in_neighborhood(0));
        assert!(domain.in_neighborhood(7));
        assert!(!domain.in_neighborhood(2));
    }

    #[test]
    fn test_zeldin_listed_twice_is_preferred_for_sla449() {
        let domain = Domain::sla().unwrap();
        let sla449 = domain.activity_index("SLA449").unwrap();
        let zeldin = domain.facilitator_index("Zeldin").unwrap();
        let shaw = domain.facilitator_index("Shaw").unwrap();
        assert_eq!(domain.suitability(sla449, zeldin), Suitability::Preferred);
        assert_eq!(domain.suitability(sla449, shaw), Suitability::Other);
    }

    #[test]
    fn test_sla_data_order() {
        let data = sla_data();
        assert_eq!(data.facilitators[7].name, "Tyler");
        assert_eq!(data.time_slots[3].label, "1 PM");
        assert_eq!(data.time_slots[3].hour, 13);
        assert_eq!(data.rooms[8].name, "Slater 003");
        assert_eq!(data.activities[10].name, "SLA451");
    }
}
