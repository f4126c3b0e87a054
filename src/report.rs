//! Plain-text rendering of timetables.

use crate::ga::{FitnessBreakdown, Individual};
use crate::models::Domain;

fn row(activity: &str, room: &str, time: &str, facilitator: &str) -> String {
    format!("{activity:<8}  {room:<10}  {time:<5}  {facilitator}")
}

/// Joins lines, terminating each with a newline.
fn render(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Renders an individual as a fixed-width table.
///
/// One header line, one dashed separator of header length, then one row per
/// activity in domain order.
///
/// # Panics
/// If the individual does not match the domain.
pub fn format_schedule(domain: &Domain, individual: &Individual) -> String {
    assert!(
        individual.is_valid(domain),
        "individual does not match domain"
    );
    let header = row("Activity", "Room", "Time", "Facilitator");
    let separator = "-".repeat(header.len());
    let mut lines = vec![header, separator];
    lines.extend(
        domain
            .activities()
            .iter()
            .zip(individual.placements())
            .map(|(activity, p)| {
                row(
                    &activity.name,
                    &domain.rooms()[p.room].name,
                    &domain.time_slots()[p.time].label,
                    &domain.facilitators()[p.facilitator].name,
                )
            }),
    );
    render(lines)
}

/// Renders a fitness breakdown: per-activity scores, then rule adjustments.
pub fn format_breakdown(domain: &Domain, breakdown: &FitnessBreakdown) -> String {
    let activities = domain.activities();
    let mut lines = vec![format!(
        "{:<8}  {:>6}  {:>6}  {:>6}",
        "Activity", "base", "load", "score"
    )];
    lines.extend(activities.iter().enumerate().map(|(i, activity)| {
        format!(
            "{:<8}  {:>6.2}  {:>6.2}  {:>6.2}",
            activity.name,
            breakdown.activity_base[i],
            breakdown.load_adjustments[i],
            breakdown.activity_score(i),
        )
    }));
    lines.extend(
        domain
            .section_pairs()
            .iter()
            .zip(&breakdown.section_pair_adjustments)
            .map(|(pair, adj)| {
                let [a, b] = pair.sections();
                format!("{} / {}: {adj:+.2}", activities[a].name, activities[b].name)
            }),
    );
    lines.push(format!(
        "cross-section: {:+.2}",
        breakdown.cross_section_adjustment
    ));
    lines.push(format!("total: {:.2}", breakdown.total));
    render(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Placement, evaluate_breakdown};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_schedule_table_shape() {
        let domain = Domain::sla().unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let ind = Individual::random(&domain, &mut rng);
        let text = format_schedule(&domain, &ind);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "Activity  Room        Time   Facilitator");
        assert_eq!(lines[1], "-".repeat(lines[0].len()));

        for (i, line) in lines[2..].iter().enumerate() {
            let p = ind.placement(i);
            assert_eq!(line[..8].trim_end(), domain.activities()[i].name);
            assert_eq!(&line[8..10], "  ");
            assert_eq!(line[10..20].trim_end(), domain.rooms()[p.room].name);
            assert_eq!(line[22..27].trim_end(), domain.time_slots()[p.time].label);
            assert_eq!(&line[29..], domain.facilitators()[p.facilitator].name);
        }
    }

    #[test]
    fn test_schedule_row() {
        let domain = Domain::sla().unwrap();
        let ind = Individual::new(vec![Placement::new(8, 3, 1); 11]);
        let text = format_schedule(&domain, &ind);
        assert_eq!(
            text.lines().nth(2),
            Some("SLA101A   Slater 003  1 PM   Glen")
        );
    }

    #[test]
    fn test_every_line_is_terminated() {
        let domain = Domain::sla().unwrap();
        let ind = Individual::new(vec![Placement::new(0, 0, 0); 11]);
        let text = format_schedule(&domain, &ind);
        assert_eq!(text.matches('\n').count(), 13);
        assert!(text.ends_with("Lock\n"));
        assert!(!text.contains("\n\n"));
    }

    #[test]
    #[should_panic(expected = "individual does not match domain")]
    fn test_schedule_rejects_mismatch() {
        let domain = Domain::sla().unwrap();
        format_schedule(&domain, &Individual::new(vec![Placement::new(0, 0, 0)]));
    }

    #[test]
    fn test_breakdown_lists_every_part() {
        let domain = Domain::sla().unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let ind = Individual::random(&domain, &mut rng);
        let breakdown = evaluate_breakdown(&domain, &ind);
        let text = format_breakdown(&domain, &breakdown);

        // Header, 11 activities, 2 section pairs, cross-section, total.
        assert_eq!(text.lines().count(), 16);
        assert!(text.contains("SLA101A / SLA101B"));
        assert!(text.ends_with(&format!("total: {:.2}\n", breakdown.total)));
    }
}
