//! Input validation for timetabling domains.
//!
//! Checks structural integrity of the reference tables before a
//! [`Domain`](crate::models::Domain) is built. Detects:
//! - Empty tables
//! - Duplicate names
//! - Zero enrollment and zero capacity (the room-fit ratio divides by enrollment)
//! - Facilitator references that do not exist
//! - Special-case rules naming unknown activities or facilitators

use std::collections::HashSet;

use crate::models::DomainData;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A table has no entries.
    EmptyTable,
    /// Two entries of one table share the same name.
    DuplicateName,
    /// An activity expects no students.
    ZeroEnrollment,
    /// A room has no seats.
    ZeroCapacity,
    /// A facilitator name does not exist.
    UnknownFacilitator,
    /// A rule names an activity that does not exist.
    UnknownActivity,
    /// A section pair names the same activity twice.
    DegenerateSectionPair,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates raw domain data.
///
/// Checks:
/// 1. Facilitator, time slot, room and activity tables are non-empty
/// 2. Names are unique within each table
/// 3. Every activity has a positive enrollment, every room a positive capacity
/// 4. Every facilitator referenced by an activity exists
/// 5. Section pairs name two distinct, existing activities
/// 6. The low-load exemption names an existing facilitator
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_domain(data: &DomainData) -> ValidationResult {
    let mut errors = Vec::new();

    for (table, len) in [
        ("facilitator", data.facilitators.len()),
        ("time slot", data.time_slots.len()),
        ("room", data.rooms.len()),
        ("activity", data.activities.len()),
    ] {
        if len == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTable,
                format!("No {table} entries"),
            ));
        }
    }

    let facilitator_names = collect_unique(
        data.facilitators.iter().map(|f| f.name.as_str()),
        "facilitator",
        &mut errors,
    );
    collect_unique(
        data.time_slots.iter().map(|t| t.label.as_str()),
        "time slot",
        &mut errors,
    );
    collect_unique(data.rooms.iter().map(|r| r.name.as_str()), "room", &mut errors);
    let activity_names = collect_unique(
        data.activities.iter().map(|a| a.name.as_str()),
        "activity",
        &mut errors,
    );

    for room in &data.rooms {
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Room '{}' has zero capacity", room.name),
            ));
        }
    }

    for act in &data.activities {
        if act.enrollment == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroEnrollment,
                format!("Activity '{}' has zero expected enrollment", act.name),
            ));
        }
        for name in act.referenced_facilitators() {
            if !facilitator_names.contains(name) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownFacilitator,
                    format!(
                        "Activity '{}' references unknown facilitator '{}'",
                        act.name, name
                    ),
                ));
            }
        }
    }

    for (a, b) in &data.rules.section_pairs {
        for name in [a, b] {
            if !activity_names.contains(name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownActivity,
                    format!("Section pair references unknown activity '{name}'"),
                ));
            }
        }
        if a == b {
            errors.push(ValidationError::new(
                ValidationErrorKind::DegenerateSectionPair,
                format!("Section pair lists '{a}' twice"),
            ));
        }
    }

    if let Some(name) = &data.rules.low_load_exemption {
        if !facilitator_names.contains(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFacilitator,
                format!("Low-load exemption references unknown facilitator '{name}'"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collects names into a set, recording a [`ValidationErrorKind::DuplicateName`]
/// for every repeat.
fn collect_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    table: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate {table} name: {name}"),
            ));
        }
    }
    seen
}
