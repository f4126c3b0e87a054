//! Timetabling domain models.
//!
//! Static reference data for one scheduling problem: who can teach, when,
//! where, and what needs to be taught.
//!
//! # Domain Mappings
//!
//! | sla-schedule | Campus | Generic scheduling |
//! |--------------|--------|--------------------|
//! | Activity | Course section | Job |
//! | Room | Classroom | Location resource |
//! | TimeSlot | Teaching hour | Period |
//! | Facilitator | Instructor | Human resource |

mod activity;
mod domain;
mod resource;
mod sla;

pub use activity::{Activity, Suitability};
pub use domain::{Domain, DomainData, DomainError, SchedulingRules, SectionPair};
pub use resource::{Facilitator, Room, TimeSlot};
pub use sla::sla_data;
