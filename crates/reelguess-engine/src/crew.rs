use reelguess_types::{CastMember, CrewMember, PersonCastCredit, PersonCrewCredit};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

pub const DIRECTOR: &str = "Director";
pub const WRITER: &str = "Writer";
pub const PRODUCER: &str = "Producer";

/// A person's crew credits split into the three jobs the person screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrewJobGroups {
    pub director: Vec<PersonCrewCredit>,
    pub writer: Vec<PersonCrewCredit>,
    pub producer: Vec<PersonCrewCredit>,
}

impl CrewJobGroups {
    pub fn is_empty(&self) -> bool {
        self.director.is_empty() && self.writer.is_empty() && self.producer.is_empty()
    }

    /// Non-empty buckets with their section labels, in display order.
    pub fn sections(&self) -> Vec<(&'static str, &[PersonCrewCredit])> {
        [
            (DIRECTOR, self.director.as_slice()),
            (WRITER, self.writer.as_slice()),
            (PRODUCER, self.producer.as_slice()),
        ]
        .into_iter()
        .filter(|(_, credits)| !credits.is_empty())
        .collect()
    }
}

/// Bucket crew credits by exact job name. Any other job (including
/// "Executive Producer" or "Screenplay") is dropped. Input order is kept
/// within each bucket.
pub fn group_crew_by_job(crew: &[PersonCrewCredit]) -> CrewJobGroups {
    let mut groups = CrewJobGroups::default();
    for credit in crew {
        let bucket = match credit.job.as_str() {
            DIRECTOR => &mut groups.director,
            WRITER => &mut groups.writer,
            PRODUCER => &mut groups.producer,
            _ => continue,
        };
        bucket.push(credit.clone());
    }
    groups
}

/// Title crew keyed by department, for the title credits screen.
pub fn group_crew_by_department(crew: &[CrewMember]) -> BTreeMap<String, Vec<CrewMember>> {
    let mut departments: BTreeMap<String, Vec<CrewMember>> = BTreeMap::new();
    for member in crew {
        let department = if member.department.is_empty() {
            "Other".to_string()
        } else {
            member.department.clone()
        };
        departments.entry(department).or_default().push(member.clone());
    }
    departments
}

/// Billing order, lowest first. Ties keep input order.
pub fn sort_cast_by_order(mut cast: Vec<CastMember>) -> Vec<CastMember> {
    cast.sort_by_key(|member| member.order);
    cast
}

/// Newest credits first; credits without a date go last.
pub fn sort_person_credits(mut credits: Vec<PersonCastCredit>) -> Vec<PersonCastCredit> {
    credits.sort_by_key(|credit| Reverse(credit.title.release_year().unwrap_or(i32::MIN)));
    credits
}
