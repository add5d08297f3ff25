// Engine module - pure view logic shared by every screen
// No I/O here: presenters in the runtime crate feed it records and render the output

pub mod censor;
pub mod crew;
pub mod genres;
pub mod grid;
pub mod guess;

pub use censor::{censor_title, hint_mask};
pub use crew::{
    CrewJobGroups, group_crew_by_department, group_crew_by_job, sort_cast_by_order,
    sort_person_credits,
};
pub use genres::join_genre_names;
pub use grid::{dedupe_by_key, filter_with_posters, format_rating, hide_revealed};
pub use guess::is_correct_guess;
