pub mod assignment;
pub mod projection;

pub use assignment::assign_start_offsets;
pub use projection::{Boundary, project_date, working_day_advances};
