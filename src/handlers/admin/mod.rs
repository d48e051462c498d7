pub mod casestudies;
pub mod certificates;
pub mod cv;
pub mod experience;
pub mod profile;
pub mod projects;
pub mod socials;
pub mod techs;
pub mod testimonials;
pub mod utils;
