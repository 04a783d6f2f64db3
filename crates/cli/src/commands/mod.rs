pub mod ask;
pub mod doctor;
pub mod modes;
pub mod prompt;
pub mod serve;
