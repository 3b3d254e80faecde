pub mod admin;
pub mod difficulty;
pub mod login;
pub mod quiz;
pub mod results;
pub mod subject;
pub mod transition;
pub mod welcome;
