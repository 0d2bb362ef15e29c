pub mod gate;
pub mod report;
pub mod response;
pub mod score;
pub mod validity;
