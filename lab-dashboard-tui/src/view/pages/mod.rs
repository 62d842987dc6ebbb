pub mod dashboard;
pub mod labs;
