pub mod report;
pub mod strategy;
pub mod tip_calculator;
