pub mod matchday;
