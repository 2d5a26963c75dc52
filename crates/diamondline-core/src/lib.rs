// Library root: shared data model for the diamondline grading pipeline.
//
// Everything here is plain value data plus the pieces every stage needs:
// American-odds math, the letter-grade ladders, the injectable noise source,
// and configuration loading.

pub mod config;
pub mod grade;
pub mod noise;
pub mod odds;
pub mod stats;
