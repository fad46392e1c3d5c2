//! Trenzar - concurrency trace analyzer for model-checker schedules
//!
//! This library turns recorded model-checker traces into annotated JSON
//! timelines: one record per explored path, with thread switch and wakeup
//! annotations, scheduling choice details, and coalesced source-level
//! steps classified by what each instruction does.

pub mod classifier;
pub mod cli;
pub mod coalescer;
pub mod export;
pub mod formatter;
pub mod json_output;
pub mod sanitizer;
pub mod trace;
