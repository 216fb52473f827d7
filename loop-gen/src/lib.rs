#![deny(rust_2018_idioms)]
#![deny(clippy::correctness)]
#![deny(clippy::perf)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod format;
pub mod generator;
pub mod money;
pub mod profile;
pub mod record;
pub mod schema;
pub mod sink;
pub mod status;
