mod grammar;

pub use grammar::{humanize, normalize, normalize_or};
