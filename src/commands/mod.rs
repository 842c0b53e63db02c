pub mod completions;
pub mod kill;
