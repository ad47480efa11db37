pub mod check;
pub mod dump;
pub mod loader;
pub mod map;

#[cfg(test)]
mod check_tests;
#[cfg(test)]
mod map_tests;
