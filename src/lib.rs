pub mod descriptor;
pub mod error;
pub mod params;
pub mod runner;
pub mod storage;
pub mod tool;

#[cfg(test)]
pub mod test_utils;
