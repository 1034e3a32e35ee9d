pub mod conf;
pub mod controller;
pub mod dashboard;
pub mod display;
pub mod feed;
pub mod logging;
pub mod model;
pub mod pipeline;

#[cfg(test)]
mod test_support;
