//! Storybook workspace migration: adds the `webpackFinal` hook to `main.js`
//! files and removes `webpack.config.js` overrides left at their defaults.
//!
//! The binary wraps [`workflow`]; other tooling can drive [`migrate`] over a
//! [`tree::Tree`] directly.
pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod migrate;
mod staging;
pub mod templates;
pub mod transform;
pub mod tree;
pub mod workflow;
pub mod workspace;
