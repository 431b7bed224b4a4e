//! Library side of the `hrprep` command line tool.

pub mod logging;
pub mod pipeline;
