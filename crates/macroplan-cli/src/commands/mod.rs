pub mod plan;
pub mod simulate;
pub mod watch;
