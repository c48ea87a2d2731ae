mod gantt;
mod projector;

#[cfg(test)]
mod tests;

pub use gantt::GanttChart;
pub use projector::{FlightInterval, NowMarker};
