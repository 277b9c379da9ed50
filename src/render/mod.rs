/// vello_cpu raster surface.
pub mod cpu;
/// Headless frame driving.
pub mod pipeline;
/// Animated canvas renderer.
pub mod renderer;
/// Frame scheduling hooks.
pub mod scheduler;
/// Frame sinks (in-memory, PNG sequence).
pub mod sink;
/// Drawing surface abstraction.
pub mod surface;
