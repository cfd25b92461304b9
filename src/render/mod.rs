pub mod renderer;
pub mod sink;

pub use renderer::{Glyph, Renderer};
pub use sink::{FrameRecord, RecordingSink, RenderSink, TerminalSink};
