//! Pure domain logic
//!
//! Everything in this module is deterministic and side-effect-free: the
//! service layer fetches data, these functions derive render data and
//! statistics from it.

pub mod analytics;
pub mod assembler;
pub mod device;
pub mod theme;
pub mod types;
pub mod visibility;

pub use analytics::{aggregate_window, summarize, DetailedStats, SummaryStats};
pub use assembler::{assemble, AssembledPage};
pub use device::classify_device;
pub use theme::{all_presets, preset, resolve_style, RenderStyle, ThemePreset};
pub use visibility::resolve_visibility;
