//! ECS Components для one-way платформ
//!
//! Организация по доменам:
//! - platform: controller платформы (OneWayPlatform, PlatformMode, PassThroughTimer)
//! - character: capability персонажа (PassThroughSignal, PlatformCharacter)
//! - bounds: collision shape bounds (ShapeBounds, WorldAabb)

pub mod bounds;
pub mod character;
pub mod platform;

// Re-exports для удобного импорта
pub use bounds::*;
pub use character::*;
pub use platform::*;
