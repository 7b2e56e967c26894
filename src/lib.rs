//! Entity component system core for simple game engine.
//!
//! Component types are declared once per [`World`](ecs::World);
//! entities pick any subset of them, and systems run in priority order
//! over every entity which has all components they require.

pub mod config;
pub mod context;
pub mod ecs;
