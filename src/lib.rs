pub mod app_loop;
pub mod clock;
pub mod color;
pub mod config;
pub mod input;
pub mod logging;
pub mod mapping;
pub mod particles;
pub mod portrait;
pub mod render;
pub mod renderer;
pub mod scene;
