pub mod config;
pub mod shader_compiler;

pub use config::BuildConfig;
pub use log;
pub use shader_compiler::compile_shaders;
