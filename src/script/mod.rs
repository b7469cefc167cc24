//! Script generation: rendering bundles and writing the result.
pub mod render;
pub mod writer;

pub use render::{
    RenderedScript,
    escape_js_string,
    render,
};
pub use writer::{
    ScriptWriter,
    WriteError,
    target_path,
};
