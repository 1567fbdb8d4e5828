//! Model references and their resolution.

pub mod reference;
pub mod resolver;

pub use reference::ModelReference;
pub use resolver::ModelResolver;
