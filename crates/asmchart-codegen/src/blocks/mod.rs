//! Building blocks of the generated module
//!
//! Each submodule emits one kind of structural unit as a finished text
//! fragment. Fragments are composed by nesting them into a parent
//! [`CodeBlock`] at the caller's indentation depth.

pub mod code_block;
pub mod continuation;
pub mod declarations;
pub mod state;

pub use code_block::CodeBlock;
pub use continuation::{Assignment, Continuation};
pub use declarations::DeclarationsCodegen;
pub use state::StateCodegen;
