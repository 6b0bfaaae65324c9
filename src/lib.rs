pub use display::DisplayBuffer;
pub use error::LoadError;
pub use machine::Machine;
pub use opcode::Opcode;
pub use random::RandomSource;

pub mod constants;
mod display;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
mod random;
pub mod state;
