//! Chat module
//!
//! Relays a caller-held conversation to the conversational model.

pub mod persona;
pub mod relay;

pub use relay::{ChatRelay, ConversationTurn, GenerationReply, GenerationRequest, TextPart};
