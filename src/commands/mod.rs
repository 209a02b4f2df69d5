//! Command registration, resolution and handlers for Herald.
//!
//! Parsing and lookup are kept apart from execution so they can be tested
//! without a transport.

pub mod definitions;
pub mod handlers;
pub mod notices;
pub mod output;
pub mod registry;
pub mod remote;
pub mod resolver;
pub mod tokenizer;

pub use definitions::{CommandDef, HandlerRef, PREFIX_COMMANDS, SLASH_COMMANDS};
pub use handlers::{CommandContext, Handler, InteractionHandler, MessageHandler};
pub use output::{
    Button, ButtonStyle, Embed, EmbedField, InteractionResponse, OutgoingMessage, ResponseKind,
};
pub use registry::{Command, Registry, RegistryKind};
pub use remote::{RemoteCommand, UnloadReport};
pub use resolver::{authorize, AllowList, Resolution};
pub use tokenizer::{parse_invocation, tokenize, Invocation};
