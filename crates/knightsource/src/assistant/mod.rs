//! Chat assistant backed by an optional remote answer service with a local
//! keyword fallback.

mod keywords;
mod remote;
pub mod router;
mod service;

pub use keywords::KeywordResponder;
pub use remote::HttpAnswerSource;
pub use router::{assistant_router, AssistantMessage};
pub use service::{
    AnswerError, AnswerSource, AssistantError, AssistantReply, AssistantService, NoRemote,
    ReplySource,
};
