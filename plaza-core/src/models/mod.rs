pub mod events;
pub mod id;
pub mod message;
pub mod streamer;

pub use events::{ClientEvent, ServerEvent};
pub use id::{generate_id, MessageId, StreamerId, UserId};
pub use message::{ChatMessage, ChatMessageWithAuthor, MessageAuthor};
pub use streamer::{LiveStreamRecord, Platform, StreamerConfig};
