pub mod chat;
pub mod hub;
pub mod live;
pub mod retention;

pub use chat::ChatService;
pub use hub::{ChannelHub, ConnectionId};
pub use live::LiveStatusService;
pub use retention::RetentionSweeper;
