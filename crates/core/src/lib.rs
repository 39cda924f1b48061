pub mod block;
pub mod category;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod ids;
pub mod registry;

pub use block::{BlockDefinition, BlockKind};
pub use category::EventCategory;
pub use color::{ColorScheme, ColorSlot, default_scheme_for};
pub use config::{BlockConfig, InvitationConfig};
pub use content::BlockContent;
pub use error::CoreError;
pub use ids::*;
