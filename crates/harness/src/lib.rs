pub mod event;
pub mod fixtures;
pub mod site;

pub use event::TestEvent;
pub use site::TestSite;
