mod hover;
mod identity;

pub use hover::{set_hover_state, HoverSync};
pub use identity::IdentityMap;
