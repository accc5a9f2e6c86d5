// HTTP routes
pub mod health;
pub mod resources;
pub mod reviews;
pub mod users;

pub use health::*;
pub use resources::*;
pub use reviews::*;
pub use users::*;
