mod policy;
mod route_guards;

pub use policy::{can_modify_reminder, Permission, Policy};
pub use route_guards::protect_route;
