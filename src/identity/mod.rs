// ABOUTME: Cached container identity and the resolver that populates it.
// ABOUTME: Also exposes the leveled text rendering and UUID generation seam.

mod format;
mod id_gen;
mod record;
mod resolver;

pub use format::render;
pub use id_gen::{IdGenerator, UuidV4Generator};
pub use record::ContainerIdentity;
pub use resolver::IdentityResolver;
