// ABOUTME: Identifier generation seam for new container UUIDs.
// ABOUTME: UuidV4Generator produces random RFC 4122 version 4 UUIDs.

/// Produces identifiers for containers that do not have one yet.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self) -> String {
        (**self).generate()
    }
}

/// Random version 4 UUIDs in lowercase hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
