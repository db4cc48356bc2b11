use uuid::Uuid;

/// Stateless generator of attachment identifiers.
///
/// Ids are fixed-length random strings; uniqueness only needs to hold within
/// a composer session, so no counter is kept and calls may overlap freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub const ID_LEN: usize = 32;

    pub fn new() -> Self {
        Self
    }

    pub fn next(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
