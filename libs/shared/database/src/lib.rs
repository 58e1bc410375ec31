pub mod blob;
pub mod memory;
pub mod store;

pub use blob::{BlobStore, FileBlobStore};
pub use memory::InMemoryAppointmentStore;
pub use store::{AppointmentStore, StoreError};
