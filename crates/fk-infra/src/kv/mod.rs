mod memory;

pub use memory::InMemoryKvStore;
