pub mod memory;

pub use memory::InMemoryBillRepository;
