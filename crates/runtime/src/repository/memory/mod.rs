mod state;

pub use state::InMemoryStateRepo;
