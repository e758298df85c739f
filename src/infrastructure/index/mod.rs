mod disk_vector_index;

pub use disk_vector_index::DiskVectorIndex;
